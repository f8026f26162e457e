use log::{debug, error};
use std::env;

use recipebook::render::render_text;
use recipebook::sidebar::SidebarEntry;
use recipebook::{Viewer, ViewerConfig};

fn print_usage() {
    println!("Usage: recipebook [OPTIONS] [RECIPE_ID]");
    println!();
    println!("Options:");
    println!("  --base-url <url>   Override the configured collection base URL");
    println!("  --list             Print the sidebar only, no recipe");
    println!("  --search <query>   Filter the sidebar by title, subtitle, or id");
    println!("  -h, --help         Show this help");
}

struct Options {
    recipe_id: Option<String>,
    base_url: Option<String>,
    list_only: bool,
    search: Option<String>,
}

fn parse_args(mut args: impl Iterator<Item = String>) -> Result<Option<Options>, String> {
    let mut options = Options {
        recipe_id: None,
        base_url: None,
        list_only: false,
        search: None,
    };

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--list" => options.list_only = true,
            "--search" => {
                options.search =
                    Some(args.next().ok_or("--search requires a query value")?);
            }
            "--base-url" => {
                options.base_url =
                    Some(args.next().ok_or("--base-url requires a URL value")?);
            }
            "-h" | "--help" => return Ok(None),
            other if other.starts_with('-') => {
                return Err(format!("Unknown option: {other}"));
            }
            other => options.recipe_id = Some(other.to_string()),
        }
    }

    Ok(Some(options))
}

fn print_sidebar(entries: &[&SidebarEntry]) {
    for entry in entries {
        match &entry.subtitle {
            Some(subtitle) => println!("  {:<20} {} \u{2014} {}", entry.id, entry.title, subtitle),
            None => println!("  {:<20} {}", entry.id, entry.title),
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let options = match parse_args(env::args().skip(1)) {
        Ok(Some(options)) => options,
        Ok(None) => {
            print_usage();
            return Ok(());
        }
        Err(message) => {
            eprintln!("{message}");
            print_usage();
            std::process::exit(2);
        }
    };

    let mut config = ViewerConfig::load()?;
    if let Some(base_url) = options.base_url {
        config.base_url = base_url;
    }
    debug!("collection base url: {}", config.base_url);

    // Index failure disables the sidebar with an inline message; nothing is
    // fatal to the session itself.
    let viewer = match Viewer::connect(&config).await {
        Ok(viewer) => viewer,
        Err(err) => {
            error!("index load failed: {err}");
            println!("Recipe index unavailable: {err}");
            return Ok(());
        }
    };

    let listed = match &options.search {
        Some(query) => viewer.search(query),
        None => viewer.entries().iter().collect(),
    };
    if listed.is_empty() {
        match &options.search {
            Some(query) => println!("No recipes match `{query}`."),
            None => println!("No recipes in the collection."),
        }
        return Ok(());
    }
    print_sidebar(&listed);

    if options.list_only || options.search.is_some() {
        return Ok(());
    }

    let Some(selected) = viewer.initial_selection(options.recipe_id.as_deref()) else {
        return Ok(());
    };
    let id = selected.id.clone();

    println!();
    match viewer.select(&id).await {
        Ok(Some(nodes)) => print!("{}", render_text(&nodes)),
        Ok(None) => {}
        // Recipe pane shows the failure; the sidebar above stays usable.
        Err(err) => println!("Failed to load recipe `{id}`: {err}"),
    }

    Ok(())
}
