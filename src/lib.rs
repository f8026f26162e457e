pub mod config;
pub mod error;
pub mod fetch;
pub mod index;
pub mod model;
pub mod normalize;
pub mod render;
pub mod sidebar;
pub mod store;
pub mod viewer;

pub use config::ViewerConfig;
pub use error::ViewerError;
pub use model::{RecipeDocument, RecipeIndex};
pub use normalize::ContentView;
pub use render::{render_text, Node};
pub use sidebar::SidebarEntry;
pub use viewer::Viewer;

use fetch::HttpFetcher;
use store::MemoryCache;

/// Open a viewing session over the configured collection: loads the index
/// and builds the sidebar.
pub async fn load_collection(
    config: &ViewerConfig,
) -> Result<Viewer<HttpFetcher, MemoryCache>, ViewerError> {
    Viewer::connect(config).await
}

/// Fetch one recipe by id and render it to text. Convenience wrapper over
/// the full session for one-shot use.
pub async fn view_recipe(config: &ViewerConfig, id: &str) -> Result<String, ViewerError> {
    let viewer = Viewer::connect(config).await?;
    let nodes = viewer
        .select(id)
        .await?
        .unwrap_or_default();
    Ok(render_text(&nodes))
}
