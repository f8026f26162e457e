//! The viewer session: index, sidebar, cache, and selection.

use log::debug;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use crate::config::ViewerConfig;
use crate::error::ViewerError;
use crate::fetch::{DocumentFetcher, HttpFetcher};
use crate::index::load_index;
use crate::model::RecipeIndex;
use crate::normalize::normalize_current;
use crate::render::{render_page, Node};
use crate::sidebar::{self, SidebarEntry};
use crate::store::{get_recipe_by_id, MemoryCache, RecipeCache};

/// One page-lifetime viewing session over a recipe collection.
///
/// Construction loads the index and builds the sidebar (one sequential fetch
/// per entry); afterwards selections are served from the cache where
/// possible. Selections carry a generation token: a response that resolves
/// after a newer selection began is discarded instead of rendered, so rapid
/// switching can never paint a stale recipe.
pub struct Viewer<F: DocumentFetcher, C: RecipeCache> {
    fetcher: F,
    cache: C,
    index: RecipeIndex,
    entries: Vec<SidebarEntry>,
    generation: AtomicU64,
}

impl Viewer<HttpFetcher, MemoryCache> {
    /// Open a session against the configured base URL.
    pub async fn connect(config: &ViewerConfig) -> Result<Self, ViewerError> {
        let fetcher = HttpFetcher::new(
            config.base_url.clone(),
            Some(Duration::from_secs(config.timeout)),
        );
        Self::open(fetcher, MemoryCache::new(), &config.index_path).await
    }
}

impl<F: DocumentFetcher, C: RecipeCache> Viewer<F, C> {
    /// Open a session with an explicit fetcher and cache.
    pub async fn open(fetcher: F, cache: C, index_path: &str) -> Result<Self, ViewerError> {
        let index = load_index(&fetcher, index_path).await?;
        let entries = sidebar::build_entries(&fetcher, &cache, &index).await?;
        Ok(Self {
            fetcher,
            cache,
            index,
            entries,
            generation: AtomicU64::new(0),
        })
    }

    /// The sorted sidebar entries.
    pub fn entries(&self) -> &[SidebarEntry] {
        &self.entries
    }

    /// Filter the sidebar without refetching.
    pub fn search(&self, query: &str) -> Vec<&SidebarEntry> {
        sidebar::filter_entries(&self.entries, query)
    }

    /// The entry to show first, honoring a deep-link fragment when it names
    /// a known id.
    pub fn initial_selection(&self, fragment: Option<&str>) -> Option<&SidebarEntry> {
        sidebar::initial_selection(&self.entries, fragment)
    }

    fn begin_selection(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    fn selection_is_current(&self, token: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == token
    }

    /// Select a recipe and render it.
    ///
    /// Returns `Ok(None)` when a newer selection superseded this one while
    /// its fetch was in flight; the caller simply drops the result.
    pub async fn select(&self, id: &str) -> Result<Option<Vec<Node>>, ViewerError> {
        let token = self.begin_selection();

        let doc = get_recipe_by_id(&self.fetcher, &self.cache, &self.index, id).await?;

        if !self.selection_is_current(token) {
            debug!("dropping stale response for `{}`", id);
            return Ok(None);
        }

        let nodes = match normalize_current(doc.as_ref()) {
            Some(view) => render_page(&view),
            None => vec![Node::Muted("This recipe has no versions.".to_string())],
        };
        Ok(Some(nodes))
    }
}
