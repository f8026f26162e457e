//! Recipe loading and the id-keyed document cache.
//!
//! The cache is abstracted behind a trait so tests can swap it for an
//! instrumented one. The production [`MemoryCache`] is page-session scoped,
//! populated lazily on first fetch per id, and never evicted; the corpus is a
//! personal recipe collection, so unbounded growth is acceptable.

use log::debug;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::error::ViewerError;
use crate::fetch::{parse_document, DocumentFetcher};
use crate::model::{RecipeDocument, RecipeIndex};

/// Id-keyed store of already-fetched recipe documents.
pub trait RecipeCache: Send + Sync {
    fn get(&self, id: &str) -> Option<Arc<RecipeDocument>>;
    fn put(&self, id: &str, doc: Arc<RecipeDocument>);
}

/// In-memory cache used for the lifetime of one viewer session.
#[derive(Default)]
pub struct MemoryCache {
    entries: Mutex<HashMap<String, Arc<RecipeDocument>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("cache lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecipeCache for MemoryCache {
    fn get(&self, id: &str) -> Option<Arc<RecipeDocument>> {
        self.entries
            .lock()
            .expect("cache lock poisoned")
            .get(id)
            .cloned()
    }

    fn put(&self, id: &str, doc: Arc<RecipeDocument>) {
        self.entries
            .lock()
            .expect("cache lock poisoned")
            .insert(id.to_string(), doc);
    }
}

/// Fetch a recipe document by id, memoizing the result.
///
/// Checks the cache first; on miss, resolves the id to a path via the index,
/// fetches, parses, and stores. Fails with `NotFound` when the id is absent
/// from the index, or a load error on fetch/parse failure.
pub async fn get_recipe_by_id(
    fetcher: &dyn DocumentFetcher,
    cache: &dyn RecipeCache,
    index: &RecipeIndex,
    id: &str,
) -> Result<Arc<RecipeDocument>, ViewerError> {
    if let Some(doc) = cache.get(id) {
        debug!("cache hit for `{}`", id);
        return Ok(doc);
    }

    let path = index
        .path_for(id)
        .ok_or_else(|| ViewerError::NotFound(id.to_string()))?;
    let body = fetcher.fetch(path).await?;
    let doc: RecipeDocument = parse_document(path, &body)?;

    let doc = Arc::new(doc);
    cache.put(id, Arc::clone(&doc));
    Ok(doc)
}
