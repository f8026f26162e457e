//! Sidebar entries: built once at startup, filtered in memory afterwards.

use log::warn;

use crate::error::ViewerError;
use crate::fetch::DocumentFetcher;
use crate::model::RecipeIndex;
use crate::store::{get_recipe_by_id, RecipeCache};

#[derive(Debug, Clone, PartialEq)]
pub struct SidebarEntry {
    pub id: String,
    pub title: String,
    pub subtitle: Option<String>,
}

/// Build the sidebar by loading every indexed document just to extract title
/// and subtitle. One fetch per entry, sequential, no batching; the cache
/// fills as a side effect, so the first selection is free. Entries whose
/// document fails to load are skipped with a warning rather than taking the
/// whole sidebar down.
pub async fn build_entries(
    fetcher: &dyn DocumentFetcher,
    cache: &dyn RecipeCache,
    index: &RecipeIndex,
) -> Result<Vec<SidebarEntry>, ViewerError> {
    let mut entries = Vec::with_capacity(index.recipes.len());
    for row in &index.recipes {
        match get_recipe_by_id(fetcher, cache, index, &row.id).await {
            Ok(doc) => entries.push(SidebarEntry {
                id: row.id.clone(),
                title: doc.meta.title.clone(),
                subtitle: doc.meta.subtitle.clone(),
            }),
            Err(err) => warn!("skipping `{}` in sidebar: {}", row.id, err),
        }
    }

    // Lexicographic by title, case-sensitive.
    entries.sort_by(|a, b| a.title.cmp(&b.title));
    Ok(entries)
}

/// Case-insensitive substring filter against title, subtitle, or id. Works
/// on the already-built sequence; never refetches.
pub fn filter_entries<'a>(entries: &'a [SidebarEntry], query: &str) -> Vec<&'a SidebarEntry> {
    let needle = query.to_lowercase();
    entries
        .iter()
        .filter(|entry| {
            entry.title.to_lowercase().contains(&needle)
                || entry
                    .subtitle
                    .as_ref()
                    .is_some_and(|s| s.to_lowercase().contains(&needle))
                || entry.id.to_lowercase().contains(&needle)
        })
        .collect()
}

/// The entry to select on load: the deep-link fragment if it names a known
/// id, otherwise the first item in the sorted sequence. Unknown fragments
/// are ignored, not errors.
pub fn initial_selection<'a>(
    entries: &'a [SidebarEntry],
    fragment: Option<&str>,
) -> Option<&'a SidebarEntry> {
    if let Some(id) = fragment {
        if let Some(entry) = entries.iter().find(|e| e.id == id) {
            return Some(entry);
        }
    }
    entries.first()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryCache;
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct MapFetcher(HashMap<String, String>);

    #[async_trait]
    impl DocumentFetcher for MapFetcher {
        async fn fetch(&self, path: &str) -> Result<String, ViewerError> {
            self.0.get(path).cloned().ok_or_else(|| ViewerError::StatusError {
                path: path.to_string(),
                status: 404,
            })
        }
    }

    fn collection() -> (MapFetcher, RecipeIndex) {
        let mut docs = HashMap::new();
        docs.insert(
            "zebra.json".to_string(),
            r#"{ "meta": { "title": "Zebra cake" }, "versions": [] }"#.to_string(),
        );
        docs.insert(
            "apple.json".to_string(),
            r#"{ "meta": { "title": "apple pie", "subtitle": "Orchard classic" }, "versions": [] }"#
                .to_string(),
        );
        docs.insert(
            "bread.json".to_string(),
            r#"{ "meta": { "title": "Bread" }, "versions": [] }"#.to_string(),
        );

        let index: RecipeIndex = serde_json::from_str(
            r#"{ "recipes": [
                { "id": "zebra", "path": "zebra.json" },
                { "id": "apple", "path": "apple.json" },
                { "id": "bread", "path": "bread.json" }
            ] }"#,
        )
        .unwrap();

        (MapFetcher(docs), index)
    }

    #[tokio::test]
    async fn entries_are_sorted_case_sensitively_by_title() {
        let (fetcher, index) = collection();
        let cache = MemoryCache::new();
        let entries = build_entries(&fetcher, &cache, &index).await.unwrap();

        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        // Uppercase sorts before lowercase in a case-sensitive comparison.
        assert_eq!(titles, vec!["Bread", "Zebra cake", "apple pie"]);
        // Building the sidebar warmed the cache, one document per entry.
        assert_eq!(cache.len(), 3);
    }

    #[tokio::test]
    async fn failing_entry_is_skipped_not_fatal() {
        let (mut fetcher, index) = collection();
        fetcher.0.remove("bread.json");
        let cache = MemoryCache::new();

        let entries = build_entries(&fetcher, &cache, &index).await.unwrap();
        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|e| e.id != "bread"));
    }

    #[tokio::test]
    async fn filter_matches_subtitle_substring_only() {
        let (fetcher, index) = collection();
        let cache = MemoryCache::new();
        let entries = build_entries(&fetcher, &cache, &index).await.unwrap();

        let hits = filter_entries(&entries, "orchard");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "apple");
    }

    #[tokio::test]
    async fn filter_matches_id_and_is_case_insensitive() {
        let (fetcher, index) = collection();
        let cache = MemoryCache::new();
        let entries = build_entries(&fetcher, &cache, &index).await.unwrap();

        let hits = filter_entries(&entries, "ZEB");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, "zebra");

        // Empty query keeps everything.
        assert_eq!(filter_entries(&entries, "").len(), 3);
    }

    #[tokio::test]
    async fn initial_selection_prefers_known_fragment() {
        let (fetcher, index) = collection();
        let cache = MemoryCache::new();
        let entries = build_entries(&fetcher, &cache, &index).await.unwrap();

        assert_eq!(initial_selection(&entries, Some("apple")).unwrap().id, "apple");
        // Unknown fragment falls back to the first sorted entry.
        assert_eq!(initial_selection(&entries, Some("ghost")).unwrap().id, "bread");
        assert_eq!(initial_selection(&entries, None).unwrap().id, "bread");
        assert!(initial_selection(&[], None).is_none());
    }
}
