use log::debug;

use crate::error::ViewerError;
use crate::fetch::{parse_document, DocumentFetcher};
use crate::model::RecipeIndex;

/// Default location of the collection manifest, relative to the base URL.
pub const INDEX_PATH: &str = "index.json";

/// Load the collection manifest. Fails with a load error when the fetch does
/// not succeed or the body is not valid JSON; callers surface that as a
/// disabled sidebar.
pub async fn load_index(
    fetcher: &dyn DocumentFetcher,
    path: &str,
) -> Result<RecipeIndex, ViewerError> {
    let body = fetcher.fetch(path).await?;
    let index: RecipeIndex = parse_document(path, &body)?;
    debug!("index loaded with {} recipes", index.recipes.len());
    Ok(index)
}
