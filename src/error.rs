use thiserror::Error;

/// Errors that can occur while loading and viewing recipe documents
#[derive(Error, Debug)]
pub enum ViewerError {
    /// Failed to fetch a document over HTTP
    #[error("Failed to fetch document: {0}")]
    FetchError(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("Request for {path} returned HTTP {status}")]
    StatusError { path: String, status: u16 },

    /// Document body was not valid JSON of the expected shape
    #[error("Failed to parse {path}: {source}")]
    ParseError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// Recipe id is not present in the index
    #[error("Recipe id `{0}` is not in the index")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}

impl ViewerError {
    /// True for fetch/parse failures; false when the id was simply absent
    /// from the index.
    pub fn is_load_error(&self) -> bool {
        !matches!(self, ViewerError::NotFound(_))
    }
}
