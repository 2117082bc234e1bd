use thiserror::Error;

use modshelf_catalog::CatalogError;

/// Errors that can end a page search.
///
/// The page never shows these to the user; they collapse into the
/// `failed` flag and are only logged.
#[derive(Debug, Error)]
pub enum SearchError {
    /// The catalog request or its response failed
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The blocking worker task panicked or was cancelled
    #[error("Background task failed: {0}")]
    Worker(String),
}

impl From<tokio::task::JoinError> for SearchError {
    fn from(e: tokio::task::JoinError) -> Self {
        Self::Worker(e.to_string())
    }
}

/// Errors raised while inspecting a game jar.
#[derive(Debug, Error)]
pub enum VersionError {
    /// I/O error while reading the jar
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The jar is not a readable zip archive
    #[error("Invalid jar: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// An embedded JSON file could not be parsed
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A class file inside the jar is malformed
    #[error("Malformed class file: {0}")]
    ClassFormat(String),
}

impl VersionError {
    pub fn class_format(msg: impl Into<String>) -> Self {
        Self::ClassFormat(msg.into())
    }
}
