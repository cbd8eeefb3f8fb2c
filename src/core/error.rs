//! Error taxonomy for store and workflow failures

use thiserror::Error;

/// Result alias used throughout the core modules
pub type Result<T> = std::result::Result<T, ShopError>;

/// Errors surfaced by the store, resolver, and workflows.
///
/// Invalid integer input never appears here: the terminal operator
/// re-prompts until a valid number is typed, so parse failures are
/// consumed at the prompt.
#[derive(Debug, Error)]
pub enum ShopError {
    #[error("store error: {0}")]
    Store(#[from] rusqlite::Error),

    #[error("selection {index} is out of range (expected 0..{len})")]
    Selection { index: usize, len: usize },

    #[error("prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("invalid date '{0}' (expected YYYY-MM-DD)")]
    Date(String),

    #[error("no {entity} found for '{key}'")]
    NotFound { entity: &'static str, key: String },

    #[error("service request {0} is already closed")]
    AlreadyClosed(i64),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ShopError {
    /// Convenience constructor for missing-row errors
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        ShopError::NotFound {
            entity,
            key: key.to_string(),
        }
    }
}
