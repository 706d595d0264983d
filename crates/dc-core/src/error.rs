use thiserror::Error;

#[derive(Error, Debug)]
pub enum CompactError {
    #[error("Depth limit exceeded: input nests deeper than {limit} container levels")]
    DepthLimitExceeded { limit: usize },
    #[error("Expected a mapping at the root, found {found}")]
    NotAMapping { found: &'static str },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CompactError>;
