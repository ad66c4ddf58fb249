use thiserror::Error;

/// Errors surfaced to the platform layer.
///
/// Content-level problems (missing fields, unparseable dates, empty feeds)
/// degrade to fallback copy instead of erroring; only a structurally broken
/// feed is worth reporting.
#[derive(Debug, Error)]
pub enum PageError {
    #[error("failed to parse projects feed: {0}")]
    ProjectsFeed(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PageError>;
