use thiserror::Error;

/// Failures surfaced by page store operations.
///
/// The pure key/classify/minify helpers are total; only I/O-touching store
/// operations produce these.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache root cannot be resolved: {message}")]
    Configuration { message: String },
    #[error("cache storage operation failed: {0}")]
    Storage(#[from] std::io::Error),
}

impl CacheError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}
