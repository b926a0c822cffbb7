//! Cache configuration handle.
//!
//! Resolved once at startup and treated as read-only afterwards; every
//! dependent receives it by value or reference, never through globals.

/// Runtime configuration for the page store.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Explicit cache root. Wins over the derived default.
    pub root: Option<String>,
    /// Host public/document directory the default root derives from.
    pub public_dir: Option<String>,
    /// Minify HTML payloads before persisting them.
    pub minify_html: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            root: None,
            public_dir: None,
            minify_html: true,
        }
    }
}

impl From<&crate::config::CacheSettings> for CacheConfig {
    fn from(settings: &crate::config::CacheSettings) -> Self {
        Self {
            root: settings.root.clone(),
            public_dir: settings.public_dir.clone(),
            minify_html: settings.minify_html,
        }
    }
}
