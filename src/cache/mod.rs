//! Statico page cache.
//!
//! Persists rendered HTTP responses as static files keyed by request path
//! and query string, so a front server (or the host application) can serve
//! them without re-executing handler logic.
//!
//! ## Configuration
//!
//! Behavior is controlled via `statico.toml`:
//!
//! ```toml
//! [cache]
//! root = "/var/www/site/static-cache"
//! # or derive it: public_dir = "/var/www/site/public"
//! minify_html = true
//! ```
//!
//! ## Layout
//!
//! Entries land at `<root>/<path segments>/<basename>[<query>].<ext>` with
//! `ext` one of `html`, `json`, `xml`.

mod config;
mod content;
mod error;
mod fs;
mod keys;
mod middleware;
mod minify;
mod store;

pub use config::CacheConfig;
pub use content::{Extension, classify};
pub use error::CacheError;
pub use fs::{DiskFilesystem, Filesystem};
pub use keys::{INDEX_BASENAME, PageKey, encode, join, sanitize_query};
pub use middleware::{CacheState, page_cache_layer};
pub use minify::minify;
pub use store::{PageStore, RequestFacts, ResponseFacts};
