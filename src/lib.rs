//! Statico: a disk-backed HTTP response cache.
//!
//! Sits as middleware in an axum request pipeline and persists eligible
//! responses (GET answered with 200) as static files keyed by URL path and
//! sanitized query string. HTML payloads are minified before persistence;
//! JSON and XML payloads are stored verbatim. Invalidation removes entries
//! by exact slug or by glob pattern, via the library API or the
//! `statico-cli` operator binary.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use axum::{Router, middleware, routing::get};
//! use statico::cache::{CacheConfig, CacheState, DiskFilesystem, PageStore, page_cache_layer};
//!
//! let config = CacheConfig {
//!     root: Some("/var/www/site/static-cache".to_string()),
//!     ..Default::default()
//! };
//! let store = Arc::new(PageStore::new(config, Arc::new(DiskFilesystem)));
//!
//! let app: Router = Router::new()
//!     .route("/", get(|| async { "home" }))
//!     .layer(middleware::from_fn_with_state(
//!         CacheState { store },
//!         page_cache_layer,
//!     ));
//! ```

pub mod cache;
pub mod config;
pub mod infra;
