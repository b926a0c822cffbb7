//! Disk-backed page store: put/forget/clear over the filesystem capability.

use std::sync::Arc;

use bytes::Bytes;
use metrics::counter;
use tracing::{debug, info};

use super::config::CacheConfig;
use super::content::{self, Extension};
use super::error::CacheError;
use super::fs::Filesystem;
use super::keys;
use super::minify;

/// Subdirectory appended to the public directory when no explicit cache
/// root is configured.
const DEFAULT_SUBDIRECTORY: &str = "static-cache";

/// Request facts the store needs. Host-framework adapters (the axum
/// middleware, tests, other frontends) fill this from their own types.
#[derive(Debug, Clone)]
pub struct RequestFacts {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
}

/// Response facts the store needs to pick an extension and persist a body.
///
/// `structured_json` marks responses a framework knows to be JSON even when
/// the declared content type says otherwise.
#[derive(Debug, Clone)]
pub struct ResponseFacts {
    pub status: u16,
    pub content_type: Option<String>,
    pub structured_json: bool,
    pub body: Bytes,
}

/// Persists rendered responses as static files under the cache root.
///
/// Entries move `absent -> present` on [`put`](PageStore::put), back to
/// `absent` on [`forget`](PageStore::forget)/[`clear`](PageStore::clear),
/// and are overwritten in place on repeated puts. Racing writers for the
/// same key are last-write-wins; entries are idempotent renderings of the
/// same page, so no locking is attempted.
pub struct PageStore {
    config: CacheConfig,
    files: Arc<dyn Filesystem>,
}

impl PageStore {
    pub fn new(config: CacheConfig, files: Arc<dyn Filesystem>) -> Self {
        Self { config, files }
    }

    /// Resolve the cache root (explicit value, else the derived default)
    /// joined with any extra segments via the canonical join rule.
    pub fn root_path<'a, I>(&self, extra: I) -> Result<String, CacheError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let base = match (&self.config.root, &self.config.public_dir) {
            (Some(root), _) => root.clone(),
            (None, Some(public_dir)) => keys::join(public_dir, [DEFAULT_SUBDIRECTORY]),
            (None, None) => {
                return Err(CacheError::configuration(
                    "neither cache.root nor cache.public_dir is set",
                ));
            }
        };

        Ok(keys::join(&base, extra))
    }

    /// Persist a response body under the path derived from the request.
    ///
    /// HTML entries are minified first when the configuration asks for it;
    /// JSON and XML bodies are stored verbatim. Existing entries for the
    /// same key are overwritten.
    pub async fn put(
        &self,
        request: &RequestFacts,
        response: &ResponseFacts,
    ) -> Result<(), CacheError> {
        let result = self.write_entry(request, response).await;

        match &result {
            Ok(()) => counter!("statico_cache_store_total").increment(1),
            Err(_) => counter!("statico_cache_store_failed_total").increment(1),
        }

        result
    }

    async fn write_entry(
        &self,
        request: &RequestFacts,
        response: &ResponseFacts,
    ) -> Result<(), CacheError> {
        let key = keys::encode(&request.path, request.query.as_deref());
        let extension =
            content::classify(response.content_type.as_deref(), response.structured_json);

        let directory = self.root_path(key.directory.iter().map(String::as_str))?;
        let file = keys::join(&directory, [format!("{}.{extension}", key.basename).as_str()]);

        self.files.make_directory(&directory, true).await?;

        if extension == Extension::Html && self.config.minify_html {
            let minified = minify::minify(&String::from_utf8_lossy(&response.body));
            self.files.put(&file, minified.as_bytes()).await?;
        } else {
            self.files.put(&file, &response.body).await?;
        }

        debug!(
            method = %request.method,
            path = %request.path,
            file = %file,
            extension = %extension,
            "persisted page cache entry"
        );

        Ok(())
    }

    /// Remove the html/json/xml variants stored for a slug.
    ///
    /// Returns `true` when at least one variant existed. Missing files are
    /// not errors; only filesystem-level failures propagate.
    pub async fn forget(&self, slug: &str) -> Result<bool, CacheError> {
        let mut removed = false;
        for extension in Extension::ALL {
            let path = self.root_path([format!("{slug}.{extension}").as_str()])?;
            removed |= self.files.delete(&path).await?;
        }

        if removed {
            counter!("statico_cache_forget_total").increment(1);
            debug!(slug = %slug, "forgot page cache entry");
        }

        Ok(removed)
    }

    /// Remove everything under the cache root, or only the entries matching
    /// a glob pattern rooted there.
    ///
    /// Returns `true` when anything was deleted; zero matches yield `false`,
    /// not an error.
    pub async fn clear(&self, pattern: Option<&str>) -> Result<bool, CacheError> {
        let root = self.root_path(std::iter::empty())?;

        let cleared = match pattern {
            None => {
                let removed = self.files.delete_directory(&root).await?;
                if removed {
                    info!(path = %root, "cleared page cache root");
                }
                removed
            }
            Some(pattern) => {
                let matches = self.files.glob(&keys::join(&root, [pattern])).await?;
                let mut removed = false;
                for entry in matches {
                    if self.files.is_directory(&entry).await {
                        info!(path = %entry, "clearing cached directory");
                        removed |= self.files.delete_directory(&entry).await?;
                    } else {
                        info!(path = %entry, "clearing cached file");
                        removed |= self.files.delete(&entry).await?;
                    }
                }
                removed
            }
        };

        if cleared {
            counter!("statico_cache_clear_total").increment(1);
        }

        Ok(cleared)
    }
}
