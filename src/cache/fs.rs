//! Filesystem capability consumed by the page store.
//!
//! The store never touches the filesystem directly; everything goes through
//! this trait so unit tests can substitute an in-memory double.

use std::io;

use async_trait::async_trait;
use tokio::fs;

/// Minimal filesystem surface the cache needs.
///
/// `delete` and `delete_directory` report whether anything was removed;
/// missing targets are not errors.
#[async_trait]
pub trait Filesystem: Send + Sync {
    async fn make_directory(&self, path: &str, recursive: bool) -> io::Result<()>;
    async fn put(&self, path: &str, contents: &[u8]) -> io::Result<()>;
    async fn delete(&self, path: &str) -> io::Result<bool>;
    async fn is_directory(&self, path: &str) -> bool;
    async fn delete_directory(&self, path: &str) -> io::Result<bool>;
    async fn glob(&self, pattern: &str) -> io::Result<Vec<String>>;
}

/// Production implementation backed by `tokio::fs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DiskFilesystem;

#[async_trait]
impl Filesystem for DiskFilesystem {
    async fn make_directory(&self, path: &str, recursive: bool) -> io::Result<()> {
        if recursive {
            fs::create_dir_all(path).await
        } else {
            fs::create_dir(path).await
        }
    }

    async fn put(&self, path: &str, contents: &[u8]) -> io::Result<()> {
        fs::write(path, contents).await
    }

    async fn delete(&self, path: &str) -> io::Result<bool> {
        match fs::remove_file(path).await {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err),
        }
    }

    async fn is_directory(&self, path: &str) -> bool {
        fs::metadata(path)
            .await
            .map(|metadata| metadata.is_dir())
            .unwrap_or(false)
    }

    async fn delete_directory(&self, path: &str) -> io::Result<bool> {
        match fs::remove_dir_all(path).await {
            Ok(()) => Ok(true),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(err) => Err(err),
        }
    }

    async fn glob(&self, pattern: &str) -> io::Result<Vec<String>> {
        // The glob crate walks the tree synchronously; keep it off the
        // async executor.
        let pattern = pattern.to_string();
        tokio::task::spawn_blocking(move || {
            let entries = glob::glob(&pattern)
                .map_err(|err| io::Error::new(io::ErrorKind::InvalidInput, err))?;

            let mut matches = Vec::new();
            for entry in entries {
                match entry {
                    Ok(path) => matches.push(path.to_string_lossy().into_owned()),
                    Err(err) => return Err(err.into_error()),
                }
            }
            Ok(matches)
        })
        .await
        .map_err(io::Error::other)?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn delete_missing_file_reports_nothing_removed() {
        let fs = DiskFilesystem;
        let removed = fs
            .delete("/definitely/not/a/real/statico/path.html")
            .await
            .expect("missing file is not an error");
        assert!(!removed);
    }

    #[tokio::test]
    async fn delete_missing_directory_reports_nothing_removed() {
        let fs = DiskFilesystem;
        let removed = fs
            .delete_directory("/definitely/not/a/real/statico/dir")
            .await
            .expect("missing directory is not an error");
        assert!(!removed);
    }

    #[tokio::test]
    async fn is_directory_false_for_missing_path() {
        let fs = DiskFilesystem;
        assert!(!fs.is_directory("/definitely/not/a/real/statico/dir").await);
    }

    #[tokio::test]
    async fn glob_rejects_malformed_patterns() {
        let fs = DiskFilesystem;
        let err = fs.glob("a[").await.expect_err("pattern should not parse");
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }
}
