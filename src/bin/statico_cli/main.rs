//! statico-cli: operator commands for the page cache.
//!
//! `clear` wipes the whole cache (or glob-matched subtrees with
//! `--recursive`); `forget` removes the html/json/xml variants of one slug.

use std::process::ExitCode;
use std::sync::Arc;

use statico::cache::{CacheConfig, CacheError, DiskFilesystem, PageStore};
use statico::config::{self, ClearArgs, Command};
use statico::infra::telemetry;
use tracing::error;

#[tokio::main]
async fn main() -> ExitCode {
    let (args, settings) = match config::load_with_cli() {
        Ok(loaded) => loaded,
        Err(err) => {
            eprintln!("configuration error: {err}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(err) = telemetry::init(&settings.logging) {
        eprintln!("failed to initialise telemetry: {err}");
        return ExitCode::FAILURE;
    }

    let store = PageStore::new(
        CacheConfig::from(&settings.cache),
        Arc::new(DiskFilesystem),
    );

    let outcome = match args.command {
        Command::Clear(clear) => run_clear(&store, clear).await,
        Command::Forget(forget) => run_forget(&store, &forget.slug).await,
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "cache command failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run_clear(store: &PageStore, args: ClearArgs) -> Result<(), CacheError> {
    match (args.slug, args.recursive) {
        (None, _) => report_clear(store, None).await,
        (Some(slug), true) => report_clear(store, Some(&slug)).await,
        (Some(slug), false) => run_forget(store, &slug).await,
    }
}

async fn report_clear(store: &PageStore, pattern: Option<&str>) -> Result<(), CacheError> {
    let target = store.root_path(pattern.into_iter())?;

    if store.clear(pattern).await? {
        println!("Page cache cleared at {target}");
    } else {
        println!("Page cache not cleared at {target}");
    }

    Ok(())
}

async fn run_forget(store: &PageStore, slug: &str) -> Result<(), CacheError> {
    if store.forget(slug).await? {
        println!("Page cache cleared for \"{slug}\"");
    } else {
        println!("No page cache found for \"{slug}\"");
    }

    Ok(())
}
