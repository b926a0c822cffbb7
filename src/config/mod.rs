//! Configuration layer: typed settings with layered precedence (file → env → CLI).

use std::{path::PathBuf, str::FromStr};

use clap::{Args, Parser, Subcommand, builder::BoolishValueParser};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "statico";

/// Command-line arguments for the `statico-cli` binary.
#[derive(Debug, Parser)]
#[command(name = "statico-cli", version, about = "Statico page cache operator commands")]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "STATICO_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: CliOverrides,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Clear the whole cache, or only the entries matching a pattern.
    Clear(ClearArgs),
    /// Remove the html/json/xml variants stored for one slug.
    Forget(ForgetArgs),
}

#[derive(Debug, Args, Clone)]
pub struct ClearArgs {
    /// URL slug of the page or directory to delete; clears everything when
    /// omitted.
    #[arg(value_name = "SLUG")]
    pub slug: Option<String>,

    /// Treat SLUG as a glob pattern and delete whole subtrees.
    #[arg(long, action = clap::ArgAction::SetTrue)]
    pub recursive: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ForgetArgs {
    /// URL slug of the cached page to remove.
    #[arg(value_name = "SLUG")]
    pub slug: String,
}

#[derive(Debug, Args, Default, Clone)]
pub struct CliOverrides {
    /// Override the cache root directory.
    #[arg(long = "cache-root", value_name = "PATH")]
    pub cache_root: Option<String>,

    /// Override the public directory the default cache root derives from.
    #[arg(long = "public-dir", value_name = "PATH")]
    pub public_dir: Option<String>,

    /// Toggle HTML minification before persistence.
    #[arg(
        long = "minify-html",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub minify_html: Option<bool>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new()
    )]
    pub log_json: Option<bool>,
}

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub cache: CacheSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone)]
pub struct CacheSettings {
    pub root: Option<String>,
    pub public_dir: Option<String>,
    pub minify_html: bool,
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix("STATICO").separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;
    raw.apply_overrides(&cli.overrides);

    Settings::from_raw(raw)
}

/// Parse command-line arguments and load the matching settings.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    cache: RawCacheSettings,
    logging: RawLoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawCacheSettings {
    root: Option<String>,
    public_dir: Option<String>,
    minify_html: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

impl RawSettings {
    fn apply_overrides(&mut self, overrides: &CliOverrides) {
        if let Some(root) = overrides.cache_root.as_ref() {
            self.cache.root = Some(root.clone());
        }
        if let Some(public_dir) = overrides.public_dir.as_ref() {
            self.cache.public_dir = Some(public_dir.clone());
        }
        if let Some(minify) = overrides.minify_html {
            self.cache.minify_html = Some(minify);
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings { cache, logging } = raw;

        let cache = build_cache_settings(cache);
        let logging = build_logging_settings(logging)?;

        Ok(Self { cache, logging })
    }
}

fn build_cache_settings(cache: RawCacheSettings) -> CacheSettings {
    CacheSettings {
        root: non_empty(cache.root),
        public_dir: non_empty(cache.public_dir),
        minify_html: cache.minify_html.unwrap_or(true),
    }
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}
