//! Command-line interface.

use crate::config::EngineOptions;
use crate::error::ConfigError;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "docbundle-mcp")]
#[command(about = "Serve JSON documentation bundles over MCP", long_about = None)]
#[command(version)]
pub struct Cli {
    /// TOML file with engine options
    #[arg(short, long, env = "DOCBUNDLE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Load a single bundle instead of a manifest
    #[arg(long, env = "DOCBUNDLE_JSON_URL")]
    pub json_url: Option<String>,

    /// Directory that manifest entries are resolved against
    #[arg(long, env = "DOCBUNDLE_DOCS_DIR")]
    pub docs_dir: Option<String>,

    /// Manifest location (default: <docs-dir>/docs_index.json)
    #[arg(long, env = "DOCBUNDLE_INDEX_URL")]
    pub docs_index_url: Option<String>,

    /// Site title, overriding bundle titles
    #[arg(long)]
    pub title: Option<String>,

    /// Language tag for navigation sorting
    #[arg(long)]
    pub lang: Option<String>,

    /// Prefix for persisted preference keys
    #[arg(long)]
    pub storage_key: Option<String>,

    /// Default number of search results
    #[arg(long)]
    pub search_limit: Option<usize>,

    /// Snippet context in characters on each side of a match
    #[arg(long)]
    pub snippet_radius: Option<usize>,

    /// File holding persisted preferences
    #[arg(long, env = "DOCBUNDLE_STATE_FILE", conflicts_with = "no_state_file")]
    pub state_file: Option<PathBuf>,

    /// Keep preferences in memory only
    #[arg(long)]
    pub no_state_file: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub log_json: bool,
}

impl Cli {
    /// Defaults, then the config file, then flags.
    pub fn options(&self) -> Result<EngineOptions, ConfigError> {
        let mut options = match &self.config {
            Some(path) => EngineOptions::from_file(path)?,
            None => EngineOptions::default(),
        };

        if let Some(url) = &self.json_url {
            options.json_url = Some(url.clone());
        }
        if let Some(dir) = &self.docs_dir {
            options.docs_dir.clone_from(dir);
        }
        if let Some(url) = &self.docs_index_url {
            options.docs_index_url = Some(url.clone());
        }
        if let Some(title) = &self.title {
            options.title = Some(title.clone());
        }
        if let Some(lang) = &self.lang {
            options.lang.clone_from(lang);
        }
        if let Some(key) = &self.storage_key {
            options.storage_key.clone_from(key);
        }
        if let Some(limit) = self.search_limit {
            options.search_limit = limit;
        }
        if let Some(radius) = self.snippet_radius {
            options.snippet_radius = radius;
        }
        if self.no_state_file {
            options.state_file = None;
        } else if let Some(path) = &self.state_file {
            options.state_file = Some(path.clone());
        }

        Ok(options)
    }
}
