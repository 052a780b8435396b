//! Engine configuration.
//!
//! Options come from built-in defaults, optionally overridden by a TOML file,
//! then by command-line flags (see [`crate::cli`]).

use crate::error::ConfigError;
use crate::loader::{DocSource, LoadOptions};
use crate::search::{DEFAULT_SEARCH_LIMIT, DEFAULT_SNIPPET_RADIUS};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// All engine settings.
///
/// ```toml
/// docs_dir = "./docs"
/// title = "Product Docs"
/// lang = "ru"
/// search_limit = 20
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineOptions {
    /// Single bundle URL or path. Takes precedence over the manifest settings.
    pub json_url: Option<String>,
    /// Directory the manifest entries are resolved against.
    pub docs_dir: String,
    /// Manifest location; `<docs_dir>/docs_index.json` when unset.
    pub docs_index_url: Option<String>,
    /// Site title; bundle titles are used when unset.
    pub title: Option<String>,
    /// Language tag used for navigation sorting.
    pub lang: String,
    /// Prefix of persisted preference keys.
    pub storage_key: String,
    pub search_limit: usize,
    pub snippet_radius: usize,
    /// Where preferences are saved; kept in memory when unset.
    pub state_file: Option<PathBuf>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            json_url: None,
            docs_dir: "./docs".to_string(),
            docs_index_url: None,
            title: None,
            lang: "en".to_string(),
            storage_key: "doc_engine".to_string(),
            search_limit: DEFAULT_SEARCH_LIMIT,
            snippet_radius: DEFAULT_SNIPPET_RADIUS,
            state_file: default_state_file(),
        }
    }
}

/// `<data dir>/docbundle-mcp/state.json`, if the platform has a data dir.
pub fn default_state_file() -> Option<PathBuf> {
    dirs::data_dir().map(|dir| dir.join("docbundle-mcp").join("state.json"))
}

impl EngineOptions {
    /// Read options from a TOML file; absent keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&text).map_err(|source| ConfigError::Toml {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Where the corpus is loaded from.
    pub fn source(&self) -> DocSource {
        if let Some(url) = self.json_url.as_ref().filter(|u| !u.trim().is_empty()) {
            return DocSource::Single { url: url.clone() };
        }
        let index_url = self.docs_index_url.clone().unwrap_or_else(|| {
            format!("{}/docs_index.json", self.docs_dir.trim_end_matches('/'))
        });
        DocSource::Manifest {
            dir: self.docs_dir.clone(),
            index_url,
        }
    }

    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            source: self.source(),
            title: self.title.clone().filter(|t| !t.trim().is_empty()),
        }
    }
}
