//! Error handling types and utilities.

/// A specialized Result type for binary-level operations.
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` at the edges (startup, config loading).
pub type Result<T> = anyhow::Result<T>;

/// Error returned when loading a documentation corpus fails.
#[derive(Debug, Clone, thiserror::Error)]
pub enum LoadError {
    /// The server answered with a non-success status.
    #[error("Failed to load JSON: {url} (HTTP {status})")]
    Fetch { url: String, status: u16 },
    /// The request or file read never produced a response.
    #[error("Failed to load JSON: {url} ({reason})")]
    Transport { url: String, reason: String },
    /// The body was not valid JSON.
    #[error("Invalid JSON in {url}: {reason}")]
    Parse { url: String, reason: String },
    /// The manifest is neither an array, `{files: [...]}`, nor `{docs: [...]}`.
    #[error("Invalid docs index format: expected an array or an object {{files:[...]}}")]
    ManifestFormat,
    /// A manifest element is neither a string nor an object with a `file` string.
    #[error("Invalid entry #{index} in docs index (expected a string or {{file,...}})")]
    ManifestEntry { index: usize },
}

/// Error returned by a persisted key-value store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("state store I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("state store is corrupt: {0}")]
    Json(#[from] serde_json::Error),
}

/// Error returned when the configuration file cannot be used.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: std::path::PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file {path}: {source}")]
    Toml {
        path: std::path::PathBuf,
        source: toml::de::Error,
    },
}
