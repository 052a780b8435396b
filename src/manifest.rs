//! Decoding of the docs index manifest used in multi-file mode.

use crate::error::LoadError;
use serde_json::Value;

/// One JSON bundle listed in the manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    /// Bundle location, relative to the docs directory unless absolute.
    pub file: String,
    /// Segments prepended to the path of every page from this bundle.
    pub path_prefix: Option<Vec<String>>,
    /// Explicit namespace for id collisions.
    pub namespace: Option<String>,
}

impl SourceEntry {
    /// Entry for a bare filename.
    pub fn file(file: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            path_prefix: None,
            namespace: None,
        }
    }

    /// Namespace used to disambiguate ids from this bundle.
    ///
    /// Falls back to the file's base name without its extension, so
    /// `guides/intro.json` yields `intro`.
    pub fn effective_namespace(&self) -> Option<String> {
        if let Some(ns) = &self.namespace {
            return Some(ns.clone());
        }
        let base = self.file.rsplit('/').next().unwrap_or_default();
        let stem = match base.rfind('.') {
            Some(dot) if dot > 0 => &base[..dot],
            _ => base,
        };
        (!stem.is_empty()).then(|| stem.to_string())
    }
}

/// The three accepted top-level manifest shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum ManifestShape {
    /// `["a.json", ...]`
    List(Vec<Value>),
    /// `{ "files": [...] }`
    Files(Vec<Value>),
    /// `{ "docs": [...] }`
    Docs(Vec<Value>),
}

impl ManifestShape {
    /// Classify a manifest document, rejecting anything that is not one of the
    /// known shapes. `files` takes precedence over `docs`.
    pub fn decode(value: Value) -> Result<Self, LoadError> {
        match value {
            Value::Array(items) => Ok(Self::List(items)),
            Value::Object(mut map) => {
                if let Some(Value::Array(items)) = map.remove("files") {
                    Ok(Self::Files(items))
                } else if let Some(Value::Array(items)) = map.remove("docs") {
                    Ok(Self::Docs(items))
                } else {
                    Err(LoadError::ManifestFormat)
                }
            }
            _ => Err(LoadError::ManifestFormat),
        }
    }

    fn into_items(self) -> Vec<Value> {
        match self {
            Self::List(items) | Self::Files(items) | Self::Docs(items) => items,
        }
    }

    /// Decode every element into a [`SourceEntry`].
    pub fn entries(self) -> Result<Vec<SourceEntry>, LoadError> {
        self.into_items()
            .into_iter()
            .enumerate()
            .map(|(index, item)| parse_entry(index, item))
            .collect()
    }
}

/// Parse a manifest document into its list of source entries.
pub fn parse_manifest(value: Value) -> Result<Vec<SourceEntry>, LoadError> {
    ManifestShape::decode(value)?.entries()
}

fn parse_entry(index: usize, item: Value) -> Result<SourceEntry, LoadError> {
    match item {
        Value::String(file) => Ok(SourceEntry::file(file)),
        Value::Object(map) => {
            let Some(file) = map.get("file").and_then(Value::as_str) else {
                return Err(LoadError::ManifestEntry { index });
            };
            let path_prefix = map
                .get("pathPrefix")
                .and_then(Value::as_array)
                .map(|segments| {
                    segments
                        .iter()
                        .map(segment_string)
                        .filter(|s| !s.is_empty())
                        .collect()
                });
            let namespace = map
                .get("namespace")
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|ns| !ns.is_empty())
                .map(str::to_owned);
            Ok(SourceEntry {
                file: file.to_string(),
                path_prefix,
                namespace,
            })
        }
        _ => Err(LoadError::ManifestEntry { index }),
    }
}

fn segment_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
