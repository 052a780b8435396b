//! Core data types shared across loading, indexing and navigation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Sort order assigned to pages that do not declare one; places them last.
pub const DEFAULT_ORDER: f64 = 999_999.0;

/// Site title used when neither the configuration nor any bundle provides one.
pub const DEFAULT_SITE_TITLE: &str = "Documentation";

/// A single documentation page after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    /// Identifier, unique across the loaded corpus.
    pub id: String,
    /// Display title; equals `id` when the source had none.
    pub title: String,
    /// Folder segments from the navigation root, outermost first.
    pub path: Vec<String>,
    /// Sibling sort key, [`DEFAULT_ORDER`] when absent.
    pub order: f64,
    /// Raw Markdown source.
    pub content: String,
}

impl Page {
    /// Title to display, falling back to the id.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            &self.id
        } else {
            &self.title
        }
    }
}

/// A JSON scalar that is accepted wherever a string is expected.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Str(String),
    Num(serde_json::Number),
    Bool(bool),
}

impl Scalar {
    pub fn into_string(self) -> String {
        match self {
            Self::Str(s) => s,
            Self::Num(n) => n.to_string(),
            Self::Bool(b) => b.to_string(),
        }
    }
}

/// `path` is either a single segment or a list of segments.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PathField {
    One(Scalar),
    Many(Vec<Scalar>),
}

/// A page exactly as it appears in a bundle, before normalization.
///
/// Fields are kept loosely typed: a field of an unexpected type is treated as
/// absent instead of rejecting the whole page.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPage {
    pub id: Option<Value>,
    pub title: Option<Value>,
    pub path: Option<Value>,
    pub order: Option<Value>,
    pub content: Option<Value>,
}

impl RawPage {
    /// Decode one element of a bundle's `pages` array. Non-object items become
    /// an empty page.
    pub fn from_value(value: &Value) -> Self {
        match serde_json::from_value(value.clone()) {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!("Malformed page entry kept as empty page: {}", e);
                Self::default()
            }
        }
    }

    /// Declared id, if it is a non-empty scalar.
    pub fn id(&self) -> Option<String> {
        self.id
            .clone()
            .and_then(|v| serde_json::from_value::<Scalar>(v).ok())
            .map(Scalar::into_string)
            .filter(|s| !s.is_empty())
    }

    /// Declared title, if it is a non-empty string.
    pub fn title(&self) -> Option<&str> {
        self.title
            .as_ref()
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }

    /// Declared sort order, if numeric.
    pub fn order(&self) -> Option<f64> {
        self.order.as_ref().and_then(Value::as_f64)
    }

    /// Markdown source, empty when absent.
    pub fn content(&self) -> &str {
        self.content.as_ref().and_then(Value::as_str).unwrap_or_default()
    }

    /// Path segments as strings, with empty segments removed.
    pub fn path_segments(&self) -> Vec<String> {
        normalize_path(
            self.path
                .clone()
                .and_then(|v| serde_json::from_value::<PathField>(v).ok()),
        )
    }
}

/// Normalizes a raw `path` value into a list of non-empty segments.
pub fn normalize_path(path: Option<PathField>) -> Vec<String> {
    match path {
        None => vec![],
        Some(PathField::One(segment)) => {
            let segment = segment.into_string();
            if segment.is_empty() {
                vec![]
            } else {
                vec![segment]
            }
        }
        Some(PathField::Many(segments)) => segments
            .into_iter()
            .map(Scalar::into_string)
            .filter(|s| !s.is_empty())
            .collect(),
    }
}

/// One decoded page bundle: `{ siteTitle?, pages: [...] }`.
#[derive(Debug, Clone, Default)]
pub struct PageBundle {
    pub site_title: Option<String>,
    pub pages: Vec<RawPage>,
}

impl PageBundle {
    /// Decode a bundle document. A missing or non-array `pages` yields no pages.
    pub fn from_json(value: &Value) -> Self {
        let site_title = value
            .get("siteTitle")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);
        let pages = value
            .get("pages")
            .and_then(Value::as_array)
            .map(|pages| pages.iter().map(RawPage::from_value).collect())
            .unwrap_or_default();
        Self { site_title, pages }
    }
}

/// The result of a full load: a site title and every normalized page.
#[derive(Debug, Clone, Default)]
pub struct DocSet {
    pub site_title: String,
    pub pages: Vec<Page>,
}
