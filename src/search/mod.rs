//! Full-text search over the loaded pages.
//!
//! This module provides query tokenization, the per-page lexical index,
//! weighted substring scoring, snippet extraction and in-article highlighting.

pub mod highlight;
pub mod index;
pub mod query;
pub mod scoring;
pub mod snippet;
pub mod tokenize;

pub use highlight::highlight_terms;
pub use index::{IndexEntry, SearchIndex, build_index};
pub use query::{DEFAULT_SEARCH_LIMIT, SearchHit};
pub use snippet::{DEFAULT_SNIPPET_RADIUS, make_snippet};
pub use tokenize::{normalize_query, split_terms};
