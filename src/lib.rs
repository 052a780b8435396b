//! docbundle-mcp: a documentation engine for JSON page bundles, served over
//! the Model Context Protocol.
//!
//! Bundles are fetched (from a single file or a manifest of files), pages are
//! given unique ids and sorted into a navigation tree, and a lexical search
//! index is built over their rendered text. Pages are rendered from Markdown,
//! sanitized, and highlighted with the terms of the last search.

pub mod cli;
pub mod config;
pub mod corpus;
pub mod dom;
pub mod error;
pub mod fetch;
pub mod ids;
pub mod loader;
pub mod manifest;
pub mod render;
pub mod router;
pub mod search;
pub mod server;
pub mod state;
pub mod store;
pub mod text;
pub mod toc;
pub mod tools;
pub mod tracing;
pub mod tree;
pub mod types;
pub mod view;

pub use config::EngineOptions;
pub use corpus::Corpus;
pub use error::{ConfigError, LoadError, Result, StoreError};
pub use loader::{DocSource, LoadOptions, load_all_docs};
pub use server::DocServer;
pub use state::DocState;
pub use types::{DocSet, Page};
