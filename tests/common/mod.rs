//! Shared test fixtures and utilities for integration tests.
//!
//! # Test Isolation Strategy
//!
//! Every test writes its bundles into a fresh temporary directory and gets its
//! own `DocState`, so tests can run in parallel. Preferences go to an
//! in-memory store unless a test asks for a state file.
//!
//! # Available Fixtures
//!
//! - `handbook`: the standard three-bundle site, already loaded
//! - `handbook_unloaded`: the same files with a fresh, unloaded state

use docbundle_mcp::store::{KeyValueStore, MemoryStore};
use docbundle_mcp::{DocState, EngineOptions};
use rstest::fixture;
use serde_json::{Value, json};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;

/// A temporary directory for test isolation, removed on drop.
#[allow(dead_code)] // Methods used across different integration test crates
pub struct TempWorkspace {
    _temp: TempDir,
    root: PathBuf,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl TempWorkspace {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        Self { _temp: temp, root }
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Creates a file with the given content; parent directories are created.
    ///
    /// # Panics
    /// Panics if file creation fails.
    pub fn create_file(&self, path: &str, content: &str) {
        let full_path = self.root.join(path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).unwrap_or_else(|e| {
                panic!("Failed to create parent directory for '{}': {}", path, e)
            });
        }
        std::fs::write(&full_path, content)
            .unwrap_or_else(|e| panic!("Failed to write file '{}': {}", path, e));
    }

    /// Writes `value` as pretty JSON.
    pub fn create_json(&self, path: &str, value: &Value) {
        let text = serde_json::to_string_pretty(value).expect("Failed to serialize JSON");
        self.create_file(path, &text);
    }
}

impl Default for TempWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

/// Bundles and manifest in a temp directory plus the engine state over them.
#[allow(dead_code)] // Fields used across different integration test crates
pub struct DocsSite {
    pub workspace: TempWorkspace,
    pub state: Arc<DocState>,
    pub store: Arc<dyn KeyValueStore>,
}

#[allow(dead_code)] // Methods used across different integration test crates
impl DocsSite {
    /// Options reading the manifest from `<workspace>/docs`.
    pub fn options(workspace: &TempWorkspace) -> EngineOptions {
        EngineOptions {
            docs_dir: workspace.path().join("docs").display().to_string(),
            state_file: None,
            ..EngineOptions::default()
        }
    }

    /// A state over `workspace` using `options` and `store`, not yet loaded.
    pub fn with_options(
        workspace: TempWorkspace,
        options: EngineOptions,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        let state = Arc::new(DocState::new(options, Arc::clone(&store)));
        Self {
            workspace,
            state,
            store,
        }
    }

    /// The standard site, not yet loaded.
    pub fn handbook() -> Self {
        let workspace = TempWorkspace::new();
        write_handbook(&workspace);
        let options = Self::options(&workspace);
        Self::with_options(workspace, options, Arc::new(MemoryStore::new()))
    }

    /// Load the corpus, panicking on failure.
    pub async fn loaded(self) -> Self {
        self.state.load().await.expect("handbook should load");
        self
    }
}

/// Writes the standard site:
///
/// - `guides.json`: Welcome, Install Guide (id from title), Upgrade
/// - `reference.json` under the "Reference" prefix, namespace `ref`, with an
///   `install-guide` id that collides
/// - `missing.json`: listed but never written
pub fn write_handbook(workspace: &TempWorkspace) {
    workspace.create_json(
        "docs/docs_index.json",
        &json!({"files": [
            "guides.json",
            {"file": "reference.json", "pathPrefix": ["Reference"], "namespace": "ref"},
            "missing.json"
        ]}),
    );
    workspace.create_json(
        "docs/guides.json",
        &json!({"siteTitle": "Handbook", "pages": [
            {
                "id": "welcome",
                "title": "Welcome",
                "order": 0,
                "content": "# Welcome\n\nStart with the install guide."
            },
            {
                "title": "Install Guide",
                "path": ["Guides"],
                "order": 1,
                "content": "## Requirements\n\nRun **setup** to install.\n\n```sh\nsetup --all\n```\n\n### Verify\n\nCheck the setup output."
            },
            {
                "id": "upgrade",
                "title": "Upgrade",
                "path": ["Guides", "Advanced Topics"],
                "content": "Upgrading requires setup again."
            }
        ]}),
    );
    workspace.create_json(
        "docs/reference.json",
        &json!({"pages": [
            {"id": "install-guide", "title": "CLI", "content": "Command line flags for setup."},
            {"id": "config", "title": "Configuration", "path": "Files", "content": "The config file."}
        ]}),
    );
}

/// The standard site, loaded.
///
/// Returns the whole `DocsSite` rather than just the state: the temp
/// directory must stay alive for the duration of the test.
#[fixture]
pub fn handbook() -> DocsSite {
    tokio::task::block_in_place(|| {
        tokio::runtime::Handle::current().block_on(DocsSite::handbook().loaded())
    })
}

#[fixture]
pub fn handbook_unloaded() -> DocsSite {
    DocsSite::handbook()
}
