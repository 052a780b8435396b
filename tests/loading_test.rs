mod common;

use assert2::check;
use common::{DocsSite, TempWorkspace, handbook, handbook_unloaded};
use docbundle_mcp::state::LoadState;
use docbundle_mcp::store::MemoryStore;
use docbundle_mcp::tools::open_page::{OpenPageRequest, handle_open_page};
use docbundle_mcp::tools::reload::handle_reload;
use docbundle_mcp::view::View;
use docbundle_mcp::{Corpus, EngineOptions};
use rstest::rstest;
use serde_json::json;
use std::sync::Arc;

fn page_ids(corpus: &Corpus) -> Vec<String> {
    corpus.pages().iter().map(|p| p.id.clone()).collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn manifest_load_skips_missing_bundle(handbook: DocsSite) {
    let corpus = handbook.state.corpus().await.unwrap();

    check!(corpus.site_title() == "Handbook");
    check!(
        page_ids(&corpus)
            == vec!["welcome", "install-guide", "ref:install-guide", "config", "upgrade"]
    );

    let config = corpus.page("config").unwrap();
    check!(config.path == vec!["Reference".to_string(), "Files".to_string()]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn state_is_loading_until_loaded(handbook_unloaded: DocsSite) {
    check!(matches!(handbook_unloaded.state.load_state().await, LoadState::Loading));

    let request = OpenPageRequest {
        target: String::new(),
        highlight: None,
    };
    let err = handle_open_page(&handbook_unloaded.state, request).await.unwrap_err();
    check!(err.contains("still loading"));

    handbook_unloaded.state.load().await.unwrap();
    check!(matches!(handbook_unloaded.state.load_state().await, LoadState::Ready(_)));
}

#[tokio::test]
async fn colliding_title_slug_gets_file_namespace() {
    let workspace = TempWorkspace::new();
    workspace.create_json("docs/docs_index.json", &json!({"files": ["a.json"]}));
    workspace.create_json(
        "docs/a.json",
        &json!({"pages": [
            {"title": "Install Guide", "path": ["Guides"], "content": "Run **setup**"},
            {"id": "install-guide", "title": "Other", "content": "x"}
        ]}),
    );
    let options = DocsSite::options(&workspace);
    let site = DocsSite::with_options(workspace, options, Arc::new(MemoryStore::new()));

    let corpus = site.state.load().await.unwrap();

    check!(corpus.pages().len() == 2);
    check!(corpus.page("install-guide").map(|p| p.title.as_str()) == Some("Install Guide"));
    check!(corpus.page("a:install-guide").map(|p| p.title.as_str()) == Some("Other"));
    check!(corpus.site_title() == "Documentation");
}

#[tokio::test]
async fn single_bundle_mode_suffixes_collisions() {
    let workspace = TempWorkspace::new();
    workspace.create_json(
        "site.json",
        &json!({"pages": [
            {"title": "Install Guide", "path": ["Guides"], "content": "Run **setup**"},
            {"id": "install-guide", "title": "Other", "content": "x"}
        ]}),
    );
    let options = EngineOptions {
        json_url: Some(workspace.path().join("site.json").display().to_string()),
        title: Some("Manual".into()),
        state_file: None,
        ..EngineOptions::default()
    };
    let site = DocsSite::with_options(workspace, options, Arc::new(MemoryStore::new()));

    let corpus = site.state.load().await.unwrap();

    check!(corpus.page("install-guide-2").map(|p| p.title.as_str()) == Some("Other"));
    check!(corpus.site_title() == "Manual");
}

#[rstest]
#[case(json!({"bundles": ["a.json"]}), "Invalid docs index format")]
#[case(json!(["a.json", 7]), "Invalid entry #1")]
#[tokio::test]
async fn malformed_manifest_is_fatal(#[case] manifest: serde_json::Value, #[case] message: &str) {
    let workspace = TempWorkspace::new();
    workspace.create_json("docs/docs_index.json", &manifest);
    workspace.create_json("docs/a.json", &json!({"pages": [{"id": "a"}]}));
    let options = DocsSite::options(&workspace);
    let site = DocsSite::with_options(workspace, options, Arc::new(MemoryStore::new()));

    check!(site.state.load().await.is_err());

    let View::Error { message: shown } = site.state.open("a", None).await else {
        panic!("expected error view");
    };
    check!(shown.contains(message));
}

#[tokio::test]
async fn empty_corpus_shows_empty_view() {
    let workspace = TempWorkspace::new();
    workspace.create_json("docs/docs_index.json", &json!([]));
    let options = DocsSite::options(&workspace);
    let site = DocsSite::with_options(workspace, options, Arc::new(MemoryStore::new()));

    site.state.load().await.unwrap();

    check!(
        site.state.open("", None).await
            == View::Empty {
                site_title: "Documentation".into()
            }
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reload_picks_up_changed_bundles(handbook: DocsSite) {
    handbook.workspace.create_json(
        "docs/missing.json",
        &json!({"pages": [{"id": "late", "title": "Late Arrival", "content": "Now present."}]}),
    );

    let output = handle_reload(&handbook.state).await.unwrap();

    check!(output.contains("Reloaded 'Handbook'"));
    check!(output.contains("Pages: 6"));
    let corpus = handbook.state.corpus().await.unwrap();
    check!(corpus.page("late").is_some());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reload_failure_replaces_corpus_with_error(handbook: DocsSite) {
    handbook.workspace.create_file("docs/docs_index.json", "{ not json");

    let err = handle_reload(&handbook.state).await.unwrap_err();

    check!(err.contains("Invalid JSON"));
    check!(matches!(handbook.state.load_state().await, LoadState::Failed(_)));
}
