//! Page display with table of contents and search highlighting.

use crate::state::DocState;
use crate::view::View;
use rmcp::schemars;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct OpenPageRequest {
    /// Page id (e.g. "install-guide") or route (e.g. "#/page/install-guide").
    /// Empty opens the first page.
    #[serde(default)]
    pub target: String,
    /// Mark terms of the last search in the page (default: true)
    pub highlight: Option<bool>,
}

/// Open a page. Unknown ids answer with suggestions rather than an error.
pub async fn handle_open_page(
    state: &Arc<DocState>,
    request: OpenPageRequest,
) -> Result<String, String> {
    match state.open(&request.target, request.highlight).await {
        view @ (View::Loading | View::Error { .. }) => Err(view.to_string()),
        view => Ok(view.to_string()),
    }
}
