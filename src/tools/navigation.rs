//! Navigation tree display and folder state.

use crate::state::DocState;
use rmcp::schemars;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ToggleFolderRequest {
    /// Folder key as shown in the navigation, e.g. "guides/advanced-topics"
    pub key: String,
}

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetNavCollapsedRequest {
    /// Hide (true) or show (false) the navigation tree
    pub collapsed: bool,
}

pub async fn handle_navigation(state: &Arc<DocState>) -> Result<String, String> {
    state.navigation().await.map_err(|view| view.to_string())
}

/// Toggle a folder and show the updated tree.
pub async fn handle_toggle_folder(
    state: &Arc<DocState>,
    request: ToggleFolderRequest,
) -> Result<String, String> {
    let open = state.toggle_folder(&request.key).await?;
    let tree = handle_navigation(state).await.unwrap_or_default();
    Ok(format!(
        "Folder '{}' is now {}.\n\n{}",
        request.key,
        if open { "open" } else { "closed" },
        tree
    ))
}

pub async fn handle_set_nav_collapsed(
    state: &Arc<DocState>,
    request: SetNavCollapsedRequest,
) -> Result<String, String> {
    state.set_nav_collapsed(request.collapsed).await;
    handle_navigation(state).await
}
