//! Full-text search over the loaded pages.

use crate::state::DocState;
use rmcp::schemars;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchRequest {
    /// Search text; terms shorter than 2 characters are ignored
    pub query: String,
    /// Maximum number of results to return (default: 12)
    pub limit: Option<usize>,
}

/// Rank pages for the query and remember it for highlighting.
pub async fn handle_search(state: &Arc<DocState>, request: SearchRequest) -> Result<String, String> {
    let limit = request.limit.filter(|&limit| limit > 0);
    state
        .search(&request.query, limit)
        .await
        .map(|results| results.to_string())
        .map_err(|view| view.to_string())
}
