//! Corpus reload.

use crate::state::DocState;
use std::fmt::Write as _;
use std::sync::Arc;

/// Fetch every bundle again and rebuild the tree and index.
pub async fn handle_reload(state: &Arc<DocState>) -> Result<String, String> {
    let corpus = state
        .reload()
        .await
        .map_err(|e| format!("Failed to load documentation: {}", e))?;

    let mut output = String::new();
    let _ = writeln!(output, "Reloaded '{}'", corpus.site_title());
    let _ = writeln!(output, "  Pages: {}", corpus.pages().len());
    let _ = writeln!(output, "  Folders: {}", corpus.tree().folders().len().saturating_sub(1));
    Ok(output)
}
