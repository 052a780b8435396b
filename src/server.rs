//! MCP server exposing the documentation engine as tools.

use crate::state::DocState;
use crate::tools::navigation::{
    SetNavCollapsedRequest, ToggleFolderRequest, handle_navigation, handle_set_nav_collapsed,
    handle_toggle_folder,
};
use crate::tools::open_page::{OpenPageRequest, handle_open_page};
use crate::tools::reload::handle_reload;
use crate::tools::search::{SearchRequest, handle_search};
use rmcp::{
    ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars::{self, JsonSchema, generate::SchemaSettings},
    tool, tool_handler, tool_router,
};
use std::sync::Arc;

/// MCP server over a documentation corpus
#[derive(Clone)]
pub struct DocServer {
    /// Shared engine state (corpus, session, article cache)
    state: Arc<DocState>,

    /// Tool router for handling MCP tool calls
    tool_router: ToolRouter<Self>,
}

impl std::fmt::Debug for DocServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocServer")
            .field("state", &self.state)
            .finish()
    }
}

#[tool_router]
impl DocServer {
    pub fn new(state: Arc<DocState>) -> Self {
        Self {
            state,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Search the documentation. Matches page titles, section paths, ids and body text, returning ranked pages with a text snippet around the first term. The query is remembered and highlighted in pages opened afterwards.",
        input_schema = inline_schema_for_type::<SearchRequest>()
    )]
    async fn search_docs(
        &self,
        Parameters(request): Parameters<SearchRequest>,
    ) -> std::result::Result<String, String> {
        handle_search(&self.state, request).await
    }

    #[tool(
        description = "Open a documentation page by id or '#/page/<id>' route. Returns breadcrumbs, table of contents and the rendered HTML with search terms marked. An empty target opens the first page; unknown ids list similar pages.",
        input_schema = inline_schema_for_type::<OpenPageRequest>()
    )]
    async fn open_page(
        &self,
        Parameters(request): Parameters<OpenPageRequest>,
    ) -> std::result::Result<String, String> {
        handle_open_page(&self.state, request).await
    }

    #[tool(
        description = "Show the navigation tree: folders (▾ open, ▸ closed) with their keys, and pages with their ids. The active page is marked with •."
    )]
    async fn navigation(&self) -> std::result::Result<String, String> {
        handle_navigation(&self.state).await
    }

    #[tool(
        description = "Open or close a navigation folder by key. The set of open folders is remembered across sessions.",
        input_schema = inline_schema_for_type::<ToggleFolderRequest>()
    )]
    async fn toggle_folder(
        &self,
        Parameters(request): Parameters<ToggleFolderRequest>,
    ) -> std::result::Result<String, String> {
        handle_toggle_folder(&self.state, request).await
    }

    #[tool(
        description = "Collapse or expand the whole navigation tree. Remembered across sessions.",
        input_schema = inline_schema_for_type::<SetNavCollapsedRequest>()
    )]
    async fn set_nav_collapsed(
        &self,
        Parameters(request): Parameters<SetNavCollapsedRequest>,
    ) -> std::result::Result<String, String> {
        handle_set_nav_collapsed(&self.state, request).await
    }

    #[tool(
        description = "Reload every documentation bundle from its source and rebuild navigation and the search index."
    )]
    async fn reload_docs(&self) -> std::result::Result<String, String> {
        handle_reload(&self.state).await
    }
}

#[tool_handler]
impl ServerHandler for DocServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build())
            .with_protocol_version(ProtocolVersion::V_2024_11_05)
            .with_server_info(Implementation::from_build_env())
            .with_instructions(
                "docbundle-mcp: browse and search a documentation site built from JSON page bundles. \
                 Use navigation to see the page tree, search_docs to find pages, and open_page to read one."
                    .to_string(),
            )
    }
}

/// Generate an inline JSON schema for MCP tools
///
/// Unlike rmcp's default `schema_for_type()`, this sets `inline_subschemas = true`
/// so nested types are inlined instead of referenced through `$ref`.
pub fn inline_schema_for_type<T: JsonSchema>() -> Arc<JsonObject> {
    let mut settings = SchemaSettings::draft07();
    settings.transforms = vec![Box::new(schemars::transform::AddNullable::default())];
    settings.inline_subschemas = true;

    let generator = settings.into_generator();
    let schema = generator.into_root_schema_for::<T>();

    match serde_json::to_value(schema) {
        Ok(serde_json::Value::Object(object)) => Arc::new(object),
        other => {
            tracing::error!("Tool schema did not serialize to an object: {:?}", other);
            Arc::new(JsonObject::new())
        }
    }
}
