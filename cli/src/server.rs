//! MCP server over stdio.
//!
//! `tools/list` advertises one tool per configured command; `tools/call`
//! runs it through [`ToolDispatcher`] and answers with a single text item.

use std::sync::Arc;

use cli_mcp_mapper_core::{CommandCatalog, ToolDescriptor, lint_catalog};
use rmcp::model::{
    CallToolRequestParam, CallToolResult, Content, ErrorData, Implementation, ListToolsResult,
    PaginatedRequestParam, ServerCapabilities, ServerInfo, Tool,
};
use rmcp::service::RequestContext;
use rmcp::{RoleServer, ServerHandler, ServiceExt};
use tracing::{info, warn};

use crate::dispatch::{DispatchError, ToolDispatcher};

pub const SERVER_NAME: &str = "cli-mcp-mapper";

/// Serves a [`CommandCatalog`] as MCP tools.
#[derive(Debug, Clone)]
pub struct MapperServer {
    dispatcher: ToolDispatcher,
    tools: Arc<Vec<Tool>>,
}

impl MapperServer {
    pub fn new(catalog: CommandCatalog) -> Self {
        let tools = catalog.tools().iter().map(to_mcp_tool).collect();
        Self {
            dispatcher: ToolDispatcher::new(catalog),
            tools: Arc::new(tools),
        }
    }

    /// Serves on stdin/stdout until the client disconnects.
    pub async fn serve_stdio(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        for (tool, warning) in lint_catalog(self.dispatcher.catalog()) {
            warn!(tool = %tool, "{warning}");
        }
        info!(tools = self.tools.len(), "Starting MCP server on stdio");

        self.serve(rmcp::transport::stdio()).await?.waiting().await?;
        info!("MCP client disconnected");
        Ok(())
    }
}

fn to_mcp_tool(descriptor: &ToolDescriptor) -> Tool {
    Tool::new(
        descriptor.name.clone(),
        descriptor.description.clone(),
        Arc::new(descriptor.input_schema.to_json_object()),
    )
}

/// Maps a failed tool call onto a protocol error.
///
/// Bad tool names and argument shapes are the caller's fault; failing to
/// start the process is ours.
fn to_error_data(err: DispatchError) -> ErrorData {
    match err {
        DispatchError::UnknownCommand(_) | DispatchError::InvalidArguments(_) => {
            ErrorData::invalid_params(err.to_string(), None)
        }
        DispatchError::Exec(_) => ErrorData::internal_error(err.to_string(), None),
    }
}

impl ServerHandler for MapperServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: SERVER_NAME.to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListToolsResult, ErrorData> {
        Ok(ListToolsResult::with_all_items(self.tools.as_ref().clone()))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, ErrorData> {
        let name: &str = &request.name;
        match self.dispatcher.invoke(name, request.arguments.as_ref()).await {
            Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
            Err(err) => {
                warn!(tool = name, error = %err, "Tool call failed");
                Err(to_error_data(err))
            }
        }
    }
}
