//! Built-in integration with the official Rust MCP SDK ([`rmcp`] v0.15+).
//!
//! Enabled via the `rmcp` feature flag. Provides:
//!
//! - a [`ServerHandler`] implementation for [`HiPayMcpServer`]
//! - [`From`] conversions between `hipay-mcp` and `rmcp` types
//!
//! # Example
//!
//! ```rust,ignore
//! use rmcp::ServiceExt;
//!
//! let server = HiPayMcpServer::from_credentials(credentials, &["all"])?;
//! server.serve(rmcp::transport::stdio()).await?.waiting().await?;
//! ```

use std::sync::Arc;

use rmcp::model as mcp;
use rmcp::service::{RequestContext, RoleServer};
use rmcp::{ErrorData, ServerHandler};

use crate::registry::ToolDescriptor;
use crate::server::{HiPayMcpServer, SERVER_NAME};
use crate::types::{CallToolParams, CallToolResult, ContentItem};

const INSTRUCTIONS: &str = "Tools for the HiPay Enterprise payment API: look up transactions, \
     apply maintenance operations (capture, refund, cancel, ...) and create hosted payment pages.";

/// Converts hipay-mcp [`ContentItem`]s to rmcp [`Content`](mcp::Content) items.
#[must_use]
pub fn content_to_rmcp(content: &[ContentItem]) -> Vec<mcp::Content> {
    content
        .iter()
        .filter_map(|item| {
            let text = item.as_text()?;
            let value = serde_json::json!({"type": "text", "text": text});
            serde_json::from_value(value).ok()
        })
        .collect()
}

/// Converts a hipay-mcp [`CallToolResult`] to an rmcp [`CallToolResult`](mcp::CallToolResult).
#[must_use]
pub fn result_to_rmcp(result: &CallToolResult) -> mcp::CallToolResult {
    mcp::CallToolResult::success(content_to_rmcp(&result.content))
}

/// Converts a [`ToolDescriptor`] to an rmcp [`Tool`](mcp::Tool) with its annotations.
#[must_use]
pub fn tool_to_rmcp(tool: &ToolDescriptor) -> mcp::Tool {
    let annotations = mcp::ToolAnnotations::with_title(tool.title)
        .read_only(tool.hints.read_only_hint)
        .destructive(tool.hints.destructive_hint)
        .idempotent(tool.hints.idempotent_hint)
        .open_world(tool.hints.open_world_hint);
    let mut rmcp_tool = mcp::Tool::new(tool.name, tool.description, Arc::new(tool.input_schema()));
    rmcp_tool.annotations = Some(annotations);
    rmcp_tool
}

impl From<mcp::CallToolRequestParams> for CallToolParams {
    fn from(params: mcp::CallToolRequestParams) -> Self {
        Self {
            name: params.name.into_owned(),
            arguments: params.arguments.unwrap_or_default(),
        }
    }
}

impl ServerHandler for HiPayMcpServer {
    fn get_info(&self) -> mcp::ServerInfo {
        mcp::ServerInfo {
            capabilities: mcp::ServerCapabilities::builder().enable_tools().build(),
            server_info: mcp::Implementation {
                name: SERVER_NAME.to_owned(),
                version: env!("CARGO_PKG_VERSION").to_owned(),
                ..mcp::Implementation::from_build_env()
            },
            instructions: Some(INSTRUCTIONS.to_owned()),
            ..Default::default()
        }
    }

    async fn list_tools(
        &self,
        _request: Option<mcp::PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> Result<mcp::ListToolsResult, ErrorData> {
        let tools = self.tools().iter().map(|tool| tool_to_rmcp(tool)).collect();
        Ok(mcp::ListToolsResult::with_all_items(tools))
    }

    async fn call_tool(
        &self,
        request: mcp::CallToolRequestParams,
        _context: RequestContext<RoleServer>,
    ) -> Result<mcp::CallToolResult, ErrorData> {
        let result = self
            .call(request.into())
            .await
            .map_err(|err| ErrorData::invalid_params(err.to_string(), None))?;
        Ok(result_to_rmcp(&result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry;
    use serde_json::json;

    #[test]
    fn tools_carry_schema_and_annotations() {
        let tool = tool_to_rmcp(registry::find("transactions.update").unwrap());
        assert_eq!(tool.name, "transactions.update");
        assert!(tool.input_schema.contains_key("properties"));
        let annotations = tool.annotations.unwrap();
        assert_eq!(annotations.title.as_deref(), Some("Update transaction"));
        assert_eq!(annotations.destructive_hint, Some(true));
        assert_eq!(annotations.idempotent_hint, Some(false));
        assert_eq!(annotations.read_only_hint, Some(false));
        assert_eq!(annotations.open_world_hint, Some(true));
    }

    #[test]
    fn results_convert_to_text_content() {
        let rmcp_result = result_to_rmcp(&CallToolResult::text("{}"));
        let value = serde_json::to_value(&rmcp_result).unwrap();
        assert_eq!(value["content"], json!([{"type": "text", "text": "{}"}]));
    }
}
