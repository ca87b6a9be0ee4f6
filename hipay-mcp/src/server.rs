//! The HiPay MCP server shell.
//!
//! [`HiPayMcpServer`] holds the tools selected at startup and a
//! [`Dispatcher`] over one shared gateway. It is transport-agnostic; the
//! `rmcp` feature binds it to the official Rust MCP SDK.

use std::sync::Arc;

use hipay::{Credentials, PaymentGateway};
use hipay_http::{HiPayClient, HiPayError};

use crate::dispatch::Dispatcher;
use crate::error::DispatchError;
use crate::registry::{self, ToolDescriptor};
use crate::types::{CallToolParams, CallToolResult};

/// Name advertised to MCP clients.
pub const SERVER_NAME: &str = "HiPay";

/// Exposes the selected HiPay tools over MCP.
///
/// # Examples
///
/// ```rust,ignore
/// let server = HiPayMcpServer::from_credentials(credentials, &["transactions.get"])?;
/// let result = server.call(CallToolParams::new("transactions.get", args)).await?;
/// ```
#[derive(Clone)]
pub struct HiPayMcpServer {
    tools: Vec<&'static ToolDescriptor>,
    dispatcher: Dispatcher,
}

impl std::fmt::Debug for HiPayMcpServer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HiPayMcpServer")
            .field(
                "tools",
                &self.tools.iter().map(|tool| tool.name).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}

impl HiPayMcpServer {
    /// Creates a server over `gateway` exposing the tools chosen by `enabled_tools`.
    ///
    /// See [`registry::select`] for the selection rules.
    #[must_use]
    pub fn new<S: AsRef<str>>(gateway: Arc<dyn PaymentGateway>, enabled_tools: &[S]) -> Self {
        let tools = registry::select(enabled_tools);

        #[cfg(feature = "telemetry")]
        tracing::info!(
            tools = ?tools.iter().map(|tool| tool.name).collect::<Vec<_>>(),
            "Registered HiPay tools"
        );

        Self {
            tools,
            dispatcher: Dispatcher::new(gateway),
        }
    }

    /// Creates a server backed by a [`HiPayClient`] bound to `credentials`.
    ///
    /// # Errors
    ///
    /// Returns [`HiPayError`] if the client cannot be built.
    pub fn from_credentials<S: AsRef<str>>(
        credentials: Credentials,
        enabled_tools: &[S],
    ) -> Result<Self, HiPayError> {
        let client = HiPayClient::try_new(credentials)?;
        Ok(Self::new(Arc::new(client), enabled_tools))
    }

    /// Returns the registered tools, in registry order.
    #[must_use]
    pub fn tools(&self) -> &[&'static ToolDescriptor] {
        &self.tools
    }

    /// Returns `true` if a tool named `name` is registered.
    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.tools.iter().any(|tool| tool.name == name)
    }

    /// Handles a tool call.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownTool`] if the tool is not registered.
    pub async fn call(&self, params: CallToolParams) -> Result<CallToolResult, DispatchError> {
        if !self.is_registered(&params.name) {
            return Err(DispatchError::UnknownTool(params.name));
        }
        self.dispatcher
            .dispatch(&params.name, params.arguments)
            .await
    }
}
