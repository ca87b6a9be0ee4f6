//! Tool call envelopes and typed tool arguments.
//!
//! [`CallToolParams`] and [`CallToolResult`] are framework-agnostic
//! representations of the MCP request and response. The `*Args` structs are
//! what each tool's raw argument object is validated into before any remote
//! call is made; their [`JsonSchema`] derivations double as the advertised
//! input schemas.

use hipay::types::{HostedPaymentPageOptions, HostedPaymentPageRequest, MaintenanceRequest};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Parameters for calling an MCP tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CallToolParams {
    /// The tool name to invoke.
    pub name: String,
    /// Arguments to pass to the tool.
    #[serde(default)]
    pub arguments: serde_json::Map<String, serde_json::Value>,
}

impl CallToolParams {
    /// Creates call parameters from a tool name and an argument value.
    ///
    /// Non-object values yield an empty argument map.
    #[must_use]
    pub fn new(name: impl Into<String>, arguments: serde_json::Value) -> Self {
        let arguments = match arguments {
            serde_json::Value::Object(map) => map,
            _ => serde_json::Map::new(),
        };
        Self {
            name: name.into(),
            arguments,
        }
    }
}

/// A single content item in a tool call result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
#[non_exhaustive]
pub enum ContentItem {
    /// Text content.
    Text {
        /// The text value.
        text: String,
    },
}

impl ContentItem {
    /// Creates a new text content item.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text { text: text.into() }
    }

    /// Returns the text content if this is a text item.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text { text } => Some(text),
        }
    }
}

/// Result of an MCP tool call.
///
/// Successful and failed calls share this shape; a failure is recognizable
/// only by its `{error, name}` payload.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallToolResult {
    /// Content items returned by the tool.
    #[serde(default)]
    pub content: Vec<ContentItem>,
}

impl CallToolResult {
    /// Creates a result holding a single text item.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: vec![ContentItem::text(text)],
        }
    }

    /// Returns the text of the first content item, if any.
    #[must_use]
    pub fn first_text(&self) -> Option<&str> {
        self.content.first().and_then(ContentItem::as_text)
    }
}

/// Arguments of `transactions.get` and `transactions.getV1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TransactionIdArgs {
    /// The ID of the transaction to get
    pub transaction_id: String,
}

/// Arguments of `transactions.getByOrder`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OrderIdArgs {
    /// The order ID to get transactions for
    pub order_id: String,
}

/// Arguments of `transactions.update`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTransactionArgs {
    /// The transaction reference to update
    pub transaction_reference: String,
    /// The maintenance request object (operation, amount, etc.)
    pub maintenance_request: MaintenanceRequest,
}

/// Arguments of `hostedPaymentPages.create`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateHostedPaymentPageArgs {
    /// The hosted payment page request object
    pub page_request: HostedPaymentPageRequest,
    /// Use legacy payment page
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub legacy: Option<bool>,
    /// Custom dataId to use in call to Data API
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_id: Option<String>,
}

impl CreateHostedPaymentPageArgs {
    /// Returns the options forwarded to the gateway, with absent values
    /// defaulted to `legacy: false` and `dataId: null`.
    #[must_use]
    pub fn options(&self) -> HostedPaymentPageOptions {
        HostedPaymentPageOptions {
            legacy: self.legacy.unwrap_or(false),
            data_id: self.data_id.clone(),
        }
    }
}

/// Behavioral hints advertised alongside a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolHints {
    /// The tool may perform destructive updates.
    pub destructive_hint: bool,
    /// Repeating the call with the same arguments has no additional effect.
    pub idempotent_hint: bool,
    /// The tool does not modify its environment.
    pub read_only_hint: bool,
    /// The tool interacts with an external system.
    pub open_world_hint: bool,
}

impl ToolHints {
    /// Hints for a lookup against the remote API.
    pub const READ_ONLY: Self = Self {
        destructive_hint: false,
        idempotent_hint: true,
        read_only_hint: true,
        open_world_hint: true,
    };
}
