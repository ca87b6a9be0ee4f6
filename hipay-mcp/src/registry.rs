//! The fixed set of HiPay tools.
//!
//! [`TOOLS`] lists every tool in registration order. Each [`ToolDescriptor`]
//! pairs a unique dotted name with its description, hints, and the
//! [`ToolKind`] the dispatcher matches on.

use schemars::{JsonSchema, schema_for};
use serde_json::{Map, Value};

use crate::types::{
    CreateHostedPaymentPageArgs, OrderIdArgs, ToolHints, TransactionIdArgs, UpdateTransactionArgs,
};

/// Sentinel accepted in a tool selection to enable every tool.
pub const ALL_TOOLS: &str = "all";

/// The remote operation a tool maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    /// Fetch a transaction through the v3 API.
    GetTransaction,
    /// Fetch a transaction through the v1 API.
    GetTransactionV1,
    /// List the transactions of an order.
    GetTransactionsByOrder,
    /// Apply a maintenance operation to a transaction.
    UpdateTransaction,
    /// Create a hosted payment page.
    CreateHostedPaymentPage,
}

impl ToolKind {
    /// Returns the JSON Schema of the tool's arguments as an object.
    #[must_use]
    pub fn input_schema(self) -> Map<String, Value> {
        match self {
            Self::GetTransaction | Self::GetTransactionV1 => schema_object::<TransactionIdArgs>(),
            Self::GetTransactionsByOrder => schema_object::<OrderIdArgs>(),
            Self::UpdateTransaction => schema_object::<UpdateTransactionArgs>(),
            Self::CreateHostedPaymentPage => schema_object::<CreateHostedPaymentPageArgs>(),
        }
    }
}

/// Static description of one tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ToolDescriptor {
    /// Unique dotted name, e.g. `transactions.get`.
    pub name: &'static str,
    /// Short human-readable title.
    pub title: &'static str,
    /// Description listing the tool's parameters.
    pub description: &'static str,
    /// The operation invoked on call.
    pub kind: ToolKind,
    /// Behavioral hints.
    pub hints: ToolHints,
}

impl ToolDescriptor {
    /// Returns the JSON Schema of this tool's arguments.
    #[must_use]
    pub fn input_schema(&self) -> Map<String, Value> {
        self.kind.input_schema()
    }
}

/// Every tool, in registration order.
pub static TOOLS: [ToolDescriptor; 5] = [
    ToolDescriptor {
        name: "transactions.get",
        title: "Get transaction",
        description: "
Get a transaction by ID (V3 API) using HiPay

Uses 1 parameter:
- transactionId (string, required): Transaction ID",
        kind: ToolKind::GetTransaction,
        hints: ToolHints::READ_ONLY,
    },
    ToolDescriptor {
        name: "transactions.getV1",
        title: "Get transaction (V1)",
        description: "
Get a transaction by ID (V1 API) using HiPay

Uses 1 parameter:
- transactionId (string, required): Transaction ID",
        kind: ToolKind::GetTransactionV1,
        hints: ToolHints::READ_ONLY,
    },
    ToolDescriptor {
        name: "transactions.getByOrder",
        title: "Get transactions by order",
        description: "
Get all transactions for an order using HiPay

Uses 1 parameter:
- orderId (string, required): Order ID",
        kind: ToolKind::GetTransactionsByOrder,
        hints: ToolHints::READ_ONLY,
    },
    ToolDescriptor {
        name: "transactions.update",
        title: "Update transaction",
        description: "
Update a transaction (capture, refund, accept, etc.) using HiPay

Uses 2 parameters:
- transactionReference (string, required): Transaction reference
- maintenanceRequest (object, required): Maintenance request object with fields:
  - operation (enum, required): Operation type (capture, refund, cancel, acceptChallenge, denyChallenge, finalize)
  - currency (string, optional): Base currency (ISO 4217)
  - amount (string, optional): Amount for partial operations
  - operation_id (string, optional): Operation merchant ID
  - basket (string, optional): Shopping cart details (JSON string)
  - sub_transaction_reference (string, optional): Subtransaction reference for refunds
  - source (string, optional): Transaction origin identifier",
        kind: ToolKind::UpdateTransaction,
        hints: ToolHints {
            destructive_hint: true,
            idempotent_hint: false,
            read_only_hint: false,
            open_world_hint: true,
        },
    },
    ToolDescriptor {
        name: "hostedPaymentPages.create",
        title: "Create hosted payment page",
        description: "Create a hosted payment page using HiPay

Uses 3 parameters:
- pageRequest (object, required): Hosted payment page request object with fields:
  - orderid (string, required): Unique order ID
  - description (string, required): Order short description
  - currency (string, required): Base currency (ISO 4217)
  - amount (number, required): Total order amount
  - payment_product (string, optional): Payment method for checkout
  - email (string, optional): Customer email address
  - phone (string, optional): Customer phone number
  - accept_url (string, optional): URL after successful payment
  - decline_url (string, optional): URL after declined payment
  - pending_url (string, optional): URL when payment is pending
  - exception_url (string, optional): URL after system failure
  - cancel_url (string, optional): URL after cancellation
  - notify_url (string, optional): Override notification URL
  - basket (string, optional): Shopping cart details (JSON string)
  - custom_data (string, optional): Custom data (JSON string)
  - language (string, optional): Locale code of customer
- legacy (boolean, optional): Use legacy payment page
- dataId (string, optional): Custom dataId for Data API",
        kind: ToolKind::CreateHostedPaymentPage,
        hints: ToolHints {
            destructive_hint: false,
            idempotent_hint: false,
            read_only_hint: false,
            open_world_hint: true,
        },
    },
];

/// Looks up a tool by name.
#[must_use]
pub fn find(name: &str) -> Option<&'static ToolDescriptor> {
    TOOLS.iter().find(|tool| tool.name == name)
}

/// Returns `true` if `name` is [`ALL_TOOLS`] or a registered tool name.
#[must_use]
pub fn is_accepted(name: &str) -> bool {
    name == ALL_TOOLS || find(name).is_some()
}

/// Returns every accepted selection entry: [`ALL_TOOLS`] followed by the tool names.
#[must_use]
pub fn accepted_names() -> Vec<&'static str> {
    std::iter::once(ALL_TOOLS)
        .chain(TOOLS.iter().map(|tool| tool.name))
        .collect()
}

/// Selects the tools to register.
///
/// An empty selection, or one containing [`ALL_TOOLS`], selects every tool.
/// Otherwise the listed tools are returned in registry order; unknown names
/// are ignored.
#[must_use]
pub fn select<S: AsRef<str>>(enabled: &[S]) -> Vec<&'static ToolDescriptor> {
    let all = enabled.is_empty() || enabled.iter().any(|name| name.as_ref() == ALL_TOOLS);
    TOOLS
        .iter()
        .filter(|tool| all || enabled.iter().any(|name| name.as_ref() == tool.name))
        .collect()
}

fn schema_object<T: JsonSchema>() -> Map<String, Value> {
    match serde_json::to_value(schema_for!(T)) {
        Ok(Value::Object(map)) => map,
        _ => Map::new(),
    }
}
