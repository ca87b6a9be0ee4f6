//! Tool call dispatch and failure normalization.
//!
//! # Flow
//!
//! 1. Look up the tool by name
//! 2. Validate the raw arguments into the tool's typed argument struct
//! 3. Invoke the matching [`PaymentGateway`] operation
//! 4. Wrap the result, or the normalized failure, in a text envelope
//!
//! Only step 1 can fail the call itself. Validation and remote failures
//! become an `{error, name}` payload inside a regular result.

use std::sync::Arc;

use hipay::{Failure, PaymentGateway, ValidationError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

use crate::error::DispatchError;
use crate::registry::{self, ToolKind};
use crate::types::{
    CallToolResult, CreateHostedPaymentPageArgs, OrderIdArgs, TransactionIdArgs,
    UpdateTransactionArgs,
};

/// Message reported when a failure carries no usable message.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Name reported when a failure carries no usable kind name.
pub const DEFAULT_ERROR_NAME: &str = "Error";

/// The payload of a failed tool call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    /// Human-readable message.
    pub error: String,
    /// Error kind name.
    pub name: String,
}

impl ErrorPayload {
    /// Returns the payload as a JSON object, `error` first.
    #[must_use]
    pub fn to_value(&self) -> Value {
        json!({"error": self.error, "name": self.name})
    }
}

impl From<Failure> for ErrorPayload {
    fn from(failure: Failure) -> Self {
        let (error, name) = match failure {
            Failure::Error { name, message } => (
                non_empty_or(message, UNKNOWN_ERROR),
                non_empty_or(name, DEFAULT_ERROR_NAME),
            ),
            Failure::Message(message) => (
                non_empty_or(message, UNKNOWN_ERROR),
                DEFAULT_ERROR_NAME.to_owned(),
            ),
            // Descriptive fields of arbitrary payloads are not inspected.
            Failure::Other(_) => (UNKNOWN_ERROR.to_owned(), DEFAULT_ERROR_NAME.to_owned()),
        };
        Self { error, name }
    }
}

fn non_empty_or(value: String, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_owned()
    } else {
        value
    }
}

/// Renders a value as pretty-printed JSON inside a text envelope.
#[must_use]
pub fn text_response(value: &Value) -> CallToolResult {
    CallToolResult::text(format!("{value:#}"))
}

/// Routes tool calls to a [`PaymentGateway`].
#[derive(Clone)]
pub struct Dispatcher {
    gateway: Arc<dyn PaymentGateway>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("gateway", &"<dyn PaymentGateway>")
            .finish()
    }
}

impl Dispatcher {
    /// Creates a dispatcher over `gateway`.
    #[must_use]
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    /// Dispatches a call to the tool named `name`.
    ///
    /// # Errors
    ///
    /// Returns [`DispatchError::UnknownTool`] if no tool has this name. Every
    /// other failure is reported inside the returned result.
    pub async fn dispatch(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<CallToolResult, DispatchError> {
        let tool =
            registry::find(name).ok_or_else(|| DispatchError::UnknownTool(name.to_owned()))?;

        #[cfg(feature = "telemetry")]
        tracing::debug!(tool = tool.name, "Dispatching tool call");

        match self.invoke(tool.kind, Value::Object(arguments)).await {
            Ok(value) => Ok(text_response(&value)),
            Err(failure) => {
                let payload = ErrorPayload::from(failure);
                #[cfg(feature = "telemetry")]
                tracing::warn!(
                    tool = tool.name,
                    error.name = %payload.name,
                    error.message = %payload.error,
                    "Tool call failed"
                );
                Ok(text_response(&payload.to_value()))
            }
        }
    }

    async fn invoke(&self, kind: ToolKind, arguments: Value) -> Result<Value, Failure> {
        match kind {
            ToolKind::GetTransaction => {
                let args: TransactionIdArgs = parse(arguments)?;
                let transaction = self.gateway.get_transaction(&args.transaction_id).await?;
                Ok(transaction.unwrap_or(Value::Null))
            }
            ToolKind::GetTransactionV1 => {
                let args: TransactionIdArgs = parse(arguments)?;
                let transaction = self
                    .gateway
                    .get_transaction_v1(&args.transaction_id)
                    .await?;
                Ok(transaction.unwrap_or(Value::Null))
            }
            ToolKind::GetTransactionsByOrder => {
                let args: OrderIdArgs = parse(arguments)?;
                let transactions = self
                    .gateway
                    .get_transactions_by_order(&args.order_id)
                    .await?;
                Ok(Value::Array(transactions))
            }
            ToolKind::UpdateTransaction => {
                let args: UpdateTransactionArgs = parse(arguments)?;
                self.gateway
                    .update_transaction(&args.maintenance_request, &args.transaction_reference)
                    .await
            }
            ToolKind::CreateHostedPaymentPage => {
                let args: CreateHostedPaymentPageArgs = parse(arguments)?;
                args.page_request.validate()?;
                let options = args.options();
                self.gateway
                    .create_hosted_payment_page(&args.page_request, &options)
                    .await
            }
        }
    }
}

fn parse<T: DeserializeOwned>(arguments: Value) -> Result<T, Failure> {
    serde_json::from_value(arguments)
        .map_err(|err| Failure::error(ValidationError::NAME, err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{Call, RecordingGateway};
    use hipay::types::{
        HostedPaymentPageOptions, HostedPaymentPageRequest, MaintenanceOperation,
        MaintenanceRequest,
    };

    fn args(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("arguments must be an object"),
        }
    }

    fn parsed(result: &CallToolResult) -> Value {
        serde_json::from_str(result.first_text().unwrap()).unwrap()
    }

    async fn run(gateway: &Arc<RecordingGateway>, name: &str, arguments: Value) -> Value {
        let dispatcher = Dispatcher::new(gateway.clone());
        let result = dispatcher.dispatch(name, args(arguments)).await.unwrap();
        assert_eq!(result.content.len(), 1);
        parsed(&result)
    }

    #[tokio::test]
    async fn get_transaction_returns_gateway_value() {
        let gateway = Arc::new(RecordingGateway::replying(
            json!({"id": "abc123", "amount": 100}),
        ));
        let value = run(&gateway, "transactions.get", json!({"transactionId": "abc123"})).await;
        assert_eq!(value, json!({"id": "abc123", "amount": 100}));
        assert_eq!(
            gateway.calls(),
            [Call::GetTransaction("abc123".to_owned())]
        );
    }

    #[tokio::test]
    async fn missing_transaction_renders_null() {
        let gateway = Arc::new(RecordingGateway::replying(Value::Null));
        let dispatcher = Dispatcher::new(gateway.clone());
        let result = dispatcher
            .dispatch("transactions.getV1", args(json!({"transactionId": "nope"})))
            .await
            .unwrap();
        assert_eq!(result.first_text(), Some("null"));
        assert_eq!(
            gateway.calls(),
            [Call::GetTransactionV1("nope".to_owned())]
        );
    }

    #[tokio::test]
    async fn get_by_order_returns_list() {
        let gateway = Arc::new(RecordingGateway::replying(json!([{"id": "1"}, {"id": "2"}])));
        let value = run(&gateway, "transactions.getByOrder", json!({"orderId": "ORDER-1"})).await;
        assert_eq!(value, json!([{"id": "1"}, {"id": "2"}]));
        assert_eq!(
            gateway.calls(),
            [Call::GetTransactionsByOrder("ORDER-1".to_owned())]
        );
    }

    #[tokio::test]
    async fn update_passes_request_then_reference() {
        let gateway = Arc::new(RecordingGateway::replying(json!({"status": "118"})));
        let value = run(
            &gateway,
            "transactions.update",
            json!({
                "transactionReference": "tx_ref_123",
                "maintenanceRequest": {"operation": "capture", "amount": "50.00"}
            }),
        )
        .await;
        assert_eq!(value, json!({"status": "118"}));
        assert_eq!(
            gateway.calls(),
            [Call::UpdateTransaction(
                MaintenanceRequest::new(MaintenanceOperation::Capture).with_amount("50.00"),
                "tx_ref_123".to_owned(),
            )]
        );
    }

    #[tokio::test]
    async fn invalid_operation_never_reaches_gateway() {
        let gateway = Arc::new(RecordingGateway::replying(json!({})));
        let value = run(
            &gateway,
            "transactions.update",
            json!({
                "transactionReference": "tx_ref_123",
                "maintenanceRequest": {"operation": "void"}
            }),
        )
        .await;
        assert_eq!(value["name"], json!("ValidationError"));
        assert!(value["error"].as_str().unwrap().contains("void"));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn missing_argument_is_a_validation_error() {
        let gateway = Arc::new(RecordingGateway::replying(json!({})));
        let value = run(&gateway, "transactions.get", json!({})).await;
        assert_eq!(value["name"], json!("ValidationError"));
        assert!(value["error"].as_str().unwrap().contains("transactionId"));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn hosted_page_defaults_options() {
        let gateway = Arc::new(RecordingGateway::replying(
            json!({"forwardUrl": "https://pay.example/abc"}),
        ));
        let page_request = json!({
            "orderid": "ORDER-1",
            "description": "Shirt",
            "currency": "EUR",
            "amount": 25.5
        });
        let value = run(
            &gateway,
            "hostedPaymentPages.create",
            json!({"pageRequest": page_request}),
        )
        .await;
        assert_eq!(value, json!({"forwardUrl": "https://pay.example/abc"}));
        assert_eq!(
            gateway.calls(),
            [Call::CreateHostedPaymentPage(
                HostedPaymentPageRequest::new("ORDER-1", "Shirt", "EUR", 25.5),
                HostedPaymentPageOptions {
                    legacy: false,
                    data_id: None,
                },
            )]
        );
    }

    #[tokio::test]
    async fn hosted_page_forwards_explicit_options() {
        let gateway = Arc::new(RecordingGateway::replying(json!({})));
        run(
            &gateway,
            "hostedPaymentPages.create",
            json!({
                "pageRequest": {
                    "orderid": "ORDER-1",
                    "description": "Shirt",
                    "currency": "EUR",
                    "amount": 10
                },
                "legacy": true,
                "dataId": "data-42"
            }),
        )
        .await;
        let calls = gateway.calls();
        let [Call::CreateHostedPaymentPage(_, options)] = calls.as_slice() else {
            panic!("expected one hosted page call");
        };
        assert_eq!(
            options,
            &HostedPaymentPageOptions {
                legacy: true,
                data_id: Some("data-42".to_owned()),
            }
        );
    }

    #[tokio::test]
    async fn hosted_page_rejects_bad_email() {
        let gateway = Arc::new(RecordingGateway::replying(json!({})));
        let value = run(
            &gateway,
            "hostedPaymentPages.create",
            json!({
                "pageRequest": {
                    "orderid": "ORDER-1",
                    "description": "Shirt",
                    "currency": "EUR",
                    "amount": 10,
                    "email": "not-an-email"
                }
            }),
        )
        .await;
        assert_eq!(value["name"], json!("ValidationError"));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn structured_failure_keeps_message_and_name() {
        let gateway = Arc::new(RecordingGateway::failing(Failure::error(
            "Error",
            "Transaction not found",
        )));
        let value = run(&gateway, "transactions.get", json!({"transactionId": "x"})).await;
        assert_eq!(
            value,
            json!({"error": "Transaction not found", "name": "Error"})
        );
    }

    #[tokio::test]
    async fn message_failure_uses_default_name() {
        let gateway = Arc::new(RecordingGateway::failing(Failure::from("String error")));
        let value = run(&gateway, "transactions.get", json!({"transactionId": "x"})).await;
        assert_eq!(value, json!({"error": "String error", "name": "Error"}));
    }

    #[tokio::test]
    async fn other_failure_is_unknown() {
        let gateway = Arc::new(RecordingGateway::failing(Failure::other(
            json!({"code": 500}),
        )));
        let value = run(&gateway, "transactions.get", json!({"transactionId": "x"})).await;
        assert_eq!(value, json!({"error": "Unknown error", "name": "Error"}));
    }

    #[test]
    fn other_failure_ignores_name_field() {
        let payload = ErrorPayload::from(Failure::other(json!({"name": "CustomError"})));
        assert_eq!(payload.name, "Error");
        assert_eq!(payload.error, "Unknown error");
    }

    #[test]
    fn empty_fields_fall_back_to_defaults() {
        assert_eq!(
            ErrorPayload::from(Failure::error("", "")),
            ErrorPayload {
                error: "Unknown error".to_owned(),
                name: "Error".to_owned(),
            }
        );
        assert_eq!(
            ErrorPayload::from(Failure::error("ApiError", "")),
            ErrorPayload {
                error: "Unknown error".to_owned(),
                name: "ApiError".to_owned(),
            }
        );
        assert_eq!(ErrorPayload::from(Failure::message("")).error, "Unknown error");
    }

    #[test]
    fn error_payload_text_is_pretty_printed() {
        let result = text_response(&ErrorPayload::from(Failure::message("boom")).to_value());
        assert_eq!(
            result.first_text(),
            Some("{\n  \"error\": \"boom\",\n  \"name\": \"Error\"\n}")
        );
    }

    #[tokio::test]
    async fn gateway_key_order_is_preserved() {
        let reply: Value =
            serde_json::from_str(r#"{"state": "completed", "amount": "10.00", "id": "abc"}"#)
                .unwrap();
        let gateway = Arc::new(RecordingGateway::replying(reply));
        let dispatcher = Dispatcher::new(gateway.clone());
        let result = dispatcher
            .dispatch("transactions.get", args(json!({"transactionId": "abc"})))
            .await
            .unwrap();
        assert_eq!(
            result.first_text(),
            Some("{\n  \"state\": \"completed\",\n  \"amount\": \"10.00\",\n  \"id\": \"abc\"\n}")
        );
    }

    #[tokio::test]
    async fn unknown_tool_is_an_error() {
        let gateway = Arc::new(RecordingGateway::replying(json!({})));
        let dispatcher = Dispatcher::new(gateway.clone());
        let err = dispatcher
            .dispatch("transactions.delete", Map::new())
            .await
            .unwrap_err();
        assert_eq!(
            err,
            DispatchError::UnknownTool("transactions.delete".to_owned())
        );
        assert!(gateway.calls().is_empty());
    }
}
