//! The remote payment gateway abstraction.
//!
//! [`PaymentGateway`] is the only way the rest of the workspace reaches the
//! HiPay API. The HTTP implementation lives in `hipay-http`; tests substitute
//! recording mocks.

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use crate::error::Failure;
use crate::types::{HostedPaymentPageOptions, HostedPaymentPageRequest, MaintenanceRequest};

/// A boxed, `Send` future borrowed for `'a`.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A transaction as returned by the API. Opaque to this workspace.
pub type Transaction = Value;

/// The result of a maintenance operation. Opaque to this workspace.
pub type Operation = Value;

/// A created hosted payment page (forward URL and metadata). Opaque to this workspace.
pub type HostedPaymentPage = Value;

/// Operations offered by the HiPay Enterprise API.
///
/// Implementations must be safe for concurrent use: the MCP transport may
/// issue several calls at once against the same gateway.
pub trait PaymentGateway: Send + Sync {
    /// Fetches a transaction through the v3 API.
    ///
    /// Returns `Ok(None)` when the transaction does not exist.
    fn get_transaction<'a>(
        &'a self,
        transaction_id: &'a str,
    ) -> BoxFuture<'a, Result<Option<Transaction>, Failure>>;

    /// Fetches a transaction through the v1 API.
    ///
    /// Returns `Ok(None)` when the transaction does not exist.
    fn get_transaction_v1<'a>(
        &'a self,
        transaction_id: &'a str,
    ) -> BoxFuture<'a, Result<Option<Transaction>, Failure>>;

    /// Lists every transaction attached to an order.
    fn get_transactions_by_order<'a>(
        &'a self,
        order_id: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Transaction>, Failure>>;

    /// Applies a maintenance operation (capture, refund, ...) to a transaction.
    fn update_transaction<'a>(
        &'a self,
        request: &'a MaintenanceRequest,
        transaction_reference: &'a str,
    ) -> BoxFuture<'a, Result<Operation, Failure>>;

    /// Creates a hosted payment page for an order.
    fn create_hosted_payment_page<'a>(
        &'a self,
        request: &'a HostedPaymentPageRequest,
        options: &'a HostedPaymentPageOptions,
    ) -> BoxFuture<'a, Result<HostedPaymentPage, Failure>>;
}
