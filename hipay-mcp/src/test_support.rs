//! A recording [`PaymentGateway`] for dispatcher and server tests.

use std::sync::Mutex;

use hipay::gateway::{HostedPaymentPage, Operation, Transaction};
use hipay::types::{HostedPaymentPageOptions, HostedPaymentPageRequest, MaintenanceRequest};
use hipay::{BoxFuture, Failure, PaymentGateway};
use serde_json::Value;

/// A gateway operation as received by [`RecordingGateway`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    GetTransaction(String),
    GetTransactionV1(String),
    GetTransactionsByOrder(String),
    UpdateTransaction(MaintenanceRequest, String),
    CreateHostedPaymentPage(HostedPaymentPageRequest, HostedPaymentPageOptions),
}

/// Records every call and answers each with the same reply.
///
/// Lookups answer `None` for a `null` reply; order listings wrap a
/// non-array reply in a one-element list.
pub struct RecordingGateway {
    calls: Mutex<Vec<Call>>,
    reply: Result<Value, Failure>,
}

impl RecordingGateway {
    pub fn replying(value: Value) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reply: Ok(value),
        }
    }

    pub fn failing(failure: Failure) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            reply: Err(failure),
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: Call) -> Result<Value, Failure> {
        self.calls.lock().unwrap().push(call);
        self.reply.clone()
    }
}

impl PaymentGateway for RecordingGateway {
    fn get_transaction<'a>(
        &'a self,
        transaction_id: &'a str,
    ) -> BoxFuture<'a, Result<Option<Transaction>, Failure>> {
        let reply = self.record(Call::GetTransaction(transaction_id.to_owned()));
        Box::pin(async move { reply.map(|v| Some(v).filter(|v| !v.is_null())) })
    }

    fn get_transaction_v1<'a>(
        &'a self,
        transaction_id: &'a str,
    ) -> BoxFuture<'a, Result<Option<Transaction>, Failure>> {
        let reply = self.record(Call::GetTransactionV1(transaction_id.to_owned()));
        Box::pin(async move { reply.map(|v| Some(v).filter(|v| !v.is_null())) })
    }

    fn get_transactions_by_order<'a>(
        &'a self,
        order_id: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Transaction>, Failure>> {
        let reply = self.record(Call::GetTransactionsByOrder(order_id.to_owned()));
        Box::pin(async move {
            reply.map(|v| match v {
                Value::Array(items) => items,
                other => vec![other],
            })
        })
    }

    fn update_transaction<'a>(
        &'a self,
        request: &'a MaintenanceRequest,
        transaction_reference: &'a str,
    ) -> BoxFuture<'a, Result<Operation, Failure>> {
        let reply = self.record(Call::UpdateTransaction(
            request.clone(),
            transaction_reference.to_owned(),
        ));
        Box::pin(async move { reply })
    }

    fn create_hosted_payment_page<'a>(
        &'a self,
        request: &'a HostedPaymentPageRequest,
        options: &'a HostedPaymentPageOptions,
    ) -> BoxFuture<'a, Result<HostedPaymentPage, Failure>> {
        let reply = self.record(Call::CreateHostedPaymentPage(
            request.clone(),
            options.clone(),
        ));
        Box::pin(async move { reply })
    }
}
