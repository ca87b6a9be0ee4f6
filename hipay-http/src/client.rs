//! A [`hipay::PaymentGateway`] implementation that calls the HiPay REST API over HTTPS.
//!
//! [`HiPayClient`] covers transaction lookups (v1 and v3), order transaction
//! listing, maintenance operations and hosted payment page creation.
//!
//! ## Features
//!
//! - Uses `reqwest` for async HTTP requests with basic authentication
//! - Supports optional per-request timeout and base URL overrides
//! - Integrates with `tracing` if the `telemetry` feature is enabled
//!
//! ## Endpoints
//!
//! HiPay splits its surface over two hosts. The secure gateway serves the v1
//! transaction, maintenance and legacy hosted page endpoints; the API host
//! serves v3 transactions and the current hosted page endpoint.

use std::fmt::Display;
use std::time::Duration;

use hipay::gateway::{HostedPaymentPage, Operation, Transaction};
use hipay::types::{HostedPaymentPageOptions, HostedPaymentPageRequest, MaintenanceRequest};
use hipay::{BoxFuture, Credentials, Failure, PaymentGateway};
use reqwest::header::{ACCEPT, USER_AGENT};
use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use url::Url;

#[cfg(feature = "telemetry")]
use tracing::{Span, instrument};

use crate::constants::{self, DATA_ID_HEADER};
use crate::error::HiPayError;

/// A client for the HiPay Enterprise REST API.
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Clone)]
pub struct HiPayClient {
    /// Secure gateway base URL (v1 endpoints, legacy hosted pages).
    gateway_url: Url,
    /// API base URL (v3 endpoints, hosted pages).
    api_url: Url,
    /// Basic auth credentials and environment
    credentials: Credentials,
    /// Shared Reqwest HTTP client
    client: Client,
    /// Optional request timeout
    timeout: Option<Duration>,
}

impl std::fmt::Debug for HiPayClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HiPayClient")
            .field("gateway_url", &self.gateway_url.as_str())
            .field("api_url", &self.api_url.as_str())
            .field("credentials", &self.credentials)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl HiPayClient {
    /// Constructs a client bound to the credentials' environment.
    ///
    /// # Errors
    ///
    /// Returns [`HiPayError::UrlParse`] if a built-in base URL fails to parse.
    pub fn try_new(credentials: Credentials) -> Result<Self, HiPayError> {
        let (gateway, api) = constants::base_urls(credentials.environment());
        let gateway_url = Url::parse(gateway).map_err(|e| HiPayError::UrlParse {
            context: "Failed to parse gateway base URL",
            source: e,
        })?;
        let api_url = Url::parse(api).map_err(|e| HiPayError::UrlParse {
            context: "Failed to parse API base URL",
            source: e,
        })?;
        Ok(Self {
            gateway_url,
            api_url,
            credentials,
            client: Client::new(),
            timeout: None,
        })
    }

    /// Overrides both base URLs, e.g. to target a proxy or a mock server.
    #[must_use]
    pub fn with_base_urls(mut self, gateway_url: Url, api_url: Url) -> Self {
        self.gateway_url = gateway_url;
        self.api_url = api_url;
        self
    }

    /// Sets a timeout for all future requests.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the secure gateway base URL.
    pub const fn gateway_url(&self) -> &Url {
        &self.gateway_url
    }

    /// Returns the API base URL.
    pub const fn api_url(&self) -> &Url {
        &self.api_url
    }

    /// Sends `GET v3/transaction/{id}` to the API host.
    ///
    /// A `404` or an empty body yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`HiPayError`] if the request fails or the API rejects it.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "hipay.client.get_transaction", skip_all, err)
    )]
    pub async fn get_transaction(
        &self,
        transaction_id: &str,
    ) -> Result<Option<Transaction>, HiPayError> {
        let context = "GET v3/transaction";
        let url = endpoint(&self.api_url, &["v3", "transaction", transaction_id], context)?;
        let body = not_found_as_none(self.execute(self.client.get(url), context).await)?;
        Ok(body.filter(|value| !is_empty(value)))
    }

    /// Sends `GET v1/transaction/{id}` to the secure gateway.
    ///
    /// The transaction is read from the `transaction` field of the response;
    /// a `404` or a missing field yields `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns [`HiPayError`] if the request fails or the API rejects it.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "hipay.client.get_transaction_v1", skip_all, err)
    )]
    pub async fn get_transaction_v1(
        &self,
        transaction_id: &str,
    ) -> Result<Option<Transaction>, HiPayError> {
        let context = "GET v1/transaction";
        let url = endpoint(
            &self.gateway_url,
            &["v1", "transaction", transaction_id],
            context,
        )?;
        let body = not_found_as_none(self.execute(self.client.get(url), context).await)?;
        Ok(body
            .and_then(|mut value| value.get_mut("transaction").map(Value::take))
            .filter(|value| !is_empty(value)))
    }

    /// Sends `GET v1/transaction?orderid={id}` to the secure gateway.
    ///
    /// The API answers with a single object when the order has one
    /// transaction; the result is always normalized to a list.
    ///
    /// # Errors
    ///
    /// Returns [`HiPayError`] if the request fails or the API rejects it.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "hipay.client.get_transactions_by_order", skip_all, err)
    )]
    pub async fn get_transactions_by_order(
        &self,
        order_id: &str,
    ) -> Result<Vec<Transaction>, HiPayError> {
        let context = "GET v1/transaction?orderid";
        let url = endpoint(&self.gateway_url, &["v1", "transaction"], context)?;
        let request = self.client.get(url).query(&[("orderid", order_id)]);
        let body = self.execute(request, context).await?;
        Ok(transaction_list(body))
    }

    /// Sends `POST v1/maintenance/transaction/{reference}` to the secure gateway.
    ///
    /// # Errors
    ///
    /// Returns [`HiPayError`] if the request fails or the API rejects it.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "hipay.client.update_transaction",
            skip_all,
            fields(operation = %request.operation),
            err
        )
    )]
    pub async fn update_transaction(
        &self,
        request: &MaintenanceRequest,
        transaction_reference: &str,
    ) -> Result<Operation, HiPayError> {
        let context = "POST v1/maintenance/transaction";
        let url = endpoint(
            &self.gateway_url,
            &["v1", "maintenance", "transaction", transaction_reference],
            context,
        )?;
        let fields = form_fields(request, context)?;
        self.execute(self.client.post(url).form(&fields), context)
            .await
    }

    /// Sends `POST v1/hpayment` to the API host, or to the secure gateway
    /// when `options.legacy` is set.
    ///
    /// # Errors
    ///
    /// Returns [`HiPayError`] if the request fails or the API rejects it.
    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "hipay.client.create_hosted_payment_page",
            skip_all,
            fields(legacy = options.legacy),
            err
        )
    )]
    pub async fn create_hosted_payment_page(
        &self,
        request: &HostedPaymentPageRequest,
        options: &HostedPaymentPageOptions,
    ) -> Result<HostedPaymentPage, HiPayError> {
        let context = "POST v1/hpayment";
        let base = if options.legacy {
            &self.gateway_url
        } else {
            &self.api_url
        };
        let url = endpoint(base, &["v1", "hpayment"], context)?;
        let fields = form_fields(request, context)?;
        let mut builder = self.client.post(url).form(&fields);
        if let Some(data_id) = &options.data_id {
            builder = builder.header(DATA_ID_HEADER, data_id);
        }
        self.execute(builder, context).await
    }

    /// Sends a request with auth, accept and user agent headers applied, and
    /// decodes the JSON response.
    ///
    /// An empty success body decodes to [`Value::Null`].
    async fn execute(
        &self,
        request: RequestBuilder,
        context: &'static str,
    ) -> Result<Value, HiPayError> {
        let mut req = request
            .basic_auth(
                self.credentials.username(),
                Some(self.credentials.password()),
            )
            .header(ACCEPT, "application/json")
            .header(USER_AGENT, constants::USER_AGENT);
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }
        let http_response = req
            .send()
            .await
            .map_err(|e| HiPayError::Http { context, source: e })?;

        let status = http_response.status();
        let body = http_response
            .text()
            .await
            .map_err(|e| HiPayError::ResponseBodyRead { context, source: e })?;

        let result = if status.is_success() {
            if body.trim().is_empty() {
                Ok(Value::Null)
            } else {
                serde_json::from_str(&body)
                    .map_err(|e| HiPayError::JsonDeserialization { context, source: e })
            }
        } else {
            Err(HiPayError::from_response(context, status, body))
        };

        record_result_on_span(&result);

        result
    }
}

impl PaymentGateway for HiPayClient {
    fn get_transaction<'a>(
        &'a self,
        transaction_id: &'a str,
    ) -> BoxFuture<'a, Result<Option<Transaction>, Failure>> {
        Box::pin(async move {
            Self::get_transaction(self, transaction_id)
                .await
                .map_err(Failure::from)
        })
    }

    fn get_transaction_v1<'a>(
        &'a self,
        transaction_id: &'a str,
    ) -> BoxFuture<'a, Result<Option<Transaction>, Failure>> {
        Box::pin(async move {
            Self::get_transaction_v1(self, transaction_id)
                .await
                .map_err(Failure::from)
        })
    }

    fn get_transactions_by_order<'a>(
        &'a self,
        order_id: &'a str,
    ) -> BoxFuture<'a, Result<Vec<Transaction>, Failure>> {
        Box::pin(async move {
            Self::get_transactions_by_order(self, order_id)
                .await
                .map_err(Failure::from)
        })
    }

    fn update_transaction<'a>(
        &'a self,
        request: &'a MaintenanceRequest,
        transaction_reference: &'a str,
    ) -> BoxFuture<'a, Result<Operation, Failure>> {
        Box::pin(async move {
            Self::update_transaction(self, request, transaction_reference)
                .await
                .map_err(Failure::from)
        })
    }

    fn create_hosted_payment_page<'a>(
        &'a self,
        request: &'a HostedPaymentPageRequest,
        options: &'a HostedPaymentPageOptions,
    ) -> BoxFuture<'a, Result<HostedPaymentPage, Failure>> {
        Box::pin(async move {
            Self::create_hosted_payment_page(self, request, options)
                .await
                .map_err(Failure::from)
        })
    }
}

/// Appends percent-encoded path segments to a base URL.
fn endpoint(base: &Url, segments: &[&str], context: &'static str) -> Result<Url, HiPayError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|()| HiPayError::InvalidBaseUrl {
            context,
            url: base.to_string(),
        })?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Maps a `404` to `Ok(None)`.
fn not_found_as_none(result: Result<Value, HiPayError>) -> Result<Option<Value>, HiPayError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.is_not_found() => Ok(None),
        Err(err) => Err(err),
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Object(map) => map.is_empty(),
        _ => false,
    }
}

/// Extracts the transactions of an order lookup response.
///
/// Accepts `{"transaction": [...]}`, `{"transaction": {...}}` and a bare array.
fn transaction_list(body: Value) -> Vec<Transaction> {
    let transactions = match body {
        Value::Object(mut map) => map.remove("transaction").unwrap_or(Value::Null),
        other => other,
    };
    match transactions {
        Value::Array(items) => items,
        Value::Null => Vec::new(),
        single => vec![single],
    }
}

/// Flattens a request into `application/x-www-form-urlencoded` pairs.
///
/// Scalars are rendered as text, nested values as JSON, and nulls dropped.
fn form_fields<T: serde::Serialize>(
    request: &T,
    context: &'static str,
) -> Result<Vec<(String, String)>, HiPayError> {
    let value =
        serde_json::to_value(request).map_err(|e| HiPayError::Serialize { context, source: e })?;
    let Value::Object(map) = value else {
        return Ok(Vec::new());
    };
    Ok(map
        .into_iter()
        .filter_map(|(key, value)| {
            let text = match value {
                Value::Null => return None,
                Value::String(s) => s,
                Value::Bool(b) => b.to_string(),
                Value::Number(n) => n.to_string(),
                nested @ (Value::Array(_) | Value::Object(_)) => nested.to_string(),
            };
            Some((key, text))
        })
        .collect())
}

/// Records the outcome of a request on a tracing span, including status and errors.
#[cfg(feature = "telemetry")]
fn record_result_on_span<R, E: Display>(result: &Result<R, E>) {
    let span = Span::current();
    match result {
        Ok(_) => {
            span.record("otel.status_code", "OK");
        }
        Err(err) => {
            span.record("otel.status_code", "ERROR");
            span.record("error.message", tracing::field::display(err));
            tracing::event!(tracing::Level::ERROR, error = %err, "Request to HiPay failed");
        }
    }
}

/// Records the outcome of a request on a tracing span, including status and errors.
/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
fn record_result_on_span<R, E: Display>(_result: &Result<R, E>) {}
