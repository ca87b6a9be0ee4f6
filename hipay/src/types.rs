//! Request types for HiPay maintenance and hosted payment page operations.
//!
//! Field names follow the HiPay REST API (`orderid`, `operation_id`, ...)
//! so values serialize straight into request bodies. Every type derives
//! [`JsonSchema`] so tool input schemas can be generated from it.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use url::Url;

use crate::error::ValidationError;

/// A maintenance operation applicable to an existing transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub enum MaintenanceOperation {
    /// Capture an authorized amount.
    Capture,
    /// Refund a captured amount.
    Refund,
    /// Cancel an authorization.
    Cancel,
    /// Accept a transaction held by fraud screening.
    AcceptChallenge,
    /// Deny a transaction held by fraud screening.
    DenyChallenge,
    /// Finalize a pending transaction.
    Finalize,
}

impl MaintenanceOperation {
    /// All operations, in API documentation order.
    pub const ALL: [Self; 6] = [
        Self::Capture,
        Self::Refund,
        Self::Cancel,
        Self::AcceptChallenge,
        Self::DenyChallenge,
        Self::Finalize,
    ];

    /// Returns the wire name of the operation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Capture => "capture",
            Self::Refund => "refund",
            Self::Cancel => "cancel",
            Self::AcceptChallenge => "acceptChallenge",
            Self::DenyChallenge => "denyChallenge",
            Self::Finalize => "finalize",
        }
    }
}

impl fmt::Display for MaintenanceOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A maintenance request body.
///
/// Unknown keys are dropped on deserialization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MaintenanceRequest {
    /// The operation to perform on the transaction.
    pub operation: MaintenanceOperation,

    /// Base currency for this order (ISO 4217).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,

    /// Amount is required for partial maintenances. Do not specify amount for full captures or refunds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,

    /// Operation merchant ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    /// Shopping cart details (JSON string).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basket: Option<String>,

    /// Number of the subtransaction to be refunded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_transaction_reference: Option<String>,

    /// To identify the origin of the transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl MaintenanceRequest {
    /// Creates a request for `operation` with every optional field unset.
    #[must_use]
    pub const fn new(operation: MaintenanceOperation) -> Self {
        Self {
            operation,
            currency: None,
            amount: None,
            operation_id: None,
            basket: None,
            sub_transaction_reference: None,
            source: None,
        }
    }

    /// Sets the amount for a partial operation.
    #[must_use]
    pub fn with_amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = Some(amount.into());
        self
    }
}

/// A hosted payment page request body.
///
/// Keys beyond the documented ones are kept in [`Self::extra`] and forwarded
/// unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct HostedPaymentPageRequest {
    /// Unique order ID.
    pub orderid: String,

    /// The order short description.
    pub description: String,

    /// Base currency for this order (ISO 4217).
    pub currency: String,

    /// Total order amount.
    pub amount: f64,

    /// The payment method used to proceed checkout.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_product: Option<String>,

    /// Customer email address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    /// Customer phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,

    /// URL to return customer after successful payment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accept_url: Option<String>,

    /// URL to return customer after declined payment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decline_url: Option<String>,

    /// URL to return customer when payment is pending.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending_url: Option<String>,

    /// URL to return customer after system failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exception_url: Option<String>,

    /// URL to return customer after cancellation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<String>,

    /// Override notification URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_url: Option<String>,

    /// Shopping cart details (JSON string).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basket: Option<String>,

    /// Custom data (JSON string).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_data: Option<String>,

    /// Locale code of customer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,

    /// Additional API fields, forwarded as-is.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl HostedPaymentPageRequest {
    /// Creates a request with the required fields and nothing else.
    #[must_use]
    pub fn new(
        orderid: impl Into<String>,
        description: impl Into<String>,
        currency: impl Into<String>,
        amount: f64,
    ) -> Self {
        Self {
            orderid: orderid.into(),
            description: description.into(),
            currency: currency.into(),
            amount,
            payment_product: None,
            email: None,
            phone: None,
            accept_url: None,
            decline_url: None,
            pending_url: None,
            exception_url: None,
            cancel_url: None,
            notify_url: None,
            basket: None,
            custom_data: None,
            language: None,
            extra: Map::new(),
        }
    }

    /// Checks the email and redirect URL fields.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError`] for the first field that is not a
    /// plausible email address or absolute URL.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(email) = &self.email
            && !is_plausible_email(email)
        {
            return Err(ValidationError::Email {
                field: "email",
                value: email.clone(),
            });
        }

        let urls = [
            ("accept_url", &self.accept_url),
            ("decline_url", &self.decline_url),
            ("pending_url", &self.pending_url),
            ("exception_url", &self.exception_url),
            ("cancel_url", &self.cancel_url),
            ("notify_url", &self.notify_url),
        ];
        for (field, value) in urls {
            if let Some(value) = value {
                Url::parse(value).map_err(|source| ValidationError::Url {
                    field,
                    value: value.clone(),
                    source,
                })?;
            }
        }

        Ok(())
    }
}

/// Address shape accepted for `email`: an ASCII local part ending in a
/// word character, then dot-separated domain labels that start with an
/// alphanumeric, then an alphabetic TLD of at least two letters.
static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+-]@([A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$")
        .expect("Invalid email pattern")
});

/// The local part may not start with a dot, and no dots may repeat.
fn is_plausible_email(value: &str) -> bool {
    !value.starts_with('.') && !value.contains("..") && EMAIL_PATTERN.is_match(value)
}

/// Options for hosted payment page creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostedPaymentPageOptions {
    /// Create the page on the legacy gateway instead of the current API.
    pub legacy: bool,
    /// Custom data identifier forwarded to HiPay's Data API.
    pub data_id: Option<String>,
}
