//! HTTP client for the HiPay Enterprise payment API.
//!
//! Provides [`HiPayClient`], a [`hipay::PaymentGateway`] implementation that
//! talks to HiPay's REST endpoints with HTTP basic authentication.
//!
//! # Modules
//!
//! - [`constants`] - Base URLs per environment, headers, user agent
//! - [`client`] - The [`HiPayClient`] itself
//! - [`error`] - HTTP client error types
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation of every API call

pub mod client;
pub mod constants;
pub mod error;

pub use client::HiPayClient;
pub use error::HiPayError;
