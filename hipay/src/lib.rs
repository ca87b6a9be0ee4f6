#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Core types for the HiPay Enterprise payment API.
//!
//! This crate holds the transport-agnostic pieces shared by the HTTP client
//! and the MCP adapter: credentials and environment selection, the request
//! types accepted by maintenance and hosted payment page operations, and the
//! [`PaymentGateway`](gateway::PaymentGateway) trait through which every
//! remote call is made.
//!
//! # Modules
//!
//! - [`credentials`] - API credentials and target [`Environment`]
//! - [`error`] - The [`Failure`] union returned by gateway operations
//! - [`gateway`] - The object-safe [`PaymentGateway`](gateway::PaymentGateway) trait
//! - [`types`] - Maintenance and hosted payment page request types

pub mod credentials;
pub mod error;
pub mod gateway;
pub mod types;

pub use credentials::{Credentials, Environment};
pub use error::{Failure, ValidationError};
pub use gateway::{BoxFuture, PaymentGateway};
