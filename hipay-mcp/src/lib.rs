#![cfg_attr(docsrs, feature(doc_cfg))]

//! MCP (Model Context Protocol) tools for the HiPay Enterprise payment API.
//!
//! This crate exposes HiPay transaction lookups, maintenance operations and
//! hosted payment page creation as MCP tools, so an MCP client can drive
//! payment operations through a uniform tool-calling interface.
//!
//! # Architecture
//!
//! - [`registry`] holds the fixed, ordered list of tools
//! - [`dispatch`] validates arguments, calls the [`hipay::PaymentGateway`]
//!   and normalizes failures into `{error, name}` payloads
//! - [`server`] selects which tools to expose and routes calls to them
//!
//! Every tool call yields a single text content item holding pretty-printed
//! JSON, whether it succeeded or not.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hipay_mcp::server::HiPayMcpServer;
//! use hipay_mcp::types::CallToolParams;
//!
//! let server = HiPayMcpServer::from_credentials(credentials, &["all"])?;
//! let result = server
//!     .call(CallToolParams::new("transactions.get", json!({"transactionId": "800000000001"})))
//!     .await?;
//! ```
//!
//! # Feature Flags
//!
//! - `rmcp` - Built-in integration with the official [`rmcp`](https://docs.rs/rmcp) Rust MCP SDK
//! - `telemetry` - Enables tracing instrumentation of dispatch and HTTP calls

pub mod dispatch;
pub mod error;
pub mod registry;
pub mod server;
pub mod types;

#[cfg(feature = "rmcp")]
#[cfg_attr(docsrs, doc(cfg(feature = "rmcp")))]
pub mod rmcp_compat;

#[cfg(test)]
mod test_support;

pub use dispatch::Dispatcher;
pub use error::DispatchError;
pub use server::HiPayMcpServer;
