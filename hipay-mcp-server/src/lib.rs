//! Startup configuration for the HiPay MCP server binary.
//!
//! # Modules
//!
//! - [`config`] - Command-line parsing and environment fallback
//! - [`error`] - Startup configuration errors

pub mod config;
pub mod error;

pub use config::{Cli, ServerConfig};
pub use error::ConfigError;
