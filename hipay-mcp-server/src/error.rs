//! Startup configuration errors.
//!
//! Each message tells the operator how to supply the missing value.

/// A fatal problem with the startup configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// `--tools` was not given.
    #[error("The --tools arguments must be provided.")]
    MissingTools,

    /// A `--tools` entry is neither `all` nor a registered tool name.
    #[error("Invalid tool: {tool}. Accepted tools are: {accepted}")]
    InvalidTool {
        /// The rejected entry.
        tool: String,
        /// Comma-separated list of accepted entries.
        accepted: String,
    },

    /// No username from `--username` or `HIPAY_USERNAME`.
    #[error(
        "Username not provided. Please either pass it as an argument --username=$USERNAME or set the HIPAY_USERNAME environment variable."
    )]
    MissingUsername,

    /// No password from `--password` or `HIPAY_PASSWORD`.
    #[error(
        "Password not provided. Please either pass it as an argument --password=$PASSWORD or set the HIPAY_PASSWORD environment variable."
    )]
    MissingPassword,

    /// The environment is neither `stage` nor `production`.
    #[error(
        "Invalid environment `{0}`. Please either pass it as an argument --environment=stage or --environment=production."
    )]
    InvalidEnvironment(String),
}
