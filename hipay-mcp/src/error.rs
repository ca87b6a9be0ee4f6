//! Error types for HiPay tool dispatch.
//!
//! Remote and validation failures never surface here: they are normalized
//! into the tool result. [`DispatchError`] only covers calls that cannot be
//! routed to a tool at all.

/// Errors that prevent a tool call from being dispatched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[non_exhaustive]
pub enum DispatchError {
    /// No registered or enabled tool has this name.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}
