//! Error Types

use thiserror::Error;

/// Result type alias for tool operations
pub type Result<T> = std::result::Result<T, ToolError>;

/// Tool gateway error types
///
/// Both variants mean the caller sent something unusable, caught before a tool
/// talks to the remote service. Remote failures are never raised; tools fold
/// them into an error-flagged [`ToolResult`](crate::ToolResult) instead.
#[derive(Error, Debug)]
pub enum ToolError {
    /// Tool not found in registry
    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    /// Tool arguments failed schema validation
    #[error("Tool validation error: {0}")]
    ToolValidation(String),
}
