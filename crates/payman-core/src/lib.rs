//! # payman-core
//!
//! Building blocks shared by every gateway operation.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                      Tool Gateway                        │
//! │  ┌─────────────┐   ┌──────────────┐   ┌───────────────┐  │
//! │  │   Session   │──▶│ ToolRegistry │──▶│ Tool::execute │  │
//! │  │ (credential)│   │  (validate)  │   │ (one HTTP call)│ │
//! │  └─────────────┘   └──────────────┘   └───────────────┘  │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Every tool answers with a [`ToolResult`], which renders into the uniform
//! [`ToolResponse`] envelope: one text block plus an error flag on failure.

pub mod error;
pub mod session;
pub mod tool;

pub use error::{Result, ToolError};
pub use session::{AuthState, Credential, Session, SessionId};
pub use tool::{
    Content, ParameterSchema, Tool, ToolCall, ToolRegistry, ToolResponse, ToolResult, ToolSchema,
};
