//! Application State

use payman_core::{Session, ToolRegistry};

/// State owned by the request loop.
///
/// Requests are served one at a time, so the session is borrowed mutably by
/// each tool call without any locking.
pub struct AppState {
    /// Tool registry with all available tools
    pub tools: ToolRegistry,

    /// The caller's session (holds the API credential)
    pub session: Session,
}

impl AppState {
    pub fn new(tools: ToolRegistry) -> Self {
        Self {
            tools,
            session: Session::new(),
        }
    }
}
