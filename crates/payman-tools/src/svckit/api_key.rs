//! API Key Tool
//!
//! Stores the credential every other tool authenticates with.

use async_trait::async_trait;
use serde::Deserialize;

use payman_core::{ParameterSchema, Result as CoreResult, Session, Tool, ToolCall, ToolResult, ToolSchema};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SetApiKeyParams {
    api_key: String,
}

/// Tool that sets (or replaces) the session's API key
pub struct SetApiKeyTool;

#[async_trait]
impl Tool for SetApiKeyTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "set-api-key".into(),
            description: "Set the Payman API key used to authenticate every other tool".into(),
            parameters: vec![ParameterSchema::required(
                "apiKey",
                "string",
                "The Payman API key to use for authentication",
            )],
        }
    }

    async fn execute(&self, session: &mut Session, call: &ToolCall) -> CoreResult<ToolResult> {
        let params: SetApiKeyParams = call.parse_arguments()?;
        session.set_credential(params.api_key);

        Ok(ToolResult::success(
            "set-api-key",
            "Payman API key has been set successfully.",
        ))
    }
}
