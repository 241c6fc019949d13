//! Balance Tool

use async_trait::async_trait;
use serde_json::Value;

use payman_client::PaymanClient;
use payman_core::{Result as CoreResult, Session, Tool, ToolCall, ToolResult, ToolSchema};

use super::outcome::{Operation, require_credential, respond};

/// Tool that reports the account balance in the fixed balance currency
pub struct GetBalanceTool {
    client: PaymanClient,
}

impl GetBalanceTool {
    pub fn new(client: PaymanClient) -> Self {
        Self { client }
    }
}

fn render(balance: &Value) -> String {
    match balance {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[async_trait]
impl Tool for GetBalanceTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "get-balance".into(),
            description: "Get the current Payman balance".into(),
            parameters: vec![],
        }
    }

    async fn execute(&self, session: &mut Session, _call: &ToolCall) -> CoreResult<ToolResult> {
        let credential = match require_credential(session, "get-balance") {
            Ok(credential) => credential,
            Err(rejected) => return Ok(rejected),
        };

        let outcome = self
            .client
            .get_balance(credential.expose())
            .await
            .map(|balance| format!("Current Balance: {}", render(&balance)));
        Ok(respond("get-balance", Operation::GetBalance, outcome))
    }
}
