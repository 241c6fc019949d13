//! Payee Search Tool

use async_trait::async_trait;

use payman_client::{PayeeSearch, PaymanClient};
use payman_core::{ParameterSchema, Result as CoreResult, Session, Tool, ToolCall, ToolResult, ToolSchema};

use super::outcome::{Operation, require_credential, respond};

const FILTERS: [(&str, &str); 10] = [
    ("name", "Payee name"),
    ("contactEmail", "Contact email address"),
    ("contactPhoneNumber", "Contact phone number"),
    ("contactTaxId", "Contact tax ID"),
    ("accountNumber", "Bank account number"),
    ("routingNumber", "Bank routing number"),
    ("agentReference", "Agent reference"),
    ("cryptoAddress", "Crypto address"),
    ("cryptoChain", "Crypto chain"),
    ("cryptoCurrency", "Crypto currency"),
];

/// Tool that lists payees matching optional criteria
pub struct SearchPayeesTool {
    client: PaymanClient,
}

impl SearchPayeesTool {
    pub fn new(client: PaymanClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for SearchPayeesTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "search-payees".into(),
            description: "Search payees, optionally filtered by contact, account or crypto details".into(),
            parameters: FILTERS
                .iter()
                .map(|(name, description)| ParameterSchema::optional(name, "string", description))
                .collect(),
        }
    }

    async fn execute(&self, session: &mut Session, call: &ToolCall) -> CoreResult<ToolResult> {
        let search: PayeeSearch = call.parse_arguments()?;

        let credential = match require_credential(session, "search-payees") {
            Ok(credential) => credential,
            Err(rejected) => return Ok(rejected),
        };

        let outcome = self
            .client
            .search_payees(credential.expose(), &search)
            .await
            .map(|payees| {
                let pretty = serde_json::to_string_pretty(&payees).unwrap_or_else(|_| payees.to_string());
                format!("Payees found ({}): {pretty}", search.describe())
            });
        Ok(respond("search-payees", Operation::SearchPayees, outcome))
    }
}
