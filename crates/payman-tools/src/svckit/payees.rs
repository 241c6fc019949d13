//! Payee Creation Tools
//!
//! One tool per rails type. All three forward their arguments as the body
//! of a single create-payee call.

use async_trait::async_trait;
use serde_json::json;

use payman_client::{CryptoAddressPayee, PayeeRequest, PaymanClient, TestRailsPayee, UsAchPayee};
use payman_core::{ParameterSchema, Result as CoreResult, Session, Tool, ToolCall, ToolResult, ToolSchema};

use super::outcome::{Operation, require_credential, respond};

fn tags_parameter() -> ParameterSchema {
    ParameterSchema::optional("tags", "array", "Optional tags for the payee")
        .with_items(json!({"type": "string"}))
}

fn contact_details_parameter() -> ParameterSchema {
    let text = json!({"type": "string"});
    ParameterSchema::optional("contactDetails", "object", "Optional contact details for the payee")
        .with_properties(json!({
            "email": text,
            "phoneNumber": text,
            "address": {
                "type": "object",
                "properties": {
                    "line1": text,
                    "line2": text,
                    "city": text,
                    "state": text,
                    "postalCode": text,
                    "country": text,
                }
            }
        }))
}

/// Send `payee` to the service and render the outcome
async fn create(client: &PaymanClient, session: &Session, tool: &str, payee: PayeeRequest) -> ToolResult {
    let credential = match require_credential(session, tool) {
        Ok(credential) => credential,
        Err(rejected) => return rejected,
    };

    let outcome = client
        .create_payee(credential.expose(), &payee)
        .await
        .map(|created| format!("Payee created successfully: {created}"));
    respond(tool, Operation::CreatePayee, outcome)
}

/// Create a payee on test rails (or a caller-chosen rails type)
pub struct CreatePayeeTool {
    client: PaymanClient,
}

impl CreatePayeeTool {
    pub fn new(client: PaymanClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for CreatePayeeTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "create-payee".into(),
            description: "Create a new payee on test rails".into(),
            parameters: vec![
                ParameterSchema::required("name", "string", "Name of the payee"),
                ParameterSchema::optional("type", "string", "Type of payment rails to use")
                    .with_default(json!(payman_client::model::DEFAULT_PAYEE_TYPE)),
                tags_parameter(),
            ],
        }
    }

    async fn execute(&self, session: &mut Session, call: &ToolCall) -> CoreResult<ToolResult> {
        let payee: TestRailsPayee = call.parse_arguments()?;
        Ok(create(&self.client, session, "create-payee", PayeeRequest::TestRails(payee)).await)
    }
}

/// Create a US bank-account (ACH) payee
pub struct CreateUsAchPayeeTool {
    client: PaymanClient,
}

impl CreateUsAchPayeeTool {
    pub fn new(client: PaymanClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for CreateUsAchPayeeTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "create-us-ach-payee".into(),
            description: "Create a new payee paid by US ACH bank transfer".into(),
            parameters: vec![
                ParameterSchema::required("name", "string", "Name of the payee"),
                ParameterSchema::required("accountType", "string", "Type of bank account")
                    .with_enum(["checking", "savings"]),
                ParameterSchema::required("accountNumber", "string", "Bank account number"),
                ParameterSchema::required("routingNumber", "string", "Bank routing number"),
                ParameterSchema::required("accountHolderName", "string", "Name of the account holder"),
                ParameterSchema::required("accountHolderType", "string", "Kind of account holder")
                    .with_enum(["individual", "business"]),
                tags_parameter(),
                contact_details_parameter(),
            ],
        }
    }

    async fn execute(&self, session: &mut Session, call: &ToolCall) -> CoreResult<ToolResult> {
        let payee: UsAchPayee = call.parse_arguments()?;
        Ok(create(&self.client, session, "create-us-ach-payee", PayeeRequest::UsAch(payee)).await)
    }
}

/// Create a crypto-address payee
pub struct CreateCryptoPayeeTool {
    client: PaymanClient,
}

impl CreateCryptoPayeeTool {
    pub fn new(client: PaymanClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for CreateCryptoPayeeTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "create-crypto-payee".into(),
            description: "Create a new payee paid to a crypto address".into(),
            parameters: vec![
                ParameterSchema::required("name", "string", "Name of the payee"),
                ParameterSchema::required("address", "string", "Crypto address to pay"),
                ParameterSchema::required("chain", "string", "Blockchain the address lives on"),
                ParameterSchema::required("currency", "string", "Currency to pay in"),
                tags_parameter(),
                contact_details_parameter(),
            ],
        }
    }

    async fn execute(&self, session: &mut Session, call: &ToolCall) -> CoreResult<ToolResult> {
        let payee: CryptoAddressPayee = call.parse_arguments()?;
        Ok(create(
            &self.client,
            session,
            "create-crypto-payee",
            PayeeRequest::CryptoAddress(payee),
        )
        .await)
    }
}
