//! Send Payment Tool

use async_trait::async_trait;

use payman_client::{PaymanClient, PaymentRequest};
use payman_core::{
    ParameterSchema, Result as CoreResult, Session, Tool, ToolCall, ToolResult, ToolSchema,
};

use super::outcome::{Operation, require_credential, respond};

/// Tool that sends one payment to an existing payee
pub struct SendPaymentTool {
    client: PaymanClient,
}

impl SendPaymentTool {
    pub fn new(client: PaymanClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Tool for SendPaymentTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "send-payment".into(),
            description: "Send a payment to an existing payee".into(),
            parameters: vec![
                ParameterSchema::required("payeeId", "string", "ID of the payee to send payment to"),
                ParameterSchema::required("amountDecimal", "number", "Amount to send (in decimal)")
                    .with_exclusive_minimum(0.0),
                ParameterSchema::optional("walletId", "string", "Wallet to pay from"),
                ParameterSchema::optional("memo", "string", "Optional memo for the payment"),
                ParameterSchema::optional("metadata", "object", "Optional metadata for the payment"),
            ],
        }
    }

    async fn execute(&self, session: &mut Session, call: &ToolCall) -> CoreResult<ToolResult> {
        let payment: PaymentRequest = call.parse_arguments()?;

        let credential = match require_credential(session, "send-payment") {
            Ok(credential) => credential,
            Err(rejected) => return Ok(rejected),
        };

        let outcome = self
            .client
            .send_payment(credential.expose(), &payment)
            .await
            .map(|sent| format!("Payment sent successfully: {sent}"));
        Ok(respond("send-payment", Operation::SendPayment, outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tool() -> SendPaymentTool {
        SendPaymentTool::new(PaymanClient::new("http://127.0.0.1:1"))
    }

    fn payment(amount: serde_json::Value) -> ToolCall {
        ToolCall::new("send-payment")
            .with_argument("payeeId", json!("pd-1"))
            .with_argument("amountDecimal", amount)
    }

    #[test]
    fn test_zero_and_negative_rejected_by_schema() {
        assert!(tool().validate(&payment(json!(0))).is_err());
        assert!(tool().validate(&payment(json!(0.0))).is_err());
        assert!(tool().validate(&payment(json!(-5))).is_err());
        assert!(tool().validate(&payment(json!("10"))).is_err());
        assert!(tool().validate(&payment(json!(0.01))).is_ok());
        assert!(tool().validate(&payment(json!(1e-30))).is_ok());
    }

    #[tokio::test]
    async fn test_unauthenticated_rejected() {
        let mut session = Session::new();
        let result = tool().execute(&mut session, &payment(json!(10))).await.unwrap();
        assert!(!result.success);
        assert!(result.output.contains("set-api-key"));
    }
}
