//! Result construction shared by every remote-backed tool.
//!
//! A tool resolves one [`Operation`] to `Result<String, PaymanError>`;
//! [`respond`] turns that into the uniform success/error [`ToolResult`].

use payman_client::PaymanError;
use payman_core::{Credential, Session, ToolResult};

/// Text returned when a tool runs before `set-api-key`
pub const MISSING_API_KEY: &str = "API key has not been set. Please use the set-api-key tool first.";

/// Remote operations, named for result texts
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Operation {
    CreatePayee,
    SendPayment,
    SearchPayees,
    GetBalance,
}

impl Operation {
    /// Used as "Error {gerund} ..."
    pub fn gerund(self) -> &'static str {
        match self {
            Operation::CreatePayee => "creating payee",
            Operation::SendPayment => "sending payment",
            Operation::SearchPayees => "searching payees",
            Operation::GetBalance => "fetching balance",
        }
    }

    /// Used as "Failed to {infinitive}: ..."
    pub fn infinitive(self) -> &'static str {
        match self {
            Operation::CreatePayee => "create payee",
            Operation::SendPayment => "send payment",
            Operation::SearchPayees => "search payees",
            Operation::GetBalance => "get balance",
        }
    }
}

/// The session's credential, or the error result to return instead
pub fn require_credential<'s>(
    session: &'s Session,
    tool: &str,
) -> Result<&'s Credential, ToolResult> {
    session.credential().ok_or_else(|| {
        tracing::warn!(tool, session = %session.id, "Rejected call: no API key set");
        ToolResult::failure(tool, MISSING_API_KEY)
    })
}

/// Render an outcome as a tool result
pub fn respond(tool: &str, operation: Operation, outcome: Result<String, PaymanError>) -> ToolResult {
    match outcome {
        Ok(text) => ToolResult::success(tool, text),
        Err(error) => {
            tracing::warn!(tool, error = %error, "Remote operation failed");
            ToolResult::failure(tool, failure_text(operation, &error))
        }
    }
}

fn failure_text(operation: Operation, error: &PaymanError) -> String {
    match error {
        PaymanError::Rejected { status, body } => {
            format!("Error {} (Status {status}): {body}", operation.gerund())
        }
        PaymanError::MalformedResponse { .. } => {
            format!("Error {}: {error}", operation.gerund())
        }
        PaymanError::Transport(_) | PaymanError::Config(_) => {
            format!("Failed to {}: {error}", operation.infinitive())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payman_client::ErrorBody;

    #[test]
    fn test_success_passthrough() {
        let result = respond("get-balance", Operation::GetBalance, Ok("Current Balance: 1".into()));
        assert!(result.success);
        assert_eq!(result.output, "Current Balance: 1");
    }

    #[test]
    fn test_rejection_text() {
        let error = PaymanError::Rejected {
            status: 422,
            body: ErrorBody::parse(r#"{"message":"invalid routing number"}"#),
        };
        let result = respond("create-payee", Operation::CreatePayee, Err(error));
        assert!(!result.success);
        assert_eq!(
            result.output,
            r#"Error creating payee (Status 422): {"message":"invalid routing number"}"#
        );
    }

    #[test]
    fn test_malformed_text_relays_raw_body() {
        let error = PaymanError::MalformedResponse {
            raw: "<html>oops</html>".into(),
        };
        let result = respond("send-payment", Operation::SendPayment, Err(error));
        assert_eq!(
            result.output,
            "Error sending payment: malformed response body: <html>oops</html>"
        );
    }

    #[test]
    fn test_config_failure_text() {
        let error = PaymanError::Config("bad".into());
        let result = respond("search-payees", Operation::SearchPayees, Err(error));
        assert_eq!(
            result.output,
            "Failed to search payees: Configuration error: bad"
        );
    }

    #[test]
    fn test_require_credential() {
        let mut session = Session::new();
        let rejected = require_credential(&session, "get-balance").unwrap_err();
        assert!(!rejected.success);
        assert_eq!(rejected.output, MISSING_API_KEY);

        session.set_credential("sk_test");
        assert_eq!(
            require_credential(&session, "get-balance").unwrap().expose(),
            "sk_test"
        );
    }
}
