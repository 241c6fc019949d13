//! # payman-tools
//!
//! The Payman payment operations, one [`Tool`](payman_core::Tool) each.
//!
//! | tool                  | remote call                      |
//! |-----------------------|----------------------------------|
//! | `set-api-key`         | none (stores the credential)     |
//! | `create-payee`        | `POST payments/payees`           |
//! | `create-us-ach-payee` | `POST payments/payees`           |
//! | `create-crypto-payee` | `POST payments/payees`           |
//! | `send-payment`        | `POST payments/send-payment`     |
//! | `search-payees`       | `GET payments/search-payees`     |
//! | `get-balance`         | `GET balances/currencies/TSD`    |
//!
//! Every tool except `set-api-key` refuses to run, without touching the
//! network, until the session holds a non-empty credential. Remote failures
//! come back as error-flagged results, never as `Err`.

pub mod svckit;

use payman_client::PaymanClient;
use payman_core::ToolRegistry;

/// Re-export tools for easy registration
pub mod tools {
    pub use crate::svckit::{
        CreateCryptoPayeeTool, CreatePayeeTool, CreateUsAchPayeeTool, GetBalanceTool,
        SearchPayeesTool, SendPaymentTool, SetApiKeyTool,
    };
}

/// Register every Payman tool, all sharing `client`
pub fn register_tools(registry: &mut ToolRegistry, client: &PaymanClient) {
    use tools::*;

    registry.register(SetApiKeyTool);
    registry.register(CreatePayeeTool::new(client.clone()));
    registry.register(CreateUsAchPayeeTool::new(client.clone()));
    registry.register(CreateCryptoPayeeTool::new(client.clone()));
    registry.register(SendPaymentTool::new(client.clone()));
    registry.register(SearchPayeesTool::new(client.clone()));
    registry.register(GetBalanceTool::new(client.clone()));
}
