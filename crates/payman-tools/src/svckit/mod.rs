//! Service Kit - Gateway Tools
//!
//! Payman operations that implement `payman_core::Tool`.

mod api_key;
mod balance;
pub mod outcome;
mod payees;
mod payments;
mod search;

pub use api_key::SetApiKeyTool;
pub use balance::GetBalanceTool;
pub use payees::{CreateCryptoPayeeTool, CreatePayeeTool, CreateUsAchPayeeTool};
pub use payments::SendPaymentTool;
pub use search::SearchPayeesTool;
