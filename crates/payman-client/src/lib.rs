//! # payman-client
//!
//! Thin client for the Payman payments API.
//!
//! ```text
//! ┌──────────────┐  x-payman-api-secret  ┌──────────────────────────────┐
//! │ PaymanClient │──────────────────────▶│ agent.payman.ai/api          │
//! └──────────────┘                       │  POST payments/payees        │
//!        │                               │  POST payments/send-payment  │
//!        ▼                               │  GET  payments/search-payees │
//!   Result<Value, PaymanError>           │  GET  balances/currencies/TSD│
//!                                        └──────────────────────────────┘
//! ```
//!
//! Every call resolves to either the parsed JSON body or a [`PaymanError`]
//! saying why not: the service rejected it, answered with something that is
//! not JSON, or could not be reached.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use payman_client::{PaymanClient, PayeeSearch};
//!
//! let client = PaymanClient::production();
//! let payees = client
//!     .search_payees("sk_test_xxx", &PayeeSearch { name: Some("Bob".into()), ..Default::default() })
//!     .await?;
//! ```

mod client;
mod error;
pub mod model;

pub use client::{API_SECRET_HEADER, DEFAULT_BASE_URL, PaymanClient};
pub use error::{ErrorBody, PaymanError, Result};
pub use model::{
    AccountHolderType, AccountType, ContactDetails, CryptoAddressPayee, PayeeRequest, PayeeSearch,
    PaymentRequest, PostalAddress, TestRailsPayee, UsAchPayee,
};
