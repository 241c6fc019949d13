//! Request Models
//!
//! Typed views of what the gateway forwards. Field names serialize exactly as
//! the caller supplied them (camelCase), and absent optional fields are left
//! out of the body rather than sent as `null`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

/// Payee type used when the caller does not pick one
pub const DEFAULT_PAYEE_TYPE: &str = "TEST_RAILS";

/// Wire discriminant of bank-account payees
pub const US_ACH_PAYEE_TYPE: &str = "US_ACH";

/// Wire discriminant of crypto-address payees
pub const CRYPTO_ADDRESS_PAYEE_TYPE: &str = "CRYPTO_ADDRESS";

/// Currency whose balance `get_balance` reports
pub const BALANCE_CURRENCY: &str = "TSD";

fn default_payee_type() -> String {
    DEFAULT_PAYEE_TYPE.to_string()
}

/// Payee on test rails (or any caller-chosen rails type)
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestRailsPayee {
    #[serde(rename = "type", default = "default_payee_type")]
    pub payee_type: String,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountType {
    Checking,
    Savings,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountHolderType {
    Individual,
    Business,
}

/// Postal address inside [`ContactDetails`]
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostalAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<PostalAddress>,
}

/// US bank-account payee
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsAchPayee {
    pub name: String,
    pub account_type: AccountType,
    pub account_number: String,
    pub routing_number: String,
    pub account_holder_name: String,
    pub account_holder_type: AccountHolderType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_details: Option<ContactDetails>,
}

/// Crypto-address payee
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CryptoAddressPayee {
    pub name: String,
    pub address: String,
    pub chain: String,
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_details: Option<ContactDetails>,
}

/// One create-payee instruction. Each variant has its own required fields.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PayeeRequest {
    TestRails(TestRailsPayee),
    UsAch(UsAchPayee),
    CryptoAddress(CryptoAddressPayee),
}

impl PayeeRequest {
    /// The `type` discriminant sent to the service
    pub fn payee_type(&self) -> &str {
        match self {
            PayeeRequest::TestRails(p) => p.payee_type.as_str(),
            PayeeRequest::UsAch(_) => US_ACH_PAYEE_TYPE,
            PayeeRequest::CryptoAddress(_) => CRYPTO_ADDRESS_PAYEE_TYPE,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            PayeeRequest::TestRails(p) => p.name.as_str(),
            PayeeRequest::UsAch(p) => p.name.as_str(),
            PayeeRequest::CryptoAddress(p) => p.name.as_str(),
        }
    }

    /// JSON body for the create-payee call
    pub fn to_body(&self) -> serde_json::Result<Value> {
        let mut body = match self {
            PayeeRequest::TestRails(p) => serde_json::to_value(p)?,
            PayeeRequest::UsAch(p) => serde_json::to_value(p)?,
            PayeeRequest::CryptoAddress(p) => serde_json::to_value(p)?,
        };
        if let Value::Object(fields) = &mut body {
            fields.insert("type".into(), Value::String(self.payee_type().to_string()));
        }
        Ok(body)
    }
}

/// A send-payment instruction
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub payee_id: String,

    /// Forwarded exactly as received
    pub amount_decimal: Number,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memo: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

/// Optional criteria for searching payees
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PayeeSearch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_tax_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub routing_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crypto_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crypto_chain: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub crypto_currency: Option<String>,
}

impl PayeeSearch {
    /// Present criteria as `(key, value)` pairs, in declaration order
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        [
            ("name", &self.name),
            ("contactEmail", &self.contact_email),
            ("contactPhoneNumber", &self.contact_phone_number),
            ("contactTaxId", &self.contact_tax_id),
            ("accountNumber", &self.account_number),
            ("routingNumber", &self.routing_number),
            ("agentReference", &self.agent_reference),
            ("cryptoAddress", &self.crypto_address),
            ("cryptoChain", &self.crypto_chain),
            ("cryptoCurrency", &self.crypto_currency),
        ]
        .into_iter()
        .filter_map(|(key, value)| value.as_deref().map(|v| (key, v)))
        .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs().is_empty()
    }

    /// `?k=v&k=v` with every key and value percent-encoded, or `""` when no
    /// criteria are set.
    pub fn query_string(&self) -> String {
        let pairs = self.pairs();
        if pairs.is_empty() {
            return String::new();
        }

        let encoded: Vec<String> = pairs
            .into_iter()
            .map(|(key, value)| {
                format!("{}={}", urlencoding::encode(key), urlencoding::encode(value))
            })
            .collect();
        format!("?{}", encoded.join("&"))
    }

    /// Human-readable summary of the applied filter
    pub fn describe(&self) -> String {
        let pairs = self.pairs();
        if pairs.is_empty() {
            return "no filters applied".to_string();
        }

        let criteria: Vec<String> = pairs.into_iter().map(|(k, v)| format!("{k}={v}")).collect();
        format!("filtered by {}", criteria.join(", "))
    }
}
