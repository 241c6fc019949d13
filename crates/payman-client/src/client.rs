//! Payman API Client
//!
//! One method per remote operation. Each issues exactly one HTTP call and
//! classifies the outcome; nothing is retried or cached.

use reqwest::{Client, RequestBuilder, header::CONTENT_TYPE};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ErrorBody, PaymanError, Result};
use crate::model::{BALANCE_CURRENCY, PayeeRequest, PayeeSearch, PaymentRequest};

/// Production API root
pub const DEFAULT_BASE_URL: &str = "https://agent.payman.ai/api";

/// Header carrying the API secret
pub const API_SECRET_HEADER: &str = "x-payman-api-secret";

/// Payman HTTP client
#[derive(Clone, Debug)]
pub struct PaymanClient {
    http: Client,
    base_url: String,
}

impl Default for PaymanClient {
    fn default() -> Self {
        Self::production()
    }
}

impl PaymanClient {
    /// Client against a custom API root (trailing `/` is ignored)
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    /// Client against the production API
    pub fn production() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }

    /// Client with a validated base URL
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let parsed = url::Url::parse(base_url)
            .map_err(|e| PaymanError::Config(format!("invalid base URL '{base_url}': {e}")))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(PaymanError::Config(format!(
                "base URL must use http or https, got '{}'",
                parsed.scheme()
            )));
        }
        Ok(Self::new(base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /payments/payees`
    pub async fn create_payee(&self, secret: &str, payee: &PayeeRequest) -> Result<Value> {
        let body = payee
            .to_body()
            .map_err(|e| PaymanError::Config(format!("unserializable payee: {e}")))?;
        debug!(payee_type = payee.payee_type(), name = payee.name(), "Creating payee");

        let request = self
            .http
            .post(format!("{}/payments/payees", self.base_url))
            .json(&body);
        self.send(secret, request).await
    }

    /// `POST /payments/send-payment`
    pub async fn send_payment(&self, secret: &str, payment: &PaymentRequest) -> Result<Value> {
        debug!(payee_id = %payment.payee_id, amount = %payment.amount_decimal, "Sending payment");

        let request = self
            .http
            .post(format!("{}/payments/send-payment", self.base_url))
            .json(payment);
        self.send(secret, request).await
    }

    /// `GET /payments/search-payees[?query]`
    pub async fn search_payees(&self, secret: &str, search: &PayeeSearch) -> Result<Value> {
        let url = format!(
            "{}/payments/search-payees{}",
            self.base_url,
            search.query_string()
        );
        debug!(filter = %search.describe(), "Searching payees");

        let request = self.http.get(url).header(CONTENT_TYPE, "application/json");
        self.send(secret, request).await
    }

    /// `GET /balances/currencies/TSD`
    pub async fn get_balance(&self, secret: &str) -> Result<Value> {
        let url = format!("{}/balances/currencies/{BALANCE_CURRENCY}", self.base_url);
        debug!(currency = BALANCE_CURRENCY, "Fetching balance");

        let request = self.http.get(url).header(CONTENT_TYPE, "application/json");
        self.send(secret, request).await
    }

    /// Attach the secret, send, and classify the response
    async fn send(&self, secret: &str, request: RequestBuilder) -> Result<Value> {
        let response = request.header(API_SECRET_HEADER, secret).send().await?;
        let status = response.status();
        let raw = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "Payman API rejected request");
            return Err(PaymanError::Rejected {
                status: status.as_u16(),
                body: ErrorBody::parse(&raw),
            });
        }

        serde_json::from_str(&raw).map_err(|e| {
            warn!(error = %e, "Payman API returned a non-JSON body");
            PaymanError::MalformedResponse { raw }
        })
    }
}
