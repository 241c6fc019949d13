//! In-process stand-in for the Payman API.
//!
//! Answers every request with one canned status and body, and records what
//! it was sent so tests can assert on method, path, query, secret and body.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    Router,
    body::to_bytes,
    extract::{Request, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use serde_json::Value;

use payman_client::{API_SECRET_HEADER, PaymanClient};
use payman_core::{Session, ToolCall, ToolRegistry, ToolResponse};

/// One request as seen by the mock
#[derive(Clone, Debug)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub secret: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone)]
pub struct MockApi {
    status: StatusCode,
    body: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockApi {
    /// Start a mock answering `status` / `body`; returns it with a client
    /// pointed at it.
    pub async fn start(status: u16, body: &str) -> (Self, PaymanClient) {
        let mock = Self {
            status: StatusCode::from_u16(status).expect("valid status"),
            body: body.to_string(),
            requests: Arc::new(Mutex::new(Vec::new())),
        };

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock listener");
        let addr = listener.local_addr().expect("mock address");
        let app = Router::new().fallback(record).with_state(mock.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock server");
        });

        (mock, PaymanClient::new(format!("http://{addr}/api")))
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().expect("requests lock").clone()
    }

    pub fn single_request(&self) -> Recorded {
        let requests = self.requests();
        assert_eq!(requests.len(), 1, "expected exactly one request, got {requests:?}");
        requests.into_iter().next().expect("one request")
    }
}

async fn record(State(mock): State<MockApi>, request: Request) -> impl IntoResponse {
    let (parts, body) = request.into_parts();
    let bytes = to_bytes(body, usize::MAX).await.unwrap_or_default();

    mock.requests.lock().expect("requests lock").push(Recorded {
        method: parts.method.to_string(),
        path: parts.uri.path().to_string(),
        query: parts.uri.query().map(str::to_string),
        secret: parts
            .headers
            .get(API_SECRET_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&bytes).ok(),
    });

    (
        mock.status,
        [(header::CONTENT_TYPE, "application/json")],
        mock.body.clone(),
    )
}

/// A registry of every Payman tool plus a fresh session
pub struct Gateway {
    pub registry: ToolRegistry,
    pub session: Session,
}

impl Gateway {
    pub fn new(client: &PaymanClient) -> Self {
        let mut registry = ToolRegistry::new();
        payman_tools::register_tools(&mut registry, client);
        Self {
            registry,
            session: Session::new(),
        }
    }

    pub fn authenticated(client: &PaymanClient, secret: &str) -> Self {
        let mut gateway = Self::new(client);
        gateway.session.set_credential(secret);
        gateway
    }

    /// Run one tool call; panics on schema-level errors
    pub async fn call(&mut self, name: &str, arguments: Value) -> ToolResponse {
        self.try_call(name, arguments)
            .await
            .expect("tool call should pass validation")
    }

    pub async fn try_call(
        &mut self,
        name: &str,
        arguments: Value,
    ) -> payman_core::Result<ToolResponse> {
        let call = ToolCall::from_json(name, Some(arguments));
        let result = self.registry.execute(&mut self.session, &call).await?;
        Ok(result.into_response())
    }
}
