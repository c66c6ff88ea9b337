//! JSON-RPC transport (component A): issues a single request/response
//! round trip against a Zabbix API endpoint and decodes the envelope.
//! Grounded on the teacher's `jsonrpc/request.rs`/`jsonrpc/response.rs`
//! envelope shapes and `upstream/backend.rs`'s request-issuing style,
//! and on `ArmZabbixAPI::openSession`/`ArmZabbixAPI::queryCommon`
//! for the `application/json-rpc` content type and GET-with-body verb.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AuthError, ProtocolError, TransportError};

#[derive(Debug, Clone, Serialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: &'static str,
    pub method: String,
    pub params: Value,
    pub id: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auth: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcResponse {
    #[serde(default)]
    pub result: Option<Value>,
    #[serde(default)]
    pub error: Option<JsonRpcErrorBody>,
    #[allow(dead_code)]
    pub id: Value,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcErrorBody {
    pub code: i64,
    pub message: String,
    #[serde(default)]
    pub data: Option<String>,
}

/// Which HTTP method carries the JSON-RPC body. The original always used
/// GET-with-body (`SOUP_METHOD_GET`); whether a given upstream accepts
/// that or expects POST is a property of the upstream, not of this
/// client, so the verb is a constructor parameter rather than hardcoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HttpVerb {
    #[default]
    Get,
    Post,
}

/// A single Zabbix API endpoint.
pub struct Transport {
    client: reqwest::Client,
    endpoint: String,
    verb: HttpVerb,
    next_id: std::sync::atomic::AtomicU32,
}

impl Transport {
    /// Defaults to GET-with-body, matching the upstream's historical
    /// contract. Use [`Transport::with_verb`] for a POST-speaking upstream.
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self::with_verb(client, endpoint, HttpVerb::default())
    }

    pub fn with_verb(client: reqwest::Client, endpoint: impl Into<String>, verb: HttpVerb) -> Self {
        Self { client, endpoint: endpoint.into(), verb, next_id: std::sync::atomic::AtomicU32::new(1) }
    }

    fn next_id(&self) -> u32 {
        self.next_id.fetch_add(1, std::sync::atomic::Ordering::Relaxed)
    }

    /// Issues one request and decodes the JSON-RPC envelope, without
    /// interpreting `result`/`error` — shared by [`Transport::call`] and
    /// [`Transport::login`], which each give those fields different
    /// meaning.
    async fn send(&self, method: &str, params: Value, auth: Option<&str>) -> Result<JsonRpcResponse, TransportError> {
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            method: method.to_string(),
            params,
            id: self.next_id(),
            auth: auth.map(str::to_string),
        };

        let body = serde_json::to_vec(&request).map_err(|e| TransportError::Request(e.to_string()))?;

        let request_builder = match self.verb {
            HttpVerb::Get => self.client.get(&self.endpoint),
            HttpVerb::Post => self.client.post(&self.endpoint),
        };

        let response = request_builder
            .header("Content-Type", "application/json-rpc")
            .body(body)
            .send()
            .await
            .map_err(|e| TransportError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TransportError::Http(status.as_u16()));
        }

        let text = response.text().await.map_err(|e| TransportError::BodyRead(e.to_string()))?;
        serde_json::from_str(&text).map_err(|e| TransportError::BodyRead(e.to_string()))
    }

    /// Sends one JSON-RPC call and returns the decoded `result` payload,
    /// or the appropriate error if the transport, HTTP status, or
    /// protocol-level envelope indicates failure.
    pub async fn call(&self, method: &str, params: Value, auth: Option<&str>) -> Result<Value, CallError> {
        let parsed = self.send(method, params, auth).await?;

        if let Some(err) = parsed.error {
            return Err(CallError::Protocol(ProtocolError { code: err.code, message: err.message }));
        }

        parsed.result.ok_or_else(|| CallError::Protocol(ProtocolError { code: 0, message: "response had neither result nor error".to_string() }))
    }

    /// Logs in and returns the auth token. Unlike [`Transport::call`], a
    /// missing/null/non-string `result` here is an [`AuthError`], not a
    /// [`ProtocolError`] — login succeeded at the HTTP level, so the
    /// failure is in authentication, not the transport (spec §4.1/§7).
    pub async fn login(&self, user: &str, password: &str) -> Result<String, LoginError> {
        let params = serde_json::json!({"user": user, "password": password});
        let parsed = self.send("user.login", params, None).await?;

        if let Some(err) = parsed.error {
            return Err(LoginError::Auth(AuthError(format!("login rejected: {} (code {})", err.message, err.code))));
        }

        match parsed.result {
            Some(Value::String(token)) => Ok(token),
            Some(other) => Err(LoginError::Auth(AuthError(format!("login result was not a string: {other}")))),
            None => Err(LoginError::Auth(AuthError("login result absent".to_string()))),
        }
    }
}

/// Errors [`Transport::login`] can raise: a transport failure, or a
/// successful HTTP round trip that did not yield a usable auth token.
#[derive(Debug)]
pub enum LoginError {
    Transport(TransportError),
    Auth(AuthError),
}

impl From<TransportError> for LoginError {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

impl std::fmt::Display for LoginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "{e}"),
            Self::Auth(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for LoginError {}

#[derive(Debug)]
pub enum CallError {
    Transport(TransportError),
    Protocol(ProtocolError),
}

impl From<TransportError> for CallError {
    fn from(e: TransportError) -> Self {
        Self::Transport(e)
    }
}

impl std::fmt::Display for CallError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(e) => write!(f, "{e}"),
            Self::Protocol(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for CallError {}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn call_decodes_result_payload() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api_jsonrpc.php"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "jsonrpc": "2.0",
                "result": {"auth": "abc123"},
                "id": 1,
            })))
            .mount(&server)
            .await;

        let transport = Transport::new(reqwest::Client::new(), format!("{}/api_jsonrpc.php", server.uri()));
        let result = transport.call("user.login", serde_json::json!({}), None).await.unwrap();
        assert_eq!(result["auth"], "abc123");
    }

    #[tokio::test]
    async fn call_surfaces_protocol_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api_jsonrpc.php"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "jsonrpc": "2.0",
                "error": {"code": -32602, "message": "Invalid params"},
                "id": 1,
            })))
            .mount(&server)
            .await;

        let transport = Transport::new(reqwest::Client::new(), format!("{}/api_jsonrpc.php", server.uri()));
        let err = transport.call("trigger.get", serde_json::json!({}), Some("abc")).await.unwrap_err();
        assert!(matches!(err, CallError::Protocol(ProtocolError { code: -32602, .. })));
    }

    #[tokio::test]
    async fn call_surfaces_http_errors() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api_jsonrpc.php"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let transport = Transport::new(reqwest::Client::new(), format!("{}/api_jsonrpc.php", server.uri()));
        let err = transport.call("trigger.get", serde_json::json!({}), None).await.unwrap_err();
        assert!(matches!(err, CallError::Transport(TransportError::Http(500))));
    }

    #[tokio::test]
    async fn login_decodes_a_string_result_as_the_auth_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api_jsonrpc.php"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"jsonrpc": "2.0", "result": "tok-1", "id": 1})))
            .mount(&server)
            .await;

        let transport = Transport::new(reqwest::Client::new(), format!("{}/api_jsonrpc.php", server.uri()));
        let token = transport.login("admin", "zabbix").await.unwrap();
        assert_eq!(token, "tok-1");
    }

    /// S3: a login response of `{result: null}` is an auth failure, not a
    /// protocol error — HTTP succeeded, the credentials did not.
    #[tokio::test]
    async fn login_rejects_a_null_result_as_an_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api_jsonrpc.php"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"jsonrpc": "2.0", "result": null, "id": 1})))
            .mount(&server)
            .await;

        let transport = Transport::new(reqwest::Client::new(), format!("{}/api_jsonrpc.php", server.uri()));
        let err = transport.login("admin", "zabbix").await.unwrap_err();
        assert!(matches!(err, LoginError::Auth(_)));
    }

    #[tokio::test]
    async fn login_rejects_a_non_string_result_as_an_auth_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api_jsonrpc.php"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"jsonrpc": "2.0", "result": 5, "id": 1})))
            .mount(&server)
            .await;

        let transport = Transport::new(reqwest::Client::new(), format!("{}/api_jsonrpc.php", server.uri()));
        let err = transport.login("admin", "zabbix").await.unwrap_err();
        assert!(matches!(err, LoginError::Auth(_)));
    }
}
