//! API client (component E): session lifecycle plus the five entity
//! fetchers, built on the transport, JSON reader, and entity parsers.
//! Grounded on `ArmZabbixAPI::openSession` and `queryTrigger`/`queryItem`/
//! `queryHost`/`queryApplication`/`queryEvent` in shape, and on the
//! teacher's `upstream/manager.rs` for the "one client per upstream,
//! lazily-held auth token" structure.

use serde_json::{json, Value};

use crate::entities;
use crate::error::{AuthError, FetchError};
use crate::ir::Table;
use crate::jsonreader::JsonReader;
use crate::transport::{CallError, LoginError, Transport};

impl From<CallError> for FetchError {
    fn from(e: CallError) -> Self {
        match e {
            CallError::Transport(t) => FetchError::Transport(t),
            CallError::Protocol(p) => FetchError::Protocol(p),
        }
    }
}

impl From<LoginError> for FetchError {
    fn from(e: LoginError) -> Self {
        match e {
            LoginError::Transport(t) => FetchError::Transport(t),
            LoginError::Auth(a) => FetchError::Auth(a),
        }
    }
}

pub struct ZabbixClient {
    transport: Transport,
    user: String,
    password: String,
    auth_token: Option<String>,
}

impl ZabbixClient {
    pub fn new(transport: Transport, user: impl Into<String>, password: impl Into<String>) -> Self {
        Self { transport, user: user.into(), password: password.into(), auth_token: None }
    }

    /// Logs in and stores the returned auth token for subsequent calls.
    pub async fn open_session(&mut self) -> Result<(), FetchError> {
        let token = self.transport.login(&self.user, &self.password).await?;
        self.auth_token = Some(token);
        Ok(())
    }

    fn auth_token(&self) -> Result<&str, FetchError> {
        self.auth_token.as_deref().ok_or_else(|| FetchError::Auth(AuthError("no active session".to_string())))
    }

    async fn fetch_table(&self, method: &str, params: Value, parse: impl Fn(&mut JsonReader) -> Result<Table, crate::error::ParseError>) -> Result<Table, FetchError> {
        let auth = self.auth_token()?.to_string();
        let body = self.transport.call(method, params, Some(&auth)).await?;
        let envelope = json!({"result": body});
        let mut reader = JsonReader::new(&envelope);
        reader.enter_object("result")?;
        let table = parse(&mut reader)?;
        reader.leave_object();
        Ok(table)
    }

    pub async fn get_triggers(&self, since: i64) -> Result<Table, FetchError> {
        let params = json!({"output": "extend", "lastChangeSince": since, "selectHosts": "refer"});
        self.fetch_table("trigger.get", params, entities::parse_triggers).await
    }

    pub async fn get_items(&self) -> Result<Table, FetchError> {
        let params = json!({"output": "extend", "selectApplications": "refer"});
        self.fetch_table("item.get", params, entities::parse_items).await
    }

    pub async fn get_hosts(&self) -> Result<Table, FetchError> {
        let params = json!({"output": "extend"});
        self.fetch_table("host.get", params, entities::parse_hosts).await
    }

    pub async fn get_applications(&self) -> Result<Table, FetchError> {
        let params = json!({"output": "extend"});
        self.fetch_table("application.get", params, entities::parse_applications).await
    }

    pub async fn get_events(&self, from_id: u64) -> Result<Table, FetchError> {
        let params = json!({"output": "extend", "eventid_from": from_id.to_string()});
        self.fetch_table("event.get", params, entities::parse_events).await
    }
}
