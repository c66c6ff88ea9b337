//! Incident sender (external collaborator, §6.4). Contract only per the
//! core's design, grounded in `IncidentSenderHatohol`'s two-overload
//! `send()` shape; `HttpIncidentSender` is a concrete implementation a
//! deployment can wire in, not something the poller cycle itself calls.

use serde::Serialize;

use crate::store::{NormalizedEvent, NormalizedTrigger};

#[derive(Debug)]
pub struct IncidentSendError(pub String);

impl std::fmt::Display for IncidentSendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "incident send failed: {}", self.0)
    }
}

impl std::error::Error for IncidentSendError {}

#[allow(async_fn_in_trait)]
pub trait IncidentSender {
    async fn send_event(&self, event: &NormalizedEvent) -> Result<(), IncidentSendError>;
    async fn send_incident(&self, incident: &NormalizedTrigger, comment: &str) -> Result<(), IncidentSendError>;
}

#[derive(Serialize)]
struct EventPayload {
    event_id: u64,
    object_id: u64,
    clock: i32,
    value: i32,
}

#[derive(Serialize)]
struct IncidentPayload<'a> {
    trigger_id: u64,
    description: &'a str,
    priority: i32,
    comment: &'a str,
}

/// Posts incidents to a tracker's HTTP endpoint as JSON. A thin,
/// best-effort client: no retry, no batching, mirroring the original's
/// one-shot `send()` calls.
pub struct HttpIncidentSender {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpIncidentSender {
    pub fn new(client: reqwest::Client, endpoint: impl Into<String>) -> Self {
        Self { client, endpoint: endpoint.into() }
    }
}

impl IncidentSender for HttpIncidentSender {
    async fn send_event(&self, event: &NormalizedEvent) -> Result<(), IncidentSendError> {
        let payload = EventPayload { event_id: event.event_id, object_id: event.object_id, clock: event.clock, value: event.value };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| IncidentSendError(e.to_string()))?;
        if !response.status().is_success() {
            return Err(IncidentSendError(format!("tracker returned HTTP {}", response.status())));
        }
        Ok(())
    }

    async fn send_incident(&self, incident: &NormalizedTrigger, comment: &str) -> Result<(), IncidentSendError> {
        let payload = IncidentPayload { trigger_id: incident.trigger_id, description: &incident.description, priority: incident.priority, comment };
        let response = self
            .client
            .post(&self.endpoint)
            .json(&payload)
            .send()
            .await
            .map_err(|e| IncidentSendError(e.to_string()))?;
        if !response.status().is_success() {
            return Err(IncidentSendError(format!("tracker returned HTTP {}", response.status())));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn send_event_succeeds_on_2xx() {
        let server = MockServer::start().await;
        Mock::given(method("POST")).respond_with(ResponseTemplate::new(200)).mount(&server).await;

        let sender = HttpIncidentSender::new(reqwest::Client::new(), server.uri());
        let event = NormalizedEvent { source_id: "s1".to_string(), event_id: 1, object_id: 10, clock: 100, value: 1 };
        sender.send_event(&event).await.unwrap();
    }

    #[tokio::test]
    async fn send_incident_surfaces_non_2xx_as_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST")).respond_with(ResponseTemplate::new(500)).mount(&server).await;

        let sender = HttpIncidentSender::new(reqwest::Client::new(), server.uri());
        let incident = NormalizedTrigger { trigger_id: 1, description: "cpu high".to_string(), status: 0, value: 1, priority: 3, last_change: 100, host_id: Some(10) };
        let err = sender.send_incident(&incident, "ack").await.unwrap_err();
        assert!(err.0.contains("500"));
    }
}
