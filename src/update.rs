//! The incremental update sequence (component F, orchestration half):
//! the ten-step cycle body the poller engine drives once per iteration.
//! Generic over `RawCache`/`NormalizedStore` implementations — no
//! `dyn`/`async-trait` needed since the concrete types are known at the
//! poller's construction site.

use crate::client::ZabbixClient;
use crate::error::FetchError;
use crate::store::{transform_events_to_normalized, transform_items_to_normalized, NormalizedStore, RawCache};

/// Runs steps 1-10 of the update sequence against `client`, `raw`, and
/// `norm`. Returns as soon as any step fails; earlier `put_*` calls are
/// not rolled back — the next cycle's re-fetch reconciles the raw cache,
/// per the ordering rationale: raw writes before normalized projection.
pub async fn run_updates(client: &ZabbixClient, raw: &impl RawCache, norm: &impl NormalizedStore, source_id: &str) -> Result<(), FetchError> {
    let since = raw.get_trigger_last_change().await.unwrap_or(0);
    let triggers = client.get_triggers(since as i64).await?;
    raw.put_triggers(triggers).await?;

    let items = client.get_items().await?;
    raw.put_items(items.clone()).await?;

    let hosts = client.get_hosts().await?;
    raw.put_hosts(hosts).await?;

    let applications = client.get_applications().await?;
    raw.put_applications(applications).await?;

    let trigger_list = raw.read_triggers_as_normalized().await?;
    norm.set_trigger_list(trigger_list, source_id).await?;

    let from_id = raw.get_last_event_id().await.map(|id| id + 1).unwrap_or(0);
    let events = client.get_events(from_id).await?;
    raw.put_events(events.clone()).await?;

    norm.add_event_list(transform_events_to_normalized(&events, source_id)).await?;
    norm.add_item_list(transform_items_to_normalized(&items, source_id)).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::{MemoryNormalizedStore, MemoryRawCache};
    use crate::transport::Transport;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_method(server: &MockServer, rpc_method: &str, result: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path("/api_jsonrpc.php"))
            .and(body_partial_json(json!({"method": rpc_method})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"jsonrpc": "2.0", "result": result, "id": 1})))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn full_cycle_populates_raw_and_normalized_stores() {
        let server = MockServer::start().await;
        mock_method(&server, "user.login", json!("tok-1")).await;
        mock_method(&server, "trigger.get", json!([])).await;
        mock_method(&server, "item.get", json!([])).await;
        mock_method(&server, "host.get", json!([])).await;
        mock_method(&server, "application.get", json!([])).await;
        mock_method(&server, "event.get", json!([])).await;

        let transport = Transport::new(reqwest::Client::new(), format!("{}/api_jsonrpc.php", server.uri()));
        let mut client = ZabbixClient::new(transport, "admin", "zabbix");
        client.open_session().await.unwrap();

        let raw = MemoryRawCache::new();
        let norm = MemoryNormalizedStore::new();

        run_updates(&client, &raw, &norm, "source-1").await.unwrap();

        assert_eq!(norm.trigger_list("source-1").await.len(), 0);
        assert_eq!(norm.event_count().await, 0);
        assert_eq!(norm.item_count().await, 0);
    }

    #[tokio::test]
    async fn a_failing_step_aborts_the_cycle_without_panicking() {
        let server = MockServer::start().await;
        mock_method(&server, "user.login", json!("tok-1")).await;
        // trigger.get is left unmocked -> 404 -> TransportError

        let transport = Transport::new(reqwest::Client::new(), format!("{}/api_jsonrpc.php", server.uri()));
        let mut client = ZabbixClient::new(transport, "admin", "zabbix");
        client.open_session().await.unwrap();

        let raw = MemoryRawCache::new();
        let norm = MemoryNormalizedStore::new();

        let result = run_updates(&client, &raw, &norm, "source-1").await;
        assert!(result.is_err());
    }
}
