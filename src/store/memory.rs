//! In-memory reference implementations of [`RawCache`] and
//! [`NormalizedStore`], sufficient for tests and single-process
//! deployments. Grounded on the teacher's `upstream/backend.rs` use of
//! `Arc<RwLock<..>>` for per-entity shared state guarded independently.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::ir::{Group, ItemId, Table};
use crate::store::{NormalizedEvent, NormalizedItem, NormalizedStore, NormalizedTrigger, RawCache};

#[derive(Default)]
struct RawState {
    // Keyed by (triggerid)/(eventid) and merged on every `put_*` rather than
    // replaced outright: §4.5 requires `put_triggers` to upsert, and both
    // offsets (`lastchange` max, `eventid` max) are read back from whatever
    // is currently stored, so a cycle with an empty delta must not erase
    // rows or offsets a prior cycle already persisted.
    triggers: HashMap<u64, Group>,
    events: HashMap<u64, Group>,
    items: Option<Table>,
    hosts: Option<Table>,
    applications: Option<Table>,
}

/// Raw storage scoped to a single source; construct one per poller.
#[derive(Clone, Default)]
pub struct MemoryRawCache {
    state: Arc<RwLock<RawState>>,
}

impl MemoryRawCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RawCache for MemoryRawCache {
    async fn get_trigger_last_change(&self) -> Option<i32> {
        let state = self.state.read().await;
        state.triggers.values().filter_map(|g| g.get(ItemId::TriggersLastChange).and_then(|c| c.as_i32())).max()
    }

    async fn get_last_event_id(&self) -> Option<u64> {
        let state = self.state.read().await;
        state.events.values().filter_map(|g| g.get(ItemId::EventsEventId).and_then(|c| c.as_uint64())).max()
    }

    async fn put_triggers(&self, table: Table) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        for group in table.iter() {
            let trigger_id = group
                .get(ItemId::TriggersTriggerId)
                .and_then(|c| c.as_uint64())
                .ok_or_else(|| StoreError("trigger row missing triggerid".to_string()))?;
            state.triggers.insert(trigger_id, group.clone());
        }
        Ok(())
    }

    async fn put_items(&self, table: Table) -> Result<(), StoreError> {
        self.state.write().await.items = Some(table);
        Ok(())
    }

    async fn put_hosts(&self, table: Table) -> Result<(), StoreError> {
        self.state.write().await.hosts = Some(table);
        Ok(())
    }

    async fn put_applications(&self, table: Table) -> Result<(), StoreError> {
        self.state.write().await.applications = Some(table);
        Ok(())
    }

    async fn put_events(&self, table: Table) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        for group in table.iter() {
            let event_id = group
                .get(ItemId::EventsEventId)
                .and_then(|c| c.as_uint64())
                .ok_or_else(|| StoreError("event row missing eventid".to_string()))?;
            state.events.insert(event_id, group.clone());
        }
        Ok(())
    }

    async fn read_triggers_as_normalized(&self) -> Result<Vec<NormalizedTrigger>, StoreError> {
        let state = self.state.read().await;
        let mut out = Vec::with_capacity(state.triggers.len());
        for group in state.triggers.values() {
            let trigger_id = group
                .get(ItemId::TriggersTriggerId)
                .and_then(|c| c.as_uint64())
                .ok_or_else(|| StoreError("trigger row missing triggerid".to_string()))?;
            let description = group.get(ItemId::TriggersDescription).and_then(|c| c.as_str()).unwrap_or_default().to_string();
            let status = group.get(ItemId::TriggersStatus).and_then(|c| c.as_i32()).unwrap_or_default();
            let value = group.get(ItemId::TriggersValue).and_then(|c| c.as_i32()).unwrap_or_default();
            let priority = group.get(ItemId::TriggersPriority).and_then(|c| c.as_i32()).unwrap_or_default();
            let last_change = group.get(ItemId::TriggersLastChange).and_then(|c| c.as_i32()).unwrap_or_default();
            let host_id = group.get(ItemId::TriggersHostId).filter(|c| !c.is_null()).and_then(|c| c.as_uint64());
            out.push(NormalizedTrigger { trigger_id, description, status, value, priority, last_change, host_id });
        }
        Ok(out)
    }
}

#[derive(Default)]
struct NormalizedState {
    trigger_lists: HashMap<String, Vec<NormalizedTrigger>>,
    events_seen: HashSet<(String, u64)>,
    events: Vec<NormalizedEvent>,
    items: HashMap<(String, u64), NormalizedItem>,
}

/// Normalized storage shared across every source's worker.
#[derive(Clone, Default)]
pub struct MemoryNormalizedStore {
    state: Arc<RwLock<NormalizedState>>,
}

impl MemoryNormalizedStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn trigger_list(&self, source_id: &str) -> Vec<NormalizedTrigger> {
        self.state.read().await.trigger_lists.get(source_id).cloned().unwrap_or_default()
    }

    pub async fn event_count(&self) -> usize {
        self.state.read().await.events.len()
    }

    pub async fn item_count(&self) -> usize {
        self.state.read().await.items.len()
    }
}

impl NormalizedStore for MemoryNormalizedStore {
    async fn set_trigger_list(&self, list: Vec<NormalizedTrigger>, source_id: &str) -> Result<(), StoreError> {
        self.state.write().await.trigger_lists.insert(source_id.to_string(), list);
        Ok(())
    }

    async fn add_event_list(&self, list: Vec<NormalizedEvent>) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        for event in list {
            let key = (event.source_id.clone(), event.event_id);
            if state.events_seen.insert(key) {
                state.events.push(event);
            }
        }
        Ok(())
    }

    async fn add_item_list(&self, list: Vec<NormalizedItem>) -> Result<(), StoreError> {
        let mut state = self.state.write().await;
        for item in list {
            state.items.insert((item.source_id.clone(), item.item_id), item);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn trigger_row(id: u64, last_change: i32) -> Group {
        let mut g = Group::new();
        g.add_uint64(ItemId::TriggersTriggerId, id);
        g.add_int(ItemId::TriggersLastChange, last_change);
        g
    }

    fn event_row(id: u64) -> Group {
        let mut g = Group::new();
        g.add_uint64(ItemId::EventsEventId, id);
        g
    }

    #[tokio::test]
    async fn trigger_last_change_reflects_maximum_across_rows() {
        let cache = MemoryRawCache::new();
        assert_eq!(cache.get_trigger_last_change().await, None);

        let mut table = Table::new();
        table.append(trigger_row(1, 100));
        table.append(trigger_row(2, 250));
        cache.put_triggers(table).await.unwrap();

        assert_eq!(cache.get_trigger_last_change().await, Some(250));
    }

    #[tokio::test]
    async fn an_empty_trigger_delta_does_not_erase_the_offset_or_prior_rows() {
        let cache = MemoryRawCache::new();

        let mut first = Table::new();
        first.append(trigger_row(1, 100));
        cache.put_triggers(first).await.unwrap();

        // Next cycle's delta is empty (nothing changed upstream).
        cache.put_triggers(Table::new()).await.unwrap();

        assert_eq!(cache.get_trigger_last_change().await, Some(100));
        assert_eq!(cache.read_triggers_as_normalized().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn put_triggers_upserts_by_trigger_id_rather_than_replacing_the_table() {
        let cache = MemoryRawCache::new();

        let mut first = Table::new();
        first.append(trigger_row(1, 100));
        first.append(trigger_row(2, 150));
        cache.put_triggers(first).await.unwrap();

        // Second cycle only reports trigger 1 changing; trigger 2 must survive.
        let mut second = Table::new();
        second.append(trigger_row(1, 200));
        cache.put_triggers(second).await.unwrap();

        let rows = cache.read_triggers_as_normalized().await.unwrap();
        assert_eq!(rows.len(), 2);
        let row1 = rows.iter().find(|r| r.trigger_id == 1).unwrap();
        assert_eq!(row1.last_change, 200);
        assert!(rows.iter().any(|r| r.trigger_id == 2));
        assert_eq!(cache.get_trigger_last_change().await, Some(200));
    }

    #[tokio::test]
    async fn an_empty_event_delta_does_not_erase_the_last_event_id() {
        let cache = MemoryRawCache::new();
        assert_eq!(cache.get_last_event_id().await, None);

        let mut first = Table::new();
        first.append(event_row(5));
        cache.put_events(first).await.unwrap();

        cache.put_events(Table::new()).await.unwrap();

        assert_eq!(cache.get_last_event_id().await, Some(5));
    }

    #[tokio::test]
    async fn event_list_deduplicates_by_source_and_event_id() {
        let store = MemoryNormalizedStore::new();
        let event = NormalizedEvent { source_id: "s1".to_string(), event_id: 1, object_id: 10, clock: 100, value: 1 };
        store.add_event_list(vec![event.clone()]).await.unwrap();
        store.add_event_list(vec![event]).await.unwrap();
        assert_eq!(store.event_count().await, 1);
    }

    #[tokio::test]
    async fn item_list_upserts_by_source_and_item_id() {
        let store = MemoryNormalizedStore::new();
        let mut item = NormalizedItem { source_id: "s1".to_string(), item_id: 5, host_id: 10, key: "k".to_string(), last_value: "1".to_string(), last_clock: 100 };
        store.add_item_list(vec![item.clone()]).await.unwrap();
        item.last_value = "2".to_string();
        item.last_clock = 200;
        store.add_item_list(vec![item]).await.unwrap();
        assert_eq!(store.item_count().await, 1);
    }
}
