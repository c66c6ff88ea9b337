//! Incremental update layer contracts (component F, collaborator half):
//! the `RawCache` and `NormalizedStore` traits every poller cycle drives,
//! plus the pure projection functions from raw tables to normalized
//! records. Grounded on the teacher's `cache/store.rs` for the
//! "async trait behind a shared handle" shape, generalized from a TTL
//! response cache to an incremental offset cache — no TTL concept
//! survives here, since raw rows are retained until superseded, not aged
//! out.

use crate::error::StoreError;
use crate::ir::{ItemId, Table};

/// One row of the normalized trigger snapshot exposed per source.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTrigger {
    pub trigger_id: u64,
    pub description: String,
    pub status: i32,
    pub value: i32,
    pub priority: i32,
    pub last_change: i32,
    pub host_id: Option<u64>,
}

/// One row appended to the normalized event log.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedEvent {
    pub source_id: String,
    pub event_id: u64,
    pub object_id: u64,
    pub clock: i32,
    pub value: i32,
}

/// One row upserted into the normalized item table.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedItem {
    pub source_id: String,
    pub item_id: u64,
    pub host_id: u64,
    pub key: String,
    pub last_value: String,
    pub last_clock: i32,
}

/// Per-source raw storage: the last-seen offsets plus the most recent
/// fetch of every entity, keyed implicitly by whichever source the
/// concrete implementation is scoped to.
#[allow(async_fn_in_trait)]
pub trait RawCache {
    async fn get_trigger_last_change(&self) -> Option<i32>;
    async fn get_last_event_id(&self) -> Option<u64>;
    async fn put_triggers(&self, table: Table) -> Result<(), StoreError>;
    async fn put_items(&self, table: Table) -> Result<(), StoreError>;
    async fn put_hosts(&self, table: Table) -> Result<(), StoreError>;
    async fn put_applications(&self, table: Table) -> Result<(), StoreError>;
    async fn put_events(&self, table: Table) -> Result<(), StoreError>;
    async fn read_triggers_as_normalized(&self) -> Result<Vec<NormalizedTrigger>, StoreError>;
}

/// The cross-source normalized store every worker writes into.
#[allow(async_fn_in_trait)]
pub trait NormalizedStore {
    async fn set_trigger_list(&self, list: Vec<NormalizedTrigger>, source_id: &str) -> Result<(), StoreError>;
    async fn add_event_list(&self, list: Vec<NormalizedEvent>) -> Result<(), StoreError>;
    async fn add_item_list(&self, list: Vec<NormalizedItem>) -> Result<(), StoreError>;
}

/// Pure projection: every event row, tagged with `source_id`. Does not
/// consult or mutate any store.
pub fn transform_events_to_normalized(table: &Table, source_id: &str) -> Vec<NormalizedEvent> {
    table
        .iter()
        .filter_map(|group| {
            let event_id = group.get(ItemId::EventsEventId)?.as_uint64()?;
            let object_id = group.get(ItemId::EventsObjectId)?.as_uint64()?;
            let clock = group.get(ItemId::EventsClock)?.as_i32()?;
            let value = group.get(ItemId::EventsValue)?.as_i32()?;
            Some(NormalizedEvent { source_id: source_id.to_string(), event_id, object_id, clock, value })
        })
        .collect()
}

/// Pure projection: every item row, tagged with `source_id`.
pub fn transform_items_to_normalized(table: &Table, source_id: &str) -> Vec<NormalizedItem> {
    table
        .iter()
        .filter_map(|group| {
            let item_id = group.get(ItemId::ItemsItemId)?.as_uint64()?;
            let host_id = group.get(ItemId::ItemsHostId)?.as_uint64()?;
            let key = group.get(ItemId::ItemsKey)?.as_str()?.to_string();
            let last_value = group.get(ItemId::ItemsLastValue)?.as_str()?.to_string();
            let last_clock = group.get(ItemId::ItemsLastClock)?.as_i32()?;
            Some(NormalizedItem { source_id: source_id.to_string(), item_id, host_id, key, last_value, last_clock })
        })
        .collect()
}

pub mod memory;
