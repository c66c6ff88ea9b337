//! The tabular intermediate representation (component C): typed rows
//! (`Group`) grouped into `Table`s, with nullable cells identified by a
//! stable `ItemId` column name. A value type — a `Table` is owned by the
//! call that produced it and consumed within the same cycle.

use std::fmt;

/// A compile-time constant naming a logical column in the IR, stable
/// across releases. One flat enum covers every entity's schema; the
/// entity prefix in each variant name mirrors the upstream's own
/// `ZBX_<ENTITY>_<FIELD>` naming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[allow(non_camel_case_types)]
pub enum ItemId {
    TriggersTriggerId,
    TriggersExpression,
    TriggersDescription,
    TriggersUrl,
    TriggersStatus,
    TriggersValue,
    TriggersPriority,
    TriggersLastChange,
    TriggersComments,
    TriggersError,
    TriggersTemplateId,
    TriggersType,
    TriggersValueFlags,
    TriggersFlags,
    TriggersHostId,

    ItemsItemId,
    ItemsType,
    ItemsSnmpCommunity,
    ItemsSnmpOid,
    ItemsHostId,
    ItemsName,
    ItemsKey,
    ItemsDelay,
    ItemsHistory,
    ItemsTrends,
    ItemsLastValue,
    ItemsLastClock,
    ItemsPrevValue,
    ItemsStatus,
    ItemsValueType,
    ItemsTrapperHosts,
    ItemsUnits,
    ItemsMultiplier,
    ItemsDelta,
    ItemsPrevOrgValue,
    ItemsSnmpv3SecurityName,
    ItemsSnmpv3SecurityLevel,
    ItemsSnmpv3AuthPassphrase,
    ItemsSnmpv3PrivPassphrase,
    ItemsFormula,
    ItemsError,
    ItemsLastLogSize,
    ItemsLogTimeFmt,
    ItemsTemplateId,
    ItemsValueMapId,
    ItemsDelayFlex,
    ItemsParams,
    ItemsIpmiSensor,
    ItemsDataType,
    ItemsAuthType,
    ItemsUsername,
    ItemsPassword,
    ItemsPublicKey,
    ItemsPrivateKey,
    ItemsMtime,
    ItemsLastNs,
    ItemsFlags,
    ItemsFilter,
    ItemsInterfaceId,
    ItemsPort,
    ItemsDescription,
    ItemsInventoryLink,
    ItemsLifetime,
    ItemsApplicationId,

    HostsHostId,
    HostsProxyHostId,
    HostsHost,
    HostsStatus,
    HostsDisableUntil,
    HostsError,
    HostsAvailable,
    HostsErrorsFrom,
    HostsLastAccess,
    HostsIpmiAuthType,
    HostsIpmiPrivilege,
    HostsIpmiUsername,
    HostsIpmiPassword,
    HostsIpmiDisableUntil,
    HostsIpmiAvailable,
    HostsSnmpDisableUntil,
    HostsSnmpAvailable,
    HostsMaintenanceId,
    HostsMaintenanceStatus,
    HostsMaintenanceType,
    HostsMaintenanceFrom,
    HostsIpmiErrorsFrom,
    HostsSnmpErrorsFrom,
    HostsIpmiError,
    HostsSnmpError,
    HostsJmxDisableUntil,
    HostsJmxAvailable,
    HostsJmxErrorsFrom,
    HostsJmxError,
    HostsName,

    ApplicationsApplicationId,
    ApplicationsHostId,
    ApplicationsName,
    ApplicationsTemplateId,

    EventsEventId,
    EventsSource,
    EventsObject,
    EventsObjectId,
    EventsClock,
    EventsValue,
    EventsAcknowledged,
    EventsNs,
    EventsValueChanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Int32,
    Uint64,
    String,
}

#[derive(Debug, Clone, PartialEq)]
enum CellValue {
    Int32(i32),
    Uint64(u64),
    String(String),
}

/// A tagged, possibly-null cell value. A null cell still carries a
/// type-appropriate zero value; callers must check [`Cell::is_null`]
/// before trusting [`Cell::as_i32`]/[`Cell::as_uint64`]/[`Cell::as_str`].
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    value: CellValue,
    null: bool,
}

impl Cell {
    fn new(value: CellValue, null: bool) -> Self {
        Self { value, null }
    }

    pub fn is_null(&self) -> bool {
        self.null
    }

    pub fn kind(&self) -> CellKind {
        match self.value {
            CellValue::Int32(_) => CellKind::Int32,
            CellValue::Uint64(_) => CellKind::Uint64,
            CellValue::String(_) => CellKind::String,
        }
    }

    pub fn as_i32(&self) -> Option<i32> {
        match &self.value {
            CellValue::Int32(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_uint64(&self) -> Option<u64> {
        match &self.value {
            CellValue::Uint64(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match &self.value {
            CellValue::String(v) => Some(v.as_str()),
            _ => None,
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.null {
            return write!(f, "NULL");
        }
        match &self.value {
            CellValue::Int32(v) => write!(f, "{v}"),
            CellValue::Uint64(v) => write!(f, "{v}"),
            CellValue::String(v) => write!(f, "{v}"),
        }
    }
}

fn zero_value(kind: CellKind) -> CellValue {
    match kind {
        CellKind::Int32 => CellValue::Int32(0),
        CellKind::Uint64 => CellValue::Uint64(0),
        CellKind::String => CellValue::String(String::new()),
    }
}

/// An ordered sequence of cells, each identified by a unique `ItemId`.
/// Insertion order defines iteration order but carries no semantics of
/// its own; lookup by `ItemId` is O(k) over the (small, fixed-size) row.
#[derive(Debug, Clone, Default)]
pub struct Group {
    cells: Vec<(ItemId, Cell)>,
}

impl Group {
    pub fn new() -> Self {
        Self { cells: Vec::new() }
    }

    pub fn add_int(&mut self, id: ItemId, value: i32) {
        self.cells.push((id, Cell::new(CellValue::Int32(value), false)));
    }

    pub fn add_uint64(&mut self, id: ItemId, value: u64) {
        self.cells.push((id, Cell::new(CellValue::Uint64(value), false)));
    }

    pub fn add_string(&mut self, id: ItemId, value: impl Into<String>) {
        self.cells.push((id, Cell::new(CellValue::String(value.into()), false)));
    }

    pub fn add_null(&mut self, id: ItemId, kind: CellKind) {
        self.cells.push((id, Cell::new(zero_value(kind), true)));
    }

    pub fn get(&self, id: ItemId) -> Option<&Cell> {
        self.cells.iter().find(|(i, _)| *i == id).map(|(_, c)| c)
    }

    pub fn item_ids(&self) -> impl Iterator<Item = ItemId> + '_ {
        self.cells.iter().map(|(id, _)| *id)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// An ordered sequence of groups, all sharing the same schema (the same
/// set of `ItemId`s). Allocated at the start of a fetch, consumed by the
/// cache/normalized writes within the same cycle, then dropped.
#[derive(Debug, Clone, Default)]
pub struct Table {
    groups: Vec<Group>,
}

impl Table {
    pub fn new() -> Self {
        Self { groups: Vec::new() }
    }

    pub fn append(&mut self, group: Group) {
        self.groups.push(group);
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Group> {
        self.groups.iter()
    }
}

impl<'a> IntoIterator for &'a Table {
    type Item = &'a Group;
    type IntoIter = std::slice::Iter<'a, Group>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}
