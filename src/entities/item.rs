//! Item entity parser. Field list and order grounded on
//! `ArmZabbixAPI::parseAndPushItemsData`/`pushApplicationid`.

use crate::error::ParseError;
use crate::ir::{CellKind, Group, ItemId};
use crate::jsonreader::JsonReader;

pub const SCHEMA: &[ItemId] = &[
    ItemId::ItemsItemId,
    ItemId::ItemsType,
    ItemId::ItemsSnmpCommunity,
    ItemId::ItemsSnmpOid,
    ItemId::ItemsHostId,
    ItemId::ItemsName,
    ItemId::ItemsKey,
    ItemId::ItemsDelay,
    ItemId::ItemsHistory,
    ItemId::ItemsTrends,
    ItemId::ItemsLastValue,
    ItemId::ItemsLastClock,
    ItemId::ItemsPrevValue,
    ItemId::ItemsStatus,
    ItemId::ItemsValueType,
    ItemId::ItemsTrapperHosts,
    ItemId::ItemsUnits,
    ItemId::ItemsMultiplier,
    ItemId::ItemsDelta,
    ItemId::ItemsPrevOrgValue,
    ItemId::ItemsSnmpv3SecurityName,
    ItemId::ItemsSnmpv3SecurityLevel,
    ItemId::ItemsSnmpv3AuthPassphrase,
    ItemId::ItemsSnmpv3PrivPassphrase,
    ItemId::ItemsFormula,
    ItemId::ItemsError,
    ItemId::ItemsLastLogSize,
    ItemId::ItemsLogTimeFmt,
    ItemId::ItemsTemplateId,
    ItemId::ItemsValueMapId,
    ItemId::ItemsDelayFlex,
    ItemId::ItemsParams,
    ItemId::ItemsIpmiSensor,
    ItemId::ItemsDataType,
    ItemId::ItemsAuthType,
    ItemId::ItemsUsername,
    ItemId::ItemsPassword,
    ItemId::ItemsPublicKey,
    ItemId::ItemsPrivateKey,
    ItemId::ItemsMtime,
    ItemId::ItemsLastNs,
    ItemId::ItemsFlags,
    ItemId::ItemsFilter,
    ItemId::ItemsInterfaceId,
    ItemId::ItemsPort,
    ItemId::ItemsDescription,
    ItemId::ItemsInventoryLink,
    ItemId::ItemsLifetime,
    ItemId::ItemsApplicationId,
];

pub fn parse(reader: &mut JsonReader, index: usize) -> Result<Group, ParseError> {
    reader.enter_element(index)?;

    let mut group = Group::new();
    group.add_uint64(ItemId::ItemsItemId, reader.read_uint64("itemid")?);
    group.add_int(ItemId::ItemsType, reader.read_int("type")?);
    group.add_string(ItemId::ItemsSnmpCommunity, reader.read_string("snmp_community")?);
    group.add_string(ItemId::ItemsSnmpOid, reader.read_string("snmp_oid")?);
    group.add_uint64(ItemId::ItemsHostId, reader.read_uint64("hostid")?);
    group.add_string(ItemId::ItemsName, reader.read_string("name")?);
    group.add_string(ItemId::ItemsKey, reader.read_string("key_")?);
    group.add_int(ItemId::ItemsDelay, reader.read_int("delay")?);
    group.add_int(ItemId::ItemsHistory, reader.read_int("history")?);
    group.add_int(ItemId::ItemsTrends, reader.read_int("trends")?);
    group.add_string(ItemId::ItemsLastValue, reader.read_string("lastvalue")?);
    group.add_int(ItemId::ItemsLastClock, reader.read_int("lastclock")?);
    group.add_string(ItemId::ItemsPrevValue, reader.read_string("prevvalue")?);
    group.add_int(ItemId::ItemsStatus, reader.read_int("status")?);
    group.add_int(ItemId::ItemsValueType, reader.read_int("value_type")?);
    group.add_string(ItemId::ItemsTrapperHosts, reader.read_string("trapper_hosts")?);
    group.add_string(ItemId::ItemsUnits, reader.read_string("units")?);
    group.add_int(ItemId::ItemsMultiplier, reader.read_int("multiplier")?);
    group.add_int(ItemId::ItemsDelta, reader.read_int("delta")?);
    group.add_string(ItemId::ItemsPrevOrgValue, reader.read_string("prevorgvalue")?);
    group.add_string(ItemId::ItemsSnmpv3SecurityName, reader.read_string("snmpv3_securityname")?);
    group.add_int(ItemId::ItemsSnmpv3SecurityLevel, reader.read_int("snmpv3_securitylevel")?);
    group.add_string(ItemId::ItemsSnmpv3AuthPassphrase, reader.read_string("snmpv3_authpassphrase")?);
    group.add_string(ItemId::ItemsSnmpv3PrivPassphrase, reader.read_string("snmpv3_privpassphrase")?);
    group.add_string(ItemId::ItemsFormula, reader.read_string("formula")?);
    group.add_string(ItemId::ItemsError, reader.read_string("error")?);
    group.add_uint64(ItemId::ItemsLastLogSize, reader.read_uint64("lastlogsize")?);
    group.add_string(ItemId::ItemsLogTimeFmt, reader.read_string("logtimefmt")?);
    group.add_uint64(ItemId::ItemsTemplateId, reader.read_uint64("templateid")?);
    group.add_uint64(ItemId::ItemsValueMapId, reader.read_uint64("valuemapid")?);
    group.add_string(ItemId::ItemsDelayFlex, reader.read_string("delay_flex")?);
    group.add_string(ItemId::ItemsParams, reader.read_string("params")?);
    group.add_string(ItemId::ItemsIpmiSensor, reader.read_string("ipmi_sensor")?);
    group.add_int(ItemId::ItemsDataType, reader.read_int("data_type")?);
    group.add_int(ItemId::ItemsAuthType, reader.read_int("authtype")?);
    group.add_string(ItemId::ItemsUsername, reader.read_string("username")?);
    group.add_string(ItemId::ItemsPassword, reader.read_string("password")?);
    group.add_string(ItemId::ItemsPublicKey, reader.read_string("publickey")?);
    group.add_string(ItemId::ItemsPrivateKey, reader.read_string("privatekey")?);
    group.add_int(ItemId::ItemsMtime, reader.read_int("mtime")?);
    group.add_int(ItemId::ItemsLastNs, reader.read_int("lastns")?);
    group.add_int(ItemId::ItemsFlags, reader.read_int("flags")?);
    group.add_string(ItemId::ItemsFilter, reader.read_string("filter")?);
    group.add_uint64(ItemId::ItemsInterfaceId, reader.read_uint64("interfaceid")?);
    group.add_string(ItemId::ItemsPort, reader.read_string("port")?);
    group.add_string(ItemId::ItemsDescription, reader.read_string("description")?);
    group.add_int(ItemId::ItemsInventoryLink, reader.read_int("inventory_link")?);
    group.add_string(ItemId::ItemsLifetime, reader.read_string("lifetime")?);

    push_applicationid(reader, &mut group)?;

    reader.leave_element();
    Ok(group)
}

/// `applicationid` is derived from the first element of the nested
/// `applications` array, or null if that array is empty.
fn push_applicationid(reader: &mut JsonReader, group: &mut Group) -> Result<(), ParseError> {
    reader.enter_object("applications")?;
    let count = reader.count_elements()?;
    if count == 0 {
        group.add_null(ItemId::ItemsApplicationId, CellKind::Uint64);
    } else {
        reader.enter_element(0)?;
        group.add_uint64(ItemId::ItemsApplicationId, reader.read_uint64("applicationid")?);
        reader.leave_element();
    }
    reader.leave_object();
    Ok(())
}
