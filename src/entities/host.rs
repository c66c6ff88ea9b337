//! Host entity parser. Field list and order grounded on
//! `ArmZabbixAPI::parseAndPushHostsData`.

use crate::error::ParseError;
use crate::ir::{Group, ItemId};
use crate::jsonreader::JsonReader;

pub const SCHEMA: &[ItemId] = &[
    ItemId::HostsHostId,
    ItemId::HostsProxyHostId,
    ItemId::HostsHost,
    ItemId::HostsStatus,
    ItemId::HostsDisableUntil,
    ItemId::HostsError,
    ItemId::HostsAvailable,
    ItemId::HostsErrorsFrom,
    ItemId::HostsLastAccess,
    ItemId::HostsIpmiAuthType,
    ItemId::HostsIpmiPrivilege,
    ItemId::HostsIpmiUsername,
    ItemId::HostsIpmiPassword,
    ItemId::HostsIpmiDisableUntil,
    ItemId::HostsIpmiAvailable,
    ItemId::HostsSnmpDisableUntil,
    ItemId::HostsSnmpAvailable,
    ItemId::HostsMaintenanceId,
    ItemId::HostsMaintenanceStatus,
    ItemId::HostsMaintenanceType,
    ItemId::HostsMaintenanceFrom,
    ItemId::HostsIpmiErrorsFrom,
    ItemId::HostsSnmpErrorsFrom,
    ItemId::HostsIpmiError,
    ItemId::HostsSnmpError,
    ItemId::HostsJmxDisableUntil,
    ItemId::HostsJmxAvailable,
    ItemId::HostsJmxErrorsFrom,
    ItemId::HostsJmxError,
    ItemId::HostsName,
];

pub fn parse(reader: &mut JsonReader, index: usize) -> Result<Group, ParseError> {
    reader.enter_element(index)?;

    let mut group = Group::new();
    group.add_uint64(ItemId::HostsHostId, reader.read_uint64("hostid")?);
    group.add_uint64(ItemId::HostsProxyHostId, reader.read_uint64("proxy_hostid")?);
    group.add_string(ItemId::HostsHost, reader.read_string("host")?);
    group.add_int(ItemId::HostsStatus, reader.read_int("status")?);
    group.add_int(ItemId::HostsDisableUntil, reader.read_int("disable_until")?);
    group.add_string(ItemId::HostsError, reader.read_string("error")?);
    group.add_int(ItemId::HostsAvailable, reader.read_int("available")?);
    group.add_int(ItemId::HostsErrorsFrom, reader.read_int("errors_from")?);
    group.add_int(ItemId::HostsLastAccess, reader.read_int("lastaccess")?);
    group.add_int(ItemId::HostsIpmiAuthType, reader.read_int("ipmi_authtype")?);
    group.add_int(ItemId::HostsIpmiPrivilege, reader.read_int("ipmi_privilege")?);
    group.add_string(ItemId::HostsIpmiUsername, reader.read_string("ipmi_username")?);
    group.add_string(ItemId::HostsIpmiPassword, reader.read_string("ipmi_password")?);
    group.add_int(ItemId::HostsIpmiDisableUntil, reader.read_int("ipmi_disable_until")?);
    group.add_int(ItemId::HostsIpmiAvailable, reader.read_int("ipmi_available")?);
    group.add_int(ItemId::HostsSnmpDisableUntil, reader.read_int("snmp_disable_until")?);
    group.add_int(ItemId::HostsSnmpAvailable, reader.read_int("snmp_available")?);
    group.add_uint64(ItemId::HostsMaintenanceId, reader.read_uint64("maintenanceid")?);
    group.add_int(ItemId::HostsMaintenanceStatus, reader.read_int("maintenance_status")?);
    group.add_int(ItemId::HostsMaintenanceType, reader.read_int("maintenance_type")?);
    group.add_int(ItemId::HostsMaintenanceFrom, reader.read_int("maintenance_from")?);
    group.add_int(ItemId::HostsIpmiErrorsFrom, reader.read_int("ipmi_errors_from")?);
    group.add_int(ItemId::HostsSnmpErrorsFrom, reader.read_int("snmp_errors_from")?);
    group.add_string(ItemId::HostsIpmiError, reader.read_string("ipmi_error")?);
    group.add_string(ItemId::HostsSnmpError, reader.read_string("snmp_error")?);
    group.add_int(ItemId::HostsJmxDisableUntil, reader.read_int("jmx_disable_until")?);
    group.add_int(ItemId::HostsJmxAvailable, reader.read_int("jmx_available")?);
    group.add_int(ItemId::HostsJmxErrorsFrom, reader.read_int("jmx_errors_from")?);
    group.add_string(ItemId::HostsJmxError, reader.read_string("jmx_error")?);
    group.add_string(ItemId::HostsName, reader.read_string("name")?);

    reader.leave_element();
    Ok(group)
}
