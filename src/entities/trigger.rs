//! Trigger entity parser. Field list and order grounded on
//! `ArmZabbixAPI::parseAndPushTriggerData`/`pushTriggersHostid`.

use crate::entities::functions::FunctionsCacheSink;
use crate::error::ParseError;
use crate::ir::{CellKind, Group, ItemId};
use crate::jsonreader::JsonReader;

pub const SCHEMA: &[ItemId] = &[
    ItemId::TriggersTriggerId,
    ItemId::TriggersExpression,
    ItemId::TriggersDescription,
    ItemId::TriggersUrl,
    ItemId::TriggersStatus,
    ItemId::TriggersValue,
    ItemId::TriggersPriority,
    ItemId::TriggersLastChange,
    ItemId::TriggersComments,
    ItemId::TriggersError,
    ItemId::TriggersTemplateId,
    ItemId::TriggersType,
    ItemId::TriggersValueFlags,
    ItemId::TriggersFlags,
    ItemId::TriggersHostId,
];

/// Parses the `index`-th element of the `result` array the reader is
/// currently positioned on into one trigger row.
///
/// `functions` is the disabled functions-cache extension point (see
/// [`crate::entities::functions`]); every caller today passes
/// [`crate::entities::functions::NullFunctionsCacheSink`].
pub fn parse(reader: &mut JsonReader, index: usize, functions: &mut impl FunctionsCacheSink) -> Result<Group, ParseError> {
    reader.enter_element(index)?;

    let mut group = Group::new();
    let trigger_id = reader.read_uint64("triggerid")?;
    group.add_uint64(ItemId::TriggersTriggerId, trigger_id);
    group.add_string(ItemId::TriggersExpression, reader.read_string("expression")?);
    group.add_string(ItemId::TriggersDescription, reader.read_string("description")?);
    group.add_string(ItemId::TriggersUrl, reader.read_string("url")?);
    group.add_int(ItemId::TriggersStatus, reader.read_int("status")?);
    group.add_int(ItemId::TriggersValue, reader.read_int("value")?);
    group.add_int(ItemId::TriggersPriority, reader.read_int("priority")?);
    group.add_int(ItemId::TriggersLastChange, reader.read_int("lastchange")?);
    group.add_string(ItemId::TriggersComments, reader.read_string("comments")?);
    group.add_string(ItemId::TriggersError, reader.read_string("error")?);
    group.add_uint64(ItemId::TriggersTemplateId, reader.read_uint64("templateid")?);
    group.add_int(ItemId::TriggersType, reader.read_int("type")?);
    group.add_int(ItemId::TriggersValueFlags, reader.read_int("value_flags")?);
    group.add_int(ItemId::TriggersFlags, reader.read_int("flags")?);

    push_hostid(reader, &mut group)?;

    // The functions-cache pass is disabled upstream (no `selectFunctions`
    // in the trigger query); `functions` is a compiled-but-unused seam.
    let _ = (&functions, trigger_id);

    reader.leave_element();
    Ok(group)
}

/// `hostid` is derived from the first element of the nested `hosts`
/// array, or null if that array is empty.
fn push_hostid(reader: &mut JsonReader, group: &mut Group) -> Result<(), ParseError> {
    reader.enter_object("hosts")?;
    let count = reader.count_elements()?;
    if count == 0 {
        group.add_null(ItemId::TriggersHostId, CellKind::Uint64);
    } else {
        reader.enter_element(0)?;
        group.add_uint64(ItemId::TriggersHostId, reader.read_uint64("hostid")?);
        reader.leave_element();
    }
    reader.leave_object();
    Ok(())
}
