//! Event entity parser. Field list and order grounded on
//! `ArmZabbixAPI::parseAndPushEventsData`.

use crate::error::ParseError;
use crate::ir::{Group, ItemId};
use crate::jsonreader::JsonReader;

pub const SCHEMA: &[ItemId] = &[
    ItemId::EventsEventId,
    ItemId::EventsSource,
    ItemId::EventsObject,
    ItemId::EventsObjectId,
    ItemId::EventsClock,
    ItemId::EventsValue,
    ItemId::EventsAcknowledged,
    ItemId::EventsNs,
    ItemId::EventsValueChanged,
];

pub fn parse(reader: &mut JsonReader, index: usize) -> Result<Group, ParseError> {
    reader.enter_element(index)?;

    let mut group = Group::new();
    group.add_uint64(ItemId::EventsEventId, reader.read_uint64("eventid")?);
    group.add_int(ItemId::EventsSource, reader.read_int("source")?);
    group.add_int(ItemId::EventsObject, reader.read_int("object")?);
    group.add_uint64(ItemId::EventsObjectId, reader.read_uint64("objectid")?);
    group.add_int(ItemId::EventsClock, reader.read_int("clock")?);
    group.add_int(ItemId::EventsValue, reader.read_int("value")?);
    group.add_int(ItemId::EventsAcknowledged, reader.read_int("acknowledged")?);
    group.add_int(ItemId::EventsNs, reader.read_int("ns")?);
    group.add_int(ItemId::EventsValueChanged, reader.read_int("value_changed")?);

    reader.leave_element();
    Ok(group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "result": [{
                "eventid": "1000", "source": "0", "object": "0", "objectid": "100",
                "clock": "1700000000", "value": "1", "acknowledged": "0", "ns": "123456",
                "value_changed": "1",
            }]
        })
    }

    #[test]
    fn schema_is_complete_and_exact() {
        let doc = sample();
        let mut reader = JsonReader::new(&doc);
        reader.enter_object("result").unwrap();
        let group = parse(&mut reader, 0).unwrap();
        reader.leave_object();
        let ids: Vec<_> = group.item_ids().collect();
        assert_eq!(ids, SCHEMA.to_vec());
    }

    #[test]
    fn eventid_drives_incremental_offset() {
        let doc = sample();
        let mut reader = JsonReader::new(&doc);
        reader.enter_object("result").unwrap();
        let group = parse(&mut reader, 0).unwrap();
        reader.leave_object();
        assert_eq!(group.get(ItemId::EventsEventId).unwrap().as_uint64(), Some(1000));
    }
}
