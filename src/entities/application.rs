//! Application entity parser. Field list and order grounded on
//! `ArmZabbixAPI::parseAndPushApplicationsData`.

use crate::error::ParseError;
use crate::ir::{Group, ItemId};
use crate::jsonreader::JsonReader;

pub const SCHEMA: &[ItemId] = &[
    ItemId::ApplicationsApplicationId,
    ItemId::ApplicationsHostId,
    ItemId::ApplicationsName,
    ItemId::ApplicationsTemplateId,
];

pub fn parse(reader: &mut JsonReader, index: usize) -> Result<Group, ParseError> {
    reader.enter_element(index)?;

    let mut group = Group::new();
    group.add_uint64(ItemId::ApplicationsApplicationId, reader.read_uint64("applicationid")?);
    group.add_uint64(ItemId::ApplicationsHostId, reader.read_uint64("hostid")?);
    group.add_string(ItemId::ApplicationsName, reader.read_string("name")?);
    group.add_uint64(ItemId::ApplicationsTemplateId, reader.read_uint64("templateid")?);

    reader.leave_element();
    Ok(group)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn schema_is_complete_and_exact() {
        let doc = json!({
            "result": [{
                "applicationid": "1", "hostid": "10", "name": "App", "templateid": "0",
            }]
        });
        let mut reader = JsonReader::new(&doc);
        reader.enter_object("result").unwrap();
        let group = parse(&mut reader, 0).unwrap();
        reader.leave_object();
        let ids: Vec<_> = group.item_ids().collect();
        assert_eq!(ids, SCHEMA.to_vec());
    }

    #[test]
    fn reads_expected_values() {
        let doc = json!({
            "result": [{
                "applicationid": "7", "hostid": "10", "name": "App", "templateid": "3",
            }]
        });
        let mut reader = JsonReader::new(&doc);
        reader.enter_object("result").unwrap();
        let group = parse(&mut reader, 0).unwrap();
        reader.leave_object();
        assert_eq!(group.get(ItemId::ApplicationsApplicationId).unwrap().as_uint64(), Some(7));
        assert_eq!(group.get(ItemId::ApplicationsName).unwrap().as_str(), Some("App"));
    }
}
