//! Entity parsers (component D): one module per Zabbix entity, each
//! exposing a `SCHEMA` constant and a `parse` function that reads one
//! element of a `result` array into a [`crate::ir::Group`].

pub mod application;
pub mod event;
pub mod functions;
pub mod host;
pub mod item;
pub mod trigger;

use crate::error::ParseError;
use crate::ir::Table;
use crate::jsonreader::JsonReader;
use functions::NullFunctionsCacheSink;

/// Parses every element of the reader's current `result` array into a
/// [`Table`] using `parse_one`. Shared by all five entity fetchers since
/// the per-element parse is the only thing that differs between them.
fn parse_all(reader: &mut JsonReader, mut parse_one: impl FnMut(&mut JsonReader, usize) -> Result<crate::ir::Group, ParseError>) -> Result<Table, ParseError> {
    let count = reader.count_elements()?;
    let mut table = Table::new();
    for index in 0..count {
        table.append(parse_one(reader, index)?);
    }
    Ok(table)
}

pub fn parse_triggers(reader: &mut JsonReader) -> Result<Table, ParseError> {
    let mut sink = NullFunctionsCacheSink;
    parse_all(reader, |r, i| trigger::parse(r, i, &mut sink))
}

pub fn parse_items(reader: &mut JsonReader) -> Result<Table, ParseError> {
    parse_all(reader, item::parse)
}

pub fn parse_hosts(reader: &mut JsonReader) -> Result<Table, ParseError> {
    parse_all(reader, host::parse)
}

pub fn parse_applications(reader: &mut JsonReader) -> Result<Table, ParseError> {
    parse_all(reader, application::parse)
}

pub fn parse_events(reader: &mut JsonReader) -> Result<Table, ParseError> {
    parse_all(reader, event::parse)
}
