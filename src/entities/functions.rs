//! The functions-cache extension point, disabled upstream since Zabbix's
//! `trigger.get` can return `selectHosts` directly and no longer needs a
//! join through `functions`/`items` to resolve a trigger's host. Kept as a
//! real, compiled seam rather than deleted — see spec design note on
//! global mutable session scratch.

/// Receives one row per trigger function, if a future caller ever re-enables
/// `selectFunctions` on the trigger query. Never invoked today.
pub trait FunctionsCacheSink {
    fn push_function(&mut self, function_id: u64, item_id: u64, trigger_id: u64, function: &str, parameter: &str);
}

/// The sink every trigger parse is called with today.
pub struct NullFunctionsCacheSink;

impl FunctionsCacheSink for NullFunctionsCacheSink {
    fn push_function(&mut self, _function_id: u64, _item_id: u64, _trigger_id: u64, _function: &str, _parameter: &str) {}
}
