//! Formatter options.

use serde_json::{Map, Value};

use crate::config::UnifiedConfig;
use crate::error::Result;

/// Formatter options for `config`: the `format` section without its
/// `enabled` switch, pass-through options included.
///
/// # Errors
///
/// Returns an error only if the section fails to serialize.
pub fn build(config: &UnifiedConfig) -> Result<Map<String, Value>> {
    let mut options = match serde_json::to_value(&config.format)? {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    options.remove("enabled");
    Ok(options)
}
