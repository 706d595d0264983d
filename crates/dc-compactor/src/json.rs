//! Compaction of `serde_json::Value` trees.
//!
//! `null` is the absent marker. Copy variants accept any root; in-place
//! variants require an object root.

use crate::compactor::Compactor;
use dc_core::json::{mapping_from_object, object_from_mapping};
use dc_core::{CompactConfig, CompactError, JsonNode, JsonScalar, Predicate, Result};
use serde_json::Value;
use std::mem;

/// Copy of `value` without nulls, recursively.
pub fn compact(value: &Value) -> Value {
    copy(value, &Compactor::absent())
}

/// Copy of `value` without blank values, recursively.
pub fn compact_blank(value: &Value) -> Value {
    copy(value, &Compactor::blank())
}

/// Remove nulls from an object in place.
pub fn compact_in_place(value: &mut Value) -> Result<&mut Value> {
    sweep(value, &Compactor::absent())
}

/// Remove blank values from an object in place.
pub fn compact_blank_in_place(value: &mut Value) -> Result<&mut Value> {
    sweep(value, &Compactor::blank())
}

/// Compact `value` as configured, honoring the depth limit.
pub fn compact_with_config(value: &Value, config: &CompactConfig) -> Result<Value> {
    let mut node = JsonNode::from(value);
    Compactor::from_config(config).compact_node_in_place(&mut node)?;
    Ok(node.into())
}

/// Parse JSON text, compact it as configured and serialize it back.
pub fn compact_str(text: &str, config: &CompactConfig) -> Result<String> {
    let mut node: JsonNode = serde_json::from_str(text)?;
    Compactor::from_config(config).compact_node_in_place(&mut node)?;
    Ok(serde_json::to_string(&node)?)
}

fn copy<P>(value: &Value, compactor: &Compactor<P>) -> Value
where
    P: Predicate<String, JsonScalar>,
{
    let mut node = JsonNode::from(value);
    compactor.sweep_node(&mut node);
    node.into()
}

fn sweep<'a, P>(value: &'a mut Value, compactor: &Compactor<P>) -> Result<&'a mut Value>
where
    P: Predicate<String, JsonScalar>,
{
    let found = kind(value);
    let Value::Object(map) = &mut *value else {
        return Err(CompactError::NotAMapping { found });
    };
    let mut root = mapping_from_object(mem::take(map));
    let outcome = compactor.compact_in_place_with_stats(&mut root);
    *map = object_from_mapping(root);
    outcome?;
    Ok(value)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
