//! Bridge between `serde_json::Value` and [`Node`].
//!
//! `null` maps to [`Node::Absent`], objects to mappings and arrays to
//! sequences; everything else becomes a [`JsonScalar`]. Object key order is
//! preserved (serde_json is built with `preserve_order`).

use crate::blank::Blank;
use crate::node::{Mapping, Node};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Number, Value};
use std::mem;

/// Non-null JSON leaf.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum JsonScalar {
    Bool(bool),
    Number(Number),
    String(String),
}

impl Blank for JsonScalar {
    fn is_blank(&self) -> bool {
        match self {
            Self::Bool(b) => b.is_blank(),
            Self::Number(_) => false,
            Self::String(s) => s.is_blank(),
        }
    }
}

impl From<JsonScalar> for Value {
    fn from(scalar: JsonScalar) -> Self {
        match scalar {
            JsonScalar::Bool(b) => Value::Bool(b),
            JsonScalar::Number(n) => Value::Number(n),
            JsonScalar::String(s) => Value::String(s),
        }
    }
}

pub type JsonNode = Node<String, JsonScalar>;

impl From<Value> for JsonNode {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Node::Absent,
            Value::Bool(b) => Node::Scalar(JsonScalar::Bool(b)),
            Value::Number(n) => Node::Scalar(JsonScalar::Number(n)),
            Value::String(s) => Node::Scalar(JsonScalar::String(s)),
            Value::Array(items) => Node::Sequence(items.into_iter().map(Node::from).collect()),
            Value::Object(map) => Node::Mapping(mapping_from_object(map)),
        }
    }
}

impl From<&Value> for JsonNode {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Node::Absent,
            Value::Bool(b) => Node::Scalar(JsonScalar::Bool(*b)),
            Value::Number(n) => Node::Scalar(JsonScalar::Number(n.clone())),
            Value::String(s) => Node::Scalar(JsonScalar::String(s.clone())),
            Value::Array(items) => Node::Sequence(items.iter().map(Node::from).collect()),
            Value::Object(map) => Node::Mapping(
                map.iter()
                    .map(|(k, v)| (k.clone(), Node::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<JsonNode> for Value {
    fn from(mut node: JsonNode) -> Self {
        match &mut node {
            Node::Absent => Value::Null,
            Node::Scalar(scalar) => mem::replace(scalar, JsonScalar::Bool(false)).into(),
            Node::Mapping(map) => Value::Object(object_from_mapping(mem::take(map))),
            Node::Sequence(items) => {
                Value::Array(mem::take(items).into_iter().map(Value::from).collect())
            }
        }
    }
}

/// Convert a JSON object into a mapping, keeping key order.
pub fn mapping_from_object(map: Map<String, Value>) -> Mapping<String, JsonScalar> {
    map.into_iter().map(|(k, v)| (k, Node::from(v))).collect()
}

/// Convert a mapping back into a JSON object, keeping key order.
pub fn object_from_mapping(map: Mapping<String, JsonScalar>) -> Map<String, Value> {
    map.into_iter().map(|(k, v)| (k, Value::from(v))).collect()
}

impl<'de> Deserialize<'de> for JsonNode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Node::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_value_to_node() {
        let node = JsonNode::from(json!({"a": null, "b": [true, 1, "x"]}));
        let map = node.as_mapping().unwrap();
        assert!(map["a"].is_absent());
        let items = map["b"].as_sequence().unwrap();
        assert_eq!(items[0], Node::Scalar(JsonScalar::Bool(true)));
        assert_eq!(items[1], Node::Scalar(JsonScalar::Number(1.into())));
        assert_eq!(items[2], Node::Scalar(JsonScalar::String("x".into())));
    }

    #[test]
    fn test_node_back_to_value() {
        let value = json!({"z": {"y": [null, 2.5, "s"]}, "a": false});
        let node = JsonNode::from(&value);
        assert_eq!(Value::from(node), value);
    }

    #[test]
    fn test_key_order_preserved() {
        let value = json!({"zeta": 1, "alpha": 2, "mid": 3});
        let node = JsonNode::from(value);
        let keys: Vec<&str> = node.as_mapping().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);

        let back = Value::from(node);
        let keys: Vec<&str> = back.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn test_deserialize_and_serialize() {
        let node: JsonNode = serde_json::from_str(r#"{"b":null,"a":[1,{}]}"#).unwrap();
        assert!(node.as_mapping().unwrap()["b"].is_absent());
        assert_eq!(serde_json::to_string(&node).unwrap(), r#"{"b":null,"a":[1,{}]}"#);
    }

    #[test]
    fn test_json_scalar_blankness() {
        assert!(JsonScalar::Bool(false).is_blank());
        assert!(!JsonScalar::Bool(true).is_blank());
        assert!(!JsonScalar::Number(0.into()).is_blank());
        assert!(JsonScalar::String(" \n".into()).is_blank());
        assert!(!JsonScalar::String("x".into()).is_blank());
    }
}
