//! Tree model: mappings, sequences and scalar leaves.

use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use std::hash::Hash;
use std::mem;

/// Insertion-ordered mapping with unique keys.
pub type Mapping<K, S> = IndexMap<K, Node<K, S>>;

/// A value in a compactable tree.
///
/// `K` is the mapping key type and `S` the scalar leaf type. Both are opaque
/// to compaction: keys are carried over verbatim and scalars are only
/// inspected through a predicate.
///
/// Dropping a node never recurses, however deep the tree. Because `Node`
/// implements `Drop`, containers are taken apart through `&mut` access
/// (`mem::take` on the inner mapping or vector) rather than by moving out of
/// the variant.
#[derive(Debug, Clone)]
pub enum Node<K, S> {
    /// The absent marker (`null` / `nil`).
    Absent,
    Scalar(S),
    Mapping(Mapping<K, S>),
    Sequence(Vec<Node<K, S>>),
}

impl<K, S> Node<K, S> {
    pub fn scalar(value: S) -> Self {
        Self::Scalar(value)
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    /// True for mappings and sequences.
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Mapping(_) | Self::Sequence(_))
    }

    /// True for a mapping or sequence with no entries. Scalars and the absent
    /// marker are never empty containers.
    pub fn is_empty_container(&self) -> bool {
        match self {
            Self::Mapping(map) => map.is_empty(),
            Self::Sequence(items) => items.is_empty(),
            _ => false,
        }
    }

    pub fn as_scalar(&self) -> Option<&S> {
        match self {
            Self::Scalar(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping<K, S>> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping<K, S>> {
        match self {
            Self::Mapping(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Node<K, S>]> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_sequence_mut(&mut self) -> Option<&mut Vec<Node<K, S>>> {
        match self {
            Self::Sequence(items) => Some(items),
            _ => None,
        }
    }

    /// If any child is a container, move the container children onto
    /// `stack` and drop the leaves, leaving `self` empty.
    fn detach_containers(&mut self, stack: &mut Vec<Self>) {
        match self {
            Self::Mapping(map) if map.values().any(Self::is_container) => {
                stack.extend(mem::take(map).into_values().filter(Self::is_container));
            }
            Self::Sequence(items) if items.iter().any(Self::is_container) => {
                stack.extend(mem::take(items).into_iter().filter(Self::is_container));
            }
            _ => {}
        }
    }

    /// Short name of the variant, used in errors and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Absent => "absent",
            Self::Scalar(_) => "scalar",
            Self::Mapping(_) => "mapping",
            Self::Sequence(_) => "sequence",
        }
    }
}

impl<K, S> Default for Node<K, S> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<K, S> Drop for Node<K, S> {
    fn drop(&mut self) {
        let mut stack = Vec::new();
        self.detach_containers(&mut stack);
        while let Some(mut node) = stack.pop() {
            node.detach_containers(&mut stack);
        }
    }
}

impl<K: Hash + Eq, S: PartialEq> PartialEq for Node<K, S> {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Absent, Self::Absent) => true,
            (Self::Scalar(a), Self::Scalar(b)) => a == b,
            (Self::Mapping(a), Self::Mapping(b)) => a == b,
            (Self::Sequence(a), Self::Sequence(b)) => a == b,
            _ => false,
        }
    }
}

impl<K: Hash + Eq, S: Eq> Eq for Node<K, S> {}

impl<K, S> From<Mapping<K, S>> for Node<K, S> {
    fn from(map: Mapping<K, S>) -> Self {
        Self::Mapping(map)
    }
}

impl<K, S> From<Vec<Node<K, S>>> for Node<K, S> {
    fn from(items: Vec<Node<K, S>>) -> Self {
        Self::Sequence(items)
    }
}

impl<K, S> From<Option<S>> for Node<K, S> {
    fn from(value: Option<S>) -> Self {
        value.map_or(Self::Absent, Self::Scalar)
    }
}

impl<K: Hash + Eq, S> FromIterator<(K, Node<K, S>)> for Node<K, S> {
    fn from_iter<I: IntoIterator<Item = (K, Node<K, S>)>>(iter: I) -> Self {
        Self::Mapping(iter.into_iter().collect())
    }
}

impl<K, S> FromIterator<Node<K, S>> for Node<K, S> {
    fn from_iter<I: IntoIterator<Item = Node<K, S>>>(iter: I) -> Self {
        Self::Sequence(iter.into_iter().collect())
    }
}

impl<K: Serialize, S: Serialize> Serialize for Node<K, S> {
    fn serialize<Ser: Serializer>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error> {
        match self {
            Self::Absent => serializer.serialize_unit(),
            Self::Scalar(value) => value.serialize(serializer),
            Self::Mapping(map) => serializer.collect_map(map),
            Self::Sequence(items) => serializer.collect_seq(items),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type TestNode = Node<u32, &'static str>;

    #[test]
    fn test_empty_container_check() {
        assert!(TestNode::Mapping(Mapping::new()).is_empty_container());
        assert!(TestNode::Sequence(Vec::new()).is_empty_container());
        assert!(!TestNode::Absent.is_empty_container());
        assert!(!TestNode::scalar("").is_empty_container());
        assert!(!TestNode::Sequence(vec![TestNode::Absent]).is_empty_container());
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(TestNode::Absent.kind(), "absent");
        assert_eq!(TestNode::scalar("x").kind(), "scalar");
        assert_eq!(TestNode::Mapping(Mapping::new()).kind(), "mapping");
        assert_eq!(TestNode::Sequence(vec![]).kind(), "sequence");
    }

    #[test]
    fn test_collect_mapping_keeps_order() {
        let node: TestNode = [(3, TestNode::scalar("c")), (1, TestNode::scalar("a"))]
            .into_iter()
            .collect();
        let keys: Vec<u32> = node.as_mapping().unwrap().keys().copied().collect();
        assert_eq!(keys, vec![3, 1]);
    }

    #[test]
    fn test_from_option() {
        assert!(TestNode::from(None).is_absent());
        assert_eq!(TestNode::from(Some("x")), TestNode::scalar("x"));
    }

    #[test]
    fn test_equality_by_variant() {
        assert_ne!(TestNode::Absent, TestNode::Sequence(vec![]));
        assert_ne!(
            TestNode::Mapping(Mapping::new()),
            TestNode::Sequence(vec![])
        );
        assert_eq!(
            TestNode::Sequence(vec![TestNode::scalar("a")]),
            TestNode::Sequence(vec![TestNode::scalar("a")])
        );
    }

    #[test]
    fn test_deep_chain_drops_without_recursion() {
        let mut node = TestNode::scalar("x");
        for i in 0..100_000 {
            node = if i % 2 == 0 {
                TestNode::Sequence(vec![TestNode::Absent, node])
            } else {
                [(i, node)].into_iter().collect()
            };
        }
        drop(node);
    }

    #[test]
    fn test_detach_only_when_nested() {
        let mut node = TestNode::Sequence(vec![
            TestNode::scalar("a"),
            TestNode::Sequence(vec![]),
            TestNode::Absent,
        ]);
        let mut stack = Vec::new();
        node.detach_containers(&mut stack);
        assert_eq!(stack, vec![TestNode::Sequence(vec![])]);
        assert!(node.is_empty_container());

        let mut flat = TestNode::Sequence(vec![TestNode::scalar("a")]);
        flat.detach_containers(&mut stack);
        assert_eq!(flat, TestNode::Sequence(vec![TestNode::scalar("a")]));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_serialize_generic_node() {
        let node: TestNode = [
            (1, TestNode::scalar("one")),
            (2, TestNode::Absent),
            (3, TestNode::Sequence(vec![TestNode::scalar("x")])),
        ]
        .into_iter()
        .collect();
        let text = serde_json::to_string(&node).unwrap();
        assert_eq!(text, r#"{"1":"one","2":null,"3":["x"]}"#);
    }
}
