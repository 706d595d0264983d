//! In-place walk: compacts an owned tree without rebuilding it.
//!
//! Each container's entries are moved out of their node while the children
//! are walked, swept with `retain` once they are done, then moved back.
//! Container allocations are reused throughout; nothing is cloned.

use crate::stats::CompactStats;
use crate::walk_copy::drops;
use dc_core::{Mapping, Node, Predicate};
use std::hash::Hash;
use std::mem;

enum Frame<K, S> {
    Mapping { map: Mapping<K, S>, cursor: usize },
    Sequence { items: Vec<Node<K, S>>, cursor: usize },
}

impl<K: Hash + Eq, S> Frame<K, S> {
    /// Move a container's entries out of `node`, leaving it empty. Leaves
    /// are not opened.
    fn open(node: &mut Node<K, S>) -> Option<Self> {
        match node {
            Node::Mapping(map) => Some(Self::Mapping {
                map: mem::take(map),
                cursor: 0,
            }),
            Node::Sequence(items) => Some(Self::Sequence {
                items: mem::take(items),
                cursor: 0,
            }),
            Node::Absent | Node::Scalar(_) => None,
        }
    }

    /// Open the next container child. Leaf children stay where they are
    /// until the sweep.
    fn take_next_container(&mut self) -> Option<Self> {
        loop {
            let (slot, cursor) = match self {
                Self::Mapping { map, cursor } => {
                    (map.get_index_mut(*cursor).map(|(_, v)| v), cursor)
                }
                Self::Sequence { items, cursor } => (items.get_mut(*cursor), cursor),
            };
            let slot = slot?;
            *cursor += 1;
            if let Some(frame) = Self::open(slot) {
                return Some(frame);
            }
        }
    }

    /// Put a finished child back into the slot it was taken from.
    fn restore(&mut self, node: Node<K, S>) {
        let slot = match self {
            Self::Mapping { map, cursor } => cursor
                .checked_sub(1)
                .and_then(|i| map.get_index_mut(i))
                .map(|(_, v)| v),
            Self::Sequence { items, cursor } => {
                cursor.checked_sub(1).and_then(|i| items.get_mut(i))
            }
        };
        if let Some(slot) = slot {
            *slot = node;
        }
    }

    /// Drop every child the predicate matches or that is an empty container.
    fn sweep<P: Predicate<K, S>>(&mut self, predicate: &P, stats: &mut CompactStats) {
        let mut keep = |node: &Node<K, S>| {
            if drops(predicate, node) {
                stats.dropped(node);
                false
            } else {
                true
            }
        };
        match self {
            Self::Mapping { map, .. } => map.retain(|_, v| keep(&*v)),
            Self::Sequence { items, .. } => items.retain(|v| keep(v)),
        }
    }

    fn into_node(self) -> Node<K, S> {
        match self {
            Self::Mapping { map, .. } => Node::Mapping(map),
            Self::Sequence { items, .. } => Node::Sequence(items),
        }
    }
}

/// Compact `node`, which sits at container level `depth`, in place.
///
/// As with the copying walk, `node` itself is never dropped: a container
/// may be left empty and a leaf is left as it is.
pub(crate) fn compact<K, S, P>(
    node: &mut Node<K, S>,
    depth: usize,
    predicate: &P,
    stats: &mut CompactStats,
) where
    K: Hash + Eq,
    P: Predicate<K, S>,
{
    let Some(mut current) = Frame::open(node) else {
        return;
    };
    stats.enter(depth);
    let mut parents: Vec<Frame<K, S>> = Vec::new();

    loop {
        if let Some(child) = current.take_next_container() {
            stats.enter(depth + parents.len() + 1);
            parents.push(mem::replace(&mut current, child));
            continue;
        }
        current.sweep(predicate, stats);
        let Some(parent) = parents.pop() else {
            *node = current.into_node();
            return;
        };
        let done = mem::replace(&mut current, parent);
        current.restore(done.into_node());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::walk_copy;
    use dc_core::{IsAbsent, IsBlank};

    type TestNode = Node<u8, &'static str>;

    fn s(value: &'static str) -> TestNode {
        Node::scalar(value)
    }

    fn map(entries: Vec<(u8, TestNode)>) -> TestNode {
        entries.into_iter().collect()
    }

    #[test]
    fn test_leaf_left_alone() {
        let mut stats = CompactStats::default();
        let mut node = s("   ");
        compact(&mut node, 1, &IsBlank::new(), &mut stats);
        assert_eq!(node, s("   "));
        assert_eq!(stats, CompactStats::default());
    }

    #[test]
    fn test_nested_in_place() {
        let mut stats = CompactStats::default();
        let mut node = map(vec![
            (1, s("one")),
            (2, map(vec![(3, TestNode::Absent), (4, s("four"))])),
            (5, TestNode::Sequence(vec![TestNode::Absent, TestNode::Sequence(vec![])])),
        ]);
        compact(&mut node, 1, &IsAbsent, &mut stats);
        assert_eq!(node, map(vec![(1, s("one")), (2, map(vec![(4, s("four"))]))]));
        assert_eq!(stats.removed, 4);
        assert_eq!(stats.collapsed, 2);
        assert_eq!(stats.visited, 4);
    }

    #[test]
    fn test_matches_copying_walk() {
        let input = map(vec![
            (9, TestNode::Sequence(vec![s(""), TestNode::Absent, map(vec![(1, s(" "))]), s("x")])),
            (8, map(vec![(7, map(vec![(6, TestNode::Absent)]))])),
            (5, s("")),
        ]);
        for blank in [false, true] {
            let mut copy_stats = CompactStats::default();
            let mut place_stats = CompactStats::default();
            let mut node = input.clone();
            let copied = if blank {
                compact(&mut node, 1, &IsBlank::new(), &mut place_stats);
                walk_copy::compact(&input, 1, &IsBlank::new(), &mut copy_stats)
            } else {
                compact(&mut node, 1, &IsAbsent, &mut place_stats);
                walk_copy::compact(&input, 1, &IsAbsent, &mut copy_stats)
            };
            assert_eq!(node, copied);
            assert_eq!(place_stats, copy_stats);
        }
    }

    #[test]
    fn test_nested_allocation_reused() {
        let mut stats = CompactStats::default();
        let mut items = Vec::with_capacity(16);
        items.push(s("a"));
        items.push(TestNode::Absent);
        let mut node = map(vec![(1, TestNode::Sequence(items))]);
        let before = node.as_mapping().unwrap()[&1u8].as_sequence().unwrap().as_ptr();

        compact(&mut node, 1, &IsAbsent, &mut stats);

        let after = node.as_mapping().unwrap()[&1u8].as_sequence().unwrap();
        assert_eq!(after.len(), 1);
        assert_eq!(after.as_ptr(), before);
    }
}
