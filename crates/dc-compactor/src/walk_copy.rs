//! Copying walk: builds a compacted tree from a borrowed one.
//!
//! Post-order traversal over an explicit stack of frames. Each frame owns
//! the container being built for one source container; a finished frame is
//! offered to its parent, which keeps or drops it.

use crate::stats::CompactStats;
use dc_core::{Mapping, Node, Predicate};
use indexmap::{map, IndexMap};
use std::hash::Hash;
use std::{mem, slice};

enum Frame<'a, K, S> {
    Mapping {
        entries: map::Iter<'a, K, Node<K, S>>,
        key: Option<&'a K>,
        out: Mapping<K, S>,
    },
    Sequence {
        items: slice::Iter<'a, Node<K, S>>,
        out: Vec<Node<K, S>>,
    },
}

impl<'a, K: Clone + Hash + Eq, S> Frame<'a, K, S> {
    fn open(node: &'a Node<K, S>) -> Option<Self> {
        match node {
            Node::Mapping(map) => Some(Self::Mapping {
                entries: map.iter(),
                key: None,
                out: IndexMap::with_capacity(map.len()),
            }),
            Node::Sequence(items) => Some(Self::Sequence {
                items: items.iter(),
                out: Vec::with_capacity(items.len()),
            }),
            Node::Absent | Node::Scalar(_) => None,
        }
    }

    /// Advance to the next child. For mappings the child's key is parked
    /// until the compacted child is offered back.
    fn next_child(&mut self) -> Option<&'a Node<K, S>> {
        match self {
            Self::Mapping { entries, key, .. } => entries.next().map(|(k, v)| {
                *key = Some(k);
                v
            }),
            Self::Sequence { items, .. } => items.next(),
        }
    }

    fn offer<P: Predicate<K, S>>(
        &mut self,
        node: Node<K, S>,
        predicate: &P,
        stats: &mut CompactStats,
    ) {
        if drops(predicate, &node) {
            stats.dropped(&node);
            return;
        }
        match self {
            Self::Mapping { key, out, .. } => {
                if let Some(key) = key.take() {
                    out.insert(key.clone(), node);
                }
            }
            Self::Sequence { out, .. } => out.push(node),
        }
    }

    fn finish(self) -> Node<K, S> {
        match self {
            Self::Mapping { out, .. } => Node::Mapping(out),
            Self::Sequence { out, .. } => Node::Sequence(out),
        }
    }
}

/// Whether a compacted value is dropped by its parent.
pub(crate) fn drops<K, S, P: Predicate<K, S>>(predicate: &P, node: &Node<K, S>) -> bool {
    predicate.matches(node) || node.is_empty_container()
}

/// Compact `node`, which sits at container level `depth`, into a fresh tree.
///
/// The returned value is never dropped here: a container may come back
/// empty and a scalar comes back as a clone. Filtering it is the caller's
/// job.
pub(crate) fn compact<K, S, P>(
    node: &Node<K, S>,
    depth: usize,
    predicate: &P,
    stats: &mut CompactStats,
) -> Node<K, S>
where
    K: Clone + Hash + Eq,
    S: Clone,
    P: Predicate<K, S>,
{
    let Some(mut current) = Frame::open(node) else {
        return node.clone();
    };
    stats.enter(depth);
    let mut parents: Vec<Frame<'_, K, S>> = Vec::new();

    loop {
        match current.next_child() {
            Some(child) => match Frame::open(child) {
                Some(frame) => {
                    stats.enter(depth + parents.len() + 1);
                    parents.push(mem::replace(&mut current, frame));
                }
                None => current.offer(child.clone(), predicate, stats),
            },
            None => {
                let Some(parent) = parents.pop() else {
                    return current.finish();
                };
                let done = mem::replace(&mut current, parent);
                current.offer(done.finish(), predicate, stats);
            }
        }
    }
}
