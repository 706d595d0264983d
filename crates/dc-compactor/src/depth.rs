//! Read-only depth probe run before a depth-limited compaction.

use dc_core::{CompactError, Node, Result};
use tracing::trace;

/// Fail if any container among `nodes` (sitting at `depth`) or below them
/// nests deeper than `limit`.
pub(crate) fn check<'a, K: 'a, S: 'a>(
    nodes: impl IntoIterator<Item = &'a Node<K, S>>,
    depth: usize,
    limit: usize,
) -> Result<()> {
    let mut stack: Vec<(&Node<K, S>, usize)> = nodes
        .into_iter()
        .filter(|node| node.is_container())
        .map(|node| (node, depth))
        .collect();

    while let Some((node, depth)) = stack.pop() {
        if depth > limit {
            trace!(depth, limit, kind = node.kind(), "depth limit exceeded");
            return Err(CompactError::DepthLimitExceeded { limit });
        }
        match node {
            Node::Mapping(map) => stack.extend(
                map.values()
                    .filter(|child| child.is_container())
                    .map(|child| (child, depth + 1)),
            ),
            Node::Sequence(items) => stack.extend(
                items
                    .iter()
                    .filter(|child| child.is_container())
                    .map(|child| (child, depth + 1)),
            ),
            Node::Absent | Node::Scalar(_) => {}
        }
    }
    Ok(())
}
