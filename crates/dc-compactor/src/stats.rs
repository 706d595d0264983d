//! Counters collected during a compaction.

use dc_core::Node;

/// What a compaction did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompactStats {
    /// Entries and elements dropped, containers included.
    pub removed: usize,
    /// Dropped entries that were containers (emptied by compaction or
    /// empty to begin with).
    pub collapsed: usize,
    /// Containers walked, the root included.
    pub visited: usize,
    /// Deepest container level reached; the root container is level 1.
    pub max_depth: usize,
}

impl CompactStats {
    pub(crate) fn enter(&mut self, depth: usize) {
        self.visited += 1;
        self.max_depth = self.max_depth.max(depth);
    }

    pub(crate) fn dropped<K, S>(&mut self, node: &Node<K, S>) {
        self.removed += 1;
        if node.is_container() {
            self.collapsed += 1;
        }
    }
}

/// Compaction output together with its statistics.
#[derive(Debug, Clone)]
pub struct CompactReport<T> {
    pub output: T,
    pub stats: CompactStats,
}

impl<T> CompactReport<T> {
    pub fn into_output(self) -> T {
        self.output
    }
}
