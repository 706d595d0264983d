//! The compactor: an emptiness predicate plus an optional depth limit.

use crate::stats::{CompactReport, CompactStats};
use crate::walk_copy::drops;
use crate::{depth, walk_copy, walk_in_place};
use dc_core::{
    CompactConfig, CompactError, IsAbsent, IsBlank, Mapping, Mode, Node, Predicate, Result,
};
use indexmap::IndexMap;
use std::hash::Hash;
use tracing::debug;

/// Level of the entries directly under a root mapping.
const FIRST_LEVEL: usize = 2;

/// Removes entries matching its predicate, recursively, collapsing the
/// containers that end up empty.
///
/// Mapping roots follow the top-level contract: every entry is compacted,
/// then kept unless its compacted value matches the predicate or is an
/// empty container. The root itself is always returned, even when empty.
#[derive(Debug, Clone, Default)]
pub struct Compactor<P> {
    predicate: P,
    max_depth: Option<usize>,
}

impl Compactor<IsAbsent> {
    /// Drop absent values only.
    pub fn absent() -> Self {
        Self::new(IsAbsent)
    }
}

impl Compactor<IsBlank> {
    /// Drop blank values, classifying scalars through their `Blank` impl.
    pub fn blank() -> Self {
        Self::new(IsBlank::new())
    }
}

impl<C> Compactor<IsBlank<C>> {
    /// Drop blank values, classifying scalars with `classifier`.
    pub fn blank_with(classifier: C) -> Self {
        Self::new(IsBlank::with(classifier))
    }
}

impl Compactor<Mode> {
    pub fn from_config(config: &CompactConfig) -> Self {
        Self {
            predicate: config.mode,
            max_depth: config.max_depth,
        }
    }
}

impl<P> Compactor<P> {
    pub fn new(predicate: P) -> Self {
        Self {
            predicate,
            max_depth: None,
        }
    }

    /// Reject inputs nesting containers deeper than `limit` levels, the root
    /// container being level 1.
    pub fn with_max_depth(mut self, limit: usize) -> Self {
        self.max_depth = Some(limit);
        self
    }

    pub fn predicate(&self) -> &P {
        &self.predicate
    }

    pub fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    /// Compact a mapping into a new one; `root` is left untouched.
    pub fn compact<K, S>(&self, root: &Mapping<K, S>) -> Result<Mapping<K, S>>
    where
        K: Clone + Hash + Eq,
        S: Clone,
        P: Predicate<K, S>,
    {
        self.compact_with_report(root).map(CompactReport::into_output)
    }

    /// Like [`Compactor::compact`], also reporting what was removed.
    pub fn compact_with_report<K, S>(
        &self,
        root: &Mapping<K, S>,
    ) -> Result<CompactReport<Mapping<K, S>>>
    where
        K: Clone + Hash + Eq,
        S: Clone,
        P: Predicate<K, S>,
    {
        self.check_mapping_depth(root)?;
        Ok(self.copy_mapping(root))
    }

    /// Compact a mapping in place and hand it back.
    ///
    /// Nested containers are edited where they are, so references into them
    /// taken afterwards see the compacted data. On error `root` is unchanged.
    pub fn compact_in_place<'a, K, S>(
        &self,
        root: &'a mut Mapping<K, S>,
    ) -> Result<&'a mut Mapping<K, S>>
    where
        K: Hash + Eq,
        P: Predicate<K, S>,
    {
        self.compact_in_place_with_stats(root)?;
        Ok(root)
    }

    /// Like [`Compactor::compact_in_place`], returning statistics instead.
    pub fn compact_in_place_with_stats<K, S>(
        &self,
        root: &mut Mapping<K, S>,
    ) -> Result<CompactStats>
    where
        K: Hash + Eq,
        P: Predicate<K, S>,
    {
        self.check_mapping_depth(root)?;
        Ok(self.sweep_mapping(root))
    }

    /// Compact any value into a new one.
    ///
    /// A scalar comes back unchanged and a container comes back compacted,
    /// possibly empty; the value itself is never dropped.
    pub fn compact_node<K, S>(&self, node: &Node<K, S>) -> Result<Node<K, S>>
    where
        K: Clone + Hash + Eq,
        S: Clone,
        P: Predicate<K, S>,
    {
        self.compact_node_with_report(node).map(CompactReport::into_output)
    }

    pub fn compact_node_with_report<K, S>(
        &self,
        node: &Node<K, S>,
    ) -> Result<CompactReport<Node<K, S>>>
    where
        K: Clone + Hash + Eq,
        S: Clone,
        P: Predicate<K, S>,
    {
        if let Some(limit) = self.max_depth {
            depth::check([node], 1, limit)?;
        }
        Ok(self.copy_node(node))
    }

    /// Compact any value in place and hand it back.
    pub fn compact_node_in_place<'a, K, S>(
        &self,
        node: &'a mut Node<K, S>,
    ) -> Result<&'a mut Node<K, S>>
    where
        K: Hash + Eq,
        P: Predicate<K, S>,
    {
        if let Some(limit) = self.max_depth {
            depth::check([&*node], 1, limit)?;
        }
        self.sweep_node(node);
        Ok(node)
    }

    fn check_mapping_depth<K, S>(&self, root: &Mapping<K, S>) -> Result<()> {
        let Some(limit) = self.max_depth else {
            return Ok(());
        };
        if limit == 0 {
            return Err(CompactError::DepthLimitExceeded { limit });
        }
        depth::check(root.values(), FIRST_LEVEL, limit)
    }

    pub(crate) fn copy_mapping<K, S>(&self, root: &Mapping<K, S>) -> CompactReport<Mapping<K, S>>
    where
        K: Clone + Hash + Eq,
        S: Clone,
        P: Predicate<K, S>,
    {
        let mut stats = CompactStats::default();
        stats.enter(1);
        let mut output = IndexMap::with_capacity(root.len());
        for (key, value) in root {
            let value = walk_copy::compact(value, FIRST_LEVEL, &self.predicate, &mut stats);
            if drops(&self.predicate, &value) {
                stats.dropped(&value);
            } else {
                output.insert(key.clone(), value);
            }
        }
        Self::log(Predicate::<K, S>::mode(&self.predicate), "copy", &stats);
        CompactReport { output, stats }
    }

    pub(crate) fn sweep_mapping<K, S>(&self, root: &mut Mapping<K, S>) -> CompactStats
    where
        K: Hash + Eq,
        P: Predicate<K, S>,
    {
        let mut stats = CompactStats::default();
        stats.enter(1);
        root.retain(|_, value| {
            walk_in_place::compact(value, FIRST_LEVEL, &self.predicate, &mut stats);
            if drops(&self.predicate, value) {
                stats.dropped(value);
                false
            } else {
                true
            }
        });
        Self::log(Predicate::<K, S>::mode(&self.predicate), "in_place", &stats);
        stats
    }

    pub(crate) fn copy_node<K, S>(&self, node: &Node<K, S>) -> CompactReport<Node<K, S>>
    where
        K: Clone + Hash + Eq,
        S: Clone,
        P: Predicate<K, S>,
    {
        let mut stats = CompactStats::default();
        let output = walk_copy::compact(node, 1, &self.predicate, &mut stats);
        Self::log(Predicate::<K, S>::mode(&self.predicate), "copy", &stats);
        CompactReport { output, stats }
    }

    pub(crate) fn sweep_node<K, S>(&self, node: &mut Node<K, S>) -> CompactStats
    where
        K: Hash + Eq,
        P: Predicate<K, S>,
    {
        let mut stats = CompactStats::default();
        walk_in_place::compact(node, 1, &self.predicate, &mut stats);
        Self::log(Predicate::<K, S>::mode(&self.predicate), "in_place", &stats);
        stats
    }

    fn log(mode: Mode, variant: &'static str, stats: &CompactStats) {
        debug!(
            mode = mode.as_str(),
            variant,
            removed = stats.removed,
            collapsed = stats.collapsed,
            visited = stats.visited,
            max_depth = stats.max_depth,
            "compacted"
        );
    }
}
