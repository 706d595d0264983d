//! Deep compaction of nested mappings and sequences.
//!
//! Compaction removes entries whose values match an emptiness predicate and
//! collapses the containers left empty by it, at every nesting level:
//! - [`compact`] / [`compact_in_place`] drop absent values.
//! - [`compact_blank`] / [`compact_blank_in_place`] also drop blank ones:
//!   empty or whitespace-only strings, `false`, and empty containers.
//!
//! The copy variants leave their input untouched. The in-place variants edit
//! the given mapping, nested containers included, and hand it back.
//! [`Compactor`] adds a depth limit, custom blankness and statistics;
//! [`json`] works on `serde_json::Value` directly.
//!
//! Compaction walks the tree with an explicit stack and [`Node`] drops
//! iteratively, so neither consumes call stack in proportion to nesting
//! depth. The other trait impls on `Node` and the `serde_json::Value`
//! conversions still recurse, as they do for `Value` itself.

pub mod compactor;
mod depth;
pub mod ext;
pub mod json;
pub mod stats;
mod walk_copy;
mod walk_in_place;

pub use compactor::Compactor;
pub use dc_core::{
    Blank, Blankness, CompactConfig, CompactError, IsAbsent, IsBlank, JsonNode, JsonScalar,
    Mapping, Mode, Node, Predicate, Result, Standard,
};
pub use ext::{DeepCompact, DeepCompactBlank};
pub use stats::{CompactReport, CompactStats};

use std::hash::Hash;

/// Copy of `root` with absent values removed recursively, along with the
/// containers that become empty.
pub fn compact<K, S>(root: &Mapping<K, S>) -> Mapping<K, S>
where
    K: Clone + Hash + Eq,
    S: Clone,
{
    Compactor::absent().copy_mapping(root).output
}

/// Remove absent values from `root` recursively, in place.
pub fn compact_in_place<K, S>(root: &mut Mapping<K, S>) -> &mut Mapping<K, S>
where
    K: Hash + Eq,
{
    Compactor::absent().sweep_mapping(root);
    root
}

/// Copy of `root` with blank values removed recursively.
pub fn compact_blank<K, S>(root: &Mapping<K, S>) -> Mapping<K, S>
where
    K: Clone + Hash + Eq,
    S: Clone + Blank,
{
    Compactor::blank().copy_mapping(root).output
}

/// Remove blank values from `root` recursively, in place.
pub fn compact_blank_in_place<K, S>(root: &mut Mapping<K, S>) -> &mut Mapping<K, S>
where
    K: Hash + Eq,
    S: Blank,
{
    Compactor::blank().sweep_mapping(root);
    root
}
