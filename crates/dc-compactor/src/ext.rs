//! Method-call syntax for compaction.

use crate::compactor::Compactor;
use dc_core::json::{mapping_from_object, object_from_mapping};
use dc_core::{Blank, Mapping};
use serde_json::{Map, Value};
use std::hash::Hash;
use std::mem;

/// Deep compaction of absent values as methods on mapping types.
pub trait DeepCompact {
    /// Copy without absent values, recursively.
    fn deep_compact(&self) -> Self;

    /// Remove absent values in place, returning `self`.
    fn deep_compact_in_place(&mut self) -> &mut Self;
}

/// Deep compaction of blank values, for mappings whose scalars are [`Blank`].
pub trait DeepCompactBlank: DeepCompact {
    /// Copy without blank values, recursively.
    fn deep_compact_blank(&self) -> Self;

    /// Remove blank values in place, returning `self`.
    fn deep_compact_blank_in_place(&mut self) -> &mut Self;
}

impl<K, S> DeepCompact for Mapping<K, S>
where
    K: Clone + Hash + Eq,
    S: Clone,
{
    fn deep_compact(&self) -> Self {
        crate::compact(self)
    }

    fn deep_compact_in_place(&mut self) -> &mut Self {
        crate::compact_in_place(self)
    }
}

impl<K, S> DeepCompactBlank for Mapping<K, S>
where
    K: Clone + Hash + Eq,
    S: Clone + Blank,
{
    fn deep_compact_blank(&self) -> Self {
        crate::compact_blank(self)
    }

    fn deep_compact_blank_in_place(&mut self) -> &mut Self {
        crate::compact_blank_in_place(self)
    }
}

impl DeepCompact for Map<String, Value> {
    fn deep_compact(&self) -> Self {
        let mut root = mapping_from_object(self.clone());
        Compactor::absent().sweep_mapping(&mut root);
        object_from_mapping(root)
    }

    fn deep_compact_in_place(&mut self) -> &mut Self {
        let mut root = mapping_from_object(mem::take(self));
        Compactor::absent().sweep_mapping(&mut root);
        *self = object_from_mapping(root);
        self
    }
}

impl DeepCompactBlank for Map<String, Value> {
    fn deep_compact_blank(&self) -> Self {
        let mut root = mapping_from_object(self.clone());
        Compactor::blank().sweep_mapping(&mut root);
        object_from_mapping(root)
    }

    fn deep_compact_blank_in_place(&mut self) -> &mut Self {
        let mut root = mapping_from_object(mem::take(self));
        Compactor::blank().sweep_mapping(&mut root);
        *self = object_from_mapping(root);
        self
    }
}
