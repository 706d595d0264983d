//! Emptiness predicates.
//!
//! Exactly two policies exist: [`IsAbsent`] and [`IsBlank`]. [`Mode`] picks
//! one of them at runtime. The trait is sealed; what is pluggable is the
//! scalar classifier inside [`IsBlank`].

use crate::blank::{Blank, Blankness, Standard};
use crate::config::Mode;
use crate::node::Node;

mod sealed {
    pub trait Sealed {}
}

/// Decides whether a (compacted) value should be dropped by its parent.
pub trait Predicate<K, S>: sealed::Sealed {
    fn matches(&self, node: &Node<K, S>) -> bool;

    fn mode(&self) -> Mode;
}

/// Matches only the absent marker. Never matches containers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsAbsent;

impl sealed::Sealed for IsAbsent {}

impl<K, S> Predicate<K, S> for IsAbsent {
    fn matches(&self, node: &Node<K, S>) -> bool {
        node.is_absent()
    }

    fn mode(&self) -> Mode {
        Mode::Absent
    }
}

/// Matches the absent marker, empty containers, and scalars the classifier
/// reports as blank.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IsBlank<C = Standard> {
    classifier: C,
}

impl IsBlank {
    pub fn new() -> Self {
        Self { classifier: Standard }
    }
}

impl<C> IsBlank<C> {
    pub fn with(classifier: C) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &C {
        &self.classifier
    }
}

impl<C> sealed::Sealed for IsBlank<C> {}

impl<K, S, C: Blankness<S>> Predicate<K, S> for IsBlank<C> {
    fn matches(&self, node: &Node<K, S>) -> bool {
        match node {
            Node::Absent => true,
            Node::Scalar(value) => self.classifier.is_blank_scalar(value),
            Node::Mapping(map) => map.is_empty(),
            Node::Sequence(items) => items.is_empty(),
        }
    }

    fn mode(&self) -> Mode {
        Mode::Blank
    }
}

impl sealed::Sealed for Mode {}

impl<K, S: Blank> Predicate<K, S> for Mode {
    fn matches(&self, node: &Node<K, S>) -> bool {
        match self {
            Self::Absent => IsAbsent.matches(node),
            Self::Blank => IsBlank::new().matches(node),
        }
    }

    fn mode(&self) -> Mode {
        *self
    }
}
