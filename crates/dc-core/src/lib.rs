//! Core types for deep compaction: the tree model, blankness, the two
//! emptiness predicates, configuration and errors.

pub mod blank;
pub mod config;
pub mod error;
pub mod json;
pub mod node;
pub mod predicate;

pub use blank::{Blank, Blankness, Standard};
pub use config::{CompactConfig, Mode};
pub use error::{CompactError, Result};
pub use json::{JsonNode, JsonScalar};
pub use node::{Mapping, Node};
pub use predicate::{IsAbsent, IsBlank, Predicate};
