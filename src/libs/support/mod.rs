//! The principal-variable analyses: naming, midpoint bipartition, the four
//! support sets and their combination.

pub mod bipartition;
pub mod combine;
pub mod layout;
pub mod namer;
pub mod outgroup;
pub mod pipeline;
pub mod sibling;
pub mod target;

use std::collections::BTreeSet;

/// A set of leaf names. Sorted iteration keeps every printout deterministic.
pub type NamedSet = BTreeSet<String>;

pub use bipartition::{Bipartition, SplitError};
pub use layout::{CladeKey, CladeSide, CladeStore, Layout};
pub use namer::InternalNamer;
