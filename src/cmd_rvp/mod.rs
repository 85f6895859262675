//! Subcommand modules for the `rvp` binary.

pub mod combine;
pub mod name;
pub mod outgroup;
pub mod path;
pub mod run;
pub mod siblings;
pub mod split;
pub mod target;
pub mod utils;
