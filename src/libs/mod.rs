pub mod phylo;
pub mod support;
