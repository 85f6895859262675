use crate::libs::phylo::tree::query;
use crate::libs::phylo::{NodeId, Tree, TreeError};
use itertools::Itertools;
use std::fmt;

/// Why a tree could not be split into two clades.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SplitError {
    /// Fewer than two leaves, so there is no leaf-to-leaf path
    NoLeafPair,
    /// The longest path is centered on the root; the label of the root
    MidpointIsRoot(Option<String>),
    /// Structural failure while walking or copying the tree
    Tree(TreeError),
}

impl fmt::Display for SplitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SplitError::NoLeafPair => write!(f, "no pair of leaves to build a path from"),
            SplitError::MidpointIsRoot(name) => write!(
                f,
                "midpoint {} is the root, no bipartition possible",
                name.as_deref().unwrap_or("<unnamed>")
            ),
            SplitError::Tree(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SplitError {}

impl From<TreeError> for SplitError {
    fn from(e: TreeError) -> Self {
        SplitError::Tree(e)
    }
}

/// Result of a midpoint split.
#[derive(Debug, Clone)]
pub struct Bipartition {
    /// Node labels along the longest leaf path, leaf1 first
    pub path: Vec<Option<String>>,
    /// Index of the midpoint in `path`
    pub midpoint: usize,
    /// The subtree under the midpoint
    pub clade1: Tree,
    /// The source tree without that subtree
    pub clade2: Tree,
}

/// The two leaves farthest apart by edge count.
///
/// Leaves are taken in preorder and pairs `(i, j)` with `i < j` are scanned in
/// order; a later pair replaces the current one only when strictly longer.
pub fn longest_leaf_pair(tree: &Tree) -> Result<Option<(NodeId, NodeId)>, TreeError> {
    let leaves = tree.get_leaves();
    let mut best: Option<(NodeId, NodeId)> = None;
    let mut max_length = 0;

    for (a, b) in leaves.iter().copied().tuple_combinations() {
        let dist = tree.get_distance(a, b)?;
        if dist > max_length {
            max_length = dist;
            best = Some((a, b));
        }
    }

    Ok(best)
}

/// The node sequence leaf1 -> ... -> LCA -> ... -> leaf2.
/// The LCA appears once, where the two upward walks meet.
pub fn leaf_path(tree: &Tree, leaf1: NodeId, leaf2: NodeId) -> Result<Vec<NodeId>, TreeError> {
    let lca = tree.get_common_ancestor(leaf1, leaf2)?;

    let mut path = query::walk_up_to(tree, leaf1, lca)?;
    path.push(lca);

    let mut to_leaf2 = query::walk_up_to(tree, leaf2, lca)?;
    to_leaf2.reverse();
    path.extend(to_leaf2);

    Ok(path)
}

/// Center of a path of `n` nodes. For even `n` the left-of-center element wins.
///
/// ```
/// use rvp::libs::support::bipartition::midpoint_index;
/// assert_eq!(midpoint_index(5), 2);
/// assert_eq!(midpoint_index(4), 1);
/// assert_eq!(midpoint_index(6), 2);
/// ```
pub fn midpoint_index(n: usize) -> usize {
    if n % 2 == 1 {
        n / 2
    } else {
        (n / 2).saturating_sub(1)
    }
}

/// Split `tree` at `node`: clade1 is the subtree under `node`, clade2 the rest.
/// Both are fresh trees; `tree` is left as it was.
pub fn split_at(tree: &Tree, node: NodeId) -> Result<(Tree, Tree), SplitError> {
    if tree.get_root() == Some(node) {
        let name = tree.get_node(node).and_then(|n| n.name.clone());
        return Err(SplitError::MidpointIsRoot(name));
    }
    let clade1 = tree.extract_subtree(node)?;
    let clade2 = tree.without_subtree(node)?;
    Ok((clade1, clade2))
}

/// Finds the longest leaf path and splits the tree at its midpoint.
pub fn split(tree: &Tree) -> Result<Bipartition, SplitError> {
    let (leaf1, leaf2) = longest_leaf_pair(tree)?.ok_or(SplitError::NoLeafPair)?;
    let path = leaf_path(tree, leaf1, leaf2)?;
    let midpoint = midpoint_index(path.len());
    let (clade1, clade2) = split_at(tree, path[midpoint])?;

    Ok(Bipartition {
        path: path
            .iter()
            .map(|&id| tree.get_node(id).and_then(|n| n.name.clone()))
            .collect(),
        midpoint,
        clade1,
        clade2,
    })
}
