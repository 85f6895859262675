use super::Tree;
use crate::libs::phylo::error::TreeError;
use crate::libs::phylo::node::NodeId;

/// Node IDs from the root down to `id`, both included.
pub fn get_path_from_root(tree: &Tree, id: NodeId) -> Result<Vec<NodeId>, TreeError> {
    if tree.get_node(id).is_none() {
        return Err(TreeError::LogicError(format!("Node {} not found", id)));
    }

    let mut path = vec![id];
    let mut current = id;
    while let Some(p) = tree.nodes[current].parent {
        path.push(p);
        current = p;
    }
    path.reverse();

    if tree.root != Some(path[0]) {
        return Err(TreeError::LogicError(
            "Node is detached from root".to_string(),
        ));
    }

    Ok(path)
}

/// Find Lowest Common Ancestor (LCA) of two nodes.
pub fn get_common_ancestor(tree: &Tree, a: NodeId, b: NodeId) -> Result<NodeId, TreeError> {
    let path_a = get_path_from_root(tree, a)?;
    let path_b = get_path_from_root(tree, b)?;

    path_a
        .iter()
        .zip(path_b.iter())
        .take_while(|(u, v)| u == v)
        .last()
        .map(|(u, _)| *u)
        .ok_or_else(|| {
            TreeError::LogicError("Nodes are not in the same tree (no common ancestor)".to_string())
        })
}

/// Node IDs from `start` up to, but excluding, its ancestor `end`.
pub fn walk_up_to(tree: &Tree, start: NodeId, end: NodeId) -> Result<Vec<NodeId>, TreeError> {
    let mut walk = Vec::new();
    let mut curr = start;
    while curr != end {
        walk.push(curr);
        curr = tree.nodes[curr].parent.ok_or_else(|| {
            TreeError::LogicError(format!("Node {} is not an ancestor of {}", end, start))
        })?;
    }
    Ok(walk)
}

/// Topological distance: number of edges on the path between two nodes.
/// Branch lengths are ignored.
pub fn get_distance(tree: &Tree, a: NodeId, b: NodeId) -> Result<usize, TreeError> {
    let lca = get_common_ancestor(tree, a, b)?;
    Ok(walk_up_to(tree, a, lca)?.len() + walk_up_to(tree, b, lca)?.len())
}

/// Get node ID by name.
///
/// Nodes are searched in preorder from the root and the first match wins, so
/// duplicate names resolve to the one written first in the Newick text.
pub fn get_node_by_name(tree: &Tree, name: &str) -> Option<NodeId> {
    let root = tree.root?;
    super::traversal::preorder(tree, root)
        .into_iter()
        .find(|&id| tree.nodes[id].name.as_deref() == Some(name))
}

/// Other children of `id`'s parent, in their stored order.
pub fn get_sisters(tree: &Tree, id: NodeId) -> Vec<NodeId> {
    tree.get_node(id)
        .and_then(|n| n.parent)
        .and_then(|p| tree.get_node(p))
        .map(|p| p.children.iter().copied().filter(|&c| c != id).collect())
        .unwrap_or_default()
}
