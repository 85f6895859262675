use super::Tree;
use crate::libs::phylo::node::NodeId;

/// Get IDs of all leaves in the subtree rooted at `id`, in preorder.
pub fn get_leaves(tree: &Tree, id: NodeId) -> Vec<NodeId> {
    super::traversal::preorder(tree, id)
        .into_iter()
        .filter(|&n| tree.nodes[n].is_leaf())
        .collect()
}

/// Names of all named leaves in the subtree, in preorder.
pub fn get_leaf_names(tree: &Tree, id: NodeId) -> Vec<String> {
    get_leaves(tree, id)
        .into_iter()
        .filter_map(|leaf_id| tree.nodes[leaf_id].label().map(str::to_string))
        .collect()
}

/// Names of all nodes in the tree (that have names), in arena order.
pub fn get_names(tree: &Tree) -> Vec<String> {
    tree.nodes
        .iter()
        .filter(|n| !n.deleted)
        .filter_map(|n| n.label().map(str::to_string))
        .collect()
}
