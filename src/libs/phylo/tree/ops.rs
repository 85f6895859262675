use super::Tree;
use crate::libs::phylo::error::TreeError;
use crate::libs::phylo::node::NodeId;
use std::collections::HashMap;

fn not_found(id: NodeId) -> TreeError {
    TreeError::LogicError(format!("Node {} not found or deleted", id))
}

/// Add a child to a parent node.
/// Updates both parent's `children` list and child's `parent` field.
pub fn add_child(tree: &mut Tree, parent_id: NodeId, child_id: NodeId) -> Result<(), TreeError> {
    if parent_id == child_id {
        return Err(TreeError::LogicError(
            "Cannot add node as child of itself".to_string(),
        ));
    }
    if tree.get_node(parent_id).is_none() {
        return Err(not_found(parent_id));
    }
    if tree.get_node(child_id).is_none() {
        return Err(not_found(child_id));
    }

    if let Some(old_parent) = tree.nodes[child_id].parent {
        return Err(TreeError::LogicError(format!(
            "Node {} already has parent {}",
            child_id, old_parent
        )));
    }

    tree.nodes[child_id].parent = Some(parent_id);
    tree.nodes[parent_id].children.push(child_id);

    Ok(())
}

/// Collapse a node, removing it and connecting its children to its parent.
/// Edge lengths are summed (parent->node + node->child).
pub fn collapse_node(tree: &mut Tree, id: NodeId) -> Result<(), TreeError> {
    let node = tree.get_node(id).ok_or_else(|| not_found(id))?;
    let parent_id = node.parent.ok_or_else(|| {
        TreeError::LogicError("Cannot collapse root node".to_string())
    })?;
    let parent_edge = node.length;
    let children = node.children.clone();

    for &child_id in &children {
        if let Some(child) = tree.get_node_mut(child_id) {
            child.parent = Some(parent_id);
            child.length = match (parent_edge, child.length) {
                (Some(p), Some(c)) => Some(p + c),
                (p, c) => p.or(c),
            };
        }
    }

    // Children take the collapsed node's slot, keeping sibling order
    if let Some(parent) = tree.get_node_mut(parent_id) {
        if let Some(pos) = parent.children.iter().position(|&x| x == id) {
            parent.children.splice(pos..pos + 1, children);
        }
    }

    if let Some(node) = tree.get_node_mut(id) {
        node.deleted = true;
        node.children.clear();
        node.parent = None;
    }

    Ok(())
}

/// Compact the tree by removing soft-deleted nodes and remapping IDs.
/// This invalidates all existing NodeIds held outside!
pub fn compact(tree: &mut Tree) {
    let mut old_to_new = HashMap::new();
    let mut new_nodes = Vec::with_capacity(tree.nodes.len());

    for old_node in tree.nodes.iter().filter(|n| !n.deleted) {
        let new_idx = new_nodes.len();
        old_to_new.insert(old_node.id, new_idx);
        let mut new_node = old_node.clone();
        new_node.id = new_idx;
        new_node.parent = None;
        new_node.children.clear();
        new_nodes.push(new_node);
    }

    for node in tree.nodes.iter().filter(|n| !n.deleted) {
        let new_self = old_to_new[&node.id];
        new_nodes[new_self].parent = node.parent.and_then(|p| old_to_new.get(&p).copied());
        new_nodes[new_self].children = node
            .children
            .iter()
            .filter_map(|c| old_to_new.get(c).copied())
            .collect();
    }

    tree.root = tree.root.and_then(|r| old_to_new.get(&r).copied());
    tree.nodes = new_nodes;
}

/// Insert a node in the middle of the desired node and its parent.
/// Returns the new parent node ID.
pub fn insert_parent(tree: &mut Tree, id: NodeId) -> Result<NodeId, TreeError> {
    let node = tree.get_node(id).ok_or_else(|| not_found(id))?;
    let parent = node
        .parent
        .ok_or_else(|| TreeError::LogicError(format!("Node {} has no parent", id)))?;
    let new_length = node.length.map(|l| l / 2.0);

    let new_node = tree.add_node();

    // The new node takes `id`'s position among its siblings
    if let Some(p_node) = tree.get_node_mut(parent) {
        if let Some(pos) = p_node.children.iter().position(|&c| c == id) {
            p_node.children[pos] = new_node;
        }
    }
    tree.nodes[new_node].parent = Some(parent);
    tree.nodes[new_node].length = new_length;

    tree.nodes[id].parent = None;
    add_child(tree, new_node, id)?;
    tree.nodes[id].length = new_length;

    Ok(new_node)
}

/// Reroot the tree at the specified node.
/// This reverses the direction of edges along the path from the old root to the new root.
pub fn reroot_at(tree: &mut Tree, new_root_id: NodeId) -> Result<(), TreeError> {
    if tree.get_node(new_root_id).is_none() {
        return Err(not_found(new_root_id));
    }

    let old_root_id = tree
        .root
        .ok_or_else(|| TreeError::LogicError("Tree has no root".to_string()))?;
    if old_root_id == new_root_id {
        return Ok(());
    }

    let path = tree.get_path_from_root(new_root_id)?;

    // path[i]'s length represents edge (path[i-1] -> path[i])
    let lengths: Vec<Option<f64>> = path.iter().map(|&id| tree.nodes[id].length).collect();

    for i in (1..path.len()).rev() {
        let child_id = path[i];
        let parent_id = path[i - 1];

        tree.nodes[parent_id].children.retain(|&x| x != child_id);
        tree.nodes[child_id].children.push(parent_id);
        tree.nodes[parent_id].parent = Some(child_id);
        tree.nodes[parent_id].length = lengths[i];
    }

    tree.nodes[new_root_id].parent = None;
    tree.nodes[new_root_id].length = None;
    tree.root = Some(new_root_id);

    Ok(())
}

/// Make `id` the outgroup: a new root is placed on the edge above `id`, so that
/// `id` is the root's first child and everything else hangs from the second.
/// The old root is spliced out when it is left with a single child.
pub fn set_outgroup(tree: &mut Tree, id: NodeId) -> Result<(), TreeError> {
    let old_root = tree
        .root
        .ok_or_else(|| TreeError::LogicError("Tree has no root".to_string()))?;
    if tree.get_node(id).is_none() {
        return Err(not_found(id));
    }
    if id == old_root {
        return Ok(());
    }

    let new_root = insert_parent(tree, id)?;
    reroot_at(tree, new_root)?;

    let degree_two = tree
        .get_node(old_root)
        .map(|n| n.parent.is_some() && n.children.len() == 1)
        .unwrap_or(false);
    if degree_two {
        collapse_node(tree, old_root)?;
    }

    compact(tree);
    Ok(())
}
