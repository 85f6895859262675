use super::Tree;
use crate::libs::phylo::error::TreeError;
use crate::libs::phylo::node::NodeId;
use std::collections::{HashMap, VecDeque};

/// Get node IDs in preorder traversal (Root -> Children)
pub fn preorder(tree: &Tree, start_node: NodeId) -> Vec<NodeId> {
    let mut result = Vec::new();
    let mut stack = vec![start_node];

    while let Some(id) = stack.pop() {
        if let Some(node) = tree.get_node(id) {
            result.push(id);
            // Push children in reverse order so they are processed in order
            for &child in node.children.iter().rev() {
                stack.push(child);
            }
        }
    }

    result
}

/// Get node IDs in levelorder traversal (BFS)
pub fn levelorder(tree: &Tree, start_node: NodeId) -> Vec<NodeId> {
    let mut result = Vec::new();
    let mut queue = VecDeque::new();
    queue.push_back(start_node);

    while let Some(id) = queue.pop_front() {
        if let Some(node) = tree.get_node(id) {
            result.push(id);
            queue.extend(node.children.iter().copied());
        }
    }

    result
}

/// Copy the nodes reachable from `node_id`, skipping the subtree under `skip`,
/// into a new tree rooted at the copy of `node_id`.
fn copy_from(tree: &Tree, node_id: NodeId, skip: Option<NodeId>) -> Result<Tree, TreeError> {
    if tree.get_node(node_id).is_none() {
        return Err(TreeError::LogicError(format!("Node {} not found", node_id)));
    }

    let mut new_tree = Tree::new();
    let mut id_map: HashMap<NodeId, NodeId> = HashMap::new();

    // Preorder: a parent is always copied before its children
    for old_id in preorder(tree, node_id) {
        if Some(old_id) == skip {
            continue;
        }
        let old_node = &tree.nodes[old_id];
        let new_parent = match old_node.parent {
            Some(p) if old_id != node_id => match id_map.get(&p) {
                Some(&np) => Some(np),
                // Parent was skipped, so is this node
                None => continue,
            },
            _ => None,
        };

        let new_id = new_tree.add_node();
        id_map.insert(old_id, new_id);
        if let Some(new_node) = new_tree.get_node_mut(new_id) {
            new_node.name = old_node.name.clone();
            new_node.length = old_node.length;
        }

        match new_parent {
            Some(np) => new_tree.add_child(np, new_id)?,
            None => new_tree.set_root(new_id),
        }
    }

    Ok(new_tree)
}

/// Extract a subtree rooted at `node_id`.
/// Returns a new Tree; the original is untouched.
pub fn extract_subtree(tree: &Tree, node_id: NodeId) -> Result<Tree, TreeError> {
    copy_from(tree, node_id, None)
}

/// A copy of the whole tree with the subtree under `node_id` left out.
/// The former parent of `node_id` stays, even when left with one child or none.
pub fn without_subtree(tree: &Tree, node_id: NodeId) -> Result<Tree, TreeError> {
    let root = tree
        .root
        .ok_or_else(|| TreeError::LogicError("Tree has no root".to_string()))?;
    if root == node_id {
        return Err(TreeError::LogicError(
            "Cannot remove the root subtree".to_string(),
        ));
    }
    copy_from(tree, root, Some(node_id))
}
