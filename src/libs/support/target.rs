use super::combine::clean_name;
use super::NamedSet;
use crate::libs::phylo::Tree;

/// Leaf names of the smallest subtree holding `target` and its sisters.
///
/// * `target` absent: empty set
/// * `target` has a parent: every leaf under that parent, `target` included
/// * `target` is the root: `{target}`
pub fn target_subtree(tree: &Tree, target: &str) -> NamedSet {
    let id = match tree.get_node_by_name(target) {
        Some(id) => id,
        None => return NamedSet::new(),
    };

    match tree.get_node(id).and_then(|n| n.parent) {
        Some(parent) => crate::libs::phylo::tree::stat::get_leaf_names(tree, parent)
            .into_iter()
            .collect(),
        None => NamedSet::from([target.to_string()]),
    }
}

/// The spelling `target` has in `tree`.
///
/// An exact match wins; otherwise the first node, in preorder, whose label
/// equals `target` once quotes are stripped from both.
pub fn resolve_name(tree: &Tree, target: &str) -> Option<String> {
    if tree.get_node_by_name(target).is_some() {
        return Some(target.to_string());
    }
    let wanted = clean_name(target);
    let root = tree.get_root()?;
    tree.preorder(root)
        .into_iter()
        .filter_map(|id| tree.get_node(id).and_then(|n| n.label()))
        .find(|label| clean_name(label) == wanted)
        .map(str::to_string)
}
