use super::NamedSet;
use crate::libs::phylo::{Tree, TreeError};

/// Reroots `tree` so the node named `target` is a child of the new root.
pub fn reroot_on(tree: &mut Tree, target: &str) -> Result<(), TreeError> {
    let id = tree
        .get_node_by_name(target)
        .ok_or_else(|| TreeError::LookupError(target.to_string()))?;
    tree.set_outgroup(id)
}

/// Reroots on `target`, then collects every leaf name in level order except `target`.
///
/// Takes the tree by value: rerooting rewires it, so callers hand over a
/// dedicated copy.
pub fn reroot_and_collect(mut tree: Tree, target: &str) -> Result<NamedSet, TreeError> {
    reroot_on(&mut tree, target)?;

    let root = tree
        .get_root()
        .ok_or_else(|| TreeError::LogicError("Tree has no root".to_string()))?;
    Ok(tree
        .levelorder(root)
        .into_iter()
        .filter_map(|id| tree.get_node(id))
        .filter(|n| n.is_leaf())
        .filter_map(|n| n.label())
        .filter(|&name| name != target)
        .map(str::to_string)
        .collect())
}

/// Every leaf name of `tree` except `target`.
pub fn leaf_set_without(tree: &Tree, target: &str) -> NamedSet {
    tree.get_leaf_names()
        .into_iter()
        .filter(|name| name != target)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::libs::phylo::ParseOptions;

    fn set(names: &[&str]) -> NamedSet {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn reroot_places_target_beside_the_rest() {
        let mut tree = Tree::from_newick("((A,B),(C,D));").unwrap();
        reroot_on(&mut tree, "C").unwrap();
        assert_eq!(tree.to_newick(), "(C,(D,(A,B)));");
    }

    #[test]
    fn reroot_collects_all_but_target() {
        let tree = Tree::from_newick("((A,B),(C,D));").unwrap();
        let set_c = reroot_and_collect(tree, "C").unwrap();
        assert_eq!(set_c, set(&["A", "B", "D"]));
    }

    #[test]
    fn reroot_missing_target_fails() {
        let tree = Tree::from_newick("((A,B),(C,D));").unwrap();
        match reroot_and_collect(tree, "Z") {
            Err(TreeError::LookupError(name)) => assert_eq!(name, "Z"),
            other => panic!("expected LookupError, got {:?}", other),
        }
    }

    #[test]
    fn full_leaf_set_without_target() {
        let tree = Tree::from_newick("((A,B),(C,D));").unwrap();
        assert_eq!(leaf_set_without(&tree, "C"), set(&["A", "B", "D"]));
        assert_eq!(leaf_set_without(&tree, "Z"), set(&["A", "B", "C", "D"]));
    }

    #[test]
    fn quoted_names_are_kept() {
        let input = "(('T',\"A B\"),(C,D));";
        let tree = Tree::from_newick_with(input, ParseOptions::verbatim()).unwrap();
        assert_eq!(
            leaf_set_without(&tree, "'T'"),
            set(&["\"A B\"", "C", "D"])
        );
        let rerooted = reroot_and_collect(tree, "'T'").unwrap();
        assert_eq!(rerooted, set(&["\"A B\"", "C", "D"]));
    }
}
