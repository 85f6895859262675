use super::NamedSet;
use crate::libs::phylo::{NodeId, Tree};

/// Name of the first sister of `id`; `None` only when `id` has no sister.
/// An unnamed sister yields `""`.
pub fn first_sister_name(tree: &Tree, id: NodeId) -> Option<&str> {
    tree.get_sisters(id)
        .first()
        .and_then(|&s| tree.get_node(s))
        .map(|n| n.name.as_deref().unwrap_or(""))
}

/// Leaves whose immediate neighbourhood differs between two clades.
///
/// Every pair of equally named leaves, one from each clade, is compared by the
/// name of its first sister. A leaf without sisters compares as `None`, so a
/// leaf that has a sister on one side only is reported too, named or not.
pub fn changed_siblings(clade_b: &Tree, clade_w: &Tree) -> NamedSet {
    let mut selected = NamedSet::new();

    for leaf_b in clade_b.get_leaves() {
        let name = match clade_b.get_node(leaf_b).and_then(|n| n.label()) {
            Some(name) => name,
            None => continue,
        };
        for leaf_w in clade_w.get_leaves() {
            let same_name = clade_w.get_node(leaf_w).and_then(|n| n.label()) == Some(name);
            if same_name
                && first_sister_name(clade_b, leaf_b) != first_sister_name(clade_w, leaf_w)
            {
                selected.insert(name.to_string());
            }
        }
    }

    selected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tree(newick: &str) -> Tree {
        Tree::from_newick(newick).unwrap()
    }

    fn set(names: &[&str]) -> NamedSet {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn all_neighbours_changed() {
        let b = tree("((A,B)X,C)Y;");
        let w = tree("((A,C)X,B)Y;");
        assert_eq!(changed_siblings(&b, &w), set(&["A", "B", "C"]));
    }

    #[test]
    fn only_changed_leaves_are_flagged() {
        let b = tree("((A,B)X,(C,D)Z)R;");
        let w = tree("((B,A)X,(C,E)Z)R;");
        // D and E exist on one side only
        assert_eq!(changed_siblings(&b, &w), set(&["C"]));
    }

    #[test]
    fn symmetric_under_swap() {
        let b = tree("(((A,B)N3,C)N2,(D,E)N4)N1;");
        let w = tree("(((A,C)N3,B)N2,(E,D)N4)N1;");
        assert_eq!(changed_siblings(&b, &w), changed_siblings(&w, &b));
        // D and E swapped places but still have each other as first sister
        assert_eq!(changed_siblings(&b, &w), set(&["A", "B", "C"]));
    }

    #[test]
    fn both_without_sisters_is_unchanged() {
        let b = tree("A;");
        let w = tree("A;");
        assert!(changed_siblings(&b, &w).is_empty());

        // One side has a sister, the other has none
        let w = tree("(A,B)X;");
        assert_eq!(changed_siblings(&b, &w), set(&["A"]));
    }

    #[test]
    fn unnamed_sister_against_no_sister() {
        let b = tree("(A,(B,C));");
        let w = tree("(A)X;");
        assert_eq!(first_sister_name(&b, 1), Some(""));
        assert_eq!(first_sister_name(&w, 1), None);
        assert_eq!(changed_siblings(&b, &w), set(&["A"]));

        // Unnamed sisters on both sides compare equal
        let w = tree("(A,(C,B));");
        assert!(!changed_siblings(&b, &w).contains("A"));
    }

    #[test]
    fn first_sister_only() {
        // A's first sister is B in both, even though C moved
        let b = tree("(A,B,C)R;");
        let w = tree("((A,B)X,C)R;");
        assert_eq!(first_sister_name(&b, 1), Some("B"));
        assert_eq!(changed_siblings(&b, &w), set(&["C"]));
    }
}
