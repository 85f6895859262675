use crate::libs::phylo::Tree;
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Default groups; each yields a positive (`B`) and a reference (`W`) category.
pub const DEFAULT_GROUPS: [&str; 4] = ["2C", "4C", "8C", "16C"];

/// Default criterion variable.
pub const DEFAULT_TARGET: &str = "ProdutividadeRealizadakgha";

/// Where the pipeline reads its trees and writes its clades.
#[derive(Debug, Clone)]
pub struct Layout {
    pub base: PathBuf,
    pub groups: Vec<String>,
    pub outdir: PathBuf,
    pub main_tree: PathBuf,
}

impl Layout {
    /// Default layout under `base`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            outdir: base.join("SM1C1C2_output"),
            main_tree: base.join("Main").join("output").join("1-tree.newick"),
            groups: DEFAULT_GROUPS.iter().map(|s| s.to_string()).collect(),
            base,
        }
    }

    pub fn with_groups(mut self, groups: Vec<String>) -> Self {
        self.groups = groups;
        self
    }

    pub fn with_outdir(mut self, outdir: impl Into<PathBuf>) -> Self {
        self.outdir = outdir.into();
        self
    }

    pub fn with_main_tree(mut self, main_tree: impl Into<PathBuf>) -> Self {
        self.main_tree = main_tree.into();
        self
    }

    /// `B{g}` and `W{g}` for every group, in group order.
    pub fn categories(&self) -> Vec<String> {
        self.groups
            .iter()
            .flat_map(|g| [positive(g), reference(g)])
            .collect()
    }

    fn category_dir(&self, category: &str) -> PathBuf {
        self.base.join(format!("{}output", category))
    }

    /// The source tree of a category.
    pub fn source_tree(&self, category: &str) -> PathBuf {
        self.category_dir(category).join("1-tree.newick")
    }

    /// The copy with internal nodes named.
    pub fn named_tree(&self, category: &str) -> PathBuf {
        self.category_dir(category).join("t2.newick")
    }

    pub fn clade_file(&self, key: &CladeKey) -> PathBuf {
        self.outdir.join(format!("{}.newick", key))
    }
}

/// Positive-variant category of a group.
pub fn positive(group: &str) -> String {
    format!("B{}", group)
}

/// Reference-variant category of a group.
pub fn reference(group: &str) -> String {
    format!("W{}", group)
}

/// Which half of a bipartition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CladeSide {
    /// The subtree under the midpoint
    First,
    /// What remains of the source tree
    Second,
}

impl CladeSide {
    pub fn index(&self) -> usize {
        match self {
            CladeSide::First => 1,
            CladeSide::Second => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CladeKey {
    pub side: CladeSide,
    pub category: String,
}

impl CladeKey {
    pub fn new(side: CladeSide, category: impl Into<String>) -> Self {
        Self {
            side,
            category: category.into(),
        }
    }
}

/// Renders as `C1B2C`, `C2W16C`, ...
impl fmt::Display for CladeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "C{}{}", self.side.index(), self.category)
    }
}

/// Clades produced by the split phase.
#[derive(Debug, Default)]
pub struct CladeStore {
    clades: BTreeMap<CladeKey, Tree>,
}

impl CladeStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores both halves of a category's split.
    pub fn insert_pair(&mut self, category: &str, clade1: Tree, clade2: Tree) {
        self.clades
            .insert(CladeKey::new(CladeSide::First, category), clade1);
        self.clades
            .insert(CladeKey::new(CladeSide::Second, category), clade2);
    }

    /// `None` when the category was skipped or never split.
    pub fn get(&self, side: CladeSide, category: &str) -> Option<&Tree> {
        self.clades.get(&CladeKey::new(side, category))
    }

    pub fn len(&self) -> usize {
        self.clades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clades.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CladeKey, &Tree)> {
        self.clades.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn default_categories() {
        let layout = Layout::new("data");
        assert_eq!(
            layout.categories(),
            vec!["B2C", "W2C", "B4C", "W4C", "B8C", "W8C", "B16C", "W16C"]
        );
    }

    #[test]
    fn paths() {
        let layout = Layout::new("data").with_groups(vec!["2C".to_string()]);
        assert_eq!(
            layout.source_tree("B2C"),
            Path::new("data/B2Coutput/1-tree.newick")
        );
        assert_eq!(layout.named_tree("W2C"), Path::new("data/W2Coutput/t2.newick"));
        assert_eq!(
            layout.clade_file(&CladeKey::new(CladeSide::Second, "W2C")),
            Path::new("data/SM1C1C2_output/C2W2C.newick")
        );
        assert_eq!(layout.main_tree, Path::new("data/Main/output/1-tree.newick"));
    }

    #[test]
    fn store_reports_missing_clades() {
        let mut store = CladeStore::new();
        store.insert_pair(
            "B2C",
            Tree::from_newick("(A,B)N2;").unwrap(),
            Tree::from_newick("(C)N1;").unwrap(),
        );
        assert_eq!(store.len(), 2);
        assert_eq!(
            store.get(CladeSide::First, "B2C").map(|t| t.to_newick()),
            Some("(A,B)N2;".to_string())
        );
        assert!(store.get(CladeSide::First, "W2C").is_none());

        let keys: Vec<String> = store.iter().map(|(k, _)| k.to_string()).collect();
        assert_eq!(keys, vec!["C1B2C", "C2B2C"]);
    }
}
