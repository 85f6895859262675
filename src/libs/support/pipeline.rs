use super::bipartition::{self, Bipartition};
use super::combine::combine;
use super::layout::{positive, reference, CladeKey, CladeSide, CladeStore, Layout};
use super::namer::InternalNamer;
use super::outgroup::{leaf_set_without, reroot_and_collect};
use super::sibling::changed_siblings;
use super::target::{resolve_name, target_subtree};
use super::NamedSet;
use crate::libs::phylo::{ParseOptions, Tree, TreeError};
use anyhow::{anyhow, Context};
use rayon::prelude::*;
use std::io::Write;
use std::path::Path;
use tracing::{debug, error, info, warn};

/// Loads the first tree of a Newick file, labels verbatim.
pub fn load_first_tree(path: &Path) -> anyhow::Result<Tree> {
    let infile = path.to_string_lossy();
    Tree::from_file_with(&infile, ParseOptions::verbatim())?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow!("No tree in {}", infile))
}

fn write_tree(path: &Path, tree: &Tree) -> anyhow::Result<()> {
    let mut writer = intspan::writer(&path.to_string_lossy());
    writer
        .write_fmt(format_args!("{}\n", tree.to_newick()))
        .with_context(|| format!("Write error: {}", path.display()))
}

/// The four support sets and their combination.
#[derive(Debug, Default, Clone)]
pub struct Report {
    pub sclade: NamedSet,
    pub scriterion: NamedSet,
    pub soclade: NamedSet,
    pub scophenetic: NamedSet,
    pub rvp: NamedSet,
}

#[derive(Debug, Clone)]
pub struct Pipeline {
    pub layout: Layout,
    /// The criterion variable
    pub target: String,
    /// Prefix of internal node labels
    pub prefix: String,
    /// Split categories on the rayon pool
    pub parallel: bool,
}

impl Pipeline {
    pub fn new(layout: Layout, target: impl Into<String>) -> Self {
        Self {
            layout,
            target: target.into(),
            prefix: "N".to_string(),
            parallel: false,
        }
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Load, name, save and split one category.
    /// The named copy is written even when the split turns out degenerate.
    pub fn prepare_category(&self, category: &str) -> anyhow::Result<Bipartition> {
        let mut tree = load_first_tree(&self.layout.source_tree(category))?;

        let count = InternalNamer::new(self.prefix.as_str()).name(&mut tree);
        debug!("{}: named {} internal nodes", category, count);
        write_tree(&self.layout.named_tree(category), &tree)?;

        let split = bipartition::split(&tree)?;
        for (side, clade) in [
            (CladeSide::First, &split.clade1),
            (CladeSide::Second, &split.clade2),
        ] {
            let key = CladeKey::new(side, category);
            write_tree(&self.layout.clade_file(&key), clade)?;
        }
        Ok(split)
    }

    /// Phase 1: split every category. Failing categories are logged and left out.
    pub fn split_phase(&self) -> CladeStore {
        info!("Phase 1: splitting {} categories", self.layout.categories().len());
        if let Err(e) = std::fs::create_dir_all(&self.layout.outdir) {
            error!("Cannot create {}: {}", self.layout.outdir.display(), e);
        }

        let categories = self.layout.categories();
        let outcomes: Vec<(String, anyhow::Result<Bipartition>)> = if self.parallel {
            categories
                .par_iter()
                .map(|c| (c.clone(), self.prepare_category(c)))
                .collect()
        } else {
            categories
                .iter()
                .map(|c| (c.clone(), self.prepare_category(c)))
                .collect()
        };

        let mut store = CladeStore::new();
        for (category, outcome) in outcomes {
            match outcome {
                Ok(split) => {
                    info!(
                        "{}: clades {} and {} generated",
                        category,
                        CladeKey::new(CladeSide::First, category.as_str()),
                        CladeKey::new(CladeSide::Second, category.as_str())
                    );
                    store.insert_pair(&category, split.clade1, split.clade2);
                }
                Err(e) => warn!("{}: no clades generated: {:#}", category, e),
            }
        }
        store
    }

    /// Phase 2: leaves whose first sister changed between paired clades.
    pub fn sclade(&self, store: &CladeStore) -> NamedSet {
        info!("Phase 2: Sclade");
        let mut sclade = NamedSet::new();
        for group in &self.layout.groups {
            let (b, w) = (positive(group), reference(group));
            for side in [CladeSide::First, CladeSide::Second] {
                match (store.get(side, &b), store.get(side, &w)) {
                    (Some(clade_b), Some(clade_w)) => {
                        sclade.extend(changed_siblings(clade_b, clade_w));
                    }
                    _ => warn!(
                        "{}: missing {} or {}, pair skipped",
                        group,
                        CladeKey::new(side, b.as_str()),
                        CladeKey::new(side, w.as_str())
                    ),
                }
            }
        }
        info!("Sclade: {} variables", sclade.len());
        sclade
    }

    /// Phase 3: the target's sibling group in every first clade.
    pub fn scriterion(&self, store: &CladeStore) -> NamedSet {
        info!("Phase 3: Scriterion");
        let mut scriterion = NamedSet::new();
        for group in &self.layout.groups {
            for category in [positive(group), reference(group)] {
                let clade = match store.get(CladeSide::First, &category) {
                    Some(clade) => clade,
                    None => continue,
                };
                match resolve_name(clade, &self.target) {
                    Some(name) => {
                        scriterion.extend(target_subtree(clade, &name));
                        scriterion.remove(&name);
                    }
                    None => debug!(
                        "{}: {} not in {}",
                        category,
                        self.target,
                        CladeKey::new(CladeSide::First, category.as_str())
                    ),
                }
            }
        }
        info!("Scriterion: {} variables", scriterion.len());
        scriterion
    }

    /// Phase 4: every other leaf after rerooting the main tree on the target.
    pub fn soclade(&self) -> anyhow::Result<NamedSet> {
        info!("Phase 4: Soclade");
        let tree = load_first_tree(&self.layout.main_tree)?;
        let name = resolve_name(&tree, &self.target)
            .ok_or_else(|| TreeError::LookupError(self.target.clone()))?;
        let soclade = reroot_and_collect(tree, &name)?;
        info!("Soclade: {} variables", soclade.len());
        Ok(soclade)
    }

    /// Phase 5: every other leaf of an untouched load of the main tree.
    pub fn scophenetic(&self) -> anyhow::Result<NamedSet> {
        info!("Phase 5: Scophenetic");
        let tree = load_first_tree(&self.layout.main_tree)?;
        let name = resolve_name(&tree, &self.target).unwrap_or_else(|| self.target.clone());
        let scophenetic = leaf_set_without(&tree, &name);
        info!("Scophenetic: {} variables", scophenetic.len());
        Ok(scophenetic)
    }

    /// All phases. Failures are logged and leave the affected set empty.
    pub fn run(&self) -> Report {
        let store = self.split_phase();
        let sclade = self.sclade(&store);
        let scriterion = self.scriterion(&store);

        let soclade = self.soclade().unwrap_or_else(|e| {
            error!("Soclade failed: {:#}", e);
            NamedSet::new()
        });
        let scophenetic = self.scophenetic().unwrap_or_else(|e| {
            error!("Scophenetic failed: {:#}", e);
            NamedSet::new()
        });

        info!("Phase 6: combining");
        let rvp = combine(&sclade, &scriterion, &soclade, &scophenetic, &self.target);
        info!("rVP: {} variables", rvp.len());

        Report {
            sclade,
            scriterion,
            soclade,
            scophenetic,
            rvp,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn set(names: &[&str]) -> NamedSet {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn put(base: &Path, rel: &str, newick: &str) {
        let path = base.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, newick).unwrap();
    }

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path();
        put(base, "B2Coutput/1-tree.newick", "(((T,A),B),(C,D));\n");
        put(base, "W2Coutput/1-tree.newick", "(((T,B),A),(C,D));\n");
        put(base, "B4Coutput/1-tree.newick", "((A,B),(C,D));\n");
        put(base, "Main/output/1-tree.newick", "(('T',A),(B,(C,D)));\n");
        dir
    }

    fn pipeline(base: &Path) -> Pipeline {
        let layout = Layout::new(base).with_groups(vec!["2C".to_string(), "4C".to_string()]);
        Pipeline::new(layout, "T")
    }

    #[test]
    fn split_phase_keeps_good_categories() {
        let dir = fixture();
        let p = pipeline(dir.path());
        let store = p.split_phase();

        // B4C centers on its root, W4C has no file
        assert_eq!(store.len(), 4);
        assert!(store.get(CladeSide::First, "B4C").is_none());
        assert!(store.get(CladeSide::First, "W4C").is_none());

        let c1 = fs::read_to_string(dir.path().join("SM1C1C2_output/C1B2C.newick")).unwrap();
        assert_eq!(c1, "((T,A)N4,B)N2;\n");
        let c2 = fs::read_to_string(dir.path().join("SM1C1C2_output/C2B2C.newick")).unwrap();
        assert_eq!(c2.trim(), "((C,D)N3)N1;");

        // Named copy written even for the degenerate category
        let named = fs::read_to_string(dir.path().join("B4Coutput/t2.newick")).unwrap();
        assert_eq!(named.trim(), "((A,B)N2,(C,D)N3)N1;");
    }

    #[test]
    fn parallel_split_matches_serial() {
        let dir = fixture();
        let serial = pipeline(dir.path()).split_phase();
        let parallel = pipeline(dir.path()).with_parallel(true).split_phase();

        let render = |store: &CladeStore| -> Vec<String> {
            store
                .iter()
                .map(|(k, t)| format!("{} {}", k, t.to_newick()))
                .collect()
        };
        assert_eq!(render(&serial), render(&parallel));
    }

    #[test]
    fn full_run() {
        let dir = fixture();
        let report = pipeline(dir.path()).run();

        assert_eq!(report.sclade, set(&["A", "B", "T"]));
        assert_eq!(report.scriterion, set(&["A", "B"]));
        assert_eq!(report.soclade, set(&["A", "B", "C", "D"]));
        assert_eq!(report.scophenetic, set(&["A", "B", "C", "D"]));
        assert_eq!(report.rvp, set(&["A", "B"]));
    }

    #[test]
    fn missing_main_tree_leaves_sets_empty() {
        let dir = fixture();
        let layout = Layout::new(dir.path())
            .with_groups(vec!["2C".to_string()])
            .with_main_tree(dir.path().join("nowhere.newick"));
        let report = Pipeline::new(layout, "T").run();

        assert!(report.soclade.is_empty());
        assert!(report.scophenetic.is_empty());
        assert!(report.rvp.is_empty());
        assert_eq!(report.sclade, set(&["A", "B", "T"]));
    }

    #[test]
    fn missing_target_in_main_tree() {
        let dir = fixture();
        let report = Pipeline::new(
            Layout::new(dir.path()).with_groups(vec!["2C".to_string()]),
            "Q",
        )
        .run();

        // Reroot fails, the plain leaf set still works and keeps quotes
        assert!(report.soclade.is_empty());
        assert_eq!(report.scophenetic, set(&["'T'", "A", "B", "C", "D"]));
        assert!(report.scriterion.is_empty());
    }
}
