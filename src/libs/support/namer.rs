use crate::libs::phylo::Tree;
use std::collections::HashSet;

/// Assigns sequential labels (`N1`, `N2`, ...) to unnamed internal nodes.
///
/// The counter lives in the namer, so each tree gets its own numbering when a
/// fresh namer is used per tree.
#[derive(Debug, Clone)]
pub struct InternalNamer {
    prefix: String,
    next: usize,
}

impl Default for InternalNamer {
    fn default() -> Self {
        Self::new("N")
    }
}

impl InternalNamer {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }

    /// The counter value the next label would use.
    pub fn next_index(&self) -> usize {
        self.next
    }

    /// Names every unnamed internal node of `tree` in level order.
    ///
    /// Leaves are never touched. Labels already used anywhere in the tree are
    /// skipped, so names stay unique. Returns the number of nodes named.
    pub fn name(&mut self, tree: &mut Tree) -> usize {
        let root = match tree.get_root() {
            Some(r) => r,
            None => return 0,
        };

        let taken: HashSet<String> = tree.get_names().into_iter().collect();
        let mut count = 0;

        for id in tree.levelorder(root) {
            let unnamed_internal = tree
                .get_node(id)
                .map(|n| !n.is_leaf() && n.label().is_none())
                .unwrap_or(false);
            if !unnamed_internal {
                continue;
            }

            let label = loop {
                let candidate = format!("{}{}", self.prefix, self.next);
                self.next += 1;
                if !taken.contains(&candidate) {
                    break candidate;
                }
            };

            if let Some(node) = tree.get_node_mut(id) {
                node.set_name(label);
                count += 1;
            }
        }

        count
    }
}

/// Names internal nodes with a fresh `N`-prefixed counter starting at 1.
pub fn name_internal_nodes(tree: &mut Tree) -> usize {
    InternalNamer::default().name(tree)
}
