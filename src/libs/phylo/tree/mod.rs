pub mod io;
pub mod ops;
pub mod query;
pub mod stat;
pub mod traversal;

use super::error::TreeError;
use super::node::{Node, NodeId};
use super::parser::ParseOptions;

#[derive(Debug, Default, Clone)]
pub struct Tree {
    /// Arena storage for all nodes
    pub(super) nodes: Vec<Node>,

    /// Optional root ID (a tree might be empty or in construction)
    pub(super) root: Option<NodeId>,
}

impl Tree {
    /// Create a new empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new node to the tree. Returns the new node's ID.
    /// The node is initially detached (no parent).
    pub fn add_node(&mut self) -> NodeId {
        let id = self.nodes.len();
        let node = Node::new(id);
        self.nodes.push(node);
        id
    }

    /// Get number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| !n.deleted).count()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Get root ID
    pub fn get_root(&self) -> Option<NodeId> {
        self.root
    }

    /// Get a reference to a node by ID. Returns None if ID is invalid or node is deleted.
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id).filter(|n| !n.deleted)
    }

    /// Get a mutable reference to a node by ID.
    pub fn get_node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id).filter(|n| !n.deleted)
    }

    /// Set a node as the root of the tree.
    pub fn set_root(&mut self, id: NodeId) {
        if self.get_node(id).is_some() {
            self.root = Some(id);
        }
    }

    // --- Delegation to ops ---

    pub fn add_child(&mut self, parent_id: NodeId, child_id: NodeId) -> Result<(), TreeError> {
        ops::add_child(self, parent_id, child_id)
    }

    pub fn collapse_node(&mut self, id: NodeId) -> Result<(), TreeError> {
        ops::collapse_node(self, id)
    }

    pub fn compact(&mut self) {
        ops::compact(self)
    }

    pub fn insert_parent(&mut self, child_id: NodeId) -> Result<NodeId, TreeError> {
        ops::insert_parent(self, child_id)
    }

    pub fn reroot_at(&mut self, new_root_id: NodeId) -> Result<(), TreeError> {
        ops::reroot_at(self, new_root_id)
    }

    pub fn set_outgroup(&mut self, id: NodeId) -> Result<(), TreeError> {
        ops::set_outgroup(self, id)
    }

    // --- Delegation to traversal ---

    pub fn preorder(&self, start_node: NodeId) -> Vec<NodeId> {
        traversal::preorder(self, start_node)
    }

    pub fn levelorder(&self, start_node: NodeId) -> Vec<NodeId> {
        traversal::levelorder(self, start_node)
    }

    pub fn extract_subtree(&self, root_id: NodeId) -> Result<Tree, TreeError> {
        traversal::extract_subtree(self, root_id)
    }

    pub fn without_subtree(&self, root_id: NodeId) -> Result<Tree, TreeError> {
        traversal::without_subtree(self, root_id)
    }

    // --- Delegation to query ---

    pub fn get_path_from_root(&self, id: NodeId) -> Result<Vec<NodeId>, TreeError> {
        query::get_path_from_root(self, id)
    }

    pub fn get_common_ancestor(&self, a: NodeId, b: NodeId) -> Result<NodeId, TreeError> {
        query::get_common_ancestor(self, a, b)
    }

    pub fn get_distance(&self, a: NodeId, b: NodeId) -> Result<usize, TreeError> {
        query::get_distance(self, a, b)
    }

    pub fn get_node_by_name(&self, name: &str) -> Option<NodeId> {
        query::get_node_by_name(self, name)
    }

    pub fn get_sisters(&self, id: NodeId) -> Vec<NodeId> {
        query::get_sisters(self, id)
    }

    // --- Delegation to stat ---

    pub fn get_leaves(&self) -> Vec<NodeId> {
        match self.root {
            Some(root) => stat::get_leaves(self, root),
            None => Vec::new(),
        }
    }

    pub fn get_leaf_names(&self) -> Vec<String> {
        match self.root {
            Some(root) => stat::get_leaf_names(self, root),
            None => Vec::new(),
        }
    }

    pub fn get_names(&self) -> Vec<String> {
        stat::get_names(self)
    }

    // --- Delegation to io ---

    pub fn from_file(infile: &str) -> anyhow::Result<Vec<Tree>> {
        io::from_file(infile, ParseOptions::default())
    }

    pub fn from_file_with(infile: &str, options: ParseOptions) -> anyhow::Result<Vec<Tree>> {
        io::from_file(infile, options)
    }

    pub fn to_newick(&self) -> String {
        io::to_newick(self)
    }
}
