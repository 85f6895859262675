use super::Tree;
use crate::libs::phylo::node::NodeId;
use crate::libs::phylo::parser::ParseOptions;
use anyhow::Context;
use std::io::Read;

/// Read all Newick trees from a file.
///
/// # Arguments
/// * `infile` - Path to the input file (or "stdin" for stdin).
/// * `options` - How labels are stored, see [`ParseOptions`].
pub fn from_file(infile: &str, options: ParseOptions) -> anyhow::Result<Vec<Tree>> {
    if infile != "stdin" && !std::path::Path::new(infile).is_file() {
        anyhow::bail!("Tree file not found: {}", infile);
    }
    let mut reader = intspan::reader(infile);
    let mut newick = String::new();
    reader
        .read_to_string(&mut newick)
        .with_context(|| format!("Read error: {}", infile))?;
    Tree::from_newick_multi_with(newick.as_str(), options)
        .with_context(|| format!("Malformed Newick: {}", infile))
}

/// Serialize tree to a compact Newick string.
pub fn to_newick(tree: &Tree) -> String {
    match tree.get_root() {
        Some(root) => {
            let mut s = to_newick_recursive(tree, root);
            s.push(';');
            s
        }
        None => ";".to_string(),
    }
}

fn to_newick_recursive(tree: &Tree, node_id: NodeId) -> String {
    let node = &tree.nodes[node_id];

    let mut node_info = String::new();
    if let Some(name) = &node.name {
        node_info.push_str(&quote_label(name));
    }
    if let Some(len) = node.length {
        node_info.push_str(&format!(":{}", len));
    }

    let children: Vec<String> = node
        .children
        .iter()
        .filter(|&&c| tree.get_node(c).is_some())
        .map(|&child| to_newick_recursive(tree, child))
        .collect();

    if children.is_empty() {
        node_info
    } else {
        format!("({}){}", children.join(","), node_info)
    }
}

// Labels read verbatim keep their quotes and are written back as they are
fn quote_label(label: &str) -> String {
    let already_quoted = label.len() >= 2
        && ((label.starts_with('\'') && label.ends_with('\''))
            || (label.starts_with('"') && label.ends_with('"')));
    let needs_quote = label.chars().any(|c| "(),:;[]' \t\n".contains(c));
    if needs_quote && !already_quoted {
        format!("'{}'", label.replace('\'', "''"))
    } else {
        label.to_string()
    }
}
