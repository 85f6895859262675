use super::utils as rvp_utils;
use clap::*;
use rvp::libs::phylo::NodeId;
use rvp::libs::support::{bipartition, InternalNamer};

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("path")
        .about("Longest leaf-to-leaf path and its midpoint")
        .after_help(
            r###"
Finds the pair of leaves with the most edges between them and prints the
node labels along that path.

Output:
* Line 1: the path, tab separated, from one leaf to the other
* Line 2: the label of the midpoint node

Notes:
* Distances count edges; branch lengths are ignored.
* The first pair found among equally distant pairs is kept.
* Unnamed internal nodes are labelled first (see `rvp name`).
* A tree with fewer than two leaves has no path and prints nothing.

Examples:
1. rvp path tree.nwk

"###,
        )
        .arg(
            Arg::new("infile")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Input filename. [stdin] for standard input"),
        )
        .arg(
            Arg::new("prefix")
                .long("prefix")
                .short('p')
                .num_args(1)
                .default_value("N")
                .help("Prefix of labels given to unnamed internal nodes"),
        )
        .arg(
            Arg::new("outfile")
                .short('o')
                .long("outfile")
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let mut writer = intspan::writer(args.get_one::<String>("outfile").unwrap());
    let infile = args.get_one::<String>("infile").unwrap();
    let prefix = args.get_one::<String>("prefix").unwrap();

    let mut tree = rvp_utils::read_tree(infile)?;
    InternalNamer::new(prefix.as_str()).name(&mut tree);

    let (leaf1, leaf2) = match bipartition::longest_leaf_pair(&tree)? {
        Some(pair) => pair,
        None => {
            tracing::warn!("{}: fewer than two leaves", infile);
            return Ok(());
        }
    };
    let path = bipartition::leaf_path(&tree, leaf1, leaf2)?;
    let label = |id: NodeId| {
        tree.get_node(id)
            .and_then(|n| n.label())
            .unwrap_or_default()
            .to_string()
    };

    let labels: Vec<String> = path.iter().map(|&id| label(id)).collect();
    let midpoint = path[bipartition::midpoint_index(path.len())];

    writer.write_fmt(format_args!("{}\n", labels.join("\t")))?;
    writer.write_fmt(format_args!("{}\n", label(midpoint)))?;

    Ok(())
}
