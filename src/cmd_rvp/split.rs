use super::utils as rvp_utils;
use clap::*;
use rvp::libs::support::{bipartition, InternalNamer, SplitError};

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("split")
        .about("Split a tree into two clades at the midpoint")
        .after_help(
            r###"
Cuts the tree at the midpoint of its longest leaf-to-leaf path.

Output:
* Line 1: clade 1, the subtree rooted at the midpoint
* Line 2: clade 2, the tree with that subtree removed

Notes:
* Unnamed internal nodes are labelled first (see `rvp name`).
* The former parent of the midpoint stays in clade 2, possibly with a
  single child.
* When the midpoint is the root no split exists; a warning is logged and
  nothing is printed.

Examples:
1. rvp split tree.nwk

2. Write clade 1 only:
   rvp split tree.nwk | head -n 1 > C1.nwk

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

    match bipartition::split(&tree) {
        Ok(split) => {
            writer.write_fmt(format_args!("{}\n", split.clade1.to_newick()))?;
            writer.write_fmt(format_args!("{}\n", split.clade2.to_newick()))?;
        }
        Err(e @ (SplitError::MidpointIsRoot(_) | SplitError::NoLeafPair)) => {
            tracing::warn!("{}: {}", infile, e);
        }
        Err(e) => return Err(e.into()),
    }

    Ok(())
}
