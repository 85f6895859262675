use super::utils as rvp_utils;
use clap::*;
use rvp::libs::support::InternalNamer;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("name")
        .about("Label unnamed internal nodes")
        .after_help(
            r###"
Assigns `{prefix}{n}` to every internal node without a label.

Notes:
* Nodes are visited in level order from the root, so the root gets N1.
* Existing labels are kept, and numbers already taken are skipped.
* Only the first tree of the input is processed.

Examples:
1. Name the nodes of a tree:
   rvp name tree.nwk

2. Use another prefix:
   rvp name tree.nwk -p Node -o named.nwk

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
                .help("Prefix of the generated labels"),
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
    let count = InternalNamer::new(prefix.as_str()).name(&mut tree);
    tracing::debug!("Named {} internal nodes", count);

    writer.write_fmt(format_args!("{}\n", tree.to_newick()))?;

    Ok(())
}
