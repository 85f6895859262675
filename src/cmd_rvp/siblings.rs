use super::utils as rvp_utils;
use clap::*;
use rvp::libs::support::sibling;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("siblings")
        .about("Leaves whose first sister differs between two clades")
        .after_help(
            r###"
Compares a clade of the positive category with the matching clade of the
reference category.

Every leaf of the first tree is paired with the equally named leaves of the
second tree. A leaf is reported when its first sister differs between the
two trees.

Notes:
* A leaf absent from the second tree is not compared.
* A leaf with a sister on one side only is reported, even when that
  sister is unnamed. Unnamed sisters compare as the empty name.
* Names are compared verbatim, quotes included.

Examples:
1. rvp siblings C1B2C.newick C1W2C.newick

"###,
        )
        .arg(
            Arg::new("clade_b")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Clade of the positive category"),
        )
        .arg(
            Arg::new("clade_w")
                .required(true)
                .num_args(1)
                .index(2)
                .help("Clade of the reference category"),
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

    let clade_b = rvp_utils::read_tree(args.get_one::<String>("clade_b").unwrap())?;
    let clade_w = rvp_utils::read_tree(args.get_one::<String>("clade_w").unwrap())?;

    let changed = sibling::changed_siblings(&clade_b, &clade_w);
    rvp_utils::write_set(&mut writer, &changed)?;

    Ok(())
}
