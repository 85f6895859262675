use super::utils as rvp_utils;
use clap::*;
use rvp::libs::support::layout::DEFAULT_TARGET;
use rvp::libs::support::target;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("target")
        .about("Leaves grouped with the target variable")
        .after_help(
            r###"
Prints every leaf under the parent of the target node, the target itself
included.

Notes:
* The target is matched exactly first, then ignoring quote characters.
* A target that is the root prints just its own name.
* A missing target prints nothing.

Examples:
1. rvp target C1B2C.newick -n ProdutividadeRealizadakgha

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
            Arg::new("name")
                .long("name")
                .short('n')
                .num_args(1)
                .default_value(DEFAULT_TARGET)
                .help("Name of the target variable"),
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
    let name = args.get_one::<String>("name").unwrap();

    let tree = rvp_utils::read_tree(infile)?;
    let group = match target::resolve_name(&tree, name) {
        Some(resolved) => target::target_subtree(&tree, &resolved),
        None => {
            tracing::warn!("{}: {} not found", infile, name);
            return Ok(());
        }
    };
    rvp_utils::write_set(&mut writer, &group)?;

    Ok(())
}
