use super::utils as rvp_utils;
use clap::*;
use rvp::libs::phylo::TreeError;
use rvp::libs::support::layout::DEFAULT_TARGET;
use rvp::libs::support::{outgroup, target};

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("outgroup")
        .about("Leaves around the target variable")
        .after_help(
            r###"
Reroots the tree with the target as outgroup and prints every other leaf.

Notes:
* `--all` skips the reroot and prints all leaves but the target.
* `--tree` prints the rerooted tree instead of the leaf names.
* The target is matched exactly first, then ignoring quote characters.
* A missing target is an error unless `--all` is given.

Examples:
1. Soclade of the main tree:
   rvp outgroup Main/output/1-tree.newick

2. Scophenetic of the main tree:
   rvp outgroup Main/output/1-tree.newick --all

3. Show the rerooted tree:
   rvp outgroup tree.nwk -n T --tree

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
            Arg::new("all")
                .long("all")
                .action(ArgAction::SetTrue)
                .conflicts_with("tree")
                .help("Don't reroot, print all leaves except the target"),
        )
        .arg(
            Arg::new("tree")
                .long("tree")
                .action(ArgAction::SetTrue)
                .help("Print the rerooted tree"),
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

    let mut tree = rvp_utils::read_tree(infile)?;
    let resolved = target::resolve_name(&tree, name);

    if args.get_flag("all") {
        let resolved = resolved.unwrap_or_else(|| name.to_string());
        let leaves = outgroup::leaf_set_without(&tree, &resolved);
        rvp_utils::write_set(&mut writer, &leaves)?;
        return Ok(());
    }

    let resolved = resolved.ok_or_else(|| TreeError::LookupError(name.to_string()))?;
    if args.get_flag("tree") {
        outgroup::reroot_on(&mut tree, &resolved)?;
        writer.write_fmt(format_args!("{}\n", tree.to_newick()))?;
    } else {
        let leaves = outgroup::reroot_and_collect(tree, &resolved)?;
        rvp_utils::write_set(&mut writer, &leaves)?;
    }

    Ok(())
}
