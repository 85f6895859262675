use clap::*;
use rvp::libs::support::layout::{DEFAULT_GROUPS, DEFAULT_TARGET};
use rvp::libs::support::pipeline::Pipeline;
use rvp::libs::support::Layout;
use std::io::Write;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("run")
        .about("Run the whole principal-variable pipeline")
        .after_help(
            r###"
Runs every phase over a data directory and prints the rVP set.

Phases:
1. Split: for each category, name `{cat}output/1-tree.newick`, save it as
   `{cat}output/t2.newick`, and write `C1{cat}.newick` / `C2{cat}.newick`
2. Sclade: sibling changes between C?B{g} and C?W{g}
3. Scriterion: the target's group in C1B{g} and C1W{g}
4. Soclade: leaves of the main tree rerooted on the target
5. Scophenetic: all leaves of the main tree but the target
6. (Sclade ∪ Scriterion) ∩ (Soclade ∪ Scophenetic)

Notes:
* Each group `g` yields a positive category B{g} and a reference W{g}.
* A category that cannot be split is skipped with a warning.
* A failing phase leaves its set empty; the run always reaches phase 6.
* `--report` adds the four support sets as `set<TAB>name` lines.
* Progress is logged to stderr.

Examples:
1. rvp run data/

2. Two groups only, in parallel:
   rvp run data/ -g 2C -g 4C --parallel

3. rvp run data/ --main data/Main/output/1-tree.newick -t Yield

"###,
        )
        .arg(
            Arg::new("base")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Base directory holding the {cat}output/ and Main/ trees"),
        )
        .arg(
            Arg::new("group")
                .long("group")
                .short('g')
                .num_args(1)
                .action(ArgAction::Append)
                .default_values(DEFAULT_GROUPS)
                .help("Category groups"),
        )
        .arg(
            Arg::new("target")
                .long("target")
                .short('t')
                .num_args(1)
                .default_value(DEFAULT_TARGET)
                .help("Name of the target variable"),
        )
        .arg(
            Arg::new("outdir")
                .long("outdir")
                .num_args(1)
                .help("Clade directory. Default: {base}/SM1C1C2_output"),
        )
        .arg(
            Arg::new("main")
                .long("main")
                .num_args(1)
                .help("Main tree. Default: {base}/Main/output/1-tree.newick"),
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
            Arg::new("parallel")
                .long("parallel")
                .action(ArgAction::SetTrue)
                .help("Split the categories in parallel"),
        )
        .arg(
            Arg::new("report")
                .long("report")
                .action(ArgAction::SetTrue)
                .help("Also print the four support sets"),
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
    //----------------------------
    // Args
    //----------------------------
    let mut writer = intspan::writer(args.get_one::<String>("outfile").unwrap());

    let base = args.get_one::<String>("base").unwrap();
    let groups: Vec<String> = args
        .get_many::<String>("group")
        .unwrap()
        .cloned()
        .collect();

    let mut layout = Layout::new(base).with_groups(groups);
    if let Some(outdir) = args.get_one::<String>("outdir") {
        layout = layout.with_outdir(outdir);
    }
    if let Some(main) = args.get_one::<String>("main") {
        layout = layout.with_main_tree(main);
    }

    let pipeline = Pipeline::new(layout, args.get_one::<String>("target").unwrap())
        .with_prefix(args.get_one::<String>("prefix").unwrap())
        .with_parallel(args.get_flag("parallel"));

    //----------------------------
    // Operating
    //----------------------------
    let report = pipeline.run();

    //----------------------------
    // Output
    //----------------------------
    if args.get_flag("report") {
        for (label, set) in [
            ("Sclade", &report.sclade),
            ("Scriterion", &report.scriterion),
            ("Soclade", &report.soclade),
            ("Scophenetic", &report.scophenetic),
        ] {
            for name in set {
                writer.write_fmt(format_args!("{}\t{}\n", label, name))?;
            }
        }
        for name in &report.rvp {
            writer.write_fmt(format_args!("rVP\t{}\n", name))?;
        }
    } else {
        for name in &report.rvp {
            writer.write_fmt(format_args!("{}\n", name))?;
        }
    }

    Ok(())
}
