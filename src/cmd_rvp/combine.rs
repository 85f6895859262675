use super::utils as rvp_utils;
use clap::*;
use rvp::libs::support::combine;
use rvp::libs::support::layout::DEFAULT_TARGET;
use rvp::libs::support::NamedSet;

// Create clap subcommand arguments
pub fn make_subcommand() -> Command {
    Command::new("combine")
        .about("Combine the four support sets")
        .after_help(
            r###"
Computes (Sclade ∪ Scriterion) ∩ (Soclade ∪ Scophenetic).

Each input is a list of names, one per line; only the first column of a
tab-separated line is used.

Notes:
* Quote characters are removed from every name before combining.
* The target is removed from Scriterion, so it only survives when Sclade
  carries it.

Examples:
1. rvp combine sclade.txt scriterion.txt soclade.txt scophenetic.txt

"###,
        )
        .arg(
            Arg::new("sclade")
                .required(true)
                .num_args(1)
                .index(1)
                .help("Sclade list"),
        )
        .arg(
            Arg::new("scriterion")
                .required(true)
                .num_args(1)
                .index(2)
                .help("Scriterion list"),
        )
        .arg(
            Arg::new("soclade")
                .required(true)
                .num_args(1)
                .index(3)
                .help("Soclade list"),
        )
        .arg(
            Arg::new("scophenetic")
                .required(true)
                .num_args(1)
                .index(4)
                .help("Scophenetic list"),
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
            Arg::new("outfile")
                .short('o')
                .long("outfile")
                .num_args(1)
                .default_value("stdout")
                .help("Output filename. [stdout] for screen"),
        )
}

fn read_set(args: &ArgMatches, id: &str) -> NamedSet {
    intspan::read_first_column(args.get_one::<String>(id).unwrap())
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect()
}

// command implementation
pub fn execute(args: &ArgMatches) -> anyhow::Result<()> {
    let mut writer = intspan::writer(args.get_one::<String>("outfile").unwrap());
    let target = args.get_one::<String>("target").unwrap();

    let rvp = combine::combine(
        &read_set(args, "sclade"),
        &read_set(args, "scriterion"),
        &read_set(args, "soclade"),
        &read_set(args, "scophenetic"),
        target,
    );
    tracing::info!("rVP: {} variables", rvp.len());
    rvp_utils::write_set(&mut writer, &rvp)?;

    Ok(())
}
