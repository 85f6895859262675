extern crate clap;
use clap::*;
use std::io::IsTerminal;

mod cmd_rvp;

fn main() -> anyhow::Result<()> {
    // Progress goes to stderr, results to stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(std::io::stderr)
        .init();

    let app = Command::new("rvp")
        .version(crate_version!())
        .author(crate_authors!())
        .about("`rvp` - Principal variables from midpoint-split variable trees")
        .propagate_version(true)
        .arg_required_else_help(true)
        .color(ColorChoice::Auto)
        .subcommand(cmd_rvp::name::make_subcommand())
        .subcommand(cmd_rvp::path::make_subcommand())
        .subcommand(cmd_rvp::split::make_subcommand())
        .subcommand(cmd_rvp::siblings::make_subcommand())
        .subcommand(cmd_rvp::target::make_subcommand())
        .subcommand(cmd_rvp::outgroup::make_subcommand())
        .subcommand(cmd_rvp::combine::make_subcommand())
        .subcommand(cmd_rvp::run::make_subcommand())
        .after_help(
            r###"Subcommand groups:

* Trees:
    * name  - Label unnamed internal nodes (N1, N2, ...)
    * path  - Longest leaf-to-leaf path and its midpoint
    * split - Split a tree into two clades at the midpoint

* Support sets:
    * siblings - Sclade: leaves whose first sister changed
    * target   - Scriterion: the target's sibling group
    * outgroup - Soclade / Scophenetic: leaves around the target

* Combination:
    * combine - (Sclade ∪ Scriterion) ∩ (Soclade ∪ Scophenetic)
    * run     - The whole pipeline over a data directory

Log verbosity follows RUST_LOG (default: info).

"###,
        );

    match app.get_matches().subcommand() {
        Some(("name", sub_matches)) => cmd_rvp::name::execute(sub_matches),
        Some(("path", sub_matches)) => cmd_rvp::path::execute(sub_matches),
        Some(("split", sub_matches)) => cmd_rvp::split::execute(sub_matches),
        Some(("siblings", sub_matches)) => cmd_rvp::siblings::execute(sub_matches),
        Some(("target", sub_matches)) => cmd_rvp::target::execute(sub_matches),
        Some(("outgroup", sub_matches)) => cmd_rvp::outgroup::execute(sub_matches),
        Some(("combine", sub_matches)) => cmd_rvp::combine::execute(sub_matches),
        Some(("run", sub_matches)) => cmd_rvp::run::execute(sub_matches),
        _ => unreachable!(),
    }?;

    Ok(())
}
