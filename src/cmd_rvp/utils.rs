use rvp::libs::phylo::{ParseOptions, Tree};
use rvp::libs::support::NamedSet;
use std::io::Write;

// First tree of the file, labels kept verbatim
pub fn read_tree(infile: &str) -> anyhow::Result<Tree> {
    Tree::from_file_with(infile, ParseOptions::verbatim())?
        .into_iter()
        .next()
        .ok_or_else(|| anyhow::anyhow!("No tree in {}", infile))
}

// One name per line, sorted
pub fn write_set(writer: &mut dyn Write, set: &NamedSet) -> anyhow::Result<()> {
    for name in set {
        writer.write_fmt(format_args!("{}\n", name))?;
    }
    Ok(())
}
