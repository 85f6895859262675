use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;

fn put(base: &Path, rel: &str, newick: &str) -> anyhow::Result<()> {
    let path = base.join(rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, newick)?;
    Ok(())
}

// B2C and W2C split cleanly, B4C centers on its root, W4C is missing
fn layout() -> anyhow::Result<tempfile::TempDir> {
    let dir = tempfile::tempdir()?;
    let base = dir.path();
    put(base, "B2Coutput/1-tree.newick", "(((T,A),B),(C,D));\n")?;
    put(base, "W2Coutput/1-tree.newick", "(((T,B),A),(C,D));\n")?;
    put(base, "B4Coutput/1-tree.newick", "((A,B),(C,D));\n")?;
    put(base, "Main/output/1-tree.newick", "(('T',A),(B,(C,D)));\n")?;
    Ok(dir)
}

#[test]
fn command_run() -> anyhow::Result<()> {
    let dir = layout()?;

    let mut cmd = Command::cargo_bin("rvp")?;
    cmd.arg("run")
        .arg(dir.path())
        .arg("-g")
        .arg("2C")
        .arg("-g")
        .arg("4C")
        .arg("-t")
        .arg("T")
        .assert()
        .success()
        .stdout("A\nB\n")
        .stderr(predicate::str::contains("B4C: no clades generated"))
        .stderr(predicate::str::contains("W4C: no clades generated"));

    let outdir = dir.path().join("SM1C1C2_output");
    assert!(outdir.join("C1B2C.newick").is_file());
    assert!(outdir.join("C2W2C.newick").is_file());
    assert!(!outdir.join("C1B4C.newick").exists());
    assert!(dir.path().join("B4Coutput/t2.newick").is_file());

    Ok(())
}

#[test]
fn command_run_report() -> anyhow::Result<()> {
    let dir = layout()?;

    let mut cmd = Command::cargo_bin("rvp")?;
    let output = cmd
        .arg("run")
        .arg(dir.path())
        .arg("-g")
        .arg("2C")
        .arg("-t")
        .arg("T")
        .arg("--report")
        .arg("--parallel")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert!(stdout.contains("Sclade\tT\n"));
    assert!(stdout.contains("Scriterion\tB\n"));
    assert!(!stdout.contains("Scriterion\tT\n"));
    assert!(stdout.contains("Soclade\tD\n"));
    assert_eq!(stdout.lines().filter(|l| l.starts_with("rVP\t")).count(), 2);

    Ok(())
}

#[test]
fn command_run_outdir_and_main() -> anyhow::Result<()> {
    let dir = layout()?;
    let outdir = dir.path().join("clades");

    let mut cmd = Command::cargo_bin("rvp")?;
    cmd.arg("run")
        .arg(dir.path())
        .arg("-g")
        .arg("2C")
        .arg("-t")
        .arg("T")
        .arg("--outdir")
        .arg(&outdir)
        .arg("--main")
        .arg(dir.path().join("nowhere.newick"))
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Soclade failed"));

    assert!(outdir.join("C1B2C.newick").is_file());

    Ok(())
}
