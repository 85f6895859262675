use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn command_name() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("rvp")?;
    let output = cmd.arg("name").arg("tests/newick/abcd.nwk").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout, "((A,B)N2,(C,D)N3)N1;\n");

    Ok(())
}

#[test]
fn command_name_prefix_stdin() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("rvp")?;
    let output = cmd
        .arg("name")
        .arg("stdin")
        .arg("-p")
        .arg("Node")
        .write_stdin("((A,B)Node1,C);")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    // Node1 is taken, so the root gets the next free number
    assert_eq!(stdout, "((A,B)Node1,C)Node2;\n");

    Ok(())
}

#[test]
fn command_name_keeps_quotes() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("rvp")?;
    let output = cmd.arg("name").arg("tests/newick/main.nwk").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(stdout.contains("('T',A)N2"));

    Ok(())
}

#[test]
fn command_path() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("rvp")?;
    let output = cmd.arg("path").arg("tests/newick/abcd.nwk").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout, "A\tN2\tN1\tN3\tC\nN1\n");

    Ok(())
}

#[test]
fn command_path_single_leaf() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("rvp")?;
    cmd.arg("path")
        .arg("stdin")
        .write_stdin("(A);")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    Ok(())
}

#[test]
fn command_split() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("rvp")?;
    let output = cmd.arg("split").arg("tests/newick/b2c.nwk").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout.lines().count(), 2);
    assert_eq!(stdout, "((T,A)N4,B)N2;\n((C,D)N3)N1;\n");

    Ok(())
}

#[test]
fn command_split_degenerate() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("rvp")?;
    cmd.arg("split")
        .arg("tests/newick/abcd.nwk")
        .assert()
        .success()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("midpoint N1 is the root"));

    Ok(())
}

#[test]
fn command_malformed_input() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("rvp")?;
    cmd.arg("name")
        .arg("stdin")
        .write_stdin("((A,B);")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed Newick"));

    Ok(())
}

#[test]
fn command_missing_file() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("rvp")?;
    cmd.arg("split")
        .arg("tests/newick/nowhere.nwk")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Tree file not found"));

    Ok(())
}
