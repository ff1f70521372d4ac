use assert_cmd::prelude::*; // Add methods on commands
use predicates::prelude::*; // Used for writing assertions
use std::fs;
use std::path::Path;
use std::process::Command; // Run programs
use tempfile::tempdir;

fn run(path: &Path, query: &str) -> Command {
    let mut cmd = Command::cargo_bin("lexfind").unwrap();
    cmd.arg(path).arg(query);
    cmd
}

fn found(path: &Path, line: usize, column: usize, lexeme: &str) -> String {
    format!(
        "found query '{}' @ <{}:{}:{}>\n",
        lexeme,
        path.display(),
        line,
        column
    )
}

#[test]
fn missing_arguments() {
    let mut cmd = Command::cargo_bin("lexfind").unwrap();
    cmd.assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("Usage:"));

    let mut cmd = Command::cargo_bin("lexfind").unwrap();
    cmd.arg("some/path");
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Missing required argument: QUERY"));
}

#[test]
fn unknown_flag() {
    let mut cmd = Command::cargo_bin("lexfind").unwrap();
    cmd.arg("--frobnicate").arg("p").arg("q");
    cmd.assert()
        .code(2)
        .stderr(predicate::str::contains("Unknown flag: --frobnicate"));
}

#[test]
fn help() {
    let mut cmd = Command::cargo_bin("lexfind").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .code(0)
        .stdout(predicate::str::contains("Usage:").and(predicate::str::contains("--depth")));
}

#[test]
fn print_options() {
    let mut cmd = Command::cargo_bin("lexfind").unwrap();
    cmd.arg("--options").arg("-d").arg("4").arg("dir").arg("foo");
    cmd.assert()
        .code(0)
        .stdout(predicate::str::contains("- Depth: 4").and(predicate::str::contains("- Maximum length: 1024")));
}

#[test]
fn file_doesnt_exist() {
    let mut cmd = run(Path::new("test/file/doesnt/exist"), "foo");

    // Warnings are only printed with the default log filter.
    cmd.env_remove("RUST_LOG")
        .assert()
        .code(0)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("No such file or directory"));
}

#[test]
fn matches_in_single_file() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("main.txt");
    fs::write(&file, "foo bar foo\nbaz foo").unwrap();

    let expected = [
        found(&file, 1, 1, "foo"),
        found(&file, 1, 9, "foo"),
        found(&file, 2, 17, "foo"),
    ]
    .concat();
    run(&file, "foo").assert().code(0).stdout(expected);
}

#[test]
fn line_columns() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("main.txt");
    fs::write(&file, "foo bar foo\nbaz foo").unwrap();

    let expected = [
        found(&file, 1, 1, "foo"),
        found(&file, 1, 9, "foo"),
        found(&file, 2, 5, "foo"),
    ]
    .concat();
    run(&file, "foo")
        .arg("--line-columns")
        .assert()
        .code(0)
        .stdout(expected);
}

#[test]
fn drop_trailing() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("main.txt");
    fs::write(&file, "foo bar foo\nbaz foo").unwrap();

    let expected = [found(&file, 1, 1, "foo"), found(&file, 1, 9, "foo")].concat();
    run(&file, "foo")
        .arg("--drop-trailing")
        .assert()
        .code(0)
        .stdout(expected);
}

#[test]
fn matches_in_directory() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "hello").unwrap();
    fs::write(dir.path().join("b.txt"), "hello world").unwrap();

    let expected = [
        found(&dir.path().join("a.txt"), 1, 1, "hello"),
        found(&dir.path().join("b.txt"), 1, 1, "hello"),
    ]
    .concat();
    run(dir.path(), "hello")
        .arg("--sort")
        .assert()
        .code(0)
        .stdout(expected);
}

#[test]
fn directory_in_filesystem_order() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "hello").unwrap();
    fs::write(dir.path().join("b.txt"), "hello world").unwrap();

    run(dir.path(), "hello")
        .assert()
        .code(0)
        .stdout(
            predicate::str::contains(found(&dir.path().join("a.txt"), 1, 1, "hello"))
                .and(predicate::str::contains(found(&dir.path().join("b.txt"), 1, 1, "hello")))
                .and(predicate::function(|out: &str| out.lines().count() == 2)),
        );
}

#[test]
fn nested_directories_need_depth() {
    let dir = tempdir().unwrap();
    fs::create_dir(dir.path().join("sub")).unwrap();
    fs::write(dir.path().join("sub").join("deep.txt"), "needle").unwrap();

    run(dir.path(), "needle")
        .assert()
        .code(0)
        .stdout(predicate::str::is_empty());

    run(dir.path(), "needle")
        .arg("--depth=2")
        .assert()
        .code(0)
        .stdout(found(&dir.path().join("sub").join("deep.txt"), 1, 1, "needle"));
}

#[test]
fn query_longer_than_any_token() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("main.txt");
    fs::write(&file, "foo bar baz\n").unwrap();

    run(&file, "foobarbazqux")
        .assert()
        .code(0)
        .stdout(predicate::str::is_empty());
}

#[test]
fn query_over_length_limit() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("main.txt");
    fs::write(&file, "foo\n").unwrap();

    run(&file, "foo")
        .arg("--max-len")
        .arg("2")
        .assert()
        .code(1)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("query is 3 bytes"));
}

#[test]
fn json_output() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("main.txt");
    fs::write(&file, "x\n  x\n").unwrap();

    let assert = run(&file, "x").arg("--json").assert().code(0);
    let stdout = String::from_utf8_lossy(&assert.get_output().stdout).to_string();
    let values = stdout
        .lines()
        .map(|l| serde_json::from_str::<serde_json::Value>(l).expect("valid json line"))
        .collect::<Vec<_>>();
    assert_eq!(values.len(), 2);
    assert_eq!(values[0]["line"], 1);
    assert_eq!(values[1]["line"], 2);
    assert_eq!(values[1]["column"], 5);
    assert_eq!(values[1]["path"], &*file.to_string_lossy());
}

#[test]
fn query_starting_with_dash() {
    let dir = tempdir().unwrap();
    let file = dir.path().join("dashes.txt");
    fs::write(&file, "a --- b -1").unwrap();

    run(&file, "---")
        .assert()
        .code(0)
        .stdout(found(&file, 1, 3, "---"));
    run(&file, "-1")
        .arg("--no-color")
        .assert()
        .code(0)
        .stdout(found(&file, 1, 9, "-1"));
}

#[cfg(unix)]
#[test]
fn broken_child_is_skipped() {
    let dir = tempdir().unwrap();
    std::os::unix::fs::symlink(dir.path().join("missing"), dir.path().join("a_broken")).unwrap();
    fs::write(dir.path().join("b.txt"), "hello").unwrap();

    run(dir.path(), "hello")
        .env_remove("RUST_LOG")
        .assert()
        .code(0)
        .stdout(found(&dir.path().join("b.txt"), 1, 1, "hello"))
        .stderr(predicate::str::contains("a_broken"));
}
