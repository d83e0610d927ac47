use assert_cmd::Command;

use rlox_lang::{error, Lox};

#[test]
fn error_flags_reset() {
    let mut output = Vec::new();
    let mut lox = Lox::new(&mut output);
    lox.run("print |;");
    drop(lox);

    assert!(error::did_error());
    error::reset_error();
    assert!(!error::did_error());
}

#[test]
fn unknown_command() {
    Command::cargo_bin("rlox").unwrap()
        .args(["transmogrify", "whatever.lox"])
        .assert()
        .code(64)
        .stderr("Unknown command: transmogrify\n");
}

#[test]
fn missing_arguments() {
    Command::cargo_bin("rlox").unwrap()
        .arg("run")
        .assert()
        .code(1)
        .stderr("Usage: rlox <tokenize|parse|evaluate|run> <path>\n");
}

#[test]
fn unreadable_file() {
    Command::cargo_bin("rlox").unwrap()
        .args(["run", "tests/target/misc/does_not_exist.lox"])
        .assert()
        .code(1);
}

#[test]
fn empty_file() {
    Command::cargo_bin("rlox").unwrap()
        .args(["run", "tests/target/misc/empty.lox"])
        .assert()
        .success()
        .stdout("");
}
