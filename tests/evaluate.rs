use assert_cmd::Command;

fn evaluate(file: &str) -> assert_cmd::assert::Assert {
    Command::cargo_bin("rlox").unwrap()
        .arg("evaluate")
        .arg(format!("tests/target/evaluate/{file}.lox"))
        .assert()
}

#[test]
fn arithmetic() {
    evaluate("arithmetic").success().stdout("9\n");
}

#[test]
fn fraction() {
    evaluate("fraction").success().stdout("2.5\n");
}

#[test]
fn negation() {
    evaluate("negation").success().stdout("true\n");
}

#[test]
fn concat() {
    evaluate("concat").success().stdout("foobar\n");
}

#[test]
fn literal_nil() {
    evaluate("literal_nil").success().stdout("nil\n");
}

#[test]
fn runtime_error() {
    evaluate("runtime_error")
        .code(70)
        .stderr("Operand must be a number.\n[line 1]\n");
}
