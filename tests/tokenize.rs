use assert_cmd::Command;

fn tokenize(file: &str) -> assert_cmd::assert::Assert {
    Command::cargo_bin("rlox").unwrap()
        .arg("tokenize")
        .arg(format!("tests/target/tokenize/{file}.lox"))
        .assert()
}

#[test]
fn literals() {
    tokenize("literals")
        .success()
        .stdout(
            "VAR var null\n\
             IDENTIFIER language null\n\
             EQUAL = null\n\
             STRING \"lox\" lox\n\
             SEMICOLON ; null\n\
             VAR var null\n\
             IDENTIFIER version null\n\
             EQUAL = null\n\
             NUMBER 1 1.0\n\
             SEMICOLON ; null\n\
             EOF  null\n",
        );
}

#[test]
fn number_formats() {
    tokenize("numbers")
        .success()
        .stdout(
            "NUMBER 42 42.0\n\
             NUMBER 3.14 3.14\n\
             NUMBER 200.00 200.0\n\
             EOF  null\n",
        );
}

#[test]
fn operators() {
    tokenize("operators")
        .success()
        .stdout(
            "BANG_EQUAL != null\n\
             EQUAL_EQUAL == null\n\
             LESS_EQUAL <= null\n\
             GREATER_EQUAL >= null\n\
             LESS < null\n\
             GREATER > null\n\
             BANG ! null\n\
             EQUAL = null\n\
             EOF  null\n",
        );
}

#[test]
fn keywords() {
    tokenize("keywords")
        .success()
        .stdout(
            "AND and null\n\
             CLASS class null\n\
             NIL nil null\n\
             SUPER super null\n\
             THIS this null\n\
             IDENTIFIER nilly null\n\
             EOF  null\n",
        );
}

#[test]
fn unexpected_character_still_prints_good_tokens() {
    tokenize("unexpected_character")
        .code(65)
        .stdout(
            "VAR var null\n\
             IDENTIFIER a null\n\
             EQUAL = null\n\
             SEMICOLON ; null\n\
             EOF  null\n",
        )
        .stderr("[line 1] Error: Unexpected character: @\n");
}

#[test]
fn unterminated_string_reports_its_line() {
    tokenize("unterminated_string")
        .code(65)
        .stderr("[line 3] Error: Unterminated string.\n");
}
