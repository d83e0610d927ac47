#[macro_export]
macro_rules! tests {
    ($file:ident in $scope:ident is OK $($expected:expr)*) => {
        #[test]
        fn $file() {
            use rlox_lang::{Command, Lox};

            let mut expected = vec![$($expected),*];

            // if exists, concat expected lines with new lines
            let expected = match expected.len() {
                0 => "".to_string(),
                _ => {
                    // add empty string to end to add new line to end of output
                    expected.push("");
                    expected.join("\n")
                }
            };

            let mut output = Vec::new();
            let mut lox = Lox::new(&mut output);

            lox.run_file(Command::Run, &format!("tests/target/{}/{}.lox", stringify!($scope), stringify!($file)));

            // drop lox here to release the borrow on output
            drop(lox);
            assert_eq!(expected, std::str::from_utf8(&output).unwrap());
        }
    };

    ($file:ident in $scope:ident is ERR($code:literal) $($expected:expr)+) => {
        #[test]
        fn $file() {
            use assert_cmd::Command;
            // output concats expected with new line
            let output = vec![$($expected),+].join("\n");
            let file = format!("tests/target/{}/{}.lox", stringify!($scope), stringify!($file));

            Command::cargo_bin("rlox").unwrap()
                .args(["run", file.as_str()])
                .assert()
                .stderr(format!("{output}\n"))
                .code($code);
        }
    };
}
