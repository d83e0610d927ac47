#[macro_use]
mod common;

#[cfg(test)]
mod string {
    tests! {
        multiline in string is OK
        "one"
        "two"
    }

    tests! {
        unterminated in string is ERR(65)
        "[line 3] Error: Unterminated string."
    }

    tests! {
        unexpected_character in string is ERR(65)
        "[line 1] Error: Unexpected character: @"
    }
}
