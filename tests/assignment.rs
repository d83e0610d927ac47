#[macro_use]
mod common;

#[cfg(test)]
mod assignment {
    tests! {
        chained in assignment is OK
        "3"
        "3"
    }

    tests! {
        returns_value in assignment is OK
        "2"
    }

    tests! {
        invalid_target in assignment is ERR(65)
        "[line 3] Error at '=': Invalid assignment target."
    }

    tests! {
        undefined_target in assignment is ERR(70)
        "Undefined variable 'a'."
        "[line 1]"
    }
}
