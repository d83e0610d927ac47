#[macro_use]
mod common;

#[cfg(test)]
mod constructor {
    tests! {
        init_args in constructor is OK
        "3"
    }

    tests! {
        bare_return_yields_this in constructor is OK
        "true"
    }

    tests! {
        direct_call_returns_this in constructor is OK
        "true"
    }

    tests! {
        arity in constructor is ERR(70)
        "Expected 2 arguments but got 1."
        "[line 6]"
    }

    tests! {
        no_init_takes_no_arguments in constructor is ERR(70)
        "Expected 0 arguments but got 1."
        "[line 2]"
    }

    tests! {
        return_value in constructor is ERR(65)
        "[line 3] Error at 'return': Can't return a value from an initializer."
    }
}
