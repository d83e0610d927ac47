#[macro_use]
mod common;

#[cfg(test)]
mod function {
    tests! {
        print_function in function is OK
        "<fn add>"
    }

    tests! {
        print_native in function is OK
        "<native fn clock>"
    }

    tests! {
        call_result in function is OK
        "3"
    }

    tests! {
        recursion in function is OK
        "55"
    }

    tests! {
        nil_return in function is OK
        "nil"
    }

    tests! {
        clock in function is OK
        "true"
    }

    tests! {
        arity_mismatch in function is ERR(70)
        "Expected 2 arguments but got 1."
        "[line 4]"
    }

    tests! {
        call_non_callable in function is ERR(70)
        "Can only call functions and classes."
        "[line 1]"
    }
}
