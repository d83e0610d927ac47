#[macro_use]
mod common;

#[cfg(test)]
mod lambda {
    tests! {
        anonymous in lambda is OK
        "8"
    }

    tests! {
        print_anonymous in lambda is OK
        "<fn>"
    }

    tests! {
        named_recursion in lambda is OK
        "55"
    }

    tests! {
        as_argument in lambda is OK
        "7"
    }
}
