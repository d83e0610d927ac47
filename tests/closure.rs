#[macro_use]
mod common;

#[cfg(test)]
mod closure {
    tests! {
        counter in closure is OK
        "1"
        "2"
        "3"
    }

    tests! {
        siblings_share in closure is OK
        "42"
    }

    tests! {
        close_over_parameter in closure is OK
        "param"
    }
}
