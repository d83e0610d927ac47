#[macro_use]
mod common;

#[cfg(test)]
mod for_stmt {
    tests! {
        loop_counts in for_stmt is OK
        "0"
        "1"
        "2"
    }

    tests! {
        existing_variable in for_stmt is OK
        "0"
        "1"
    }

    tests! {
        return_skips_increment in for_stmt is OK
        "0"
    }
}
