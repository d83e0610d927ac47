#[macro_use]
mod common;

#[cfg(test)]
mod while_stmt {
    tests! {
        countdown in while_stmt is OK
        "3"
        "2"
        "1"
    }

    tests! {
        false_condition in while_stmt is OK
        "after"
    }
}
