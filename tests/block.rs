#[macro_use]
mod common;

#[cfg(test)]
mod block {
    tests! {
        scope_restored in block is OK
        "outer"
    }

    tests! {
        nested in block is OK
        "innermost"
        "middle"
        "outer"
    }
}
