#[macro_use]
mod common;

#[cfg(test)]
mod number {
    tests! {
        integral_prints_without_decimal in number is OK
        "3"
        "100"
    }

    tests! {
        fractions in number is OK
        "3.14"
        "1.5"
    }
}
