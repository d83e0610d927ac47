#[macro_use]
mod common;

#[cfg(test)]
mod class {
    tests! {
        print_class in class is OK
        "Foo"
    }

    tests! {
        print_instance in class is OK
        "Foo instance"
    }

    tests! {
        method in class is OK
        "hi"
    }

    tests! {
        this_in_method in class is OK
        "Egotist instance"
    }

    tests! {
        method_on_missing in class is ERR(70)
        "Undefined property 'bar'."
        "[line 2]"
    }
}
