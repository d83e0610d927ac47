#[macro_use]
mod common;

#[cfg(test)]
mod field {
    tests! {
        set_get in field is OK
        "apple"
    }

    tests! {
        method_as_value in field is OK
        "hello"
    }

    tests! {
        fields_shadow_methods in field is OK
        "field"
    }

    tests! {
        get_on_non_instance in field is ERR(70)
        "Only instances have properties."
        "[line 2]"
    }

    tests! {
        set_on_non_instance in field is ERR(70)
        "Only instances have fields."
        "[line 2]"
    }

    tests! {
        undefined_property in field is ERR(70)
        "Undefined property 'missing'."
        "[line 2]"
    }
}
