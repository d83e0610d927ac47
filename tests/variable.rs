#[macro_use]
mod common;

#[cfg(test)]
mod variable {
    tests! {
        redeclare_global in variable is OK
        "2"
    }

    tests! {
        uninitialized_is_nil in variable is OK
        "nil"
    }

    tests! {
        shadowing in variable is OK
        "local"
        "global"
    }

    tests! {
        capture_before_shadow in variable is OK
        "global"
        "global"
    }

    tests! {
        redeclare_local in variable is ERR(65)
        "[line 3] Error at 'a': Already a variable with this name in this scope."
    }

    tests! {
        use_in_own_initializer in variable is ERR(65)
        "[line 2] Error at 'a': Can't read local variable in its own initializer."
    }

    tests! {
        undefined in variable is ERR(70)
        "Undefined variable 'x'."
        "[line 1]"
    }
}
