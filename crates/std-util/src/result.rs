/// Unwraps the `Err` variant, panicking with the `Ok` value otherwise.
///
/// Extra arguments are formatted into the panic message.
#[macro_export]
macro_rules! assert_err {
    ($e:expr $(, $($t:tt)* )?) => {
        match $e {
            Err(e) => e,
            Ok(actual) => {
                #[allow(unused_mut)]
                let mut msg = format!(
                    "expected `Err` from `{}`; actual=Ok({:?})",
                    stringify!($e),
                    actual
                );

                $(
                    msg.push_str(", ");
                    msg.push_str(&format!($($t)*));
                )?

                panic!("{}", msg);
            }
        }
    };
}

/// Unwraps the `Ok` variant, panicking with the error's `Display` otherwise.
#[macro_export]
macro_rules! assert_ok {
    ($e:expr) => {
        match $e {
            Ok(v) => v,
            Err(err) => panic!("expected `Ok` from `{}`; error={}", stringify!($e), err),
        }
    };
}
