#[macro_export]
macro_rules! assert_none {
    ($e:expr) => {
        match $e {
            None => {}
            Some(actual) => panic!(
                "expected `None` from `{}`; actual={:?}",
                stringify!($e),
                actual
            ),
        }
    };
}

#[macro_export]
macro_rules! assert_some {
    ($e:expr) => {
        match $e {
            Some(v) => v,
            None => panic!("expected `Some` from `{}`", stringify!($e)),
        }
    };
}
