#[macro_export]
macro_rules! assert_empty {
    ($e:expr) => {{
        let items = &$e;
        if !items.is_empty() {
            panic!("expected `{}` to be empty; actual={:?}", stringify!($e), items);
        }
    }};
}

/// Asserts the collection has exactly `len` items.
#[macro_export]
macro_rules! assert_len {
    ($e:expr, $len:expr) => {{
        let items = &$e;
        if items.len() != $len {
            panic!(
                "expected `{}` to have {} items; actual={:?}",
                stringify!($e),
                $len,
                items
            );
        }
    }};
}
