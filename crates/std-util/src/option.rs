/// Panics unless the expression is `None`.
#[macro_export]
macro_rules! assert_none {
    ($e:expr) => {
        match &$e {
            None => {}
            actual => panic!("expected `None` from `{}`; actual={:?}", stringify!($e), actual),
        }
    };
}

/// Unwraps a `Some`, naming the expression when it is `None`.
#[macro_export]
macro_rules! assert_some {
    ($e:expr) => {
        match $e {
            Some(v) => v,
            None => panic!("expected `Some` from `{}`; actual=None", stringify!($e)),
        }
    };
}
