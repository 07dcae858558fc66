use std::{collections::HashSet, hash::Hash};

pub trait SliceUtil<T> {
    /// Returns `true` if no value appears twice
    fn is_unique(&self) -> bool
    where
        T: Eq + Hash;

    /// Values that appear more than once, in the order they first repeat
    fn duplicates(&self) -> Vec<&T>
    where
        T: Eq + Hash;
}

impl<T> SliceUtil<T> for [T] {
    fn is_unique(&self) -> bool
    where
        T: Eq + Hash,
    {
        self.duplicates().is_empty()
    }

    fn duplicates(&self) -> Vec<&T>
    where
        T: Eq + Hash,
    {
        let mut seen = HashSet::new();
        let mut duplicates = vec![];

        for el in self {
            if !seen.insert(el) && !duplicates.contains(&el) {
                duplicates.push(el);
            }
        }

        duplicates
    }
}

/// Panics with the repeated values if the slice is not unique.
#[macro_export]
macro_rules! assert_unique {
    ($slice:expr) => {{
        use $crate::slice::SliceUtil;
        match &$slice[..] {
            slice => {
                let duplicates = slice.duplicates();
                assert!(
                    duplicates.is_empty(),
                    "expected `{}` to be unique; duplicates={:?}",
                    stringify!($slice),
                    duplicates,
                );
            }
        }
    }};
}

#[macro_export]
macro_rules! assert_empty {
    ($slice:expr) => {{
        match &$slice[..] {
            slice if !slice.is_empty() => panic!(
                "expected `{}` to be empty; actual={:?}",
                stringify!($slice),
                slice
            ),
            _ => {}
        }
    }};
}
