//! Internal helper macros.

/// Early-returns with `$error` when `$predicate` does not hold.
///
/// The value-parser equivalent of `assert!`: validation failures become
/// `Err` instead of panics.
macro_rules! ensure {
    ($predicate:expr, $error:expr) => {
        if !$predicate {
            return Err($error);
        }
    };
}

pub(crate) use ensure;
