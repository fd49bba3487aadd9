//! Error types for chaintree.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
/// This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in chaintree.
///
/// These cover bad *input* only. Structural problems inside the rebalancing
/// engine (an internal node with no children, a broken leaf chain) are
/// programming-contract violations and are defended with assertions instead
/// of recoverable error paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// The requested node capacity is below the supported minimum.
    ///
    /// Fatal to the construction call only; no tree is created.
    #[error("capacity {0} is too small, must be at least {}", crate::common::config::MIN_CAPACITY)]
    InvalidCapacity(usize),

    /// Insert of a key that is already present.
    ///
    /// The tree holds unique keys; the insert is rejected and the tree is
    /// left structurally unchanged.
    #[error("key {0} already in tree")]
    DuplicateKey(i64),

    /// Delete of a key that is not present.
    ///
    /// Harmless: the tree is unchanged. Callers typically report it and
    /// continue.
    #[error("key {0} not in tree")]
    KeyNotFound(i64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::KeyNotFound(42);
        assert_eq!(format!("{}", err), "key 42 not in tree");

        let err = Error::DuplicateKey(7);
        assert_eq!(format!("{}", err), "key 7 already in tree");

        let err = Error::InvalidCapacity(2);
        assert_eq!(format!("{}", err), "capacity 2 is too small, must be at least 3");
    }

    #[test]
    fn test_result_type_alias() {
        fn might_fail() -> Result<u32> {
            Ok(42)
        }

        assert_eq!(might_fail().unwrap(), 42);
    }
}
