//! Error type for pool operations.

use thiserror::Error;

/// Sentinel failure for every fallible pool operation.
///
/// All three kinds surface through the same type; the pool never partially
/// mutates its cursors before returning one of these.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// `allocate`/`reallocate` requested more bytes than `free_bytes()`.
    #[error("out of capacity: requested {requested} bytes, {available} available")]
    OutOfCapacity {
        /// Bytes the caller asked for (after alignment rounding).
        requested: usize,
        /// Bytes actually free at the time of the request.
        available: usize,
    },

    /// The requested size, or its alignment rounding, overflowed `usize`.
    #[error("requested size overflows the alignment domain")]
    Overflow,

    /// Neither anonymous mapping nor heap allocation could satisfy the
    /// requested capacity at creation time.
    #[error("failed to create pool: {0}")]
    Creation(String),
}

/// Result alias for pool operations.
pub type PoolResult<T> = Result<T, PoolError>;

impl PoolError {
    /// Builds an [`PoolError::OutOfCapacity`] from the rounded request size
    /// and the pool's current free byte count.
    pub(crate) fn out_of_capacity(requested: usize, available: usize) -> Self {
        Self::OutOfCapacity { requested, available }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_are_stable() {
        let err = PoolError::out_of_capacity(128, 64);
        assert_eq!(err.to_string(), "out of capacity: requested 128 bytes, 64 available");
        assert_eq!(PoolError::Overflow.to_string(), "requested size overflows the alignment domain");
    }
}
