//! Batch-entrypoint errors.

use thiserror::Error;

/// Errors surfaced by the batch entrypoints.
///
/// Per-object analysis never fails; malformed geometry degrades to a
/// neutral result instead. Only batch-boundary violations, where the count
/// arrays disagree with the flattened buffers they partition, are reported
/// as errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KernelError {
    /// A per-object count array does not partition its flattened buffer.
    #[error("count array for {buffer} sums to {expected} but the buffer holds {actual}")]
    CountMismatch {
        /// Name of the buffer being partitioned.
        buffer: &'static str,
        /// Sum of the count array.
        expected: usize,
        /// Actual buffer length.
        actual: usize,
    },

    /// Index-parallel batch arrays disagree on the number of objects.
    #[error("batch arrays disagree on object count: {left} vs {right}")]
    ObjectCountMismatch {
        /// Object count implied by the first array.
        left: usize,
        /// Object count implied by the second array.
        right: usize,
    },
}

impl KernelError {
    /// A count array whose sum does not match its buffer length.
    #[must_use]
    pub fn count_mismatch(buffer: &'static str, expected: usize, actual: usize) -> Self {
        Self::CountMismatch {
            buffer,
            expected,
            actual,
        }
    }

    /// Batch arrays of different object counts.
    #[must_use]
    pub fn object_count_mismatch(left: usize, right: usize) -> Self {
        Self::ObjectCountMismatch { left, right }
    }
}
