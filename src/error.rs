//! Error types for table construction and insertion.

use thiserror::Error;

/// Rejected table configuration. Returned before any storage is allocated.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum ConfigError {
    #[error("initial capacity must be positive, got {0}")]
    InvalidCapacity(usize),
    #[error("load factor must be in (0, 1], got {0}")]
    InvalidLoadFactor(f64),
}

/// Rejected insertion. The map is left untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PutError {
    #[error("cannot store an absent value")]
    AbsentValue,
}
