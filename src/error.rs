//! Error types

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AttackError {
    /// Start requested with a blank target
    #[error("Enter a password first!")]
    EmptyInput,

    /// Literal search outgrew the target without matching
    #[error("target of length {length} is unreachable by real-time brute force (gave up after {attempts} attempts)")]
    UnreachableTarget { length: usize, attempts: u64 },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
