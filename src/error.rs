use thiserror::Error;

/// Error type for field arithmetic and secret splitting
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SsssError {
    /// Value is not an element of GF(2^8) (must be 0..=255)
    #[error("Invalid field element {0}")]
    InvalidElement(i64),

    /// Division by zero or inverse of zero
    #[error("Division by zero in GF(2^8)")]
    DivisionByZero,

    /// Invalid threshold value (must be at least 2)
    #[error("Invalid threshold value {0}")]
    InvalidThreshold(usize),

    /// Total share count is below the threshold
    #[error("Need at least {threshold} total shares, got {total_shares}")]
    InsufficientShares { threshold: usize, total_shares: usize },

    /// More shares requested than there are nonzero field elements
    #[error("Can't make more than 255 distinct shares, got {0}")]
    TooManyShares(usize),

    /// Message cannot be converted to one byte per character
    #[error("Unsupported input type: {0}")]
    UnsupportedInputType(String),

    /// Share accessor used past the end of the share
    #[error("Index {index} out of range ({len} values)")]
    IndexOutOfRange { index: usize, len: usize },

    /// Invalid share encoding
    #[error("Invalid share format")]
    InvalidShareFormat,

    /// The entropy source failed or returned too few bytes
    #[error("Entropy source failure: {0}")]
    EntropyFailure(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, SsssError>;
