use std::fmt;

/// Errors reported by the training engine.
///
/// The engine is a closed numeric system with no I/O, so the taxonomy is
/// narrow: construction-time configuration problems and the two call-order
/// preconditions that would otherwise compute garbage silently.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Construction or reconfiguration received an invalid value.
    InvalidConfig(String),
    /// The input vector length did not match the configured input width.
    InvalidInputShape { expected: usize, got: usize },
    /// `backward` was called with no forward pass recorded since
    /// construction or reinitialization.
    BackwardBeforeForward,
}

pub type Result<T> = std::result::Result<T, Error>;

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Error::InvalidInputShape { expected, got } => {
                write!(f, "invalid input shape: expected {expected} values, got {got}")
            }
            Error::BackwardBeforeForward => {
                write!(f, "backward pass requested before any forward pass")
            }
        }
    }
}

impl std::error::Error for Error {}
