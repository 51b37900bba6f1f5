//! Error types.
//!
//! - [`TiterError`] is what the engine returns. Every failure is total: there is
//!   no partial result to salvage, the caller has to correct the input.
//! - [`AppError`] is what the `titer` binary reports (message + process exit code).

use serde::Serialize;
use thiserror::Error;

/// Why a dilution series cannot produce an endpoint estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DegenerateReason {
    /// No well was positive at any dilution.
    AllNegative,
    /// Every well was positive at every dilution.
    AllPositive,
    /// The two interpolation points have the same percent positive.
    ZeroDifferentiation,
}

impl std::fmt::Display for DegenerateReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            DegenerateReason::AllNegative => {
                "all dilutions are negative; titer is below the tested range"
            }
            DegenerateReason::AllPositive => {
                "all dilutions are positive; titer exceeds the tested range"
            }
            DegenerateReason::ZeroDifferentiation => {
                "endpoint points have identical percent positive"
            }
        };
        f.write_str(text)
    }
}

/// Engine errors.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TiterError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("degenerate dilution series: {0}")]
    DegenerateSeries(DegenerateReason),

    #[error("no 50% endpoint found: {0}")]
    NoEndpointFound(String),
}

impl TiterError {
    pub fn invalid(message: impl Into<String>) -> Self {
        TiterError::InvalidInput(message.into())
    }
}

pub type Result<T> = std::result::Result<T, TiterError>;

/// Error surfaced by the binary.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl From<TiterError> for AppError {
    fn from(err: TiterError) -> Self {
        let exit_code = match err {
            TiterError::InvalidInput(_) => 2,
            TiterError::DegenerateSeries(_) | TiterError::NoEndpointFound(_) => 3,
        };
        AppError::new(exit_code, err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_errors_map_to_exit_codes() {
        let invalid: AppError = TiterError::invalid("volume must be > 0").into();
        assert_eq!(invalid.exit_code(), 2);
        assert_eq!(invalid.to_string(), "invalid input: volume must be > 0");

        let degenerate: AppError = TiterError::DegenerateSeries(DegenerateReason::AllPositive).into();
        assert_eq!(degenerate.exit_code(), 3);
        assert!(degenerate.to_string().contains("exceeds the tested range"));
    }
}
