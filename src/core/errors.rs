use super::types::SimTime;
use thiserror::Error;

/// Errors raised by the curing line simulation
///
/// Only `InvalidConfiguration` is an input problem. The rest indicate a
/// defect or misuse and are never retried.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimError {
    /// Rejected configuration parameters
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Negative or non-finite delay, or an advance target in the past
    #[error("invalid duration: {duration}")]
    InvalidDuration { duration: SimTime },

    /// Pool or lifecycle accounting would be corrupted
    #[error("precondition violated: {0}")]
    PreconditionViolation(String),

    /// Step requested before start or after stop
    #[error("simulation is not running")]
    NotRunning,

    /// Step requested after a fatal fault
    #[error("simulation halted after fault: {0}")]
    Halted(String),
}

impl SimError {
    /// Whether this error latches the engine into the faulted state
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            SimError::InvalidDuration { .. } | SimError::PreconditionViolation(_)
        )
    }
}

pub type SimResult<T> = Result<T, SimError>;
