//! Error types for resdeploy-engine.

use thiserror::Error;

use resdeploy_core::error::RemoteError;

/// All errors that can arise from a deployment run.
#[derive(Debug, Error)]
pub enum DeployError {
    /// A remote lookup, batch, or publish round trip failed. Fatal to the
    /// run; individual task failures inside a batch are not.
    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),

    /// The transport answered with a different number of batch outcomes
    /// than tasks submitted.
    #[error("batch returned {got} outcomes for {expected} tasks")]
    OutcomeMismatch { expected: usize, got: usize },
}
