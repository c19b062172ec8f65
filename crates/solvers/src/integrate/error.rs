use popdyn_core::ConfigError;

use super::Trajectory;
use crate::StepError;

/// Errors that can occur during an integration run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The run was rejected before any computation.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A step failed and the run was aborted.
    ///
    /// `partial` holds every point computed before the failure, for
    /// diagnostics only.
    #[error("step {step} from t = {time} failed: {source}")]
    Step {
        step: usize,
        time: f64,
        #[source]
        source: StepError,
        partial: Box<Trajectory>,
    },
}

impl Error {
    /// Returns the trajectory computed before a step failure, if any.
    #[must_use]
    pub fn partial(&self) -> Option<&Trajectory> {
        match self {
            Error::Config(_) => None,
            Error::Step { partial, .. } => Some(partial),
        }
    }
}
