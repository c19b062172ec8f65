//! Step algorithms: rules for advancing a state by one time increment.
//!
//! Every algorithm implements [`StepAlgorithm::advance`], which takes the
//! current state `x`, time `t`, step `h`, and derivative `f`, and returns the
//! next state without mutating `x`. Any type implementing the trait composes
//! with the [`integrate`](crate::integrate) driver unchanged, which makes it
//! the extension point for custom numerical methods.
//!
//! | Algorithm         | Order | Evaluations per step        |
//! |-------------------|-------|-----------------------------|
//! | [`ForwardEuler`]  | 1     | 1                           |
//! | [`ModifiedEuler`] | 2     | 1 + one per fixed-point pass |
//! | [`Rk2`]           | 2     | 2                           |
//! | [`Rk4`]           | 4     | 4                           |

mod forward_euler;
mod modified_euler;
mod rk2;
mod rk4;

pub use forward_euler::ForwardEuler;
pub use modified_euler::{DEFAULT_EPS, DEFAULT_MAX_ITERS, ModifiedEuler, ModifiedEulerConfig};
pub use rk2::Rk2;
pub use rk4::Rk4;

use popdyn_core::{Derivative, DerivativeError, State};

/// A rule for advancing a state vector by one time increment.
///
/// Implementations must:
///
/// - return a state with the same dimension as `state`
/// - leave `state` untouched
/// - evaluate `derivative` a bounded number of times
pub trait StepAlgorithm {
    /// Returns a short name used in logs.
    fn name(&self) -> &str;

    /// Computes the state at `time + h` from the state at `time`.
    ///
    /// # Errors
    ///
    /// Returns [`StepError::Derivative`] if any derivative evaluation fails,
    /// or a variant-specific error such as [`StepError::NonConvergence`].
    fn advance(
        &self,
        state: &State,
        time: f64,
        h: f64,
        derivative: &dyn Derivative,
    ) -> Result<State, StepError>;
}

impl<A: StepAlgorithm + ?Sized> StepAlgorithm for Box<A> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn advance(
        &self,
        state: &State,
        time: f64,
        h: f64,
        derivative: &dyn Derivative,
    ) -> Result<State, StepError> {
        (**self).advance(state, time, h, derivative)
    }
}

/// Errors that can occur while advancing a single step.
#[derive(Debug, thiserror::Error)]
pub enum StepError {
    #[error(transparent)]
    Derivative(#[from] DerivativeError),

    #[error(
        "fixed-point iteration did not converge after {iterations} iterations (residual {residual:e})"
    )]
    NonConvergence { iterations: usize, residual: f64 },
}
