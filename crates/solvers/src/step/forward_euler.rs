use popdyn_core::{Derivative, State, StepIntegrable};

use super::{StepAlgorithm, StepError};

/// The explicit first-order Euler method.
///
/// ```text
/// x_{n+1} = x_n + h * f(x_n, t_n)
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ForwardEuler;

impl StepAlgorithm for ForwardEuler {
    fn name(&self) -> &str {
        "FwdEuler"
    }

    fn advance(
        &self,
        state: &State,
        time: f64,
        h: f64,
        derivative: &dyn Derivative,
    ) -> Result<State, StepError> {
        let rate = derivative.eval(state, time)?;
        Ok(state.step(&rate, h))
    }
}
