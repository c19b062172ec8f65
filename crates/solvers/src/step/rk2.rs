use popdyn_core::{Derivative, State};

use super::{StepAlgorithm, StepError};

/// Heun's second-order Runge-Kutta method.
///
/// ```text
/// k1 = f(x_n, t_n)
/// k2 = f(x_n + h*k1, t_n + h)
/// x_{n+1} = x_n + h/2 * (k1 + k2)
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rk2;

impl StepAlgorithm for Rk2 {
    fn name(&self) -> &str {
        "RK2"
    }

    fn advance(
        &self,
        state: &State,
        time: f64,
        h: f64,
        derivative: &dyn Derivative,
    ) -> Result<State, StepError> {
        let k1 = derivative.eval(state, time)?;
        let k2 = derivative.eval(&state.add_scaled(h, &k1), time + h)?;

        let slope = State::weighted_sum(state.dim(), &[(0.5, &k1), (0.5, &k2)]);
        Ok(state.add_scaled(h, &slope))
    }
}
