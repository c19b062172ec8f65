use popdyn_core::{Derivative, State};

use super::{StepAlgorithm, StepError};

/// The classical fourth-order Runge-Kutta method.
///
/// ```text
/// k1 = f(x_n, t_n)
/// k2 = f(x_n + h/2*k1, t_n + h/2)
/// k3 = f(x_n + h/2*k2, t_n + h/2)
/// k4 = f(x_n + h*k3, t_n + h)
/// x_{n+1} = x_n + h/6 * (k1 + 2*k2 + 2*k3 + k4)
/// ```
///
/// Halving `h` reduces the global error by a factor of about 16.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rk4;

impl StepAlgorithm for Rk4 {
    fn name(&self) -> &str {
        "RK4"
    }

    fn advance(
        &self,
        state: &State,
        time: f64,
        h: f64,
        derivative: &dyn Derivative,
    ) -> Result<State, StepError> {
        let half = h / 2.0;
        let mid = time + half;

        let k1 = derivative.eval(state, time)?;
        let k2 = derivative.eval(&state.add_scaled(half, &k1), mid)?;
        let k3 = derivative.eval(&state.add_scaled(half, &k2), mid)?;
        let k4 = derivative.eval(&state.add_scaled(h, &k3), time + h)?;

        let slope = State::weighted_sum(
            state.dim(),
            &[
                (1.0 / 6.0, &k1),
                (2.0 / 6.0, &k2),
                (2.0 / 6.0, &k3),
                (1.0 / 6.0, &k4),
            ],
        );
        Ok(state.add_scaled(h, &slope))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;

    use approx::assert_relative_eq;
    use popdyn_core::DerivativeError;

    fn cubic(_x: &State, t: f64) -> Result<State, DerivativeError> {
        Ok(State::from(3.0 * t * t))
    }

    fn rotate(x: &State, _t: f64) -> Result<State, DerivativeError> {
        Ok(State::from([-x[1], x[0]]))
    }

    #[test]
    fn exact_for_cubic_in_time() {
        // dx/dt = 3t² integrates exactly with a fourth-order method.
        let next = Rk4.advance(&State::from(1.0), 1.0, 1.0, &cubic).unwrap();

        assert_relative_eq!(next[0], 1.0 + 8.0 - 1.0, epsilon = 1e-14);
    }

    #[test]
    fn evaluates_derivative_four_times() {
        let calls = Cell::new(0);
        let counting = |x: &State, _t: f64| -> Result<State, DerivativeError> {
            calls.set(calls.get() + 1);
            Ok(x.clone())
        };

        Rk4.advance(&State::from([1.0, 2.0]), 0.0, 0.1, &counting)
            .unwrap();

        assert_eq!(calls.get(), 4);
    }

    #[test]
    fn handles_vector_rotation() {
        // x' = -y, y' = x rotates the point.
        let next = Rk4
            .advance(&State::from([1.0, 0.0]), 0.0, 0.01, &rotate)
            .unwrap();

        assert_relative_eq!(next[0], 0.01_f64.cos(), epsilon = 1e-11);
        assert_relative_eq!(next[1], 0.01_f64.sin(), epsilon = 1e-11);
    }
}
