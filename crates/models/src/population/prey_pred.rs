use popdyn_core::{DerivativeError, State};
use serde::{Deserialize, Serialize};

use crate::PopModel;

/// Lotka-Volterra predator-prey dynamics.
///
/// ```text
/// dx/dt = alpha * x - beta * x * y
/// dy/dt = delta * x * y - gamma * y
/// ```
///
/// `x` is the prey population and `y` the predator population.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreyPred {
    /// Prey birth rate.
    pub alpha: f64,
    /// Predation rate.
    pub beta: f64,
    /// Predator efficiency.
    pub delta: f64,
    /// Predator death rate.
    pub gamma: f64,
}

impl PreyPred {
    #[must_use]
    pub fn new(alpha: f64, beta: f64, delta: f64, gamma: f64) -> Self {
        Self {
            alpha,
            beta,
            delta,
            gamma,
        }
    }

    /// Returns the non-trivial equilibrium `(gamma / delta, alpha / beta)`.
    #[must_use]
    pub fn equilibrium(&self) -> [f64; 2] {
        [self.gamma / self.delta, self.alpha / self.beta]
    }
}

impl PopModel for PreyPred {
    fn name(&self) -> &str {
        "PreyPred"
    }

    fn labels(&self) -> &[&str] {
        &["Prey", "Pred"]
    }

    fn diff(&self, state: &State, _time: f64) -> Result<State, DerivativeError> {
        super::require_dim(state, 2)?;
        let (x, y) = (state[0], state[1]);
        Ok(State::from([
            self.alpha * x - self.beta * x * y,
            self.delta * x * y - self.gamma * y,
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn equilibrium_has_zero_rates() {
        let model = PreyPred::new(0.1, 0.02, 0.02, 0.4);
        let rate = model.diff(&State::from(model.equilibrium()), 0.0).unwrap();

        assert_relative_eq!(rate[0], 0.0, epsilon = 1e-12);
        assert_relative_eq!(rate[1], 0.0, epsilon = 1e-12);
    }

    #[test]
    fn fixes_two_components() {
        assert_eq!(PreyPred::new(0.1, 0.02, 0.01, 0.1).dimension(), Some(2));
    }

    #[test]
    fn wrong_state_length_is_an_error() {
        let err = PreyPred::new(0.1, 0.02, 0.02, 0.4).diff(&State::from(1.0), 0.0).unwrap_err();

        assert!(matches!(
            err,
            DerivativeError::StateDimension { expected: 2, .. }
        ));
    }
}
