use popdyn_core::{DerivativeError, State};
use serde::{Deserialize, Serialize};

use crate::PopModel;

/// Infection spreading without recovery.
///
/// ```text
/// dS/dt = -beta * S * I
/// dI/dt =  beta * S * I
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InfecDis {
    /// Transmission rate.
    pub beta: f64,
}

impl InfecDis {
    #[must_use]
    pub fn new(beta: f64) -> Self {
        Self { beta }
    }
}

impl PopModel for InfecDis {
    fn name(&self) -> &str {
        "InfecDis"
    }

    fn labels(&self) -> &[&str] {
        &["S", "I"]
    }

    fn diff(&self, state: &State, _time: f64) -> Result<State, DerivativeError> {
        super::require_dim(state, 2)?;
        let infections = self.beta * state[0] * state[1];
        Ok(State::from([-infections, infections]))
    }
}
