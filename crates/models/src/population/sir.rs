use popdyn_core::{DerivativeError, State};
use serde::{Deserialize, Serialize};

use crate::PopModel;

/// Susceptible-infected-recovered epidemic.
///
/// ```text
/// dS/dt = -beta * S * I
/// dI/dt =  beta * S * I - gamma * I
/// dR/dt =  gamma * I
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sir {
    /// Transmission rate.
    pub beta: f64,
    /// Recovery rate.
    pub gamma: f64,
}

impl Sir {
    #[must_use]
    pub fn new(beta: f64, gamma: f64) -> Self {
        Self { beta, gamma }
    }
}

impl PopModel for Sir {
    fn name(&self) -> &str {
        "SIR"
    }

    fn labels(&self) -> &[&str] {
        &["S", "I", "R"]
    }

    fn diff(&self, state: &State, _time: f64) -> Result<State, DerivativeError> {
        super::require_dim(state, 3)?;
        let (s, i) = (state[0], state[1]);
        let infections = self.beta * s * i;
        let recoveries = self.gamma * i;
        Ok(State::from([
            -infections,
            infections - recoveries,
            recoveries,
        ]))
    }
}
