use popdyn_core::{DerivativeError, State};
use serde::{Deserialize, Serialize};

use crate::PopModel;

/// Susceptible-infected-susceptible epidemic: recovered individuals become
/// susceptible again.
///
/// ```text
/// dS/dt = -beta * S * I + gamma * I
/// dI/dt =  beta * S * I - gamma * I
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sis {
    /// Transmission rate.
    pub beta: f64,
    /// Recovery rate.
    pub gamma: f64,
}

impl Sis {
    #[must_use]
    pub fn new(beta: f64, gamma: f64) -> Self {
        Self { beta, gamma }
    }
}

impl PopModel for Sis {
    fn name(&self) -> &str {
        "SIS"
    }

    fn labels(&self) -> &[&str] {
        &["S", "I"]
    }

    fn diff(&self, state: &State, _time: f64) -> Result<State, DerivativeError> {
        super::require_dim(state, 2)?;
        let (s, i) = (state[0], state[1]);
        let net = self.beta * s * i - self.gamma * i;
        Ok(State::from([-net, net]))
    }
}
