use popdyn_core::{DerivativeError, State};
use popdyn_solvers::integrate::Trajectory;
use serde::{Deserialize, Serialize};

use crate::PopModel;

/// Logistic growth whose crowding feedback arrives after a delay.
///
/// ```text
/// dx/dt = r * x(t) * (1 - x(t - T) / K)
/// ```
///
/// The lagged value is the computed state at the grid point nearest to
/// `t - T`. Before enough history exists it is the initial state, and inside
/// a multi-stage step it is the latest computed point. Without history
/// (through [`PopModel::diff`]) the current state stands in for the lagged one,
/// which reduces the model to plain logistic growth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Delay {
    /// Growth rate.
    pub r: f64,
    /// Time delay.
    #[serde(alias = "T")]
    pub t: f64,
    /// Carrying capacity.
    #[serde(alias = "K")]
    pub k: f64,
}

impl Delay {
    #[must_use]
    pub fn new(r: f64, t: f64, k: f64) -> Self {
        Self { r, t, k }
    }

    fn rate(&self, state: &State, lagged: &State) -> State {
        state
            .iter()
            .zip(lagged)
            .map(|(x, lag)| self.r * x * (1.0 - lag / self.k))
            .collect::<Vec<_>>()
            .into()
    }
}

impl PopModel for Delay {
    fn name(&self) -> &str {
        "Delay"
    }

    fn diff(&self, state: &State, _time: f64) -> Result<State, DerivativeError> {
        Ok(self.rate(state, state))
    }

    fn diff_lagged(
        &self,
        state: &State,
        time: f64,
        past: &Trajectory,
    ) -> Result<State, DerivativeError> {
        Ok(self.rate(state, past.lagged(time - self.t)))
    }
}
