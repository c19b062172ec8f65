use popdyn_core::{DerivativeError, State};
use serde::{Deserialize, Serialize};

use crate::PopModel;

/// Exponential growth, `dX/dt = k * X`, applied to each component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContGrowth {
    /// Growth rate constant.
    pub k: f64,
}

impl ContGrowth {
    #[must_use]
    pub fn new(k: f64) -> Self {
        Self { k }
    }
}

impl PopModel for ContGrowth {
    fn name(&self) -> &str {
        "ContGrowth"
    }

    fn diff(&self, state: &State, _time: f64) -> Result<State, DerivativeError> {
        Ok(state.iter().map(|x| self.k * x).collect::<Vec<_>>().into())
    }
}
