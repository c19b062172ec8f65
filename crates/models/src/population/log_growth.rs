use popdyn_core::{DerivativeError, State};
use serde::{Deserialize, Serialize};

use crate::PopModel;

/// Logistic growth, `dx/dt = r * x * (1 - x / M)`, applied to each component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogGrowth {
    /// Carrying capacity.
    #[serde(alias = "M")]
    pub m: f64,
    /// Intrinsic growth rate.
    pub r: f64,
}

impl LogGrowth {
    #[must_use]
    pub fn new(m: f64, r: f64) -> Self {
        Self { m, r }
    }
}

impl PopModel for LogGrowth {
    fn name(&self) -> &str {
        "LogGrowth"
    }

    fn diff(&self, state: &State, _time: f64) -> Result<State, DerivativeError> {
        Ok(state
            .iter()
            .map(|x| self.r * x * (1.0 - x / self.m))
            .collect::<Vec<_>>()
            .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn carrying_capacity_is_an_equilibrium() {
        let model = LogGrowth::new(3540.0, 0.04);

        assert_relative_eq!(model.diff(&State::from(3540.0), 0.0).unwrap()[0], 0.0);
        assert_relative_eq!(model.diff(&State::from(0.0), 0.0).unwrap()[0], 0.0);
    }

    #[test]
    fn growth_peaks_at_half_capacity() {
        let model = LogGrowth::new(100.0, 0.5);
        let rate = model.diff(&State::from(50.0), 0.0).unwrap();

        assert_relative_eq!(rate[0], 12.5);
    }
}
