use std::ops::Index;

use crate::ConfigError;

/// A snapshot of all modeled population quantities at one time point.
///
/// A `State` is an ordered, fixed-length vector of real numbers. Step
/// algorithms never mutate a `State` in place; every operation that changes
/// values returns a new one, so states already recorded in a trajectory stay
/// untouched.
///
/// The same type carries derivatives (rates of change), since a derivative has
/// the same dimension as the state it was evaluated at.
#[derive(Debug, Clone, PartialEq)]
pub struct State(Vec<f64>);

impl State {
    /// Creates a state from its components without validation.
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    /// Creates a state of dimension `dim` with every component set to zero.
    #[must_use]
    pub fn zeros(dim: usize) -> Self {
        Self(vec![0.0; dim])
    }

    /// Checks that the state can seed an integration run.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyState`] if the state has no components, or
    /// [`ConfigError::NonFiniteState`] if any component is NaN or infinite.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.0.is_empty() {
            return Err(ConfigError::EmptyState);
        }
        if let Some(index) = self.0.iter().position(|x| !x.is_finite()) {
            return Err(ConfigError::NonFiniteState { index });
        }
        Ok(())
    }

    /// Returns the number of components.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the state has no components.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the components as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    /// Consumes the state and returns its components.
    #[must_use]
    pub fn into_vec(self) -> Vec<f64> {
        self.0
    }

    /// Returns an iterator over the components.
    pub fn iter(&self) -> std::slice::Iter<'_, f64> {
        self.0.iter()
    }

    /// Returns `true` if every component is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.0.iter().all(|x| x.is_finite())
    }

    /// Returns `self + scale * rate`.
    ///
    /// Both states must have the same dimension; callers validate this before
    /// stepping.
    #[must_use]
    pub fn add_scaled(&self, scale: f64, rate: &State) -> State {
        debug_assert_eq!(self.dim(), rate.dim());
        let values = self
            .0
            .iter()
            .zip(rate.0.iter())
            .map(|(x, dx)| x + scale * dx)
            .collect();
        State(values)
    }

    /// Returns the component-wise sum of `terms`, each scaled by its weight.
    ///
    /// Used to combine Runge-Kutta stages: `Σ wᵢ·kᵢ`.
    #[must_use]
    pub fn weighted_sum(dim: usize, terms: &[(f64, &State)]) -> State {
        let mut values = vec![0.0; dim];
        for (weight, term) in terms {
            debug_assert_eq!(dim, term.dim());
            for (acc, x) in values.iter_mut().zip(term.0.iter()) {
                *acc += weight * x;
            }
        }
        State(values)
    }

    /// Returns the largest component-wise difference between two states,
    /// each scaled by `max(1, |self_i|)`.
    ///
    /// The scaling makes the measure absolute for small populations and
    /// relative for large ones.
    #[must_use]
    pub fn scaled_max_diff(&self, other: &State) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| (a - b).abs() / a.abs().max(1.0))
            .fold(0.0, f64::max)
    }
}

impl From<Vec<f64>> for State {
    fn from(values: Vec<f64>) -> Self {
        Self(values)
    }
}

impl From<&[f64]> for State {
    fn from(values: &[f64]) -> Self {
        Self(values.to_vec())
    }
}

impl<const N: usize> From<[f64; N]> for State {
    fn from(values: [f64; N]) -> Self {
        Self(values.to_vec())
    }
}

/// A scalar population is a one-component state.
impl From<f64> for State {
    fn from(value: f64) -> Self {
        Self(vec![value])
    }
}

impl Index<usize> for State {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a State {
    type Item = &'a f64;
    type IntoIter = std::slice::Iter<'a, f64>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
