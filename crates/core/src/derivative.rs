use crate::{DerivativeError, State};

/// A function mapping `(state, time)` to the instantaneous rate of change.
///
/// The output must have the same dimension as the input state. Closures of the
/// form `Fn(&State, f64) -> Result<State, DerivativeError>` implement this
/// trait automatically.
///
/// The trait is object safe so step algorithms can accept `&dyn Derivative`.
pub trait Derivative {
    /// Evaluates the derivative at the given state and time.
    ///
    /// # Errors
    ///
    /// Returns a [`DerivativeError`] if the derivative cannot be computed.
    fn eval(&self, state: &State, time: f64) -> Result<State, DerivativeError>;
}

impl<F> Derivative for F
where
    F: Fn(&State, f64) -> Result<State, DerivativeError>,
{
    fn eval(&self, state: &State, time: f64) -> Result<State, DerivativeError> {
        self(state, time)
    }
}

/// A derivative wrapper that enforces the dimension invariant.
///
/// Every evaluation is checked against the dimension fixed at construction,
/// so a mismatch surfaces at the first offending call instead of corrupting
/// later arithmetic.
#[derive(Debug, Clone, Copy)]
pub struct Checked<'a, D: ?Sized> {
    inner: &'a D,
    dim: usize,
}

impl<'a, D: Derivative + ?Sized> Checked<'a, D> {
    /// Wraps `inner`, requiring every output to have `dim` components.
    pub fn new(inner: &'a D, dim: usize) -> Self {
        Self { inner, dim }
    }

    /// Returns the required dimension.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }
}

impl<D: Derivative + ?Sized> Derivative for Checked<'_, D> {
    fn eval(&self, state: &State, time: f64) -> Result<State, DerivativeError> {
        if state.dim() != self.dim {
            return Err(DerivativeError::StateDimension {
                expected: self.dim,
                found: state.dim(),
            });
        }

        let rate = self.inner.eval(state, time)?;
        if rate.dim() != self.dim {
            return Err(DerivativeError::DimensionMismatch {
                expected: self.dim,
                found: rate.dim(),
            });
        }

        Ok(rate)
    }
}
