use popdyn_core::{DerivativeError, State};
use popdyn_solvers::integrate::Trajectory;

/// A population system defined by its derivative.
///
/// `diff` is the single required override: every model supplies its own rate
/// equations. Models whose equations depend on past states override
/// `diff_lagged` as well.
pub trait PopModel {
    /// Returns a short display name.
    fn name(&self) -> &str;

    /// Returns the component labels.
    ///
    /// A non-empty slice fixes the model's dimension. An empty slice means the
    /// equations apply component-wise to any dimension.
    fn labels(&self) -> &[&str] {
        &[]
    }

    /// Returns the required state dimension, if the model fixes one.
    fn dimension(&self) -> Option<usize> {
        let labels = self.labels();
        (!labels.is_empty()).then_some(labels.len())
    }

    /// Computes the rate of change at `state` and `time`.
    ///
    /// # Errors
    ///
    /// Returns a [`DerivativeError`] if the rates cannot be computed.
    fn diff(&self, state: &State, time: f64) -> Result<State, DerivativeError>;

    /// Computes the rate of change with access to the trajectory so far.
    ///
    /// The default ignores `past` and calls [`PopModel::diff`].
    ///
    /// # Errors
    ///
    /// Returns a [`DerivativeError`] if the rates cannot be computed.
    fn diff_lagged(
        &self,
        state: &State,
        time: f64,
        past: &Trajectory,
    ) -> Result<State, DerivativeError> {
        let _ = past;
        self.diff(state, time)
    }
}

impl<M: PopModel + ?Sized> PopModel for Box<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn labels(&self) -> &[&str] {
        (**self).labels()
    }

    fn dimension(&self) -> Option<usize> {
        (**self).dimension()
    }

    fn diff(&self, state: &State, time: f64) -> Result<State, DerivativeError> {
        (**self).diff(state, time)
    }

    fn diff_lagged(
        &self,
        state: &State,
        time: f64,
        past: &Trajectory,
    ) -> Result<State, DerivativeError> {
        (**self).diff_lagged(state, time, past)
    }
}
