use crate::State;

/// A trait for types that can be stepped using their derivative.
///
/// Implementing this trait lets explicit step algorithms advance the type via
/// `value + derivative * delta`, where the derivative is with respect to
/// `Delta`. For population models `Delta` is a plain `f64` time step.
pub trait StepIntegrable<Delta> {
    /// The derivative of the type with respect to `Delta`.
    type Derivative;

    /// Returns the value after stepping with a derivative and step size.
    #[must_use]
    fn step(&self, derivative: &Self::Derivative, delta: Delta) -> Self;
}

impl StepIntegrable<f64> for State {
    type Derivative = State;

    fn step(&self, derivative: &State, delta: f64) -> Self {
        self.add_scaled(delta, derivative)
    }
}
