use popdyn_core::{ConfigError, TimeGrid};
use popdyn_solvers::ModifiedEulerConfig;

/// Default integration step size.
pub const DEFAULT_STEP: f64 = 1e-2;

/// Default Modified Euler convergence tolerance.
pub const DEFAULT_EPS: f64 = popdyn_solvers::step::DEFAULT_EPS;

/// Default Modified Euler iteration cap.
pub const DEFAULT_MAX_ITERS: usize = popdyn_solvers::step::DEFAULT_MAX_ITERS;

/// Time bounds and numerical parameters for one simulation.
///
/// Only `tmin` and `tmax` are required; the rest start at their named
/// defaults. `eps` and `max_iters` only affect Modified Euler.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Settings {
    pub tmin: f64,
    pub tmax: f64,
    pub h: f64,
    pub eps: f64,
    pub max_iters: usize,
}

impl Settings {
    /// Creates settings for `[tmin, tmax]` with default step and tolerances.
    #[must_use]
    pub fn new(tmin: f64, tmax: f64) -> Self {
        Self {
            tmin,
            tmax,
            h: DEFAULT_STEP,
            eps: DEFAULT_EPS,
            max_iters: DEFAULT_MAX_ITERS,
        }
    }

    /// Sets the step size.
    #[must_use]
    pub fn with_step(mut self, h: f64) -> Self {
        self.h = h;
        self
    }

    /// Sets the Modified Euler convergence tolerance.
    #[must_use]
    pub fn with_eps(mut self, eps: f64) -> Self {
        self.eps = eps;
        self
    }

    /// Sets the Modified Euler iteration cap.
    #[must_use]
    pub fn with_max_iters(mut self, max_iters: usize) -> Self {
        self.max_iters = max_iters;
        self
    }

    /// Builds the validated time grid.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for a non-positive step or an empty interval.
    pub fn grid(&self) -> Result<TimeGrid, ConfigError> {
        TimeGrid::new(self.tmin, self.tmax, self.h)
    }

    /// Builds the validated Modified Euler config.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for an invalid tolerance or a zero cap.
    pub fn modified_euler(&self) -> Result<ModifiedEulerConfig, ConfigError> {
        ModifiedEulerConfig::new(self.eps, self.max_iters)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[test]
    fn defaults_are_named_constants() {
        let settings = Settings::new(0.0, 1.0);

        assert_relative_eq!(settings.h, 1e-2);
        assert_relative_eq!(settings.eps, 1e-10);
        assert_eq!(settings.max_iters, 100);
    }

    #[test]
    fn builders_override_defaults() {
        let settings = Settings::new(0.0, 1.0)
            .with_step(0.5)
            .with_eps(1e-6)
            .with_max_iters(7);

        assert_eq!(settings.grid().unwrap().len(), 3);
        assert_eq!(settings.modified_euler().unwrap().max_iters(), 7);
    }

    #[test]
    fn invalid_values_surface_as_config_errors() {
        assert!(Settings::new(0.0, 1.0).with_step(0.0).grid().is_err());
        assert!(Settings::new(0.0, 1.0).with_eps(-1.0).modified_euler().is_err());
    }
}
