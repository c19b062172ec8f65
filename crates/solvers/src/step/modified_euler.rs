use popdyn_core::{ConfigError, Derivative, State};

use super::{StepAlgorithm, StepError};

/// Default convergence tolerance for the fixed-point iteration.
pub const DEFAULT_EPS: f64 = 1e-10;

/// Default cap on fixed-point passes per step.
pub const DEFAULT_MAX_ITERS: usize = 100;

/// Configuration for the Modified Euler fixed-point iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModifiedEulerConfig {
    eps: f64,
    max_iters: usize,
}

impl Default for ModifiedEulerConfig {
    fn default() -> Self {
        Self {
            eps: DEFAULT_EPS,
            max_iters: DEFAULT_MAX_ITERS,
        }
    }
}

impl ModifiedEulerConfig {
    /// Creates a validated config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTolerance`] if `eps` is not finite and
    /// positive, or [`ConfigError::ZeroIterations`] if `max_iters` is zero.
    pub fn new(eps: f64, max_iters: usize) -> Result<Self, ConfigError> {
        if !eps.is_finite() || eps <= 0.0 {
            return Err(ConfigError::InvalidTolerance(eps));
        }
        if max_iters == 0 {
            return Err(ConfigError::ZeroIterations);
        }

        Ok(Self { eps, max_iters })
    }

    /// Returns the convergence tolerance.
    #[must_use]
    pub fn eps(&self) -> f64 {
        self.eps
    }

    /// Returns the maximum number of fixed-point passes per step.
    #[must_use]
    pub fn max_iters(&self) -> usize {
        self.max_iters
    }
}

/// The implicit trapezoidal rule, solved by fixed-point iteration.
///
/// Each step starts from a forward Euler predictor and repeatedly applies the
/// trapezoidal corrector:
///
/// ```text
/// y_0     = x_n + h * f(x_n, t_n)
/// y_{k+1} = x_n + h/2 * (f(x_n, t_n) + f(y_k, t_n + h))
/// ```
///
/// The iteration stops once the scaled max-norm
/// `max_i |y_{k+1,i} - y_{k,i}| / max(1, |y_{k+1,i}|)` drops below `eps`.
///
/// The corrector is a contraction only when `h/2` times the Lipschitz constant
/// of `f` is below one. When it is not, the iteration diverges or stalls and
/// the step fails with [`StepError::NonConvergence`] after `max_iters` passes,
/// or as soon as an iterate stops being finite. A step is never accepted
/// without meeting the tolerance.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModifiedEuler {
    config: ModifiedEulerConfig,
}

impl ModifiedEuler {
    /// Creates a Modified Euler algorithm with the given config.
    #[must_use]
    pub fn new(config: ModifiedEulerConfig) -> Self {
        Self { config }
    }

    /// Returns the iteration config.
    #[must_use]
    pub fn config(&self) -> &ModifiedEulerConfig {
        &self.config
    }
}

impl StepAlgorithm for ModifiedEuler {
    fn name(&self) -> &str {
        "ModEuler"
    }

    fn advance(
        &self,
        state: &State,
        time: f64,
        h: f64,
        derivative: &dyn Derivative,
    ) -> Result<State, StepError> {
        let ModifiedEulerConfig { eps, max_iters } = self.config;
        let next_time = time + h;

        let start_rate = derivative.eval(state, time)?;
        let mut guess = state.add_scaled(h, &start_rate);
        let mut residual = f64::INFINITY;

        for iteration in 1..=max_iters {
            let end_rate = derivative.eval(&guess, next_time)?;
            let slope =
                State::weighted_sum(state.dim(), &[(0.5, &start_rate), (0.5, &end_rate)]);
            let next = state.add_scaled(h, &slope);

            if !next.is_finite() {
                return Err(StepError::NonConvergence {
                    iterations: iteration,
                    residual: f64::INFINITY,
                });
            }

            residual = next.scaled_max_diff(&guess);
            if residual < eps {
                log::trace!("modified euler converged at t = {next_time} after {iteration} passes");
                return Ok(next);
            }

            guess = next;
        }

        Err(StepError::NonConvergence {
            iterations: max_iters,
            residual,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use popdyn_core::DerivativeError;

    fn decay(x: &State, _t: f64) -> Result<State, DerivativeError> {
        Ok(State::from(-x[0]))
    }

    fn explosive(x: &State, _t: f64) -> Result<State, DerivativeError> {
        Ok(State::from(1000.0 * x[0]))
    }

    #[test]
    fn converges_to_trapezoidal_solution_for_linear_decay() {
        let h = 0.1;

        let next = ModifiedEuler::default()
            .advance(&State::from(1.0), 0.0, h, &decay)
            .unwrap();

        // Trapezoidal rule for x' = -x solves y = x + h/2 * (-x - y) exactly.
        let expected = (1.0 - h / 2.0) / (1.0 + h / 2.0);
        assert_relative_eq!(next[0], expected, epsilon = 1e-10);
    }

    #[test]
    fn reports_non_convergence_for_non_contracting_derivative() {
        // h/2 * 1000 = 500, so the corrector amplifies every difference.
        let err = ModifiedEuler::default()
            .advance(&State::from(1.0), 0.0, 1.0, &explosive)
            .unwrap_err();

        assert!(matches!(err, StepError::NonConvergence { .. }));
    }

    #[test]
    fn iteration_cap_bounds_work() {
        let config = ModifiedEulerConfig::new(1e-300, 3).unwrap();
        // Contracting, but a tolerance this tight cannot be met in three passes.
        let err = ModifiedEuler::new(config)
            .advance(&State::from(1.0), 0.0, 0.5, &decay)
            .unwrap_err();

        match err {
            StepError::NonConvergence {
                iterations,
                residual,
            } => {
                assert_eq!(iterations, 3);
                assert!(residual.is_finite());
            }
            StepError::Derivative(err) => panic!("unexpected derivative error: {err}"),
        }
    }

    #[test]
    fn corrector_uses_end_of_step_time() {
        // dx/dt = t, trapezoidal over [1, 3] gives (1 + 3) / 2 * 2 = 4.
        let ramp = |_x: &State, t: f64| -> Result<State, DerivativeError> { Ok(State::from(t)) };

        let next = ModifiedEuler::default()
            .advance(&State::from(0.0), 1.0, 2.0, &ramp)
            .unwrap();

        assert_relative_eq!(next[0], 4.0);
    }

    #[test]
    fn config_rejects_invalid_values() {
        assert_eq!(
            ModifiedEulerConfig::new(0.0, 10),
            Err(ConfigError::InvalidTolerance(0.0))
        );
        assert!(matches!(
            ModifiedEulerConfig::new(f64::NAN, 10),
            Err(ConfigError::InvalidTolerance(_))
        ));
        assert_eq!(
            ModifiedEulerConfig::new(1e-8, 0),
            Err(ConfigError::ZeroIterations)
        );
    }

    #[test]
    fn default_config_uses_named_defaults() {
        let config = ModifiedEulerConfig::default();
        assert_relative_eq!(config.eps(), DEFAULT_EPS);
        assert_eq!(config.max_iters(), DEFAULT_MAX_ITERS);
    }
}
