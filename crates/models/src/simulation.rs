use std::fmt;

use popdyn_core::{ConfigError, DerivativeError, Observer, State, TimeGrid};
use popdyn_solvers::{
    StepAlgorithm,
    integrate::{self, Action, Error, Event, LaggedDerivative, Problem, Solution, Trajectory},
};

use crate::{Output, PopModel, Selector, Settings};

/// Binds a population model to an initial state, a time grid, and a step
/// algorithm.
///
/// Every parameter is validated in [`Simulation::new`], so configuration
/// errors surface before any computation. Each call to [`Simulation::solve`]
/// builds a fresh trajectory; repeated calls return identical results.
pub struct Simulation<M> {
    model: M,
    algorithm: Box<dyn StepAlgorithm + Send + Sync>,
    initial: State,
    grid: TimeGrid,
}

/// Exposes a model's derivative to the integration driver.
struct ModelRhs<'a, M>(&'a M);

impl<M: PopModel> LaggedDerivative for ModelRhs<'_, M> {
    fn eval(
        &self,
        state: &State,
        time: f64,
        past: &Trajectory,
    ) -> Result<State, DerivativeError> {
        self.0.diff_lagged(state, time, past)
    }
}

impl<M: PopModel> Simulation<M> {
    /// Creates a simulation.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the algorithm name is unknown, the step is
    /// not positive, `tmin >= tmax`, Modified Euler is selected with invalid
    /// tolerance settings,
    /// the initial state is empty or not finite, or its dimension differs
    /// from the one the model requires.
    pub fn new(
        model: M,
        selector: impl Into<Selector>,
        initial: impl Into<State>,
        settings: Settings,
    ) -> Result<Self, ConfigError> {
        let grid = settings.grid()?;
        let algorithm = selector.into().resolve(&settings)?;

        let initial = initial.into();
        initial.validate()?;
        if let Some(expected) = model.dimension() {
            if initial.dim() != expected {
                return Err(ConfigError::DimensionMismatch {
                    expected,
                    found: initial.dim(),
                });
            }
        }

        Ok(Self {
            model,
            algorithm,
            initial,
            grid,
        })
    }

    /// Returns the model.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Returns the resolved step algorithm.
    pub fn algorithm(&self) -> &(dyn StepAlgorithm + Send + Sync) {
        self.algorithm.as_ref()
    }

    /// Returns the initial state.
    pub fn initial(&self) -> &State {
        &self.initial
    }

    /// Returns the time grid.
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Solves the model across the whole grid.
    ///
    /// # Errors
    ///
    /// Returns an [`Error::Step`] if a step fails. The error carries the
    /// trajectory computed before the failure.
    pub fn solve(&self) -> Result<Output, Error> {
        let solution = self.solve_observed(())?;
        Ok(Output::from_trajectory(
            &solution.trajectory,
            self.model.labels(),
        ))
    }

    /// Solves the model, reporting each grid point to `observer`.
    ///
    /// # Errors
    ///
    /// Returns an [`Error::Step`] if a step fails.
    pub fn solve_observed<Obs>(&self, observer: Obs) -> Result<Solution, Error>
    where
        Obs: Observer<Event, Action>,
    {
        log::debug!(
            "solving {} with {}",
            self.model.name(),
            self.algorithm.name()
        );

        let problem = Problem::new(ModelRhs(&self.model), self.initial.clone(), self.grid)?;
        integrate::solve(&problem, &self.algorithm, observer)
    }
}

impl<M: fmt::Debug> fmt::Debug for Simulation<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Simulation")
            .field("model", &self.model)
            .field("algorithm", &self.algorithm.name())
            .field("initial", &self.initial)
            .field("grid", &self.grid)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use popdyn_solvers::{ForwardEuler, Method, StepError};

    use crate::{ContGrowth, PreyPred};

    /// An algorithm that doubles the state regardless of the derivative.
    struct Doubler;

    impl StepAlgorithm for Doubler {
        fn name(&self) -> &str {
            "Doubler"
        }

        fn advance(
            &self,
            state: &State,
            _time: f64,
            _h: f64,
            _derivative: &dyn popdyn_core::Derivative,
        ) -> Result<State, StepError> {
            Ok(state.add_scaled(1.0, state))
        }
    }

    #[test]
    fn unknown_method_fails_at_construction() {
        let err = Simulation::new(ContGrowth::new(0.1), "Euler", 1.0, Settings::new(0.0, 1.0))
            .unwrap_err();

        assert!(matches!(err, ConfigError::UnknownMethod { .. }));
    }

    #[test]
    fn invalid_grid_fails_at_construction() {
        let settings = Settings::new(0.0, 1.0).with_step(-1.0);
        let err = Simulation::new(ContGrowth::new(0.1), "RK4", 1.0, settings).unwrap_err();

        assert_eq!(err, ConfigError::NonPositiveStep(-1.0));
    }

    #[test]
    fn tolerance_only_matters_for_modified_euler() {
        let settings = Settings::new(0.0, 1.0).with_eps(f64::NAN);

        assert!(Simulation::new(ContGrowth::new(0.1), "RK4", 1.0, settings).is_ok());
        assert!(matches!(
            Simulation::new(ContGrowth::new(0.1), "ModEuler", 1.0, settings),
            Err(ConfigError::InvalidTolerance(_))
        ));
    }

    #[test]
    fn wrong_initial_dimension_fails_at_construction() {
        let model = PreyPred::new(0.1, 0.02, 0.02, 0.4);
        let err = Simulation::new(model, Method::Rk4, 100.0, Settings::new(0.0, 1.0)).unwrap_err();

        assert_eq!(
            err,
            ConfigError::DimensionMismatch {
                expected: 2,
                found: 1
            }
        );
    }

    #[test]
    fn custom_algorithm_instance_is_used() {
        let settings = Settings::new(0.0, 3.0).with_step(1.0);
        let simulation =
            Simulation::new(ContGrowth::new(0.0), Selector::custom(Doubler), 1.0, settings)
                .unwrap();

        let output = simulation.solve().unwrap();

        assert_eq!(simulation.algorithm().name(), "Doubler");
        assert_eq!(output.component(0).to_vec(), vec![1.0, 2.0, 4.0, 8.0]);
    }

    #[test]
    fn output_has_one_row_per_grid_point() {
        let settings = Settings::new(0.0, 1.0).with_step(0.1);
        let simulation =
            Simulation::new(PreyPred::new(0.1, 0.02, 0.02, 0.4), "RK2", [100.0, 20.0], settings)
                .unwrap();

        let output = simulation.solve().unwrap();

        assert_eq!(output.states.dim(), (11, 2));
        assert_eq!(output.labels, vec!["Prey", "Pred"]);
        assert_relative_eq!(output.times[10], 1.0);
        assert_relative_eq!(output.states[[0, 0]], 100.0);
    }

    #[test]
    fn boxed_models_simulate_like_concrete_ones() {
        let settings = Settings::new(0.0, 1.0).with_step(0.25);
        let boxed: Box<dyn PopModel + Send + Sync> = Box::new(ContGrowth::new(0.5));

        let concrete = Simulation::new(ContGrowth::new(0.5), Method::FwdEuler, 2.0, settings)
            .unwrap()
            .solve()
            .unwrap();
        let dynamic = Simulation::new(boxed, Selector::custom(ForwardEuler), 2.0, settings)
            .unwrap()
            .solve()
            .unwrap();

        assert_eq!(concrete, dynamic);
        assert_relative_eq!(dynamic.last_state()[0], 2.0 * 1.125_f64.powi(4), epsilon = 1e-12);
    }
}
