//! The integration driver: walks a time grid and builds a trajectory.
//!
//! The driver seeds the trajectory with `(tmin, x0)`, then for each grid point
//! `t_i = tmin + i*h` asks the step algorithm for
//! `x_i = advance(x_{i-1}, t_{i-1}, h, f)` and appends `(t_i, x_i)`:
//!
//! ```text
//! (t_0, x_0) -> (t_1, x_1) -> ... -> (t_N, x_N),   N = floor((tmax - tmin) / h)
//! ```
//!
//! Every derivative evaluation is dimension-checked. A failed step aborts the
//! run with [`Error::Step`], which carries the points computed so far.
//!
//! # Example
//!
//! ```
//! use popdyn_core::{DerivativeError, State};
//! use popdyn_solvers::{Rk4, integrate};
//!
//! let growth = |x: &State, _t: f64| -> Result<State, DerivativeError> {
//!     Ok(State::from(0.1 * x[0]))
//! };
//!
//! let trajectory = integrate::run(100.0, &growth, &Rk4, 0.0, 10.0, 1.0)?;
//!
//! assert_eq!(trajectory.len(), 11);
//! let (t, x) = trajectory.last();
//! assert!((t - 10.0).abs() < 1e-12);
//! assert!((x[0] - 100.0 * 1.0_f64.exp()).abs() < 0.01);
//! # Ok::<(), integrate::Error>(())
//! ```

mod action;
mod error;
mod event;
mod solution;
mod trajectory;

pub use action::Action;
pub use error::Error;
pub use event::Event;
pub use solution::{Solution, Status};
pub use trajectory::Trajectory;

use popdyn_core::{Checked, ConfigError, Derivative, DerivativeError, Observer, State, TimeGrid};

use crate::StepAlgorithm;

/// A derivative that may read the trajectory computed so far.
///
/// Ordinary derivatives depend only on `(state, time)`; wrap them in
/// [`Memoryless`]. Delay equations additionally look up past states through
/// `past`, which holds every point up to the current one.
pub trait LaggedDerivative {
    /// Evaluates the derivative at the given state and time.
    ///
    /// # Errors
    ///
    /// Returns a [`DerivativeError`] if the derivative cannot be computed.
    fn eval(&self, state: &State, time: f64, past: &Trajectory)
    -> Result<State, DerivativeError>;
}

/// Adapts a plain [`Derivative`] to [`LaggedDerivative`] by ignoring history.
#[derive(Debug, Clone, Copy)]
pub struct Memoryless<D>(pub D);

impl<D: Derivative> LaggedDerivative for Memoryless<D> {
    fn eval(
        &self,
        state: &State,
        time: f64,
        _past: &Trajectory,
    ) -> Result<State, DerivativeError> {
        self.0.eval(state, time)
    }
}

/// Lets [`run`] borrow an unsized derivative.
struct Borrowed<'a, D: ?Sized>(&'a D);

impl<D: Derivative + ?Sized> Derivative for Borrowed<'_, D> {
    fn eval(&self, state: &State, time: f64) -> Result<State, DerivativeError> {
        self.0.eval(state, time)
    }
}

/// Binds a lagged derivative to the history available at one step.
struct WithHistory<'a, D: ?Sized> {
    derivative: &'a D,
    past: &'a Trajectory,
}

impl<D: LaggedDerivative + ?Sized> Derivative for WithHistory<'_, D> {
    fn eval(&self, state: &State, time: f64) -> Result<State, DerivativeError> {
        self.derivative.eval(state, time, self.past)
    }
}

/// A validated initial-value problem: derivative, initial state, and time grid.
#[derive(Debug, Clone)]
pub struct Problem<D> {
    derivative: D,
    initial: State,
    grid: TimeGrid,
}

impl<D: LaggedDerivative> Problem<D> {
    /// Creates a problem, validating the initial state.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the initial state is empty or not finite.
    pub fn new(derivative: D, initial: State, grid: TimeGrid) -> Result<Self, ConfigError> {
        initial.validate()?;
        Ok(Self {
            derivative,
            initial,
            grid,
        })
    }

    /// Returns the derivative.
    pub fn derivative(&self) -> &D {
        &self.derivative
    }

    /// Returns the initial state.
    pub fn initial(&self) -> &State {
        &self.initial
    }

    /// Returns the time grid.
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }
}

impl<D: Derivative> Problem<Memoryless<D>> {
    /// Creates a problem from a plain derivative that ignores history.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the initial state is empty or not finite.
    pub fn memoryless(
        derivative: D,
        initial: State,
        grid: TimeGrid,
    ) -> Result<Self, ConfigError> {
        Self::new(Memoryless(derivative), initial, grid)
    }
}

/// Integrates a problem across its whole time grid.
///
/// # Algorithm
///
/// 1. Seed the trajectory with `(tmin, x0)` and emit step 0.
/// 2. For each step `i` in `1..=N`:
///    - Advance from `(t_{i-1}, x_{i-1})` by `h` with the algorithm.
///    - Append `(t_i, x_i)`.
///    - Emit an [`Event`]; stop if the observer returns [`Action::StopEarly`].
/// 3. Return the solution with the full trajectory.
///
/// # Errors
///
/// Returns [`Error::Step`] if any step fails: a derivative error, a dimension
/// mismatch, or a non-converging implicit step. The error carries the partial
/// trajectory; the run is never reported as a success.
pub fn solve<D, A, Obs>(
    problem: &Problem<D>,
    algorithm: &A,
    mut observer: Obs,
) -> Result<Solution, Error>
where
    D: LaggedDerivative,
    A: StepAlgorithm + ?Sized,
    Obs: Observer<Event, Action>,
{
    let grid = problem.grid;
    let dim = problem.initial.dim();
    let h = grid.h();

    log::debug!(
        "integrating {dim} component(s) with {} over [{}, {}], h = {h}, {} steps",
        algorithm.name(),
        grid.tmin(),
        grid.tmax(),
        grid.steps(),
    );

    let mut trajectory = Trajectory::seed(grid, problem.initial.clone());

    let event = Event {
        step: 0,
        time: grid.tmin(),
        state: problem.initial.clone(),
    };
    if let Some(Action::StopEarly) = observer.observe(&event) {
        return Ok(Solution {
            status: Status::StoppedByObserver,
            trajectory,
            steps: 0,
        });
    }

    for step in 1..=grid.steps() {
        let (time, current) = trajectory.last();

        let bound = WithHistory {
            derivative: &problem.derivative,
            past: &trajectory,
        };
        let checked = Checked::new(&bound, dim);

        let next = match algorithm.advance(current, time, h, &checked) {
            Ok(next) => next,
            Err(source) => {
                log::warn!(
                    "{} step {step} from t = {time} failed: {source}",
                    algorithm.name()
                );
                return Err(Error::Step {
                    step,
                    time,
                    source,
                    partial: Box::new(trajectory),
                });
            }
        };

        trajectory.push(next);
        let (time, state) = trajectory.last();
        log::trace!("step {step}: t = {time}, x = {:?}", state.as_slice());

        let event = Event {
            step,
            time,
            state: state.clone(),
        };
        if let Some(Action::StopEarly) = observer.observe(&event) {
            log::debug!("run stopped by observer after {step} steps");
            return Ok(Solution {
                status: Status::StoppedByObserver,
                trajectory,
                steps: step,
            });
        }
    }

    log::debug!("run complete: {} points", trajectory.len());

    Ok(Solution {
        status: Status::Complete,
        trajectory,
        steps: grid.steps(),
    })
}

/// Integrates a problem without observation.
///
/// This is a convenience wrapper around [`solve`] that discards events.
///
/// # Errors
///
/// Returns [`Error::Step`] if any step fails.
pub fn solve_unobserved<D, A>(problem: &Problem<D>, algorithm: &A) -> Result<Solution, Error>
where
    D: LaggedDerivative,
    A: StepAlgorithm + ?Sized,
{
    solve(problem, algorithm, ())
}

/// Integrates `derivative` from `initial` over `[tmin, tmax]` with step `h`.
///
/// Parameters are validated before any computation. The returned trajectory
/// has `floor((tmax - tmin) / h) + 1` points.
///
/// # Errors
///
/// Returns [`Error::Config`] for an empty or non-finite initial state,
/// non-positive `h`, or `tmin >= tmax`, and [`Error::Step`] if a step fails.
pub fn run<D, A>(
    initial: impl Into<State>,
    derivative: &D,
    algorithm: &A,
    tmin: f64,
    tmax: f64,
    h: f64,
) -> Result<Trajectory, Error>
where
    D: Derivative + ?Sized,
    A: StepAlgorithm + ?Sized,
{
    let grid = TimeGrid::new(tmin, tmax, h)?;
    let problem = Problem::memoryless(Borrowed(derivative), initial.into(), grid)?;
    let solution = solve_unobserved(&problem, algorithm)?;
    Ok(solution.trajectory)
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;

    use approx::assert_relative_eq;

    use crate::{ForwardEuler, Rk4};

    fn constant_rate(_x: &State, _t: f64) -> Result<State, DerivativeError> {
        Ok(State::from(2.0))
    }

    fn wrong_dimension(_x: &State, _t: f64) -> Result<State, DerivativeError> {
        Ok(State::from([1.0, 1.0]))
    }

    #[test]
    fn constant_rate_moves_linearly() {
        let trajectory = run(0.0, &constant_rate, &ForwardEuler, 0.0, 1.0, 0.1).unwrap();

        assert_eq!(trajectory.len(), 11);
        let (time, state) = trajectory.last();
        assert_relative_eq!(time, 1.0);
        assert_relative_eq!(state[0], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn invalid_parameters_fail_before_computation() {
        let calls = Cell::new(0);
        let counting = |x: &State, _t: f64| -> Result<State, DerivativeError> {
            calls.set(calls.get() + 1);
            Ok(x.clone())
        };

        let err = run(1.0, &counting, &Rk4, 0.0, 1.0, -0.1).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::NonPositiveStep(_))));

        let err = run(1.0, &counting, &Rk4, 1.0, 0.0, 0.1).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::EmptyInterval { .. })));

        let err = run(State::new(vec![]), &counting, &Rk4, 0.0, 1.0, 0.1).unwrap_err();
        assert!(matches!(err, Error::Config(ConfigError::EmptyState)));
        assert!(err.partial().is_none());

        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn dimension_mismatch_aborts_at_first_evaluation() {
        let err = run(1.0, &wrong_dimension, &ForwardEuler, 0.0, 1.0, 0.1).unwrap_err();

        match err {
            Error::Step {
                step,
                source,
                partial,
                ..
            } => {
                assert_eq!(step, 1);
                assert!(matches!(
                    source,
                    crate::StepError::Derivative(DerivativeError::DimensionMismatch {
                        expected: 1,
                        found: 2
                    })
                ));
                assert_eq!(partial.len(), 1);
            }
            Error::Config(err) => panic!("unexpected config error: {err}"),
        }
    }

    #[test]
    fn failure_keeps_points_computed_before_it() {
        // Fails once time reaches 0.5.
        let fragile = |x: &State, t: f64| -> Result<State, DerivativeError> {
            if t >= 0.5 - 1e-12 {
                Err(DerivativeError::DimensionMismatch {
                    expected: 1,
                    found: 0,
                })
            } else {
                Ok(x.clone())
            }
        };

        let err = run(1.0, &fragile, &ForwardEuler, 0.0, 1.0, 0.1).unwrap_err();

        let partial = err.partial().expect("step failure carries partial trajectory");
        assert_eq!(partial.len(), 6);
        assert!(!partial.is_complete());
        assert_relative_eq!(partial.last().0, 0.5, epsilon = 1e-12);
    }

    #[test]
    fn observer_can_stop_early() {
        let grid = TimeGrid::new(0.0, 10.0, 0.1).unwrap();
        let problem = Problem::memoryless(constant_rate, State::from(0.0), grid).unwrap();

        let observer = |event: &Event| (event.step >= 5).then_some(Action::StopEarly);

        let solution = solve(&problem, &Rk4, observer).unwrap();

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.steps, 5);
        assert_eq!(solution.trajectory.len(), 6);
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn huge_grid_runs_until_observer_stops_it() {
        let grid = TimeGrid::new(0.0, 1e15, 1.0).unwrap();
        let problem = Problem::memoryless(constant_rate, State::from(0.0), grid).unwrap();

        let solution = solve(&problem, &ForwardEuler, |event: &Event| {
            (event.step >= 3).then_some(Action::StopEarly)
        })
        .unwrap();

        assert_eq!(solution.status, Status::StoppedByObserver);
        assert_eq!(solution.trajectory.states()[3], State::from(6.0));
    }

    #[test]
    fn step_numbers_start_at_zero() {
        let grid = TimeGrid::new(0.0, 1.0, 0.25).unwrap();
        let problem = Problem::memoryless(constant_rate, State::from(0.0), grid).unwrap();

        let mut steps = Vec::new();
        let solution = solve(&problem, &ForwardEuler, |event: &Event| {
            steps.push(event.step);
            None
        })
        .unwrap();

        assert_eq!(solution.status, Status::Complete);
        assert_eq!(steps, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn lagged_derivative_sees_history() {
        // dx/dt = x(t - 1): reads one time unit back.
        struct Lag;

        impl LaggedDerivative for Lag {
            fn eval(
                &self,
                _state: &State,
                time: f64,
                past: &Trajectory,
            ) -> Result<State, DerivativeError> {
                Ok(past.lagged(time - 1.0).clone())
            }
        }

        let grid = TimeGrid::new(0.0, 2.0, 0.5).unwrap();
        let problem = Problem::new(Lag, State::from(1.0), grid).unwrap();

        let solution = solve_unobserved(&problem, &ForwardEuler).unwrap();
        let values: Vec<f64> = solution.trajectory.states().iter().map(|s| s[0]).collect();

        // While t - 1 < 0 the lag reads the initial value 1.0.
        // The step from t = 1.5 reads x(0.5) = 1.5.
        let expected = [1.0, 1.5, 2.0, 2.5, 3.25];
        for (value, expected) in values.iter().zip(expected) {
            assert_relative_eq!(*value, expected, epsilon = 1e-12);
        }
    }
}
