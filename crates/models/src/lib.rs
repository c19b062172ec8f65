//! Population models and the simulation binding for popdyn.
//!
//! A [`PopModel`] supplies the derivative of a population system. A
//! [`Simulation`] binds a model to an initial state, a time grid, and a step
//! algorithm, and [`Simulation::solve`] returns the trajectory as a time array
//! and a state matrix ready for plotting.
//!
//! # Example
//!
//! ```
//! use popdyn_models::{ContGrowth, Settings, Simulation};
//!
//! let simulation = Simulation::new(
//!     ContGrowth::new(0.1),
//!     "RK4",
//!     100.0,
//!     Settings::new(0.0, 10.0).with_step(1.0),
//! )?;
//!
//! let output = simulation.solve()?;
//! assert_eq!(output.times.len(), 11);
//! assert!((output.states[[10, 0]] - 271.83).abs() < 0.01);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! # Models
//!
//! - [`ContGrowth`]: exponential growth
//! - [`LogGrowth`]: logistic growth toward a carrying capacity
//! - [`PreyPred`]: Lotka-Volterra predator-prey dynamics
//! - [`InfecDis`]: susceptible-infected spread without recovery
//! - [`Sis`]: susceptible-infected-susceptible epidemic
//! - [`Sir`]: susceptible-infected-recovered epidemic
//! - [`Delay`]: logistic growth with delayed feedback

mod model;
mod output;
mod population;
mod scenario;
mod selector;
mod settings;
mod simulation;

pub use model::PopModel;
pub use output::Output;
pub use population::{ContGrowth, Delay, InfecDis, LogGrowth, PreyPred, Sir, Sis};
pub use scenario::{InitialState, ModelSpec, Scenario};
pub use selector::Selector;
pub use settings::{DEFAULT_EPS, DEFAULT_MAX_ITERS, DEFAULT_STEP, Settings};
pub use simulation::Simulation;
