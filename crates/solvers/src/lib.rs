//! Fixed-step algorithms and the integration driver for popdyn.
//!
//! # Modules
//!
//! - [`step`]: the [`StepAlgorithm`] contract and the four built-in
//!   algorithms: [`ForwardEuler`], [`ModifiedEuler`], [`Rk2`], [`Rk4`]
//! - [`method`]: the closed registry resolving algorithm names
//! - [`integrate`]: the driver that walks a time grid and builds a
//!   [`Trajectory`]
//!
//! [`Trajectory`]: integrate::Trajectory

pub mod integrate;
pub mod method;
pub mod step;

pub use method::Method;
pub use step::{
    ForwardEuler, ModifiedEuler, ModifiedEulerConfig, Rk2, Rk4, StepAlgorithm, StepError,
};
