//! Core traits and types for popdyn.
//!
//! This crate defines the shared abstractions that step algorithms, the
//! integration driver, and population models build on:
//!
//! - [`State`]: an ordered, fixed-length snapshot of all tracked populations
//! - [`Derivative`]: a function mapping `(state, time)` to rates of change
//! - [`TimeGrid`]: the evenly spaced time points of one integration run
//! - [`Observer`]: receives solver events and optionally returns control actions
//! - [`StepIntegrable`]: types that can be stepped using their derivative
//! - [`ConfigError`], [`DerivativeError`]: construction and evaluation failures

mod derivative;
mod error;
mod grid;
mod observer;
mod state;
mod step;

pub use derivative::{Checked, Derivative};
pub use error::{ConfigError, DerivativeError};
pub use grid::{GRID_SLACK, TimeGrid};
pub use observer::Observer;
pub use state::State;
pub use step::StepIntegrable;
