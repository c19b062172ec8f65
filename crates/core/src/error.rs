use std::error::Error as StdError;

/// Errors raised while validating parameters, before any computation runs.
#[derive(Debug, thiserror::Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("step size must be finite and greater than zero, got {0}")]
    NonPositiveStep(f64),

    #[error("tmin must be less than tmax, got tmin = {tmin}, tmax = {tmax}")]
    EmptyInterval { tmin: f64, tmax: f64 },

    #[error("time bounds must be finite, got tmin = {tmin}, tmax = {tmax}")]
    NonFiniteBound { tmin: f64, tmax: f64 },

    #[error("time grid needs {0} steps, more than can be indexed")]
    TooManySteps(f64),

    #[error("initial state must have at least one component")]
    EmptyState,

    #[error("initial state component {index} is not finite")]
    NonFiniteState { index: usize },

    #[error("unknown method '{name}', expected one of: {expected}")]
    UnknownMethod { name: String, expected: String },

    #[error("tolerance must be finite and positive, got {0}")]
    InvalidTolerance(f64),

    #[error("iteration cap must be at least one")]
    ZeroIterations,

    #[error("initial state has {found} components but the model expects {expected}")]
    DimensionMismatch { expected: usize, found: usize },
}

/// Errors raised while evaluating a derivative function.
#[derive(Debug, thiserror::Error)]
pub enum DerivativeError {
    #[error("derivative has {found} components but the state has {expected}")]
    DimensionMismatch { expected: usize, found: usize },

    #[error("state has {found} components but {expected} are required")]
    StateDimension { expected: usize, found: usize },

    #[error("derivative failed: {0}")]
    Failed(#[source] Box<dyn StdError + Send + Sync>),
}

impl DerivativeError {
    /// Wraps an arbitrary error raised by a user derivative function.
    pub fn failed(err: impl Into<Box<dyn StdError + Send + Sync>>) -> Self {
        Self::Failed(err.into())
    }
}
