use super::Trajectory;

/// Indicates how the run terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Reached the final grid point.
    Complete,

    /// Stopped early due to an observer action.
    StoppedByObserver,
}

/// The result of a successful integration run.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// How the run terminated.
    pub status: Status,

    /// Every computed `(time, state)` pair, including the initial point.
    pub trajectory: Trajectory,

    /// Number of integration steps completed.
    pub steps: usize,
}
