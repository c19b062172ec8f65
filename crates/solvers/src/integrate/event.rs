use popdyn_core::State;

/// Event emitted by the driver for each grid point.
///
/// Step 0 is the initial state before any integration.
/// Steps 1..N are emitted after each accepted step.
#[derive(Debug, Clone)]
pub struct Event {
    /// The step number (0 for initial, 1..N for integration steps).
    pub step: usize,

    /// Time of this grid point.
    pub time: f64,

    /// State at this grid point.
    pub state: State,
}
