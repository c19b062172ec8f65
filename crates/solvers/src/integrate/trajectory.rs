use popdyn_core::{State, TimeGrid};

/// Upper bound on the points reserved up front; longer runs grow on demand.
const PREALLOCATE_LIMIT: usize = 1 << 16;

/// The ordered `(time, state)` pairs produced by one integration run.
///
/// A trajectory is append-only while the driver owns it and read-only once
/// handed back. Entry `i` sits on grid point `i`, so times are strictly
/// increasing and evenly spaced.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    grid: TimeGrid,
    times: Vec<f64>,
    states: Vec<State>,
}

impl Trajectory {
    /// Starts a trajectory at the first grid point.
    pub(crate) fn seed(grid: TimeGrid, initial: State) -> Self {
        let capacity = grid.len().min(PREALLOCATE_LIMIT);
        let mut times = Vec::with_capacity(capacity);
        let mut states = Vec::with_capacity(capacity);
        times.push(grid.tmin());
        states.push(initial);

        Self {
            grid,
            times,
            states,
        }
    }

    /// Appends the state for the next grid point.
    pub(crate) fn push(&mut self, state: State) {
        let time = self.grid.time(self.times.len());
        self.times.push(time);
        self.states.push(state);
    }

    /// Returns the grid this trajectory was computed on.
    #[must_use]
    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Returns the number of computed points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// A trajectory always holds at least its initial point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Returns `true` if every grid point has been computed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.len() == self.grid.len()
    }

    /// Returns the state dimension.
    #[must_use]
    pub fn dim(&self) -> usize {
        self.states[0].dim()
    }

    /// Returns the computed times.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Returns the computed states.
    #[must_use]
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// Returns the `(time, state)` pair at index `i`.
    #[must_use]
    pub fn get(&self, i: usize) -> Option<(f64, &State)> {
        Some((*self.times.get(i)?, self.states.get(i)?))
    }

    /// Returns the most recently computed `(time, state)` pair.
    #[must_use]
    pub fn last(&self) -> (f64, &State) {
        let i = self.len() - 1;
        (self.times[i], &self.states[i])
    }

    /// Returns an iterator over `(time, state)` pairs in time order.
    pub fn iter(&self) -> impl Iterator<Item = (f64, &State)> {
        self.times.iter().copied().zip(self.states.iter())
    }

    /// Returns the computed state at the grid point nearest to `time`.
    ///
    /// Times before the start resolve to the initial state, and times past the
    /// latest computed point resolve to that point. Delay models use this to
    /// read `x(t - T)` while the run is still in progress.
    #[must_use]
    pub fn lagged(&self, time: f64) -> &State {
        let i = self.grid.nearest_index(time).min(self.len() - 1);
        &self.states[i]
    }

    /// Consumes the trajectory and returns parallel time and state vectors.
    #[must_use]
    pub fn into_parts(self) -> (Vec<f64>, Vec<State>) {
        (self.times, self.states)
    }
}
