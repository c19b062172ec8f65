use ndarray::{Array1, Array2, ArrayView1};
use popdyn_solvers::integrate::Trajectory;

/// The solved trajectory reshaped for analysis and plotting.
///
/// `times[i]` is the time of row `i` in `states`; column `j` of `states` is
/// the history of component `j`, named by `labels[j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Output {
    pub times: Array1<f64>,
    pub states: Array2<f64>,
    pub labels: Vec<String>,
}

impl Output {
    /// Reshapes a trajectory into a time array and a row-per-step matrix.
    ///
    /// Missing labels are filled with `x0`, `x1`, ... so there is always one
    /// label per column.
    #[must_use]
    pub fn from_trajectory(trajectory: &Trajectory, labels: &[&str]) -> Self {
        let rows = trajectory.len();
        let cols = trajectory.dim();
        let states = trajectory.states();

        let labels = (0..cols)
            .map(|j| {
                labels
                    .get(j)
                    .map_or_else(|| format!("x{j}"), |label| (*label).to_string())
            })
            .collect();

        Self {
            times: Array1::from(trajectory.times().to_vec()),
            states: Array2::from_shape_fn((rows, cols), |(i, j)| states[i][j]),
            labels,
        }
    }

    /// Returns the number of time steps (rows).
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns `true` if there are no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Returns the history of one component.
    ///
    /// # Panics
    ///
    /// Panics if `component` is out of range.
    #[must_use]
    pub fn component(&self, component: usize) -> ArrayView1<'_, f64> {
        self.states.column(component)
    }

    /// Returns the state at the final time.
    #[must_use]
    pub fn last_state(&self) -> ArrayView1<'_, f64> {
        self.states.row(self.len() - 1)
    }

    /// Returns `[t, x]` points for one component, ready for a line chart.
    #[must_use]
    pub fn series(&self, component: usize) -> Vec<[f64; 2]> {
        self.times
            .iter()
            .zip(self.component(component))
            .map(|(t, x)| [*t, *x])
            .collect()
    }
}
