use crate::ConfigError;

/// Slack, relative to `max(|tmin|, |tmax|)`, added to the span when counting
/// how many steps fit in `[tmin, tmax]`.
///
/// Without it, ratios such as `0.3 / 0.1 = 2.9999999999999996` would drop the
/// final grid point. It is a few units of rounding, so the last point never
/// passes `tmax` by more than `GRID_SLACK * max(|tmin|, |tmax|)`.
pub const GRID_SLACK: f64 = 8.0 * f64::EPSILON;

/// The evenly spaced time points of one integration run.
///
/// Points are `t_i = tmin + i * h` for `i = 0..=steps`, where
/// `steps = floor((tmax - tmin) / h)`. The upper bound is inclusive: when
/// `tmax` lies on the grid it is the final point, otherwise the final point is
/// the last one below `tmax`. The grid always holds `steps + 1` points, and
/// the final point exceeds `tmax` by at most [`GRID_SLACK`] times the larger
/// bound magnitude.
///
/// Each point is computed by multiplication rather than accumulation, so
/// rounding error does not drift along long runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeGrid {
    tmin: f64,
    tmax: f64,
    h: f64,
    steps: usize,
}

impl TimeGrid {
    /// Creates a validated time grid.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NonPositiveStep`] if `h` is not a finite positive
    /// number, [`ConfigError::NonFiniteBound`] if either bound is not finite,
    /// [`ConfigError::EmptyInterval`] if `tmin >= tmax`, or
    /// [`ConfigError::TooManySteps`] if the step count does not fit in `usize`.
    pub fn new(tmin: f64, tmax: f64, h: f64) -> Result<Self, ConfigError> {
        if !h.is_finite() || h <= 0.0 {
            return Err(ConfigError::NonPositiveStep(h));
        }
        if !tmin.is_finite() || !tmax.is_finite() {
            return Err(ConfigError::NonFiniteBound { tmin, tmax });
        }
        if tmin >= tmax {
            return Err(ConfigError::EmptyInterval { tmin, tmax });
        }

        let scale = tmin.abs().max(tmax.abs());
        let ratio = ((tmax - tmin + GRID_SLACK * scale) / h).floor();
        #[allow(clippy::cast_precision_loss)]
        let limit = usize::MAX as f64;
        if !(ratio < limit) {
            return Err(ConfigError::TooManySteps(ratio));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let steps = ratio as usize;

        Ok(Self {
            tmin,
            tmax,
            h,
            steps,
        })
    }

    /// Returns the start time.
    #[must_use]
    pub fn tmin(&self) -> f64 {
        self.tmin
    }

    /// Returns the requested end time.
    #[must_use]
    pub fn tmax(&self) -> f64 {
        self.tmax
    }

    /// Returns the step size.
    #[must_use]
    pub fn h(&self) -> f64 {
        self.h
    }

    /// Returns the number of steps between the first and last point.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns the number of grid points, `steps + 1`.
    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.saturating_add(1)
    }

    /// A grid always holds at least the start point.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns the time of grid point `i`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn time(&self, i: usize) -> f64 {
        self.tmin + i as f64 * self.h
    }

    /// Returns an iterator over all grid points in increasing order.
    pub fn times(&self) -> impl Iterator<Item = f64> + '_ {
        (0..self.len()).map(|i| self.time(i))
    }

    /// Returns the index of the grid point nearest to `time`, clamped to the
    /// grid.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn nearest_index(&self, time: f64) -> usize {
        let offset = ((time - self.tmin) / self.h).round();
        if offset <= 0.0 {
            0
        } else {
            (offset as usize).min(self.steps)
        }
    }
}
