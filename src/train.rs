//! Spike train input type with validation guarantees.

use crate::error::TrainError;

/// Closed observation interval `[t_start, t_end]` with positive length.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Interval {
    t_start: f64,
    t_end: f64,
}

impl Interval {
    /// Create a new interval, validating finite bounds and `t_start < t_end`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`TrainError::InvalidInterval`] | Bounds not finite or `t_start >= t_end` |
    pub fn new(t_start: f64, t_end: f64) -> Result<Self, TrainError> {
        if !t_start.is_finite() || !t_end.is_finite() || t_start >= t_end {
            return Err(TrainError::InvalidInterval { t_start, t_end });
        }
        Ok(Self { t_start, t_end })
    }

    /// Create an interval from bounds already known to be valid.
    pub(crate) fn from_raw(t_start: f64, t_end: f64) -> Self {
        debug_assert!(t_start < t_end);
        Self { t_start, t_end }
    }

    /// Return the interval start.
    #[must_use]
    pub fn t_start(&self) -> f64 {
        self.t_start
    }

    /// Return the interval end.
    #[must_use]
    pub fn t_end(&self) -> f64 {
        self.t_end
    }

    /// Return the interval length `t_end - t_start`. Always positive.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.t_end - self.t_start
    }
}

/// Owned, validated spike train: strictly increasing spike times within a
/// fixed observation interval. Immutable after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct SpikeTrain {
    spikes: Vec<f64>,
    interval: Interval,
}

impl SpikeTrain {
    /// Create a new spike train, validating the interval and spike times.
    ///
    /// Spike times must be finite, strictly increasing, and contained in
    /// `[t_start, t_end]`. An empty spike list is allowed.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`TrainError::InvalidInterval`] | Bounds not finite or `t_start >= t_end` |
    /// | [`TrainError::NonFiniteSpike`] | Any spike time is NaN or infinite |
    /// | [`TrainError::UnsortedSpikes`] | Spike times not strictly increasing |
    /// | [`TrainError::SpikeOutOfBounds`] | Any spike outside the interval |
    pub fn new(spikes: Vec<f64>, (t_start, t_end): (f64, f64)) -> Result<Self, TrainError> {
        let interval = Interval::new(t_start, t_end)?;
        if let Some(index) = spikes.iter().position(|t| !t.is_finite()) {
            return Err(TrainError::NonFiniteSpike { index });
        }
        if let Some(index) = spikes.windows(2).position(|w| w[1] <= w[0]) {
            return Err(TrainError::UnsortedSpikes { index: index + 1 });
        }
        if let Some(index) = spikes.iter().position(|&t| t < t_start || t > t_end) {
            return Err(TrainError::SpikeOutOfBounds {
                index,
                time: spikes[index],
                t_start,
                t_end,
            });
        }
        Ok(Self { spikes, interval })
    }

    /// Return the spike times as a slice.
    #[must_use]
    pub fn spikes(&self) -> &[f64] {
        &self.spikes
    }

    /// Return the observation interval.
    #[must_use]
    pub fn interval(&self) -> Interval {
        self.interval
    }

    /// Return the interval start.
    #[must_use]
    pub fn t_start(&self) -> f64 {
        self.interval.t_start()
    }

    /// Return the interval end.
    #[must_use]
    pub fn t_end(&self) -> f64 {
        self.interval.t_end()
    }

    /// Return the number of spikes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.spikes.len()
    }

    /// Return true if the train contains no spikes.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.spikes.is_empty()
    }

    /// Consume and return the inner spike time vector.
    #[must_use]
    pub fn into_spikes(self) -> Vec<f64> {
        self.spikes
    }
}

impl AsRef<[f64]> for SpikeTrain {
    fn as_ref(&self) -> &[f64] {
        &self.spikes
    }
}
