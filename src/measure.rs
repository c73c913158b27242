//! Bivariate and multivariate ISI distance computation.

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::engine::{EngineConfig, EngineKind, ProfileEngine};
use crate::error::{DistanceError, ProfileError};
use crate::matrix::DistanceMatrix;
use crate::profile::Profile;
use crate::train::{Interval, SpikeTrain};

/// ISI distance calculator with a backend selected at construction.
/// Thread-safe and copyable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IsiDistance {
    engine: EngineKind,
}

impl Default for IsiDistance {
    fn default() -> Self {
        Self::new()
    }
}

impl IsiDistance {
    /// Create a calculator with the default engine configuration
    /// (auto-selected backend, fallback warning enabled).
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Create a calculator with an explicit engine configuration. Backend
    /// selection happens here, once, never per call.
    #[must_use]
    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            engine: EngineKind::select(config),
        }
    }

    /// Compute the ISI-profile `I(t)` of two spike trains.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DistanceError::IncompatibleIntervals`] | Trains not defined on the same interval |
    pub fn profile(&self, a: &SpikeTrain, b: &SpikeTrain) -> Result<Profile, DistanceError> {
        check_pair(a, b)?;
        Ok(self.engine.profile(a, b))
    }

    /// Compute the time-averaged ISI distance of two spike trains.
    ///
    /// With `interval = None` the average runs over the full domain and uses
    /// the backend's direct distance path; with `Some((a, b))` the profile is
    /// materialized and averaged over the window. Both paths agree within
    /// floating tolerance.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DistanceError::IncompatibleIntervals`] | Trains not defined on the same interval |
    /// | [`DistanceError::Profile`] | Window empty or outside the domain |
    pub fn distance(
        &self,
        a: &SpikeTrain,
        b: &SpikeTrain,
        interval: Option<(f64, f64)>,
    ) -> Result<f64, DistanceError> {
        check_pair(a, b)?;
        match interval {
            None => Ok(self.engine.distance(a, b)),
            Some(window) => Ok(self.engine.profile(a, b).average(Some(window))?),
        }
    }

    /// Compute the averaged multivariate ISI-profile
    /// `<I(t)> = 2/(N(N-1)) * Σ I^{i,j}(t)` over all unordered pairs of the
    /// selected spike trains.
    ///
    /// `indices` restricts the collection to a subset; `None` uses all trains.
    /// Pair profiles are computed in parallel and merged with an associative
    /// reduction.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DistanceError::IndexOutOfBounds`] | An index exceeds the collection |
    /// | [`DistanceError::InsufficientInput`] | Fewer than 2 trains selected |
    /// | [`DistanceError::IncompatibleIntervals`] | Selected trains on different intervals |
    #[instrument(skip(self, trains, indices), fields(n = trains.len()))]
    pub fn profile_multi(
        &self,
        trains: &[SpikeTrain],
        indices: Option<&[usize]>,
    ) -> Result<Profile, DistanceError> {
        let (selected, common) = select(trains, indices)?;
        let pairs = selected.len() * (selected.len() - 1) / 2;

        let sum = (0..pairs)
            .into_par_iter()
            .map(|flat| {
                let (i, j) = unflatten(flat);
                self.engine.profile(selected[i], selected[j])
            })
            .reduce(|| Profile::zeros(common), |a, b| a.merge(&b));
        debug!(pairs, "accumulated pair profiles");

        Ok(sum.scale(1.0 / pairs as f64))
    }

    /// Compute the multivariate ISI distance: the mean of the pairwise
    /// time-averaged distances over all unordered pairs. Equals
    /// `profile_multi(...).average(interval)` within floating tolerance.
    ///
    /// # Errors
    ///
    /// As [`profile_multi`][IsiDistance::profile_multi], plus
    /// [`DistanceError::Profile`] when the window is empty or outside the
    /// common domain.
    #[instrument(skip(self, trains, indices), fields(n = trains.len()))]
    pub fn distance_multi(
        &self,
        trains: &[SpikeTrain],
        indices: Option<&[usize]>,
        interval: Option<(f64, f64)>,
    ) -> Result<f64, DistanceError> {
        let (selected, common) = select(trains, indices)?;
        if let Some((lo, hi)) = interval {
            check_window(common, lo, hi)?;
        }
        let pairs = selected.len() * (selected.len() - 1) / 2;

        let sum: f64 = (0..pairs)
            .into_par_iter()
            .map(|flat| {
                let (i, j) = unflatten(flat);
                self.pair_distance(selected[i], selected[j], interval)
            })
            .sum();

        Ok(sum / pairs as f64)
    }

    /// Compute the full pairwise distance matrix over the selected spike
    /// trains. Each unordered pair is computed exactly once; the result is
    /// symmetric with zero diagonal.
    ///
    /// # Errors
    ///
    /// As [`distance_multi`][IsiDistance::distance_multi].
    #[instrument(skip(self, trains, indices), fields(n = trains.len()))]
    pub fn distance_matrix(
        &self,
        trains: &[SpikeTrain],
        indices: Option<&[usize]>,
        interval: Option<(f64, f64)>,
    ) -> Result<DistanceMatrix, DistanceError> {
        let (selected, common) = select(trains, indices)?;
        if let Some((lo, hi)) = interval {
            check_window(common, lo, hi)?;
        }
        let k = selected.len();

        let data: Vec<f64> = (0..k * (k - 1) / 2)
            .into_par_iter()
            .map(|flat| {
                let (i, j) = unflatten(flat);
                self.pair_distance(selected[i], selected[j], interval)
            })
            .collect();

        Ok(DistanceMatrix::from_raw(k, data))
    }

    /// Pairwise distance with domains and window already validated.
    fn pair_distance(
        &self,
        a: &SpikeTrain,
        b: &SpikeTrain,
        interval: Option<(f64, f64)>,
    ) -> f64 {
        match interval {
            None => self.engine.distance(a, b),
            Some((lo, hi)) => self.engine.profile(a, b).windowed_integral(lo, hi) / (hi - lo),
        }
    }
}

/// Map a flat lower-triangle index back to `(i, j)` with `i > j`.
///
/// `flat = i*(i-1)/2 + j`, solved by `i = floor((1 + sqrt(1 + 8*flat)) / 2)`.
fn unflatten(flat: usize) -> (usize, usize) {
    let i = ((1.0 + (1.0 + 8.0 * flat as f64).sqrt()) / 2.0).floor() as usize;
    let j = flat - i * (i - 1) / 2;
    (i, j)
}

fn check_pair(a: &SpikeTrain, b: &SpikeTrain) -> Result<(), DistanceError> {
    if a.t_start() != b.t_start() || a.t_end() != b.t_end() {
        return Err(DistanceError::IncompatibleIntervals {
            left_start: a.t_start(),
            left_end: a.t_end(),
            right_start: b.t_start(),
            right_end: b.t_end(),
        });
    }
    Ok(())
}

fn check_window(common: Interval, lo: f64, hi: f64) -> Result<(), DistanceError> {
    if !(lo < hi) || lo < common.t_start() || hi > common.t_end() {
        return Err(ProfileError::IntervalOutOfDomain {
            start: lo,
            end: hi,
            t_start: common.t_start(),
            t_end: common.t_end(),
        }
        .into());
    }
    Ok(())
}

/// Resolve the index subset and verify cardinality and a common interval.
/// Runs before any pairwise computation so malformed input never reaches the
/// reduction loop.
fn select<'a>(
    trains: &'a [SpikeTrain],
    indices: Option<&[usize]>,
) -> Result<(Vec<&'a SpikeTrain>, Interval), DistanceError> {
    let selected: Vec<&SpikeTrain> = match indices {
        None => trains.iter().collect(),
        Some(idx) => idx
            .iter()
            .map(|&i| {
                trains.get(i).ok_or(DistanceError::IndexOutOfBounds {
                    index: i,
                    len: trains.len(),
                })
            })
            .collect::<Result<_, _>>()?,
    };
    if selected.len() < 2 {
        return Err(DistanceError::InsufficientInput {
            got: selected.len(),
        });
    }
    let common = selected[0].interval();
    for st in &selected[1..] {
        if st.interval() != common {
            return Err(DistanceError::IncompatibleIntervals {
                left_start: common.t_start(),
                left_end: common.t_end(),
                right_start: st.t_start(),
                right_end: st.t_end(),
            });
        }
    }
    Ok((selected, common))
}
