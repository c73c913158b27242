//! Call-shape resolution for the top-level convenience functions.
//!
//! The measure API ([`IsiDistance`]) always receives an already-resolved pair
//! or collection; the overload resolution lives only here, at the outermost
//! boundary. Two explicit trains always take the bivariate path. A collection
//! always takes the multivariate path, even when it holds exactly two trains
//! — with a single pair the normalization makes both paths agree exactly, an
//! equality the test suite pins down.

use crate::error::DistanceError;
use crate::matrix::DistanceMatrix;
use crate::measure::IsiDistance;
use crate::profile::Profile;
use crate::train::SpikeTrain;

/// Resolved input shape: an explicit pair of spike trains or a collection.
#[derive(Debug, Clone, Copy)]
pub enum Trains<'a> {
    /// Two explicit spike trains — the bivariate path.
    Pair(&'a SpikeTrain, &'a SpikeTrain),
    /// A collection of spike trains — the multivariate path.
    Collection(&'a [SpikeTrain]),
}

impl<'a> From<(&'a SpikeTrain, &'a SpikeTrain)> for Trains<'a> {
    fn from((a, b): (&'a SpikeTrain, &'a SpikeTrain)) -> Self {
        Self::Pair(a, b)
    }
}

impl<'a> From<&'a [SpikeTrain]> for Trains<'a> {
    fn from(trains: &'a [SpikeTrain]) -> Self {
        Self::Collection(trains)
    }
}

impl<'a> From<&'a Vec<SpikeTrain>> for Trains<'a> {
    fn from(trains: &'a Vec<SpikeTrain>) -> Self {
        Self::Collection(trains)
    }
}

impl<'a, const N: usize> From<&'a [SpikeTrain; N]> for Trains<'a> {
    fn from(trains: &'a [SpikeTrain; N]) -> Self {
        Self::Collection(trains)
    }
}

/// Compute the ISI-profile of a pair or collection of spike trains using the
/// default engine configuration.
///
/// ```
/// use spikedist::{SpikeTrain, isi_profile};
///
/// let a = SpikeTrain::new(vec![1.0, 2.0, 3.0], (0.0, 4.0))?;
/// let b = SpikeTrain::new(vec![1.5, 2.5], (0.0, 4.0))?;
/// let profile = isi_profile((&a, &b))?;
/// assert_eq!(profile.breakpoints(), &[0.0, 1.0, 1.5, 2.0, 2.5, 3.0, 4.0]);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
///
/// # Errors
///
/// See [`IsiDistance::profile`] and [`IsiDistance::profile_multi`].
pub fn isi_profile<'a>(trains: impl Into<Trains<'a>>) -> Result<Profile, DistanceError> {
    match trains.into() {
        Trains::Pair(a, b) => IsiDistance::new().profile(a, b),
        Trains::Collection(ts) => IsiDistance::new().profile_multi(ts, None),
    }
}

/// Compute the time-averaged ISI distance of a pair or collection of spike
/// trains, optionally restricted to an averaging window.
///
/// # Errors
///
/// See [`IsiDistance::distance`] and [`IsiDistance::distance_multi`].
pub fn isi_distance<'a>(
    trains: impl Into<Trains<'a>>,
    interval: Option<(f64, f64)>,
) -> Result<f64, DistanceError> {
    match trains.into() {
        Trains::Pair(a, b) => IsiDistance::new().distance(a, b, interval),
        Trains::Collection(ts) => IsiDistance::new().distance_multi(ts, None, interval),
    }
}

/// Compute the pairwise ISI distance matrix of a collection of spike trains.
///
/// # Errors
///
/// See [`IsiDistance::distance_matrix`].
pub fn isi_distance_matrix(
    trains: &[SpikeTrain],
    interval: Option<(f64, f64)>,
) -> Result<DistanceMatrix, DistanceError> {
    IsiDistance::new().distance_matrix(trains, None, interval)
}
