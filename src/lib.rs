//! ISI dissimilarity profiles and distances for neuronal spike trains.
//!
//! Pure math library — zero I/O. Provides the inter-spike-interval (ISI)
//! dissimilarity measure: piecewise-constant profiles `I(t)` for pairs of
//! spike trains, time-averaged scalar distances, multivariate averages over
//! all pairs of a collection, and full pairwise distance matrices. The
//! pairwise reduction is parallelized across pairs using rayon.
//!
//! Entry points: the convenience functions [`isi_profile`], [`isi_distance`],
//! and [`isi_distance_matrix`] for the common case, or [`IsiDistance`] for
//! explicit backend configuration and index subsets.

mod dispatch;
mod engine;
mod error;
mod isi;
mod matrix;
mod measure;
mod profile;
mod train;

pub use dispatch::{Trains, isi_distance, isi_distance_matrix, isi_profile};
#[cfg(feature = "fused")]
pub use engine::FusedEngine;
pub use engine::{BackendChoice, EngineConfig, ProfileEngine, ReferenceEngine};
pub use error::{DistanceError, ProfileError, TrainError};
pub use matrix::DistanceMatrix;
pub use measure::IsiDistance;
pub use profile::Profile;
pub use train::{Interval, SpikeTrain};
