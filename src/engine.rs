//! Profile engine contract and backend selection.
//!
//! The engine is the seam between the aggregation layer and the low-level
//! profile math: a pure function from a pair of spike trains to a [`Profile`].
//! Two backends implement it. [`FusedEngine`] (cargo feature `fused`, on by
//! default) additionally computes the full-domain distance in a single sweep
//! without materializing the profile. [`ReferenceEngine`] is always available
//! and derives the distance by averaging the profile. Both produce identical
//! numeric results; only the runtime path differs.
//!
//! Selection happens once, at [`IsiDistance`][crate::IsiDistance] construction.
//! When the fused backend is requested (or probed via [`BackendChoice::Auto`])
//! but compiled out, the reference backend substitutes and a one-time
//! `tracing` warning is emitted unless suppressed via
//! [`EngineConfig::with_warn_on_fallback`].

#[cfg(not(feature = "fused"))]
use std::sync::Once;

#[cfg(not(feature = "fused"))]
use tracing::warn;

use crate::isi;
use crate::profile::Profile;
use crate::train::SpikeTrain;

/// Strategy contract for turning a pair of spike trains into a dissimilarity
/// profile.
///
/// Callers guarantee that both trains share the same observation interval;
/// the aggregation layer validates this before any engine call.
pub trait ProfileEngine {
    /// Compute the dissimilarity profile of two spike trains defined on the
    /// same interval.
    fn profile(&self, a: &SpikeTrain, b: &SpikeTrain) -> Profile;

    /// Compute the time-averaged distance over the full interval.
    ///
    /// The default derives it from the profile; backends may override it with
    /// a fused computation. Overrides must agree with the default within
    /// floating tolerance.
    fn distance(&self, a: &SpikeTrain, b: &SpikeTrain) -> f64 {
        self.profile(a, b).full_average()
    }
}

/// Substitute the auxiliary spike pair `[t_start, t_end]` for an empty train.
fn non_empty<'a>(st: &'a SpikeTrain, aux: &'a [f64; 2]) -> &'a [f64] {
    if st.is_empty() { aux } else { st.spikes() }
}

/// Profile-averaging backend. Always available.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReferenceEngine;

impl ProfileEngine for ReferenceEngine {
    fn profile(&self, a: &SpikeTrain, b: &SpikeTrain) -> Profile {
        debug_assert_eq!(a.t_start(), b.t_start());
        debug_assert_eq!(a.t_end(), b.t_end());
        let aux_a = [a.t_start(), a.t_end()];
        let aux_b = [b.t_start(), b.t_end()];
        let (breakpoints, values) = isi::isi_profile(
            non_empty(a, &aux_a),
            non_empty(b, &aux_b),
            a.t_start(),
            a.t_end(),
        );
        Profile::new_unchecked(breakpoints, values)
    }
}

/// Fused backend: identical profiles, but the full-domain distance is
/// accumulated in a single sweep without building the profile.
#[cfg(feature = "fused")]
#[derive(Debug, Clone, Copy, Default)]
pub struct FusedEngine;

#[cfg(feature = "fused")]
impl ProfileEngine for FusedEngine {
    fn profile(&self, a: &SpikeTrain, b: &SpikeTrain) -> Profile {
        ReferenceEngine.profile(a, b)
    }

    fn distance(&self, a: &SpikeTrain, b: &SpikeTrain) -> f64 {
        debug_assert_eq!(a.t_start(), b.t_start());
        debug_assert_eq!(a.t_end(), b.t_end());
        let aux_a = [a.t_start(), a.t_end()];
        let aux_b = [b.t_start(), b.t_end()];
        isi::isi_distance(
            non_empty(a, &aux_a),
            non_empty(b, &aux_b),
            a.t_start(),
            a.t_end(),
        )
    }
}

/// Requested backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BackendChoice {
    /// Pick the fused backend when compiled in, the reference backend otherwise.
    #[default]
    Auto,
    /// Fused backend. Falls back to reference (with a warning) if compiled out.
    Fused,
    /// Reference backend, even when the fused backend is available.
    Reference,
}

/// Engine selection configuration.
///
/// The fallback warning is an explicit configuration value rather than
/// process-global state: each [`IsiDistance`][crate::IsiDistance] decides at
/// construction whether a substitution is worth a warning. The warning itself
/// is emitted at most once per process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    backend: BackendChoice,
    warn_on_fallback: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            backend: BackendChoice::Auto,
            warn_on_fallback: true,
        }
    }
}

impl EngineConfig {
    /// Create a configuration with the given backend choice and warnings enabled.
    #[must_use]
    pub fn new(backend: BackendChoice) -> Self {
        Self {
            backend,
            warn_on_fallback: true,
        }
    }

    /// Enable or disable the one-time warning emitted when the fused backend
    /// is unavailable and the reference backend substitutes.
    #[must_use]
    pub fn with_warn_on_fallback(mut self, warn_on_fallback: bool) -> Self {
        self.warn_on_fallback = warn_on_fallback;
        self
    }

    /// Return the requested backend choice.
    #[must_use]
    pub fn backend(&self) -> BackendChoice {
        self.backend
    }

    /// Return whether the fallback warning is enabled.
    #[must_use]
    pub fn warn_on_fallback(&self) -> bool {
        self.warn_on_fallback
    }
}

#[cfg(not(feature = "fused"))]
static FALLBACK_WARNING: Once = Once::new();

/// Backend selected for an [`IsiDistance`][crate::IsiDistance] instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EngineKind {
    #[cfg(feature = "fused")]
    Fused,
    Reference,
}

impl EngineKind {
    /// Resolve the configured backend choice against compiled-in capabilities.
    pub(crate) fn select(config: EngineConfig) -> Self {
        match config.backend {
            BackendChoice::Reference => Self::Reference,
            #[cfg(feature = "fused")]
            BackendChoice::Auto | BackendChoice::Fused => Self::Fused,
            #[cfg(not(feature = "fused"))]
            BackendChoice::Auto | BackendChoice::Fused => {
                if config.warn_on_fallback {
                    FALLBACK_WARNING.call_once(|| {
                        warn!(
                            "fused distance backend not compiled in; \
                             falling back to profile averaging"
                        );
                    });
                }
                Self::Reference
            }
        }
    }
}

impl ProfileEngine for EngineKind {
    fn profile(&self, a: &SpikeTrain, b: &SpikeTrain) -> Profile {
        match self {
            #[cfg(feature = "fused")]
            Self::Fused => FusedEngine.profile(a, b),
            Self::Reference => ReferenceEngine.profile(a, b),
        }
    }

    fn distance(&self, a: &SpikeTrain, b: &SpikeTrain) -> f64 {
        match self {
            #[cfg(feature = "fused")]
            Self::Fused => FusedEngine.distance(a, b),
            Self::Reference => ReferenceEngine.distance(a, b),
        }
    }
}
