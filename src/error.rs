//! Error types for spike train validation, profile algebra, and distance computation.

/// Errors from spike train construction.
#[derive(Debug, thiserror::Error)]
pub enum TrainError {
    /// Returned when the interval bounds are not finite or `t_start >= t_end`.
    #[error("spike train interval [{t_start}, {t_end}] is not a valid non-empty interval")]
    InvalidInterval {
        /// Requested interval start.
        t_start: f64,
        /// Requested interval end.
        t_end: f64,
    },

    /// Returned when a spike time is NaN or infinite.
    #[error("spike time at index {index} is not finite")]
    NonFiniteSpike {
        /// Position of the first non-finite spike time.
        index: usize,
    },

    /// Returned when spike times are not strictly increasing.
    #[error("spike times must be strictly increasing, violated at index {index}")]
    UnsortedSpikes {
        /// Position of the first spike that does not exceed its predecessor.
        index: usize,
    },

    /// Returned when a spike time lies outside `[t_start, t_end]`.
    #[error("spike time {time} at index {index} lies outside [{t_start}, {t_end}]")]
    SpikeOutOfBounds {
        /// Position of the offending spike.
        index: usize,
        /// The offending spike time.
        time: f64,
        /// Interval start.
        t_start: f64,
        /// Interval end.
        t_end: f64,
    },
}

/// Errors from piecewise-constant profile construction and averaging.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// Returned when fewer than two breakpoints are provided. A valid profile
    /// domain always has positive length.
    #[error("profile needs at least 2 breakpoints, got {got}")]
    TooFewBreakpoints {
        /// Number of breakpoints provided.
        got: usize,
    },

    /// Returned when breakpoints are not strictly increasing or not finite.
    #[error("profile breakpoints must be finite and strictly increasing, violated at index {index}")]
    InvalidBreakpoints {
        /// Position of the first offending breakpoint.
        index: usize,
    },

    /// Returned when the value array length does not equal `breakpoints - 1`.
    #[error("profile with {breakpoints} breakpoints must carry one value per segment, got {values}")]
    LengthMismatch {
        /// Number of breakpoints provided.
        breakpoints: usize,
        /// Number of values provided.
        values: usize,
    },

    /// Returned when a profile value is negative or not finite.
    #[error("profile value at index {index} must be finite and non-negative")]
    InvalidValue {
        /// Position of the first offending value.
        index: usize,
    },

    /// Returned when an averaging interval is empty or not contained in the
    /// profile domain.
    #[error("averaging interval [{start}, {end}] is not a non-empty sub-interval of [{t_start}, {t_end}]")]
    IntervalOutOfDomain {
        /// Requested interval start.
        start: f64,
        /// Requested interval end.
        end: f64,
        /// Profile domain start.
        t_start: f64,
        /// Profile domain end.
        t_end: f64,
    },

    /// Returned when combining two profiles defined on different domains.
    #[error("cannot combine profiles on [{left_start}, {left_end}] and [{right_start}, {right_end}]")]
    DomainMismatch {
        /// Domain start of the left operand.
        left_start: f64,
        /// Domain end of the left operand.
        left_end: f64,
        /// Domain start of the right operand.
        right_start: f64,
        /// Domain end of the right operand.
        right_end: f64,
    },
}

/// Errors from bivariate and multivariate distance operations.
#[derive(Debug, thiserror::Error)]
pub enum DistanceError {
    /// Returned when a pair or collection of spike trains does not share one
    /// common interval.
    #[error("spike trains are defined on incompatible intervals: [{left_start}, {left_end}] vs [{right_start}, {right_end}]")]
    IncompatibleIntervals {
        /// Interval start of the first mismatching train.
        left_start: f64,
        /// Interval end of the first mismatching train.
        left_end: f64,
        /// Interval start of the second mismatching train.
        right_start: f64,
        /// Interval end of the second mismatching train.
        right_end: f64,
    },

    /// Returned when a multivariate operation receives fewer than 2 spike trains.
    #[error("multivariate operations need at least 2 spike trains, got {got}")]
    InsufficientInput {
        /// Number of spike trains selected.
        got: usize,
    },

    /// Returned when an index selects a spike train outside the collection.
    #[error("index {index} out of bounds for {len} spike trains")]
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// Number of spike trains in the collection.
        len: usize,
    },

    /// Wraps a profile error encountered during averaging.
    #[error("profile error during distance computation: {0}")]
    Profile(#[from] ProfileError),
}
