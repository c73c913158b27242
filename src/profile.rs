//! Piecewise-constant dissimilarity profile and its algebra.

use crate::error::ProfileError;
use crate::train::Interval;

/// Piecewise-constant function over a time interval.
///
/// Holds breakpoints `t0 < t1 < … < tn` and values `v1..vn`, where `v[i]`
/// applies on the half-open segment `[t[i], t[i+1])`. The domain is
/// `[t0, tn]` and always has positive length. All values are non-negative.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Profile {
    breakpoints: Vec<f64>,
    values: Vec<f64>,
}

impl Profile {
    /// Create a new profile, validating breakpoints and values.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ProfileError::TooFewBreakpoints`] | Fewer than 2 breakpoints |
    /// | [`ProfileError::InvalidBreakpoints`] | Breakpoints not finite or not strictly increasing |
    /// | [`ProfileError::LengthMismatch`] | `values.len() != breakpoints.len() - 1` |
    /// | [`ProfileError::InvalidValue`] | Any value negative or not finite |
    pub fn new(breakpoints: Vec<f64>, values: Vec<f64>) -> Result<Self, ProfileError> {
        if breakpoints.len() < 2 {
            return Err(ProfileError::TooFewBreakpoints {
                got: breakpoints.len(),
            });
        }
        if !breakpoints[0].is_finite() {
            return Err(ProfileError::InvalidBreakpoints { index: 0 });
        }
        if let Some(index) = breakpoints.windows(2).position(|w| !(w[1] > w[0]) || !w[1].is_finite())
        {
            return Err(ProfileError::InvalidBreakpoints { index: index + 1 });
        }
        if values.len() != breakpoints.len() - 1 {
            return Err(ProfileError::LengthMismatch {
                breakpoints: breakpoints.len(),
                values: values.len(),
            });
        }
        if let Some(index) = values.iter().position(|v| !v.is_finite() || *v < 0.0) {
            return Err(ProfileError::InvalidValue { index });
        }
        Ok(Self {
            breakpoints,
            values,
        })
    }

    /// Create a profile from arrays already known to satisfy the invariants.
    pub(crate) fn new_unchecked(breakpoints: Vec<f64>, values: Vec<f64>) -> Self {
        debug_assert!(breakpoints.len() >= 2);
        debug_assert_eq!(values.len(), breakpoints.len() - 1);
        debug_assert!(breakpoints.windows(2).all(|w| w[1] > w[0]));
        debug_assert!(values.iter().all(|v| v.is_finite() && *v >= 0.0));
        Self {
            breakpoints,
            values,
        }
    }

    /// Create an all-zero profile over the given interval. This is the
    /// identity element of [`combine`][Profile::combine].
    #[must_use]
    pub fn zeros(interval: Interval) -> Self {
        Self {
            breakpoints: vec![interval.t_start(), interval.t_end()],
            values: vec![0.0],
        }
    }

    /// Return the breakpoints as a slice.
    #[must_use]
    pub fn breakpoints(&self) -> &[f64] {
        &self.breakpoints
    }

    /// Return the segment values as a slice.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Return the domain of this profile.
    #[must_use]
    pub fn interval(&self) -> Interval {
        Interval::from_raw(self.breakpoints[0], *self.breakpoints.last().unwrap())
    }

    /// Return the domain start.
    #[must_use]
    pub fn t_start(&self) -> f64 {
        self.breakpoints[0]
    }

    /// Return the domain end.
    #[must_use]
    pub fn t_end(&self) -> f64 {
        *self.breakpoints.last().unwrap()
    }

    /// Consume and return the breakpoint and value vectors.
    #[must_use]
    pub fn into_parts(self) -> (Vec<f64>, Vec<f64>) {
        (self.breakpoints, self.values)
    }

    /// Pointwise sum of two profiles defined on the same domain.
    ///
    /// The resulting breakpoints are the sorted union of both breakpoint
    /// sets; each output segment carries the sum of the two input values
    /// covering it. Runs in O(n1 + n2).
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ProfileError::DomainMismatch`] | Domain endpoints differ |
    pub fn combine(&self, other: &Profile) -> Result<Profile, ProfileError> {
        if self.t_start() != other.t_start() || self.t_end() != other.t_end() {
            return Err(ProfileError::DomainMismatch {
                left_start: self.t_start(),
                left_end: self.t_end(),
                right_start: other.t_start(),
                right_end: other.t_end(),
            });
        }
        Ok(self.merge(other))
    }

    /// Pointwise sum without the domain check. Both profiles must share the
    /// same domain endpoints; callers validate up front.
    pub(crate) fn merge(&self, other: &Profile) -> Profile {
        debug_assert_eq!(self.t_start(), other.t_start());
        debug_assert_eq!(self.t_end(), other.t_end());

        let mut breakpoints = Vec::with_capacity(self.breakpoints.len() + other.breakpoints.len());
        let mut values = Vec::with_capacity(self.values.len() + other.values.len());
        breakpoints.push(self.breakpoints[0]);

        let mut i = 0;
        let mut j = 0;
        while i < self.values.len() && j < other.values.len() {
            values.push(self.values[i] + other.values[j]);
            let ta = self.breakpoints[i + 1];
            let tb = other.breakpoints[j + 1];
            if ta < tb {
                breakpoints.push(ta);
                i += 1;
            } else if tb < ta {
                breakpoints.push(tb);
                j += 1;
            } else {
                breakpoints.push(ta);
                i += 1;
                j += 1;
            }
        }
        // Shared final breakpoint: both cursors exhaust in the same step.
        debug_assert_eq!(i, self.values.len());
        debug_assert_eq!(j, other.values.len());

        Profile {
            breakpoints,
            values,
        }
    }

    /// Multiply every value by `factor`, keeping breakpoints unchanged.
    ///
    /// `factor` must be non-negative to preserve the non-negativity of the
    /// profile; it is typically a normalization constant like `1/M`.
    #[must_use]
    pub fn scale(mut self, factor: f64) -> Self {
        debug_assert!(factor >= 0.0);
        for v in &mut self.values {
            *v *= factor;
        }
        self
    }

    /// Integrate the profile, either over the full domain (`None`) or over a
    /// sub-interval `(a, b)`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ProfileError::IntervalOutOfDomain`] | `(a, b)` empty or not contained in the domain |
    pub fn integral(&self, interval: Option<(f64, f64)>) -> Result<f64, ProfileError> {
        match interval {
            None => Ok(self.full_integral()),
            Some((a, b)) => {
                self.check_window(a, b)?;
                Ok(self.windowed_integral(a, b))
            }
        }
    }

    /// Time average of the profile, either over the full domain (`None`) or
    /// over a sub-interval `(a, b)`: `∫ I(t) dt / (b - a)`.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ProfileError::IntervalOutOfDomain`] | `(a, b)` empty or not contained in the domain |
    pub fn average(&self, interval: Option<(f64, f64)>) -> Result<f64, ProfileError> {
        match interval {
            None => Ok(self.full_average()),
            Some((a, b)) => {
                self.check_window(a, b)?;
                Ok(self.windowed_integral(a, b) / (b - a))
            }
        }
    }

    /// Full-domain time average. Infallible: the domain always has positive length.
    pub(crate) fn full_average(&self) -> f64 {
        self.full_integral() / (self.t_end() - self.t_start())
    }

    fn full_integral(&self) -> f64 {
        self.values
            .iter()
            .zip(self.breakpoints.windows(2))
            .map(|(v, w)| v * (w[1] - w[0]))
            .sum()
    }

    /// Validate that `(a, b)` is a non-empty sub-interval of the domain.
    pub(crate) fn check_window(&self, a: f64, b: f64) -> Result<(), ProfileError> {
        if !(a < b) || a < self.t_start() || b > self.t_end() {
            return Err(ProfileError::IntervalOutOfDomain {
                start: a,
                end: b,
                t_start: self.t_start(),
                t_end: self.t_end(),
            });
        }
        Ok(())
    }

    /// Integral over a window already known to satisfy
    /// `t_start <= a < b <= t_end`. Segments outside `[a, b]` contribute 0.
    pub(crate) fn windowed_integral(&self, a: f64, b: f64) -> f64 {
        // Index of the first segment [t[i], t[i+1]) with t[i+1] > a.
        let first = self.breakpoints.partition_point(|&t| t <= a) - 1;
        let mut acc = 0.0;
        for i in first..self.values.len() {
            let lo = self.breakpoints[i].max(a);
            let hi = self.breakpoints[i + 1].min(b);
            if hi <= lo {
                break;
            }
            acc += self.values[i] * (hi - lo);
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile(breakpoints: Vec<f64>, values: Vec<f64>) -> Profile {
        Profile::new(breakpoints, values).expect("valid test profile")
    }

    #[test]
    fn rejects_single_breakpoint() {
        let result = Profile::new(vec![0.0], vec![]);
        assert!(matches!(result, Err(ProfileError::TooFewBreakpoints { got: 1 })));
    }

    #[test]
    fn rejects_unsorted_breakpoints() {
        let result = Profile::new(vec![0.0, 2.0, 1.0], vec![1.0, 1.0]);
        assert!(matches!(
            result,
            Err(ProfileError::InvalidBreakpoints { index: 2 })
        ));
    }

    #[test]
    fn rejects_length_mismatch() {
        let result = Profile::new(vec![0.0, 1.0, 2.0], vec![1.0]);
        assert!(matches!(
            result,
            Err(ProfileError::LengthMismatch {
                breakpoints: 3,
                values: 1
            })
        ));
    }

    #[test]
    fn rejects_negative_value() {
        let result = Profile::new(vec![0.0, 1.0], vec![-0.5]);
        assert!(matches!(result, Err(ProfileError::InvalidValue { index: 0 })));
    }

    #[test]
    fn rejects_nan_value() {
        let result = Profile::new(vec![0.0, 1.0], vec![f64::NAN]);
        assert!(matches!(result, Err(ProfileError::InvalidValue { index: 0 })));
    }

    #[test]
    fn full_average_weights_by_segment_length() {
        // 1.0 on [0, 1), 0.0 on [1, 4): integral 1.0, average 0.25
        let p = profile(vec![0.0, 1.0, 4.0], vec![1.0, 0.0]);
        assert!((p.average(None).unwrap() - 0.25).abs() < 1e-12);
        assert!((p.integral(None).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn windowed_average_partial_segments() {
        // 1.0 on [0, 2), 3.0 on [2, 4)
        let p = profile(vec![0.0, 2.0, 4.0], vec![1.0, 3.0]);
        // Window [1, 3]: 1.0 * 1 + 3.0 * 1 = 4.0, average 2.0
        assert!((p.average(Some((1.0, 3.0))).unwrap() - 2.0).abs() < 1e-12);
        // Window fully inside one segment
        assert!((p.average(Some((2.5, 3.5))).unwrap() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn full_domain_window_equals_unrestricted() {
        let p = profile(vec![0.0, 1.0, 1.5, 4.0], vec![0.2, 0.0, 0.6]);
        let unrestricted = p.average(None).unwrap();
        let windowed = p.average(Some((0.0, 4.0))).unwrap();
        assert!((unrestricted - windowed).abs() < 1e-12);
    }

    #[test]
    fn window_beyond_domain_rejected() {
        let p = profile(vec![0.0, 4.0], vec![1.0]);
        let result = p.average(Some((1.0, 5.0)));
        assert!(matches!(
            result,
            Err(ProfileError::IntervalOutOfDomain { .. })
        ));
    }

    #[test]
    fn empty_window_rejected() {
        let p = profile(vec![0.0, 4.0], vec![1.0]);
        assert!(p.average(Some((2.0, 2.0))).is_err());
        assert!(p.average(Some((3.0, 1.0))).is_err());
    }

    #[test]
    fn nan_window_rejected() {
        let p = profile(vec![0.0, 4.0], vec![1.0]);
        assert!(p.average(Some((f64::NAN, 2.0))).is_err());
    }

    #[test]
    fn combine_unions_breakpoints() {
        let p1 = profile(vec![0.0, 1.0, 4.0], vec![1.0, 2.0]);
        let p2 = profile(vec![0.0, 3.0, 4.0], vec![10.0, 20.0]);
        let sum = p1.combine(&p2).unwrap();
        assert_eq!(sum.breakpoints(), &[0.0, 1.0, 3.0, 4.0]);
        assert_eq!(sum.values(), &[11.0, 12.0, 22.0]);
    }

    #[test]
    fn combine_shared_breakpoints_not_duplicated() {
        let p1 = profile(vec![0.0, 2.0, 4.0], vec![1.0, 2.0]);
        let p2 = profile(vec![0.0, 2.0, 4.0], vec![3.0, 4.0]);
        let sum = p1.combine(&p2).unwrap();
        assert_eq!(sum.breakpoints(), &[0.0, 2.0, 4.0]);
        assert_eq!(sum.values(), &[4.0, 6.0]);
    }

    #[test]
    fn combine_rejects_domain_mismatch() {
        let p1 = profile(vec![0.0, 4.0], vec![1.0]);
        let p2 = profile(vec![0.0, 5.0], vec![1.0]);
        assert!(matches!(
            p1.combine(&p2),
            Err(ProfileError::DomainMismatch { .. })
        ));
    }

    #[test]
    fn combine_with_zeros_is_identity() {
        let p = profile(vec![0.0, 1.5, 4.0], vec![0.3, 0.7]);
        let zero = Profile::zeros(p.interval());
        let sum = zero.combine(&p).unwrap();
        assert_eq!(sum.breakpoints(), p.breakpoints());
        assert_eq!(sum.values(), p.values());
    }

    #[test]
    fn combine_integral_is_additive() {
        let p1 = profile(vec![0.0, 1.0, 4.0], vec![0.5, 0.25]);
        let p2 = profile(vec![0.0, 2.5, 4.0], vec![0.1, 0.9]);
        let sum = p1.combine(&p2).unwrap();
        let expected = p1.integral(None).unwrap() + p2.integral(None).unwrap();
        assert!((sum.integral(None).unwrap() - expected).abs() < 1e-12);
    }

    #[test]
    fn scale_multiplies_values_only() {
        let p = profile(vec![0.0, 1.0, 4.0], vec![1.0, 2.0]).scale(0.5);
        assert_eq!(p.breakpoints(), &[0.0, 1.0, 4.0]);
        assert_eq!(p.values(), &[0.5, 1.0]);
    }

    #[test]
    fn zeros_averages_to_zero() {
        let p = Profile::zeros(Interval::new(0.0, 4.0).unwrap());
        assert_eq!(p.average(None).unwrap(), 0.0);
        assert_eq!(p.breakpoints(), &[0.0, 4.0]);
    }
}
