//! ISI-profile math: a single merged-event sweep over two spike trains.
//!
//! The instantaneous ISI dissimilarity at time `t` compares the current
//! inter-spike intervals `nu1(t)` and `nu2(t)` of the two trains:
//! `I(t) = |nu1 - nu2| / max(nu1, nu2)`, which is piecewise constant between
//! spikes and bounded to `[0, 1]`. Breakpoints are the merged spike times of
//! both trains together with the interval bounds.
//!
//! Inputs here are raw spike slices; empty trains are substituted with the
//! auxiliary pair `[t_start, t_end]` one layer up, so every slice is non-empty.

/// Sweep cursor over one spike train, tracking the current inter-spike interval.
///
/// Edge correction at the interval bounds follows Kreuz et al.: the leading
/// ISI is `max(first - t_start, second - first)` and the trailing ISI is
/// `max(t_end - last, previous ISI)`, so that a long silence before the first
/// or after the last spike does not produce an artificially short interval.
struct IsiCursor<'a> {
    spikes: &'a [f64],
    /// Index of the next unconsumed spike.
    next: usize,
    /// Current inter-spike interval.
    nu: f64,
}

impl<'a> IsiCursor<'a> {
    fn new(spikes: &'a [f64], t_start: f64, t_end: f64) -> Self {
        debug_assert!(!spikes.is_empty());
        if spikes[0] > t_start {
            let nu = if spikes.len() > 1 {
                (spikes[0] - t_start).max(spikes[1] - spikes[0])
            } else {
                spikes[0] - t_start
            };
            Self { spikes, next: 0, nu }
        } else {
            // First spike coincides with the interval start: already consumed.
            let nu = if spikes.len() > 1 {
                spikes[1] - spikes[0]
            } else {
                t_end - spikes[0]
            };
            Self { spikes, next: 1, nu }
        }
    }

    fn peek(&self) -> Option<f64> {
        self.spikes.get(self.next).copied()
    }

    /// Consume the next spike and update the current ISI, applying the edge
    /// correction once the last spike is passed.
    fn advance(&mut self, t_end: f64) -> f64 {
        let t = self.spikes[self.next];
        self.next += 1;
        if self.next < self.spikes.len() {
            self.nu = self.spikes[self.next] - t;
        } else if self.spikes.len() > 1 {
            self.nu = (t_end - t).max(self.nu);
        } else {
            self.nu = t_end - t;
        }
        t
    }
}

/// Instantaneous ISI dissimilarity of two inter-spike intervals.
fn isi_value(nu1: f64, nu2: f64) -> f64 {
    let max = nu1.max(nu2);
    if max > 0.0 { (nu1 - nu2).abs() / max } else { 0.0 }
}

/// Advance whichever cursor holds the earlier next spike; coincident spikes
/// advance both. Returns the consumed spike time, or `None` when exhausted.
fn next_event(c1: &mut IsiCursor<'_>, c2: &mut IsiCursor<'_>, t_end: f64) -> Option<f64> {
    match (c1.peek(), c2.peek()) {
        (Some(ta), Some(tb)) => {
            if ta < tb {
                Some(c1.advance(t_end))
            } else if tb < ta {
                Some(c2.advance(t_end))
            } else {
                let t = c1.advance(t_end);
                c2.advance(t_end);
                Some(t)
            }
        }
        (Some(_), None) => Some(c1.advance(t_end)),
        (None, Some(_)) => Some(c2.advance(t_end)),
        (None, None) => None,
    }
}

/// Compute the ISI-profile breakpoints and values over `[t_start, t_end]`.
///
/// Breakpoints are `t_start`, the merged spike times of both trains, and
/// `t_end`; strictly increasing. Runs in O(|s1| + |s2|).
pub(crate) fn isi_profile(s1: &[f64], s2: &[f64], t_start: f64, t_end: f64) -> (Vec<f64>, Vec<f64>) {
    let mut c1 = IsiCursor::new(s1, t_start, t_end);
    let mut c2 = IsiCursor::new(s2, t_start, t_end);

    let cap = s1.len() + s2.len() + 2;
    let mut breakpoints = Vec::with_capacity(cap);
    let mut values = Vec::with_capacity(cap - 1);

    breakpoints.push(t_start);
    values.push(isi_value(c1.nu, c2.nu));

    while let Some(t) = next_event(&mut c1, &mut c2, t_end) {
        breakpoints.push(t);
        values.push(isi_value(c1.nu, c2.nu));
    }

    // Close the domain at t_end. A final spike exactly at t_end would
    // otherwise leave an empty trailing segment.
    if *breakpoints.last().unwrap() == t_end {
        values.pop();
    } else {
        breakpoints.push(t_end);
    }

    (breakpoints, values)
}

/// Compute the time-averaged ISI distance directly, without materializing the
/// profile. Same sweep as [`isi_profile`], accumulating the integral as it goes.
#[cfg(feature = "fused")]
pub(crate) fn isi_distance(s1: &[f64], s2: &[f64], t_start: f64, t_end: f64) -> f64 {
    let mut c1 = IsiCursor::new(s1, t_start, t_end);
    let mut c2 = IsiCursor::new(s2, t_start, t_end);

    let mut acc = 0.0;
    let mut last_t = t_start;
    let mut current = isi_value(c1.nu, c2.nu);

    while let Some(t) = next_event(&mut c1, &mut c2, t_end) {
        acc += current * (t - last_t);
        last_t = t;
        current = isi_value(c1.nu, c2.nu);
    }
    acc += current * (t_end - last_t);

    acc / (t_end - t_start)
}
