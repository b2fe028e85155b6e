// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Clamped 1D linear scale from a domain onto a range.
///
/// `LinearScale` maps `domain[0]` to `range[0]` and `domain[1]` to `range[1]`,
/// interpolating linearly in between. Inputs outside the domain saturate at
/// the nearest endpoint's output; the scale never extrapolates.
///
/// Either pair may be descending. A zero-length domain or range maps every
/// input to `range[0]`.
///
/// ```rust
/// use understory_scroll_pan::LinearScale;
///
/// let scale = LinearScale::new([0.0, -1200.0], [0.0, 100.0]);
/// assert_eq!(scale.eval(-600.0), 50.0);
/// assert_eq!(scale.eval(500.0), 0.0);
/// assert_eq!(scale.eval(-5000.0), 100.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: [f64; 2],
    range: [f64; 2],
}

impl LinearScale {
    /// Creates a scale mapping `domain` onto `range`.
    #[must_use]
    pub const fn new(domain: [f64; 2], range: [f64; 2]) -> Self {
        Self { domain, range }
    }

    /// Returns the domain bounds, in construction order.
    #[must_use]
    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    /// Returns the range bounds, in construction order.
    #[must_use]
    pub fn range(&self) -> [f64; 2] {
        self.range
    }

    /// Evaluates the scale at `value`.
    #[must_use]
    pub fn eval(&self, value: f64) -> f64 {
        let [d0, d1] = self.domain;
        let [r0, r1] = self.range;
        if d0 == d1 || r0 == r1 {
            return r0;
        }
        let t = (self.clamp_to_domain(value) - d0) / (d1 - d0);
        // Weighted form hits both endpoints exactly at t = 0 and t = 1.
        let out = r0 * (1.0 - t) + r1 * t;
        let (lo, hi) = if r0 <= r1 { (r0, r1) } else { (r1, r0) };
        out.max(lo).min(hi)
    }

    /// Clamps `value` into the domain, regardless of its ordering.
    #[must_use]
    pub fn clamp_to_domain(&self, value: f64) -> f64 {
        let [d0, d1] = self.domain;
        let (lo, hi) = if d0 <= d1 { (d0, d1) } else { (d1, d0) };
        value.max(lo).min(hi)
    }
}
