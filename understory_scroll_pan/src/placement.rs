// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Percentage used for a placement bound that is absent or not a number.
///
/// `100` on both bounds means the sequence runs from the container fully
/// entering the viewport to it fully leaving.
pub const DEFAULT_VIEWPORT_PERCENT: f64 = 100.0;

/// Where, in viewport-height percentages, the pan sequence starts and ends.
///
/// Both bounds are clamped to `[0, 100]` on construction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    start_vh: f64,
    end_vh: f64,
}

impl Placement {
    /// Creates a placement, defaulting absent or NaN bounds and clamping the rest.
    #[must_use]
    pub fn new(start_vh: Option<f64>, end_vh: Option<f64>) -> Self {
        Self {
            start_vh: normalize(start_vh),
            end_vh: normalize(end_vh),
        }
    }

    /// Percentage of viewport height at which the sequence begins.
    #[must_use]
    pub fn start_vh(&self) -> f64 {
        self.start_vh
    }

    /// Percentage of viewport height at which the sequence ends.
    #[must_use]
    pub fn end_vh(&self) -> f64 {
        self.end_vh
    }

    /// Container `top` offsets over which panning is active.
    ///
    /// The first bound is reached as the container scrolls in, the second as
    /// it scrolls out. They may be in either order.
    #[must_use]
    pub fn domain(&self, viewport_height: f64, container_height: f64) -> [f64; 2] {
        [
            (self.start_vh / 100.0) * viewport_height,
            -container_height - (self.end_vh / 100.0) * viewport_height + viewport_height,
        ]
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::new(None, None)
    }
}

fn normalize(percent: Option<f64>) -> f64 {
    match percent {
        Some(p) if !p.is_nan() => p.clamp(0.0, 100.0),
        _ => DEFAULT_VIEWPORT_PERCENT,
    }
}
