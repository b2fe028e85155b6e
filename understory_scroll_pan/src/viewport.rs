// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Size;

/// Largest gap, in pixels, between the primary viewport height and the
/// available screen height that is still treated as retractable browser chrome.
///
/// At or above this gap the primary height is trusted (split screen, resized
/// window and similar).
pub const VARIABLE_CHROME_THRESHOLD: f64 = 200.0;

/// Live viewport measurements, read fresh for every factor recompute.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportMetrics {
    /// Viewport width in pixels.
    pub width: f64,
    /// Primary viewport height in pixels.
    pub height: f64,
    /// Secondary "available screen height", if the host can measure it.
    ///
    /// `None` and `Some(0.0)` both mean unavailable.
    pub available_height: Option<f64>,
}

impl ViewportMetrics {
    /// Creates metrics with only the primary measurements.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            available_height: None,
        }
    }

    /// Returns a copy with the secondary height measurement set.
    #[must_use]
    pub const fn with_available_height(mut self, available_height: f64) -> Self {
        self.available_height = Some(available_height);
        self
    }

    /// Height to lay the pan sequence out against.
    ///
    /// See [`select_viewport_height`].
    #[must_use]
    pub fn effective_height(&self) -> f64 {
        select_viewport_height(self.height, self.available_height)
    }

    /// Width and effective height.
    #[must_use]
    pub fn effective_size(&self) -> Size {
        Size::new(self.width, self.effective_height())
    }

    /// Width over the primary height, or `None` for a zero-height viewport.
    ///
    /// Orientation follows the layout viewport, so the secondary height
    /// never takes part here.
    #[must_use]
    pub fn aspect_ratio(&self) -> Option<f64> {
        (self.height != 0.0).then(|| self.width / self.height)
    }
}

/// Picks between the primary and secondary viewport heights.
///
/// Mobile browsers grow and shrink the visible height as their toolbars
/// retract, so a secondary measurement within
/// [`VARIABLE_CHROME_THRESHOLD`] pixels of the primary one is preferred. An
/// absent or zero secondary measurement always yields `primary`.
#[must_use]
pub fn select_viewport_height(primary: f64, secondary: Option<f64>) -> f64 {
    match secondary {
        Some(secondary)
            if secondary != 0.0 && (secondary - primary).abs() < VARIABLE_CHROME_THRESHOLD =>
        {
            secondary
        }
        _ => primary,
    }
}
