// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use alloc::string::{String, ToString};
use kurbo::{Affine, Point, Vec2};

/// Scale-then-translate transform for the panned image.
///
/// The translation is expressed in unscaled image space: the image is first
/// moved by `translate`, then scaled by `zoom` about the origin. This matches
/// the CSS value `scale(zoom) translate(x, y)`, where the outer scale also
/// magnifies the translation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanTransform {
    /// Uniform scale factor.
    pub zoom: f64,
    /// Translation in unscaled image pixels.
    pub translate: Vec2,
}

impl PanTransform {
    /// Creates a transform from its zoom and unscaled translation.
    #[must_use]
    pub const fn new(zoom: f64, translate: Vec2) -> Self {
        Self { zoom, translate }
    }

    /// Equivalent affine, mapping image space into viewport space.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        Affine::scale(self.zoom) * Affine::translate(self.translate)
    }

    /// Maps an image-space point to its viewport position.
    #[must_use]
    pub fn image_to_viewport(&self, pt: Point) -> Point {
        self.to_affine() * pt
    }

    /// CSS `transform` property value.
    #[must_use]
    pub fn to_css(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PanTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Adding zero turns `-0.0` into `0.0` so it never prints as "-0".
        write!(
            f,
            "scale({}) translate({}px, {}px)",
            self.zoom + 0.0,
            self.translate.x + 0.0,
            self.translate.y + 0.0
        )
    }
}
