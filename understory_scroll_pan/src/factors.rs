// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Size};

use crate::placement::Placement;
use crate::scale::LinearScale;
use crate::transform::PanTransform;
use crate::viewport::ViewportMetrics;

/// Image-space geometry of a pan sequence.
///
/// `begin_at` and `end_at` are pixel coordinates in the image's natural
/// space. Either axis may run backwards (`begin_at.x > end_at.x`), which
/// reverses the pan direction on that axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanConfig {
    /// Where the visible window starts.
    pub begin_at: Point,
    /// Where the visible window ends.
    pub end_at: Point,
    /// Intrinsic pixel size of the image.
    pub natural_size: Size,
}

impl PanConfig {
    /// Creates a configuration from its two reference points and the image size.
    #[must_use]
    pub const fn new(begin_at: Point, end_at: Point, natural_size: Size) -> Self {
        Self {
            begin_at,
            end_at,
            natural_size,
        }
    }
}

/// Measurements a [`PanFactors`] value was resolved from.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FactorInputs {
    /// Viewport width and the height selected by the chrome heuristic.
    pub viewport: Size,
    /// Container bounding box height.
    pub container_height: f64,
    /// Placement in effect.
    pub placement: Placement,
}

/// Mapping from container `top` offset to image-space pan, plus cover zoom.
///
/// Produced by [`resolve_factors`] and cached until the viewport size or
/// container height may have changed. Evaluating it only reads the two scales.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PanFactors {
    domain: [f64; 2],
    x_scale: LinearScale,
    y_scale: LinearScale,
    zoom: f64,
    inputs: FactorInputs,
}

impl PanFactors {
    /// Span of container `top` offsets over which panning is active.
    #[must_use]
    pub fn domain(&self) -> [f64; 2] {
        self.domain
    }

    /// Scale from container `top` to image-space x.
    #[must_use]
    pub fn x_scale(&self) -> &LinearScale {
        &self.x_scale
    }

    /// Scale from container `top` to image-space y.
    #[must_use]
    pub fn y_scale(&self) -> &LinearScale {
        &self.y_scale
    }

    /// Cover-fit zoom factor.
    #[must_use]
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Measurements these factors were resolved from.
    #[must_use]
    pub fn inputs(&self) -> &FactorInputs {
        &self.inputs
    }

    /// Image-space point shown at the viewport origin for a container `top`.
    #[must_use]
    pub fn pan_at(&self, container_top: f64) -> Point {
        Point::new(
            self.x_scale.eval(container_top),
            self.y_scale.eval(container_top),
        )
    }

    /// Transform to apply to the image for a container `top`.
    #[must_use]
    pub fn transform_at(&self, container_top: f64) -> PanTransform {
        let pan = self.pan_at(container_top);
        PanTransform::new(self.zoom, -pan.to_vec2())
    }
}

/// Resolves the pan mapping for the current viewport and container size.
///
/// The viewport height goes through [`ViewportMetrics::effective_height`].
/// The zoom is a cover fit: the larger of the two viewport / natural ratios,
/// so the image never under-fills either axis.
#[must_use]
pub fn resolve_factors(
    config: &PanConfig,
    placement: Placement,
    viewport: &ViewportMetrics,
    container_height: f64,
) -> PanFactors {
    let viewport_size = viewport.effective_size();
    let domain = placement.domain(viewport_size.height, container_height);
    let natural = config.natural_size;
    let zoom = (viewport_size.height / natural.height).max(viewport_size.width / natural.width);

    PanFactors {
        domain,
        x_scale: axis_scale(domain, config.begin_at.x, config.end_at.x),
        y_scale: axis_scale(domain, config.begin_at.y, config.end_at.y),
        zoom,
        inputs: FactorInputs {
            viewport: viewport_size,
            container_height,
            placement,
        },
    }
}

/// Builds one axis so its range is always ascending.
fn axis_scale(domain: [f64; 2], begin: f64, end: f64) -> LinearScale {
    if begin > end {
        LinearScale::new([domain[1], domain[0]], [end, begin])
    } else {
        LinearScale::new(domain, [begin, end])
    }
}
