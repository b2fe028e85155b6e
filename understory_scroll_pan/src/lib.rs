// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_scroll_pan --heading-base-level=0

//! Understory Scroll Pan: scroll-driven pan and zoom of a background image.
//!
//! As a container scrolls through the viewport, the image behind it pans
//! between two image-space points and is zoomed to cover the viewport. This
//! crate provides the headless engine:
//! - [`LinearScale`]: clamped 1D interpolation, never extrapolating.
//! - [`resolve_factors`]: the mapping from container `top` offset to
//!   image-space pan, plus a cover-fit zoom ([`PanFactors`]).
//! - [`PanTransform`]: the scale-then-translate result, as a Kurbo
//!   [`Affine`](kurbo::Affine) or a CSS `transform` value.
//! - [`UpdateDriver`]: decides per [`Trigger`] whether to recompute factors
//!   or only re-apply the transform, and gates everything on startup
//!   readiness and disposal.
//!
//! It does **not** fetch configuration, poll for element attachment or
//! subscribe to host events. Callers are expected to:
//! - Measure layout through a [`LayoutProbe`].
//! - Write transforms through a [`TransformTarget`].
//! - Forward resize/scroll or scheduler notifications as [`Trigger`]s.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use understory_scroll_pan::{PanConfig, Placement, ViewportMetrics, resolve_factors};
//!
//! let config = PanConfig::new(
//!     Point::new(0.0, 0.0),
//!     Point::new(100.0, 50.0),
//!     Size::new(800.0, 600.0),
//! );
//! let placement = Placement::new(Some(0.0), Some(0.0));
//! let viewport = ViewportMetrics::new(1000.0, 800.0);
//!
//! let factors = resolve_factors(&config, placement, &viewport, 2000.0);
//! assert_eq!(factors.domain(), [0.0, -1200.0]);
//!
//! // Halfway through the domain the pan is halfway between the points.
//! assert_eq!(factors.pan_at(-600.0), Point::new(50.0, 25.0));
//!
//! let transform = factors.transform_at(-600.0);
//! assert_eq!(transform.to_css(), "scale(1.3333333333333333) translate(-50px, -25px)");
//! ```
//!
//! ## Design notes
//!
//! - The domain is the span of container `top` offsets between the
//!   placement's start and end; the scales saturate outside it.
//! - An axis whose `begin_at` exceeds its `end_at` is built over the reversed
//!   domain so its range is ascending; endpoints still map
//!   `begin_at` ↔ domain start and `end_at` ↔ domain end.
//! - The viewport height prefers the host's available screen height when it
//!   is within [`VARIABLE_CHROME_THRESHOLD`] pixels of the primary height.
//!
//! This crate is `no_std`.

#![no_std]

extern crate alloc;

mod driver;
mod factors;
mod placement;
mod scale;
mod transform;
mod viewport;

pub use driver::{
    DriverPhase, FrameNotice, LayoutProbe, Readiness, TransformTarget, Trigger, UpdateDriver,
    UpdateOutcome, apply_transform,
};
pub use factors::{FactorInputs, PanConfig, PanFactors, resolve_factors};
pub use placement::{DEFAULT_VIEWPORT_PERCENT, Placement};
pub use scale::LinearScale;
pub use transform::PanTransform;
pub use viewport::{VARIABLE_CHROME_THRESHOLD, ViewportMetrics, select_viewport_height};
