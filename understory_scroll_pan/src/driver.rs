// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Update driver: decide between a factor recompute and a transform refresh.
//!
//! ## Usage
//!
//! 1) Create an [`UpdateDriver`] with the component's [`Placement`].
//! 2) Report the two startup preconditions with [`UpdateDriver::mark_attached`]
//!    and [`UpdateDriver::mark_loaded`], in either order.
//! 3) Once both return [`Readiness::Ready`], call [`UpdateDriver::start`] and
//!    begin forwarding triggers to [`UpdateDriver::handle`].
//! 4) Call [`UpdateDriver::dispose`] on teardown; later triggers are ignored.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Rect, Size};
//! use understory_scroll_pan::{
//!     LayoutProbe, PanConfig, PanTransform, Placement, Readiness, TransformTarget, Trigger,
//!     UpdateDriver, UpdateOutcome, ViewportMetrics,
//! };
//!
//! struct Page {
//!     top: f64,
//! }
//!
//! impl LayoutProbe for Page {
//!     fn viewport(&self) -> ViewportMetrics {
//!         ViewportMetrics::new(1000.0, 800.0)
//!     }
//!     fn container_bounds(&self) -> Rect {
//!         Rect::new(0.0, self.top, 1000.0, self.top + 2000.0)
//!     }
//! }
//!
//! #[derive(Default)]
//! struct Image(Option<PanTransform>);
//!
//! impl TransformTarget for Image {
//!     fn set_transform(&mut self, transform: &PanTransform) {
//!         self.0 = Some(*transform);
//!     }
//! }
//!
//! let config = PanConfig::new(
//!     Point::new(0.0, 0.0),
//!     Point::new(100.0, 50.0),
//!     Size::new(800.0, 600.0),
//! );
//! let mut driver = UpdateDriver::new(Placement::new(Some(0.0), Some(0.0)));
//! let mut page = Page { top: 0.0 };
//! let mut image = Image::default();
//!
//! // Not ready yet: triggers are dropped.
//! assert_eq!(driver.handle(Trigger::Scroll, &page, &mut image), UpdateOutcome::Ignored);
//!
//! assert_eq!(driver.mark_attached(), Readiness::Pending);
//! assert_eq!(driver.mark_loaded(config), Readiness::Ready);
//! assert!(driver.start());
//! assert!(matches!(
//!     driver.handle(Trigger::LayoutChanged, &page, &mut image),
//!     UpdateOutcome::Recomputed(_)
//! ));
//!
//! page.top = -600.0;
//! driver.handle(Trigger::Scroll, &page, &mut image);
//! assert_eq!(image.0.unwrap().to_css(), "scale(1.3333333333333333) translate(-50px, -25px)");
//! ```

use kurbo::Rect;

use crate::factors::{PanConfig, PanFactors, resolve_factors};
use crate::placement::Placement;
use crate::transform::PanTransform;
use crate::viewport::ViewportMetrics;

/// Layout measurements supplied by the host.
pub trait LayoutProbe {
    /// Current viewport measurements.
    fn viewport(&self) -> ViewportMetrics;

    /// Current container bounding box, relative to the viewport.
    ///
    /// Its height only changes on relayout; `y0` changes with every scroll.
    fn container_bounds(&self) -> Rect;
}

/// Receiver of computed transforms, typically the image element.
pub trait TransformTarget {
    /// Replaces the target's current transform.
    fn set_transform(&mut self, transform: &PanTransform);
}

/// Signal that may require an update.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Trigger {
    /// The viewport was resized.
    Resize,
    /// The host reported that layout may have changed.
    LayoutChanged,
    /// The page scrolled.
    Scroll,
    /// The host ticked a frame in which only positions may have changed.
    Frame,
}

impl Trigger {
    /// Returns `true` if the viewport or container size may have changed.
    #[must_use]
    pub fn affects_size(self) -> bool {
        matches!(self, Self::Resize | Self::LayoutChanged)
    }
}

/// Per-frame notification from a host scheduler.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameNotice {
    /// Whether layout changed since the previous frame.
    pub has_changed: bool,
}

impl From<FrameNotice> for Trigger {
    fn from(notice: FrameNotice) -> Self {
        if notice.has_changed {
            Self::LayoutChanged
        } else {
            Self::Frame
        }
    }
}

/// Whether both startup preconditions have completed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Readiness {
    /// At least one precondition is outstanding, or the driver was disposed.
    Pending,
    /// The container is attached and the configuration has loaded.
    Ready,
}

/// Lifecycle phase of an [`UpdateDriver`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DriverPhase {
    /// Waiting for startup preconditions; triggers are ignored.
    #[default]
    Pending,
    /// Handling triggers.
    Active,
    /// Torn down; triggers are ignored forever.
    Disposed,
}

/// What [`UpdateDriver::handle`] did with a trigger.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UpdateOutcome {
    /// The driver was not active; nothing ran and nothing was queued.
    Ignored,
    /// Factors were resolved again and the resulting transform applied.
    Recomputed(PanTransform),
    /// Cached factors were evaluated and the transform applied.
    Applied(PanTransform),
}

impl UpdateOutcome {
    /// Applied transform, if any.
    #[must_use]
    pub fn transform(&self) -> Option<PanTransform> {
        match self {
            Self::Ignored => None,
            Self::Recomputed(t) | Self::Applied(t) => Some(*t),
        }
    }
}

/// Applies the transform for `container_top` to `target` and returns it.
///
/// Only evaluates the existing scales; safe to call on every scroll event.
pub fn apply_transform<T: TransformTarget + ?Sized>(
    factors: &PanFactors,
    container_top: f64,
    target: &mut T,
) -> PanTransform {
    let transform = factors.transform_at(container_top);
    target.set_transform(&transform);
    transform
}

/// State machine routing triggers to the factor resolver and transform applier.
///
/// Size-affecting triggers ([`Trigger::affects_size`]) resolve fresh factors
/// and then apply; position-only triggers reuse the cached factors. The
/// driver performs no I/O of its own: layout is read through a
/// [`LayoutProbe`] and transforms are written to a [`TransformTarget`] for the
/// duration of each call.
#[derive(Clone, Debug)]
pub struct UpdateDriver {
    placement: Placement,
    attached: bool,
    config: Option<PanConfig>,
    phase: DriverPhase,
    factors: Option<PanFactors>,
    last_transform: Option<PanTransform>,
}

impl UpdateDriver {
    /// Creates a pending driver.
    #[must_use]
    pub fn new(placement: Placement) -> Self {
        Self {
            placement,
            attached: false,
            config: None,
            phase: DriverPhase::Pending,
            factors: None,
            last_transform: None,
        }
    }

    /// Placement the driver resolves against.
    #[must_use]
    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Loaded configuration, if any.
    #[must_use]
    pub fn config(&self) -> Option<&PanConfig> {
        self.config.as_ref()
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> DriverPhase {
        self.phase
    }

    /// Returns `true` while triggers are being handled.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.phase == DriverPhase::Active
    }

    /// Cached factors from the latest recompute.
    #[must_use]
    pub fn factors(&self) -> Option<&PanFactors> {
        self.factors.as_ref()
    }

    /// Transform most recently written to a target.
    #[must_use]
    pub fn last_transform(&self) -> Option<PanTransform> {
        self.last_transform
    }

    /// Records that the container joined the layout tree.
    pub fn mark_attached(&mut self) -> Readiness {
        if self.phase == DriverPhase::Pending {
            self.attached = true;
        }
        self.readiness()
    }

    /// Records the loaded configuration. A second call keeps the first one.
    pub fn mark_loaded(&mut self, config: PanConfig) -> Readiness {
        if self.phase == DriverPhase::Pending && self.config.is_none() {
            self.config = Some(config);
        }
        self.readiness()
    }

    /// Current startup readiness.
    #[must_use]
    pub fn readiness(&self) -> Readiness {
        if self.phase != DriverPhase::Disposed && self.attached && self.config.is_some() {
            Readiness::Ready
        } else {
            Readiness::Pending
        }
    }

    /// Moves a ready, pending driver to [`DriverPhase::Active`].
    ///
    /// Returns `true` only on that transition. The caller follows up with a
    /// size-affecting trigger before subscribing to further triggers.
    pub fn start(&mut self) -> bool {
        if self.phase == DriverPhase::Pending && self.readiness() == Readiness::Ready {
            self.phase = DriverPhase::Active;
            true
        } else {
            false
        }
    }

    /// Handles one trigger to completion.
    ///
    /// A position-only trigger arriving before the first recompute resolves
    /// factors anyway, so a transform is never applied against missing factors.
    pub fn handle<L, T>(&mut self, trigger: Trigger, layout: &L, target: &mut T) -> UpdateOutcome
    where
        L: LayoutProbe + ?Sized,
        T: TransformTarget + ?Sized,
    {
        if self.phase != DriverPhase::Active {
            return UpdateOutcome::Ignored;
        }
        if trigger.affects_size() || self.factors.is_none() {
            self.refresh_factors(layout, target)
        } else {
            self.refresh_transform(layout, target)
        }
    }

    /// Tears the driver down, dropping cached state.
    ///
    /// Idempotent. The caller is responsible for unsubscribing whatever
    /// delivered triggers.
    pub fn dispose(&mut self) {
        self.phase = DriverPhase::Disposed;
        self.factors = None;
    }

    fn refresh_factors<L, T>(&mut self, layout: &L, target: &mut T) -> UpdateOutcome
    where
        L: LayoutProbe + ?Sized,
        T: TransformTarget + ?Sized,
    {
        let Some(config) = self.config.as_ref() else {
            return UpdateOutcome::Ignored;
        };
        let viewport = layout.viewport();
        let bounds = layout.container_bounds();
        let factors = resolve_factors(config, self.placement, &viewport, bounds.height());
        let transform = apply_transform(&factors, bounds.y0, target);
        self.factors = Some(factors);
        self.last_transform = Some(transform);
        UpdateOutcome::Recomputed(transform)
    }

    fn refresh_transform<L, T>(&mut self, layout: &L, target: &mut T) -> UpdateOutcome
    where
        L: LayoutProbe + ?Sized,
        T: TransformTarget + ?Sized,
    {
        let Some(factors) = self.factors.as_ref() else {
            return UpdateOutcome::Ignored;
        };
        let transform = apply_transform(factors, layout.container_bounds().y0, target);
        self.last_transform = Some(transform);
        UpdateOutcome::Applied(transform)
    }
}
