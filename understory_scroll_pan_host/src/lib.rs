// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_scroll_pan_host --heading-base-level=0

//! Understory Scroll Pan Host: mounting a scroll-driven pan sequence in a page.
//!
//! [`understory_scroll_pan`] computes transforms; this crate connects it to a
//! host page through small capability traits:
//! - [`PanDocument`]: the JSON configuration served next to the image, and
//!   [`resolve_image_url`] for locating the image relative to it.
//! - [`ConfigSource`]: discovery of a sequence's [`MountProps`], either from
//!   explicit attributes ([`AttributeSource`]) or from an alternating-case
//!   marker name ([`MarkerSource`]).
//! - [`AttachmentWatcher`]: fixed-interval polling until the container joins
//!   the layout tree.
//! - [`Binding`]: the two trigger front-ends, a host [`Scheduler`] or direct
//!   [`ViewportEvents`].
//! - [`PanZoom`]: the mounted component tying these together.
//!
//! ## Lifecycle
//!
//! ```text
//! mount ──┬─ fetch config ─ load image ──┐
//!         └─ poll attachment (100 ms) ───┴─ both done ─ first update ─ subscribe
//! dispose ─ stop polling ─ unsubscribe ─ driver ignores everything
//! ```
//!
//! Load failures are logged through the `log` facade and leave the component
//! inert; nothing is retried. All state lives on the host's UI thread.

mod attach;
mod binding;
mod component;
mod document;
mod error;
pub mod host;
mod placement;
pub mod source;

pub use attach::{ATTACHMENT_POLL_INTERVAL, AttachmentWatcher};
pub use binding::{Binding, Registration, TriggerHandler};
pub use component::{HostContext, MountStatus, PanZoom};
pub use document::{PanDocument, resolve_image_url};
pub use error::LoadError;
pub use host::{
    AttachmentProbe, Fetcher, ImageLoader, ListenerId, Scheduler, SubscriptionId, Timer,
    ViewportEvent, ViewportEvents,
};
pub use placement::{parse_percentage, placement_from_strs};
pub use source::{AttributeSource, ConfigSource, MarkerSource, MountProps, decode_alternating_case};
