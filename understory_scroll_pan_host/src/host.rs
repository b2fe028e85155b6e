// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capabilities a host page provides to a mounted pan sequence.
//!
//! Everything runs on the host's single UI thread, so capabilities take
//! `&self` and callbacks are `Rc`/`Box` closures without `Send` bounds. A
//! host may invoke callbacks synchronously from inside a capability call.

use std::rc::Rc;
use std::time::Duration;

use understory_scroll_pan::{FrameNotice, Trigger};

/// Deferred unit of work.
pub type Task = Box<dyn FnOnce()>;

/// Per-frame scheduler callback.
pub type FrameCallback = Rc<dyn Fn(FrameNotice)>;

/// Viewport event callback.
pub type EventCallback = Rc<dyn Fn()>;

/// Completion of a single-attempt host operation; `Err` carries the host's
/// description of the failure.
pub type Completion<T> = Box<dyn FnOnce(Result<T, String>)>;

/// Handle returned by [`Scheduler::subscribe`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub u64);

/// Handle returned by [`ViewportEvents::listen`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

/// Host frame scheduler.
pub trait Scheduler {
    /// Runs `task` once, on a later frame.
    fn enqueue(&self, task: Task);

    /// Calls `callback` on every frame until unsubscribed.
    fn subscribe(&self, callback: FrameCallback) -> SubscriptionId;

    /// Stops a subscription. Unknown ids are ignored.
    fn unsubscribe(&self, id: SubscriptionId);
}

/// Global viewport events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewportEvent {
    /// The viewport was resized.
    Resize,
    /// The document scrolled.
    Scroll,
}

impl ViewportEvent {
    /// Trigger this event stands for.
    #[must_use]
    pub fn trigger(self) -> Trigger {
        match self {
            Self::Resize => Trigger::Resize,
            Self::Scroll => Trigger::Scroll,
        }
    }
}

/// Direct subscription to viewport events.
pub trait ViewportEvents {
    /// Calls `callback` whenever `event` fires until unlistened.
    fn listen(&self, event: ViewportEvent, callback: EventCallback) -> ListenerId;

    /// Removes a listener. Unknown ids are ignored.
    fn unlisten(&self, id: ListenerId);
}

/// One-shot timers.
pub trait Timer {
    /// Runs `task` once after `delay`.
    fn set_timeout(&self, delay: Duration, task: Task);
}

/// Whether the container is part of the live layout tree.
pub trait AttachmentProbe {
    /// Returns `true` once the container has a matching layout ancestor.
    fn is_attached(&self) -> bool;
}

/// Single-attempt text fetch.
pub trait Fetcher {
    /// Fetches `url` and reports the body or a failure to `done`.
    fn fetch(&self, url: &str, done: Completion<String>);
}

/// Single-attempt image load.
pub trait ImageLoader {
    /// Loads `url`, attaching the image to the mount root on success, and
    /// reports the outcome to `done`.
    fn load(&self, url: &str, done: Completion<()>);
}
