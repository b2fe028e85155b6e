// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::fmt;
use std::rc::Rc;

use understory_scroll_pan::{FrameNotice, Trigger};

use crate::host::{ListenerId, Scheduler, SubscriptionId, ViewportEvent, ViewportEvents};

/// Receiver of triggers from a [`Binding`].
pub type TriggerHandler = Rc<dyn Fn(Trigger)>;

/// Front-end delivering triggers to an update driver.
///
/// Both variants are equally valid; [`Binding::select`] prefers the host
/// scheduler when there is one.
#[derive(Clone)]
pub enum Binding {
    /// Per-frame notifications from a host scheduler. A notice with
    /// `has_changed` set is size-affecting; any other is position-only.
    Scheduler(Rc<dyn Scheduler>),
    /// Direct `resize` / `scroll` listeners on the viewport.
    Events(Rc<dyn ViewportEvents>),
}

/// What a started [`Binding`] registered, for [`Binding::stop`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Registration {
    /// One scheduler subscription.
    Subscription(SubscriptionId),
    /// One listener per viewport event.
    Listeners {
        /// The `resize` listener.
        resize: ListenerId,
        /// The `scroll` listener.
        scroll: ListenerId,
    },
}

impl Binding {
    /// Picks the front-end by host capability.
    #[must_use]
    pub fn select(scheduler: Option<Rc<dyn Scheduler>>, events: Rc<dyn ViewportEvents>) -> Self {
        match scheduler {
            Some(scheduler) => Self::Scheduler(scheduler),
            None => Self::Events(events),
        }
    }

    /// Performs the first size-affecting update and subscribes `handler`.
    ///
    /// The scheduler front-end enqueues the first update before subscribing;
    /// the events front-end runs it synchronously before listening.
    pub fn start(&self, handler: TriggerHandler) -> Registration {
        match self {
            Self::Scheduler(scheduler) => {
                let initial = Rc::clone(&handler);
                scheduler.enqueue(Box::new(move || initial(Trigger::LayoutChanged)));
                let id = scheduler.subscribe(Rc::new(move |notice: FrameNotice| {
                    handler(notice.into());
                }));
                Registration::Subscription(id)
            }
            Self::Events(events) => {
                handler(Trigger::Resize);
                let listen = |event: ViewportEvent| {
                    let handler = Rc::clone(&handler);
                    events.listen(event, Rc::new(move || handler(event.trigger())))
                };
                Registration::Listeners {
                    resize: listen(ViewportEvent::Resize),
                    scroll: listen(ViewportEvent::Scroll),
                }
            }
        }
    }

    /// Removes everything `registration` subscribed.
    pub fn stop(&self, registration: Registration) {
        match (self, registration) {
            (Self::Scheduler(scheduler), Registration::Subscription(id)) => {
                scheduler.unsubscribe(id);
            }
            (Self::Events(events), Registration::Listeners { resize, scroll }) => {
                events.unlisten(resize);
                events.unlisten(scroll);
            }
            (binding, registration) => {
                log::warn!("{registration:?} does not belong to {binding:?}; nothing to stop");
            }
        }
    }
}

impl fmt::Debug for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Scheduler(_) => f.write_str("Binding::Scheduler"),
            Self::Events(_) => f.write_str("Binding::Events"),
        }
    }
}
