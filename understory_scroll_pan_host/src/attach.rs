// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use crate::host::{AttachmentProbe, Task, Timer};

/// Delay between attachment checks.
pub const ATTACHMENT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Polls until the container joins the layout tree.
///
/// The first check runs immediately; further checks are scheduled on the
/// host [`Timer`] every `interval`, without limit, until one succeeds or the
/// watcher is cancelled. Dropping the watcher cancels it.
pub struct AttachmentWatcher {
    state: Rc<WatchState>,
}

struct WatchState {
    probe: Rc<dyn AttachmentProbe>,
    timer: Rc<dyn Timer>,
    interval: Duration,
    attempts: Cell<u32>,
    attached: Cell<bool>,
    cancelled: Cell<bool>,
    on_attached: RefCell<Option<Task>>,
}

impl AttachmentWatcher {
    /// Starts watching; `on_attached` runs at most once.
    pub fn start(
        probe: Rc<dyn AttachmentProbe>,
        timer: Rc<dyn Timer>,
        interval: Duration,
        on_attached: impl FnOnce() + 'static,
    ) -> Self {
        let state = Rc::new(WatchState {
            probe,
            timer,
            interval,
            attempts: Cell::new(0),
            attached: Cell::new(false),
            cancelled: Cell::new(false),
            on_attached: RefCell::new(Some(Box::new(on_attached))),
        });
        check(&state);
        Self { state }
    }

    /// Stops polling. A pending timer fires as a no-op.
    pub fn cancel(&self) {
        self.state.cancelled.set(true);
        self.state.on_attached.borrow_mut().take();
    }

    /// Number of checks performed so far.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.state.attempts.get()
    }

    /// Returns `true` once a check has seen the container attached.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.state.attached.get()
    }

    /// Returns `true` if [`cancel`](Self::cancel) was called.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.state.cancelled.get()
    }
}

impl Drop for AttachmentWatcher {
    fn drop(&mut self) {
        self.cancel();
    }
}

impl fmt::Debug for AttachmentWatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttachmentWatcher")
            .field("interval", &self.state.interval)
            .field("attempts", &self.state.attempts.get())
            .field("attached", &self.state.attached.get())
            .field("cancelled", &self.state.cancelled.get())
            .finish_non_exhaustive()
    }
}

fn check(state: &Rc<WatchState>) {
    if state.cancelled.get() || state.attached.get() {
        return;
    }
    state.attempts.set(state.attempts.get().saturating_add(1));

    if state.probe.is_attached() {
        state.attached.set(true);
        log::debug!("container attached after {} checks", state.attempts.get());
        let on_attached = state.on_attached.borrow_mut().take();
        if let Some(on_attached) = on_attached {
            on_attached();
        }
        return;
    }

    log::trace!("container not attached, retrying in {:?}", state.interval);
    let next = Rc::clone(state);
    state
        .timer
        .set_timeout(state.interval, Box::new(move || check(&next)));
}
