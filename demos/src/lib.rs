// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless host used by the scroll pan demos.
//!
//! Everything completes synchronously: fetches answer from an in-memory file
//! table, images always load, and timers run when [`HeadlessHost::tick`] is
//! called. Transforms are collected as CSS strings.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use kurbo::Rect;
use understory_scroll_pan::{LayoutProbe, PanTransform, TransformTarget, ViewportMetrics};
use understory_scroll_pan_host::host::{Completion, EventCallback, Task};
use understory_scroll_pan_host::{
    AttachmentProbe, Binding, Fetcher, HostContext, ImageLoader, ListenerId, Timer,
    ViewportEvent, ViewportEvents,
};

/// Page geometry and the in-memory network.
pub struct HeadlessHost {
    viewport: Cell<ViewportMetrics>,
    bounds: Cell<Rect>,
    attached: Cell<bool>,
    files: RefCell<HashMap<String, String>>,
    timeouts: RefCell<Vec<Task>>,
    listeners: RefCell<BTreeMap<u64, (ViewportEvent, EventCallback)>>,
    next_listener: Cell<u64>,
    css: RefCell<Vec<String>>,
}

impl HeadlessHost {
    /// Creates a host with the given viewport and container size.
    pub fn new(viewport: ViewportMetrics, container_height: f64) -> Rc<Self> {
        Rc::new(Self {
            viewport: Cell::new(viewport),
            bounds: Cell::new(Rect::new(0.0, 0.0, viewport.width, container_height)),
            attached: Cell::new(false),
            files: RefCell::default(),
            timeouts: RefCell::default(),
            listeners: RefCell::default(),
            next_listener: Cell::new(0),
            css: RefCell::default(),
        })
    }

    /// Serves `body` at `url`.
    pub fn serve(&self, url: &str, body: &str) {
        self.files
            .borrow_mut()
            .insert(url.to_owned(), body.to_owned());
    }

    /// Host capabilities wired to this page, using direct viewport events.
    pub fn context(host: &Rc<Self>) -> HostContext {
        HostContext {
            layout: host.clone(),
            target: Rc::new(RefCell::new(CssTarget(host.clone()))),
            attachment: host.clone(),
            timer: host.clone(),
            fetcher: host.clone(),
            images: host.clone(),
            binding: Binding::Events(host.clone()),
        }
    }

    /// Marks the container as attached to the layout tree.
    pub fn attach(&self) {
        self.attached.set(true);
    }

    /// Runs every pending timeout once.
    pub fn tick(&self) {
        let due: Vec<Task> = self.timeouts.borrow_mut().drain(..).collect();
        for task in due {
            task();
        }
    }

    /// Moves the container so its top edge sits at `top` and fires `scroll`.
    pub fn scroll_to(&self, top: f64) {
        let bounds = self.bounds.get();
        self.bounds
            .set(Rect::new(bounds.x0, top, bounds.x1, top + bounds.height()));
        self.fire(ViewportEvent::Scroll);
    }

    /// Replaces the viewport and fires `resize`.
    pub fn resize(&self, viewport: ViewportMetrics) {
        self.viewport.set(viewport);
        self.fire(ViewportEvent::Resize);
    }

    /// Takes the CSS transforms written since the last call.
    pub fn take_css(&self) -> Vec<String> {
        std::mem::take(&mut *self.css.borrow_mut())
    }

    fn fire(&self, event: ViewportEvent) {
        let callbacks: Vec<EventCallback> = self
            .listeners
            .borrow()
            .values()
            .filter(|(kind, _)| *kind == event)
            .map(|(_, callback)| callback.clone())
            .collect();
        for callback in callbacks {
            callback();
        }
    }
}

impl fmt::Debug for HeadlessHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeadlessHost")
            .field("viewport", &self.viewport.get())
            .field("bounds", &self.bounds.get())
            .field("attached", &self.attached.get())
            .finish_non_exhaustive()
    }
}

impl LayoutProbe for HeadlessHost {
    fn viewport(&self) -> ViewportMetrics {
        self.viewport.get()
    }

    fn container_bounds(&self) -> Rect {
        self.bounds.get()
    }
}

impl AttachmentProbe for HeadlessHost {
    fn is_attached(&self) -> bool {
        self.attached.get()
    }
}

impl Timer for HeadlessHost {
    fn set_timeout(&self, delay: Duration, task: Task) {
        log::trace!("timeout scheduled in {delay:?}");
        self.timeouts.borrow_mut().push(task);
    }
}

impl Fetcher for HeadlessHost {
    fn fetch(&self, url: &str, done: Completion<String>) {
        let body = self.files.borrow().get(url).cloned();
        done(body.ok_or_else(|| format!("no file at {url}")));
    }
}

impl ImageLoader for HeadlessHost {
    fn load(&self, url: &str, done: Completion<()>) {
        log::info!("pretending to load {url}");
        done(Ok(()));
    }
}

impl ViewportEvents for HeadlessHost {
    fn listen(&self, event: ViewportEvent, callback: EventCallback) -> ListenerId {
        let id = self.next_listener.get();
        self.next_listener.set(id + 1);
        self.listeners.borrow_mut().insert(id, (event, callback));
        ListenerId(id)
    }

    fn unlisten(&self, id: ListenerId) {
        self.listeners.borrow_mut().remove(&id.0);
    }
}

/// Writes transforms into the host's CSS log.
struct CssTarget(Rc<HeadlessHost>);

impl TransformTarget for CssTarget {
    fn set_transform(&mut self, transform: &PanTransform) {
        self.0.css.borrow_mut().push(transform.to_css());
    }
}
