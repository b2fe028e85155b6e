// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-threaded fake host shared by the integration tests.

#![allow(dead_code, reason = "Not every test uses every helper")]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::rc::Rc;
use std::time::Duration;

use kurbo::Rect;
use understory_scroll_pan::{
    FrameNotice, LayoutProbe, PanTransform, TransformTarget, ViewportMetrics,
};
use understory_scroll_pan_host::host::{Completion, EventCallback, FrameCallback, Task};
use understory_scroll_pan_host::{
    AttachmentProbe, Binding, Fetcher, HostContext, ImageLoader, ListenerId, Scheduler,
    SubscriptionId, Timer, ViewportEvent, ViewportEvents,
};

pub const DATA_URL: &str = "https://cdn.example.com/harbour/config.json";
pub const IMAGE_URL: &str = "https://cdn.example.com/harbour/harbour.jpg";

pub const HARBOUR_JSON: &str = r#"{
    "imageURL": "harbour.jpg",
    "beginAt": { "x": 0, "y": 0 },
    "endAt": { "x": 100, "y": 50 },
    "naturalViewport": { "width": 800, "height": 600 }
}"#;

/// Viewport, container box and attachment state.
pub struct FakePage {
    pub viewport: Cell<ViewportMetrics>,
    pub bounds: Cell<Rect>,
    pub attached: Cell<bool>,
}

impl FakePage {
    pub fn new() -> Self {
        Self {
            viewport: Cell::new(ViewportMetrics::new(1000.0, 800.0)),
            bounds: Cell::new(Rect::new(0.0, 0.0, 1000.0, 2000.0)),
            attached: Cell::new(false),
        }
    }

    pub fn scroll_to(&self, top: f64) {
        let bounds = self.bounds.get();
        self.bounds
            .set(Rect::new(bounds.x0, top, bounds.x1, top + bounds.height()));
    }

    pub fn set_container_height(&self, height: f64) {
        let bounds = self.bounds.get();
        self.bounds
            .set(Rect::new(bounds.x0, bounds.y0, bounds.x1, bounds.y0 + height));
    }
}

impl LayoutProbe for FakePage {
    fn viewport(&self) -> ViewportMetrics {
        self.viewport.get()
    }

    fn container_bounds(&self) -> Rect {
        self.bounds.get()
    }
}

impl AttachmentProbe for FakePage {
    fn is_attached(&self) -> bool {
        self.attached.get()
    }
}

/// Records every transform written to the image.
#[derive(Default)]
pub struct Recorder {
    pub applied: Vec<PanTransform>,
}

impl TransformTarget for Recorder {
    fn set_transform(&mut self, transform: &PanTransform) {
        self.applied.push(*transform);
    }
}

/// Frame scheduler driven by [`FakeScheduler::run_frame`].
#[derive(Default)]
pub struct FakeScheduler {
    queue: RefCell<VecDeque<Task>>,
    subscribers: RefCell<BTreeMap<u64, FrameCallback>>,
    next_id: Cell<u64>,
}

impl FakeScheduler {
    /// Runs queued tasks, then notifies every subscriber.
    pub fn run_frame(&self, has_changed: bool) {
        let queued: Vec<Task> = self.queue.borrow_mut().drain(..).collect();
        for task in queued {
            task();
        }
        let subscribers: Vec<FrameCallback> = self.subscribers.borrow().values().cloned().collect();
        for callback in subscribers {
            callback(FrameNotice { has_changed });
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.borrow().len()
    }

    pub fn queued(&self) -> usize {
        self.queue.borrow().len()
    }
}

impl Scheduler for FakeScheduler {
    fn enqueue(&self, task: Task) {
        self.queue.borrow_mut().push_back(task);
    }

    fn subscribe(&self, callback: FrameCallback) -> SubscriptionId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.subscribers.borrow_mut().insert(id, callback);
        SubscriptionId(id)
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.subscribers.borrow_mut().remove(&id.0);
    }
}

/// Viewport events fired by hand.
#[derive(Default)]
pub struct FakeEvents {
    listeners: RefCell<BTreeMap<u64, (ViewportEvent, EventCallback)>>,
    next_id: Cell<u64>,
}

impl FakeEvents {
    pub fn fire(&self, event: ViewportEvent) {
        let callbacks: Vec<EventCallback> = self
            .listeners
            .borrow()
            .values()
            .filter(|(kind, _)| *kind == event)
            .map(|(_, callback)| Rc::clone(callback))
            .collect();
        for callback in callbacks {
            callback();
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }
}

impl ViewportEvents for FakeEvents {
    fn listen(&self, event: ViewportEvent, callback: EventCallback) -> ListenerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.listeners.borrow_mut().insert(id, (event, callback));
        ListenerId(id)
    }

    fn unlisten(&self, id: ListenerId) {
        self.listeners.borrow_mut().remove(&id.0);
    }
}

/// Timer whose pending tasks run on [`FakeTimer::advance`].
#[derive(Default)]
pub struct FakeTimer {
    pending: RefCell<Vec<(Duration, Task)>>,
}

impl FakeTimer {
    /// Fires every pending timeout once; returns how many fired.
    pub fn advance(&self) -> usize {
        let due: Vec<(Duration, Task)> = self.pending.borrow_mut().drain(..).collect();
        let fired = due.len();
        for (_, task) in due {
            task();
        }
        fired
    }

    pub fn pending_delays(&self) -> Vec<Duration> {
        self.pending.borrow().iter().map(|(delay, _)| *delay).collect()
    }
}

impl Timer for FakeTimer {
    fn set_timeout(&self, delay: Duration, task: Task) {
        self.pending.borrow_mut().push((delay, task));
    }
}

/// Fetches and image loads that complete when the test says so.
#[derive(Default)]
pub struct FakeNetwork {
    pub documents: RefCell<HashMap<String, String>>,
    pub broken_images: RefCell<Vec<String>>,
    fetches: RefCell<Vec<(String, Completion<String>)>>,
    loads: RefCell<Vec<(String, Completion<()>)>>,
    pub requested_images: RefCell<Vec<String>>,
}

impl FakeNetwork {
    pub fn serve(&self, url: &str, body: &str) {
        self.documents
            .borrow_mut()
            .insert(url.to_owned(), body.to_owned());
    }

    /// Completes pending fetches; unknown URLs fail with "404".
    pub fn complete_fetches(&self) {
        let pending: Vec<_> = self.fetches.borrow_mut().drain(..).collect();
        for (url, done) in pending {
            let body = self.documents.borrow().get(&url).cloned();
            done(body.ok_or_else(|| "404".to_owned()));
        }
    }

    /// Completes pending image loads.
    pub fn complete_images(&self) {
        let pending: Vec<_> = self.loads.borrow_mut().drain(..).collect();
        for (url, done) in pending {
            let broken = self.broken_images.borrow().contains(&url);
            done(if broken { Err("decode error".to_owned()) } else { Ok(()) });
        }
    }

    pub fn complete_all(&self) {
        self.complete_fetches();
        self.complete_images();
    }
}

impl Fetcher for FakeNetwork {
    fn fetch(&self, url: &str, done: Completion<String>) {
        self.fetches.borrow_mut().push((url.to_owned(), done));
    }
}

impl ImageLoader for FakeNetwork {
    fn load(&self, url: &str, done: Completion<()>) {
        self.requested_images.borrow_mut().push(url.to_owned());
        self.loads.borrow_mut().push((url.to_owned(), done));
    }
}

/// All fakes wired together.
pub struct Harness {
    pub page: Rc<FakePage>,
    pub target: Rc<RefCell<Recorder>>,
    pub scheduler: Rc<FakeScheduler>,
    pub events: Rc<FakeEvents>,
    pub timer: Rc<FakeTimer>,
    pub network: Rc<FakeNetwork>,
}

impl Harness {
    pub fn new() -> Self {
        let network = Rc::new(FakeNetwork::default());
        network.serve(DATA_URL, HARBOUR_JSON);
        Self {
            page: Rc::new(FakePage::new()),
            target: Rc::new(RefCell::new(Recorder::default())),
            scheduler: Rc::new(FakeScheduler::default()),
            events: Rc::new(FakeEvents::default()),
            timer: Rc::new(FakeTimer::default()),
            network,
        }
    }

    pub fn context(&self, binding: Binding) -> HostContext {
        HostContext {
            layout: self.page.clone(),
            target: self.target.clone(),
            attachment: self.page.clone(),
            timer: self.timer.clone(),
            fetcher: self.network.clone(),
            images: self.network.clone(),
            binding,
        }
    }

    pub fn scheduler_context(&self) -> HostContext {
        self.context(Binding::Scheduler(self.scheduler.clone()))
    }

    pub fn events_context(&self) -> HostContext {
        self.context(Binding::Events(self.events.clone()))
    }

    pub fn applied(&self) -> Vec<PanTransform> {
        self.target.borrow().applied.clone()
    }
}
