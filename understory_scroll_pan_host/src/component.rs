// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

use understory_scroll_pan::{
    DriverPhase, LayoutProbe, PanConfig, PanFactors, PanTransform, Readiness, TransformTarget,
    Trigger, UpdateDriver,
};

use crate::attach::{ATTACHMENT_POLL_INTERVAL, AttachmentWatcher};
use crate::binding::{Binding, Registration};
use crate::document::PanDocument;
use crate::error::LoadError;
use crate::host::{AttachmentProbe, Fetcher, ImageLoader, Timer};
use crate::source::{ConfigSource, MountProps};

/// Host capabilities a [`PanZoom`] is mounted against.
#[derive(Clone)]
pub struct HostContext {
    /// Viewport and container measurements.
    pub layout: Rc<dyn LayoutProbe>,
    /// The image element's transform.
    pub target: Rc<RefCell<dyn TransformTarget>>,
    /// Container attachment check.
    pub attachment: Rc<dyn AttachmentProbe>,
    /// Timers for attachment polling.
    pub timer: Rc<dyn Timer>,
    /// Configuration fetch.
    pub fetcher: Rc<dyn Fetcher>,
    /// Image loading.
    pub images: Rc<dyn ImageLoader>,
    /// Trigger front-end.
    pub binding: Binding,
}

impl fmt::Debug for HostContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HostContext")
            .field("binding", &self.binding)
            .finish_non_exhaustive()
    }
}

/// Coarse lifecycle of a [`PanZoom`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MountStatus {
    /// Waiting for attachment and/or loading.
    Pending,
    /// Handling triggers.
    Active,
    /// Loading failed; the component stays inert.
    Failed,
    /// Disposed.
    Disposed,
}

/// A mounted pan sequence.
///
/// Mounting starts two independent waits: attachment polling and the
/// configuration + image load. When both finish, the host [`Binding`] runs
/// the first size-affecting update and subscribes. Load failures are logged
/// and leave the component inert. Disposing (or dropping) unsubscribes
/// everything; no trigger reaches the driver afterwards.
pub struct PanZoom {
    mount: Rc<Mount>,
}

struct Mount {
    this: Weak<Self>,
    props: MountProps,
    host: HostContext,
    driver: RefCell<UpdateDriver>,
    watcher: RefCell<Option<AttachmentWatcher>>,
    registration: RefCell<Option<Registration>>,
    image_url: RefCell<Option<String>>,
    failed: Cell<bool>,
    disposed: Cell<bool>,
    dispatching: Cell<bool>,
    deferred: RefCell<VecDeque<Trigger>>,
}

impl PanZoom {
    /// Mounts a pan sequence described by `props`.
    pub fn mount(props: MountProps, host: HostContext) -> Self {
        log::debug!("mounting pan sequence {}", props.data_url);
        let mount = Rc::new_cyclic(|this| Mount {
            this: this.clone(),
            driver: RefCell::new(UpdateDriver::new(props.placement)),
            props,
            host,
            watcher: RefCell::new(None),
            registration: RefCell::new(None),
            image_url: RefCell::new(None),
            failed: Cell::new(false),
            disposed: Cell::new(false),
            dispatching: Cell::new(false),
            deferred: RefCell::new(VecDeque::new()),
        });

        let weak = Rc::downgrade(&mount);
        mount.host.fetcher.fetch(
            &mount.props.data_url,
            Box::new(move |result| {
                if let Some(mount) = weak.upgrade() {
                    mount.on_fetched(result);
                }
            }),
        );

        let weak = Rc::downgrade(&mount);
        let watcher = AttachmentWatcher::start(
            Rc::clone(&mount.host.attachment),
            Rc::clone(&mount.host.timer),
            ATTACHMENT_POLL_INTERVAL,
            move || {
                if let Some(mount) = weak.upgrade() {
                    mount.on_attached();
                }
            },
        );
        *mount.watcher.borrow_mut() = Some(watcher);

        Self { mount }
    }

    /// Resolves `source` against the current viewport and mounts it.
    ///
    /// Returns `None` when the source does not describe a sequence.
    pub fn from_source(source: &dyn ConfigSource, host: HostContext) -> Option<Self> {
        let viewport = host.layout.viewport();
        match source.resolve(&viewport) {
            Some(props) => Some(Self::mount(props, host)),
            None => {
                log::warn!("configuration source resolved to nothing; not mounting");
                None
            }
        }
    }

    /// Props this sequence was mounted with.
    #[must_use]
    pub fn props(&self) -> &MountProps {
        &self.mount.props
    }

    /// Current lifecycle status.
    #[must_use]
    pub fn status(&self) -> MountStatus {
        if self.mount.disposed.get() {
            return MountStatus::Disposed;
        }
        if self.mount.failed.get() {
            return MountStatus::Failed;
        }
        match self.mount.driver.borrow().phase() {
            DriverPhase::Pending => MountStatus::Pending,
            DriverPhase::Active => MountStatus::Active,
            DriverPhase::Disposed => MountStatus::Disposed,
        }
    }

    /// Resolved image URL, once the configuration has loaded.
    #[must_use]
    pub fn image_url(&self) -> Option<String> {
        self.mount.image_url.borrow().clone()
    }

    /// Cached factors from the latest recompute.
    #[must_use]
    pub fn factors(&self) -> Option<PanFactors> {
        self.mount.driver.borrow().factors().copied()
    }

    /// Transform most recently applied to the image.
    #[must_use]
    pub fn last_transform(&self) -> Option<PanTransform> {
        self.mount.driver.borrow().last_transform()
    }

    /// Unsubscribes from all triggers and stops attachment polling.
    ///
    /// Idempotent; also runs on drop.
    pub fn dispose(&self) {
        self.mount.dispose();
    }
}

impl Drop for PanZoom {
    fn drop(&mut self) {
        self.mount.dispose();
    }
}

impl fmt::Debug for PanZoom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PanZoom")
            .field("props", &self.mount.props)
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

impl Mount {
    fn on_fetched(&self, result: Result<String, String>) {
        if self.disposed.get() {
            return;
        }
        let data_url = &self.props.data_url;
        let document = result
            .map_err(|reason| LoadError::Fetch {
                url: data_url.clone(),
                reason,
            })
            .and_then(|text| PanDocument::from_json(&text));
        let document = match document {
            Ok(document) => document,
            Err(err) => return self.fail(&err),
        };

        let image_url = document.resolved_image_url(data_url);
        log::debug!("configuration {data_url} loaded, loading image {image_url}");
        *self.image_url.borrow_mut() = Some(image_url.clone());

        let config = document.pan_config();
        let weak = self.this.clone();
        let url = image_url.clone();
        self.host.images.load(
            &image_url,
            Box::new(move |result| {
                if let Some(mount) = weak.upgrade() {
                    mount.on_image(result, url, config);
                }
            }),
        );
    }

    fn on_image(&self, result: Result<(), String>, url: String, config: PanConfig) {
        if self.disposed.get() {
            return;
        }
        if let Err(reason) = result {
            return self.fail(&LoadError::Image { url, reason });
        }
        log::debug!("image {url} ready");
        let readiness = self.driver.borrow_mut().mark_loaded(config);
        if readiness == Readiness::Ready {
            self.activate();
        }
    }

    fn on_attached(&self) {
        let readiness = self.driver.borrow_mut().mark_attached();
        if readiness == Readiness::Ready {
            self.activate();
        }
    }

    fn activate(&self) {
        if self.disposed.get() || !self.driver.borrow_mut().start() {
            return;
        }
        log::debug!("pan sequence {} active", self.props.data_url);

        let weak = self.this.clone();
        let registration = self.host.binding.start(Rc::new(move |trigger: Trigger| {
            if let Some(mount) = weak.upgrade() {
                mount.dispatch(trigger);
            }
        }));

        if self.disposed.get() {
            // Disposed from inside the first update.
            self.host.binding.stop(registration);
        } else {
            *self.registration.borrow_mut() = Some(registration);
        }
    }

    /// Runs `trigger` and anything that arrived while it ran, in order.
    fn dispatch(&self, trigger: Trigger) {
        if self.dispatching.get() {
            self.deferred.borrow_mut().push_back(trigger);
            return;
        }
        self.dispatching.set(true);

        let mut next = Some(trigger);
        while let Some(trigger) = next {
            if self.disposed.get() {
                break;
            }
            let outcome = {
                let mut target = self.host.target.borrow_mut();
                self.driver
                    .borrow_mut()
                    .handle(trigger, &*self.host.layout, &mut *target)
            };
            log::trace!("{trigger:?}: {outcome:?}");
            next = self.deferred.borrow_mut().pop_front();
        }

        if self.disposed.get() {
            self.driver.borrow_mut().dispose();
        }
        self.deferred.borrow_mut().clear();
        self.dispatching.set(false);
    }

    fn fail(&self, err: &LoadError) {
        log::error!("pan sequence {} stays inert: {err}", self.props.data_url);
        self.failed.set(true);
    }

    fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        // While a trigger is running the driver is borrowed; the dispatch
        // loop disposes it once that trigger finishes.
        if let Ok(mut driver) = self.driver.try_borrow_mut() {
            driver.dispose();
        }
        if let Some(watcher) = self.watcher.borrow_mut().take() {
            watcher.cancel();
        }
        if let Some(registration) = self.registration.borrow_mut().take() {
            self.host.binding.stop(registration);
        }
        log::debug!("pan sequence {} disposed", self.props.data_url);
    }
}
