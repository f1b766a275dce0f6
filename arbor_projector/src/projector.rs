// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The state projector: one engine subscription, many tear-free readers.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

use arbor_engine::{RouterEngine, RouterSnapshot, Unsubscribe};
use tracing::debug;

use crate::error::ConfigurationError;

type Callback = Rc<RefCell<dyn FnMut(&Rc<RouterSnapshot>)>>;

/// Mirrors the engine's snapshot for a rendering runtime.
///
/// The projector holds exactly one engine subscription for its lifetime. Each
/// engine state change produces exactly one notification to every listener,
/// in emission order, and [`Projector::snapshot`] always returns the snapshot
/// of the notification currently being delivered (or most recently
/// delivered). Snapshots published while a notification is in progress are
/// queued rather than delivered re-entrantly, so no listener ever observes a
/// newer snapshot than the one it is being notified about.
///
/// Cloning a projector clones the handle; all clones share one subscription.
#[derive(Clone)]
pub struct Projector {
    inner: Rc<Inner>,
}

struct Inner {
    engine: Rc<dyn RouterEngine>,
    current: RefCell<Rc<RouterSnapshot>>,
    generation: Cell<u64>,
    listeners: RefCell<Vec<(u64, Callback)>>,
    next_listener: Cell<u64>,
    upstream: RefCell<Option<Unsubscribe>>,
    attached: Cell<bool>,
    queue: RefCell<VecDeque<Rc<RouterSnapshot>>>,
    delivering: Cell<bool>,
}

impl Projector {
    /// Subscribes to `engine` and seeds the projection with its current state.
    pub fn attach(engine: Rc<dyn RouterEngine>) -> Self {
        let inner = Rc::new(Inner {
            current: RefCell::new(engine.state()),
            engine,
            generation: Cell::new(0),
            listeners: RefCell::new(Vec::new()),
            next_listener: Cell::new(0),
            upstream: RefCell::new(None),
            attached: Cell::new(true),
            queue: RefCell::new(VecDeque::new()),
            delivering: Cell::new(false),
        });
        let weak = Rc::downgrade(&inner);
        let upstream = inner.engine.subscribe(Box::new(move |snapshot| {
            if let Some(inner) = weak.upgrade() {
                inner.publish(Rc::clone(snapshot));
            }
        }));
        *inner.upstream.borrow_mut() = Some(upstream);
        debug!(location = %inner.current.borrow().location.key, "projector attached");
        Self { inner }
    }

    /// The snapshot as of the most recent notification.
    ///
    /// Fails with [`ConfigurationError::Disposed`] once the projector has been
    /// detached.
    pub fn snapshot(&self) -> Result<Rc<RouterSnapshot>, ConfigurationError> {
        if !self.inner.attached.get() {
            return Err(ConfigurationError::Disposed);
        }
        Ok(Rc::clone(&self.inner.current.borrow()))
    }

    /// Number of notifications delivered so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.inner.generation.get()
    }

    /// The engine this projector mirrors.
    #[must_use]
    pub fn engine(&self) -> &Rc<dyn RouterEngine> {
        &self.inner.engine
    }

    /// Whether the projector still holds its engine subscription.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.inner.attached.get()
    }

    /// Registers `on_change` for every subsequent notification.
    ///
    /// The listener stays registered until the returned [`Subscription`] is
    /// dropped or released.
    pub fn subscribe(&self, on_change: impl FnMut(&Rc<RouterSnapshot>) + 'static) -> Subscription {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        let callback: Callback = Rc::new(RefCell::new(on_change));
        self.inner.listeners.borrow_mut().push((id, callback));
        Subscription {
            inner: Rc::downgrade(&self.inner),
            id: Some(id),
        }
    }

    /// Number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.inner.listeners.borrow().len()
    }

    /// Releases the engine subscription and drops all listeners.
    ///
    /// Idempotent. After detaching, [`Projector::snapshot`] reports
    /// [`ConfigurationError::Disposed`].
    pub fn detach(&self) {
        if !self.inner.attached.replace(false) {
            return;
        }
        let upstream = self.inner.upstream.borrow_mut().take();
        drop(upstream);
        self.inner.listeners.borrow_mut().clear();
        self.inner.queue.borrow_mut().clear();
        debug!(
            generation = self.inner.generation.get(),
            "projector detached"
        );
    }
}

impl Inner {
    fn publish(&self, snapshot: Rc<RouterSnapshot>) {
        if !self.attached.get() {
            return;
        }
        self.queue.borrow_mut().push_back(snapshot);
        if self.delivering.replace(true) {
            // The outer delivery loop picks it up in order.
            return;
        }
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(snapshot) = next else { break };
            if !self.attached.get() {
                break;
            }
            self.deliver(snapshot);
        }
        self.delivering.set(false);
    }

    fn deliver(&self, snapshot: Rc<RouterSnapshot>) {
        *self.current.borrow_mut() = Rc::clone(&snapshot);
        let generation = self.generation.get() + 1;
        self.generation.set(generation);
        debug!(generation, location = %snapshot.location.key, "snapshot published");

        let listeners: Vec<Callback> = self
            .listeners
            .borrow()
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();
        for callback in listeners {
            if let Ok(mut callback) = callback.try_borrow_mut() {
                (*callback)(&snapshot);
            }
        }
    }
}

impl fmt::Debug for Projector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Projector")
            .field("generation", &self.inner.generation.get())
            .field("attached", &self.inner.attached.get())
            .field("listeners", &self.inner.listeners.borrow().len())
            .finish_non_exhaustive()
    }
}

/// Keeps a projector listener registered; dropping it unsubscribes.
#[derive(Debug)]
pub struct Subscription {
    inner: Weak<Inner>,
    id: Option<u64>,
}

impl Subscription {
    /// Unsubscribes now.
    pub fn release(mut self) {
        self.unregister();
    }

    fn unregister(&mut self) {
        let Some(id) = self.id.take() else { return };
        if let Some(inner) = self.inner.upgrade() {
            inner.listeners.borrow_mut().retain(|(slot, _)| *slot != id);
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.unregister();
    }
}
