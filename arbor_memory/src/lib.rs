// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor Memory: a scripted, in-memory [`RouterEngine`].
//!
//! The engine does no matching and runs no loaders. Tests publish the
//! snapshots they want the adapters to see and inspect the commands the
//! adapters issued:
//!
//! ```rust
//! use arbor_engine::{Location, NavigateOptions, NavigateTo, RouterEngine, RouterSnapshot};
//! use arbor_memory::MemoryEngine;
//!
//! let engine = MemoryEngine::new(RouterSnapshot::builder(Location::new("/", "k0")).build());
//! engine.navigate(NavigateTo::from("/next"), NavigateOptions::default());
//! assert_eq!(engine.navigations()[0].0, NavigateTo::from("/next"));
//!
//! engine.publish(RouterSnapshot::builder(Location::new("/next", "k1")).build());
//! assert_eq!(engine.state().location.pathname, "/next");
//! ```
//!
//! Fetcher calls are the one place the engine moves on its own: [`RouterEngine::fetch`]
//! publishes the fetcher as loading or submitting, and
//! [`MemoryEngine::complete_fetcher`] settles it.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

use arbor_engine::{
    FetcherKey, FetcherState, FetcherStatus, Listener, Location, NavigateOptions, NavigateTo,
    RouteId, RouterEngine, RouterSnapshot, SubmissionOptions, Unsubscribe, create_path,
};
use serde_json::Value;
use tracing::trace;

type Slot = Rc<RefCell<Listener>>;

/// One recorded [`RouterEngine::fetch`] call.
#[derive(Clone, Debug, PartialEq)]
pub struct FetchCall {
    /// Fetcher key.
    pub key: FetcherKey,
    /// Route that owns the fetcher.
    pub route_id: RouteId,
    /// Target href.
    pub href: String,
    /// Submission, absent for loads.
    pub submission: Option<SubmissionOptions>,
}

/// A routing engine whose state is whatever the test last published.
pub struct MemoryEngine {
    state: RefCell<Rc<RouterSnapshot>>,
    listeners: Rc<RefCell<Vec<(u64, Slot)>>>,
    next_listener: Cell<u64>,
    navigations: RefCell<Vec<(NavigateTo, NavigateOptions)>>,
    fetches: RefCell<Vec<FetchCall>>,
    deleted_fetchers: RefCell<Vec<FetcherKey>>,
    disposals: Cell<usize>,
    queue: RefCell<VecDeque<Rc<RouterSnapshot>>>,
    publishing: Cell<bool>,
}

impl MemoryEngine {
    /// Creates an engine publishing `initial`.
    pub fn new(initial: RouterSnapshot) -> Rc<Self> {
        Rc::new(Self {
            state: RefCell::new(Rc::new(initial)),
            listeners: Rc::new(RefCell::new(Vec::new())),
            next_listener: Cell::new(0),
            navigations: RefCell::new(Vec::new()),
            fetches: RefCell::new(Vec::new()),
            deleted_fetchers: RefCell::new(Vec::new()),
            disposals: Cell::new(0),
            queue: RefCell::new(VecDeque::new()),
            publishing: Cell::new(false),
        })
    }

    /// Replaces the state and notifies every subscriber.
    ///
    /// A publish from inside a listener is delivered after the current
    /// notification round completes.
    pub fn publish(&self, snapshot: RouterSnapshot) -> Rc<RouterSnapshot> {
        let snapshot = Rc::new(snapshot);
        *self.state.borrow_mut() = Rc::clone(&snapshot);
        trace!(location = %snapshot.location.key, "memory engine publish");
        self.queue.borrow_mut().push_back(Rc::clone(&snapshot));
        if self.publishing.replace(true) {
            return snapshot;
        }
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(next) = next else { break };
            let slots: Vec<Slot> = self
                .listeners
                .borrow()
                .iter()
                .map(|(_, slot)| Rc::clone(slot))
                .collect();
            for slot in slots {
                if let Ok(mut listener) = slot.try_borrow_mut() {
                    (*listener)(&next);
                }
            }
        }
        self.publishing.set(false);
        snapshot
    }

    /// Publishes a copy of the current state after `edit` has changed it.
    pub fn update(&self, edit: impl FnOnce(&mut RouterSnapshot)) -> Rc<RouterSnapshot> {
        let mut next = RouterSnapshot::clone(&self.state.borrow());
        edit(&mut next);
        self.publish(next)
    }

    /// Settles fetcher `key` as idle with `data`.
    pub fn complete_fetcher(&self, key: &FetcherKey, data: Value) -> Rc<RouterSnapshot> {
        let key = key.clone();
        self.update(move |snapshot| {
            let mut state = FetcherState::idle(key.clone());
            state.data = Some(data);
            snapshot.fetchers.insert(key, state);
        })
    }

    /// Navigations requested so far, oldest first.
    #[must_use]
    pub fn navigations(&self) -> Vec<(NavigateTo, NavigateOptions)> {
        self.navigations.borrow().clone()
    }

    /// Fetches requested so far, oldest first.
    #[must_use]
    pub fn fetches(&self) -> Vec<FetchCall> {
        self.fetches.borrow().clone()
    }

    /// Keys passed to [`RouterEngine::delete_fetcher`], oldest first.
    #[must_use]
    pub fn deleted_fetchers(&self) -> Vec<FetcherKey> {
        self.deleted_fetchers.borrow().clone()
    }

    /// Number of live subscriptions.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len()
    }

    /// Number of times [`RouterEngine::dispose`] was called.
    #[must_use]
    pub fn disposals(&self) -> usize {
        self.disposals.get()
    }
}

impl RouterEngine for MemoryEngine {
    fn state(&self) -> Rc<RouterSnapshot> {
        Rc::clone(&self.state.borrow())
    }

    fn subscribe(&self, listener: Listener) -> Unsubscribe {
        let id = self.next_listener.get();
        self.next_listener.set(id + 1);
        self.listeners
            .borrow_mut()
            .push((id, Rc::new(RefCell::new(listener))));
        let listeners = Rc::downgrade(&self.listeners);
        Unsubscribe::new(move || {
            if let Some(listeners) = listeners.upgrade() {
                listeners.borrow_mut().retain(|(slot, _)| *slot != id);
            }
        })
    }

    fn navigate(&self, to: NavigateTo, options: NavigateOptions) {
        trace!(?to, "memory engine navigate");
        self.navigations.borrow_mut().push((to, options));
    }

    fn fetch(
        &self,
        key: &FetcherKey,
        route_id: &RouteId,
        href: &str,
        submission: Option<SubmissionOptions>,
    ) {
        self.fetches.borrow_mut().push(FetchCall {
            key: key.clone(),
            route_id: route_id.clone(),
            href: href.to_owned(),
            submission: submission.clone(),
        });
        let key = key.clone();
        let href = href.to_owned();
        self.update(move |snapshot| {
            let mut state = snapshot.fetcher(&key);
            match submission {
                Some(submission) => {
                    state.state = FetcherStatus::Submitting;
                    state.form_method = Some(submission.form_method);
                    state.form_action = Some(href);
                    state.form_enc_type = Some(submission.form_enc_type);
                    state.form_data = submission.form_data;
                }
                None => {
                    state.state = FetcherStatus::Loading;
                    state.form_method = None;
                    state.form_action = None;
                    state.form_enc_type = None;
                    state.form_data = None;
                }
            }
            snapshot.fetchers.insert(key, state);
        });
    }

    fn get_fetcher(&self, key: &FetcherKey) -> FetcherState {
        self.state.borrow().fetcher(key)
    }

    fn delete_fetcher(&self, key: &FetcherKey) {
        self.deleted_fetchers.borrow_mut().push(key.clone());
        let mut next = RouterSnapshot::clone(&self.state.borrow());
        if next.fetchers.remove(key).is_some() {
            *self.state.borrow_mut() = Rc::new(next);
        }
    }

    fn create_href(&self, location: &Location) -> String {
        create_path(&location.pathname, &location.search, &location.hash)
    }

    fn dispose(&self) {
        self.disposals.set(self.disposals.get() + 1);
        self.listeners.borrow_mut().clear();
    }
}

impl fmt::Debug for MemoryEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryEngine")
            .field("location", &self.state.borrow().location)
            .field("listeners", &self.listeners.borrow().len())
            .finish_non_exhaustive()
    }
}
