// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The fetcher registry.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use arbor_engine::{FetcherKey, FetcherState, RouteId, RouterEngine};
use arbor_projector::{ConfigurationError, Projector, Subscription};
use arbor_submit::{SubmitOptions, SubmitTarget, translate};
use hashbrown::HashSet;
use tracing::{debug, warn};
use url::Url;

use crate::error::FetcherError;

static NEXT_FETCHER_KEY: AtomicU64 = AtomicU64::new(1);

/// A process-wide unique fetcher key.
#[must_use]
pub fn next_fetcher_key() -> FetcherKey {
    FetcherKey::new(NEXT_FETCHER_KEY.fetch_add(1, Ordering::Relaxed).to_string())
}

type LiveKeys = Rc<RefCell<HashSet<FetcherKey>>>;

/// Creates fetchers and keeps track of the ones not yet disposed.
#[derive(Clone)]
pub struct FetcherRegistry {
    projector: Projector,
    origin: Rc<Url>,
    live: LiveKeys,
}

impl FetcherRegistry {
    /// Creates a registry submitting through `projector`'s engine and
    /// resolving actions against `origin`.
    #[must_use]
    pub fn new(projector: Projector, origin: Url) -> Self {
        Self {
            projector,
            origin: Rc::new(origin),
            live: Rc::default(),
        }
    }

    /// Creates a fetcher owned by route `owner`.
    ///
    /// Submissions without an explicit action go to `default_action`.
    #[must_use]
    pub fn create(&self, owner: RouteId, default_action: impl Into<String>) -> Fetcher {
        let key = next_fetcher_key();
        self.live.borrow_mut().insert(key.clone());
        debug!(key = %key, route = %owner, "fetcher created");
        Fetcher {
            key,
            owner,
            default_action: default_action.into(),
            projector: self.projector.clone(),
            origin: Rc::clone(&self.origin),
            live: Rc::downgrade(&self.live),
            disposed: Cell::new(false),
        }
    }

    /// Keys of fetchers that have not been disposed.
    #[must_use]
    pub fn live_keys(&self) -> Vec<FetcherKey> {
        let mut keys: Vec<_> = self.live.borrow().iter().cloned().collect();
        keys.sort_unstable();
        keys
    }

    /// Number of fetchers that have not been disposed.
    #[must_use]
    pub fn len(&self) -> usize {
        self.live.borrow().len()
    }

    /// Whether every fetcher has been disposed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.live.borrow().is_empty()
    }
}

impl fmt::Debug for FetcherRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FetcherRegistry")
            .field("origin", &self.origin.as_str())
            .field("live", &self.live.borrow().len())
            .finish_non_exhaustive()
    }
}

/// A handle for one independent submission/load slot.
///
/// The handle owns its key until [`Fetcher::dispose`] is called, which
/// removes the engine-side entry. Owners must call `dispose` when they are
/// torn down; nothing collects fetchers behind their back.
///
/// Dropping a handle that was never disposed is a bug in the owner. The drop
/// path only exists as a safety net: it logs a warning and then disposes, so
/// the engine slot is not leaked.
pub struct Fetcher {
    key: FetcherKey,
    owner: RouteId,
    default_action: String,
    projector: Projector,
    origin: Rc<Url>,
    live: Weak<RefCell<HashSet<FetcherKey>>>,
    disposed: Cell<bool>,
}

impl Fetcher {
    /// The fetcher's key.
    #[must_use]
    pub fn key(&self) -> &FetcherKey {
        &self.key
    }

    /// The route that owns the fetcher.
    #[must_use]
    pub fn route_id(&self) -> &RouteId {
        &self.owner
    }

    /// Whether [`Fetcher::dispose`] has run.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    /// State of this fetcher as of the latest snapshot; idle until the engine
    /// knows the key.
    pub fn state(&self) -> Result<FetcherState, ConfigurationError> {
        Ok(self.projector.snapshot()?.fetcher(&self.key))
    }

    /// Calls `on_change` with this fetcher's state on every snapshot.
    #[must_use]
    pub fn watch(&self, mut on_change: impl FnMut(&FetcherState) + 'static) -> Subscription {
        let key = self.key.clone();
        self.projector
            .subscribe(move |snapshot| on_change(&snapshot.fetcher(&key)))
    }

    /// Encodes `target` and starts a submission.
    ///
    /// Fire-and-forget: progress shows up in later snapshots.
    pub fn submit(
        &self,
        target: &SubmitTarget,
        options: &SubmitOptions,
    ) -> Result<(), FetcherError> {
        let engine = self.engine()?;
        let submission = translate(target, &self.default_action, options, &self.origin)?;
        debug!(
            key = %self.key,
            method = %submission.method,
            href = %submission.href,
            "fetcher submit"
        );
        engine.fetch(
            &self.key,
            &self.owner,
            &submission.href,
            Some(submission.options()),
        );
        Ok(())
    }

    /// Starts a load of `href`.
    pub fn load(&self, href: &str) -> Result<(), FetcherError> {
        let engine = self.engine()?;
        debug!(key = %self.key, href, "fetcher load");
        engine.fetch(&self.key, &self.owner, href, None);
        Ok(())
    }

    /// Removes the engine-side entry for this key. Calling it again does
    /// nothing.
    pub fn dispose(&self) {
        if self.disposed.replace(true) {
            return;
        }
        if let Some(live) = self.live.upgrade() {
            live.borrow_mut().remove(&self.key);
        }
        if self.projector.is_attached() {
            self.projector.engine().delete_fetcher(&self.key);
        }
        debug!(key = %self.key, "fetcher disposed");
    }

    fn engine(&self) -> Result<Rc<dyn RouterEngine>, FetcherError> {
        if self.disposed.get() {
            return Err(FetcherError::Disposed {
                key: self.key.clone(),
            });
        }
        if !self.projector.is_attached() {
            return Err(ConfigurationError::Disposed.into());
        }
        Ok(Rc::clone(self.projector.engine()))
    }
}

impl Drop for Fetcher {
    fn drop(&mut self) {
        if !self.disposed.get() {
            warn!(key = %self.key, "fetcher dropped without dispose");
            self.dispose();
        }
    }
}

impl fmt::Debug for Fetcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fetcher")
            .field("key", &self.key)
            .field("route_id", &self.owner)
            .field("disposed", &self.disposed.get())
            .finish_non_exhaustive()
    }
}
