// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The routing engine collaborator.

use std::fmt;
use std::rc::Rc;

use serde_json::Value;

use crate::fetcher::{FetcherKey, FetcherState};
use crate::location::Location;
use crate::route::RouteId;
use crate::snapshot::RouterSnapshot;
use crate::submission::SubmissionOptions;

/// Callback invoked with every published snapshot.
pub type Listener = Box<dyn FnMut(&Rc<RouterSnapshot>)>;

/// Releases a subscription when called or dropped.
pub struct Unsubscribe(Option<Box<dyn FnOnce()>>);

impl Unsubscribe {
    /// Wraps the release callback.
    pub fn new(release: impl FnOnce() + 'static) -> Self {
        Self(Some(Box::new(release)))
    }

    /// A handle that releases nothing.
    #[must_use]
    pub fn noop() -> Self {
        Self(None)
    }

    /// Releases the subscription now.
    pub fn release(mut self) {
        if let Some(release) = self.0.take() {
            release();
        }
    }
}

impl Drop for Unsubscribe {
    fn drop(&mut self) {
        if let Some(release) = self.0.take() {
            release();
        }
    }
}

impl fmt::Debug for Unsubscribe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Unsubscribe")
            .field(&self.0.is_some())
            .finish()
    }
}

/// Where a navigation goes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NavigateTo {
    /// An href.
    Path(String),
    /// A history delta (`-1` is back).
    Delta(isize),
}

impl From<&str> for NavigateTo {
    fn from(path: &str) -> Self {
        Self::Path(path.to_owned())
    }
}

impl From<String> for NavigateTo {
    fn from(path: String) -> Self {
        Self::Path(path)
    }
}

impl From<isize> for NavigateTo {
    fn from(delta: isize) -> Self {
        Self::Delta(delta)
    }
}

/// Options for a primary navigation.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NavigateOptions {
    /// Replace the current entry instead of pushing.
    pub replace: Option<bool>,
    /// History state for the new entry.
    pub state: Option<Value>,
    /// Submission carried by the navigation.
    pub submission: Option<SubmissionOptions>,
}

/// The routing engine this crate family adapts.
///
/// The engine owns matching, history, and loader/action execution. Methods
/// take `&self` because listeners may call back into the engine while it is
/// publishing; implementations use interior mutability and must not hold a
/// borrow across listener invocations.
pub trait RouterEngine {
    /// The current snapshot.
    fn state(&self) -> Rc<RouterSnapshot>;

    /// Registers `listener` for every subsequent snapshot.
    fn subscribe(&self, listener: Listener) -> Unsubscribe;

    /// Starts a primary navigation. Fire-and-forget.
    fn navigate(&self, to: NavigateTo, options: NavigateOptions);

    /// Starts a load or submission for fetcher `key`, owned by `route_id`.
    fn fetch(
        &self,
        key: &FetcherKey,
        route_id: &RouteId,
        href: &str,
        submission: Option<SubmissionOptions>,
    );

    /// State of fetcher `key`; idle for unknown keys.
    fn get_fetcher(&self, key: &FetcherKey) -> FetcherState;

    /// Drops the engine-side entry for fetcher `key`.
    fn delete_fetcher(&self, key: &FetcherKey);

    /// Renders a location as an href.
    fn create_href(&self, location: &Location) -> String;

    /// Tears the engine down.
    fn dispose(&self);
}
