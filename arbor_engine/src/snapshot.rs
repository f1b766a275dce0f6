// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The immutable router snapshot.

use std::collections::BTreeMap;

use hashbrown::HashMap;
use serde_json::Value;

use crate::error::RouteError;
use crate::fetcher::{FetcherKey, FetcherState};
use crate::location::{Location, Navigation, NavigationType};
use crate::promise::Promise;
use crate::route::{Match, RouteId};

/// A value that is either available now or deferred behind a promise.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolve {
    /// Available now.
    Value(Value),
    /// Settles later.
    Promise(Promise),
}

impl From<Value> for Resolve {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<Promise> for Resolve {
    fn from(promise: Promise) -> Self {
        Self::Promise(promise)
    }
}

/// Loader data containing deferred entries, keyed by name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeferredData {
    entries: BTreeMap<String, Resolve>,
}

impl DeferredData {
    /// Creates empty deferred data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Resolve>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Returns the entry for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Resolve> {
        self.entries.get(key)
    }

    /// Iterates over all entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Resolve)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// Data a loader produced for one route.
#[derive(Clone, Debug, PartialEq)]
pub enum RouteData {
    /// Fully resolved data.
    Value(Value),
    /// Data with deferred entries.
    Deferred(DeferredData),
}

impl RouteData {
    /// The resolved value, if the data is not deferred.
    #[must_use]
    pub fn as_value(&self) -> Option<&Value> {
        match self {
            Self::Value(value) => Some(value),
            Self::Deferred(_) => None,
        }
    }

    /// The deferred entries, if any.
    #[must_use]
    pub fn as_deferred(&self) -> Option<&DeferredData> {
        match self {
            Self::Deferred(data) => Some(data),
            Self::Value(_) => None,
        }
    }
}

impl From<Value> for RouteData {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

impl From<DeferredData> for RouteData {
    fn from(data: DeferredData) -> Self {
        Self::Deferred(data)
    }
}

/// Point-in-time router state published by the engine.
///
/// Snapshots are replaced wholesale on every change and are never mutated once
/// published; consumers hold them behind an `Rc` and compare by pointer to
/// detect changes.
#[derive(Clone, Debug, PartialEq)]
pub struct RouterSnapshot {
    /// Whether the initial loaders have completed.
    pub initialized: bool,
    /// Current location.
    pub location: Location,
    /// How the current location was reached.
    pub navigation_type: NavigationType,
    /// The in-flight primary navigation.
    pub navigation: Navigation,
    /// Matched routes, root to leaf.
    pub matches: Vec<Match>,
    /// Loader data by route.
    pub loader_data: HashMap<RouteId, RouteData>,
    /// Action data by route, present after a submission.
    pub action_data: Option<HashMap<RouteId, Value>>,
    /// Loader, action, or render errors by the route whose boundary owns them.
    pub errors: Option<HashMap<RouteId, RouteError>>,
    /// Fetchers by key.
    pub fetchers: HashMap<FetcherKey, FetcherState>,
}

impl RouterSnapshot {
    /// Starts a builder for an initialized snapshot at `location`.
    #[must_use]
    pub fn builder(location: Location) -> SnapshotBuilder {
        SnapshotBuilder::new(location)
    }

    /// Index of the match for `id`.
    #[must_use]
    pub fn match_index(&self, id: &str) -> Option<usize> {
        self.matches.iter().position(|m| m.route.id == *id)
    }

    /// Error reported for `id`.
    #[must_use]
    pub fn error(&self, id: &str) -> Option<&RouteError> {
        self.errors.as_ref().and_then(|errors| errors.get(id))
    }

    /// Whether any route reports an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.errors
            .as_ref()
            .is_some_and(|errors| !errors.is_empty())
    }

    /// State of fetcher `key`, idle if the engine does not know it.
    #[must_use]
    pub fn fetcher(&self, key: &FetcherKey) -> FetcherState {
        self.fetchers
            .get(key)
            .cloned()
            .unwrap_or_else(|| FetcherState::idle(key.clone()))
    }
}

/// Builder for [`RouterSnapshot`], mostly for engines and tests.
#[derive(Clone, Debug)]
pub struct SnapshotBuilder {
    snapshot: RouterSnapshot,
}

impl SnapshotBuilder {
    /// Creates a builder for an initialized, idle snapshot at `location`.
    #[must_use]
    pub fn new(location: Location) -> Self {
        Self {
            snapshot: RouterSnapshot {
                initialized: true,
                location,
                navigation_type: NavigationType::Pop,
                navigation: Navigation::idle(),
                matches: Vec::new(),
                loader_data: HashMap::new(),
                action_data: None,
                errors: None,
                fetchers: HashMap::new(),
            },
        }
    }

    /// Sets the initialized flag.
    #[must_use]
    pub fn initialized(mut self, initialized: bool) -> Self {
        self.snapshot.initialized = initialized;
        self
    }

    /// Sets the navigation type.
    #[must_use]
    pub fn navigation_type(mut self, navigation_type: NavigationType) -> Self {
        self.snapshot.navigation_type = navigation_type;
        self
    }

    /// Sets the in-flight navigation.
    #[must_use]
    pub fn navigation(mut self, navigation: Navigation) -> Self {
        self.snapshot.navigation = navigation;
        self
    }

    /// Appends a match (root first).
    #[must_use]
    pub fn push_match(mut self, route_match: Match) -> Self {
        self.snapshot.matches.push(route_match);
        self
    }

    /// Sets loader data for a route.
    #[must_use]
    pub fn loader_data(mut self, id: impl Into<RouteId>, data: impl Into<RouteData>) -> Self {
        self.snapshot.loader_data.insert(id.into(), data.into());
        self
    }

    /// Sets action data for a route.
    #[must_use]
    pub fn action_data(mut self, id: impl Into<RouteId>, data: Value) -> Self {
        self.snapshot
            .action_data
            .get_or_insert_with(HashMap::new)
            .insert(id.into(), data);
        self
    }

    /// Reports an error for a route.
    #[must_use]
    pub fn error(mut self, id: impl Into<RouteId>, error: RouteError) -> Self {
        self.snapshot
            .errors
            .get_or_insert_with(HashMap::new)
            .insert(id.into(), error);
        self
    }

    /// Sets a fetcher's state.
    #[must_use]
    pub fn fetcher(mut self, state: FetcherState) -> Self {
        self.snapshot.fetchers.insert(state.key.clone(), state);
        self
    }

    /// Finishes the snapshot.
    #[must_use]
    pub fn build(self) -> RouterSnapshot {
        self.snapshot
    }
}
