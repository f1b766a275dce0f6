// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The route context chain.

use std::fmt;
use std::rc::Rc;

use arbor_engine::{Match, RouteId, RouterSnapshot};

/// Identity of a rendered route instance.
///
/// A route that re-matches under a new location key is a fresh instance, so
/// per-instance state (captured errors, frozen deferred values) starts clean.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct InstanceKey {
    /// Route rendered by the instance.
    pub route_id: RouteId,
    /// Location key the instance was created for.
    pub location_key: String,
}

impl fmt::Display for InstanceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.route_id, self.location_key)
    }
}

/// Context of one rendered route: the snapshot it was rendered from and the
/// position of its match.
///
/// Contexts are explicit values passed down the resolution chain rather than
/// ambient state. The prefix `matches[..=index]` is the route's ancestry.
#[derive(Clone)]
pub struct RouteContext {
    snapshot: Rc<RouterSnapshot>,
    index: usize,
}

impl RouteContext {
    /// Context for `snapshot.matches[index]`, or `None` if out of range.
    #[must_use]
    pub fn new(snapshot: Rc<RouterSnapshot>, index: usize) -> Option<Self> {
        (index < snapshot.matches.len()).then_some(Self { snapshot, index })
    }

    /// The snapshot this context was resolved from.
    #[must_use]
    pub fn snapshot(&self) -> &Rc<RouterSnapshot> {
        &self.snapshot
    }

    /// Depth of the route in the match list.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Id of the rendered route.
    #[must_use]
    pub fn id(&self) -> &RouteId {
        self.route_match().id()
    }

    /// Whether the rendered route is an index route.
    #[must_use]
    pub fn is_index(&self) -> bool {
        self.route_match().route.index
    }

    /// This route's match.
    #[must_use]
    pub fn route_match(&self) -> &Match {
        &self.snapshot.matches[self.index]
    }

    /// Matches from the root down to and including this route.
    #[must_use]
    pub fn matches(&self) -> &[Match] {
        &self.snapshot.matches[..=self.index]
    }

    /// The parent route's context, `None` at the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        let index = self.index.checked_sub(1)?;
        Some(Self {
            snapshot: Rc::clone(&self.snapshot),
            index,
        })
    }

    /// Key of the location this context was rendered for.
    #[must_use]
    pub fn location_key(&self) -> &str {
        &self.snapshot.location.key
    }

    /// Instance identity of the rendered route.
    #[must_use]
    pub fn instance_key(&self) -> InstanceKey {
        InstanceKey {
            route_id: self.id().clone(),
            location_key: self.location_key().to_owned(),
        }
    }
}

impl PartialEq for RouteContext {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.snapshot, &other.snapshot) && self.index == other.index
    }
}

impl fmt::Debug for RouteContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteContext")
            .field("id", self.id())
            .field("index", &self.index)
            .field("is_index", &self.is_index())
            .field("location_key", &self.location_key())
            .finish()
    }
}
