// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The error boundary ladder.
//!
//! Each installed boundary is either clear or errored. It becomes errored when
//! a render inside it fails or when the engine reports an error for its route,
//! and it only clears when the location it was bound to changes.

use arbor_engine::{Route, RouteError, RouteId, RouterSnapshot};
use hashbrown::HashMap;
use tracing::debug;

use crate::error::OutletError;

/// Where an active boundary error came from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorSource {
    /// A render inside the boundary failed.
    Render,
    /// The engine reported a loader or action error for the route.
    Engine,
}

/// The error a boundary currently displays.
#[derive(Clone, Debug, PartialEq)]
pub struct ActiveError {
    /// The error.
    pub error: RouteError,
    /// Where it came from.
    pub source: ErrorSource,
}

#[derive(Clone, Debug)]
struct BoundaryState {
    location_key: String,
    active: Option<ActiveError>,
}

/// Index of the match whose route holds the first engine-reported error.
///
/// Matches below it are not rendered. Fails if the snapshot reports an error
/// for a route it did not match.
pub fn error_limit(snapshot: &RouterSnapshot) -> Result<Option<usize>, OutletError> {
    let Some(errors) = snapshot.errors.as_ref().filter(|errors| !errors.is_empty()) else {
        return Ok(None);
    };
    let limit = snapshot
        .matches
        .iter()
        .position(|m| errors.contains_key(m.id()));
    match limit {
        Some(limit) => Ok(Some(limit)),
        None => {
            let mut ids: Vec<&str> = errors.keys().map(RouteId::as_str).collect();
            ids.sort_unstable();
            Err(OutletError::InvariantViolation {
                message: format!(
                    "could not find a matching route for errors on route ids: {}",
                    ids.join(",")
                ),
            })
        }
    }
}

/// Whether a boundary is installed at match `index`.
///
/// The root always has one, as does the route holding the first engine error
/// and any route that declares an error element.
#[must_use]
pub fn installs_boundary(route: &Route, index: usize, limit: Option<usize>) -> bool {
    index == 0 || limit == Some(index) || route.has_error_boundary()
}

/// Per-boundary state, keyed by route id.
#[derive(Clone, Debug, Default)]
pub struct Ladder {
    boundaries: HashMap<RouteId, BoundaryState>,
}

impl Ladder {
    /// Creates an empty ladder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Brings the boundary for `route_id` up to date with a render at
    /// `location_key` and returns what it should display.
    ///
    /// A location change clears the boundary first. A render error stays in
    /// front of any engine error; otherwise the engine error is taken, and
    /// with neither, whatever the boundary last showed is kept.
    pub fn sync(
        &mut self,
        route_id: &RouteId,
        location_key: &str,
        engine_error: Option<&RouteError>,
    ) -> Option<&ActiveError> {
        let state = self
            .boundaries
            .entry(route_id.clone())
            .or_insert_with(|| BoundaryState {
                location_key: location_key.to_owned(),
                active: None,
            });
        if state.location_key != location_key {
            if state.active.take().is_some() {
                debug!(route = %route_id, location = location_key, "boundary recovered");
            }
            location_key.clone_into(&mut state.location_key);
        }
        let render_error = matches!(
            state.active,
            Some(ActiveError {
                source: ErrorSource::Render,
                ..
            })
        );
        if !render_error && let Some(error) = engine_error {
            state.active = Some(ActiveError {
                error: error.clone(),
                source: ErrorSource::Engine,
            });
        }
        state.active.as_ref()
    }

    /// Puts the boundary for `route_id` into the errored state with a render
    /// error, bound to `location_key`.
    pub fn capture(&mut self, route_id: &RouteId, location_key: &str, error: RouteError) {
        self.boundaries.insert(
            route_id.clone(),
            BoundaryState {
                location_key: location_key.to_owned(),
                active: Some(ActiveError {
                    error,
                    source: ErrorSource::Render,
                }),
            },
        );
    }

    /// The error shown by the boundary for `route_id` while bound to
    /// `location_key`.
    #[must_use]
    pub fn active(&self, route_id: &str, location_key: &str) -> Option<&ActiveError> {
        self.boundaries
            .get(route_id)
            .filter(|state| state.location_key == location_key)
            .and_then(|state| state.active.as_ref())
    }

    /// Drops boundaries whose route is no longer matched.
    pub fn retain_matched(&mut self, snapshot: &RouterSnapshot) {
        self.boundaries
            .retain(|id, _| snapshot.match_index(id.as_str()).is_some());
    }

    /// Number of boundaries with state.
    #[must_use]
    pub fn len(&self) -> usize {
        self.boundaries.len()
    }

    /// Whether no boundary has state.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.boundaries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_engine::{Location, Match};

    fn id(id: &str) -> RouteId {
        RouteId::new(id)
    }

    #[test]
    fn engine_errors_stick_until_the_location_changes() {
        let mut ladder = Ladder::new();
        let error = RouteError::thrown("Loader error!");
        let shown = ladder.sync(&id("0-1"), "k1", Some(&error)).cloned();
        assert_eq!(shown.map(|a| a.source), Some(ErrorSource::Engine));

        // Same location, engine error gone: still errored.
        assert!(ladder.sync(&id("0-1"), "k1", None).is_some());
        // New location heals.
        assert!(ladder.sync(&id("0-1"), "k2", None).is_none());
    }

    #[test]
    fn render_errors_win_over_engine_errors() {
        let mut ladder = Ladder::new();
        ladder.capture(&id("0"), "k1", RouteError::thrown("render"));
        let engine = RouteError::thrown("loader");
        let shown = ladder.sync(&id("0"), "k1", Some(&engine)).unwrap();
        assert_eq!(shown.error, RouteError::thrown("render"));
        assert_eq!(shown.source, ErrorSource::Render);

        // After navigating, the engine error for the new location shows.
        let shown = ladder.sync(&id("0"), "k2", Some(&engine)).unwrap();
        assert_eq!(shown.source, ErrorSource::Engine);
    }

    #[test]
    fn active_is_scoped_to_the_bound_location() {
        let mut ladder = Ladder::new();
        ladder.capture(&id("0"), "k1", RouteError::thrown("render"));
        assert!(ladder.active("0", "k1").is_some());
        assert!(ladder.active("0", "k2").is_none());
    }

    #[test]
    fn limit_is_the_first_errored_match() {
        let snapshot = RouterSnapshot::builder(Location::new("/a/b", "k"))
            .push_match(Match::new(Route::new("0"), "/"))
            .push_match(Match::new(Route::new("0-0"), "/a"))
            .push_match(Match::new(Route::new("0-0-0"), "/a/b"))
            .error("0-0-0", RouteError::thrown("deep"))
            .error("0-0", RouteError::thrown("shallow"))
            .build();
        assert_eq!(error_limit(&snapshot), Ok(Some(1)));
    }

    #[test]
    fn errors_outside_the_matches_violate_invariants() {
        let snapshot = RouterSnapshot::builder(Location::new("/", "k"))
            .push_match(Match::new(Route::new("0"), "/"))
            .error("ghost", RouteError::thrown("x"))
            .build();
        assert!(matches!(
            error_limit(&snapshot),
            Err(OutletError::InvariantViolation { .. })
        ));
    }

    #[test]
    fn boundaries_follow_installation_policy() {
        let plain = Route::new("a");
        let guarded = Route::new("b").with_error_element("BError");
        assert!(installs_boundary(&plain, 0, None));
        assert!(!installs_boundary(&plain, 2, None));
        assert!(installs_boundary(&plain, 2, Some(2)));
        assert!(installs_boundary(&guarded, 3, None));
    }
}
