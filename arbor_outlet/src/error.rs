// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use arbor_engine::RouteId;

/// Structural mismatch between the rendered tree and the current matches.
///
/// Both variants are programming errors; retrying with the same snapshot
/// fails the same way.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum OutletError {
    /// An outlet was rendered for a route that is not in the current matches.
    #[error("no match for route id \"{route_id}\"")]
    NoMatchForRouteId {
        /// The route the outlet was rendered under.
        route_id: RouteId,
    },
    /// The snapshot contradicts itself.
    #[error("invariant violation: {message}")]
    InvariantViolation {
        /// What went wrong.
        message: String,
    },
}
