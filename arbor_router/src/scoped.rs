// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Accessors that find the router through the ambient provider scope.
//!
//! These are for host code that cannot be handed the provider directly. They
//! fail with [`ConfigurationError::OutsideRouterScope`] when no provider has
//! been entered on this thread.

use arbor_engine::{FetcherKey, FetcherState, Location, Navigation, NavigationType};
use arbor_projector::{ConfigurationError, current_snapshot};

/// Current location.
pub fn location() -> Result<Location, ConfigurationError> {
    Ok(current_snapshot()?.location.clone())
}

/// How the current location was reached.
pub fn navigation_type() -> Result<NavigationType, ConfigurationError> {
    Ok(current_snapshot()?.navigation_type)
}

/// The in-flight navigation.
pub fn navigation() -> Result<Navigation, ConfigurationError> {
    Ok(current_snapshot()?.navigation.clone())
}

/// State of fetcher `key`.
pub fn fetcher_state(key: &FetcherKey) -> Result<FetcherState, ConfigurationError> {
    Ok(current_snapshot()?.fetcher(key))
}
