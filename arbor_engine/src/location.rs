// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Locations, history actions, and the in-flight navigation.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::submission::{FormData, FormEncType, FormMethod};

/// A history entry.
///
/// `key` is unique per history entry; two locations with the same pathname
/// visited at different times have different keys. Boundaries and deferred
/// instances compare keys, not paths, to decide whether a navigation happened.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// URL pathname, always starting with `/`.
    pub pathname: String,
    /// Query string including the leading `?`, or empty.
    pub search: String,
    /// Fragment including the leading `#`, or empty.
    pub hash: String,
    /// History state attached by the navigation.
    pub state: Option<Value>,
    /// Unique key of the history entry.
    pub key: String,
}

impl Location {
    /// Creates a location for `pathname` with the given entry key.
    #[must_use]
    pub fn new(pathname: impl Into<String>, key: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            search: String::new(),
            hash: String::new(),
            state: None,
            key: key.into(),
        }
    }

    /// Sets the query string; a missing `?` is added.
    #[must_use]
    pub fn with_search(mut self, search: &str) -> Self {
        self.search = prefixed('?', search);
        self
    }

    /// Sets the fragment; a missing `#` is added.
    #[must_use]
    pub fn with_hash(mut self, hash: &str) -> Self {
        self.hash = prefixed('#', hash);
        self
    }

    /// Sets the history state.
    #[must_use]
    pub fn with_state(mut self, state: Value) -> Self {
        self.state = Some(state);
        self
    }

    /// Returns `pathname + search + hash`.
    #[must_use]
    pub fn path(&self) -> String {
        create_path(&self.pathname, &self.search, &self.hash)
    }
}

fn prefixed(prefix: char, value: &str) -> String {
    if value.is_empty() || value.len() == 1 && value.starts_with(prefix) {
        String::new()
    } else if value.starts_with(prefix) {
        value.to_owned()
    } else {
        let mut out = String::with_capacity(value.len() + 1);
        out.push(prefix);
        out.push_str(value);
        out
    }
}

/// Joins path parts into an href, dropping a bare `?` or `#`.
///
/// An empty pathname is treated as `/`.
#[must_use]
pub fn create_path(pathname: &str, search: &str, hash: &str) -> String {
    let mut out = if pathname.is_empty() {
        String::from("/")
    } else {
        pathname.to_owned()
    };
    if !search.is_empty() && search != "?" {
        out.push_str(&prefixed('?', search));
    }
    if !hash.is_empty() && hash != "#" {
        out.push_str(&prefixed('#', hash));
    }
    out
}

/// How the current location was reached.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavigationType {
    /// Back/forward traversal or the initial load.
    #[default]
    Pop,
    /// A new entry was pushed.
    Push,
    /// The current entry was replaced.
    Replace,
}

/// Phase of the primary navigation.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NavigationState {
    /// Nothing in flight.
    #[default]
    Idle,
    /// Loaders for the pending location are running.
    Loading,
    /// An action submission is running.
    Submitting,
}

/// The in-flight primary navigation, if any.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Navigation {
    /// Current phase.
    pub state: NavigationState,
    /// Location being navigated to while not idle.
    pub location: Option<Location>,
    /// Method of the submission while submitting.
    pub form_method: Option<FormMethod>,
    /// Action href of the submission while submitting.
    pub form_action: Option<String>,
    /// Encoding of the submission while submitting.
    pub form_enc_type: Option<FormEncType>,
    /// Submitted fields while submitting.
    pub form_data: Option<FormData>,
}

impl Navigation {
    /// The idle navigation.
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    /// A loading navigation toward `location`.
    #[must_use]
    pub fn loading(location: Location) -> Self {
        Self {
            state: NavigationState::Loading,
            location: Some(location),
            ..Self::default()
        }
    }

    /// Whether nothing is in flight.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state == NavigationState::Idle
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_path_skips_bare_separators() {
        assert_eq!(create_path("/a", "?", "#"), "/a");
        assert_eq!(create_path("/a", "x=1", "top"), "/a?x=1#top");
        assert_eq!(create_path("", "?q", ""), "/?q");
    }

    #[test]
    fn location_builders_normalize_prefixes() {
        let loc = Location::new("/tasks", "k1")
            .with_search("?open")
            .with_hash("list");
        assert_eq!(loc.search, "?open");
        assert_eq!(loc.hash, "#list");
        assert_eq!(loc.path(), "/tasks?open#list");
    }
}
