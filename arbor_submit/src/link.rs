// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Link click handling and active-link state.

use arbor_engine::Location;

bitflags::bitflags! {
    /// Modifier keys held during a click.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Meta (command) key.
        const META  = 0b0000_0001;
        /// Alt (option) key.
        const ALT   = 0b0000_0010;
        /// Control key.
        const CTRL  = 0b0000_0100;
        /// Shift key.
        const SHIFT = 0b0000_1000;
    }
}

/// The parts of a click event that decide whether a link handles it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClickEvent {
    /// Mouse button; `0` is the primary button.
    pub button: u16,
    /// Modifier keys held.
    pub modifiers: Modifiers,
    /// Whether a host handler already prevented the default action.
    pub default_prevented: bool,
}

impl ClickEvent {
    /// An unmodified primary-button click.
    #[must_use]
    pub fn primary() -> Self {
        Self::default()
    }

    /// Sets the button.
    #[must_use]
    pub fn with_button(mut self, button: u16) -> Self {
        self.button = button;
        self
    }

    /// Sets the held modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Marks the default action as prevented.
    #[must_use]
    pub fn prevented(mut self) -> Self {
        self.default_prevented = true;
        self
    }
}

/// Whether a link should turn `event` into a client-side navigation.
///
/// Only unmodified primary-button clicks whose default was not prevented,
/// on links without a target or targeting `_self`, are handled; everything
/// else is left to the host (new tabs, downloads, and so on).
#[must_use]
pub fn should_process_link_click(event: &ClickEvent, target: Option<&str>) -> bool {
    event.button == 0
        && target.is_none_or(|target| target.is_empty() || target == "_self")
        && event.modifiers.is_empty()
        && !event.default_prevented
}

/// Whether a link to `to` replaces the current entry when the caller did not
/// say: a link to the current location does not push a duplicate.
#[must_use]
pub fn default_replace(current: &Location, to: &str) -> bool {
    current.path() == to
}

/// Active and pending state of a navigation link.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NavLinkState {
    /// The current location is the link's target (or below it, unless `end`).
    pub is_active: bool,
    /// The pending navigation's location is the link's target (or below it).
    pub is_pending: bool,
}

impl NavLinkState {
    /// Computes the state of a link to `to`.
    #[must_use]
    pub fn new(current: &Location, pending: Option<&Location>, to: &str, end: bool) -> Self {
        let to = pathname_of(to);
        Self {
            is_active: path_matches(&current.pathname, to, end),
            is_pending: pending.is_some_and(|pending| path_matches(&pending.pathname, to, end)),
        }
    }
}

fn pathname_of(to: &str) -> &str {
    let end = to.find(['?', '#']).unwrap_or(to.len());
    &to[..end]
}

fn path_matches(pathname: &str, to: &str, end: bool) -> bool {
    pathname == to
        || (!end && pathname.starts_with(to) && pathname.as_bytes().get(to.len()) == Some(&b'/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_plain_primary_clicks_are_processed() {
        assert!(should_process_link_click(&ClickEvent::primary(), None));
        assert!(should_process_link_click(
            &ClickEvent::primary(),
            Some("_self")
        ));
        assert!(!should_process_link_click(
            &ClickEvent::primary(),
            Some("_blank")
        ));
        assert!(!should_process_link_click(
            &ClickEvent::primary().with_button(1),
            None
        ));
        assert!(!should_process_link_click(
            &ClickEvent::primary().with_modifiers(Modifiers::META),
            None
        ));
        assert!(!should_process_link_click(
            &ClickEvent::primary().prevented(),
            None
        ));
    }

    #[test]
    fn linking_to_the_current_location_replaces() {
        let current = Location::new("/a", "k").with_search("?x=1");
        assert!(default_replace(&current, "/a?x=1"));
        assert!(!default_replace(&current, "/a"));
    }

    #[test]
    fn nav_links_match_descendants_unless_end() {
        let current = Location::new("/projects/7", "k");
        assert!(NavLinkState::new(&current, None, "/projects", false).is_active);
        assert!(!NavLinkState::new(&current, None, "/projects", true).is_active);
        assert!(!NavLinkState::new(&current, None, "/proj", false).is_active);

        let pending = Location::new("/settings", "k2");
        let state = NavLinkState::new(&current, Some(&pending), "/settings?tab=1", false);
        assert!(state.is_pending);
        assert!(!state.is_active);
    }
}
