// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Links and declarative navigation.

use arbor_engine::{NavigateOptions, NavigateTo};
use arbor_submit::{ClickEvent, NavLinkState, default_replace, should_process_link_click};
use serde_json::Value;
use tracing::debug;

use crate::error::RouterError;
use crate::provider::{RouterProvider, parse_path};

/// Props of a link.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Link {
    /// Target href.
    pub to: String,
    /// Replace instead of push; defaults to replacing when `to` is the
    /// current location.
    pub replace: Option<bool>,
    /// History state for the new entry.
    pub state: Option<Value>,
    /// Browsing context target (`_self`, `_blank`, ...).
    pub target: Option<String>,
    /// Let the host perform a full document navigation.
    pub reload_document: bool,
}

impl Link {
    /// A link to `to`.
    #[must_use]
    pub fn to(to: impl Into<String>) -> Self {
        Self {
            to: to.into(),
            ..Self::default()
        }
    }

    /// Sets the replace flag.
    #[must_use]
    pub fn replace(mut self, replace: bool) -> Self {
        self.replace = Some(replace);
        self
    }

    /// Sets the history state.
    #[must_use]
    pub fn state(mut self, state: Value) -> Self {
        self.state = Some(state);
        self
    }

    /// Sets the target.
    #[must_use]
    pub fn target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Marks the link as a full document navigation.
    #[must_use]
    pub fn reload_document(mut self) -> Self {
        self.reload_document = true;
        self
    }
}

/// Declarative navigation, performed when rendered.
#[derive(Clone, Debug, PartialEq)]
pub struct Navigate {
    /// Where to go.
    pub to: NavigateTo,
    /// Replace instead of push.
    pub replace: bool,
    /// History state for the new entry.
    pub state: Option<Value>,
}

impl RouterProvider {
    /// The href a link renders.
    pub fn link_href(&self, link: &Link) -> Result<String, RouterError> {
        self.href(&link.to)
    }

    /// Handles a click on `link`; returns whether it became a client-side
    /// navigation (the host then prevents the default action).
    pub fn link_click(&self, link: &Link, event: &ClickEvent) -> Result<bool, RouterError> {
        if link.reload_document || !should_process_link_click(event, link.target.as_deref()) {
            return Ok(false);
        }
        let engine = self.engine()?;
        let current = self.location()?;
        // Compare paths, not hrefs: the engine may prefix a basename or `#`.
        let path = parse_path(&link.to).path();
        let replace = link
            .replace
            .unwrap_or_else(|| default_replace(&current, &path));
        debug!(to = %path, replace, "link navigation");
        engine.navigate(
            NavigateTo::Path(link.to.clone()),
            NavigateOptions {
                replace: Some(replace),
                state: link.state.clone(),
                submission: None,
            },
        );
        Ok(true)
    }

    /// Active and pending state of a navigation link to `to`.
    pub fn nav_link_state(&self, to: &str, end: bool) -> Result<NavLinkState, RouterError> {
        let snapshot = self.snapshot()?;
        Ok(NavLinkState::new(
            &snapshot.location,
            snapshot.navigation.location.as_ref(),
            to,
            end,
        ))
    }

    /// Performs a declarative navigation.
    pub fn navigate(&self, navigate: &Navigate) -> Result<(), RouterError> {
        let engine = self.engine()?;
        engine.navigate(
            navigate.to.clone(),
            NavigateOptions {
                replace: Some(navigate.replace),
                state: navigate.state.clone(),
                submission: None,
            },
        );
        Ok(())
    }
}
