// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use arbor_engine::ElementRef;

/// Origin used when none is configured.
pub const DEFAULT_ORIGIN: &str = "http://localhost";

/// Configuration of a [`RouterProvider`](crate::RouterProvider).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RouterConfig {
    /// Base URL that form actions are resolved against.
    pub origin: String,
    /// Element rendered until the engine reports it is initialized.
    pub fallback: Option<ElementRef>,
    /// Whether render errors captured by boundaries are logged.
    pub log_render_errors: bool,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            origin: DEFAULT_ORIGIN.to_owned(),
            fallback: None,
            log_render_errors: true,
        }
    }
}

impl RouterConfig {
    /// The default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the origin.
    #[must_use]
    pub fn with_origin(mut self, origin: impl Into<String>) -> Self {
        self.origin = origin.into();
        self
    }

    /// Sets the fallback element.
    #[must_use]
    pub fn with_fallback(mut self, fallback: impl Into<ElementRef>) -> Self {
        self.fallback = Some(fallback.into());
        self
    }

    /// Sets whether captured render errors are logged.
    #[must_use]
    pub fn with_render_error_logging(mut self, enabled: bool) -> Self {
        self.log_render_errors = enabled;
        self
    }
}
