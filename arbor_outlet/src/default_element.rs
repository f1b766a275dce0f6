// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The error UI shown when an errored route declares no error element.

use std::fmt;

use arbor_engine::RouteError;

/// Heading of the default error element.
pub const DEFAULT_ERROR_HEADING: &str = "Unhandled Thrown Error!";

/// Hint pointing developers at custom error elements.
pub const DEFAULT_ERROR_HINT: &str = "💿 Hey developer 👋 You can provide a way better UX than this when your \
     app throws errors by providing your own errorElement props on your routes.";

/// Content of the built-in error element.
///
/// Hosts render the four parts however they like; [`fmt::Display`] gives a
/// plain-text rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DefaultErrorElement {
    /// Always [`DEFAULT_ERROR_HEADING`].
    pub heading: &'static str,
    /// `status statusText` for error responses, the message for thrown
    /// errors, JSON for any other value.
    pub message: String,
    /// Stack trace, when the error carries one.
    pub stack: Option<String>,
    /// Always [`DEFAULT_ERROR_HINT`].
    pub hint: &'static str,
}

impl DefaultErrorElement {
    /// Describes `error`.
    #[must_use]
    pub fn new(error: &RouteError) -> Self {
        Self {
            heading: DEFAULT_ERROR_HEADING,
            message: error.to_string(),
            stack: error.stack().map(str::to_owned),
            hint: DEFAULT_ERROR_HINT,
        }
    }
}

impl fmt::Display for DefaultErrorElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.heading)?;
        writeln!(f, "{}", self.message)?;
        if let Some(stack) = &self.stack {
            writeln!(f, "{stack}")?;
        }
        f.write_str(self.hint)
    }
}
