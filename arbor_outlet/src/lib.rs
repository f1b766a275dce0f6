// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor Outlet: nested route resolution and the error boundary ladder.
//!
//! Routes render into each other through outlets. [`OutletResolver::resolve`]
//! takes the parent route's [`RouteContext`] (or `None` for the root) and
//! returns a [`RenderedRoute`] describing the next deeper match: its context,
//! whether an error boundary is installed around it, and whether it shows its
//! element or an error.
//!
//! ```rust
//! use std::rc::Rc;
//!
//! use arbor_engine::{Location, Match, Route, RouteError, RouterSnapshot};
//! use arbor_outlet::{Content, ErrorElement, OutletResolver};
//!
//! let snapshot = Rc::new(
//!     RouterSnapshot::builder(Location::new("/parent", "k1"))
//!         .push_match(Match::new(Route::new("0").with_element("Root"), "/"))
//!         .push_match(Match::new(
//!             Route::new("0-1").with_element("Parent").with_error_element("ParentError"),
//!             "/parent",
//!         ))
//!         .error("0-1", RouteError::thrown("Loader error!"))
//!         .build(),
//! );
//!
//! let mut resolver = OutletResolver::new();
//! let root = resolver.resolve(&snapshot, None).unwrap().unwrap();
//! assert_eq!(root.content, Content::Element(Some("Root".into())));
//!
//! let parent = resolver.resolve(&snapshot, Some(&root.context)).unwrap().unwrap();
//! let view = parent.error().unwrap();
//! assert_eq!(view.element, ErrorElement::Custom("ParentError".into()));
//! assert_eq!(view.error, RouteError::thrown("Loader error!"));
//! ```
//!
//! ## Boundaries
//!
//! A boundary is installed at the root, at the route holding the first
//! engine-reported error, and at every route that declares an error element.
//! Matches below the first engine error are not rendered at all.
//!
//! A host that catches a render failure hands it to
//! [`OutletResolver::capture`], which puts the nearest installed boundary at or
//! above the failing route into the errored state. An errored boundary stays
//! errored across re-renders at the same location and clears as soon as it is
//! resolved for a different location key. Boundaries without a declared error
//! element show a [`DefaultErrorElement`].

mod context;
mod default_element;
mod error;
mod ladder;
mod resolver;

pub use context::{InstanceKey, RouteContext};
pub use default_element::{DEFAULT_ERROR_HEADING, DEFAULT_ERROR_HINT, DefaultErrorElement};
pub use error::OutletError;
pub use ladder::{ActiveError, ErrorSource, Ladder, error_limit, installs_boundary};
pub use resolver::{Content, ErrorElement, ErrorView, OutletResolver, RenderedRoute};
