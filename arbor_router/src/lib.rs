// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor Router: the surface a UI runtime binds to.
//!
//! A [`RouterProvider`] attaches to a routing engine and exposes everything a
//! host needs to render routes:
//!
//! - [`RouterProvider::render`] and [`RouterProvider::outlet`] resolve the
//!   nested route tree, with error boundaries, one outlet at a time.
//! - [`RouterProvider::capture`] hands render failures to the boundary ladder.
//! - [`RouterProvider::render_await`] renders deferred loader values.
//! - [`Link`], [`Navigate`], and [`Form`] turn user intent into engine
//!   navigations; [`RouterProvider::fetcher`] creates keyed fetchers.
//! - Route-scoped accessors read location, matches, loader and action data,
//!   and errors.
//!
//! ```rust
//! use arbor_engine::{Location, Match, Route, RouterSnapshot};
//! use arbor_memory::MemoryEngine;
//! use arbor_router::{Content, RootView, RouterConfig, RouterProvider};
//! use serde_json::json;
//!
//! let engine = MemoryEngine::new(
//!     RouterSnapshot::builder(Location::new("/parent", "k1"))
//!         .push_match(Match::new(Route::new("0").with_element("Root"), "/"))
//!         .push_match(Match::new(Route::new("0-1").with_element("Parent"), "/parent"))
//!         .loader_data("0-1", json!("parent loader data"))
//!         .build(),
//! );
//! let router = RouterProvider::new(engine, RouterConfig::new()).unwrap();
//!
//! let RootView::Routes(Some(root)) = router.render().unwrap() else {
//!     panic!("expected routes");
//! };
//! let parent = router.outlet(&root.context).unwrap().unwrap();
//! assert_eq!(parent.content, Content::Element(Some("Parent".into())));
//! assert_eq!(
//!     router.loader_data(&parent.context).and_then(|d| d.as_value().cloned()),
//!     Some(json!("parent loader data")),
//! );
//! assert!(router.outlet(&parent.context).unwrap().is_none());
//! ```
//!
//! Dropping the provider (or calling [`RouterProvider::dispose`]) releases the
//! engine subscription and disposes the engine once.

mod config;
mod error;
mod form;
mod navigation;
mod provider;
pub mod scoped;

pub use config::{DEFAULT_ORIGIN, RouterConfig};
pub use error::RouterError;
pub use form::{Form, SubmitEvent};
pub use navigation::{Link, Navigate};
pub use provider::{RootView, RouterProvider, UiMatch};

pub use arbor_await::{Awaited, Suspend};
pub use arbor_fetcher::Fetcher;
pub use arbor_outlet::{Content, ErrorElement, ErrorView, RenderedRoute, RouteContext};
pub use arbor_submit::{
    ClickEvent, FormElement, Modifiers, NavLinkState, SubmitOptions, SubmitTarget, SubmitterElement,
};
