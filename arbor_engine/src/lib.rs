// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor Engine: the data model and collaborator surface of a routing engine.
//!
//! Arbor adapts a framework-agnostic routing engine to UI trees. The engine owns
//! route matching, history, and loader/action execution; it publishes immutable
//! [`RouterSnapshot`]s and accepts imperative commands through [`RouterEngine`].
//! This crate defines only that contract and its data; the other `arbor_*`
//! crates build on it:
//!
//! - `arbor_projector` mirrors the engine into a tear-free snapshot source.
//! - `arbor_outlet` walks [`Match`]es into nested route renders with error boundaries.
//! - `arbor_await` tracks [`Promise`]s found in deferred loader data.
//! - `arbor_submit` and `arbor_fetcher` turn submissions into engine calls.
//!
//! ## Snapshots
//!
//! ```rust
//! use arbor_engine::{Location, Match, Route, RouterSnapshot};
//! use serde_json::json;
//!
//! let snapshot = RouterSnapshot::builder(Location::new("/parent", "k1"))
//!     .push_match(Match::new(Route::new("0").with_path("/").with_element("Root"), "/"))
//!     .push_match(Match::new(Route::new("0-1").with_path("parent"), "/parent"))
//!     .loader_data("0-1", json!("parent loader data"))
//!     .build();
//!
//! assert_eq!(snapshot.match_index("0-1"), Some(1));
//! assert_eq!(
//!     snapshot.loader_data.get("0-1").and_then(|d| d.as_value()),
//!     Some(&json!("parent loader data")),
//! );
//! ```
//!
//! ## Deferred values
//!
//! [`Promise`] is a cloneable handle around a shared future; clones share a
//! [`PromiseId`]. [`Promise::pending`] returns a [`Settle`] handle; dropping it
//! unsettled reports [`RouteError::AbortedDeferred`].
//!
//! ## Errors
//!
//! [`RouteError`] covers everything a loader, action, or render can fail
//! with. Use [`is_route_error_response`] to tell error responses apart from
//! thrown errors.

mod engine;
mod error;
mod fetcher;
mod location;
mod promise;
mod route;
mod snapshot;
mod submission;

pub use engine::{Listener, NavigateOptions, NavigateTo, RouterEngine, Unsubscribe};
pub use error::{ErrorResponse, RouteError, is_route_error_response};
pub use fetcher::{FetcherKey, FetcherState, FetcherStatus};
pub use location::{Location, Navigation, NavigationState, NavigationType, create_path};
pub use promise::{Promise, PromiseId, Settle, Settlement};
pub use route::{ElementRef, Match, Route, RouteId};
pub use snapshot::{DeferredData, Resolve, RouteData, RouterSnapshot, SnapshotBuilder};
pub use submission::{
    FileBlob, FormData, FormEncType, FormMethod, FormValue, ParseSubmissionError, SubmissionOptions,
};
