// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor Await: deferred loader values with suspension.
//!
//! Loader data may hold [`Promise`](arbor_engine::Promise)s that settle after
//! the initial render. A [`Tracker`] records each promise's settlement in a
//! side table keyed by promise identity, attaching exactly one handler per
//! promise. An [`Await`] instance renders through the tracker: it suspends
//! while the value is pending, renders its children once resolved, and routes
//! errors either to its own error element or back to the caller for the
//! nearest error boundary.
//!
//! ```rust
//! use arbor_await::{Await, Awaited, Tracker};
//! use arbor_engine::{Promise, Resolve};
//! use futures::executor::block_on;
//! use serde_json::json;
//!
//! let tracker = Tracker::new();
//! let (promise, settle) = Promise::pending();
//! let resolve = Resolve::Promise(promise);
//! let mut instance = Await::new();
//!
//! let Ok(Awaited::Suspended(ready)) = instance.render(&tracker, &resolve, |v| Ok(v.clone())) else {
//!     panic!("a pending promise suspends");
//! };
//! settle.resolve(json!("Lazy Data ✅"));
//! block_on(ready);
//!
//! let rendered = instance.render(&tracker, &resolve, |v| Ok(v.clone())).unwrap();
//! assert_eq!(rendered.rendered(), Some(json!("Lazy Data ✅")));
//! ```
//!
//! ## Aborts
//!
//! A value whose navigation was superseded settles as
//! [`RouteError::AbortedDeferred`](arbor_engine::RouteError::AbortedDeferred).
//! The instance that sees it freezes: it suspends forever, so the fallback
//! stays up instead of flashing an error. A fresh instance starts clean.

mod instance;
mod tracker;

pub use instance::{Await, Awaited};
pub use tracker::{Suspend, Tracked, Tracker};
