// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor Fetcher: keyed submissions and loads outside primary navigation.
//!
//! A [`Fetcher`] owns a process-wide unique [`FetcherKey`](arbor_engine::FetcherKey)
//! and talks to the engine's `fetch` and `delete_fetcher` operations through a
//! [`Projector`](arbor_projector::Projector). Fetchers never block or get
//! blocked by navigation, and any number of them can be in flight at once.
//!
//! ```rust
//! use arbor_engine::{FetcherStatus, Location, RouteId, RouterSnapshot};
//! use arbor_fetcher::FetcherRegistry;
//! use arbor_memory::MemoryEngine;
//! use arbor_projector::Projector;
//! use url::Url;
//!
//! let engine = MemoryEngine::new(RouterSnapshot::builder(Location::new("/", "k0")).build());
//! let registry = FetcherRegistry::new(
//!     Projector::attach(engine.clone()),
//!     Url::parse("http://localhost").unwrap(),
//! );
//!
//! let fetcher = registry.create(RouteId::new("0"), "/");
//! fetcher.load("/search?q=arbor").unwrap();
//! assert_eq!(fetcher.state().unwrap().state, FetcherStatus::Loading);
//!
//! fetcher.dispose();
//! assert_eq!(engine.deleted_fetchers(), [fetcher.key().clone()]);
//! ```
//!
//! Every fetcher must be disposed when its consumer is torn down, or the
//! engine keeps its entry for the router's lifetime. [`Fetcher::dispose`] is
//! idempotent, and dropping an undisposed handle disposes it with a warning.

mod error;
mod registry;

pub use error::FetcherError;
pub use registry::{Fetcher, FetcherRegistry, next_fetcher_key};
