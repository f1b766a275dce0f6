// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor Projector: a tear-free view of routing engine state.
//!
//! A [`Projector`] subscribes to a [`RouterEngine`](arbor_engine::RouterEngine)
//! once and fans every published snapshot out to its own listeners. Readers
//! call [`Projector::snapshot`]; during a notification it returns exactly the
//! snapshot being delivered, so two consumers rendering in the same pass can
//! never disagree about router state.
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use arbor_engine::{Location, RouterSnapshot};
//! use arbor_memory::MemoryEngine;
//! use arbor_projector::Projector;
//!
//! let engine = MemoryEngine::new(RouterSnapshot::builder(Location::new("/", "k0")).build());
//! let projector = Projector::attach(engine.clone());
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let reader = projector.clone();
//! let sink = seen.clone();
//! let _subscription = projector.subscribe(move |snapshot| {
//!     let current = reader.snapshot().unwrap();
//!     assert!(Rc::ptr_eq(&current, snapshot));
//!     sink.borrow_mut().push(snapshot.location.pathname.clone());
//! });
//!
//! engine.publish(RouterSnapshot::builder(Location::new("/next", "k1")).build());
//! assert_eq!(*seen.borrow(), ["/next"]);
//! assert_eq!(projector.generation(), 1);
//! ```
//!
//! ## Scope
//!
//! Host bindings make a projector ambient with [`Projector::enter`]; code
//! rendered inside finds it with [`current`] or [`current_snapshot`]. Outside
//! any scope both report [`ConfigurationError::OutsideRouterScope`].

mod error;
mod projector;
mod scope;

pub use error::ConfigurationError;
pub use projector::{Projector, Subscription};
pub use scope::{ScopeGuard, current, current_snapshot};
