// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Settlement tracking for deferred values.

use std::cell::RefCell;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::rc::{Rc, Weak};
use std::task::{Context, Poll};

use arbor_engine::{Promise, PromiseId, Resolve, RouteError, Settlement};
use futures::FutureExt;
use futures::future::{LocalBoxFuture, Shared};
use hashbrown::HashMap;
use serde_json::Value;
use tracing::trace;

type Waiter = Shared<LocalBoxFuture<'static, ()>>;

/// A render that is not ready yet.
///
/// The host shows its fallback and re-renders once this future completes.
/// Clones complete together.
#[derive(Clone)]
pub struct Suspend {
    waiter: Waiter,
    forever: bool,
}

impl Suspend {
    /// A suspension that never completes.
    #[must_use]
    pub fn forever() -> Self {
        Self {
            waiter: futures::future::pending::<()>().boxed_local().shared(),
            forever: true,
        }
    }

    /// Whether this suspension never completes.
    #[must_use]
    pub fn is_forever(&self) -> bool {
        self.forever
    }
}

impl Future for Suspend {
    type Output = ();

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<()> {
        self.waiter.poll_unpin(cx)
    }
}

impl fmt::Debug for Suspend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Suspend")
            .field("forever", &self.forever)
            .finish_non_exhaustive()
    }
}

/// What tracking a deferred value observed.
#[derive(Debug)]
pub enum Tracked {
    /// Still unsettled.
    Pending(Suspend),
    /// Settled with a value (or was never a promise).
    Resolved(Value),
    /// Settled with an error.
    Rejected(RouteError),
}

impl From<Settlement> for Tracked {
    fn from(settlement: Settlement) -> Self {
        match settlement {
            Ok(value) => Self::Resolved(value),
            Err(error) => Self::Rejected(error),
        }
    }
}

#[derive(Clone)]
enum Entry {
    Pending(Waiter),
    Settled(Settlement),
}

#[derive(Default)]
struct Table {
    entries: HashMap<PromiseId, Entry>,
    attachments: usize,
}

/// Side table recording the settlement of the promises it tracks.
///
/// The first time a promise is tracked, one settlement handler is attached;
/// every later render of the same promise (or any clone of it) observes the
/// recorded outcome without re-subscribing. Settlement is recorded once and
/// never re-evaluated. Clones of a tracker share the table.
#[derive(Clone, Default)]
pub struct Tracker {
    table: Rc<RefCell<Table>>,
}

impl Tracker {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Observes `resolve`, attaching a settlement handler on first sight.
    pub fn track(&self, resolve: &Resolve) -> Tracked {
        match resolve {
            Resolve::Value(value) => Tracked::Resolved(value.clone()),
            Resolve::Promise(promise) => self.track_promise(promise),
        }
    }

    /// Observes `promise`, attaching a settlement handler on first sight.
    pub fn track_promise(&self, promise: &Promise) -> Tracked {
        let id = promise.id();
        let mut table = self.table.borrow_mut();
        match table.entries.get(&id).cloned() {
            Some(Entry::Settled(settlement)) => return settlement.into(),
            Some(Entry::Pending(waiter)) => {
                // Another clone may have driven the promise to completion
                // before the attached handler ran.
                if let Some(settlement) = promise.peek().cloned() {
                    table.entries.insert(id, Entry::Settled(settlement.clone()));
                    return settlement.into();
                }
                return Tracked::Pending(Suspend {
                    waiter,
                    forever: false,
                });
            }
            None => {}
        }

        table.attachments += 1;
        if let Some(settlement) = promise.peek().cloned() {
            table.entries.insert(id, Entry::Settled(settlement.clone()));
            return settlement.into();
        }
        trace!(promise = id.get(), "tracking deferred value");
        let waiter = record_settlement(Rc::downgrade(&self.table), promise);
        table.entries.insert(id, Entry::Pending(waiter.clone()));
        Tracked::Pending(Suspend {
            waiter,
            forever: false,
        })
    }

    /// The recorded settlement of `promise`, without attaching anything.
    #[must_use]
    pub fn settlement(&self, promise: &Promise) -> Option<Settlement> {
        match self.table.borrow().entries.get(&promise.id())? {
            Entry::Settled(settlement) => Some(settlement.clone()),
            Entry::Pending(_) => None,
        }
    }

    /// Number of settlement handlers attached so far.
    #[must_use]
    pub fn attachments(&self) -> usize {
        self.table.borrow().attachments
    }

    /// Number of promises currently tracked.
    #[must_use]
    pub fn len(&self) -> usize {
        self.table.borrow().entries.len()
    }

    /// Whether no promise is tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.table.borrow().entries.is_empty()
    }

    /// Forgets every promise for which `keep` returns `false`.
    ///
    /// A forgotten promise that is still pending is not recorded when it
    /// settles; tracking it again attaches a new handler.
    pub fn retain(&self, mut keep: impl FnMut(PromiseId) -> bool) {
        let mut table = self.table.borrow_mut();
        let before = table.entries.len();
        table.entries.retain(|id, _| keep(*id));
        let dropped = before - table.entries.len();
        if dropped > 0 {
            trace!(dropped, "forgot deferred values");
        }
    }
}

fn record_settlement(table: Weak<RefCell<Table>>, promise: &Promise) -> Waiter {
    let id = promise.id();
    let settled = promise.settled();
    async move {
        let settlement = settled.await;
        if let Some(table) = table.upgrade() {
            trace!(
                promise = id.get(),
                ok = settlement.is_ok(),
                "deferred value settled"
            );
            if let Some(entry) = table.borrow_mut().entries.get_mut(&id) {
                *entry = Entry::Settled(settlement);
            }
        }
    }
    .boxed_local()
    .shared()
}

impl fmt::Debug for Tracker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.table.borrow();
        f.debug_struct("Tracker")
            .field("entries", &table.entries.len())
            .field("attachments", &table.attachments)
            .finish()
    }
}
