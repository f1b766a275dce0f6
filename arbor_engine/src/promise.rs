// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred loader values.
//!
//! A [`Promise`] is a cloneable handle to a value a loader will produce after
//! its initial response. Every clone shares the same underlying future and the
//! same [`PromiseId`], so identity survives being copied into successive
//! snapshots. Nothing here records settlement for renders; that is the job of a
//! tracker keyed by [`PromiseId`].

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};

use futures::FutureExt;
use futures::channel::oneshot;
use futures::future::{LocalBoxFuture, Shared};
use serde_json::Value;

use crate::error::RouteError;

/// What a deferred value settles to.
pub type Settlement = Result<Value, RouteError>;

static NEXT_PROMISE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a promise, shared by all of its clones.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PromiseId(u64);

impl PromiseId {
    /// Raw numeric value.
    #[must_use]
    pub fn get(self) -> u64 {
        self.0
    }
}

/// A shared, single-threaded deferred value.
#[derive(Clone)]
pub struct Promise {
    id: PromiseId,
    shared: Shared<LocalBoxFuture<'static, Settlement>>,
}

impl Promise {
    /// Wraps a future producing the deferred value.
    pub fn new(future: impl Future<Output = Settlement> + 'static) -> Self {
        Self {
            id: PromiseId(NEXT_PROMISE_ID.fetch_add(1, Ordering::Relaxed)),
            shared: future.boxed_local().shared(),
        }
    }

    /// Creates a promise settled by the returned [`Settle`] handle.
    ///
    /// Dropping the handle without settling settles the promise as
    /// [`RouteError::AbortedDeferred`], which is how an engine reports that the
    /// navigation owning the value was superseded.
    #[must_use]
    pub fn pending() -> (Self, Settle) {
        let (tx, rx) = oneshot::channel();
        let promise = Self::new(async move {
            match rx.await {
                Ok(settlement) => settlement,
                Err(oneshot::Canceled) => Err(RouteError::AbortedDeferred),
            }
        });
        (promise, Settle { tx })
    }

    /// A promise that is already resolved; [`Promise::peek`] sees the value.
    #[must_use]
    pub fn resolved(value: Value) -> Self {
        Self::settled_with(Ok(value))
    }

    /// A promise that is already rejected; [`Promise::peek`] sees the error.
    #[must_use]
    pub fn rejected(error: RouteError) -> Self {
        Self::settled_with(Err(error))
    }

    fn settled_with(settlement: Settlement) -> Self {
        let promise = Self::new(futures::future::ready(settlement));
        // A ready future completes on its first poll.
        let _ = promise.shared.clone().now_or_never();
        promise
    }

    /// Identity shared by all clones.
    #[must_use]
    #[inline]
    pub fn id(&self) -> PromiseId {
        self.id
    }

    /// The settlement, if some clone has already driven the future to completion.
    #[must_use]
    pub fn peek(&self) -> Option<&Settlement> {
        self.shared.peek()
    }

    /// A future that completes with the settlement.
    ///
    /// Driving any of these futures settles all clones.
    #[must_use]
    pub fn settled(&self) -> Shared<LocalBoxFuture<'static, Settlement>> {
        self.shared.clone()
    }
}

impl PartialEq for Promise {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl fmt::Debug for Promise {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Promise")
            .field("id", &self.id)
            .field("settled", &self.peek().is_some())
            .finish()
    }
}

/// Settles the promise created alongside it by [`Promise::pending`].
#[derive(Debug)]
pub struct Settle {
    tx: oneshot::Sender<Settlement>,
}

impl Settle {
    /// Resolves the promise with `value`.
    pub fn resolve(self, value: Value) {
        // The receiver only disappears once every clone of the promise is gone.
        let _ = self.tx.send(Ok(value));
    }

    /// Rejects the promise with `error`.
    pub fn reject(self, error: RouteError) {
        let _ = self.tx.send(Err(error));
    }

    /// Settles the promise as aborted.
    pub fn abort(self) {
        let _ = self.tx.send(Err(RouteError::AbortedDeferred));
    }
}
