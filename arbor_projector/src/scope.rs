// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ambient provider scope.
//!
//! A rendering runtime enters a projector's scope while it renders the
//! subtree under a router provider. Accessors deeper in the tree find the
//! innermost projector through [`current`] instead of threading it through
//! every call.

use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

use arbor_engine::RouterSnapshot;

use crate::error::ConfigurationError;
use crate::projector::Projector;

thread_local! {
    static SCOPES: RefCell<Vec<Projector>> = const { RefCell::new(Vec::new()) };
}

/// Keeps a projector in scope until dropped.
///
/// Guards must be dropped in reverse order of creation; dropping an outer
/// guard also exits every scope entered after it.
#[derive(Debug)]
#[must_use = "the scope ends when the guard is dropped"]
pub struct ScopeGuard {
    depth: usize,
    _not_send: PhantomData<Rc<()>>,
}

impl Drop for ScopeGuard {
    fn drop(&mut self) {
        SCOPES.with(|scopes| scopes.borrow_mut().truncate(self.depth));
    }
}

impl Projector {
    /// Makes this projector the innermost one for the current thread.
    pub fn enter(&self) -> ScopeGuard {
        SCOPES.with(|scopes| {
            let mut scopes = scopes.borrow_mut();
            let depth = scopes.len();
            scopes.push(self.clone());
            ScopeGuard {
                depth,
                _not_send: PhantomData,
            }
        })
    }
}

/// The innermost projector in scope.
pub fn current() -> Result<Projector, ConfigurationError> {
    SCOPES
        .with(|scopes| scopes.borrow().last().cloned())
        .ok_or(ConfigurationError::OutsideRouterScope)
}

/// The snapshot of the innermost projector in scope.
pub fn current_snapshot() -> Result<Rc<RouterSnapshot>, ConfigurationError> {
    current()?.snapshot()
}
