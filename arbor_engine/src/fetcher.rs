// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-key fetcher state as published by the engine.

use std::borrow::Borrow;
use std::fmt;

use serde_json::Value;

use crate::submission::{FormData, FormEncType, FormMethod};

/// Caller-scoped identity of a fetcher.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FetcherKey(String);

impl FetcherKey {
    /// Creates a key.
    #[must_use]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// The key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for FetcherKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for FetcherKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for FetcherKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for FetcherKey {
    fn from(key: &str) -> Self {
        Self::new(key)
    }
}

/// Phase of a fetcher.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FetcherStatus {
    /// Nothing in flight.
    #[default]
    Idle,
    /// A load (or the revalidation after a submission) is running.
    Loading,
    /// A submission is running.
    Submitting,
}

/// State of one fetcher.
#[derive(Clone, Debug, PartialEq)]
pub struct FetcherState {
    /// Key the state belongs to.
    pub key: FetcherKey,
    /// Current phase.
    pub state: FetcherStatus,
    /// Method of the submission while submitting.
    pub form_method: Option<FormMethod>,
    /// Action href of the submission while submitting.
    pub form_action: Option<String>,
    /// Encoding of the submission while submitting.
    pub form_enc_type: Option<FormEncType>,
    /// Submitted fields while submitting.
    pub form_data: Option<FormData>,
    /// Last resolved payload.
    pub data: Option<Value>,
}

impl FetcherState {
    /// The idle state for `key` with no data, returned for unknown keys.
    #[must_use]
    pub fn idle(key: FetcherKey) -> Self {
        Self {
            key,
            state: FetcherStatus::Idle,
            form_method: None,
            form_action: None,
            form_enc_type: None,
            form_data: None,
            data: None,
        }
    }

    /// Whether nothing is in flight.
    #[must_use]
    pub fn is_idle(&self) -> bool {
        self.state == FetcherStatus::Idle
    }
}
