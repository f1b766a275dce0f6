// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// The projector was used where no router provides it.
///
/// This is a programming error in the host binding, not a data failure, and is
/// meant to surface loudly during development.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    /// No provider scope is active on this thread.
    #[error("Projector used outside Router scope")]
    OutsideRouterScope,
    /// The provider that owned the projector has been torn down.
    #[error("Projector used after its Router was disposed")]
    Disposed,
}
