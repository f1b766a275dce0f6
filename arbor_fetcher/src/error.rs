// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use arbor_engine::FetcherKey;
use arbor_projector::ConfigurationError;
use arbor_submit::EncodingError;

/// Why a fetcher call did not reach the engine.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum FetcherError {
    /// The submission could not be encoded.
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    /// The router behind the fetcher is gone.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// The fetcher was already disposed.
    #[error("fetcher {key} used after dispose")]
    Disposed {
        /// Key of the disposed fetcher.
        key: FetcherKey,
    },
}
