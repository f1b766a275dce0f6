// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use arbor_engine::RouteError;
use arbor_fetcher::FetcherError;
use arbor_outlet::OutletError;
use arbor_projector::ConfigurationError;
use arbor_submit::EncodingError;

/// Everything the host surface can fail with.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum RouterError {
    /// Used outside a router or after it was disposed.
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// The rendered tree does not fit the matches.
    #[error(transparent)]
    Outlet(#[from] OutletError),
    /// A submission could not be encoded.
    #[error(transparent)]
    Encoding(#[from] EncodingError),
    /// A fetcher call failed.
    #[error(transparent)]
    Fetcher(#[from] FetcherError),
    /// A route error no boundary handled.
    #[error(transparent)]
    Route(#[from] RouteError),
    /// The configured origin is not a URL.
    #[error("invalid router origin `{origin}`")]
    InvalidOrigin {
        /// The configured origin.
        origin: String,
        /// Why it failed to parse.
        #[source]
        source: url::ParseError,
    },
}
