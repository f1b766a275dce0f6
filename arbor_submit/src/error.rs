// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// A submission that cannot be encoded.
///
/// Returned to the caller of `submit`; never swallowed.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    /// A `GET` submission carried a file.
    #[error("Cannot submit binary form data using GET (field `{name}`)")]
    BinaryGet {
        /// Name of the offending field.
        name: String,
    },
    /// The method attribute or override is not a known method.
    #[error("unsupported form method `{method}`")]
    UnsupportedMethod {
        /// The rejected method.
        method: String,
    },
    /// The encoding attribute or override is not a known encoding.
    #[error("unsupported form encoding `{enc_type}`")]
    UnsupportedEncType {
        /// The rejected encoding.
        enc_type: String,
    },
    /// A submit button or input was used without an owning form.
    #[error("Cannot submit a <button> or <input type=\"submit\"> without a <form>")]
    SubmitterWithoutForm,
    /// The action could not be resolved to a URL.
    #[error("invalid form action `{action}`")]
    InvalidAction {
        /// The rejected action.
        action: String,
        /// Why URL resolution failed.
        #[source]
        source: url::ParseError,
    },
}
