// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arbor Submit: turning forms and link clicks into engine calls.
//!
//! [`translate`] resolves a [`SubmitTarget`] (a form, a submit button, raw
//! form data, search params, a map, or nothing) into a [`Submission`]: the
//! method, the encoding, the href to submit to, and the fields. Both primary
//! navigations and fetchers go through it.
//!
//! ```rust
//! use arbor_engine::{FormData, FormMethod};
//! use arbor_submit::{FormElement, SubmitOptions, SubmitTarget, SubmitterElement, translate};
//! use url::Url;
//!
//! let form = FormElement::new()
//!     .with_method("post")
//!     .with_fields(FormData::new().with("id", "7"));
//! let delete = SubmitterElement::in_form(form).with_name_value("intent", "delete");
//!
//! let origin = Url::parse("http://localhost").unwrap();
//! let submission =
//!     translate(&SubmitTarget::from(delete), "/items", &SubmitOptions::new(), &origin).unwrap();
//! assert_eq!(submission.method, FormMethod::Post);
//! assert_eq!(submission.href, "/items");
//! assert_eq!(submission.form_data.len(), 2);
//! ```
//!
//! Precedence for method, action, and encoding is: [`SubmitOptions`], then
//! the submitter's `form*` attributes, then the form's attributes, then the
//! defaults. `GET` submissions put their fields in the query string and fail
//! with [`EncodingError::BinaryGet`] when a field is a file.
//!
//! [`form_action`] computes the default action of a form rendered inside a
//! route, and [`should_process_link_click`] decides whether a link click
//! becomes a client-side navigation.

mod action;
mod error;
mod link;
mod target;
mod translate;

pub use action::form_action;
pub use error::EncodingError;
pub use link::{ClickEvent, Modifiers, NavLinkState, default_replace, should_process_link_click};
pub use target::{FormElement, SubmitTarget, SubmitterElement};
pub use translate::{Submission, SubmitOptions, translate};
