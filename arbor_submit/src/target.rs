// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Things that can be submitted.

use std::collections::BTreeMap;

use arbor_engine::FormData;

/// The host's view of a `<form>` element.
///
/// Attributes are kept as raw strings; they are validated when the submission
/// is translated.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormElement {
    /// `method` attribute.
    pub method: Option<String>,
    /// `action` attribute.
    pub action: Option<String>,
    /// `enctype` attribute.
    pub enc_type: Option<String>,
    /// Successful controls, in tree order.
    pub fields: FormData,
}

impl FormElement {
    /// A form with no attributes and no fields.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the `method` attribute.
    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Sets the `action` attribute.
    #[must_use]
    pub fn with_action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Sets the `enctype` attribute.
    #[must_use]
    pub fn with_enc_type(mut self, enc_type: impl Into<String>) -> Self {
        self.enc_type = Some(enc_type.into());
        self
    }

    /// Sets the fields.
    #[must_use]
    pub fn with_fields(mut self, fields: FormData) -> Self {
        self.fields = fields;
        self
    }
}

/// The host's view of a submit `<button>` or `<input type="submit">`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubmitterElement {
    /// `name` attribute; when present, `name=value` is appended to the fields.
    pub name: Option<String>,
    /// `value` attribute.
    pub value: String,
    /// `formmethod` attribute.
    pub form_method: Option<String>,
    /// `formaction` attribute.
    pub form_action: Option<String>,
    /// `formenctype` attribute.
    pub form_enc_type: Option<String>,
    /// The owning form.
    pub form: Option<FormElement>,
}

impl SubmitterElement {
    /// A submitter owned by `form`.
    #[must_use]
    pub fn in_form(form: FormElement) -> Self {
        Self {
            form: Some(form),
            ..Self::default()
        }
    }

    /// Sets the `name` and `value` attributes.
    #[must_use]
    pub fn with_name_value(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self.value = value.into();
        self
    }

    /// Sets the `formmethod` attribute.
    #[must_use]
    pub fn with_form_method(mut self, method: impl Into<String>) -> Self {
        self.form_method = Some(method.into());
        self
    }

    /// Sets the `formaction` attribute.
    #[must_use]
    pub fn with_form_action(mut self, action: impl Into<String>) -> Self {
        self.form_action = Some(action.into());
        self
    }

    /// Sets the `formenctype` attribute.
    #[must_use]
    pub fn with_form_enc_type(mut self, enc_type: impl Into<String>) -> Self {
        self.form_enc_type = Some(enc_type.into());
        self
    }
}

/// A submission target.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum SubmitTarget {
    /// A form element.
    Form(FormElement),
    /// A submit button or input.
    Submitter(SubmitterElement),
    /// Raw form data.
    FormData(FormData),
    /// URL search params.
    SearchParams(Vec<(String, String)>),
    /// A plain string map.
    Map(BTreeMap<String, String>),
    /// Nothing; submits no fields.
    #[default]
    None,
}

impl From<FormElement> for SubmitTarget {
    fn from(form: FormElement) -> Self {
        Self::Form(form)
    }
}

impl From<SubmitterElement> for SubmitTarget {
    fn from(submitter: SubmitterElement) -> Self {
        Self::Submitter(submitter)
    }
}

impl From<FormData> for SubmitTarget {
    fn from(data: FormData) -> Self {
        Self::FormData(data)
    }
}

impl From<BTreeMap<String, String>> for SubmitTarget {
    fn from(map: BTreeMap<String, String>) -> Self {
        Self::Map(map)
    }
}
