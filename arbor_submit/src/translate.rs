// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The form submission translator.

use arbor_engine::{FormData, FormEncType, FormMethod, FormValue, SubmissionOptions};
use url::Url;

use crate::error::EncodingError;
use crate::target::SubmitTarget;

/// Caller overrides for a submission.
///
/// Each set field wins over the submitter's and the form's attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SubmitOptions {
    /// Method override.
    pub method: Option<FormMethod>,
    /// Action override.
    pub action: Option<String>,
    /// Encoding override.
    pub enc_type: Option<FormEncType>,
    /// Replace the current history entry; only used by navigations.
    pub replace: Option<bool>,
}

impl SubmitOptions {
    /// No overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the method.
    #[must_use]
    pub fn method(mut self, method: FormMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// Overrides the action.
    #[must_use]
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Overrides the encoding.
    #[must_use]
    pub fn enc_type(mut self, enc_type: FormEncType) -> Self {
        self.enc_type = Some(enc_type);
        self
    }

    /// Sets the replace flag.
    #[must_use]
    pub fn replace(mut self, replace: bool) -> Self {
        self.replace = Some(replace);
        self
    }
}

/// A translated submission, ready for the engine.
#[derive(Clone, Debug, PartialEq)]
pub struct Submission {
    /// Method.
    pub method: FormMethod,
    /// Body encoding.
    pub enc_type: FormEncType,
    /// `pathname + search` of the resolved action; for `GET` the fields are
    /// already in the search.
    pub href: String,
    /// The submitted fields.
    pub form_data: FormData,
}

impl Submission {
    /// Submission options for `navigate` or `fetch`.
    ///
    /// `GET` submissions carry no body; their fields live in [`Submission::href`].
    #[must_use]
    pub fn options(&self) -> SubmissionOptions {
        SubmissionOptions {
            form_method: self.method,
            form_enc_type: self.enc_type,
            form_data: self.method.is_mutation().then(|| self.form_data.clone()),
        }
    }
}

struct Attributes<'a> {
    method: Option<&'a str>,
    action: Option<&'a str>,
    enc_type: Option<&'a str>,
}

impl Attributes<'_> {
    const NONE: Self = Attributes {
        method: None,
        action: None,
        enc_type: None,
    };
}

/// Translates `target` into a submission.
///
/// Method, action, and encoding are taken from `options`, then the
/// submitter's `form*` attributes, then the owning form's attributes, then
/// the defaults (`GET`, `default_action`, URL encoding). The action is
/// resolved against `origin`. `GET` submissions replace the action's query
/// with the fields (keeping a naked `index` flag) and reject files.
pub fn translate(
    target: &SubmitTarget,
    default_action: &str,
    options: &SubmitOptions,
    origin: &Url,
) -> Result<Submission, EncodingError> {
    let (form_data, attributes) = collect(target)?;

    let method = match (options.method, attributes.method) {
        (Some(method), _) => method,
        (None, Some(raw)) => {
            raw.parse::<FormMethod>()
                .map_err(|_| EncodingError::UnsupportedMethod {
                    method: raw.to_owned(),
                })?
        }
        (None, None) => FormMethod::Get,
    };
    let enc_type = match (options.enc_type, attributes.enc_type) {
        (Some(enc_type), _) => enc_type,
        (None, Some(raw)) => {
            raw.parse::<FormEncType>()
                .map_err(|_| EncodingError::UnsupportedEncType {
                    enc_type: raw.to_owned(),
                })?
        }
        (None, None) => FormEncType::UrlEncoded,
    };
    let action = options
        .action
        .as_deref()
        .or(attributes.action)
        .unwrap_or(default_action);

    let mut url = origin
        .join(action)
        .map_err(|source| EncodingError::InvalidAction {
            action: action.to_owned(),
            source,
        })?;
    if method == FormMethod::Get {
        let mut text = Vec::with_capacity(form_data.len());
        for (name, value) in form_data.iter() {
            match value {
                FormValue::Text(value) => text.push((name, value.as_str())),
                FormValue::File(_) => {
                    return Err(EncodingError::BinaryGet {
                        name: name.to_owned(),
                    });
                }
            }
        }
        // The fields replace the action's query; only a naked index flag survives.
        let index = url
            .query_pairs()
            .any(|(name, value)| name == "index" && value.is_empty());
        url.set_query(index.then_some("index"));
        if !text.is_empty() {
            url.query_pairs_mut().extend_pairs(text);
        }
    }

    let mut href = url.path().to_owned();
    if let Some(query) = url.query().filter(|query| !query.is_empty()) {
        href.push('?');
        href.push_str(query);
    }
    Ok(Submission {
        method,
        enc_type,
        href,
        form_data,
    })
}

fn collect(target: &SubmitTarget) -> Result<(FormData, Attributes<'_>), EncodingError> {
    Ok(match target {
        SubmitTarget::Form(form) => (
            form.fields.clone(),
            Attributes {
                method: form.method.as_deref(),
                action: form.action.as_deref(),
                enc_type: form.enc_type.as_deref(),
            },
        ),
        SubmitTarget::Submitter(submitter) => {
            let form = submitter
                .form
                .as_ref()
                .ok_or(EncodingError::SubmitterWithoutForm)?;
            let mut fields = form.fields.clone();
            if let Some(name) = &submitter.name {
                fields.append(name.as_str(), submitter.value.as_str());
            }
            (
                fields,
                Attributes {
                    method: submitter.form_method.as_deref().or(form.method.as_deref()),
                    action: submitter.form_action.as_deref().or(form.action.as_deref()),
                    enc_type: submitter
                        .form_enc_type
                        .as_deref()
                        .or(form.enc_type.as_deref()),
                },
            )
        }
        SubmitTarget::FormData(data) => (data.clone(), Attributes::NONE),
        SubmitTarget::SearchParams(pairs) => (
            pairs
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str()))
                .collect(),
            Attributes::NONE,
        ),
        SubmitTarget::Map(map) => (
            map.iter()
                .map(|(name, value)| (name.as_str(), value.as_str()))
                .collect(),
            Attributes::NONE,
        ),
        SubmitTarget::None => (FormData::new(), Attributes::NONE),
    })
}
