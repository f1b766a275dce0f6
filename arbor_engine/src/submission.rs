// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Submission payloads shared by navigations and fetchers.

use std::fmt;
use std::rc::Rc;
use std::str::FromStr;

use smallvec::SmallVec;

/// Most forms carry a handful of fields; keep them inline.
const INLINE_FIELDS: usize = 8;

/// A single form field value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormValue {
    /// A text value.
    Text(String),
    /// A file upload. Files can only travel in a request body.
    File(FileBlob),
}

impl FormValue {
    /// Returns the text if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::File(_) => None,
        }
    }
}

impl From<&str> for FormValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_owned())
    }
}

impl From<String> for FormValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<FileBlob> for FormValue {
    fn from(file: FileBlob) -> Self {
        Self::File(file)
    }
}

/// Binary form payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileBlob {
    /// File name as reported by the host.
    pub name: String,
    /// MIME type, if known.
    pub content_type: Option<String>,
    /// File contents.
    pub bytes: Rc<[u8]>,
}

impl FileBlob {
    /// Creates a file with no content type.
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: impl Into<Rc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            content_type: None,
            bytes: bytes.into(),
        }
    }
}

/// Ordered multimap of form fields, mirroring the semantics of `FormData`.
///
/// Duplicate names are allowed and insertion order is preserved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormData {
    entries: SmallVec<[(String, FormValue); INLINE_FIELDS]>,
}

impl FormData {
    /// Creates an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a field; existing fields with the same name are kept.
    pub fn append(&mut self, name: impl Into<String>, value: impl Into<FormValue>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Builder form of [`FormData::append`].
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FormValue>) -> Self {
        self.append(name, value);
        self
    }

    /// Returns the first value for `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FormValue> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    /// Returns every value for `name`, in insertion order.
    pub fn get_all<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a FormValue> + 'a {
        self.entries
            .iter()
            .filter(move |(n, _)| n == name)
            .map(|(_, value)| value)
    }

    /// Iterates over all fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FormValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the form has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N, V> FromIterator<(N, V)> for FormData
where
    N: Into<String>,
    V: Into<FormValue>,
{
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        let mut form = Self::new();
        for (name, value) in iter {
            form.append(name, value);
        }
        form
    }
}

/// HTTP method of a submission.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FormMethod {
    /// `GET`: fields travel in the query string.
    #[default]
    Get,
    /// `POST`.
    Post,
    /// `PUT`.
    Put,
    /// `PATCH`.
    Patch,
    /// `DELETE`.
    Delete,
}

impl FormMethod {
    /// Lowercase method name, as the engine expects it.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "get",
            Self::Post => "post",
            Self::Put => "put",
            Self::Patch => "patch",
            Self::Delete => "delete",
        }
    }

    /// Whether this method mutates (anything but `GET`).
    #[must_use]
    pub fn is_mutation(self) -> bool {
        self != Self::Get
    }
}

impl fmt::Display for FormMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown method or encoding name.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized {kind} `{value}`")]
pub struct ParseSubmissionError {
    /// What was being parsed.
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl FromStr for FormMethod {
    type Err = ParseSubmissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "get" => Ok(Self::Get),
            "post" => Ok(Self::Post),
            "put" => Ok(Self::Put),
            "patch" => Ok(Self::Patch),
            "delete" => Ok(Self::Delete),
            _ => Err(ParseSubmissionError {
                kind: "form method",
                value: s.to_owned(),
            }),
        }
    }
}

/// Body encoding of a submission.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum FormEncType {
    /// `application/x-www-form-urlencoded`.
    #[default]
    UrlEncoded,
    /// `multipart/form-data`.
    Multipart,
}

impl FormEncType {
    /// MIME type string.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::UrlEncoded => "application/x-www-form-urlencoded",
            Self::Multipart => "multipart/form-data",
        }
    }
}

impl fmt::Display for FormEncType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FormEncType {
    type Err = ParseSubmissionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "application/x-www-form-urlencoded" => Ok(Self::UrlEncoded),
            "multipart/form-data" => Ok(Self::Multipart),
            _ => Err(ParseSubmissionError {
                kind: "form encoding",
                value: s.to_owned(),
            }),
        }
    }
}

/// Submission details handed to the engine's `navigate` and `fetch`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubmissionOptions {
    /// Submission method.
    pub form_method: FormMethod,
    /// Body encoding.
    pub form_enc_type: FormEncType,
    /// Body fields; `None` for `GET`, whose fields live in the href.
    pub form_data: Option<FormData>,
}
