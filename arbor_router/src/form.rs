// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Forms, imperative submission, and fetchers.

use arbor_engine::{FormData, FormEncType, FormMethod, NavigateOptions, NavigateTo};
use arbor_fetcher::Fetcher;
use arbor_outlet::RouteContext;
use arbor_submit::{
    FormElement, SubmitOptions, SubmitTarget, SubmitterElement, form_action, translate,
};
use tracing::debug;

use crate::error::RouterError;
use crate::provider::RouterProvider;

/// Props of a form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Form {
    /// Method; `GET` when unset.
    pub method: Option<FormMethod>,
    /// Action; the enclosing route's action when unset.
    pub action: Option<String>,
    /// Body encoding.
    pub enc_type: Option<FormEncType>,
    /// Replace instead of push.
    pub replace: Option<bool>,
    /// Let the host perform a full document submission.
    pub reload_document: bool,
}

impl Form {
    /// A form with default props.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the method.
    #[must_use]
    pub fn method(mut self, method: FormMethod) -> Self {
        self.method = Some(method);
        self
    }

    /// Sets the action.
    #[must_use]
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Sets the encoding.
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

/// A submit event as the host saw it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SubmitEvent {
    /// Successful controls of the form.
    pub fields: FormData,
    /// The button or input that submitted the form, if any.
    pub submitter: Option<SubmitterElement>,
    /// Whether a host `on_submit` handler prevented the default action.
    pub default_prevented: bool,
}

impl SubmitEvent {
    /// A submission of `fields` without a submitter.
    #[must_use]
    pub fn new(fields: FormData) -> Self {
        Self {
            fields,
            ..Self::default()
        }
    }

    /// Sets the submitter.
    #[must_use]
    pub fn with_submitter(mut self, submitter: SubmitterElement) -> Self {
        self.submitter = Some(submitter);
        self
    }

    /// Marks the default action as prevented.
    #[must_use]
    pub fn prevented(mut self) -> Self {
        self.default_prevented = true;
        self
    }
}

impl RouterProvider {
    /// The action of a form inside the route at `context`.
    pub fn form_action(
        &self,
        context: &RouteContext,
        action: Option<&str>,
    ) -> Result<String, RouterError> {
        let snapshot = self.snapshot()?;
        let route_match = context.route_match();
        Ok(form_action(
            &route_match.pathname,
            context.is_index(),
            &snapshot.location.search,
            action,
        ))
    }

    /// Submits `target` as a navigation from the route at `context`.
    pub fn submit(
        &self,
        context: &RouteContext,
        target: &SubmitTarget,
        options: &SubmitOptions,
    ) -> Result<(), RouterError> {
        let engine = self.engine()?;
        let default_action = self.form_action(context, None)?;
        let submission = translate(target, &default_action, options, &self.origin)?;
        debug!(
            route = %context.id(),
            method = %submission.method,
            href = %submission.href,
            "navigation submit"
        );
        engine.navigate(
            NavigateTo::Path(submission.href.clone()),
            NavigateOptions {
                replace: options.replace,
                state: None,
                submission: Some(submission.options()),
            },
        );
        Ok(())
    }

    /// Handles a submit event from `form` inside the route at `context`.
    ///
    /// Returns whether the submission was taken over; the host then prevents
    /// the default action. A form bound to `fetcher` submits through it
    /// instead of navigating.
    pub fn form_submit(
        &self,
        context: &RouteContext,
        form: &Form,
        event: SubmitEvent,
        fetcher: Option<&Fetcher>,
    ) -> Result<bool, RouterError> {
        if event.default_prevented || form.reload_document {
            return Ok(false);
        }
        let element = FormElement {
            method: Some(form.method.unwrap_or_default().as_str().to_owned()),
            action: Some(self.form_action(context, form.action.as_deref())?),
            enc_type: Some(form.enc_type.unwrap_or_default().as_str().to_owned()),
            fields: event.fields,
        };
        let target = match event.submitter {
            Some(submitter) => SubmitTarget::Submitter(SubmitterElement {
                form: Some(element),
                ..submitter
            }),
            None => SubmitTarget::Form(element),
        };
        let options = SubmitOptions {
            replace: form.replace,
            ..SubmitOptions::default()
        };
        match fetcher {
            Some(fetcher) => fetcher.submit(&target, &options)?,
            None => self.submit(context, &target, &options)?,
        }
        Ok(true)
    }

    /// Creates a fetcher owned by the route at `context`.
    ///
    /// The caller must [`dispose`](Fetcher::dispose) it when the owning
    /// consumer is torn down.
    pub fn fetcher(&self, context: &RouteContext) -> Result<Fetcher, RouterError> {
        let default_action = self.form_action(context, None)?;
        Ok(self.fetchers.create(context.id().clone(), default_action))
    }
}
