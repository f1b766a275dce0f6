// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The outlet resolver.

use std::rc::Rc;

use arbor_engine::{ElementRef, Route, RouteError, RouteId, RouterSnapshot};
use hashbrown::HashMap;
use tracing::error;

use crate::context::{InstanceKey, RouteContext};
use crate::default_element::DefaultErrorElement;
use crate::error::OutletError;
use crate::ladder::{ActiveError, ErrorSource, Ladder, error_limit, installs_boundary};

/// The element shown in place of an errored route.
#[derive(Clone, Debug, PartialEq)]
pub enum ErrorElement {
    /// The route's declared error element.
    Custom(ElementRef),
    /// The built-in error UI.
    Default(DefaultErrorElement),
}

/// An error displayed by a boundary.
#[derive(Clone, Debug, PartialEq)]
pub struct ErrorView {
    /// The error, made available to the error element.
    pub error: RouteError,
    /// Where the error came from.
    pub source: ErrorSource,
    /// What to render.
    pub element: ErrorElement,
}

impl ErrorView {
    fn new(active: &ActiveError, route: &Route) -> Self {
        let element = match &route.error_element {
            Some(element) => ErrorElement::Custom(element.clone()),
            None => ErrorElement::Default(DefaultErrorElement::new(&active.error)),
        };
        Self {
            error: active.error.clone(),
            source: active.source,
            element,
        }
    }
}

/// What a resolved route renders.
#[derive(Clone, Debug, PartialEq)]
pub enum Content {
    /// The route's element; `None` means the route renders its child outlet
    /// in place.
    Element(Option<ElementRef>),
    /// The boundary is errored.
    Error(ErrorView),
}

/// Render description for one route.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderedRoute {
    /// Context handed to the route's subtree.
    pub context: RouteContext,
    /// Whether a boundary is installed around the route.
    pub boundary: bool,
    /// What to render.
    pub content: Content,
}

impl RenderedRoute {
    /// Instance identity; hosts key the route's subtree by it.
    #[must_use]
    pub fn key(&self) -> InstanceKey {
        self.context.instance_key()
    }

    /// The displayed error, if the boundary is errored.
    #[must_use]
    pub fn error(&self) -> Option<&ErrorView> {
        match &self.content {
            Content::Error(view) => Some(view),
            Content::Element(_) => None,
        }
    }
}

/// Resolves outlets against snapshots and owns the boundary ladder.
///
/// Resolution is memoized per snapshot: resolving the same outlet twice
/// without a new snapshot or a captured error returns the same
/// [`RenderedRoute`].
#[derive(Debug)]
pub struct OutletResolver {
    ladder: Ladder,
    snapshot: Option<Rc<RouterSnapshot>>,
    resolved: HashMap<Option<RouteId>, Rc<RenderedRoute>>,
    log_render_errors: bool,
}

impl Default for OutletResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl OutletResolver {
    /// Creates a resolver that logs captured render errors.
    #[must_use]
    pub fn new() -> Self {
        Self {
            ladder: Ladder::new(),
            snapshot: None,
            resolved: HashMap::new(),
            log_render_errors: true,
        }
    }

    /// Sets whether captured render errors are logged.
    #[must_use]
    pub fn with_render_error_logging(mut self, enabled: bool) -> Self {
        self.log_render_errors = enabled;
        self
    }

    /// The boundary ladder.
    #[must_use]
    pub fn ladder(&self) -> &Ladder {
        &self.ladder
    }

    /// Resolves the outlet below `parent`, or the root outlet for `None`.
    ///
    /// Returns `Ok(None)` when there is nothing left to render: the parent is
    /// the leaf, or everything below it is cut off by an engine error.
    pub fn resolve(
        &mut self,
        snapshot: &Rc<RouterSnapshot>,
        parent: Option<&RouteContext>,
    ) -> Result<Option<Rc<RenderedRoute>>, OutletError> {
        self.observe(snapshot);
        let parent_id = parent.map(|parent| parent.id().clone());
        if let Some(hit) = self.resolved.get(&parent_id) {
            return Ok(Some(Rc::clone(hit)));
        }

        let next = match &parent_id {
            None => 0,
            Some(id) => {
                let index = snapshot.match_index(id.as_str()).ok_or_else(|| {
                    OutletError::NoMatchForRouteId {
                        route_id: id.clone(),
                    }
                })?;
                index + 1
            }
        };
        let limit = error_limit(snapshot)?;
        let end = limit.map_or(snapshot.matches.len(), |limit| limit + 1);
        if next >= end {
            return Ok(None);
        }
        let context = RouteContext::new(Rc::clone(snapshot), next).ok_or_else(|| {
            OutletError::InvariantViolation {
                message: format!("match index {next} out of range"),
            }
        })?;
        let route = &context.route_match().route;
        let boundary = installs_boundary(route, next, limit);
        let content = if boundary {
            let engine_error = snapshot.error(route.id.as_str());
            match self
                .ladder
                .sync(&route.id, context.location_key(), engine_error)
            {
                Some(active) => Content::Error(ErrorView::new(active, route)),
                None => Content::Element(route.element.clone()),
            }
        } else {
            Content::Element(route.element.clone())
        };

        let rendered = Rc::new(RenderedRoute {
            context,
            boundary,
            content,
        });
        self.resolved.insert(parent_id, Rc::clone(&rendered));
        Ok(Some(rendered))
    }

    /// Resolves every outlet from the root down, stopping at the leaf or at
    /// the first route that displays an error.
    pub fn resolve_chain(
        &mut self,
        snapshot: &Rc<RouterSnapshot>,
    ) -> Result<Vec<Rc<RenderedRoute>>, OutletError> {
        let mut chain: Vec<Rc<RenderedRoute>> = Vec::new();
        loop {
            let parent = chain.last().map(|rendered| &rendered.context);
            let Some(next) = self.resolve(snapshot, parent)? else {
                break;
            };
            let errored = next.error().is_some();
            chain.push(next);
            if errored {
                break;
            }
        }
        Ok(chain)
    }

    /// Hands a render error from the route at `context` to the nearest
    /// installed boundary at or above it and returns that boundary's route.
    ///
    /// Errors thrown by an error element itself belong to the boundary above;
    /// capture those from the parent context.
    pub fn capture(
        &mut self,
        context: &RouteContext,
        error: RouteError,
    ) -> Result<RouteId, OutletError> {
        let snapshot = context.snapshot();
        let limit = error_limit(snapshot)?;
        let index = (0..=context.index())
            .rev()
            .find(|&i| installs_boundary(&snapshot.matches[i].route, i, limit))
            .unwrap_or(0);
        let route_id = snapshot.matches[index].id().clone();
        if self.log_render_errors {
            error!(
                route = %route_id,
                thrown_by = %context.id(),
                %error,
                "caught the following error during render"
            );
        }
        self.ladder
            .capture(&route_id, context.location_key(), error);
        self.resolved.clear();
        Ok(route_id)
    }

    /// The error the boundary at `context` displays, if it is errored.
    ///
    /// Render errors captured by the boundary come first, then the error the
    /// snapshot reports for the route.
    #[must_use]
    pub fn route_error<'a>(&'a self, context: &'a RouteContext) -> Option<&'a RouteError> {
        self.ladder
            .active(context.id().as_str(), context.location_key())
            .map(|active| &active.error)
            .or_else(|| context.snapshot().error(context.id().as_str()))
    }

    fn observe(&mut self, snapshot: &Rc<RouterSnapshot>) {
        if self
            .snapshot
            .as_ref()
            .is_some_and(|seen| Rc::ptr_eq(seen, snapshot))
        {
            return;
        }
        self.ladder.retain_matched(snapshot);
        self.resolved.clear();
        self.snapshot = Some(Rc::clone(snapshot));
    }
}
