// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The `Await` primitive.

use arbor_engine::{PromiseId, Resolve, RouteError};
use serde_json::Value;
use tracing::{debug, error};

use crate::tracker::{Suspend, Tracked, Tracker};

/// Outcome of rendering an [`Await`].
#[derive(Debug)]
pub enum Awaited<R> {
    /// Children or the error element rendered.
    Rendered(R),
    /// Not ready; show the fallback until the future completes.
    Suspended(Suspend),
}

impl<R> Awaited<R> {
    /// The rendered output, if any.
    pub fn rendered(self) -> Option<R> {
        match self {
            Self::Rendered(output) => Some(output),
            Self::Suspended(_) => None,
        }
    }

    /// Whether the render suspended.
    pub fn is_suspended(&self) -> bool {
        matches!(self, Self::Suspended(_))
    }
}

/// State of one `Await` instance.
///
/// An instance belongs to one position in one route instance. Once its
/// deferred value reports an abort the instance is frozen: every later render
/// suspends forever. Errors its children return are remembered and shown
/// through the error element on every later render.
#[derive(Clone, Debug, Default)]
pub struct Await {
    frozen: bool,
    caught: Option<RouteError>,
    promise: Option<PromiseId>,
}

impl Await {
    /// A fresh instance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an abort froze this instance on its fallback.
    #[must_use]
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// The promise this instance last rendered, if its value was deferred.
    #[must_use]
    pub fn promise(&self) -> Option<PromiseId> {
        self.promise
    }

    /// Renders `children` with the resolved value.
    ///
    /// Without an error element, a rejection or a failing child render is
    /// returned as `Err` for the nearest boundary to capture.
    pub fn render<R>(
        &mut self,
        tracker: &Tracker,
        resolve: &Resolve,
        children: impl FnOnce(&Value) -> Result<R, RouteError>,
    ) -> Result<Awaited<R>, RouteError> {
        self.run(tracker, resolve, children, None::<fn(&RouteError) -> R>)
    }

    /// Renders `children` with the resolved value, or `error_element` with
    /// the error if the value was rejected or a child render failed.
    pub fn render_or_else<R>(
        &mut self,
        tracker: &Tracker,
        resolve: &Resolve,
        children: impl FnOnce(&Value) -> Result<R, RouteError>,
        error_element: impl FnOnce(&RouteError) -> R,
    ) -> Result<Awaited<R>, RouteError> {
        self.run(tracker, resolve, children, Some(error_element))
    }

    fn run<R>(
        &mut self,
        tracker: &Tracker,
        resolve: &Resolve,
        children: impl FnOnce(&Value) -> Result<R, RouteError>,
        error_element: Option<impl FnOnce(&RouteError) -> R>,
    ) -> Result<Awaited<R>, RouteError> {
        if let Resolve::Promise(promise) = resolve {
            self.promise = Some(promise.id());
        }
        if self.frozen {
            return Ok(Awaited::Suspended(Suspend::forever()));
        }
        if let Some(caught) = &self.caught {
            return show(caught.clone(), error_element);
        }
        match tracker.track(resolve) {
            Tracked::Pending(suspend) => Ok(Awaited::Suspended(suspend)),
            Tracked::Rejected(rejection) if rejection.is_aborted() => Ok(self.freeze()),
            Tracked::Rejected(rejection) => show(rejection, error_element),
            Tracked::Resolved(value) => match children(&value) {
                Ok(output) => Ok(Awaited::Rendered(output)),
                Err(thrown) if thrown.is_aborted() => Ok(self.freeze()),
                Err(thrown) => {
                    error!(%thrown, "<Await> caught the following error during render");
                    if error_element.is_some() {
                        self.caught = Some(thrown.clone());
                    }
                    show(thrown, error_element)
                }
            },
        }
    }

    fn freeze<R>(&mut self) -> Awaited<R> {
        debug!("deferred value aborted, holding fallback");
        self.frozen = true;
        Awaited::Suspended(Suspend::forever())
    }
}

fn show<R>(
    error: RouteError,
    error_element: Option<impl FnOnce(&RouteError) -> R>,
) -> Result<Awaited<R>, RouteError> {
    match error_element {
        Some(element) => Ok(Awaited::Rendered(element(&error))),
        None => Err(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_engine::Promise;
    use serde_json::json;

    #[test]
    fn non_promises_render_children_at_once() {
        let mut instance = Await::new();
        let output = instance
            .render(&Tracker::new(), &Resolve::Value(json!(1)), |v| {
                Ok(v.to_string())
            })
            .unwrap()
            .rendered();
        assert_eq!(output.as_deref(), Some("1"));
    }

    #[test]
    fn rejections_without_error_element_bubble() {
        let mut instance = Await::new();
        let promise = Promise::rejected(RouteError::thrown("x"));
        futures::executor::block_on(promise.settled()).unwrap_err();
        let resolve = Resolve::Promise(promise);
        let tracker = Tracker::new();
        let result = instance.render(&tracker, &resolve, |_| Ok(()));
        assert_eq!(result.unwrap_err(), RouteError::thrown("x"));
    }

    #[test]
    fn child_errors_stick_to_the_instance() {
        let mut instance = Await::new();
        let tracker = Tracker::new();
        let resolve = Resolve::Value(json!("v"));
        let first = instance
            .render_or_else(
                &tracker,
                &resolve,
                |_| Err::<String, _>(RouteError::thrown("child failed")),
                |e| format!("caught: {e}"),
            )
            .unwrap()
            .rendered();
        assert_eq!(first.as_deref(), Some("caught: child failed"));

        let second = instance
            .render_or_else(
                &tracker,
                &resolve,
                |v| Ok(v.to_string()),
                |e| format!("caught: {e}"),
            )
            .unwrap()
            .rendered();
        assert_eq!(second.as_deref(), Some("caught: child failed"));
    }
}
