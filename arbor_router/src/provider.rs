// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The router provider.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::Rc;

use arbor_await::{Await, Awaited, Tracker};
use arbor_engine::{
    ElementRef, FetcherState, Location, Navigation, NavigationType, PromiseId, Resolve, RouteData,
    RouteError, RouteId, RouterEngine, RouterSnapshot,
};
use arbor_fetcher::FetcherRegistry;
use arbor_outlet::{InstanceKey, OutletResolver, RenderedRoute, RouteContext};
use arbor_projector::{ConfigurationError, Projector, ScopeGuard};
use hashbrown::{HashMap, HashSet};
use serde_json::Value;
use tracing::{debug, warn};
use url::Url;

use crate::config::RouterConfig;
use crate::error::RouterError;

/// What the provider renders at the root.
#[derive(Clone, Debug, PartialEq)]
pub enum RootView {
    /// The engine has not finished its initial load.
    Fallback(Option<ElementRef>),
    /// The root route, or nothing when no route matched.
    Routes(Option<Rc<RenderedRoute>>),
}

/// One entry of the matches accessor.
#[derive(Clone, Debug, PartialEq)]
pub struct UiMatch {
    /// Route id.
    pub id: RouteId,
    /// Matched pathname.
    pub pathname: String,
    /// URL params.
    pub params: std::collections::BTreeMap<String, String>,
    /// Loader data for the route.
    pub data: Option<RouteData>,
    /// The route's handle.
    pub handle: Option<Value>,
}

#[derive(Clone, Debug)]
enum AsyncOutcome {
    Value(Value),
    Error(RouteError),
}

/// Installs the projector, the root outlet, and the per-router registries.
///
/// Every accessor reads the projector's latest snapshot. Dropping the
/// provider disposes it.
pub struct RouterProvider {
    pub(crate) projector: Projector,
    pub(crate) origin: Url,
    pub(crate) fetchers: FetcherRegistry,
    config: RouterConfig,
    resolver: RefCell<OutletResolver>,
    tracker: Tracker,
    awaits: RefCell<HashMap<(InstanceKey, String), Await>>,
    async_scope: RefCell<Vec<AsyncOutcome>>,
    disposed: Cell<bool>,
}

impl RouterProvider {
    /// Attaches to `engine`.
    pub fn new(engine: Rc<dyn RouterEngine>, config: RouterConfig) -> Result<Self, RouterError> {
        let origin = Url::parse(&config.origin).map_err(|source| RouterError::InvalidOrigin {
            origin: config.origin.clone(),
            source,
        })?;
        let projector = Projector::attach(engine);
        Ok(Self {
            fetchers: FetcherRegistry::new(projector.clone(), origin.clone()),
            resolver: RefCell::new(
                OutletResolver::new().with_render_error_logging(config.log_render_errors),
            ),
            projector,
            origin,
            config,
            tracker: Tracker::new(),
            awaits: RefCell::new(HashMap::new()),
            async_scope: RefCell::new(Vec::new()),
            disposed: Cell::new(false),
        })
    }

    /// The provider's projector.
    #[must_use]
    pub fn projector(&self) -> &Projector {
        &self.projector
    }

    /// The configuration the provider was created with.
    #[must_use]
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// Makes this router the ambient one while the guard lives.
    pub fn enter(&self) -> ScopeGuard {
        self.projector.enter()
    }

    /// The latest snapshot.
    pub fn snapshot(&self) -> Result<Rc<RouterSnapshot>, ConfigurationError> {
        self.projector.snapshot()
    }

    /// The fetcher registry.
    #[must_use]
    pub fn fetcher_registry(&self) -> &FetcherRegistry {
        &self.fetchers
    }

    /// The deferred value tracker.
    #[must_use]
    pub fn tracker(&self) -> &Tracker {
        &self.tracker
    }

    /// Renders the root: the fallback until the engine is initialized, then
    /// the root outlet.
    pub fn render(&self) -> Result<RootView, RouterError> {
        let snapshot = self.snapshot()?;
        if !snapshot.initialized {
            return Ok(RootView::Fallback(self.config.fallback.clone()));
        }
        self.retain_awaits(&snapshot);
        let root = self.resolver.borrow_mut().resolve(&snapshot, None)?;
        Ok(RootView::Routes(root))
    }

    /// Renders the outlet below the route at `parent`.
    pub fn outlet(&self, parent: &RouteContext) -> Result<Option<Rc<RenderedRoute>>, RouterError> {
        let snapshot = self.snapshot()?;
        Ok(self
            .resolver
            .borrow_mut()
            .resolve(&snapshot, Some(parent))?)
    }

    /// Hands a render error thrown by the route at `context` to the nearest
    /// boundary and returns that boundary's route id. The host re-renders
    /// from the boundary's parent outlet.
    pub fn capture(
        &self,
        context: &RouteContext,
        error: RouteError,
    ) -> Result<RouteId, RouterError> {
        Ok(self.resolver.borrow_mut().capture(context, error)?)
    }

    /// Renders an `Await` at position `slot` inside the route at `context`.
    ///
    /// Errors without an error element come back as `Err` for
    /// [`RouterProvider::capture`].
    pub fn render_await<R>(
        &self,
        context: &RouteContext,
        slot: &str,
        resolve: &Resolve,
        children: impl FnOnce(&Value) -> Result<R, RouteError>,
    ) -> Result<Awaited<R>, RouteError> {
        let key = (context.instance_key(), slot.to_owned());
        let mut instance = self.awaits.borrow_mut().remove(&key).unwrap_or_default();
        let outcome = instance.render(&self.tracker, resolve, |value| {
            self.scoped(AsyncOutcome::Value(value.clone()), || children(value))
        });
        self.awaits.borrow_mut().insert(key, instance);
        outcome
    }

    /// Renders an `Await` with an error element at position `slot` inside
    /// the route at `context`.
    pub fn render_await_or_else<R>(
        &self,
        context: &RouteContext,
        slot: &str,
        resolve: &Resolve,
        children: impl FnOnce(&Value) -> Result<R, RouteError>,
        error_element: impl FnOnce(&RouteError) -> R,
    ) -> Result<Awaited<R>, RouteError> {
        let key = (context.instance_key(), slot.to_owned());
        let mut instance = self.awaits.borrow_mut().remove(&key).unwrap_or_default();
        let outcome = instance.render_or_else(
            &self.tracker,
            resolve,
            |value| self.scoped(AsyncOutcome::Value(value.clone()), || children(value)),
            |error| self.scoped(AsyncOutcome::Error(error.clone()), || error_element(error)),
        );
        self.awaits.borrow_mut().insert(key, instance);
        outcome
    }

    /// The resolved value of the innermost `Await` being rendered.
    #[must_use]
    pub fn async_value(&self) -> Option<Value> {
        match self.async_scope.borrow().last()? {
            AsyncOutcome::Value(value) => Some(value.clone()),
            AsyncOutcome::Error(_) => None,
        }
    }

    /// The error of the innermost `Await` rendering its error element.
    #[must_use]
    pub fn async_error(&self) -> Option<RouteError> {
        match self.async_scope.borrow().last()? {
            AsyncOutcome::Error(error) => Some(error.clone()),
            AsyncOutcome::Value(_) => None,
        }
    }

    /// Current location.
    pub fn location(&self) -> Result<Location, RouterError> {
        Ok(self.snapshot()?.location.clone())
    }

    /// How the current location was reached.
    pub fn navigation_type(&self) -> Result<NavigationType, RouterError> {
        Ok(self.snapshot()?.navigation_type)
    }

    /// The in-flight navigation.
    pub fn navigation(&self) -> Result<Navigation, RouterError> {
        Ok(self.snapshot()?.navigation.clone())
    }

    /// Matches from the root down to the route at `context`.
    #[must_use]
    pub fn matches(&self, context: &RouteContext) -> Vec<UiMatch> {
        let snapshot = context.snapshot();
        context
            .matches()
            .iter()
            .map(|m| UiMatch {
                id: m.id().clone(),
                pathname: m.pathname.clone(),
                params: m.params.clone(),
                data: snapshot.loader_data.get(m.id()).cloned(),
                handle: m.route.handle.clone(),
            })
            .collect()
    }

    /// Loader data of the route at `context`.
    #[must_use]
    pub fn loader_data(&self, context: &RouteContext) -> Option<RouteData> {
        context.snapshot().loader_data.get(context.id()).cloned()
    }

    /// Loader data of any matched route, from the latest snapshot.
    pub fn route_loader_data(&self, route_id: &str) -> Result<Option<RouteData>, RouterError> {
        Ok(self.snapshot()?.loader_data.get(route_id).cloned())
    }

    /// Action data of the route at `context`.
    #[must_use]
    pub fn action_data(&self, context: &RouteContext) -> Option<Value> {
        context
            .snapshot()
            .action_data
            .as_ref()
            .and_then(|data| data.get(context.id()))
            .cloned()
    }

    /// The error shown by the boundary at `context`: a captured render error
    /// first, then the error the engine reports for the route.
    #[must_use]
    pub fn route_error(&self, context: &RouteContext) -> Option<RouteError> {
        self.resolver.borrow().route_error(context).cloned()
    }

    /// All fetchers the engine knows about.
    pub fn fetchers(&self) -> Result<Vec<FetcherState>, RouterError> {
        let snapshot = self.snapshot()?;
        let mut fetchers: Vec<_> = snapshot.fetchers.values().cloned().collect();
        fetchers.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(fetchers)
    }

    /// The href the engine would use for `to`.
    pub fn href(&self, to: &str) -> Result<String, RouterError> {
        let engine = self.engine()?;
        Ok(engine.create_href(&parse_path(to)))
    }

    /// Releases the projector and disposes the engine. Later calls only warn.
    pub fn dispose(&self) {
        if self.disposed.replace(true) {
            warn!("router provider disposed twice");
            return;
        }
        let engine = Rc::clone(self.projector.engine());
        self.projector.detach();
        engine.dispose();
        self.awaits.borrow_mut().clear();
        debug!("router provider disposed");
    }

    /// Whether [`RouterProvider::dispose`] has run.
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.disposed.get()
    }

    pub(crate) fn engine(&self) -> Result<Rc<dyn RouterEngine>, ConfigurationError> {
        if self.disposed.get() {
            return Err(ConfigurationError::Disposed);
        }
        Ok(Rc::clone(self.projector.engine()))
    }

    fn scoped<T>(&self, outcome: AsyncOutcome, render: impl FnOnce() -> T) -> T {
        self.async_scope.borrow_mut().push(outcome);
        let output = render();
        self.async_scope.borrow_mut().pop();
        output
    }

    /// Drops `Await` instances from other locations and the deferred values
    /// only they were tracking.
    fn retain_awaits(&self, snapshot: &RouterSnapshot) {
        let key = snapshot.location.key.as_str();
        let mut awaits = self.awaits.borrow_mut();
        awaits.retain(|(instance, _), _| instance.location_key == key);
        let live: HashSet<PromiseId> = awaits.values().filter_map(Await::promise).collect();
        self.tracker.retain(|id| live.contains(&id));
    }
}

impl Drop for RouterProvider {
    fn drop(&mut self) {
        if !self.disposed.get() {
            self.dispose();
        }
    }
}

impl fmt::Debug for RouterProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouterProvider")
            .field("projector", &self.projector)
            .field("origin", &self.origin.as_str())
            .field("disposed", &self.disposed.get())
            .finish_non_exhaustive()
    }
}

/// Splits an href into a location (with an empty key).
pub(crate) fn parse_path(to: &str) -> Location {
    let (rest, hash) = match to.find('#') {
        Some(at) => to.split_at(at),
        None => (to, ""),
    };
    let (pathname, search) = match rest.find('?') {
        Some(at) => rest.split_at(at),
        None => (rest, ""),
    };
    Location::new(pathname, "")
        .with_search(search)
        .with_hash(hash)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_split_into_parts() {
        let location = parse_path("/a/b?x=1#top");
        assert_eq!(location.pathname, "/a/b");
        assert_eq!(location.search, "?x=1");
        assert_eq!(location.hash, "#top");
        assert_eq!(parse_path("/only").path(), "/only");
    }
}
