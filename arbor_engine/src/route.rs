// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Static route definitions and the matches that pair them with a location.

use std::borrow::{Borrow, Cow};
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde_json::Value;

/// Stable identifier of a route definition.
///
/// Cheap to clone; borrows as `str` so maps keyed by `RouteId` can be queried
/// with string slices.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RouteId(Rc<str>);

impl RouteId {
    /// Creates a route id from any string-like value.
    #[must_use]
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Rc::from(id.as_ref()))
    }

    /// Returns the id as a string slice.
    #[must_use]
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for RouteId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RouteId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for RouteId {
    fn from(id: String) -> Self {
        Self(Rc::from(id))
    }
}

impl PartialEq<str> for RouteId {
    fn eq(&self, other: &str) -> bool {
        &*self.0 == other
    }
}

impl PartialEq<&str> for RouteId {
    fn eq(&self, other: &&str) -> bool {
        &*self.0 == *other
    }
}

/// Opaque reference to a host component.
///
/// The adapter never renders components itself; it tells the host *which*
/// element to render and the host resolves the name to its own component type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ElementRef(Cow<'static, str>);

impl ElementRef {
    /// Creates a reference from a component name.
    #[must_use]
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self(name.into())
    }

    /// Returns the component name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for ElementRef {
    fn from(name: &'static str) -> Self {
        Self(Cow::Borrowed(name))
    }
}

impl From<String> for ElementRef {
    fn from(name: String) -> Self {
        Self(Cow::Owned(name))
    }
}

/// A static route definition as known to the engine.
#[derive(Clone, Debug, PartialEq)]
pub struct Route {
    /// Unique id of the route.
    pub id: RouteId,
    /// Path pattern, `None` for pathless layout routes.
    pub path: Option<String>,
    /// Whether this is an index route.
    pub index: bool,
    /// Element rendered for the route; `None` renders the child outlet in place.
    pub element: Option<ElementRef>,
    /// Element rendered when this route's boundary holds an error.
    pub error_element: Option<ElementRef>,
    /// Arbitrary data exposed through the matches accessor.
    pub handle: Option<Value>,
}

impl Route {
    /// Creates a pathless route with no element.
    #[must_use]
    pub fn new(id: impl Into<RouteId>) -> Self {
        Self {
            id: id.into(),
            path: None,
            index: false,
            element: None,
            error_element: None,
            handle: None,
        }
    }

    /// Sets the path pattern.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Marks the route as an index route.
    #[must_use]
    pub fn as_index(mut self) -> Self {
        self.index = true;
        self
    }

    /// Sets the element.
    #[must_use]
    pub fn with_element(mut self, element: impl Into<ElementRef>) -> Self {
        self.element = Some(element.into());
        self
    }

    /// Sets the error element.
    #[must_use]
    pub fn with_error_element(mut self, element: impl Into<ElementRef>) -> Self {
        self.error_element = Some(element.into());
        self
    }

    /// Sets the route handle.
    #[must_use]
    pub fn with_handle(mut self, handle: Value) -> Self {
        self.handle = Some(handle);
        self
    }

    /// Whether the route declares its own error boundary.
    ///
    /// A route has a boundary exactly when it declares an error element.
    #[must_use]
    pub fn has_error_boundary(&self) -> bool {
        self.error_element.is_some()
    }
}

/// A route paired with the concrete path segment it matched.
///
/// Matches are ordered root to leaf inside a snapshot; only the position in
/// that sequence carries hierarchy.
#[derive(Clone, Debug, PartialEq)]
pub struct Match {
    /// The matched route definition, shared across snapshots.
    pub route: Rc<Route>,
    /// The portion of the pathname matched by this route.
    pub pathname: String,
    /// The matched pathname before any child routes.
    pub pathname_base: String,
    /// Dynamic params parsed from the URL.
    pub params: BTreeMap<String, String>,
}

impl Match {
    /// Creates a match whose pathname and base are equal and that has no params.
    #[must_use]
    pub fn new(route: impl Into<Rc<Route>>, pathname: impl Into<String>) -> Self {
        let pathname = pathname.into();
        Self {
            route: route.into(),
            pathname_base: pathname.clone(),
            pathname,
            params: BTreeMap::new(),
        }
    }

    /// Sets the pathname base.
    #[must_use]
    pub fn with_pathname_base(mut self, base: impl Into<String>) -> Self {
        self.pathname_base = base.into();
        self
    }

    /// Adds a URL param.
    #[must_use]
    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    /// Shorthand for `self.route.id`.
    #[must_use]
    #[inline]
    pub fn id(&self) -> &RouteId {
        &self.route.id
    }
}
