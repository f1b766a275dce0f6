// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Outlet resolution and boundary behavior across snapshots.

use std::rc::Rc;

use arbor_engine::{ErrorResponse, Location, Match, Route, RouteError, RouterSnapshot};
use arbor_outlet::{
    Content, DEFAULT_ERROR_HEADING, ErrorElement, ErrorSource, OutletError, OutletResolver,
};
use proptest::prelude::*;
use serde_json::json;
use tracing_test::traced_test;

fn root() -> Route {
    Route::new("0").with_path("/").with_element("Root")
}

fn parent() -> Route {
    Route::new("0-1")
        .with_path("parent")
        .with_element("Parent")
        .with_error_element("ParentError")
}

fn at(key: &str) -> arbor_engine::SnapshotBuilder {
    RouterSnapshot::builder(Location::new("/parent", key))
        .push_match(Match::new(root(), "/"))
        .push_match(Match::new(parent(), "/parent"))
}

#[test]
fn scenario_a_walks_root_to_leaf() {
    let snapshot = Rc::new(
        at("k1")
            .loader_data("0-1", json!("parent loader data"))
            .build(),
    );
    let mut resolver = OutletResolver::new();

    let first = resolver.resolve(&snapshot, None).unwrap().unwrap();
    assert_eq!(first.context.id(), "0");
    assert_eq!(first.content, Content::Element(Some("Root".into())));
    assert!(first.boundary);

    let second = resolver
        .resolve(&snapshot, Some(&first.context))
        .unwrap()
        .unwrap();
    assert_eq!(second.context.id(), "0-1");
    let data = snapshot.loader_data.get(second.context.id()).unwrap();
    assert_eq!(data.as_value(), Some(&json!("parent loader data")));

    assert_eq!(resolver.resolve(&snapshot, Some(&second.context)), Ok(None));
}

#[test]
fn scenario_b_errors_render_at_the_route_while_ancestors_render_normally() {
    let snapshot = Rc::new(
        at("k1")
            .error("0-1", RouteError::thrown("Loader error!"))
            .build(),
    );
    let mut resolver = OutletResolver::new();
    let chain = resolver.resolve_chain(&snapshot).unwrap();

    assert_eq!(chain.len(), 2);
    assert_eq!(chain[0].content, Content::Element(Some("Root".into())));
    let view = chain[1].error().unwrap();
    assert_eq!(view.element, ErrorElement::Custom("ParentError".into()));
    assert_eq!(view.error, RouteError::thrown("Loader error!"));
    assert_eq!(view.source, ErrorSource::Engine);
    assert_eq!(
        resolver.route_error(&chain[1].context),
        Some(&RouteError::thrown("Loader error!"))
    );
}

#[test]
fn matches_below_an_engine_error_are_not_rendered() {
    let snapshot = Rc::new(
        at("k1")
            .push_match(Match::new(
                Route::new("0-1-0").with_element("Child"),
                "/parent/child",
            ))
            .error("0-1", RouteError::thrown("Loader error!"))
            .build(),
    );
    let mut resolver = OutletResolver::new();
    let parent = resolver.resolve_chain(&snapshot).unwrap().pop().unwrap();
    assert_eq!(parent.context.id(), "0-1");
    assert_eq!(resolver.resolve(&snapshot, Some(&parent.context)), Ok(None));
}

#[test]
fn errors_without_an_error_element_use_the_default_ui() {
    let snapshot = Rc::new(
        RouterSnapshot::builder(Location::new("/", "k1"))
            .push_match(Match::new(root(), "/"))
            .error("0", ErrorResponse::new(404, "Not Found").into())
            .build(),
    );
    let mut resolver = OutletResolver::new();
    let rendered = resolver.resolve(&snapshot, None).unwrap().unwrap();
    let ErrorElement::Default(element) = &rendered.error().unwrap().element else {
        panic!("expected the default error element");
    };
    assert_eq!(element.heading, DEFAULT_ERROR_HEADING);
    assert_eq!(element.message, "404 Not Found");
}

#[test]
fn unknown_parents_fail_resolution() {
    let snapshot = Rc::new(at("k1").build());
    let other = Rc::new(
        RouterSnapshot::builder(Location::new("/elsewhere", "k9"))
            .push_match(Match::new(Route::new("9"), "/"))
            .build(),
    );
    let mut resolver = OutletResolver::new();
    let stray = resolver.resolve(&other, None).unwrap().unwrap();
    assert_eq!(
        resolver.resolve(&snapshot, Some(&stray.context)),
        Err(OutletError::NoMatchForRouteId {
            route_id: "9".into()
        })
    );
}

#[test]
fn errors_for_unmatched_routes_are_invariant_violations() {
    let snapshot = Rc::new(at("k1").error("ghost", RouteError::thrown("x")).build());
    let mut resolver = OutletResolver::new();
    assert!(matches!(
        resolver.resolve(&snapshot, None),
        Err(OutletError::InvariantViolation { .. })
    ));
}

#[traced_test]
#[test]
fn render_errors_bubble_to_the_nearest_boundary() {
    let snapshot = Rc::new(
        RouterSnapshot::builder(Location::new("/a/b", "k1"))
            .push_match(Match::new(root(), "/"))
            .push_match(Match::new(
                Route::new("0-0")
                    .with_element("A")
                    .with_error_element("AError"),
                "/a",
            ))
            .push_match(Match::new(Route::new("0-0-0").with_element("B"), "/a/b"))
            .build(),
    );
    let mut resolver = OutletResolver::new();
    let chain = resolver.resolve_chain(&snapshot).unwrap();
    assert_eq!(chain.len(), 3);
    assert!(!chain[2].boundary);

    let boundary = resolver
        .capture(&chain[2].context, RouteError::thrown("render failed"))
        .unwrap();
    assert_eq!(boundary, "0-0");
    assert!(logs_contain("caught the following error during render"));

    let chain = resolver.resolve_chain(&snapshot).unwrap();
    assert_eq!(chain.len(), 2);
    let view = chain[1].error().unwrap();
    assert_eq!(view.source, ErrorSource::Render);
    assert_eq!(view.element, ErrorElement::Custom("AError".into()));
}

#[test]
fn errored_boundaries_heal_on_navigation() {
    let first = Rc::new(at("k1").build());
    let mut resolver = OutletResolver::new();
    let chain = resolver.resolve_chain(&first).unwrap();
    resolver
        .capture(&chain[1].context, RouteError::thrown("render failed"))
        .unwrap();

    // Re-rendering at the same location keeps the error.
    let again = Rc::new(at("k1").build());
    assert!(resolver.resolve_chain(&again).unwrap()[1].error().is_some());

    // A new location key clears it.
    let moved = Rc::new(at("k2").build());
    assert!(resolver.resolve_chain(&moved).unwrap()[1].error().is_none());
}

#[test]
fn route_instances_are_keyed_by_location() {
    let mut resolver = OutletResolver::new();
    let first = resolver
        .resolve(&Rc::new(at("k1").build()), None)
        .unwrap()
        .unwrap();
    let second = resolver
        .resolve(&Rc::new(at("k2").build()), None)
        .unwrap()
        .unwrap();
    assert_eq!(first.key().route_id, second.key().route_id);
    assert_ne!(first.key(), second.key());
}

proptest! {
    #[test]
    fn resolution_is_idempotent_per_snapshot(depth in 1_usize..6, errored in proptest::option::of(0_usize..6)) {
        let mut builder = RouterSnapshot::builder(Location::new("/deep", "k1"));
        let mut id = String::from("0");
        for level in 0..depth {
            let mut route = Route::new(id.as_str()).with_element(format!("E{level}"));
            if level % 2 == 1 {
                route = route.with_error_element(format!("Err{level}"));
            }
            builder = builder.push_match(Match::new(route, format!("/{level}")));
            if errored == Some(level) {
                builder = builder.error(id.as_str(), RouteError::thrown("boom"));
            }
            id.push_str("-0");
        }
        let snapshot = Rc::new(builder.build());
        let mut resolver = OutletResolver::new();

        let first = resolver.resolve_chain(&snapshot).unwrap();
        let second = resolver.resolve_chain(&snapshot).unwrap();
        prop_assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            prop_assert!(Rc::ptr_eq(a, b));
        }
        let expected = errored.filter(|&e| e < depth).map_or(depth, |e| e + 1);
        prop_assert_eq!(first.len(), expected);
    }

    #[test]
    fn errored_boundaries_stay_errored_at_one_location(renders in 1_usize..8) {
        let mut resolver = OutletResolver::new();
        let seed = Rc::new(at("k1").error("0-1", RouteError::thrown("x")).build());
        prop_assert!(resolver.resolve_chain(&seed).unwrap()[1].error().is_some());
        for _ in 0..renders {
            let again = Rc::new(at("k1").build());
            prop_assert!(resolver.resolve_chain(&again).unwrap()[1].error().is_some());
        }
        let moved = Rc::new(at("k2").build());
        prop_assert!(resolver.resolve_chain(&moved).unwrap()[1].error().is_none());
    }
}
