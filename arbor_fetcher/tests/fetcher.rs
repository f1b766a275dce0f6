// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Fetcher lifecycles against a scripted engine.

use std::cell::RefCell;
use std::rc::Rc;

use arbor_engine::{
    FetcherStatus, FileBlob, FormData, FormMethod, Location, RouteId, RouterSnapshot,
};
use arbor_fetcher::{FetcherError, FetcherRegistry};
use arbor_memory::MemoryEngine;
use arbor_projector::{ConfigurationError, Projector};
use arbor_submit::{EncodingError, FormElement, SubmitOptions, SubmitTarget, SubmitterElement};
use hashbrown::HashSet;
use proptest::prelude::*;
use serde_json::json;
use tracing_test::traced_test;

fn setup() -> (Rc<MemoryEngine>, Projector, FetcherRegistry) {
    let engine = MemoryEngine::new(RouterSnapshot::builder(Location::new("/items", "k0")).build());
    let projector = Projector::attach(engine.clone());
    let registry = FetcherRegistry::new(
        projector.clone(),
        url::Url::parse("http://localhost").unwrap(),
    );
    (engine, projector, registry)
}

fn delete_button(id: &str) -> SubmitTarget {
    let form = FormElement::new()
        .with_method("post")
        .with_action("/items")
        .with_fields(FormData::new().with("id", id));
    SubmitterElement::in_form(form)
        .with_name_value("intent", "delete")
        .into()
}

#[test]
fn scenario_d_concurrent_fetchers_progress_independently() {
    let (engine, _projector, registry) = setup();
    let first = registry.create(RouteId::new("0-1"), "/items");
    let second = registry.create(RouteId::new("0-1"), "/items");

    first
        .submit(&delete_button("1"), &SubmitOptions::new())
        .unwrap();
    second
        .submit(&delete_button("2"), &SubmitOptions::new())
        .unwrap();
    assert_eq!(first.state().unwrap().state, FetcherStatus::Submitting);
    assert_eq!(second.state().unwrap().state, FetcherStatus::Submitting);

    // The second finishes first.
    engine.complete_fetcher(second.key(), json!({ "deleted": 2 }));
    assert_eq!(first.state().unwrap().state, FetcherStatus::Submitting);
    let done = second.state().unwrap();
    assert!(done.is_idle());
    assert_eq!(done.data, Some(json!({ "deleted": 2 })));

    engine.complete_fetcher(first.key(), json!({ "deleted": 1 }));
    assert!(first.state().unwrap().is_idle());

    let calls = engine.fetches();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].route_id, "0-1");
    assert_eq!(calls[0].href, "/items");
    let submission = calls[0].submission.as_ref().unwrap();
    assert_eq!(submission.form_method, FormMethod::Post);
    let body = submission.form_data.as_ref().unwrap();
    assert_eq!(body.get("intent").and_then(|v| v.as_text()), Some("delete"));

    first.dispose();
    second.dispose();
}

#[test]
fn submissions_do_not_touch_primary_navigation() {
    let (engine, projector, registry) = setup();
    let fetcher = registry.create(RouteId::new("0"), "/items");
    fetcher.load("/items?page=2").unwrap();
    assert!(projector.snapshot().unwrap().navigation.is_idle());
    assert!(engine.navigations().is_empty());
    fetcher.dispose();
}

#[test]
fn watchers_see_every_change_for_their_key() {
    let (engine, _projector, registry) = setup();
    let fetcher = registry.create(RouteId::new("0"), "/items");
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let _watch = fetcher.watch(move |state| sink.borrow_mut().push(state.state));

    fetcher.load("/items").unwrap();
    engine.complete_fetcher(fetcher.key(), json!([]));
    assert_eq!(
        *seen.borrow(),
        [FetcherStatus::Loading, FetcherStatus::Idle]
    );
    fetcher.dispose();
}

#[test]
fn dispose_is_idempotent_and_isolated() {
    let (engine, _projector, registry) = setup();
    let kept = registry.create(RouteId::new("0"), "/");
    let gone = registry.create(RouteId::new("0"), "/");
    gone.dispose();
    gone.dispose();

    assert_eq!(engine.deleted_fetchers(), [gone.key().clone()]);
    assert_eq!(registry.live_keys(), [kept.key().clone()]);
    assert_eq!(
        gone.load("/"),
        Err(FetcherError::Disposed {
            key: gone.key().clone()
        })
    );
    assert!(kept.load("/").is_ok());
    kept.dispose();
}

#[traced_test]
#[test]
fn dropping_an_undisposed_fetcher_cleans_up() {
    let (engine, _projector, registry) = setup();
    let key = {
        let fetcher = registry.create(RouteId::new("0"), "/");
        fetcher.key().clone()
    };
    assert_eq!(engine.deleted_fetchers(), [key]);
    assert!(registry.is_empty());
    assert!(logs_contain("fetcher dropped without dispose"));
}

#[traced_test]
#[test]
fn disposed_fetchers_drop_quietly() {
    let (engine, _projector, registry) = setup();
    let fetcher = registry.create(RouteId::new("0"), "/");
    fetcher.dispose();
    drop(fetcher);
    assert_eq!(engine.deleted_fetchers().len(), 1);
    assert!(!logs_contain("fetcher dropped without dispose"));
}

#[test]
fn encoding_errors_reach_the_caller() {
    let (engine, _projector, registry) = setup();
    let fetcher = registry.create(RouteId::new("0"), "/upload");
    let data = FormData::new().with("file", FileBlob::new("a.png", vec![1_u8]));
    let result = fetcher.submit(&data.into(), &SubmitOptions::new().method(FormMethod::Get));
    assert_eq!(
        result,
        Err(FetcherError::Encoding(EncodingError::BinaryGet {
            name: "file".to_owned()
        }))
    );
    assert!(engine.fetches().is_empty());
    fetcher.dispose();
}

#[test]
fn detached_routers_reject_fetches() {
    let (_engine, projector, registry) = setup();
    let fetcher = registry.create(RouteId::new("0"), "/");
    projector.detach();
    assert_eq!(
        fetcher.load("/"),
        Err(FetcherError::Configuration(ConfigurationError::Disposed))
    );
    fetcher.dispose();
}

proptest! {
    #[test]
    fn keys_are_unique_and_disposal_is_isolated(count in 1_usize..24, victim in 0_usize..24) {
        let (_engine, _projector, registry) = setup();
        let fetchers: Vec<_> = (0..count)
            .map(|_| registry.create(RouteId::new("0"), "/"))
            .collect();
        let keys: HashSet<_> = fetchers.iter().map(|f| f.key().clone()).collect();
        prop_assert_eq!(keys.len(), count);

        let victim = victim % count;
        fetchers[victim].dispose();
        prop_assert_eq!(registry.len(), count - 1);
        for (index, fetcher) in fetchers.iter().enumerate() {
            prop_assert_eq!(fetcher.is_disposed(), index == victim);
        }
        for fetcher in &fetchers {
            fetcher.dispose();
        }
    }
}
