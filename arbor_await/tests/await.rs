// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Await lifecycles driven by a local executor.

use std::cell::RefCell;
use std::rc::Rc;

use arbor_await::{Await, Awaited, Suspend, Tracker};
use arbor_engine::{Promise, Resolve, RouteError};
use futures::executor::LocalPool;
use futures::task::LocalSpawnExt;
use proptest::prelude::*;
use serde_json::{Value, json};
use tracing_test::traced_test;

#[derive(Debug, PartialEq)]
enum View {
    Fallback,
    Data(Value),
    Error(String),
}

fn render(instance: &mut Await, tracker: &Tracker, resolve: &Resolve) -> (View, Option<Suspend>) {
    match instance.render_or_else(
        tracker,
        resolve,
        |value| Ok(View::Data(value.clone())),
        |error| View::Error(error.to_string()),
    ) {
        Ok(Awaited::Rendered(view)) => (view, None),
        Ok(Awaited::Suspended(suspend)) => (View::Fallback, Some(suspend)),
        Err(error) => panic!("error element should have handled {error}"),
    }
}

#[test]
fn scenario_c_siblings_settle_independently() {
    let mut pool = LocalPool::new();
    let spawner = pool.spawner();
    let tracker = Tracker::new();

    let (data, settle_data) = Promise::pending();
    let (failure, settle_failure) = Promise::pending();
    let data = Resolve::Promise(data);
    let failure = Resolve::Promise(failure);
    let mut first = Await::new();
    let mut second = Await::new();

    let (view, suspend) = render(&mut first, &tracker, &data);
    assert_eq!(view, View::Fallback);
    spawner.spawn_local(suspend.unwrap()).unwrap();
    let (view, suspend) = render(&mut second, &tracker, &failure);
    assert_eq!(view, View::Fallback);
    spawner.spawn_local(suspend.unwrap()).unwrap();
    pool.run_until_stalled();

    settle_data.resolve(json!("Lazy Data ✅"));
    pool.run_until_stalled();
    assert_eq!(
        render(&mut first, &tracker, &data).0,
        View::Data(json!("Lazy Data ✅"))
    );
    assert_eq!(render(&mut second, &tracker, &failure).0, View::Fallback);

    settle_failure.reject(RouteError::thrown("Lazy Error 💥"));
    pool.run_until_stalled();
    assert_eq!(
        render(&mut second, &tracker, &failure).0,
        View::Error("Lazy Error 💥".to_owned())
    );
    assert_eq!(tracker.attachments(), 2);
}

#[traced_test]
#[test]
fn aborted_values_freeze_the_instance() {
    let mut pool = LocalPool::new();
    let tracker = Tracker::new();
    let (promise, settle) = Promise::pending();
    let resolve = Resolve::Promise(promise);
    let mut instance = Await::new();

    let (_, suspend) = render(&mut instance, &tracker, &resolve);
    let woke = Rc::new(RefCell::new(false));
    let flag = Rc::clone(&woke);
    pool.spawner()
        .spawn_local(async move {
            suspend.unwrap().await;
            *flag.borrow_mut() = true;
        })
        .unwrap();
    settle.abort();
    pool.run_until_stalled();
    assert!(*woke.borrow());

    let (view, suspend) = render(&mut instance, &tracker, &resolve);
    assert_eq!(view, View::Fallback);
    assert!(suspend.unwrap().is_forever());
    assert!(instance.is_frozen());
    assert!(logs_contain("deferred value aborted"));

    // Even a value that is ready now stays behind the fallback.
    let (view, _) = render(&mut instance, &tracker, &Resolve::Value(json!("late")));
    assert_eq!(view, View::Fallback);

    // A fresh instance starts clean.
    let mut fresh = Await::new();
    assert_eq!(
        render(&mut fresh, &tracker, &Resolve::Value(json!("late"))).0,
        View::Data(json!("late"))
    );
}

#[test]
fn dropped_settle_handles_abort() {
    let mut pool = LocalPool::new();
    let tracker = Tracker::new();
    let (promise, settle) = Promise::pending();
    let resolve = Resolve::Promise(promise);
    let mut instance = Await::new();
    let (_, suspend) = render(&mut instance, &tracker, &resolve);
    pool.spawner().spawn_local(suspend.unwrap()).unwrap();
    drop(settle);
    pool.run_until_stalled();
    let (_, suspend) = render(&mut instance, &tracker, &resolve);
    assert!(suspend.is_some_and(|s| s.is_forever()));
}

#[test]
fn rejections_bubble_without_an_error_element() {
    let mut pool = LocalPool::new();
    let tracker = Tracker::new();
    let (promise, settle) = Promise::pending();
    let resolve = Resolve::Promise(promise);
    let mut instance = Await::new();

    let Ok(Awaited::Suspended(suspend)) = instance.render(&tracker, &resolve, |_| Ok(())) else {
        panic!("expected suspension");
    };
    pool.spawner().spawn_local(suspend).unwrap();
    settle.reject(RouteError::thrown("boom"));
    pool.run_until_stalled();

    let result = instance.render(&tracker, &resolve, |_| Ok(()));
    assert_eq!(result.unwrap_err(), RouteError::thrown("boom"));
}

proptest! {
    #[test]
    fn one_attachment_per_promise(renders in 1_usize..10, instances in 1_usize..4) {
        let tracker = Tracker::new();
        let (promise, _settle) = Promise::pending();
        let mut awaits: Vec<Await> = (0..instances).map(|_| Await::new()).collect();
        for _ in 0..renders {
            for instance in &mut awaits {
                let resolve = Resolve::Promise(promise.clone());
                let outcome = instance.render(&tracker, &resolve, |_| Ok(())).unwrap();
                prop_assert!(outcome.is_suspended());
            }
        }
        prop_assert_eq!(tracker.attachments(), 1);
    }
}
