// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Notification and tearing behavior of the projector.

use std::cell::RefCell;
use std::rc::Rc;

use arbor_engine::{Location, RouterSnapshot};
use arbor_memory::MemoryEngine;
use arbor_projector::{ConfigurationError, Projector, current, current_snapshot};
use proptest::prelude::*;
use tracing_test::traced_test;

fn at(pathname: &str, key: &str) -> RouterSnapshot {
    RouterSnapshot::builder(Location::new(pathname, key)).build()
}

#[test]
fn seeds_from_engine_state() {
    let engine = MemoryEngine::new(at("/start", "k0"));
    let projector = Projector::attach(engine.clone());
    assert_eq!(projector.snapshot().unwrap().location.pathname, "/start");
    assert_eq!(projector.generation(), 0);
    assert_eq!(engine.listener_count(), 1);
}

#[test]
fn one_notification_per_engine_change() {
    let engine = MemoryEngine::new(at("/", "k0"));
    let projector = Projector::attach(engine.clone());
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    let _a = projector.subscribe(move |_| *sink.borrow_mut() += 1);

    for i in 1..=3 {
        engine.publish(at("/", &format!("k{i}")));
    }
    assert_eq!(*count.borrow(), 3);
    assert_eq!(projector.generation(), 3);
}

#[test]
fn clones_share_one_engine_subscription() {
    let engine = MemoryEngine::new(at("/", "k0"));
    let projector = Projector::attach(engine.clone());
    let other = projector.clone();
    engine.publish(at("/x", "k1"));
    assert_eq!(other.snapshot().unwrap().location.key, "k1");
    assert_eq!(engine.listener_count(), 1);
}

#[test]
fn dropping_a_subscription_stops_notifications() {
    let engine = MemoryEngine::new(at("/", "k0"));
    let projector = Projector::attach(engine.clone());
    let count = Rc::new(RefCell::new(0));
    let sink = Rc::clone(&count);
    let subscription = projector.subscribe(move |_| *sink.borrow_mut() += 1);
    engine.publish(at("/", "k1"));
    drop(subscription);
    engine.publish(at("/", "k2"));
    assert_eq!(*count.borrow(), 1);
    assert_eq!(projector.listener_count(), 0);
}

#[test]
fn publishes_from_inside_a_listener_are_delivered_in_order() {
    let engine = MemoryEngine::new(at("/", "k0"));
    let projector = Projector::attach(engine.clone());

    let trigger = Rc::clone(&engine);
    let _first = projector.subscribe(move |snapshot| {
        if snapshot.location.key == "k1" {
            trigger.publish(at("/redirected", "k2"));
        }
    });

    let observed = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&observed);
    let reader = projector.clone();
    let _second = projector.subscribe(move |snapshot| {
        let current = reader.snapshot().unwrap();
        sink.borrow_mut()
            .push((snapshot.location.key.clone(), current.location.key.clone()));
    });

    engine.publish(at("/", "k1"));

    assert_eq!(
        *observed.borrow(),
        [
            ("k1".to_owned(), "k1".to_owned()),
            ("k2".to_owned(), "k2".to_owned()),
        ]
    );
    assert_eq!(projector.generation(), 2);
}

#[test]
fn detach_releases_the_engine_and_reports_disposed() {
    let engine = MemoryEngine::new(at("/", "k0"));
    let projector = Projector::attach(engine.clone());
    projector.detach();
    projector.detach();
    assert_eq!(engine.listener_count(), 0);
    assert_eq!(projector.snapshot(), Err(ConfigurationError::Disposed));
    assert!(!projector.is_attached());
}

#[test]
fn scope_lookup_requires_a_provider() {
    assert_eq!(
        current().unwrap_err(),
        ConfigurationError::OutsideRouterScope
    );

    let engine = MemoryEngine::new(at("/outer", "k0"));
    let outer = Projector::attach(engine);
    let inner_engine = MemoryEngine::new(at("/inner", "k0"));
    let inner = Projector::attach(inner_engine);
    {
        let _outer = outer.enter();
        assert_eq!(current_snapshot().unwrap().location.pathname, "/outer");
        {
            let _inner = inner.enter();
            assert_eq!(current_snapshot().unwrap().location.pathname, "/inner");
        }
        assert_eq!(current_snapshot().unwrap().location.pathname, "/outer");
    }
    assert_eq!(
        current_snapshot().unwrap_err(),
        ConfigurationError::OutsideRouterScope
    );
}

#[traced_test]
#[test]
fn logs_publications() {
    let engine = MemoryEngine::new(at("/", "k0"));
    let projector = Projector::attach(engine.clone());
    engine.publish(at("/logged", "k-logged"));
    assert_eq!(projector.generation(), 1);
    assert!(logs_contain("snapshot published"));
}

proptest! {
    #[test]
    fn every_listener_reads_the_snapshot_it_is_notified_with(
        listeners in 1_usize..6,
        publications in 1_usize..12,
    ) {
        let engine = MemoryEngine::new(at("/", "k0"));
        let projector = Projector::attach(engine.clone());
        let torn = Rc::new(RefCell::new(0_usize));
        let delivered = Rc::new(RefCell::new(0_usize));
        let mut subscriptions = Vec::new();
        for _ in 0..listeners {
            let reader = projector.clone();
            let torn = Rc::clone(&torn);
            let delivered = Rc::clone(&delivered);
            subscriptions.push(projector.subscribe(move |snapshot| {
                *delivered.borrow_mut() += 1;
                if !Rc::ptr_eq(&reader.snapshot().unwrap(), snapshot) {
                    *torn.borrow_mut() += 1;
                }
            }));
        }
        for i in 0..publications {
            engine.publish(at("/", &format!("k{}", i + 1)));
        }
        prop_assert_eq!(*torn.borrow(), 0);
        prop_assert_eq!(*delivered.borrow(), listeners * publications);
        prop_assert_eq!(projector.generation(), publications as u64);
    }
}
