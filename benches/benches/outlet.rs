// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::rc::Rc;

use arbor_engine::{Location, Match, Route, RouteError, RouterSnapshot};
use arbor_outlet::OutletResolver;
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use serde_json::json;

fn deep_snapshot(depth: usize, key: &str, error_at: Option<usize>) -> RouterSnapshot {
    let mut builder = RouterSnapshot::builder(Location::new("/deep", key));
    let mut pathname = String::new();
    for i in 0..depth {
        pathname.push_str(&format!("/{i}"));
        let mut route = Route::new(format!("r{i}"))
            .with_path(i.to_string())
            .with_element(format!("E{i}"));
        // Every fourth route guards its subtree.
        if i % 4 == 3 {
            route = route.with_error_element(format!("Err{i}"));
        }
        builder = builder
            .push_match(Match::new(route, pathname.clone()))
            .loader_data(format!("r{i}"), json!(i));
    }
    if let Some(at) = error_at {
        builder = builder.error(format!("r{at}"), RouteError::thrown("boom"));
    }
    builder.build()
}

fn bench_outlet(c: &mut Criterion) {
    let mut group = c.benchmark_group("arbor_outlet");

    for &depth in &[4_usize, 16, 64] {
        let snapshot = Rc::new(deep_snapshot(depth, "k", None));
        group.bench_function(format!("resolve_chain_fresh(depth={depth})"), |b| {
            b.iter_batched(
                OutletResolver::new,
                |mut resolver| {
                    let chain = resolver.resolve_chain(&snapshot).expect("valid snapshot");
                    black_box(chain.len());
                },
                BatchSize::SmallInput,
            );
        });

        let mut warm = OutletResolver::new();
        let _ = warm.resolve_chain(&snapshot).expect("valid snapshot");
        group.bench_function(format!("resolve_chain_memoized(depth={depth})"), |b| {
            b.iter(|| {
                let chain = warm.resolve_chain(&snapshot).expect("valid snapshot");
                black_box(chain.len());
            });
        });

        let errored = Rc::new(deep_snapshot(depth, "k", Some(depth / 2)));
        group.bench_function(format!("resolve_chain_errored(depth={depth})"), |b| {
            b.iter_batched(
                OutletResolver::new,
                |mut resolver| {
                    let chain = resolver.resolve_chain(&errored).expect("valid snapshot");
                    black_box(chain.len());
                },
                BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(benches, bench_outlet);
criterion_main!(benches);
