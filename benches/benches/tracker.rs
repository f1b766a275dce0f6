// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use arbor_await::Tracker;
use arbor_engine::{Promise, Resolve};
use criterion::{BatchSize, Criterion, black_box, criterion_group, criterion_main};
use serde_json::json;

fn bench_tracker(c: &mut Criterion) {
    let mut group = c.benchmark_group("arbor_await");

    for &n in &[16_usize, 1_024] {
        group.bench_function(format!("track_first_sight(promises={n})"), |b| {
            b.iter_batched(
                || {
                    let promises: Vec<_> = (0..n).map(|_| Promise::pending()).collect();
                    (Tracker::new(), promises)
                },
                |(tracker, promises)| {
                    for (promise, _settle) in &promises {
                        black_box(tracker.track_promise(promise));
                    }
                    black_box(tracker.attachments());
                },
                BatchSize::SmallInput,
            );
        });

        let tracker = Tracker::new();
        let settled: Vec<Resolve> = (0..n)
            .map(|i| Resolve::from(Promise::resolved(json!(i))))
            .collect();
        for resolve in &settled {
            let _ = tracker.track(resolve);
        }
        group.bench_function(format!("track_settled(promises={n})"), |b| {
            b.iter(|| {
                for resolve in &settled {
                    black_box(tracker.track(resolve));
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tracker);
criterion_main!(benches);
