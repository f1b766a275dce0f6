// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use std::cell::Cell;
use std::rc::Rc;

use arbor_engine::{Location, RouterSnapshot};
use arbor_memory::MemoryEngine;
use arbor_projector::Projector;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

fn bench_projector(c: &mut Criterion) {
    let mut group = c.benchmark_group("arbor_projector");

    for &listeners in &[1_usize, 16, 256] {
        let engine = MemoryEngine::new(RouterSnapshot::builder(Location::new("/", "k0")).build());
        let projector = Projector::attach(engine.clone());
        let seen = Rc::new(Cell::new(0_u64));
        let subscriptions: Vec<_> = (0..listeners)
            .map(|_| {
                let seen = Rc::clone(&seen);
                projector.subscribe(move |_| seen.set(seen.get() + 1))
            })
            .collect();

        let mut n = 0_u64;
        group.bench_function(format!("publish(listeners={listeners})"), |b| {
            b.iter(|| {
                n += 1;
                engine
                    .publish(RouterSnapshot::builder(Location::new("/", format!("k{n}"))).build());
                black_box(projector.generation());
            });
        });

        drop(subscriptions);
        projector.detach();
    }

    group.finish();
}

criterion_group!(benches, bench_projector);
criterion_main!(benches);
