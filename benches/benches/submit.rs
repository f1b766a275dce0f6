// Copyright 2026 the Arbor Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use arbor_engine::FormData;
use arbor_submit::{FormElement, SubmitOptions, SubmitTarget, form_action, translate};
use criterion::{Criterion, black_box, criterion_group, criterion_main};
use url::Url;

fn fields(n: usize) -> FormData {
    (0..n)
        .map(|i| (format!("field{i}"), format!("value {i}")))
        .collect()
}

fn bench_submit(c: &mut Criterion) {
    let mut group = c.benchmark_group("arbor_submit");
    let origin = Url::parse("http://localhost").expect("static origin");
    let action = form_action("/projects", true, "?sort=asc&index", None);

    for &n in &[4_usize, 64] {
        let post = SubmitTarget::Form(
            FormElement::new()
                .with_method("post")
                .with_fields(fields(n)),
        );
        group.bench_function(format!("translate_post(fields={n})"), |b| {
            b.iter(|| {
                let submission = translate(&post, &action, &SubmitOptions::default(), &origin)
                    .expect("text fields encode");
                black_box(submission);
            });
        });

        let get = SubmitTarget::Form(FormElement::new().with_fields(fields(n)));
        group.bench_function(format!("translate_get(fields={n})"), |b| {
            b.iter(|| {
                let submission = translate(&get, "/search", &SubmitOptions::default(), &origin)
                    .expect("text fields encode");
                black_box(submission.href.len());
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_submit);
criterion_main!(benches);
