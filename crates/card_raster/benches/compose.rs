// Copyright 2024 the Piet Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use card_raster::{CardAttributes, CardComposer, CardFamily};
use criterion::Criterion;

pub fn compose(c: &mut Criterion) {
    let mut g = c.benchmark_group("compose");
    g.sample_size(20);

    let composer = CardComposer::new(&CardFamily::default()).unwrap();

    for code in ["RO1S", "GD3H", "PQ3T"] {
        let card: CardAttributes = code.parse().unwrap();
        g.bench_function(code, |b| b.iter(|| composer.compose(&card).unwrap()));
    }

    g.bench_function("blank", |b| b.iter(|| composer.blank().unwrap()));
}
