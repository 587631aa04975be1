extern crate criterion;

use criterion::{criterion_group, criterion_main, Criterion};

use styletree_lib::{decode, decode_batch, encode, EncodeOptions};

fn bench_large_stylesheet(c: &mut Criterion) {
    let mut big_css = String::with_capacity(10_000_000);
    for i in 0..20_000 {
        big_css.push_str(&format!(
            ".item-{i}:hover > a[href^=\"https\"] {{ color: #{:06x}; margin: 0 auto; width: calc(100% - {}px) }}\n",
            i * 97 % 0xffffff,
            i % 50
        ));
    }

    c.bench_function("large_stylesheet", |b| b.iter(|| decode(&big_css)));
}

fn bench_deep_nesting(c: &mut Criterion) {
    let mut deep_css = String::new();
    for _ in 0..60 {
        deep_css.push_str("div { color: red; ");
    }
    for _ in 0..60 {
        deep_css.push_str("} ");
    }

    c.bench_function("deep_nesting", |b| {
        b.iter(|| {
            let document = decode(&deep_css).unwrap_or_default();
            encode(&document, &EncodeOptions::default())
        })
    });
}

fn bench_batch(c: &mut Criterion) {
    let sheets: Vec<String> = (0..64)
        .map(|n| {
            (0..500)
                .map(|i| format!("@media (min-width: {}px) {{ .c{n}-{i} {{ padding: {i}px }} }}\n", i * 10))
                .collect()
        })
        .collect();

    c.bench_function("batch", |b| b.iter(|| decode_batch(&sheets)));
}

criterion_group!(benches, bench_large_stylesheet, bench_deep_nesting, bench_batch);
criterion_main!(benches);
