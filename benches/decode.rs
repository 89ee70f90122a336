use criterion::{criterion_group, criterion_main, Criterion};
use geojson_reader::{read, read_features};
use std::fs::read_to_string;

pub fn read_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("alexanderplatz");
    let text = read_to_string("./tests/data/alexanderplatz.geojson").unwrap();
    group.bench_function("read", |b| b.iter(|| read(&text).unwrap()));
    group.bench_function("read_features", |b| b.iter(|| read_features(&text).unwrap()));
    group.finish();
}

pub fn nested_properties_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("nested");
    group.sample_size(10);
    let properties: Vec<String> = (0..1000)
        .map(|i| format!(r#""key_{}": {{"list": [{}, "x", null, {{"flag": true}}]}}"#, i, i))
        .collect();
    let text = format!(
        r#"{{"type": "Feature", "geometry": {{"type": "Point", "coordinates": [0, 0]}}, "properties": {{{}}}}}"#,
        properties.join(",")
    );
    group.bench_function("read_features", |b| b.iter(|| read_features(&text).unwrap()));
    group.finish();
}

criterion_group!(benches, read_bench, nested_properties_bench);
criterion_main!(benches);
