use criterion::{Criterion, criterion_group, criterion_main};
use geodns::zone::ZoneParser;
use serde_json::{Map, Value, json};
use std::hint::black_box;

/// A zone with many weighted geo labels, similar in shape to pool zones
fn large_zone_document(labels: usize) -> String {
    let mut data = Map::new();
    data.insert(
        String::new(),
        json!({"ns": {"ns1.example.net": null, "ns2.example.net": null}}),
    );
    for i in 0..labels {
        let a: Vec<Value> = (0..8)
            .map(|j| json!([format!("10.{}.{}.{}", i % 256, j, (i * 7 + j) % 256), (j * 3) % 5]))
            .collect();
        data.insert(
            format!("{}.pool", i),
            json!({"a": a, "aaaa": [[format!("2001:db8::{:x}", i)]], "max_hosts": 4}),
        );
    }
    json!({"serial": 1, "data": data}).to_string()
}

fn bench_zone_compile(c: &mut Criterion) {
    let document = large_zone_document(1000);
    let parser = ZoneParser::new("pool.example.com");

    c.bench_function("compile 1000 label zone", |b| {
        b.iter(|| parser.parse(black_box(&document)).unwrap());
    });
}

criterion_group!(benches, bench_zone_compile);
criterion_main!(benches);
