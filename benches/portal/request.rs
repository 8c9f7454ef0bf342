use std::hint::black_box;

use criterion::{Criterion, Throughput};
use libportal::portal::{Request, match_route};

/// A config submission the size a real browser produces.
fn sample_request() -> Vec<u8> {
    let mut raw = Vec::new();
    raw.extend_from_slice(b"POST /config.json HTTP/1.1\r\n");
    raw.extend_from_slice(b"Host: 192.168.4.1\r\n");
    raw.extend_from_slice(b"User-Agent: Mozilla/5.0 (X11; Linux x86_64) Gecko/20100101\r\n");
    raw.extend_from_slice(b"Accept: */*\r\n");
    raw.extend_from_slice(b"Accept-Language: en-US,en;q=0.5\r\n");
    raw.extend_from_slice(b"Accept-Encoding: gzip, deflate\r\n");
    for i in 0..24 {
        raw.extend_from_slice(format!("X-Custom-setting_{}: value-{}\r\n", i, i).as_bytes());
    }
    raw.extend_from_slice(b"Connection: close\r\n\r\n");
    raw
}

pub fn bench_parse_request(c: &mut Criterion) {
    let raw = sample_request();
    let mut group = c.benchmark_group("parse_request");
    group.throughput(Throughput::Bytes(raw.len() as u64));
    group.bench_function("parse", |b| {
        b.iter(|| {
            let req = Request::parse(black_box(&raw)).unwrap();
            black_box((req.method, req.path, req.version));
        })
    });
    group.finish();
}

pub fn bench_custom_fields(c: &mut Criterion) {
    let raw = sample_request();
    let req = Request::parse(&raw).unwrap();
    let mut group = c.benchmark_group("custom_fields");
    group.throughput(Throughput::Bytes(raw.len() as u64));
    group.bench_function("enumerate", |b| {
        b.iter(|| {
            let count = black_box(&req).custom_fields().count();
            assert_eq!(count, 24);
        })
    });
    group.finish();
}

pub fn bench_route_match(c: &mut Criterion) {
    let mut group = c.benchmark_group("route_match");
    group.bench_function("status_json", |b| {
        b.iter(|| match_route(black_box("GET"), black_box("/status.json")))
    });
    group.finish();
}
