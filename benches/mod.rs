use criterion::{criterion_group, criterion_main};

mod portal;

criterion_group!(
    benches,
    portal::request::bench_parse_request,
    portal::request::bench_custom_fields,
    portal::request::bench_route_match
);
criterion_main!(benches);
