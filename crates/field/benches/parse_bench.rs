use criterion::{Criterion, black_box, criterion_group, criterion_main};
use wirefield::{ETag, FieldToken, RangeHeader};

fn bench_etag_list(c: &mut Criterion) {
    let text = "\"33a64df551425fcc55e4d42a148795d9f25f89d4\", W/\"0815\", \"plain\"";

    c.bench_function("parse_etag_list", |b| {
        b.iter(|| {
            black_box(ETag::parse_list(black_box(text)).unwrap());
        });
    });
}

fn bench_range(c: &mut Criterion) {
    let text = "bytes=200-1000, 2000-6576, 19000-";

    c.bench_function("parse_range", |b| {
        b.iter(|| {
            black_box(RangeHeader::parse(black_box(text)).unwrap());
        });
    });
}

fn bench_token_list(c: &mut Criterion) {
    let text = "gzip;q=1.0, identity;q=0.5, *;q=0";

    c.bench_function("parse_token_list", |b| {
        b.iter(|| {
            black_box(FieldToken::parse_list(black_box(text)).unwrap());
        });
    });
}

criterion_group!(benches, bench_etag_list, bench_range, bench_token_list);
criterion_main!(benches);
