use criterion::{black_box, criterion_group, criterion_main, Criterion};
use iri_string::{format::ToDedicatedString, types::UriStr};
use uri_normalize::{normalize_str, pct_enc::EStr, Flags, UriComponents};
use url::Url;

criterion_group!(
    benches,
    bench_parse,
    bench_parse_url,
    bench_build,
    bench_normalize,
    bench_normalize_js_defaults,
    bench_normalize_iri_string,
    bench_normalize_url,
    bench_normalize_str,
);
criterion_main!(benches);

const PARSE_CASE: &str = "https://user@example.com/search?q=%E6%B5%8B%E8%AF%95#fragment";
const NORMALIZE_CASE: &str = "eXAMPLE://a/./b/../b/%63/%7bfoo%7d";
const JS_CASE: &str = "HTTP://www.Example.com:80/a//b/../c/?y=2&x=1&w=&#top";

fn bench_parse(c: &mut Criterion) {
    c.bench_function("parse", |b| {
        b.iter(|| UriComponents::parse(black_box(PARSE_CASE)))
    });
}

fn bench_parse_url(c: &mut Criterion) {
    c.bench_function("parse_url", |b| {
        b.iter(|| Url::parse(black_box(PARSE_CASE)))
    });
}

fn bench_build(c: &mut Criterion) {
    c.bench_function("build", |b| {
        b.iter(|| {
            let mut u = UriComponents::new();
            u.set_scheme(Some("foo"))
                .set_user(Some(EStr::new_or_panic("user")))
                .set_host(Some(EStr::new_or_panic("example.com")))
                .set_port(Some(8042))
                .set_path(EStr::new_or_panic("/over/there"))
                .set_query(Some(EStr::new_or_panic("name=ferret")))
                .set_fragment(Some(EStr::new_or_panic("nose")));
            u.build()
        })
    });
}

fn bench_normalize(c: &mut Criterion) {
    let u = UriComponents::parse(NORMALIZE_CASE).unwrap();
    c.bench_function("normalize", |b| {
        b.iter(|| u.normalized(black_box(Flags::SEMANTICS_PRESERVING)))
    });
}

fn bench_normalize_js_defaults(c: &mut Criterion) {
    let u = UriComponents::parse(JS_CASE).unwrap();
    c.bench_function("normalize_js_defaults", |b| {
        b.iter(|| u.normalized(black_box(Flags::JS_DEFAULTS | Flags::REMOVE_FRAGMENT)))
    });
}

fn bench_normalize_iri_string(c: &mut Criterion) {
    let r = UriStr::new(NORMALIZE_CASE).unwrap();
    c.bench_function("normalize_iri_string", |b| {
        b.iter(|| r.normalize().to_dedicated_string())
    });
}

fn bench_normalize_url(c: &mut Criterion) {
    c.bench_function("normalize_url", |b| {
        b.iter(|| Url::parse(black_box(JS_CASE)).map(String::from))
    });
}

fn bench_normalize_str(c: &mut Criterion) {
    c.bench_function("normalize_str", |b| {
        b.iter(|| normalize_str(black_box(JS_CASE), Flags::DEFAULT))
    });
}
