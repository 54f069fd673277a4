use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use std::time::Duration;
use unicfg::coerce::{coerce_text, TargetType};
use unicfg::resolve::{LogSink, Resolver};
use unicfg::source::MapSource;
use unicfg::{MappingRegistry, Profiles, PropertyKey};

fn bench_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("key");

    group.bench_function("dotted", |b| {
        b.iter(|| PropertyKey::new(black_box("zeebe.broker.gateway.longPolling.timeout")));
    });

    group.bench_function("indexed", |b| {
        b.iter(|| PropertyKey::new(black_box("camunda.cluster.initial-contact-points[12]")));
    });

    group.finish();
}

fn bench_coerce(c: &mut Criterion) {
    let mut group = c.benchmark_group("coerce");
    let key = PropertyKey::new("camunda.bench.value").unwrap();

    let cases = [
        ("integer", "26500", TargetType::Integer),
        ("duration_millis", "20000", TargetType::Duration),
        ("duration_iso", "PT1H30M15.5S", TargetType::Duration),
        ("duration_human", "1h 30m", TargetType::Duration),
        ("bytes", "512MB", TargetType::ByteSize),
        ("comma_list", "a, b, c, d", TargetType::list_of(TargetType::String)),
        (
            "bracket_list",
            "[\"a\", \"b\", \"c\", \"d\"]",
            TargetType::list_of(TargetType::String),
        ),
    ];

    for (name, text, target) in &cases {
        group.bench_with_input(BenchmarkId::from_parameter(name), text, |b, text| {
            b.iter(|| coerce_text(&key, black_box(text), target));
        });
    }

    group.finish();
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    let registry = MappingRegistry::bundled().unwrap();

    let unified = MapSource::from_pairs([("camunda.api.long-polling.timeout", "PT20S")]).unwrap();
    let resolver = Resolver::new(unified, registry.clone())
        .with_profiles(Profiles::parse("broker"))
        .with_sink(LogSink);
    group.bench_function("unified_only", |b| {
        b.iter(|| {
            resolver
                .property(black_box("camunda.api.long-polling.timeout"))
                .and_then(|request| request.resolve_as::<Duration>())
        });
    });

    let legacy = MapSource::from_pairs([
        ("camunda.api.long-polling.timeout", "20000"),
        ("zeebe.broker.gateway.longPolling.timeout", "20000"),
    ])
    .unwrap();
    let resolver = Resolver::new(legacy, registry.clone())
        .with_profiles(Profiles::parse("broker"))
        .with_sink(LogSink);
    group.bench_function("unified_and_legacy", |b| {
        b.iter(|| {
            resolver
                .property(black_box("camunda.api.long-polling.timeout"))
                .and_then(|request| request.resolve_as::<Duration>())
        });
    });

    group.bench_function("bundled_catalogue", |b| {
        b.iter(MappingRegistry::bundled);
    });

    group.finish();
}

criterion_group!(benches, bench_key, bench_coerce, bench_resolve);
criterion_main!(benches);
