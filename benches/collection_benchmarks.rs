use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use smc_exporter::{
    decode, KeyCatalog, RawValue, Sample, SensorKey, SimulatedSession, SmcExporter, TextEncoder,
    TypeTag,
};
use std::sync::Arc;

/// Benchmark decoding of each supported register type
fn bench_decode(c: &mut Criterion) {
    let values = [
        ("flt", RawValue::new(TypeTag::FLT, vec![0x00, 0x00, 0x48, 0x42])),
        ("ui8", RawValue::new(TypeTag::UI8, vec![0x02])),
        ("f64", RawValue::new(TypeTag::F64, 1850.0f64.to_le_bytes().to_vec())),
    ];

    let mut group = c.benchmark_group("decode");
    for (name, raw) in &values {
        group.bench_with_input(BenchmarkId::from_parameter(name), raw, |b, raw| {
            b.iter(|| decode(black_box(raw)))
        });
    }
    group.finish();
}

/// Benchmark a full pass over the builtin catalog against the demo session
fn bench_collection_pass(c: &mut Criterion) {
    let catalog = Arc::new(KeyCatalog::build().expect("Should build catalog"));
    let session = SimulatedSession::demo().expect("Should build demo session");
    let exporter = SmcExporter::new(Box::new(session), catalog);

    c.bench_function("collection_pass_samples", |b| {
        b.iter(|| {
            let mut samples: Vec<Sample> = Vec::new();
            exporter.scrape(&mut samples);
            samples
        })
    });

    c.bench_function("collection_pass_text", |b| b.iter(|| exporter.render_text()));
}

/// Benchmark text exposition for growing fan counts
fn bench_text_encoding(c: &mut Criterion) {
    let catalog = Arc::new(KeyCatalog::with_temperature_keys(&[]).expect("Should build catalog"));

    let mut group = c.benchmark_group("text_encoding");
    for fans in [1u8, 4, 10] {
        let mut session = SimulatedSession::new()
            .with_u8(SensorKey::new("FNum").expect("Should parse key"), fans);
        for index in 0..fans {
            for suffix in ["Mx", "Mn", "Ac", "Tg"] {
                let key = SensorKey::fan(index, suffix).expect("Should build fan key");
                session = session.with_float(key, 2000.0);
            }
        }
        let exporter = SmcExporter::new(Box::new(session), catalog.clone());

        group.bench_with_input(BenchmarkId::from_parameter(fans), &exporter, |b, exporter| {
            b.iter(|| {
                let mut encoder = TextEncoder::new();
                exporter.scrape(&mut encoder);
                encoder.finish()
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_decode,
    bench_collection_pass,
    bench_text_encoding
);

criterion_main!(benches);
