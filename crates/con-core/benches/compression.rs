//! Encode/decode throughput and token-compression ratio benchmarks.
//!
//! # Groups
//!
//! | Group | What it measures |
//! |-------|-------------------|
//! | `encode` | Encode throughput for flat, nested, tabular, and mixed payloads |
//! | `decode` | Decode throughput for the same payload shapes |
//! | `compression_ratio` | Byte-size reduction of CON text vs. compact JSON |
//!
//! # Viewing results
//!
//! ```sh
//! cargo bench --bench compression
//! open target/criterion/report/index.html
//! ```

use con_core::{decode, encode};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

fn flat_payload() -> String {
    serde_json::json!({
        "id": "user_123",
        "name": "Ada Lovelace",
        "email": "ada@example.com",
        "role": "admin",
        "active": true,
    })
    .to_string()
}

fn nested_payload() -> String {
    serde_json::json!({
        "app": {
            "name": "MyApp",
            "config": {"debug": true, "port": 3000},
            "modules": ["auth", "api", "web"],
        }
    })
    .to_string()
}

fn tabular_payload(rows: usize) -> String {
    let items: Vec<_> = (0..rows)
        .map(|i| {
            serde_json::json!({
                "id": i,
                "name": format!("item{i}"),
                "active": i % 2 == 0,
            })
        })
        .collect();
    serde_json::json!({ "items": items }).to_string()
}

fn mixed_payload() -> String {
    serde_json::json!({
        "summary": "Engineering Sync",
        "timeZone": "America/Los_Angeles",
        "items": [
            {
                "id": "evt_1a2b",
                "status": "confirmed",
                "summary": "Q1 Strategy Sync",
                "start": "2026-02-17T10:00:00-08:00",
                "end": "2026-02-17T11:00:00-08:00",
            },
            {
                "id": "evt_9f8e",
                "status": "confirmed",
                "summary": "Vendor Negotiation",
                "start": "2026-02-18T13:00:00-08:00",
                "end": "2026-02-18T14:00:00-08:00",
            },
        ],
    })
    .to_string()
}

// ---------------------------------------------------------------------------
// Encode
// ---------------------------------------------------------------------------

fn encode_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode");

    let flat = flat_payload();
    let nested = nested_payload();
    let tabular_small = tabular_payload(10);
    let tabular_large = tabular_payload(200);
    let mixed = mixed_payload();

    for (name, payload) in [
        ("flat", &flat),
        ("nested", &nested),
        ("tabular_10_rows", &tabular_small),
        ("tabular_200_rows", &tabular_large),
        ("mixed_calendar", &mixed),
    ] {
        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), payload, |b, json| {
            b.iter(|| encode(black_box(json)).unwrap())
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Decode
// ---------------------------------------------------------------------------

fn decode_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode");

    let flat = encode(&flat_payload()).unwrap();
    let nested = encode(&nested_payload()).unwrap();
    let tabular_small = encode(&tabular_payload(10)).unwrap();
    let tabular_large = encode(&tabular_payload(200)).unwrap();
    let mixed = encode(&mixed_payload()).unwrap();

    for (name, payload) in [
        ("flat", &flat),
        ("nested", &nested),
        ("tabular_10_rows", &tabular_small),
        ("tabular_200_rows", &tabular_large),
        ("mixed_calendar", &mixed),
    ] {
        group.throughput(Throughput::Bytes(payload.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), payload, |b, con| {
            b.iter(|| decode(black_box(con)).unwrap())
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Compression ratio (not timed, reported as a custom throughput metric so it
// shows up alongside the timing groups in the criterion report)
// ---------------------------------------------------------------------------

fn compression_ratio_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("compression_ratio");

    for (name, json) in [
        ("flat", flat_payload()),
        ("nested", nested_payload()),
        ("tabular_200_rows", tabular_payload(200)),
        ("mixed_calendar", mixed_payload()),
    ] {
        let con = encode(&json).unwrap();
        let ratio = con.len() as f64 / json.len() as f64;
        eprintln!(
            "{name}: json={} bytes, con={} bytes, ratio={ratio:.3}",
            json.len(),
            con.len()
        );
        group.throughput(Throughput::Bytes(json.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(name), &json, |b, json| {
            b.iter(|| encode(black_box(json)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(
    compression_benches,
    encode_bench,
    decode_bench,
    compression_ratio_bench,
);
criterion_main!(compression_benches);
