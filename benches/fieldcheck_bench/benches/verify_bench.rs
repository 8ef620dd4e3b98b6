//! Verification benchmarks
//!
//! Benchmarks the engine on derived and JSON subjects, under both numeric
//! modes.

#![allow(dead_code)]

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fieldcheck::prelude::*;
use fieldcheck::{JsonSubject, Schema};

/// Typical request body
#[derive(Verify)]
struct CreateUser {
    #[verify(min_size = 3, max_size = 32)]
    username: String,

    #[verify(interval(min = 18, max = 120))]
    age: u8,

    #[verify(not_null, max_size = 64)]
    email: Option<String>,

    #[verify(max_size = 10)]
    tags: Vec<String>,

    #[verify(min = 0.0)]
    balance: f64,
}

fn user() -> CreateUser {
    CreateUser {
        username: "ferris".to_string(),
        age: 30,
        email: Some("ferris@example.com".to_string()),
        tags: vec!["rust".to_string(), "crab".to_string()],
        balance: 12.5,
    }
}

const USER_SCHEMA: &str = r#"{
    "name": "CreateUser",
    "fields": [
        { "name": "username", "category": "text",
          "annotations": [{ "type": "min_size", "value": 3 }, { "type": "max_size", "value": 32 }] },
        { "name": "age", "category": "numeric",
          "annotations": [{ "type": "interval", "min": 18.0, "max": 120.0 }] },
        { "name": "email", "category": "text", "optional": true,
          "annotations": [{ "type": "not_null" }, { "type": "max_size", "value": 64 }] },
        { "name": "tags", "category": "sequence",
          "annotations": [{ "type": "max_size", "value": 10 }] },
        { "name": "balance", "category": "numeric",
          "annotations": [{ "type": "min", "value": 0.0 }] }
    ]
}"#;

/// Benchmark verification of a derived struct
fn bench_derived(c: &mut Criterion) {
    let mut group = c.benchmark_group("derived");
    let subject = user();

    group.bench_function("canonical", |b| {
        let verifier = Verifier::new();
        b.iter(|| {
            let report = verifier.verify(black_box(&subject)).unwrap();
            report.passed_all().unwrap()
        })
    });

    group.bench_function("legacy", |b| {
        let verifier =
            Verifier::from_config(VerifierConfig::default().numeric_mode(NumericMode::Legacy));
        b.iter(|| {
            let report = verifier.verify(black_box(&subject)).unwrap();
            report.passed_all().unwrap()
        })
    });

    group.bench_function("single_field", |b| {
        b.iter(|| {
            let report = subject.verify_field_named(black_box("username")).unwrap();
            report.passed_all().unwrap()
        })
    });

    group.bench_function("render_report", |b| {
        let report = subject.verify().unwrap();
        b.iter(|| black_box(&report).to_string())
    });

    group.finish();
}

/// Benchmark verification of JSON data against a schema
fn bench_json(c: &mut Criterion) {
    let mut group = c.benchmark_group("json");
    let schema = Schema::from_json(USER_SCHEMA).unwrap();
    let value = serde_json::json!({
        "username": "ferris",
        "age": 30,
        "email": "ferris@example.com",
        "tags": ["rust", "crab"],
        "balance": 12.5
    });

    group.bench_function("verify", |b| {
        b.iter(|| {
            let subject = JsonSubject::new(&schema, black_box(&value));
            let report = fieldcheck::verify(&subject).unwrap();
            report.passed_all().unwrap()
        })
    });

    group.bench_function("parse_schema", |b| {
        b.iter(|| Schema::from_json(black_box(USER_SCHEMA)).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_derived, bench_json);
criterion_main!(benches);
