//! Micro-benchmarks for identifier normalization and the cached verdict path.

use async_trait::async_trait;
use criterion::{Criterion, criterion_group, criterion_main};
use pagegate::access::AccessResolver;
use pagegate::config::AccessSettings;
use pagegate::workspace::{ApiExecutor, Operation};
use pagegate::{Error, ResourceId, Result, RootSet};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::hint::black_box;
use std::sync::Arc;

const ROOT: &str = "11111111-1111-1111-1111-111111111111";
const PAGE: &str = "aaaaaaaa-aaaa-aaaa-aaaa-aaaaaaaaaaaa";

/// Serves a one-page hierarchy: `PAGE` sits directly on `ROOT`.
struct StaticExecutor;

#[async_trait]
impl ApiExecutor for StaticExecutor {
    async fn execute(
        &self,
        operation: &Operation,
        path_params: &HashMap<String, String>,
        _body: Option<&Value>,
    ) -> Result<Value> {
        let id = path_params.values().next().cloned().unwrap_or_default();
        if operation.name == "retrieve_page" && id == PAGE {
            return Ok(json!({
                "id": PAGE,
                "parent": { "type": "page_id", "page_id": ROOT }
            }));
        }
        if operation.name == "retrieve_page" && id == ROOT {
            return Ok(json!({ "id": ROOT }));
        }
        Err(Error::UpstreamLookupFailed {
            operation: operation.name.to_string(),
            cause: "not in benchmark fixture".to_string(),
        })
    }
}

fn bench_normalize(c: &mut Criterion) {
    c.bench_function("normalize_hyphenated", |b| {
        b.iter(|| ResourceId::parse(black_box("1a2b3c4d-5e6f-7a8b-9c0d-1e2f3a4b5c6d")));
    });
    c.bench_function("normalize_compact_uppercase", |b| {
        b.iter(|| ResourceId::parse(black_box("1A2B3C4D5E6F7A8B9C0D1E2F3A4B5C6D")));
    });
}

fn bench_cached_verdict(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("build benchmark runtime");

    let settings = AccessSettings {
        root_page_ids: vec![ROOT.to_string()],
        root_page_urls: Vec::new(),
    };
    let resolver = AccessResolver::new(RootSet::build(&settings), Arc::new(StaticExecutor));

    // Prime the cache so the measured path never leaves the process.
    let primed = runtime
        .block_on(resolver.is_page_allowed(PAGE))
        .expect("prime benchmark cache");
    assert!(primed);

    c.bench_function("is_page_allowed_cached", |b| {
        b.iter(|| {
            let allowed = runtime
                .block_on(resolver.is_page_allowed(black_box(PAGE)))
                .expect("cached verdict");
            black_box(allowed)
        });
    });
}

criterion_group!(benches, bench_normalize, bench_cached_verdict);
criterion_main!(benches);
