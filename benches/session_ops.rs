//! Session and cache benchmark suite.
//!
//! Benchmarks the hot paths behind user input:
//! - Address-bar resolution
//! - History pushes at the bound
//! - Find-in-page over growing documents
//! - Cache hits with background revalidation
//!
//! Run with: cargo bench --bench session_ops
//! Results saved to: target/criterion/

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use tabshell::browser::{HistoryStack, MAX_HISTORY_ENTRIES, TextNode, find_matches};
use tabshell::cache::{FetchRequest, FetchResponse, ResourceCache, StaticFetcher};
use tabshell::{BrowserSession, SearchEngine, UrlResolver};
use tokio::runtime::Runtime;
use tracing_subscriber::EnvFilter;

// ============================================================================
// Benchmark Parameters
// ============================================================================

const INPUTS: &[&str] = &[
    "example.com",
    "https://docs.rs/tokio/latest/tokio/",
    "how do lifetimes work",
    "localhost:8080",
];

const DOCUMENT_SIZES: &[usize] = &[10, 100, 1_000];

// ============================================================================
// Logging
// ============================================================================

/// Logs nothing unless `RUST_LOG` is set.
fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .try_init();
}

// ============================================================================
// Benchmark: Resolution
// ============================================================================

fn bench_resolve(c: &mut Criterion) {
    init_logging();
    let resolver = UrlResolver::new(SearchEngine::Brave);

    let mut group = c.benchmark_group("resolve");
    for input in INPUTS {
        group.bench_with_input(BenchmarkId::from_parameter(input), input, |b, input| {
            b.iter(|| resolver.resolve(black_box(input)));
        });
    }
    group.finish();
}

// ============================================================================
// Benchmark: History
// ============================================================================

fn bench_history_push(c: &mut Criterion) {
    c.bench_function("history_push_at_bound", |b| {
        let mut history = HistoryStack::new(MAX_HISTORY_ENTRIES);
        for i in 0..MAX_HISTORY_ENTRIES {
            history.push(format!("https://a.test/{i}"));
        }
        let mut n = 0usize;
        b.iter(|| {
            n += 1;
            history.push(format!("https://b.test/{n}"))
        });
    });

    c.bench_function("session_navigate", |b| {
        let mut session = BrowserSession::builder().build().expect("build session");
        session.init().expect("init session");
        let mut n = 0usize;
        b.iter(|| {
            n += 1;
            session.resolve_and_navigate(&format!("site{n}.test"))
        });
    });
}

// ============================================================================
// Benchmark: Find
// ============================================================================

fn bench_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_matches");

    for &size in DOCUMENT_SIZES {
        let nodes: Vec<TextNode> = (0..size)
            .map(|i| TextNode::new(format!("Paragraph {i} mentions Rust and rusty tools.")))
            .collect();

        group.bench_with_input(BenchmarkId::new("nodes", size), &nodes, |b, nodes| {
            b.iter(|| find_matches(black_box(nodes), "rust"));
        });
    }

    group.finish();
}

// ============================================================================
// Benchmark: Cache
// ============================================================================

fn bench_cache_hit(c: &mut Criterion) {
    let rt = Runtime::new().expect("tokio runtime");

    let url = "https://a.test/app.js";
    let fetcher = StaticFetcher::new().route(url, FetchResponse::ok(vec![b'x'; 16 * 1024]));
    let cache = ResourceCache::builder()
        .fetcher(fetcher)
        .build()
        .expect("build cache");
    let request = FetchRequest::get(url);

    rt.block_on(cache.handle_fetch(&request)).expect("warm cache");

    c.bench_function("cache_hit", |b| {
        b.to_async(&rt).iter(|| async {
            let outcome = cache.handle_fetch(&request).await.expect("cache hit");
            cache.settle().await.expect("settle");
            outcome
        });
    });
}

// ============================================================================
// Main
// ============================================================================

criterion_group!(
    benches,
    bench_resolve,
    bench_history_push,
    bench_find,
    bench_cache_hit
);
criterion_main!(benches);
