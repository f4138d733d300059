use criterion::{black_box, criterion_group, criterion_main, Criterion};
use ethplorer_client::{CredentialSet, Endpoint, HistoryOptions, KeySelector, RotationPolicy};
use secrecy::ExposeSecret;

fn keys(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("api-key-{i:04}")).collect()
}

fn bench_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("select_credential");
    for policy in [RotationPolicy::Sequential, RotationPolicy::Random] {
        let selector = KeySelector::new(CredentialSet::new(keys(16)).unwrap(), policy);
        group.bench_function(policy.as_str(), |b| {
            b.iter(|| black_box(selector.select_credential().expose_secret().len()))
        });
    }
    group.finish();
}

fn bench_url(c: &mut Criterion) {
    let endpoint = Endpoint::TokenHistory {
        token: "0xdAC17F958D2ee523a2206206994597C13D831ec7".to_string(),
        options: HistoryOptions::default(),
    };
    c.bench_function("endpoint_url", |b| {
        b.iter(|| black_box(endpoint.url("https://api.ethplorer.io/", "freekey")))
    });
}

criterion_group!(benches, bench_selection, bench_url);
criterion_main!(benches);
