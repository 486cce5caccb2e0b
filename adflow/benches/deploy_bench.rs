//! Benchmarks for deployment execution.

use std::sync::Arc;

use adflow::client::{CustomerId, InMemoryAdsClient};
use adflow::input::{AdGroupSpec, CampaignSpec, DeploymentInput, KeywordSpec};
use adflow::pipeline::{BatchMutator, DeploymentEngine};
use adflow::resources::{AdGroupCriterion, AdGroupHandle, KeywordInfo, KeywordMatchType, Operation};
use adflow::stages::amount_micros;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

fn keyword_input(count: usize) -> DeploymentInput {
    DeploymentInput::new()
        .with_campaigns(vec![CampaignSpec::new("Bench", 100.0)])
        .with_ad_groups(vec![AdGroupSpec::new("Bench", "AG")])
        .with_keywords(
            (0..count)
                .map(|i| KeywordSpec::new("Bench", "AG", format!("keyword {i}"), "Exact"))
                .collect(),
        )
}

fn deploy_benchmark(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let engine = DeploymentEngine::default();
    let customer_id = CustomerId::parse("1234567890").unwrap();
    let input = keyword_input(2_500);

    c.bench_function("deploy_2500_keywords", |b| {
        b.iter(|| {
            let client = Arc::new(InMemoryAdsClient::new());
            let report = runtime.block_on(engine.run(client.as_ref(), &customer_id, &input));
            black_box(report)
        });
    });
}

fn keyword_operations(count: usize) -> Vec<Operation<AdGroupCriterion>> {
    let ad_group = AdGroupHandle::from_resource_name("customers/1234567890/adGroups/1");
    (0..count)
        .map(|i| {
            Operation::create(AdGroupCriterion {
                ad_group: ad_group.clone(),
                keyword: KeywordInfo {
                    text: format!("keyword {i}"),
                    match_type: KeywordMatchType::from_label("Phrase Match"),
                },
            })
        })
        .collect()
}

fn batch_benchmark(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().unwrap();
    let customer_id = CustomerId::parse("1234567890").unwrap();

    c.bench_function("build_2500_keyword_operations", |b| {
        b.iter(|| black_box(keyword_operations(2_500)));
    });

    let operations = keyword_operations(2_500);
    c.bench_function("submit_2500_keywords_in_chunks", |b| {
        b.iter(|| {
            let client = InMemoryAdsClient::new();
            let mutator = BatchMutator::new(&client, &customer_id, 500);
            black_box(runtime.block_on(mutator.submit(&operations)))
        });
    });
}

fn budget_benchmark(c: &mut Criterion) {
    c.bench_function("amount_micros", |b| {
        b.iter(|| black_box(amount_micros(black_box(1234.56))));
    });
}

criterion_group!(benches, deploy_benchmark, batch_benchmark, budget_benchmark);
criterion_main!(benches);
