use criterion::{black_box, criterion_group, criterion_main, Criterion};
use split_engine::balance::engine::BalanceEngine;
use split_engine::settlement::planner::SettlementPlanner;
use split_engine::simulation::scenario::{generate_random_scenario, ScenarioConfig};

fn bench_balances_10_members(c: &mut Criterion) {
    let config = ScenarioConfig {
        group_count: 1,
        members_per_group: 10,
        expenses_per_group: 50,
        ..Default::default()
    };
    let scenario = generate_random_scenario(&config);

    c.bench_function("balances_10_members", |b| {
        b.iter(|| BalanceEngine::compute(black_box(&scenario.groups), black_box(&scenario.expenses)))
    });
}

fn bench_balances_100_members(c: &mut Criterion) {
    let config = ScenarioConfig {
        group_count: 1,
        members_per_group: 100,
        expenses_per_group: 500,
        ..Default::default()
    };
    let scenario = generate_random_scenario(&config);

    c.bench_function("balances_100_members", |b| {
        b.iter(|| BalanceEngine::compute(black_box(&scenario.groups), black_box(&scenario.expenses)))
    });
}

fn bench_balances_many_groups(c: &mut Criterion) {
    let config = ScenarioConfig {
        group_count: 100,
        members_per_group: 8,
        expenses_per_group: 30,
        ..Default::default()
    };
    let scenario = generate_random_scenario(&config);

    c.bench_function("balances_100_groups", |b| {
        b.iter(|| BalanceEngine::compute(black_box(&scenario.groups), black_box(&scenario.expenses)))
    });
}

fn bench_settlement_planning(c: &mut Criterion) {
    let config = ScenarioConfig {
        group_count: 1,
        members_per_group: 100,
        expenses_per_group: 500,
        ..Default::default()
    };
    let scenario = generate_random_scenario(&config);
    let sheet = BalanceEngine::compute(&scenario.groups, &scenario.expenses);
    let balances = sheet
        .group(scenario.groups[0].id())
        .expect("group was in the input");

    c.bench_function("settlement_plan_100_members", |b| {
        b.iter(|| SettlementPlanner::plan(black_box(balances)))
    });
}

criterion_group!(
    benches,
    bench_balances_10_members,
    bench_balances_100_members,
    bench_balances_many_groups,
    bench_settlement_planning
);
criterion_main!(benches);
