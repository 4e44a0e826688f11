use cadence_core::models::Task;
use cadence_core::recurrence::{complete_task, decode, encode, next_occurrence, upcoming};
use chrono::{Duration, NaiveDate, NaiveDateTime};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

const RULES: [&str; 8] = [
    "daily:1:",
    "daily:3::count:10",
    "weekly:1:1,3,5",
    "weekly:2:2,4:until:2030-12-31",
    "monthly:1:15",
    "monthly:1:last",
    "monthly:2:3w2",
    "yearly:1:0229",
];

fn reference() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 1, 31)
        .unwrap()
        .and_hms_opt(9, 0, 0)
        .unwrap()
}

fn create_test_task(rule: &str) -> Task {
    Task {
        description: "Benchmark Task".to_string(),
        due_date: Some(reference()),
        start_date: Some(reference() - Duration::days(2)),
        recurrence: Some(rule.to_string()),
        tags: vec!["bench".to_string()],
        ..Default::default()
    }
}

fn bench_decode(c: &mut Criterion) {
    c.bench_function("decode_mixed_rules", |b| {
        b.iter(|| {
            let rule = RULES[fastrand::usize(..RULES.len())];
            decode(black_box(rule)).unwrap()
        })
    });
}

fn bench_encode(c: &mut Criterion) {
    let patterns: Vec<_> = RULES.iter().map(|r| decode(r).unwrap()).collect();

    c.bench_function("encode_mixed_rules", |b| {
        b.iter(|| {
            let pattern = &patterns[fastrand::usize(..patterns.len())];
            encode(black_box(pattern))
        })
    });
}

fn bench_next_occurrence(c: &mut Criterion) {
    let mut group = c.benchmark_group("next_occurrence");

    for rule in RULES.iter() {
        let pattern = decode(rule).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(rule), &pattern, |b, pattern| {
            b.iter(|| next_occurrence(black_box(pattern), black_box(reference())))
        });
    }
    group.finish();
}

fn bench_upcoming(c: &mut Criterion) {
    let pattern = decode("weekly:1:1,3,5").unwrap();
    let mut group = c.benchmark_group("upcoming");

    for limit in [5usize, 50, 500].iter() {
        group.bench_with_input(BenchmarkId::new("limit", limit), limit, |b, &limit| {
            b.iter(|| upcoming(black_box(&pattern), black_box(reference()), 1, limit).unwrap())
        });
    }
    group.finish();
}

fn bench_complete_task(c: &mut Criterion) {
    let tasks: Vec<Task> = RULES.iter().map(|r| create_test_task(r)).collect();

    c.bench_function("complete_recurring_task", |b| {
        b.iter(|| {
            let task = &tasks[fastrand::usize(..tasks.len())];
            complete_task(black_box(task), reference()).unwrap()
        })
    });
}

criterion_group!(
    benches,
    bench_decode,
    bench_encode,
    bench_next_occurrence,
    bench_upcoming,
    bench_complete_task
);
criterion_main!(benches);
