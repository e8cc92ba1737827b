use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use std::hint::black_box;
use strava_club_tracker::models::{ActivityRecord, Dataset};
use strava_club_tracker::services::merge;

fn ride(i: usize) -> ActivityRecord {
    ActivityRecord {
        date: String::new(),
        firstname: format!("Rider{}", i % 40),
        lastname: "X.".to_string(),
        title: format!("Morning Ride {}", i),
        distance: Some(10_000.0 + i as f64),
        moving_time: Some(1800 + i as u64),
        elapsed_time: Some(2000 + i as u64),
        total_elevation_gain: Some(120.0),
        activity_type: "Ride".to_string(),
        sport_type: "Ride".to_string(),
        workout_type: String::new(),
    }
}

fn benchmark_merge(c: &mut Criterion) {
    // A long-lived club file and a 50-page fetch that mostly overlaps it.
    let existing: Dataset = (0..20_000).map(ride).collect();
    let fetched: Vec<ActivityRecord> = (19_000..20_500).map(ride).collect();

    let mut group = c.benchmark_group("merge");

    group.bench_function("mostly_duplicates", |b| {
        b.iter_batched(
            || (existing.clone(), fetched.clone()),
            |(existing, fetched)| merge(black_box(existing), black_box(fetched)),
            BatchSize::LargeInput,
        )
    });

    group.bench_function("into_empty", |b| {
        b.iter_batched(
            || fetched.clone(),
            |fetched| merge(Dataset::new(), black_box(fetched)),
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group!(benches, benchmark_merge);
criterion_main!(benches);
