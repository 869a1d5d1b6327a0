use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use film_room::{FilterEngine, FilterState, NumericRange, PlayKind, PlayLoader, PlayRecord, RangeFilterState};
use std::collections::BTreeSet;
use tempfile::TempDir;
use tokio::runtime::Runtime;

fn synthetic_plays(count: usize) -> Vec<PlayRecord> {
    (0..count)
        .map(|i| {
            let kind = match i % 5 {
                0 | 1 => PlayKind::pass(if i % 2 == 0 { "Complete" } else { "Incomplete" }),
                2 | 3 => PlayKind::run(["Left", "Middle", "Right"][i % 3]),
                _ => PlayKind::special_teams(["Punt", "Kickoff", "Field Goal"][i % 3]),
            };
            PlayRecord::new(format!("play-{i:05}"), kind)
                .with_game(format!("Week {}", i % 17 + 1))
                .with_quarter((i % 4 + 1) as u8)
                .with_down_and_distance((i % 4 + 1) as u8, (i % 20 + 1) as u32)
                .with_yard_line((i % 101) as i32)
                .with_yards_gained((i % 30) as i32 - 5)
                .with_epa((i % 40) as f64 / 10.0 - 2.0)
                .with_touchdown(i % 23 == 0)
                .with_shotgun(i % 2 == 0)
        })
        .collect()
}

fn select(category: &str, values: &[&str]) -> (String, BTreeSet<String>) {
    (
        category.to_string(),
        values.iter().map(|value| value.to_string()).collect(),
    )
}

/// Filtering with discrete, bucketed and range selections combined
fn bench_filter_plays(c: &mut Criterion) {
    let engine = FilterEngine::default();
    let mut group = c.benchmark_group("filter_plays");

    let filters: FilterState = [
        select("playType", &["Pass", "Run"]),
        select("distanceType", &["Short: 1-3", "Medium: 4-7"]),
        select("isShotgun", &["Yes"]),
    ]
    .into_iter()
    .collect();
    let mut ranges = RangeFilterState::new();
    ranges.insert("yardLine".to_string(), NumericRange::new(20.0, 80.0));
    ranges.insert("epaRange".to_string(), NumericRange::new(-1.0, 1.5));

    for size in [1_000usize, 10_000] {
        let plays = synthetic_plays(size);
        group.bench_with_input(BenchmarkId::new("combined", size), &plays, |b, plays| {
            b.iter(|| engine.filter_plays(black_box(plays), black_box(&filters), black_box(&ranges)))
        });
    }

    let plays = synthetic_plays(10_000);
    let none = FilterState::new();
    let no_ranges = RangeFilterState::new();
    group.bench_function("inactive", |b| {
        b.iter(|| engine.filter_plays(black_box(&plays), black_box(&none), black_box(&no_ranges)))
    });

    group.finish();
}

/// Facet counts over a large library
fn bench_facet_counts(c: &mut Criterion) {
    let engine = FilterEngine::default();
    let plays = synthetic_plays(10_000);

    c.bench_function("facet_counts_game", |b| {
        b.iter(|| engine.facet_counts(black_box(&plays), black_box("game")))
    });

    c.bench_function("facet_counts_gain_type", |b| {
        b.iter(|| engine.facet_counts(black_box(&plays), black_box("gainType")))
    });
}

/// Loading a directory of game files
fn bench_load_directory(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let temp_dir = TempDir::new().unwrap();

    let plays = synthetic_plays(2_000);
    for (week, chunk) in plays.chunks(250).enumerate() {
        let path = temp_dir.path().join(format!("week-{:02}.json", week + 1));
        std::fs::write(path, serde_json::to_string(chunk).unwrap()).unwrap();
    }

    let loader = PlayLoader::new();
    c.bench_function("load_directory", |b| {
        b.iter(|| {
            rt.block_on(async { loader.load_directory(black_box(temp_dir.path())).await })
        })
    });
}

criterion_group!(benches, bench_filter_plays, bench_facet_counts, bench_load_directory);
criterion_main!(benches);
