use criterion::{Criterion, black_box, criterion_group, criterion_main};

use typefast::engine::PerformanceTracker;
use typefast::engine::tuning::Tuning;
use typefast::generator::AdaptiveGenerator;

const KEYS: &str = "asdfjklghru";

fn make_tracker(keystrokes: usize) -> PerformanceTracker {
    let mut tracker = PerformanceTracker::with_unlocked_keys(KEYS, Tuning::default());
    let keys: Vec<char> = KEYS.chars().collect();
    for i in 0..keystrokes {
        let key = keys[i % keys.len()];
        // ~14% error rate, latencies spread 200-250ms
        tracker.record_keystroke(key, i % 7 != 0, 0.2 + (i % 50) as f64 / 1000.0);
    }
    tracker
}

fn bench_record(c: &mut Criterion) {
    c.bench_function("record_keystroke (500 keystrokes)", |b| {
        b.iter(|| make_tracker(black_box(500)))
    });
}

fn bench_snapshot(c: &mut Criterion) {
    let tracker = make_tracker(2000);
    c.bench_function("snapshot (12 keys)", |b| b.iter(|| black_box(&tracker).snapshot()));
}

fn bench_generate(c: &mut Criterion) {
    let snapshot = make_tracker(2000).snapshot();
    let mut generator = AdaptiveGenerator::english(Tuning::default(), Some(17));

    c.bench_function("generate_text (8 words)", |b| {
        b.iter(|| generator.generate_text(black_box(&snapshot), 8))
    });
}

criterion_group!(benches, bench_record, bench_snapshot, bench_generate);
criterion_main!(benches);
