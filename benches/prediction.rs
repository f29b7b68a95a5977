//! Criterion benchmarks for performance-critical hot paths
//!
//! Covers: sample queue push/pop, trajectory insertion with derived-field
//! recomputation, gesture classification, and full per-sample session
//! handling.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use gesture_predictor::classify::classifier::GestureClassifier;
use gesture_predictor::input::queue::SampleQueue;
use gesture_predictor::input::types::{TouchEvent, TouchSample};
use gesture_predictor::session::predictor::PredictionSession;
use gesture_predictor::time::clock::Timestamp;
use gesture_predictor::trajectory::tracker::TrajectoryTracker;

fn make_sample(id: u64, x: f64, millis: u64) -> TouchSample {
    TouchSample::new(id, x, 200.0, Timestamp::from_millis(millis))
}

fn make_move_event(id: u64, x: f64, millis: u64) -> TouchEvent {
    TouchEvent::moved(make_sample(id, x, millis))
}

// ---------------------------------------------------------------------------
// Sample queue benchmarks
// ---------------------------------------------------------------------------

fn bench_queue_push(c: &mut Criterion) {
    c.bench_function("queue_push", |b| {
        let queue = SampleQueue::with_capacity(8192);
        let (mut producer, mut consumer) = queue.split();
        let event = make_move_event(1, 100.0, 10);

        b.iter(|| {
            if !producer.push(black_box(event)) {
                consumer.pop_batch(4096);
                producer.push(black_box(event));
            }
        });
    });
}

fn bench_queue_pop_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("queue_pop_batch");
    for batch_size in [16, 64, 256] {
        group.bench_with_input(
            BenchmarkId::from_parameter(batch_size),
            &batch_size,
            |b, &size| {
                let queue = SampleQueue::with_capacity(8192);
                let (mut producer, mut consumer) = queue.split();
                for i in 0..8192u64 {
                    producer.push(make_move_event(1, i as f64, i));
                }

                b.iter(|| {
                    let batch = consumer.pop_batch(size);
                    for event in &batch {
                        producer.push(*event);
                    }
                    black_box(batch.len())
                });
            },
        );
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Trajectory benchmarks
// ---------------------------------------------------------------------------

fn bench_trajectory_insert(c: &mut Criterion) {
    c.bench_function("trajectory_insert", |b| {
        let mut tracker = TrajectoryTracker::new();
        let mut t = 0u64;

        b.iter(|| {
            t += 8;
            tracker.add_sample(black_box(make_sample(1, (t % 500) as f64, t)));
        });
    });
}

fn bench_predict_end_point(c: &mut Criterion) {
    let mut tracker = TrajectoryTracker::new();
    for i in 0..20u64 {
        tracker.add_sample(make_sample(1, i as f64 * 10.0, i * 8));
    }
    let trajectory = tracker.get(1).unwrap();

    c.bench_function("predict_end_point", |b| {
        b.iter(|| TrajectoryTracker::predict_end_point(black_box(trajectory), black_box(100.0)))
    });
}

// ---------------------------------------------------------------------------
// Classification benchmarks
// ---------------------------------------------------------------------------

fn bench_classify_swipe(c: &mut Criterion) {
    let mut tracker = TrajectoryTracker::new();
    for i in 0..20u64 {
        tracker.add_sample(make_sample(1, i as f64 * 15.0, i * 10));
    }
    let classifier = GestureClassifier::new();
    let now = Timestamp::from_millis(200);

    c.bench_function("classify_swipe", |b| {
        b.iter(|| classifier.classify(black_box(&tracker.active()), None, now))
    });
}

fn bench_classify_pinch(c: &mut Criterion) {
    let mut tracker = TrajectoryTracker::new();
    for i in 0..10u64 {
        tracker.add_sample(make_sample(1, 50.0 + i as f64 * 5.0, i * 10));
        tracker.add_sample(make_sample(2, 250.0 - i as f64 * 5.0, i * 10));
    }
    let classifier = GestureClassifier::new();
    let now = Timestamp::from_millis(100);

    c.bench_function("classify_pinch", |b| {
        b.iter(|| classifier.classify(black_box(&tracker.active()), None, now))
    });
}

// ---------------------------------------------------------------------------
// Session benchmarks
// ---------------------------------------------------------------------------

fn bench_session_sample_handling(c: &mut Criterion) {
    c.bench_function("session_handle_sample", |b| {
        let mut session = PredictionSession::new();
        session.touch_start(make_sample(1, 0.0, 0));
        let mut t = 0u64;

        b.iter(|| {
            t += 8;
            session.touch_move(black_box(make_sample(1, (t % 500) as f64, t)));
            black_box(session.drain_events().len())
        });
    });
}

criterion_group!(
    benches,
    bench_queue_push,
    bench_queue_pop_batch,
    bench_trajectory_insert,
    bench_predict_end_point,
    bench_classify_swipe,
    bench_classify_pinch,
    bench_session_sample_handling
);
criterion_main!(benches);
