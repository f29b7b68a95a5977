//! Prediction Session Integration Tests
//!
//! End-to-end gesture scenarios through the full pipeline:
//! - Complete gesture lifecycles (start -> move -> end) with event ordering
//! - Trace replay through the session
//! - Accuracy scoring and metrics across multiple gestures
//! - Long-press timer interaction with the per-sample classification path

use gesture_predictor::classify::confidence::{ConfidenceLevel, PredictionMode};
use gesture_predictor::classify::gesture::GestureKind;
use gesture_predictor::input::types::TouchSample;
use gesture_predictor::replay::trace::TouchTrace;
use gesture_predictor::session::events::PredictionEvent;
use gesture_predictor::session::predictor::{PredictionSession, PredictorOptions};
use gesture_predictor::time::clock::Timestamp;

// ============================================================================
// Helper Functions
// ============================================================================

/// Create a touch sample at a position and time
fn sample(id: u64, x: f64, y: f64, millis: u64) -> TouchSample {
    TouchSample::new(id, x, y, Timestamp::from_millis(millis))
}

/// Create a session in the given mode
fn session_in(mode: PredictionMode) -> PredictionSession {
    PredictionSession::with_options(PredictorOptions {
        mode,
        ..Default::default()
    })
}

/// Extract predicted gestures from an event list
fn predicted_gestures(events: &[PredictionEvent]) -> Vec<GestureKind> {
    events
        .iter()
        .filter_map(|e| match e {
            PredictionEvent::Prediction(p) => Some(p.gesture),
            _ => None,
        })
        .collect()
}

// ============================================================================
// Gesture Lifecycle Scenarios
// ============================================================================

#[test]
fn test_tap_lifecycle_event_order() {
    let mut session = session_in(PredictionMode::Balanced);
    session.touch_start(sample(1, 100.0, 100.0, 0));
    session.touch_end(sample(1, 102.0, 100.0, 80));

    let events = session.drain_events();

    // Session entry comes first
    assert!(matches!(
        events[0],
        PredictionEvent::GestureStarted { touch_id: 1 }
    ));
    // Prediction precedes its confidence change
    let prediction_index = events
        .iter()
        .position(|e| matches!(e, PredictionEvent::Prediction(_)))
        .expect("expected prediction");
    let confidence_index = events
        .iter()
        .position(|e| matches!(e, PredictionEvent::ConfidenceChanged(_)))
        .expect("expected confidence change");
    assert!(prediction_index < confidence_index);
    // Gesture end closes the sequence
    assert!(matches!(
        events.last(),
        Some(PredictionEvent::GestureEnded {
            gesture: Some(GestureKind::Tap),
            ..
        })
    ));
}

#[test]
fn test_swipe_progression_tap_to_swipe() {
    let mut session = session_in(PredictionMode::Balanced);
    session.touch_start(sample(1, 0.0, 200.0, 0));
    session.touch_move(sample(1, 40.0, 200.0, 40));
    session.touch_move(sample(1, 90.0, 200.0, 90));
    session.touch_move(sample(1, 150.0, 200.0, 150));
    session.touch_end(sample(1, 150.0, 200.0, 155));

    let events = session.drain_events();
    let gestures = predicted_gestures(&events);

    // The first sample classifies as a tap, later samples as a swipe
    assert_eq!(gestures.first(), Some(&GestureKind::Tap));
    assert!(gestures.contains(&GestureKind::SwipeRight));

    // Final classification is the swipe, and it matched the last prediction
    assert!(events.iter().any(|e| matches!(
        e,
        PredictionEvent::GestureEnded {
            gesture: Some(GestureKind::SwipeRight),
            was_tracked_correctly: true,
        }
    )));
}

#[test]
fn test_double_tap_sequence() {
    let mut session = session_in(PredictionMode::Balanced);

    // First tap
    session.touch_start(sample(1, 100.0, 100.0, 0));
    session.touch_end(sample(1, 100.0, 100.0, 60));
    // Second tap 150 ms later
    session.touch_start(sample(2, 100.0, 100.0, 210));
    session.touch_end(sample(2, 100.0, 100.0, 260));

    assert_eq!(session.last_gesture(), Some(GestureKind::DoubleTap));
    let metrics = session.metrics();
    assert_eq!(metrics.by_gesture[&GestureKind::Tap], 1);
    assert_eq!(metrics.by_gesture[&GestureKind::DoubleTap], 1);
}

#[test]
fn test_two_taps_outside_window_stay_taps() {
    let mut session = session_in(PredictionMode::Balanced);

    session.touch_start(sample(1, 100.0, 100.0, 0));
    session.touch_end(sample(1, 100.0, 100.0, 60));
    // 500 ms gap exceeds the 300 ms double-tap window
    session.touch_start(sample(2, 100.0, 100.0, 560));
    session.touch_end(sample(2, 100.0, 100.0, 620));

    assert_eq!(session.last_gesture(), Some(GestureKind::Tap));
    assert_eq!(session.metrics().by_gesture[&GestureKind::Tap], 2);
}

#[test]
fn test_pinch_lifecycle() {
    let mut session = session_in(PredictionMode::Aggressive);

    session.touch_start(sample(1, 50.0, 200.0, 0));
    session.touch_start(sample(2, 250.0, 200.0, 0));
    for step in 1..=4u64 {
        let t = step * 40;
        session.touch_move(sample(1, 50.0 + step as f64 * 12.5, 200.0, t));
        session.touch_move(sample(2, 250.0 - step as f64 * 12.5, 200.0, t));
    }
    session.touch_end(sample(1, 100.0, 200.0, 200));
    session.touch_end(sample(2, 200.0, 200.0, 200));

    assert_eq!(session.active_touches(), 0);
    assert_eq!(session.metrics().by_gesture[&GestureKind::PinchIn], 1);
    assert!(session
        .drain_events()
        .iter()
        .any(|e| matches!(e, PredictionEvent::ActionTriggered(GestureKind::PinchIn))));
}

#[test]
fn test_mode_changes_action_eagerness() {
    // A drag (p = 0.7) triggers in aggressive mode but not balanced
    let run = |mode| {
        let mut session = session_in(mode);
        session.touch_start(sample(1, 0.0, 0.0, 0));
        session.touch_move(sample(1, 40.0, 0.0, 400));
        session.touch_move(sample(1, 80.0, 0.0, 800));
        session
            .drain_events()
            .iter()
            .any(|e| matches!(e, PredictionEvent::ActionTriggered(GestureKind::Drag)))
    };

    assert!(run(PredictionMode::Aggressive));
    assert!(!run(PredictionMode::Balanced));
}

#[test]
fn test_min_confidence_to_act_overrides_mode() {
    // Balanced would not act on a drag (0.7 < 0.75); an explicit lower
    // threshold makes it act without changing surfacing behavior
    let mut session = PredictionSession::with_options(PredictorOptions {
        mode: PredictionMode::Balanced,
        min_confidence_to_act: Some(0.65),
        ..Default::default()
    });
    session.touch_start(sample(1, 0.0, 0.0, 0));
    session.touch_move(sample(1, 40.0, 0.0, 400));
    session.touch_move(sample(1, 80.0, 0.0, 800));

    assert!(session
        .drain_events()
        .iter()
        .any(|e| matches!(e, PredictionEvent::ActionTriggered(GestureKind::Drag))));
}

#[test]
fn test_conservative_mode_suppresses_drag_entirely() {
    // Drag's 0.7 probability is below the conservative surface threshold (0.8)
    let mut session = session_in(PredictionMode::Conservative);
    session.touch_start(sample(1, 0.0, 0.0, 0));
    session.touch_move(sample(1, 40.0, 0.0, 400));
    session.touch_move(sample(1, 80.0, 0.0, 800));

    let events = session.drain_events();
    assert!(!predicted_gestures(&events).contains(&GestureKind::Drag));
}

// ============================================================================
// Long-Press Timer Path
// ============================================================================

#[test]
fn test_long_press_timer_vs_classifier_precedence() {
    // The per-sample classifier reports tap on the initial sample; the timer
    // path later replaces it with long-press. Both emissions happen, in order.
    let mut session = session_in(PredictionMode::Balanced);
    session.touch_start(sample(1, 50.0, 50.0, 0));

    session.on_frame(Timestamp::from_millis(250));
    session.on_frame(Timestamp::from_millis(510));

    let events = session.drain_events();
    let gestures = predicted_gestures(&events);
    assert_eq!(gestures, vec![GestureKind::Tap, GestureKind::LongPress]);
    assert_eq!(
        session.last_prediction().unwrap().gesture,
        GestureKind::LongPress
    );
}

#[test]
fn test_long_press_rearmed_for_new_session() {
    let mut session = session_in(PredictionMode::Balanced);

    // First session ends quickly; its deadline must not fire later
    session.touch_start(sample(1, 50.0, 50.0, 0));
    session.touch_end(sample(1, 50.0, 50.0, 40));
    session.drain_events();

    // Second session starts; only its own deadline may fire
    session.touch_start(sample(2, 80.0, 80.0, 1_000));
    session.drain_events();

    // Old deadline (500 ms) has long passed; nothing fires yet
    session.on_frame(Timestamp::from_millis(1_100));
    assert!(session.drain_events().is_empty());

    // New deadline (1500 ms) fires
    session.on_frame(Timestamp::from_millis(1_520));
    let events = session.drain_events();
    assert!(predicted_gestures(&events).contains(&GestureKind::LongPress));
}

// ============================================================================
// Accuracy Scoring
// ============================================================================

#[test]
fn test_confirm_and_reject_scoring() {
    let mut session = session_in(PredictionMode::Balanced);
    session.touch_start(sample(1, 100.0, 100.0, 0));

    session.confirm_gesture(GestureKind::Tap);
    session.confirm_gesture(GestureKind::SwipeLeft);
    let before_reject = session.metrics().incorrect_predictions;
    session.reject_prediction();

    let metrics = session.metrics();
    assert_eq!(metrics.correct_predictions, 1);
    assert_eq!(metrics.incorrect_predictions, before_reject + 1);
    assert!(metrics.accuracy() >= 0.0 && metrics.accuracy() <= 1.0);
    assert!(session.last_prediction().is_none());
}

#[test]
fn test_metrics_survive_reset_but_not_reset_metrics() {
    let mut session = session_in(PredictionMode::Balanced);
    session.touch_start(sample(1, 100.0, 100.0, 0));
    session.confirm_gesture(GestureKind::Tap);

    session.reset();
    assert_eq!(session.metrics().correct_predictions, 1);

    session.reset_metrics();
    assert_eq!(session.metrics().correct_predictions, 0);
    assert_eq!(session.metrics().total_predictions, 0);
}

// ============================================================================
// Trace Replay
// ============================================================================

#[test]
fn test_synthetic_swipe_trace_through_session() {
    let trace = TouchTrace::synthetic_swipe(0);
    let mut session = session_in(PredictionMode::Balanced);

    let mut all_events = Vec::new();
    for event in &trace.events {
        session.handle(event);
        session.on_frame(event.sample.timestamp);
        all_events.extend(session.drain_events());
    }

    assert!(predicted_gestures(&all_events).contains(&GestureKind::SwipeRight));
    assert_eq!(session.metrics().by_gesture[&GestureKind::SwipeRight], 1);
    assert_eq!(session.active_touches(), 0);
}

#[test]
fn test_synthetic_pinch_trace_through_session() {
    let trace = TouchTrace::synthetic_pinch(0);
    let mut session = session_in(PredictionMode::Balanced);

    for event in &trace.events {
        session.handle(event);
    }

    assert_eq!(session.metrics().by_gesture[&GestureKind::PinchIn], 1);
}

#[test]
fn test_trace_roundtrip_preserves_session_behavior() {
    let trace = TouchTrace::synthetic_tap(120.0, 240.0, 0);
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tap.json");
    trace.save(&path).unwrap();
    let loaded = TouchTrace::load(&path).unwrap();

    let mut session = session_in(PredictionMode::Balanced);
    for event in &loaded.events {
        session.handle(event);
    }
    assert_eq!(session.last_gesture(), Some(GestureKind::Tap));
}

// ============================================================================
// Degenerate Input
// ============================================================================

#[test]
fn test_unknown_ids_and_empty_input_are_silent() {
    let mut session = session_in(PredictionMode::Balanced);

    session.touch_end(sample(9, 0.0, 0.0, 0));
    session.touch_cancel(sample(9, 0.0, 0.0, 0));
    session.on_frame(Timestamp::from_millis(10_000));

    assert!(session.drain_events().is_empty());
    assert_eq!(session.metrics().total_predictions, 0);
}

#[test]
fn test_cancel_mid_gesture_leaves_no_trace() {
    let mut session = session_in(PredictionMode::Balanced);
    session.touch_start(sample(1, 0.0, 200.0, 0));
    session.touch_move(sample(1, 80.0, 200.0, 80));
    session.drain_events();

    session.touch_cancel(sample(1, 80.0, 200.0, 90));

    assert_eq!(session.active_touches(), 0);
    assert!(session.last_prediction().is_none());
    assert!(session.metrics().by_gesture.is_empty());
    // The cancelled touch's long-press deadline is dead too
    session.on_frame(Timestamp::from_millis(600));
    assert!(session.drain_events().is_empty());
}

#[test]
fn test_confidence_transitions_across_gesture() {
    let mut session = session_in(PredictionMode::Aggressive);
    // Slow drag: 0.7 probability → medium confidence after a high-confidence
    // initial tap classification
    session.touch_start(sample(1, 0.0, 0.0, 0));
    session.touch_move(sample(1, 40.0, 0.0, 400));

    let events = session.drain_events();
    let levels: Vec<ConfidenceLevel> = events
        .iter()
        .filter_map(|e| match e {
            PredictionEvent::ConfidenceChanged(level) => Some(*level),
            _ => None,
        })
        .collect();
    assert_eq!(levels, vec![ConfidenceLevel::High, ConfidenceLevel::Medium]);
}
