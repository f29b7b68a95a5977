//! Gesture Predictor - Touch-Gesture Prediction Engine
//!
//! Replays and simulates touch traces through the prediction pipeline and
//! reports predictions, accuracy metrics, and derived quality profiles.

use gesture_predictor::app::cli::{Cli, Commands, ConfigAction};
use gesture_predictor::app::config::Config;
use gesture_predictor::input::queue::SampleQueue;
use gesture_predictor::latency::monitor::LatencyBudgetMonitor;
use gesture_predictor::quality::audio::AudioQualityController;
use gesture_predictor::quality::environment::EnvSnapshot;
use gesture_predictor::quality::render::RenderQualityController;
use gesture_predictor::replay::trace::TouchTrace;
use gesture_predictor::session::events::PredictionEvent;
use gesture_predictor::session::predictor::PredictionSession;
use gesture_predictor::time::clock::MonoClock;
use gesture_predictor::TouchPhase;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Parse CLI arguments first so we can use --verbose to set log level
    let cli = Cli::parse_args();

    // Initialize tracing (--verbose enables debug-level output)
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    // Initialize the monotonic clock
    MonoClock::init();

    // Load config
    let config = if let Some(path) = &cli.config {
        Config::load(path)?
    } else {
        Config::load_default()?
    };

    // Execute command
    match cli.command {
        Commands::Replay { input, mode } => {
            run_replay(&input, mode, &config)?;
        }
        Commands::Simulate { scenario, output } => {
            run_simulate(&scenario, output, &config)?;
        }
        Commands::Validate { trace } => {
            run_validate(&trace)?;
        }
        Commands::Config { action } => {
            run_config(action, &config)?;
        }
    }

    Ok(())
}

/// Feed a recorded trace through a session, logging predictions and metrics.
fn run_replay(input: &Path, mode: Option<String>, config: &Config) -> anyhow::Result<()> {
    let trace = TouchTrace::load(input)?;
    info!(
        name = %trace.metadata.name,
        events = trace.len(),
        duration_ms = trace.metadata.duration_ms,
        "replaying trace"
    );
    if let Err(index) = trace.check_monotonic() {
        warn!(index, "trace has out-of-order timestamps; offending samples will be dropped");
    }

    let mut options = config.gesture.predictor_options();
    if let Some(mode) = mode {
        options.mode = mode
            .parse()
            .map_err(gesture_predictor::Error::Config)?;
    }
    let mut session = PredictionSession::with_options(options);
    let mut monitor = LatencyBudgetMonitor::new(config.latency.target_latency_ms);
    let render = RenderQualityController::new();

    for event in &trace.events {
        session.handle(event);
        // Treat each sample's arrival as a frame tick for long-press polling
        // and latency accounting
        let now = event.sample.timestamp;
        session.on_frame(now);
        monitor.set_interaction_active(session.active_touches() > 0);
        monitor.record_frame(now);

        for emitted in session.drain_events() {
            log_event(&emitted);
        }
    }

    let metrics = session.metrics();
    info!(
        predictions = metrics.total_predictions,
        avg_confidence = format!("{:.2}", metrics.average_confidence()),
        avg_latency_ms = format!("{:.1}", metrics.average_latency_ms()),
        "replay finished"
    );
    for (gesture, count) in &metrics.by_gesture {
        info!(gesture = %gesture, count, "gesture total");
    }

    let report = monitor.report();
    info!(
        mode = ?report.mode,
        avg_frame_ms = format!("{:.1}", report.average_ms),
        dropped = report.dropped_frames,
        fps = render.profile(report.mode).fps,
        "latency summary"
    );
    Ok(())
}

/// Generate a synthetic trace; either save it or run it through the live
/// queue with a producer thread, the way a platform input thread would.
fn run_simulate(scenario: &str, output: Option<PathBuf>, config: &Config) -> anyhow::Result<()> {
    let trace = match scenario {
        "tap" => TouchTrace::synthetic_tap(160.0, 240.0, 0),
        "swipe" => TouchTrace::synthetic_swipe(0),
        "pinch" => TouchTrace::synthetic_pinch(0),
        other => anyhow::bail!("unknown scenario: {other} (expected tap | swipe | pinch)"),
    };

    if let Some(path) = output {
        trace.save(&path)?;
        info!(path = %path.display(), events = trace.len(), "synthetic trace written");
        return Ok(());
    }

    let queue = SampleQueue::new();
    let stats = queue.stats();
    let (mut producer, mut consumer) = queue.split();

    let events = trace.events.clone();
    let producer_thread = std::thread::spawn(move || {
        for event in events {
            while !producer.push(event) {
                std::thread::yield_now();
            }
        }
    });

    // Shared environment snapshot, as a telemetry poller would refresh it
    let env = gesture_predictor::quality::shared_env();
    {
        let mut snapshot = env.write();
        snapshot.is_mobile = true;
        snapshot.rtt_ms = Some(80.0);
    }

    let mut session = PredictionSession::with_options(config.gesture.predictor_options());
    let mut audio = AudioQualityController::new();
    audio.set_forced(config.quality.forced_tier()?);

    let mut received = 0usize;
    let total = trace.len();
    while received < total {
        for event in consumer.pop_batch(64) {
            session.handle(&event);
            session.on_frame(event.sample.timestamp);
            received += 1;
            for emitted in session.drain_events() {
                log_event(&emitted);
            }
        }
        std::thread::yield_now();
    }
    producer_thread.join().expect("producer thread panicked");

    let snapshot: EnvSnapshot = *env.read();
    let settings = audio.settings(&snapshot);
    info!(
        tier = %audio.tier_for(&snapshot),
        sample_rate = settings.sample_rate,
        buffer_ms = settings.buffer_ms,
        "audio quality derived"
    );
    info!(
        pushed = stats.events_pushed.load(std::sync::atomic::Ordering::Relaxed),
        dropped = stats.events_dropped.load(std::sync::atomic::Ordering::Relaxed),
        "queue stats"
    );
    Ok(())
}

/// Check a trace file for format and ordering problems.
fn run_validate(path: &Path) -> anyhow::Result<()> {
    let trace = TouchTrace::load(path)?;

    let starts = trace.events_in_phase(TouchPhase::Start).len();
    let terminals = trace.events_in_phase(TouchPhase::End).len()
        + trace.events_in_phase(TouchPhase::Cancel).len();
    if starts != terminals {
        warn!(starts, terminals, "unbalanced start/end events");
    }

    match trace.check_monotonic() {
        Ok(()) => {
            info!(
                name = %trace.metadata.name,
                events = trace.len(),
                touches = trace.touch_ids().len(),
                "trace is valid"
            );
            Ok(())
        }
        Err(index) => anyhow::bail!("out-of-order timestamp at event {index}"),
    }
}

/// Configuration subcommands.
fn run_config(action: ConfigAction, config: &Config) -> anyhow::Result<()> {
    match action {
        ConfigAction::Show => {
            println!("{}", config.to_toml()?);
        }
        ConfigAction::Init { force } => {
            let path = Config::default_path();
            if path.exists() && !force {
                anyhow::bail!(
                    "config already exists at {} (use --force to overwrite)",
                    path.display()
                );
            }
            Config::default().save(&path)?;
            info!(path = %path.display(), "default config written");
        }
        ConfigAction::Path => {
            println!("{}", Config::default_path().display());
        }
    }
    Ok(())
}

fn log_event(event: &PredictionEvent) {
    match event {
        PredictionEvent::GestureStarted { touch_id } => {
            info!(touch_id, "gesture started");
        }
        PredictionEvent::Prediction(p) => {
            info!(
                gesture = %p.gesture,
                probability = format!("{:.2}", p.probability),
                confidence = ?p.confidence,
                act = p.should_act,
                "prediction"
            );
        }
        PredictionEvent::ConfidenceChanged(level) => {
            info!(level = ?level, "confidence changed");
        }
        PredictionEvent::ActionTriggered(gesture) => {
            info!(gesture = %gesture, "action triggered");
        }
        PredictionEvent::GestureEnded {
            gesture,
            was_tracked_correctly,
        } => {
            info!(
                gesture = gesture.map(|g| g.as_str()).unwrap_or("none"),
                tracked = was_tracked_correctly,
                "gesture ended"
            );
        }
    }
}
