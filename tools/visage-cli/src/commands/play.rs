//! Replay a trace in real time.
//!
//! Drives the standard scene from a tokio interval at the requested tick
//! rate, feeding trace events as their (speed-scaled) timestamps come due.
//! Widget parameters are logged a few times per second rather than per
//! tick, so the output stays readable at 60Hz.

use std::path::PathBuf;

use visage_common::clock::{RateController, TickClock};
use visage_common::config::MotionDefaults;
use visage_widget_engine::{Stage, WidgetParams};
use visage_widget_model::{EyeConfig, ParallaxConfig, PointerEventKind};

use super::{mouth_config, resolve_tick_rate, scene_layout};

/// Rate at which parameter log lines are emitted (Hz).
const LOG_RATE_HZ: u32 = 4;

pub async fn run(
    path: PathBuf,
    tick_rate: Option<u32>,
    speed: f64,
    motion: &MotionDefaults,
) -> anyhow::Result<()> {
    let tick_rate = resolve_tick_rate(tick_rate, motion);
    anyhow::ensure!(tick_rate > 0, "tick rate must be positive");
    anyhow::ensure!(speed.is_finite() && speed > 0.0, "speed must be positive");

    let trace = super::load_trace(&path)?;

    let layout = scene_layout(&trace.header);
    let mut stage = Stage::new();
    let eye = stage.mount_eye(EyeConfig::default(), "eye", &layout);
    let mouth = stage.mount_mouth(mouth_config(motion), "mouth", &layout);
    stage.mount_parallax(ParallaxConfig::default(), "logos", &layout);

    tracing::info!(
        trace = %path.display(),
        duration_secs = trace.duration_ms() as f64 / 1000.0,
        speed,
        "Starting real-time replay"
    );

    let clock = TickClock::start();
    let mut interval =
        tokio::time::interval(std::time::Duration::from_secs_f64(1.0 / tick_rate as f64));
    let mut pending = trace.events.iter().peekable();
    let mut log_gate = RateController::new(LOG_RATE_HZ);

    loop {
        interval.tick().await;
        let now_ms = clock.elapsed_ms();
        let trace_ms = now_ms * speed;

        while let Some(event) = pending.peek() {
            if event.timestamp_ms as f64 > trace_ms {
                break;
            }
            match event.kind {
                PointerEventKind::Move { x, y } => stage.pointer_moved(x, y, &layout),
                PointerEventKind::Leave => stage.pointer_left(),
            }
            pending.next();
        }

        stage.tick(now_ms);

        if log_gate.should_tick(now_ms) {
            if let (
                Some(WidgetParams::Eye { angle_deg, .. }),
                Some(WidgetParams::Mouth {
                    gap, tongue_scale, ..
                }),
            ) = (stage.params(eye), stage.params(mouth))
            {
                tracing::info!(
                    t_secs = format!("{:.2}", trace_ms / 1000.0).as_str(),
                    eye_deg = format!("{:.1}", angle_deg).as_str(),
                    gap = format!("{:.1}", gap).as_str(),
                    tongue_scale = format!("{:.2}", tongue_scale).as_str(),
                    "replay"
                );
            }
        }

        if pending.peek().is_none() && !stage.is_active() {
            break;
        }
    }

    stage.dispose();
    tracing::info!("Replay finished; scene settled");
    Ok(())
}
