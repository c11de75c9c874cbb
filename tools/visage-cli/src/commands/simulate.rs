//! Replay a trace through a full widget stage, as fast as possible.
//!
//! Mounts the standard scene (eye, mouth, logo strip), interleaves the
//! trace's pointer events with fixed-rate animation ticks, and keeps
//! ticking after the last event until every widget settles back to idle.
//! With `--emit` each tick's parameters stream to stdout as JSONL;
//! otherwise a summary prints at the end.

use std::path::PathBuf;

use serde::Serialize;
use visage_common::config::MotionDefaults;
use visage_widget_engine::{Stage, WidgetHandle, WidgetParams};
use visage_widget_model::{EyeConfig, ParallaxConfig, PointerEventKind};

use super::{mouth_config, resolve_tick_rate, scene_layout};

/// Ticks allowed past the end of the trace before declaring a stall.
const RELEASE_TICK_BUDGET: u32 = 3600;

#[derive(Serialize)]
struct TickRecord<'a> {
    t_ms: u64,
    eye: &'a WidgetParams,
    mouth: &'a WidgetParams,
    logos: &'a WidgetParams,
}

struct SceneHandles {
    eye: WidgetHandle,
    mouth: WidgetHandle,
    logos: WidgetHandle,
}

pub fn run(
    path: PathBuf,
    tick_rate: Option<u32>,
    emit: bool,
    motion: &MotionDefaults,
) -> anyhow::Result<()> {
    let tick_rate = resolve_tick_rate(tick_rate, motion);
    anyhow::ensure!(tick_rate > 0, "tick rate must be positive");

    let trace = super::load_trace(&path)?;

    let layout = scene_layout(&trace.header);
    let mut stage = Stage::new();
    let handles = SceneHandles {
        eye: stage.mount_eye(EyeConfig::default(), "eye", &layout),
        mouth: stage.mount_mouth(mouth_config(motion), "mouth", &layout),
        logos: stage.mount_parallax(ParallaxConfig::default(), "logos", &layout),
    };

    let tick_ms = 1000.0 / tick_rate as f64;
    let mut now_ms = 0.0;
    let mut tick_count: u64 = 0;
    let mut max_gap = f64::MIN;
    stage.tick(now_ms);

    let mut on_tick = |stage: &Stage, now_ms: f64| -> anyhow::Result<()> {
        if let Some(WidgetParams::Mouth { gap, .. }) = stage.params(handles.mouth) {
            max_gap = max_gap.max(gap);
        }
        if emit {
            emit_tick(stage, &handles, now_ms)?;
        }
        Ok(())
    };

    for event in &trace.events {
        let event_ms = event.timestamp_ms as f64;
        while now_ms + tick_ms <= event_ms {
            now_ms += tick_ms;
            stage.tick(now_ms);
            tick_count += 1;
            on_tick(&stage, now_ms)?;
        }
        match event.kind {
            PointerEventKind::Move { x, y } => stage.pointer_moved(x, y, &layout),
            PointerEventKind::Leave => stage.pointer_left(),
        }
    }

    // Run the release out until the scene goes quiescent.
    let mut budget = RELEASE_TICK_BUDGET;
    while stage.is_active() && budget > 0 {
        now_ms += tick_ms;
        stage.tick(now_ms);
        tick_count += 1;
        on_tick(&stage, now_ms)?;
        budget -= 1;
    }
    let settled = !stage.is_active();
    if !settled {
        tracing::warn!("Scene did not settle within the release budget");
    }

    stage.dispose();

    if !emit {
        println!("Simulated: {}", path.display());
        println!("  Events: {}", trace.events.len());
        println!("  Ticks: {} @ {}Hz", tick_count, tick_rate);
        println!("  Simulated time: {:.2}s", now_ms / 1000.0);
        if max_gap > f64::MIN {
            println!("  Peak mouth gap: {:.1}", max_gap);
        }
        println!("  Settled: {}", if settled { "yes" } else { "no" });
    }

    Ok(())
}

fn emit_tick(stage: &Stage, handles: &SceneHandles, now_ms: f64) -> anyhow::Result<()> {
    let (Some(eye), Some(mouth), Some(logos)) = (
        stage.params(handles.eye),
        stage.params(handles.mouth),
        stage.params(handles.logos),
    ) else {
        return Ok(());
    };
    let record = TickRecord {
        t_ms: now_ms.round() as u64,
        eye: &eye,
        mouth: &mouth,
        logos: &logos,
    };
    println!("{}", serde_json::to_string(&record)?);
    Ok(())
}
