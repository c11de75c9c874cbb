//! CLI subcommand implementations.

pub mod inspect;
pub mod play;
pub mod simulate;
pub mod synth;

use std::path::Path;

use visage_common::config::MotionDefaults;
use visage_common::error::VisageError;
use visage_widget_engine::FixedLayout;
use visage_widget_model::{MouthConfig, PointerTrace, Rect, SpringParams, TraceHeader};

/// Tick rate for a replay: the flag when given, otherwise the user's
/// configured default.
pub fn resolve_tick_rate(flag: Option<u32>, motion: &MotionDefaults) -> u32 {
    flag.unwrap_or(motion.tick_rate_hz)
}

/// Spring coefficients from the configured motion defaults.
pub fn spring_defaults(motion: &MotionDefaults) -> SpringParams {
    SpringParams {
        stiffness: motion.stiffness,
        damping: motion.damping,
        mass: motion.mass,
        settle_epsilon: motion.settle_epsilon,
    }
}

/// Mouth config riding the configured spring; the tuned range mappings
/// keep their defaults.
pub fn mouth_config(motion: &MotionDefaults) -> MouthConfig {
    MouthConfig {
        spring: spring_defaults(motion),
        ..MouthConfig::default()
    }
}

/// Read and parse a trace file.
pub fn load_trace(path: &Path) -> Result<PointerTrace, VisageError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            VisageError::FileNotFound {
                path: path.to_path_buf(),
            }
        } else {
            VisageError::Io(e)
        }
    })?;
    PointerTrace::from_jsonl(&content).map_err(|e| VisageError::trace(e.to_string()))
}

/// Standard replay scene: one eye, one mouth, one logo strip, laid out
/// proportionally to the trace's viewport. Simulate and play both mount
/// against this layout so their numbers are comparable.
pub fn scene_layout(header: &TraceHeader) -> FixedLayout {
    let viewport = header.viewport();
    let w = viewport.w;
    let h = viewport.h;

    FixedLayout::new(viewport)
        .with_region("eye", Rect::centered(w * 0.72, h * 0.25, w * 0.16, w * 0.16))
        .with_region("mouth", Rect::centered(w * 0.31, h * 0.28, w * 0.25, h * 0.33))
        .with_region("logos", Rect::new(0.0, h * 0.58, w, h * 0.42))
}
