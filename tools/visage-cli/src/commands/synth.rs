//! Generate synthetic pointer traces.
//!
//! Deterministic test patterns covering the motions the widgets care
//! about: straight sweeps, circular orbits (which exercise the eye's
//! wraparound seam), a figure-eight that crosses every region, and a
//! dwell-with-jitter pattern that stresses the springs' settle detection.

use std::path::PathBuf;

use clap::ValueEnum;
use visage_widget_model::{PointerEvent, PointerTrace, TraceHeader};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SynthPattern {
    /// Horizontal sweep across the viewport at mid-height
    Sweep,
    /// Circular orbit around the viewport center
    Circle,
    /// Lissajous figure-eight spanning the viewport
    FigureEight,
    /// Dwell near the center with small pseudo-random jitter
    Jitter,
}

pub fn run(
    output: PathBuf,
    pattern: SynthPattern,
    duration_secs: f64,
    rate: u32,
    width: u32,
    height: u32,
    leave_at_end: bool,
) -> anyhow::Result<()> {
    anyhow::ensure!(duration_secs > 0.0, "duration must be positive");
    anyhow::ensure!(rate > 0, "sample rate must be positive");

    let header = TraceHeader::new(width, height, rate);
    let sample_count = (duration_secs * rate as f64).ceil() as u64;
    let interval_ms = 1000.0 / rate as f64;

    let mut events = Vec::with_capacity(sample_count as usize + 1);
    let mut rng = Lcg::new(0x5eed);
    for i in 0..sample_count {
        let t_ms = (i as f64 * interval_ms).round() as u64;
        let progress = i as f64 / sample_count as f64;
        let (x, y) = sample_position(pattern, progress, width as f64, height as f64, &mut rng);
        events.push(PointerEvent::moved(t_ms, round2(x), round2(y)));
    }
    if leave_at_end {
        let t_ms = (sample_count as f64 * interval_ms).round() as u64;
        events.push(PointerEvent::leave(t_ms));
    }

    let trace = PointerTrace { header, events };
    std::fs::write(&output, trace.to_jsonl()?)?;

    println!("Wrote trace: {}", output.display());
    println!("  Pattern: {:?}", pattern);
    println!("  Viewport: {}x{}", width, height);
    println!(
        "  Events: {} moves{}",
        trace.move_count(),
        if leave_at_end { " + 1 leave" } else { "" }
    );
    println!("  Duration: {:.2}s @ {}Hz", duration_secs, rate);

    Ok(())
}

fn sample_position(
    pattern: SynthPattern,
    progress: f64,
    w: f64,
    h: f64,
    rng: &mut Lcg,
) -> (f64, f64) {
    use std::f64::consts::TAU;

    let (cx, cy) = (w / 2.0, h / 2.0);
    match pattern {
        SynthPattern::Sweep => {
            let margin = w * 0.08;
            (margin + progress * (w - 2.0 * margin), cy * 0.55)
        }
        SynthPattern::Circle => {
            let radius = w.min(h) * 0.35;
            let angle = progress * TAU;
            (cx + radius * angle.cos(), cy + radius * angle.sin())
        }
        SynthPattern::FigureEight => {
            let angle = progress * TAU;
            (
                cx + w * 0.38 * angle.sin(),
                cy + h * 0.36 * (2.0 * angle).sin(),
            )
        }
        SynthPattern::Jitter => (cx + rng.next_signed() * 12.0, cy + rng.next_signed() * 12.0),
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Tiny deterministic generator so synthetic jitter reproduces between
/// runs without pulling in a randomness dependency.
struct Lcg(u64);

impl Lcg {
    fn new(seed: u64) -> Self {
        Self(seed)
    }

    /// Uniform-ish value in [-1, 1].
    fn next_signed(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        ((self.0 >> 11) as f64 / (1u64 << 53) as f64) * 2.0 - 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_stay_inside_the_viewport() {
        let mut rng = Lcg::new(1);
        for pattern in [
            SynthPattern::Sweep,
            SynthPattern::Circle,
            SynthPattern::FigureEight,
            SynthPattern::Jitter,
        ] {
            for i in 0..=100 {
                let (x, y) = sample_position(pattern, i as f64 / 100.0, 1280.0, 720.0, &mut rng);
                assert!((0.0..=1280.0).contains(&x), "{pattern:?} x={x}");
                assert!((0.0..=720.0).contains(&y), "{pattern:?} y={y}");
            }
        }
    }

    #[test]
    fn test_jitter_is_deterministic() {
        let mut a = Lcg::new(42);
        let mut b = Lcg::new(42);
        for _ in 0..50 {
            assert_eq!(a.next_signed(), b.next_signed());
        }
    }
}
