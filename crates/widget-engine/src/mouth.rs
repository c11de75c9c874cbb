//! The mouth widget: lip gap and tongue driven by a sprung pointer offset.
//!
//! Raw offsets from the mouth region's center are never rendered directly.
//! A two-axis spring chases the offset, and three range mappings read the
//! sprung position: lip gap from y, tongue offset from x, and tongue scale
//! chained off the gap so the tongue grows as the mouth opens. On leave the
//! spring retargets to the idle offset and the mouth glides closed through
//! the same mappings.

use visage_motion_core::{apply_mapping, Spring2D, TrackingPhase};
use visage_widget_model::{MouthConfig, Vec2};

use crate::binding::{WidgetBinding, WidgetParams};

/// Motion state for one mouth.
#[derive(Debug, Clone)]
pub struct MouthTracker {
    config: MouthConfig,
    spring: Spring2D,
    phase: TrackingPhase,
}

impl MouthTracker {
    pub fn new(config: MouthConfig) -> Self {
        let idle = Vec2::new(config.idle_x, config.idle_y);
        Self {
            spring: Spring2D::new(config.spring, idle),
            config,
            phase: TrackingPhase::Idle,
        }
    }

    /// Sprung offset feeding the mappings this frame.
    pub fn smoothed_offset(&self) -> Vec2 {
        self.spring.position()
    }

    pub fn config(&self) -> &MouthConfig {
        &self.config
    }

    fn idle_offset(&self) -> Vec2 {
        Vec2::new(self.config.idle_x, self.config.idle_y)
    }
}

impl Default for MouthTracker {
    fn default() -> Self {
        Self::new(MouthConfig::default())
    }
}

impl WidgetBinding for MouthTracker {
    fn on_sample(&mut self, offset: Vec2) {
        self.spring.set_target(offset);
        self.phase = self.phase.on_sample();
    }

    fn on_leave(&mut self) {
        self.spring.set_target(self.idle_offset());
        self.phase = self.phase.on_leave();
    }

    fn tick(&mut self, dt_secs: f64) {
        self.spring.tick(dt_secs);
        if self.phase == TrackingPhase::Releasing && self.spring.is_settled() {
            // Land exactly on the idle offset so the gap reads its idle value.
            self.spring.snap_to(self.idle_offset());
            self.phase = self.phase.on_settled();
        }
    }

    fn params(&self) -> WidgetParams {
        let pos = self.spring.position();
        let gap = apply_mapping(&self.config.gap, pos.y);
        WidgetParams::Mouth {
            gap,
            tongue_offset: apply_mapping(&self.config.tongue_offset, pos.x),
            tongue_scale: apply_mapping(&self.config.tongue_scale, gap),
        }
    }

    fn phase(&self) -> TrackingPhase {
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TICK: f64 = 1.0 / 60.0;

    fn mouth_params(tracker: &MouthTracker) -> (f64, f64, f64) {
        match tracker.params() {
            WidgetParams::Mouth {
                gap,
                tongue_offset,
                tongue_scale,
            } => (gap, tongue_offset, tongue_scale),
            other => panic!("unexpected params {:?}", other),
        }
    }

    fn settle(tracker: &mut MouthTracker) {
        for _ in 0..1200 {
            tracker.tick(TICK);
        }
    }

    #[test]
    fn test_idle_mouth_is_closed() {
        let mouth = MouthTracker::default();
        let (gap, tongue_offset, tongue_scale) = mouth_params(&mouth);
        assert!((gap - 5.0).abs() < 1e-9);
        assert!(tongue_offset.abs() < 1e-9);
        assert!((tongue_scale - 0.5).abs() < 1e-9);
        assert_eq!(mouth.phase(), TrackingPhase::Idle);
    }

    #[test]
    fn test_pointer_above_center_opens_wide() {
        let mut mouth = MouthTracker::default();
        mouth.on_sample(Vec2::new(0.0, -150.0));
        settle(&mut mouth);

        let (gap, _, tongue_scale) = mouth_params(&mouth);
        assert!((gap - 60.0).abs() < 0.05);
        assert!((tongue_scale - 1.2).abs() < 0.01);
    }

    #[test]
    fn test_centered_pointer_reads_the_midpoint() {
        let mut mouth = MouthTracker::default();
        mouth.on_sample(Vec2::ZERO);
        settle(&mut mouth);

        let (gap, tongue_offset, _) = mouth_params(&mouth);
        assert!((gap - 32.5).abs() < 0.05);
        assert!(tongue_offset.abs() < 0.05);
    }

    #[test]
    fn test_tongue_follows_horizontal_offset() {
        let mut mouth = MouthTracker::default();
        mouth.on_sample(Vec2::new(150.0, 0.0));
        settle(&mut mouth);

        let (_, tongue_offset, _) = mouth_params(&mouth);
        assert!((tongue_offset - 40.0).abs() < 0.05);

        mouth.on_sample(Vec2::new(-150.0, 0.0));
        settle(&mut mouth);
        let (_, tongue_offset, _) = mouth_params(&mouth);
        assert!((tongue_offset + 40.0).abs() < 0.05);
    }

    #[test]
    fn test_tongue_scale_is_chained_off_the_gap() {
        let mut mouth = MouthTracker::default();
        mouth.on_sample(Vec2::new(0.0, -150.0));
        settle(&mut mouth);

        // Gap is ~60, so the chained mapping reads its own endpoint.
        let (gap, _, tongue_scale) = mouth_params(&mouth);
        let expected = apply_mapping(&mouth.config().tongue_scale, gap);
        assert!((tongue_scale - expected).abs() < 1e-12);
    }

    #[test]
    fn test_leave_glides_closed_without_snapping() {
        let mut mouth = MouthTracker::default();
        mouth.on_sample(Vec2::new(0.0, -150.0));
        settle(&mut mouth);

        mouth.on_leave();
        assert_eq!(mouth.phase(), TrackingPhase::Releasing);

        let (mut prev_gap, _, _) = mouth_params(&mouth);
        let mut frames = 0;
        while mouth.phase() == TrackingPhase::Releasing && frames < 1200 {
            mouth.tick(TICK);
            let (gap, _, _) = mouth_params(&mouth);
            // Critically damped default: the gap closes monotonically.
            assert!(gap <= prev_gap + 1e-9, "gap reopened: {} -> {}", prev_gap, gap);
            // No instant snap: single-frame changes stay small.
            assert!(prev_gap - gap < 5.0, "gap jumped by {}", prev_gap - gap);
            prev_gap = gap;
            frames += 1;
        }

        assert_eq!(mouth.phase(), TrackingPhase::Idle);
        let (gap, _, _) = mouth_params(&mouth);
        assert!((gap - 5.0).abs() < 1e-9);
        assert!(!mouth.is_active());
    }

    #[test]
    fn test_sample_during_release_reopens() {
        let mut mouth = MouthTracker::default();
        mouth.on_sample(Vec2::new(0.0, -150.0));
        settle(&mut mouth);
        mouth.on_leave();
        for _ in 0..10 {
            mouth.tick(TICK);
        }
        assert_eq!(mouth.phase(), TrackingPhase::Releasing);

        mouth.on_sample(Vec2::new(0.0, -150.0));
        assert_eq!(mouth.phase(), TrackingPhase::Tracking);
        settle(&mut mouth);
        let (gap, _, _) = mouth_params(&mouth);
        assert!((gap - 60.0).abs() < 0.05);
    }

    #[test]
    fn test_offsets_past_the_domain_clamp() {
        let mut mouth = MouthTracker::default();
        mouth.on_sample(Vec2::new(0.0, -400.0));
        settle(&mut mouth);

        let (gap, _, tongue_scale) = mouth_params(&mouth);
        assert!((gap - 60.0).abs() < 1e-6);
        assert!((tongue_scale - 1.2).abs() < 1e-6);
    }
}
