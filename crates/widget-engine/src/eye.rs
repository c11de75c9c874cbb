//! The eye widget: a pupil orbiting its socket to face the pointer.
//!
//! The eye listens viewport-wide but anchors at its own region center, so
//! the bearing is meaningful wherever the pointer is. By default the angle
//! is applied directly without smoothing; configuring `smoothing` makes the
//! pupil swing along the shortest arc instead of jumping.

use visage_motion_core::{bearing_deg, CircularMotion, TrackingPhase};
use visage_widget_model::{EyeConfig, Vec2};

use crate::binding::{WidgetBinding, WidgetParams};

/// Motion state for one eye.
#[derive(Debug, Clone)]
pub struct EyeTracker {
    config: EyeConfig,
    smoothing: Option<CircularMotion>,
    angle_deg: f64,
    phase: TrackingPhase,
}

impl EyeTracker {
    pub fn new(config: EyeConfig) -> Self {
        let smoothing = config
            .smoothing
            .map(|params| CircularMotion::new(params, config.idle_angle_deg));
        Self {
            angle_deg: config.idle_angle_deg,
            smoothing,
            config,
            phase: TrackingPhase::Idle,
        }
    }

    /// Render angle this frame, in `(-180, 180]` degrees.
    pub fn angle_deg(&self) -> f64 {
        match &self.smoothing {
            Some(motion) => motion.angle_deg(),
            None => self.angle_deg,
        }
    }

    pub fn config(&self) -> &EyeConfig {
        &self.config
    }

    fn aim(&mut self, target_deg: f64) {
        match &mut self.smoothing {
            Some(motion) => motion.set_target_deg(target_deg),
            None => self.angle_deg = target_deg,
        }
    }

    fn motion_settled(&self) -> bool {
        match &self.smoothing {
            Some(motion) => motion.is_settled(),
            // Direct mode has no transient: the angle is wherever it was set.
            None => true,
        }
    }
}

impl Default for EyeTracker {
    fn default() -> Self {
        Self::new(EyeConfig::default())
    }
}

impl WidgetBinding for EyeTracker {
    fn on_sample(&mut self, offset: Vec2) {
        self.aim(bearing_deg(offset.x, offset.y));
        self.phase = self.phase.on_sample();
    }

    fn on_leave(&mut self) {
        let idle = self.config.idle_angle_deg;
        self.aim(idle);
        self.phase = self.phase.on_leave();
    }

    fn tick(&mut self, dt_secs: f64) {
        if let Some(motion) = &mut self.smoothing {
            motion.tick(dt_secs);
        }
        if self.phase == TrackingPhase::Releasing && self.motion_settled() {
            if let Some(motion) = &mut self.smoothing {
                motion.snap_to_deg(self.config.idle_angle_deg);
            }
            self.phase = self.phase.on_settled();
        }
    }

    fn params(&self) -> WidgetParams {
        let angle_deg = self.angle_deg();
        WidgetParams::Eye {
            angle_deg,
            pupil_offset: Vec2::from_angle_deg(angle_deg).scaled(self.config.pupil_radius),
            pupil_radius: self.config.pupil_radius,
        }
    }

    fn phase(&self) -> TrackingPhase {
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use visage_widget_model::SpringParams;

    const TICK: f64 = 1.0 / 60.0;

    fn angle_of(tracker: &EyeTracker) -> f64 {
        match tracker.params() {
            WidgetParams::Eye { angle_deg, .. } => angle_deg,
            other => panic!("unexpected params {:?}", other),
        }
    }

    #[test]
    fn test_direct_mode_points_at_cardinals() {
        let mut eye = EyeTracker::default();

        eye.on_sample(Vec2::new(100.0, 0.0));
        assert!((angle_of(&eye) - 0.0).abs() < 1e-9);

        eye.on_sample(Vec2::new(0.0, 100.0));
        assert!((angle_of(&eye) - 90.0).abs() < 1e-9);

        eye.on_sample(Vec2::new(-100.0, 0.0));
        assert!((angle_of(&eye) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_pupil_offset_sits_on_the_orbit() {
        let mut eye = EyeTracker::default();
        eye.on_sample(Vec2::new(30.0, 40.0));

        let WidgetParams::Eye {
            pupil_offset,
            pupil_radius,
            ..
        } = eye.params()
        else {
            panic!("not an eye");
        };
        assert!((pupil_offset.length() - pupil_radius).abs() < 1e-9);
        // Same direction as the pointer: 3-4-5 triangle scaled to radius 25.
        assert!((pupil_offset.x - 15.0).abs() < 1e-9);
        assert!((pupil_offset.y - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_direct_mode_release_is_instant() {
        let mut eye = EyeTracker::default();
        eye.on_sample(Vec2::new(0.0, 100.0));
        assert_eq!(eye.phase(), TrackingPhase::Tracking);

        eye.on_leave();
        assert_eq!(eye.phase(), TrackingPhase::Releasing);
        assert!((angle_of(&eye) - 0.0).abs() < 1e-9);

        eye.tick(TICK);
        assert_eq!(eye.phase(), TrackingPhase::Idle);
        assert!(!eye.is_active());
    }

    #[test]
    fn test_smoothed_release_swings_back_along_short_arc() {
        let config = EyeConfig {
            smoothing: Some(SpringParams::critically_damped(100.0)),
            ..EyeConfig::default()
        };
        let mut eye = EyeTracker::new(config);

        // Aim just past straight-left, then release toward idle (0 degrees).
        eye.on_sample(Vec2::new(-100.0, -1.0));
        for _ in 0..600 {
            eye.tick(TICK);
        }
        let near = angle_of(&eye);
        assert!(near.abs() > 170.0, "did not reach the far side: {}", near);

        eye.on_leave();
        let mut prev = angle_of(&eye);
        let mut crossed_seam = false;
        for _ in 0..600 {
            eye.tick(TICK);
            let now = angle_of(&eye);
            // Shortest arc from ~-179 to 0 goes through -90, never +90.
            assert!(
                !(now > 89.0 && now < 91.0),
                "took the long way round: {}",
                now
            );
            if (now - prev).abs() > 180.0 {
                crossed_seam = true;
            }
            prev = now;
            if eye.phase() == TrackingPhase::Idle {
                break;
            }
        }
        assert!(!crossed_seam || prev.abs() < 1.0);
        assert_eq!(eye.phase(), TrackingPhase::Idle);
        assert!((angle_of(&eye) - 0.0).abs() < 0.05);
    }

    #[test]
    fn test_leave_while_idle_stays_idle() {
        let mut eye = EyeTracker::default();
        eye.on_leave();
        assert_eq!(eye.phase(), TrackingPhase::Idle);
    }

    #[test]
    fn test_sample_during_release_resumes_tracking() {
        let config = EyeConfig {
            smoothing: Some(SpringParams::critically_damped(100.0)),
            ..EyeConfig::default()
        };
        let mut eye = EyeTracker::new(config);
        eye.on_sample(Vec2::new(0.0, 100.0));
        eye.on_leave();
        eye.tick(TICK);
        assert_eq!(eye.phase(), TrackingPhase::Releasing);

        eye.on_sample(Vec2::new(100.0, 0.0));
        assert_eq!(eye.phase(), TrackingPhase::Tracking);
    }
}
