//! Circular angle math for pointer bearings.
//!
//! Angles are degrees in `(-180, 180]`, measured with `atan2(dy, dx)` in
//! screen coordinates: 0 points right, 90 points down. An angle is a
//! circular quantity, so interpolation must cross the `+/-180` seam by the
//! shortest arc rather than the naive linear difference.

use visage_widget_model::SpringParams;

use crate::spring::Spring;

/// Bearing in degrees from the origin toward `(dx, dy)`.
///
/// Returns 0 for the zero vector (`atan2(0, 0)` is defined as 0).
pub fn bearing_deg(dx: f64, dy: f64) -> f64 {
    wrap_deg(dy.atan2(dx).to_degrees())
}

/// Normalize an angle in degrees into `(-180, 180]`.
pub fn wrap_deg(angle_deg: f64) -> f64 {
    let wrapped = (angle_deg + 180.0).rem_euclid(360.0) - 180.0;
    if wrapped == -180.0 {
        180.0
    } else {
        wrapped
    }
}

/// Signed shortest rotation from `from_deg` to `to_deg`, in `(-180, 180]`.
pub fn shortest_arc_deg(from_deg: f64, to_deg: f64) -> f64 {
    wrap_deg(to_deg - from_deg)
}

/// A sprung angle that interpolates across the wraparound.
///
/// Internally the spring runs on an unwrapped angle: each new target is
/// expressed as the current position plus the shortest arc to the requested
/// bearing, so a release from 179 to -179 degrees rotates 2 degrees, not
/// 358.
#[derive(Debug, Clone)]
pub struct CircularMotion {
    spring: Spring,
}

impl CircularMotion {
    /// Create at rest at `initial_deg`.
    pub fn new(params: SpringParams, initial_deg: f64) -> Self {
        Self {
            spring: Spring::new(params, wrap_deg(initial_deg)),
        }
    }

    /// Retarget along the shortest arc from the current position.
    pub fn set_target_deg(&mut self, target_deg: f64) {
        if !target_deg.is_finite() {
            return;
        }
        let here = self.spring.position();
        let arc = shortest_arc_deg(wrap_deg(here), wrap_deg(target_deg));
        self.spring.set_target(here + arc);
    }

    /// Advance the simulation.
    pub fn tick(&mut self, dt_secs: f64) {
        self.spring.tick(dt_secs);
    }

    /// Current angle, wrapped into `(-180, 180]`.
    pub fn angle_deg(&self) -> f64 {
        wrap_deg(self.spring.position())
    }

    /// Teleport to an angle with zero velocity.
    pub fn snap_to_deg(&mut self, angle_deg: f64) {
        self.spring.snap_to(wrap_deg(angle_deg));
    }

    /// Whether the angle has settled on its target.
    pub fn is_settled(&self) -> bool {
        self.spring.is_settled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bearing_cardinals() {
        assert!((bearing_deg(100.0, 0.0) - 0.0).abs() < 1e-9);
        assert!((bearing_deg(0.0, 100.0) - 90.0).abs() < 1e-9);
        assert!((bearing_deg(-100.0, 0.0) - 180.0).abs() < 1e-9);
        assert!((bearing_deg(0.0, -100.0) + 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_bearing_of_zero_vector_is_zero() {
        assert_eq!(bearing_deg(0.0, 0.0), 0.0);
    }

    #[test]
    fn test_wrap_into_half_open_interval() {
        assert!((wrap_deg(190.0) + 170.0).abs() < 1e-9);
        assert!((wrap_deg(-190.0) - 170.0).abs() < 1e-9);
        assert!((wrap_deg(540.0) - 180.0).abs() < 1e-9);
        assert_eq!(wrap_deg(-180.0), 180.0);
        assert_eq!(wrap_deg(180.0), 180.0);
        assert!((wrap_deg(0.0)).abs() < 1e-12);
    }

    #[test]
    fn test_shortest_arc_crosses_the_seam() {
        assert!((shortest_arc_deg(179.0, -179.0) - 2.0).abs() < 1e-9);
        assert!((shortest_arc_deg(-179.0, 179.0) + 2.0).abs() < 1e-9);
        assert!((shortest_arc_deg(10.0, 50.0) - 40.0).abs() < 1e-9);
        assert!((shortest_arc_deg(0.0, 180.0) - 180.0).abs() < 1e-9);
    }

    #[test]
    fn test_circular_motion_takes_short_way_round() {
        let mut angle = CircularMotion::new(SpringParams::critically_damped(100.0), 170.0);
        angle.set_target_deg(-170.0);

        // The wrapped reading may cross the seam, but it must never pass
        // through 0 (the long way).
        for _ in 0..300 {
            angle.tick(1.0 / 60.0);
            let a = angle.angle_deg().abs();
            assert!(a >= 170.0 - 1e-6, "angle {} left the short arc", a);
        }
        assert!((angle.angle_deg() + 170.0).abs() < 0.05);
    }

    #[test]
    fn test_circular_motion_settles_on_plain_target() {
        let mut angle = CircularMotion::new(SpringParams::critically_damped(100.0), 0.0);
        angle.set_target_deg(90.0);
        for _ in 0..600 {
            angle.tick(1.0 / 60.0);
            if angle.is_settled() {
                break;
            }
        }
        assert!(angle.is_settled());
        assert!((angle.angle_deg() - 90.0).abs() < 0.01);
    }

    #[test]
    fn test_retarget_midflight_stays_short() {
        let mut angle = CircularMotion::new(SpringParams::critically_damped(100.0), 0.0);
        angle.set_target_deg(150.0);
        for _ in 0..5 {
            angle.tick(1.0 / 60.0);
        }
        // New target on the far side of the seam from the current position.
        angle.set_target_deg(-150.0);
        for _ in 0..600 {
            angle.tick(1.0 / 60.0);
        }
        assert!((angle.angle_deg() + 150.0).abs() < 0.05);
    }
}
