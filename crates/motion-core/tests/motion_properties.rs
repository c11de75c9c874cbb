//! Property tests for the universal motion guarantees: critically and
//! over-damped springs converge without overshoot, clamped mappings never
//! leave their output range, and angle arcs never exceed a half turn.

use proptest::prelude::*;

use visage_motion_core::{
    apply_mapping, bearing_deg, map_range, shortest_arc_deg, wrap_deg, Spring,
};
use visage_widget_model::{MappingSpec, SpringParams};

const TICK: f64 = 1.0 / 60.0;

proptest! {
    #[test]
    fn overdamped_spring_never_overshoots_constant_target(
        stiffness in 20.0f64..400.0,
        damping_ratio in 1.0f64..2.5,
        mass in 0.5f64..2.0,
        start in -300.0f64..300.0,
        target in -300.0f64..300.0,
    ) {
        let params = SpringParams {
            stiffness,
            damping: damping_ratio * 2.0 * (stiffness * mass).sqrt(),
            mass,
            settle_epsilon: 0.01,
        };
        prop_assume!(params.is_critical_or_overdamped());

        let mut spring = Spring::new(params, start);
        spring.set_target(target);

        let toward_positive = target >= start;
        for _ in 0..2400 {
            spring.tick(TICK);
            if toward_positive {
                prop_assert!(spring.position() <= target + 1e-7,
                    "overshoot: {} past {}", spring.position(), target);
                prop_assert!(spring.position() >= start - 1e-7);
            } else {
                prop_assert!(spring.position() >= target - 1e-7,
                    "overshoot: {} past {}", spring.position(), target);
                prop_assert!(spring.position() <= start + 1e-7);
            }
            if spring.is_settled() {
                break;
            }
        }
        prop_assert!(spring.is_settled(), "no settle within 40s of ticks");
        prop_assert!((spring.position() - target).abs() < 0.01);
    }

    #[test]
    fn spring_state_stays_finite_for_any_params_and_targets(
        stiffness in prop::num::f64::ANY,
        damping in prop::num::f64::ANY,
        mass in prop::num::f64::ANY,
        targets in prop::collection::vec(-1e6f64..1e6, 1..20),
        dt in 0.0f64..0.5,
    ) {
        let params = SpringParams { stiffness, damping, mass, settle_epsilon: 0.01 };
        let mut spring = Spring::new(params, 0.0);
        for t in targets {
            spring.set_target(t);
            spring.tick(dt);
            prop_assert!(spring.position().is_finite());
            prop_assert!(spring.velocity().is_finite());
        }
    }

    #[test]
    fn clamped_mapping_never_leaves_output_range(
        value in -1e9f64..1e9,
        in_min in -500.0f64..500.0,
        width in 0.0f64..1000.0,
        out_a in -500.0f64..500.0,
        out_b in -500.0f64..500.0,
    ) {
        let out = map_range(value, in_min, in_min + width, out_a, out_b, true);
        let (lo, hi) = if out_a <= out_b { (out_a, out_b) } else { (out_b, out_a) };
        prop_assert!(out >= lo - 1e-9 && out <= hi + 1e-9,
            "{} outside [{}, {}]", out, lo, hi);
    }

    #[test]
    fn mapping_endpoints_are_exact(
        in_min in -500.0f64..500.0,
        width in 1e-3f64..1000.0,
        out_a in -500.0f64..500.0,
        out_b in -500.0f64..500.0,
    ) {
        let spec = MappingSpec::new(in_min, in_min + width, out_a, out_b);
        prop_assert_eq!(apply_mapping(&spec, in_min), out_a);
        prop_assert_eq!(apply_mapping(&spec, in_min + width), out_b);
    }

    #[test]
    fn wrapped_angles_stay_in_half_open_interval(angle in -1e6f64..1e6) {
        let w = wrap_deg(angle);
        prop_assert!(w > -180.0 && w <= 180.0, "wrap_deg({}) = {}", angle, w);
    }

    #[test]
    fn shortest_arc_is_at_most_half_turn(from in -720.0f64..720.0, to in -720.0f64..720.0) {
        let arc = shortest_arc_deg(from, to);
        prop_assert!(arc.abs() <= 180.0 + 1e-9);
        // Following the arc lands on the requested bearing.
        let landed = wrap_deg(from + arc);
        prop_assert!((shortest_arc_deg(landed, to)).abs() < 1e-6);
    }

    #[test]
    fn bearing_matches_its_own_direction(angle in -179.0f64..179.0, radius in 1.0f64..1e4) {
        let rad = angle.to_radians();
        let (dx, dy) = (radius * rad.cos(), radius * rad.sin());
        let measured = bearing_deg(dx, dy);
        prop_assert!(shortest_arc_deg(measured, angle).abs() < 1e-6,
            "bearing {} != {}", measured, angle);
    }
}
