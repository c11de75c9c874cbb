//! Clamped linear range mapping.
//!
//! Maps a scalar from an input domain onto an output range. The output
//! range may be inverted (min above max), which the mouth widget relies on
//! to close as the pointer moves down.

use visage_widget_model::MappingSpec;

/// Map `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
///
/// The interpolation is written in lerp form so the endpoints are exact:
/// `map_range(in_min, ..) == out_min` and `map_range(in_max, ..) == out_max`
/// bit-for-bit. With `clamp` set, the parameter is clamped to `[0, 1]`
/// first, so the result never leaves the output interval regardless of the
/// input magnitude or range inversion.
///
/// A degenerate domain (`in_min == in_max`) yields the output midpoint
/// instead of dividing by zero; under `clamp`, so does a non-finite input.
pub fn map_range(
    value: f64,
    in_min: f64,
    in_max: f64,
    out_min: f64,
    out_max: f64,
    clamp: bool,
) -> f64 {
    if in_min == in_max {
        return (out_min + out_max) / 2.0;
    }

    let raw_t = (value - in_min) / (in_max - in_min);
    let t = if clamp {
        if raw_t.is_nan() {
            0.5
        } else {
            raw_t.clamp(0.0, 1.0)
        }
    } else {
        raw_t
    };

    out_min * (1.0 - t) + out_max * t
}

/// Apply a [`MappingSpec`] to a value.
pub fn apply_mapping(spec: &MappingSpec, value: f64) -> f64 {
    map_range(
        value,
        spec.input_min,
        spec.input_max,
        spec.output_min,
        spec.output_max,
        spec.clamp,
    )
}
