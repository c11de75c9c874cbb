//! Widget motion configuration types.
//!
//! These structs externalize every constant the motion engine consumes:
//! spring coefficients, range mappings, anchors, and idle targets. Defaults
//! reproduce the tuned feel of the production widgets.

use serde::{Deserialize, Serialize};

/// Second-order damped spring coefficients for one smoothed axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpringParams {
    /// Restoring-force coefficient. Higher snaps harder toward the target.
    pub stiffness: f64,

    /// Energy-dissipation coefficient. Higher kills overshoot sooner.
    pub damping: f64,

    /// Virtual mass of the smoothed value.
    #[serde(default = "default_mass")]
    pub mass: f64,

    /// Position/velocity threshold below which the axis counts as settled.
    #[serde(default = "default_settle_epsilon")]
    pub settle_epsilon: f64,
}

fn default_mass() -> f64 {
    1.0
}

fn default_settle_epsilon() -> f64 {
    0.01
}

impl Default for SpringParams {
    fn default() -> Self {
        Self {
            stiffness: 100.0,
            damping: 20.0,
            mass: 1.0,
            settle_epsilon: 0.01,
        }
    }
}

impl SpringParams {
    /// Params with the given stiffness/damping and default mass/epsilon.
    pub fn new(stiffness: f64, damping: f64) -> Self {
        Self {
            stiffness,
            damping,
            ..Self::default()
        }
    }

    /// Critically damped params for the given stiffness: convergence is as
    /// fast as possible without overshoot.
    pub fn critically_damped(stiffness: f64) -> Self {
        Self {
            stiffness,
            damping: 2.0 * (stiffness * default_mass()).sqrt(),
            ..Self::default()
        }
    }

    /// True when the system cannot overshoot a constant target
    /// (`damping^2 >= 4 * stiffness * mass`).
    pub fn is_critical_or_overdamped(&self) -> bool {
        self.damping * self.damping >= 4.0 * self.stiffness * self.mass
    }
}

/// A clamped linear mapping from an input domain to an output range.
///
/// The output range may be inverted (`output_min > output_max`); clamping
/// applies to the input domain, so output never leaves the range either way.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MappingSpec {
    pub input_min: f64,
    pub input_max: f64,
    pub output_min: f64,
    pub output_max: f64,

    /// Clamp inputs to the domain before mapping.
    #[serde(default = "default_clamp")]
    pub clamp: bool,
}

fn default_clamp() -> bool {
    true
}

impl MappingSpec {
    pub fn new(input_min: f64, input_max: f64, output_min: f64, output_max: f64) -> Self {
        Self {
            input_min,
            input_max,
            output_min,
            output_max,
            clamp: true,
        }
    }

    /// Midpoint of the output range, the result for a degenerate domain.
    pub fn output_midpoint(&self) -> f64 {
        (self.output_min + self.output_max) / 2.0
    }
}

/// How raw pointer coordinates are normalized before reaching a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AnchorMode {
    /// Offsets relative to the listen region's center.
    #[default]
    RegionCenter,
    /// Offsets relative to the listen region's top-left corner.
    RegionTopLeft,
    /// Raw viewport coordinates, no normalization.
    Viewport,
}

/// Identifier for a host-registered layout region.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RegionId(pub String);

impl RegionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RegionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for RegionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// What a subscription listens to: a bounded region or the whole viewport.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegionRef {
    /// The entire viewport; never produces boundary-crossing leaves.
    Viewport,
    /// A host-registered region; exiting its bounds synthesizes a leave.
    Region(RegionId),
}

/// Configuration for the eye widget.
///
/// The eye listens viewport-wide and aims its pupil at the pointer; by
/// default the angle is applied directly (no smoothing), matching the
/// production widget's fixed-radius pupil.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EyeConfig {
    /// Distance of the pupil from the eye center, in pixels.
    pub pupil_radius: f64,

    /// Optional angular smoothing. When set, the angle springs toward the
    /// pointer bearing along the shortest arc.
    pub smoothing: Option<SpringParams>,

    /// Bearing (degrees) the pupil returns to when the pointer is absent.
    pub idle_angle_deg: f64,
}

impl Default for EyeConfig {
    fn default() -> Self {
        Self {
            pupil_radius: 25.0,
            smoothing: None,
            idle_angle_deg: 0.0,
        }
    }
}

/// Configuration for the mouth widget.
///
/// Two springs (x and y offsets from the region center) feed three range
/// mappings: lip gap from y, tongue offset from x, and tongue scale chained
/// off the gap so the tongue grows as the mouth opens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MouthConfig {
    /// Spring applied to both smoothed axes.
    pub spring: SpringParams,

    /// Smoothed y offset -> distance between the lips.
    pub gap: MappingSpec,

    /// Smoothed x offset -> horizontal tongue offset.
    pub tongue_offset: MappingSpec,

    /// Gap -> tongue scale (chained off the gap, not raw input).
    pub tongue_scale: MappingSpec,

    /// Target x offset when the pointer leaves (centered).
    pub idle_x: f64,

    /// Target y offset when the pointer leaves (mouth closed).
    pub idle_y: f64,
}

impl Default for MouthConfig {
    fn default() -> Self {
        Self {
            spring: SpringParams::new(100.0, 20.0),
            gap: MappingSpec::new(-150.0, 150.0, 60.0, 5.0),
            tongue_offset: MappingSpec::new(-150.0, 150.0, -40.0, 40.0),
            tongue_scale: MappingSpec::new(5.0, 60.0, 0.5, 1.2),
            idle_x: 0.0,
            idle_y: 150.0,
        }
    }
}

/// Configuration for the parallax logo group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParallaxConfig {
    /// Global multiplier applied to every logo offset.
    pub strength: f64,

    /// Per-logo response multipliers; sign flips give opposing drift.
    pub factors: Vec<f64>,

    /// Optional offset smoothing. `None` applies pointer offsets directly.
    pub smoothing: Option<SpringParams>,
}

impl ParallaxConfig {
    /// `count` logos with alternating +1/-1 factors.
    pub fn alternating(count: usize) -> Self {
        Self {
            factors: (0..count)
                .map(|i| if i % 2 == 0 { 1.0 } else { -1.0 })
                .collect(),
            ..Self::default()
        }
    }

    /// The production tuning: offsets glide on a loose spring.
    pub fn springy(count: usize) -> Self {
        Self {
            smoothing: Some(SpringParams::new(100.0, 10.0)),
            ..Self::alternating(count)
        }
    }

    /// Number of logos driven by this config.
    pub fn logo_count(&self) -> usize {
        self.factors.len()
    }
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            strength: 0.05,
            factors: vec![1.0, -1.0],
            smoothing: None,
        }
    }
}
