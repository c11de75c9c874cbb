//! Second-order damped spring smoothing.
//!
//! Each axis simulates a damped harmonic oscillator:
//! `F = stiffness * (target - position) - damping * velocity`, integrated
//! with semi-implicit Euler. Raw samples only move the target; the position
//! advances once per tick, so presentation cost is bounded regardless of
//! input rate.

use visage_widget_model::{SpringParams, Vec2};

/// Largest tick interval the integrator will accept, in seconds. A stalled
/// frame or suspended host delivers one clamped step instead of a
/// destabilizing jump.
pub const MAX_TICK_DT: f64 = 1.0 / 30.0;

/// Largest integration substep, in seconds. Ticks are subdivided further
/// whenever the configured stiffness or damping rates demand it.
const MAX_SUBSTEP: f64 = 1.0 / 240.0;

/// Caps applied when sanitizing configured coefficients. Values beyond
/// these are far outside any usable widget feel and would force the
/// integrator into absurdly small substeps.
const MAX_STIFFNESS: f64 = 10_000.0;
const MAX_DAMPING: f64 = 1_000.0;
const MIN_MASS: f64 = 0.01;
const MAX_MASS: f64 = 1_000.0;

/// One smoothed axis: position and velocity chasing a mutable target.
///
/// Position, velocity, and target stay finite for every input sequence:
/// parameters are sanitized at construction and non-finite targets are
/// ignored.
#[derive(Debug, Clone)]
pub struct Spring {
    params: SpringParams,
    position: f64,
    velocity: f64,
    target: f64,
}

impl Spring {
    /// Create a spring at rest at `initial`, targeting `initial`.
    pub fn new(params: SpringParams, initial: f64) -> Self {
        let params = sanitize(params);
        let initial = if initial.is_finite() { initial } else { 0.0 };
        Self {
            params,
            position: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    /// Current smoothed position.
    pub fn position(&self) -> f64 {
        self.position
    }

    /// Current velocity, in position units per second.
    pub fn velocity(&self) -> f64 {
        self.velocity
    }

    /// Current target.
    pub fn target(&self) -> f64 {
        self.target
    }

    /// The sanitized parameters in effect.
    pub fn params(&self) -> &SpringParams {
        &self.params
    }

    /// Retarget the spring. Non-finite values are ignored so a bad sample
    /// can never poison the state.
    pub fn set_target(&mut self, target: f64) {
        if target.is_finite() {
            self.target = target;
        } else {
            tracing::debug!(target, "Ignoring non-finite spring target");
        }
    }

    /// Teleport to `value` with zero velocity, also retargeting there.
    pub fn snap_to(&mut self, value: f64) {
        let value = if value.is_finite() { value } else { self.target };
        self.position = value;
        self.velocity = 0.0;
        self.target = value;
    }

    /// Advance the simulation by `dt_secs` toward the current target.
    ///
    /// `dt` is clamped to [`MAX_TICK_DT`] and subdivided into substeps small
    /// enough for the configured rates, so the discrete system inherits the
    /// convergence behavior of the continuous one: critical or over-damped
    /// configurations approach a constant target monotonically.
    pub fn tick(&mut self, dt_secs: f64) {
        if !dt_secs.is_finite() || dt_secs <= 0.0 {
            return;
        }
        let dt = dt_secs.min(MAX_TICK_DT);

        let omega = (self.params.stiffness / self.params.mass).sqrt();
        let decay = self.params.damping / self.params.mass;
        let stable = (0.5 / omega).min(0.5 / decay);
        let step_count = (dt / MAX_SUBSTEP.min(stable)).ceil().max(1.0);
        let h = dt / step_count;

        for _ in 0..step_count as u32 {
            let accel = (self.params.stiffness * (self.target - self.position)
                - self.params.damping * self.velocity)
                / self.params.mass;
            self.velocity += accel * h;
            self.position += self.velocity * h;
        }
    }

    /// Whether both displacement and velocity are inside the settle epsilon.
    /// Checking velocity too keeps a fast pass through the target from
    /// reading as settled.
    pub fn is_settled(&self) -> bool {
        (self.position - self.target).abs() < self.params.settle_epsilon
            && self.velocity.abs() < self.params.settle_epsilon
    }
}

/// Two independent springs sharing one parameter set, for 2D offsets.
#[derive(Debug, Clone)]
pub struct Spring2D {
    x: Spring,
    y: Spring,
}

impl Spring2D {
    /// Create both axes at rest at `initial`.
    pub fn new(params: SpringParams, initial: Vec2) -> Self {
        Self {
            x: Spring::new(params, initial.x),
            y: Spring::new(params, initial.y),
        }
    }

    /// Retarget both axes. Each component is validated independently.
    pub fn set_target(&mut self, target: Vec2) {
        self.x.set_target(target.x);
        self.y.set_target(target.y);
    }

    /// Advance both axes.
    pub fn tick(&mut self, dt_secs: f64) {
        self.x.tick(dt_secs);
        self.y.tick(dt_secs);
    }

    /// Current smoothed position.
    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x.position(), self.y.position())
    }

    /// Current target.
    pub fn target(&self) -> Vec2 {
        Vec2::new(self.x.target(), self.y.target())
    }

    /// Teleport both axes (for mount or viewport jumps).
    pub fn snap_to(&mut self, value: Vec2) {
        self.x.snap_to(value.x);
        self.y.snap_to(value.y);
    }

    /// Whether both axes have settled.
    pub fn is_settled(&self) -> bool {
        self.x.is_settled() && self.y.is_settled()
    }

    /// Access the individual axes.
    pub fn axes(&self) -> (&Spring, &Spring) {
        (&self.x, &self.y)
    }
}

/// Replace unusable coefficients with defaults and cap the rest to ranges
/// the integrator handles comfortably.
fn sanitize(params: SpringParams) -> SpringParams {
    let defaults = SpringParams::default();
    let mut p = params;

    if !p.stiffness.is_finite() || p.stiffness <= 0.0 {
        tracing::warn!(
            stiffness = p.stiffness,
            "Replacing unusable spring stiffness with default"
        );
        p.stiffness = defaults.stiffness;
    }
    if !p.damping.is_finite() || p.damping <= 0.0 {
        tracing::warn!(
            damping = p.damping,
            "Replacing unusable spring damping with default"
        );
        p.damping = defaults.damping;
    }
    if !p.mass.is_finite() || p.mass <= 0.0 {
        tracing::warn!(mass = p.mass, "Replacing unusable spring mass with default");
        p.mass = defaults.mass;
    }
    if !p.settle_epsilon.is_finite() || p.settle_epsilon <= 0.0 {
        tracing::warn!(
            settle_epsilon = p.settle_epsilon,
            "Replacing unusable settle epsilon with default"
        );
        p.settle_epsilon = defaults.settle_epsilon;
    }

    if p.stiffness > MAX_STIFFNESS || p.damping > MAX_DAMPING || !(MIN_MASS..=MAX_MASS).contains(&p.mass) {
        tracing::warn!(
            stiffness = p.stiffness,
            damping = p.damping,
            mass = p.mass,
            "Capping extreme spring coefficients"
        );
        p.stiffness = p.stiffness.min(MAX_STIFFNESS);
        p.damping = p.damping.min(MAX_DAMPING);
        p.mass = p.mass.clamp(MIN_MASS, MAX_MASS);
    }

    p
}
