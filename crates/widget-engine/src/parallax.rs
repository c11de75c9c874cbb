//! The parallax logo group: layers drifting with the pointer at fixed depths.
//!
//! All layers share one pointer offset from the container center; each layer
//! scales it by `factor * strength`, with alternating factor signs giving
//! opposing drift. The offset is applied raw by default and recenters
//! instantly on leave. With `smoothing` configured the shared offset rides a
//! spring instead, so entry and release both glide.

use visage_motion_core::{Spring2D, TrackingPhase};
use visage_widget_model::{ParallaxConfig, Vec2};

use crate::binding::{WidgetBinding, WidgetParams};

/// Motion state for one parallax group.
#[derive(Debug, Clone)]
pub struct ParallaxLogos {
    config: ParallaxConfig,
    smoothing: Option<Spring2D>,
    raw_offset: Vec2,
    phase: TrackingPhase,
}

impl ParallaxLogos {
    pub fn new(config: ParallaxConfig) -> Self {
        let smoothing = config
            .smoothing
            .map(|params| Spring2D::new(params, Vec2::ZERO));
        Self {
            smoothing,
            raw_offset: Vec2::ZERO,
            config,
            phase: TrackingPhase::Idle,
        }
    }

    /// Shared offset all layers scale from this frame.
    pub fn base_offset(&self) -> Vec2 {
        match &self.smoothing {
            Some(spring) => spring.position(),
            None => self.raw_offset,
        }
    }

    pub fn config(&self) -> &ParallaxConfig {
        &self.config
    }

    fn motion_settled(&self) -> bool {
        match &self.smoothing {
            Some(spring) => spring.is_settled(),
            None => true,
        }
    }
}

impl Default for ParallaxLogos {
    fn default() -> Self {
        Self::new(ParallaxConfig::default())
    }
}

impl WidgetBinding for ParallaxLogos {
    fn on_sample(&mut self, offset: Vec2) {
        match &mut self.smoothing {
            Some(spring) => spring.set_target(offset),
            None => self.raw_offset = offset,
        }
        self.phase = self.phase.on_sample();
    }

    fn on_leave(&mut self) {
        match &mut self.smoothing {
            Some(spring) => spring.set_target(Vec2::ZERO),
            None => self.raw_offset = Vec2::ZERO,
        }
        self.phase = self.phase.on_leave();
    }

    fn tick(&mut self, dt_secs: f64) {
        if let Some(spring) = &mut self.smoothing {
            spring.tick(dt_secs);
        }
        if self.phase == TrackingPhase::Releasing && self.motion_settled() {
            if let Some(spring) = &mut self.smoothing {
                spring.snap_to(Vec2::ZERO);
            }
            self.phase = self.phase.on_settled();
        }
    }

    fn params(&self) -> WidgetParams {
        let base = self.base_offset();
        WidgetParams::Parallax {
            offsets: self
                .config
                .factors
                .iter()
                .map(|factor| base.scaled(factor * self.config.strength))
                .collect(),
        }
    }

    fn phase(&self) -> TrackingPhase {
        self.phase
    }
}
