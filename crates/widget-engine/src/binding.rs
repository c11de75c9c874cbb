//! The seam between routed pointer events and widget-specific motion.

use serde::{Deserialize, Serialize};
use visage_motion_core::TrackingPhase;
use visage_widget_model::Vec2;

/// A widget's motion state machine.
///
/// Implementations consume anchored pointer offsets, advance their springs
/// once per frame, and expose render-ready parameters. They never perform
/// I/O and never see raw viewport coordinates.
pub trait WidgetBinding {
    /// An anchored pointer offset arrived for this widget.
    fn on_sample(&mut self, offset: Vec2);

    /// The pointer left this widget's surface.
    fn on_leave(&mut self);

    /// Advance motion by `dt_secs` of wall time.
    fn tick(&mut self, dt_secs: f64);

    /// Current render parameters.
    fn params(&self) -> WidgetParams;

    /// Current lifecycle phase.
    fn phase(&self) -> TrackingPhase;

    /// Whether the widget still needs frames (tracking or releasing).
    fn is_active(&self) -> bool {
        self.phase().is_active()
    }
}

/// Render-ready output of one widget for one frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "widget", rename_all = "snake_case")]
pub enum WidgetParams {
    /// An eye whose pupil points at the pointer.
    Eye {
        /// Bearing from the eye center to the pointer, in degrees.
        angle_deg: f64,
        /// Pupil displacement from the eye center, in pixels.
        pupil_offset: Vec2,
        /// Orbit radius the offset was projected onto.
        pupil_radius: f64,
    },
    /// A mouth that opens toward the pointer and slides its tongue.
    Mouth {
        /// Lip gap in pixels.
        gap: f64,
        /// Horizontal tongue displacement in pixels.
        tongue_offset: f64,
        /// Tongue scale factor.
        tongue_scale: f64,
    },
    /// A stack of layers drifting with the pointer at per-layer depths.
    Parallax {
        /// One offset per layer, in layer order.
        offsets: Vec<Vec2>,
    },
}
