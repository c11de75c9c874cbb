//! Tracking phase machine shared by all widgets.
//!
//! ```text
//! Idle -> Tracking    on the first pointer sample
//! Tracking -> Releasing  on pointer leave (targets reset to idle)
//! Releasing -> Idle   once every axis settles within epsilon
//! Releasing -> Tracking  if the pointer returns mid-release
//! ```

use serde::{Deserialize, Serialize};

/// Where a widget is in its tracking lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TrackingPhase {
    /// No pointer influence; all axes rest at their idle targets.
    #[default]
    Idle,
    /// Pointer samples are steering the targets.
    Tracking,
    /// Pointer left; axes are gliding back toward idle.
    Releasing,
}

impl TrackingPhase {
    /// A pointer sample arrived.
    pub fn on_sample(self) -> Self {
        TrackingPhase::Tracking
    }

    /// The pointer left the tracked region.
    pub fn on_leave(self) -> Self {
        match self {
            TrackingPhase::Idle => TrackingPhase::Idle,
            _ => TrackingPhase::Releasing,
        }
    }

    /// Every axis reported settled this tick.
    pub fn on_settled(self) -> Self {
        match self {
            TrackingPhase::Releasing => TrackingPhase::Idle,
            other => other,
        }
    }

    /// Whether the widget still needs animation ticks.
    pub fn is_active(self) -> bool {
        !matches!(self, TrackingPhase::Idle)
    }
}
