//! Visage Motion Core
//!
//! Turns discontinuous pointer targets into smooth presentation values:
//! - **Spring:** Per-axis second-order damped smoothing with stable stepping
//! - **Range mapping:** Clamped, endpoint-exact linear domain transforms
//! - **Angles:** atan2 bearings, wraparound, and shortest-arc interpolation
//! - **Phase:** The idle/tracking/releasing lifecycle of a tracked value
//!
//! This crate is pure computation — no I/O, no platform dependencies.
//! All inputs are data; all outputs are data.

pub mod angle;
pub mod phase;
pub mod range_map;
pub mod spring;

pub use angle::{bearing_deg, shortest_arc_deg, wrap_deg, CircularMotion};
pub use phase::TrackingPhase;
pub use range_map::{apply_mapping, map_range};
pub use spring::{Spring, Spring2D, MAX_TICK_DT};
