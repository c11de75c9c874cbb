//! Visage Widget Model
//!
//! Defines the core data contracts for Visage widgets:
//! - **Geometry:** Pixel-space vectors and rectangles
//! - **Traces:** Timestamped pointer events in append-only JSONL format
//! - **Widgets:** Spring parameters, range mappings, anchors, and the
//!   per-widget configuration structs (eye, mouth, parallax)
//!
//! Pointer coordinates are viewport pixels; widget math works on offsets
//! relative to a declared anchor so configurations survive layout changes.

pub mod geometry;
pub mod trace;
pub mod widget;

pub use geometry::*;
pub use trace::*;
pub use widget::*;
