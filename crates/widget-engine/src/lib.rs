//! Visage Widget Engine
//!
//! Converts raw, high-frequency pointer samples into smooth, bounded
//! presentation parameters for interactive widgets. The pieces:
//!
//! - **Capture:** A pointer router that owns every subscription in a
//!   generational arena, normalizes coordinates against per-widget anchors,
//!   and synthesizes leave events at region boundaries
//! - **Bindings:** The eye, mouth, and parallax widgets composing capture,
//!   spring smoothing, and range mapping into concrete parameters
//! - **Stage:** The lifecycle container tying subscriptions and tick
//!   scheduling to widget mount/unmount, with no dangling listeners
//!
//! The host pushes pointer events and animation ticks in; presentation
//! parameters come out. Rendering stays entirely on the host's side.

pub mod binding;
pub mod capture;
pub mod eye;
pub mod mouth;
pub mod parallax;
pub mod stage;

pub use binding::{WidgetBinding, WidgetParams};
pub use capture::{
    CaptureSpec, FixedLayout, LayoutProbe, PointerRouter, RoutedEvent, SubscriptionHandle,
};
pub use eye::EyeTracker;
pub use mouth::MouthTracker;
pub use parallax::ParallaxLogos;
pub use stage::{Stage, WidgetHandle};
