//! Pointer capture and routing.
//!
//! One viewport-wide pointer stream fans out to independently owned
//! subscriptions. Each subscription declares what it listens to (a bounded
//! region or the whole viewport) and how raw coordinates are normalized
//! (region center, region top-left, or raw viewport). The router resolves
//! region geometry through a host-supplied [`LayoutProbe`] on every
//! dispatch, so layout changes are picked up without re-registration.
//!
//! Subscriptions live in a generational arena: handles embed a slot index
//! plus a generation counter, making detach idempotent and stale handles
//! harmless no-ops.

use std::collections::HashMap;

use visage_widget_model::{AnchorMode, Rect, RegionId, RegionRef, Vec2};

/// Host-supplied geometry oracle.
///
/// `region_rect` returns `None` whenever a region is unmounted or not yet
/// laid out; the router treats that as a non-fatal condition (a missed
/// attach, or a synthesized leave for a subscription that was tracking).
pub trait LayoutProbe {
    /// Current bounding box of a region, in viewport pixels.
    fn region_rect(&self, region: &RegionId) -> Option<Rect>;

    /// Current viewport rectangle.
    fn viewport_rect(&self) -> Rect;
}

/// What a subscription listens to and how its coordinates are anchored.
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureSpec {
    /// The surface whose pointer events this subscription receives.
    pub listen: RegionRef,

    /// Coordinate normalization applied before delivery.
    pub anchor: AnchorMode,

    /// Region whose rectangle anchors the coordinates. When `None`, the
    /// listen region anchors bounded subscriptions and the viewport anchors
    /// viewport-wide ones.
    pub anchor_region: Option<RegionId>,
}

impl CaptureSpec {
    /// Listen to a bounded region, delivering offsets from its center.
    pub fn region(id: impl Into<RegionId>) -> Self {
        Self {
            listen: RegionRef::Region(id.into()),
            anchor: AnchorMode::RegionCenter,
            anchor_region: None,
        }
    }

    /// Listen viewport-wide, delivering offsets from a region's center
    /// (how the eye follows the pointer everywhere).
    pub fn viewport_anchored_at(id: impl Into<RegionId>) -> Self {
        Self {
            listen: RegionRef::Viewport,
            anchor: AnchorMode::RegionCenter,
            anchor_region: Some(id.into()),
        }
    }

    /// Listen viewport-wide with raw viewport coordinates.
    pub fn viewport_raw() -> Self {
        Self {
            listen: RegionRef::Viewport,
            anchor: AnchorMode::Viewport,
            anchor_region: None,
        }
    }

    /// Anchor at a top-left corner instead of a center.
    pub fn anchored_top_left(mut self) -> Self {
        self.anchor = AnchorMode::RegionTopLeft;
        self
    }

    fn anchor_region_ref(&self) -> Option<&RegionId> {
        if self.anchor_region.is_some() {
            return self.anchor_region.as_ref();
        }
        match &self.listen {
            RegionRef::Region(id) => Some(id),
            RegionRef::Viewport => None,
        }
    }
}

/// Opaque subscription token. The null handle is returned when attachment
/// was not possible; detaching it is a no-op.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionHandle {
    index: u32,
    generation: u32,
}

impl SubscriptionHandle {
    /// Handle that refers to nothing.
    pub const NULL: SubscriptionHandle = SubscriptionHandle {
        index: u32::MAX,
        generation: 0,
    };

    /// Whether this is the null handle.
    pub fn is_null(&self) -> bool {
        *self == Self::NULL
    }
}

/// One event routed to one subscription.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RoutedEvent {
    /// A pointer offset in the subscription's anchor space.
    Sample {
        handle: SubscriptionHandle,
        offset: Vec2,
    },
    /// The pointer left the subscription's surface (crossed its boundary,
    /// left the viewport, or the region stopped resolving).
    Leave { handle: SubscriptionHandle },
}

impl RoutedEvent {
    /// The subscription this event belongs to.
    pub fn handle(&self) -> SubscriptionHandle {
        match self {
            RoutedEvent::Sample { handle, .. } | RoutedEvent::Leave { handle } => *handle,
        }
    }
}

#[derive(Debug)]
struct Subscription {
    spec: CaptureSpec,
    /// Whether the last dispatched sample fell inside this subscription's
    /// surface; flipping to false synthesizes exactly one leave.
    inside: bool,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    sub: Option<Subscription>,
}

/// Fan-out router from viewport pointer events to subscriptions.
#[derive(Debug, Default)]
pub struct PointerRouter {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

impl PointerRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscription.
    ///
    /// Returns [`SubscriptionHandle::NULL`] without registering anything if
    /// the spec's regions do not currently resolve; callers retry on a
    /// later dispatch once the layout exists.
    pub fn attach(&mut self, spec: CaptureSpec, probe: &dyn LayoutProbe) -> SubscriptionHandle {
        if !self.spec_resolves(&spec, probe) {
            tracing::debug!(?spec.listen, "Attach deferred: region does not resolve");
            return SubscriptionHandle::NULL;
        }

        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.slots.push(Slot {
                    generation: 0,
                    sub: None,
                });
                (self.slots.len() - 1) as u32
            }
        };

        let slot = &mut self.slots[index as usize];
        slot.sub = Some(Subscription {
            spec,
            inside: false,
        });

        let handle = SubscriptionHandle {
            index,
            generation: slot.generation,
        };
        tracing::trace!(index = handle.index, "Subscription attached");
        handle
    }

    /// Detach the prior registration (if any) and attach a fresh one, so a
    /// rebinding caller can never accumulate duplicate listeners.
    pub fn reattach(
        &mut self,
        prior: SubscriptionHandle,
        spec: CaptureSpec,
        probe: &dyn LayoutProbe,
    ) -> SubscriptionHandle {
        self.detach(prior);
        self.attach(spec, probe)
    }

    /// Remove a subscription. Idempotent: null and stale handles are no-ops.
    pub fn detach(&mut self, handle: SubscriptionHandle) {
        if handle.is_null() {
            return;
        }
        let Some(slot) = self.slots.get_mut(handle.index as usize) else {
            return;
        };
        if slot.generation != handle.generation || slot.sub.is_none() {
            tracing::trace!(index = handle.index, "Ignoring stale detach");
            return;
        }
        slot.sub = None;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);
        tracing::trace!(index = handle.index, "Subscription detached");
    }

    /// Whether a handle still refers to a live subscription.
    pub fn is_attached(&self, handle: SubscriptionHandle) -> bool {
        !handle.is_null()
            && self
                .slots
                .get(handle.index as usize)
                .map(|slot| slot.generation == handle.generation && slot.sub.is_some())
                .unwrap_or(false)
    }

    /// Number of live subscriptions.
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.sub.is_some()).count()
    }

    /// Route a viewport-space pointer move to every subscription.
    ///
    /// Returns the deliveries in slot order. Non-finite coordinates are
    /// dropped at this boundary so they can never reach a spring target.
    pub fn pointer_moved(
        &mut self,
        x: f64,
        y: f64,
        probe: &dyn LayoutProbe,
    ) -> Vec<RoutedEvent> {
        if !x.is_finite() || !y.is_finite() {
            tracing::warn!(x, y, "Dropping non-finite pointer sample");
            return Vec::new();
        }

        let mut out = Vec::new();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let Some(sub) = slot.sub.as_mut() else {
                continue;
            };
            let handle = SubscriptionHandle {
                index: index as u32,
                generation: slot.generation,
            };

            let listen_rect = match &sub.spec.listen {
                RegionRef::Viewport => Some(probe.viewport_rect()),
                RegionRef::Region(id) => probe.region_rect(id),
            };

            let Some(listen_rect) = listen_rect else {
                // Region went away mid-track.
                if sub.inside {
                    sub.inside = false;
                    tracing::debug!(index, "Region lost; synthesizing leave");
                    out.push(RoutedEvent::Leave { handle });
                }
                continue;
            };

            if !listen_rect.contains(x, y) {
                if sub.inside {
                    sub.inside = false;
                    out.push(RoutedEvent::Leave { handle });
                }
                continue;
            }

            let anchor_rect = match sub.spec.anchor_region_ref() {
                Some(id) => probe.region_rect(id),
                None => Some(probe.viewport_rect()),
            };
            let Some(anchor_rect) = anchor_rect else {
                if sub.inside {
                    sub.inside = false;
                    tracing::debug!(index, "Anchor region lost; synthesizing leave");
                    out.push(RoutedEvent::Leave { handle });
                }
                continue;
            };

            let offset = match sub.spec.anchor {
                AnchorMode::RegionCenter => anchor_rect.offset_from_center(x, y),
                AnchorMode::RegionTopLeft => anchor_rect.offset_from_origin(x, y),
                AnchorMode::Viewport => Vec2::new(x, y),
            };

            sub.inside = true;
            out.push(RoutedEvent::Sample { handle, offset });
        }
        out
    }

    /// Route a viewport-wide pointer leave: every subscription currently
    /// inside gets exactly one leave.
    pub fn pointer_left(&mut self) -> Vec<RoutedEvent> {
        let mut out = Vec::new();
        for (index, slot) in self.slots.iter_mut().enumerate() {
            let Some(sub) = slot.sub.as_mut() else {
                continue;
            };
            if sub.inside {
                sub.inside = false;
                out.push(RoutedEvent::Leave {
                    handle: SubscriptionHandle {
                        index: index as u32,
                        generation: slot.generation,
                    },
                });
            }
        }
        out
    }

    fn spec_resolves(&self, spec: &CaptureSpec, probe: &dyn LayoutProbe) -> bool {
        if let RegionRef::Region(id) = &spec.listen {
            if probe.region_rect(id).is_none() {
                return false;
            }
        }
        if let Some(id) = spec.anchor_region_ref() {
            if probe.region_rect(id).is_none() {
                return false;
            }
        }
        true
    }
}

/// A [`LayoutProbe`] backed by a plain map, for hosts with static layouts,
/// replay tooling, and tests.
#[derive(Debug, Clone)]
pub struct FixedLayout {
    viewport: Rect,
    regions: HashMap<RegionId, Rect>,
}

impl FixedLayout {
    pub fn new(viewport: Rect) -> Self {
        Self {
            viewport,
            regions: HashMap::new(),
        }
    }

    /// Add or move a region.
    pub fn set_region(&mut self, id: impl Into<RegionId>, rect: Rect) {
        self.regions.insert(id.into(), rect);
    }

    /// Builder-style region registration.
    pub fn with_region(mut self, id: impl Into<RegionId>, rect: Rect) -> Self {
        self.set_region(id, rect);
        self
    }

    /// Remove a region, simulating an unmounted element.
    pub fn remove_region(&mut self, id: &RegionId) {
        self.regions.remove(id);
    }
}

impl LayoutProbe for FixedLayout {
    fn region_rect(&self, region: &RegionId) -> Option<Rect> {
        self.regions.get(region).copied()
    }

    fn viewport_rect(&self) -> Rect {
        self.viewport
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> FixedLayout {
        FixedLayout::new(Rect::new(0.0, 0.0, 1280.0, 720.0))
            .with_region("mouth", Rect::new(100.0, 100.0, 300.0, 200.0))
            .with_region("eye", Rect::new(600.0, 100.0, 200.0, 200.0))
    }

    fn samples(events: &[RoutedEvent]) -> Vec<(SubscriptionHandle, Vec2)> {
        events
            .iter()
            .filter_map(|e| match e {
                RoutedEvent::Sample { handle, offset } => Some((*handle, *offset)),
                _ => None,
            })
            .collect()
    }

    fn leaves(events: &[RoutedEvent]) -> Vec<SubscriptionHandle> {
        events
            .iter()
            .filter_map(|e| match e {
                RoutedEvent::Leave { handle } => Some(*handle),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_region_subscription_center_anchor() {
        let layout = layout();
        let mut router = PointerRouter::new();
        let handle = router.attach(CaptureSpec::region("mouth"), &layout);
        assert!(!handle.is_null());

        // Region center is (250, 200).
        let events = router.pointer_moved(300.0, 250.0, &layout);
        let samples = samples(&events);
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].0, handle);
        assert!((samples[0].1.x - 50.0).abs() < 1e-9);
        assert!((samples[0].1.y - 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_boundary_exit_synthesizes_single_leave() {
        let layout = layout();
        let mut router = PointerRouter::new();
        let handle = router.attach(CaptureSpec::region("mouth"), &layout);

        router.pointer_moved(250.0, 200.0, &layout);
        let events = router.pointer_moved(900.0, 600.0, &layout);
        assert_eq!(leaves(&events), vec![handle]);

        // Still outside: no repeated leave.
        let events = router.pointer_moved(901.0, 601.0, &layout);
        assert!(events.is_empty());
    }

    #[test]
    fn test_leave_without_prior_sample_is_silent() {
        let layout = layout();
        let mut router = PointerRouter::new();
        router.attach(CaptureSpec::region("mouth"), &layout);

        // Pointer has never been inside the mouth region.
        let events = router.pointer_moved(900.0, 600.0, &layout);
        assert!(events.is_empty());
        assert!(router.pointer_left().is_empty());
    }

    #[test]
    fn test_viewport_subscription_anchored_at_region() {
        let layout = layout();
        let mut router = PointerRouter::new();
        let handle = router.attach(CaptureSpec::viewport_anchored_at("eye"), &layout);

        // Eye center is (700, 200); pointer far outside the eye region
        // still delivers, because the subscription listens viewport-wide.
        let events = router.pointer_moved(100.0, 650.0, &layout);
        let samples = samples(&events);
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].0, handle);
        assert!((samples[0].1.x + 600.0).abs() < 1e-9);
        assert!((samples[0].1.y - 450.0).abs() < 1e-9);
    }

    #[test]
    fn test_top_left_anchor() {
        let layout = layout();
        let mut router = PointerRouter::new();
        router.attach(CaptureSpec::region("mouth").anchored_top_left(), &layout);

        let events = router.pointer_moved(150.0, 130.0, &layout);
        let samples = samples(&events);
        assert!((samples[0].1.x - 50.0).abs() < 1e-9);
        assert!((samples[0].1.y - 30.0).abs() < 1e-9);
    }

    #[test]
    fn test_attach_to_missing_region_returns_null() {
        let layout = layout();
        let mut router = PointerRouter::new();
        let handle = router.attach(CaptureSpec::region("missing"), &layout);
        assert!(handle.is_null());
        assert_eq!(router.live_count(), 0);

        // Detaching the null handle is harmless.
        router.detach(handle);
    }

    #[test]
    fn test_detach_is_idempotent_and_generational() {
        let layout = layout();
        let mut router = PointerRouter::new();
        let first = router.attach(CaptureSpec::region("mouth"), &layout);
        router.detach(first);
        router.detach(first); // second detach: no-op
        assert_eq!(router.live_count(), 0);

        // Slot is recycled under a new generation; the old handle must not
        // reach the new subscription.
        let second = router.attach(CaptureSpec::region("eye"), &layout);
        assert_eq!(router.live_count(), 1);
        router.detach(first);
        assert!(router.is_attached(second));
        assert_eq!(router.live_count(), 1);
    }

    #[test]
    fn test_reattach_replaces_instead_of_duplicating() {
        let layout = layout();
        let mut router = PointerRouter::new();
        let first = router.attach(CaptureSpec::region("mouth"), &layout);
        let second = router.reattach(first, CaptureSpec::region("mouth"), &layout);
        assert_eq!(router.live_count(), 1);
        assert!(!router.is_attached(first));
        assert!(router.is_attached(second));

        // One move, one delivery.
        let events = router.pointer_moved(250.0, 200.0, &layout);
        assert_eq!(events.len(), 1);
    }

    #[test]
    fn test_region_disappearing_mid_track_synthesizes_leave() {
        let mut layout = layout();
        let mut router = PointerRouter::new();
        let handle = router.attach(CaptureSpec::region("mouth"), &layout);

        router.pointer_moved(250.0, 200.0, &layout);
        layout.remove_region(&RegionId::new("mouth"));

        let events = router.pointer_moved(251.0, 200.0, &layout);
        assert_eq!(leaves(&events), vec![handle]);
    }

    #[test]
    fn test_pointer_left_fans_out_to_all_inside() {
        let layout = layout();
        let mut router = PointerRouter::new();
        let mouth = router.attach(CaptureSpec::region("mouth"), &layout);
        let eye = router.attach(CaptureSpec::viewport_anchored_at("eye"), &layout);

        router.pointer_moved(250.0, 200.0, &layout); // inside both surfaces
        let events = router.pointer_left();
        let left = leaves(&events);
        assert!(left.contains(&mouth));
        assert!(left.contains(&eye));

        // Second viewport leave produces nothing new.
        assert!(router.pointer_left().is_empty());
    }

    #[test]
    fn test_non_finite_samples_are_dropped() {
        let layout = layout();
        let mut router = PointerRouter::new();
        router.attach(CaptureSpec::region("mouth"), &layout);

        assert!(router.pointer_moved(f64::NAN, 10.0, &layout).is_empty());
        assert!(router
            .pointer_moved(10.0, f64::INFINITY, &layout)
            .is_empty());
    }

    #[test]
    fn test_viewport_raw_passes_coordinates_through() {
        let layout = layout();
        let mut router = PointerRouter::new();
        router.attach(CaptureSpec::viewport_raw(), &layout);

        let events = router.pointer_moved(123.0, 456.0, &layout);
        let samples = samples(&events);
        assert_eq!(samples[0].1, Vec2::new(123.0, 456.0));
    }

    #[test]
    fn test_multiple_viewport_subscriptions_fan_out() {
        let layout = layout();
        let mut router = PointerRouter::new();
        let a = router.attach(CaptureSpec::viewport_anchored_at("eye"), &layout);
        let b = router.attach(CaptureSpec::viewport_anchored_at("eye"), &layout);
        assert_ne!(a, b);

        let events = router.pointer_moved(640.0, 360.0, &layout);
        assert_eq!(samples(&events).len(), 2);
    }
}
