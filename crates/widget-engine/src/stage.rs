//! Widget lifecycle and frame orchestration.
//!
//! A [`Stage`] owns every mounted widget together with the router that feeds
//! it. The host pushes pointer events and frame ticks; the stage routes
//! events to bindings, advances motion once per tick, and hands back
//! render-ready [`WidgetParams`]. Unmounting detaches the widget's
//! subscription on every path, and `dispose` tears the whole scene down
//! idempotently.

use visage_motion_core::TrackingPhase;
use visage_widget_model::{EyeConfig, MouthConfig, ParallaxConfig, RegionId};

use crate::binding::{WidgetBinding, WidgetParams};
use crate::capture::{CaptureSpec, LayoutProbe, PointerRouter, RoutedEvent, SubscriptionHandle};
use crate::eye::EyeTracker;
use crate::mouth::MouthTracker;
use crate::parallax::ParallaxLogos;

/// Opaque token for a mounted widget. Stale handles are harmless no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetHandle {
    index: u32,
    generation: u32,
}

impl WidgetHandle {
    const DEAD: WidgetHandle = WidgetHandle {
        index: u32::MAX,
        generation: 0,
    };
}

struct WidgetSlot {
    binding: Box<dyn WidgetBinding>,
    spec: CaptureSpec,
    subscription: SubscriptionHandle,
}

struct MountedWidget {
    generation: u32,
    slot: Option<WidgetSlot>,
}

/// The scene: mounted widgets, their subscriptions, and the frame clock.
#[derive(Default)]
pub struct Stage {
    widgets: Vec<MountedWidget>,
    free: Vec<u32>,
    router: PointerRouter,
    last_tick_ms: Option<f64>,
    disposed: bool,
}

impl Stage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount a widget with an explicit capture spec.
    ///
    /// If the spec's regions do not resolve yet, the widget mounts with a
    /// null subscription and attachment is retried on the next pointer
    /// dispatch.
    pub fn mount(
        &mut self,
        binding: impl WidgetBinding + 'static,
        spec: CaptureSpec,
        probe: &dyn LayoutProbe,
    ) -> WidgetHandle {
        if self.disposed {
            tracing::warn!("Ignoring mount on disposed stage");
            return WidgetHandle::DEAD;
        }

        let subscription = self.router.attach(spec.clone(), probe);
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.widgets.push(MountedWidget {
                    generation: 0,
                    slot: None,
                });
                (self.widgets.len() - 1) as u32
            }
        };

        let widget = &mut self.widgets[index as usize];
        widget.slot = Some(WidgetSlot {
            binding: Box::new(binding),
            spec,
            subscription,
        });

        let handle = WidgetHandle {
            index,
            generation: widget.generation,
        };
        tracing::debug!(
            index = handle.index,
            deferred = subscription.is_null(),
            "Widget mounted"
        );
        handle
    }

    /// Mount an eye: listens viewport-wide, anchored at its region's center.
    pub fn mount_eye(
        &mut self,
        config: EyeConfig,
        region: impl Into<RegionId>,
        probe: &dyn LayoutProbe,
    ) -> WidgetHandle {
        self.mount(
            EyeTracker::new(config),
            CaptureSpec::viewport_anchored_at(region),
            probe,
        )
    }

    /// Mount a mouth bounded to its own region.
    pub fn mount_mouth(
        &mut self,
        config: MouthConfig,
        region: impl Into<RegionId>,
        probe: &dyn LayoutProbe,
    ) -> WidgetHandle {
        self.mount(MouthTracker::new(config), CaptureSpec::region(region), probe)
    }

    /// Mount a parallax group bounded to its container region.
    pub fn mount_parallax(
        &mut self,
        config: ParallaxConfig,
        region: impl Into<RegionId>,
        probe: &dyn LayoutProbe,
    ) -> WidgetHandle {
        self.mount(ParallaxLogos::new(config), CaptureSpec::region(region), probe)
    }

    /// Unmount a widget, detaching its subscription. Idempotent: stale or
    /// dead handles are no-ops.
    pub fn unmount(&mut self, handle: WidgetHandle) {
        let Some(widget) = self.widgets.get_mut(handle.index as usize) else {
            return;
        };
        if widget.generation != handle.generation || widget.slot.is_none() {
            return;
        }
        if let Some(slot) = widget.slot.take() {
            self.router.detach(slot.subscription);
        }
        widget.generation = widget.generation.wrapping_add(1);
        self.free.push(handle.index);
        tracing::debug!(index = handle.index, "Widget unmounted");
    }

    /// Tear down every widget and refuse further work. Idempotent.
    pub fn dispose(&mut self) {
        if self.disposed {
            return;
        }
        for index in 0..self.widgets.len() {
            let widget = &mut self.widgets[index];
            if let Some(slot) = widget.slot.take() {
                self.router.detach(slot.subscription);
                widget.generation = widget.generation.wrapping_add(1);
            }
        }
        self.disposed = true;
        tracing::debug!("Stage disposed");
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    /// Feed one viewport-space pointer move.
    ///
    /// Widgets whose attach was deferred (region not yet laid out) are
    /// retried here before routing, so late-mounting layouts heal without
    /// host involvement.
    pub fn pointer_moved(&mut self, x: f64, y: f64, probe: &dyn LayoutProbe) {
        if self.disposed {
            return;
        }

        for widget in self.widgets.iter_mut() {
            let Some(slot) = widget.slot.as_mut() else {
                continue;
            };
            if slot.subscription.is_null() {
                let retried = self.router.attach(slot.spec.clone(), probe);
                if !retried.is_null() {
                    tracing::debug!("Deferred subscription attached");
                    slot.subscription = retried;
                }
            }
        }

        let events = self.router.pointer_moved(x, y, probe);
        self.deliver(&events);
    }

    /// Feed a viewport-wide pointer leave.
    pub fn pointer_left(&mut self) {
        if self.disposed {
            return;
        }
        let events = self.router.pointer_left();
        self.deliver(&events);
    }

    /// Advance every widget's motion to wall-clock time `now_ms`.
    ///
    /// The first tick establishes the clock base. A non-monotonic `now_ms`
    /// rebases the clock instead of integrating a negative interval.
    pub fn tick(&mut self, now_ms: f64) {
        if self.disposed {
            return;
        }
        if !now_ms.is_finite() {
            tracing::warn!(now_ms, "Ignoring non-finite tick timestamp");
            return;
        }

        let dt_secs = match self.last_tick_ms {
            Some(last) if now_ms >= last => (now_ms - last) / 1000.0,
            Some(last) => {
                tracing::debug!(now_ms, last_ms = last, "Non-monotonic tick; rebasing clock");
                self.last_tick_ms = Some(now_ms);
                return;
            }
            None => 0.0,
        };
        self.last_tick_ms = Some(now_ms);

        for widget in self.widgets.iter_mut() {
            if let Some(slot) = widget.slot.as_mut() {
                slot.binding.tick(dt_secs);
            }
        }
    }

    /// Presentation parameters for one widget, `None` once unmounted.
    pub fn params(&self, handle: WidgetHandle) -> Option<WidgetParams> {
        let widget = self.widgets.get(handle.index as usize)?;
        if widget.generation != handle.generation {
            return None;
        }
        widget.slot.as_ref().map(|slot| slot.binding.params())
    }

    /// Parameters for every mounted widget, in slot order.
    pub fn all_params(&self) -> Vec<(WidgetHandle, WidgetParams)> {
        self.widgets
            .iter()
            .enumerate()
            .filter_map(|(index, widget)| {
                let slot = widget.slot.as_ref()?;
                Some((
                    WidgetHandle {
                        index: index as u32,
                        generation: widget.generation,
                    },
                    slot.binding.params(),
                ))
            })
            .collect()
    }

    /// Lifecycle phase of one widget, `None` once unmounted.
    pub fn phase(&self, handle: WidgetHandle) -> Option<TrackingPhase> {
        let widget = self.widgets.get(handle.index as usize)?;
        if widget.generation != handle.generation {
            return None;
        }
        widget.slot.as_ref().map(|slot| slot.binding.phase())
    }

    /// Whether any widget still needs frames. Hosts can pause their frame
    /// scheduler when this is false and resume on the next event.
    pub fn is_active(&self) -> bool {
        self.widgets
            .iter()
            .filter_map(|widget| widget.slot.as_ref())
            .any(|slot| slot.binding.is_active())
    }

    /// Number of mounted widgets.
    pub fn widget_count(&self) -> usize {
        self.widgets.iter().filter(|w| w.slot.is_some()).count()
    }

    fn deliver(&mut self, events: &[RoutedEvent]) {
        for event in events {
            let handle = event.handle();
            let slot = self.widgets.iter_mut().find_map(|widget| {
                widget
                    .slot
                    .as_mut()
                    .filter(|slot| slot.subscription == handle)
            });
            let Some(slot) = slot else {
                continue;
            };
            match event {
                RoutedEvent::Sample { offset, .. } => slot.binding.on_sample(*offset),
                RoutedEvent::Leave { .. } => slot.binding.on_leave(),
            }
        }
    }
}
