// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! In-memory event recording.
//!
//! [`RecorderSink`] implements [`TraceSink`] by cloning every event into a
//! `Vec<RecordedEvent>`. Layout events are small and `Copy`, so there is no
//! encoding step; the log can be inspected directly or exported with
//! [`snapshot::events_to_json`](crate::snapshot::events_to_json).

use tether_core::scene::NodeId;
use tether_core::trace::{
    LayoutPassEvent, RepositionEvent, ScreenFitEvent, SkipEvent, TraceSink, ViewportEvent,
};

/// A single recorded event.
#[derive(Clone, Copy, Debug)]
pub enum RecordedEvent {
    /// A viewport change.
    Viewport(ViewportEvent),
    /// A skipped registry entry.
    Skip(SkipEvent),
    /// A repositioned element.
    Reposition(RepositionEvent),
    /// A child-layout pass.
    LayoutPass(LayoutPassEvent),
    /// A screen-fit pass.
    ScreenFit(ScreenFitEvent),
}

/// Records every event it receives.
#[derive(Clone, Debug, Default)]
pub struct RecorderSink {
    events: Vec<RecordedEvent>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded events in arrival order.
    #[must_use]
    pub fn events(&self) -> &[RecordedEvent] {
        &self.events
    }

    /// Drops every recorded event.
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Number of viewport changes recorded.
    #[must_use]
    pub fn viewport_changes(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, RecordedEvent::Viewport(_)))
            .count()
    }

    /// Container scales from every screen-fit event for `container`, in
    /// order.
    #[must_use]
    pub fn fit_scales(&self, container: NodeId) -> Vec<f64> {
        self.events
            .iter()
            .filter_map(|e| match e {
                RecordedEvent::ScreenFit(f) if f.container == container => Some(f.scale),
                _ => None,
            })
            .collect()
    }

    /// Child scale factors from every layout pass of `container`, in order.
    #[must_use]
    pub fn child_scales(&self, container: NodeId) -> Vec<f64> {
        self.events
            .iter()
            .filter_map(|e| match e {
                RecordedEvent::LayoutPass(p) if p.container == container => Some(p.scale_factor),
                _ => None,
            })
            .collect()
    }
}

impl TraceSink for RecorderSink {
    fn on_viewport_change(&mut self, e: &ViewportEvent) {
        self.events.push(RecordedEvent::Viewport(*e));
    }

    fn on_skip(&mut self, e: &SkipEvent) {
        self.events.push(RecordedEvent::Skip(*e));
    }

    fn on_reposition(&mut self, e: &RepositionEvent) {
        self.events.push(RecordedEvent::Reposition(*e));
    }

    fn on_layout_pass(&mut self, e: &LayoutPassEvent) {
        self.events.push(RecordedEvent::LayoutPass(*e));
    }

    fn on_screen_fit(&mut self, e: &ScreenFitEvent) {
        self.events.push(RecordedEvent::ScreenFit(*e));
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Point;
    use tether_core::align::Alignment;
    use tether_core::container::{ContainerConfig, FitAxis, FitScreen};
    use tether_core::engine::{EngineConfig, LayoutEngine};
    use tether_core::registry::TrackOptions;
    use tether_core::scene::NodeDesc;
    use tether_core::trace::{SkipReason, Tracer};

    use super::*;

    #[test]
    fn records_a_resize_in_dispatch_order() {
        let mut engine = LayoutEngine::new(EngineConfig::default());
        let badge = engine.create_node(NodeDesc::sized(24.0, 24.0));
        engine.track(badge, Alignment::TopLeft, 4.0, TrackOptions::default());
        let bar = engine.create_container(
            ContainerConfig::new(400.0, 60.0)
                .with_fit_screen(FitScreen::default().with_axis(FitAxis::Width)),
        );
        let wide = engine.create_node(NodeDesc::sized(400.0, 40.0));
        engine.add_child(bar, wide, None);

        let mut rec = RecorderSink::new();
        engine.resize_traced(320.0, 480.0, &mut Tracer::new(&mut rec));

        let kinds: Vec<&str> = rec
            .events()
            .iter()
            .map(|e| match e {
                RecordedEvent::Viewport(_) => "viewport",
                RecordedEvent::Skip(_) => "skip",
                RecordedEvent::Reposition(_) => "reposition",
                RecordedEvent::LayoutPass(_) => "layout",
                RecordedEvent::ScreenFit(_) => "fit",
            })
            .collect();
        assert_eq!(kinds, ["viewport", "reposition", "fit", "layout"]);
        assert_eq!(rec.viewport_changes(), 1);
        assert_eq!(rec.fit_scales(bar), [0.8]);

        let RecordedEvent::Reposition(r) = rec.events()[1] else {
            panic!("expected a reposition event");
        };
        assert_eq!(r.node, badge);
        assert_eq!(r.position, Point::new(4.0, 4.0));
    }

    #[test]
    fn records_inactive_skips() {
        let mut engine = LayoutEngine::new(EngineConfig::default());
        let n = engine.create_node(NodeDesc::sized(10.0, 10.0));
        engine.track(n, Alignment::Center, 0.0, TrackOptions::default());
        engine.scene_mut().set_active(n, false);

        let mut rec = RecorderSink::new();
        engine.resize_traced(100.0, 100.0, &mut Tracer::new(&mut rec));
        assert!(rec.events().iter().any(|e| matches!(
            e,
            RecordedEvent::Skip(s) if s.reason == SkipReason::Inactive && s.node == n
        )));
    }
}
