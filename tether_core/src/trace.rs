// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing hooks for layout passes.
//!
//! This module provides a [`TraceSink`] trait with per-event methods that the
//! engine calls while handling a viewport change. All method bodies default
//! to no-ops, so implementing only the events you care about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! # Crate features
//!
//! - `trace`: enables the `Tracer` method bodies (one branch per call).
//! - `trace-rich` (implies `trace`): gates per-element [`RepositionEvent`]s.

use kurbo::{Rect, Size};
#[cfg(feature = "trace-rich")]
use kurbo::Point;

#[cfg(feature = "trace-rich")]
use crate::align::Alignment;
use crate::container::AxisFit;
use crate::scene::NodeId;
use crate::viewport::{Edges, Orientation};

/// Emitted once per viewport change, before any subscriber runs.
#[derive(Clone, Copy, Debug)]
pub struct ViewportEvent {
    /// New width.
    pub width: f64,
    /// New height.
    pub height: f64,
    /// Derived orientation.
    pub orientation: Orientation,
    /// Safe-area insets.
    pub safe_area: Edges,
    /// Global scale factor against the design resolution.
    pub screen_scale: f64,
}

/// Why a tracked element was not repositioned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// The node was destroyed without being untracked.
    Stale,
    /// The node is flagged inactive.
    Inactive,
}

/// Emitted when the registry skips an entry.
#[derive(Clone, Copy, Debug)]
pub struct SkipEvent {
    /// The skipped node.
    pub node: NodeId,
    /// Why it was skipped.
    pub reason: SkipReason,
}

/// Emitted for every element the registry repositions.
#[cfg(feature = "trace-rich")]
#[derive(Clone, Copy, Debug)]
pub struct RepositionEvent {
    /// The repositioned node.
    pub node: NodeId,
    /// Effective alignment (after orientation overrides).
    pub alignment: Alignment,
    /// Resolved position.
    pub position: Point,
    /// Origin written, if the node accepts one and auto-origin is on.
    pub origin: Option<Point>,
    /// Uniform scale written, if scale-with-screen is on.
    pub scale: Option<f64>,
}

/// Emitted at the end of every child-layout pass.
#[derive(Clone, Copy, Debug)]
pub struct LayoutPassEvent {
    /// The container.
    pub container: NodeId,
    /// Number of children laid out.
    pub children: usize,
    /// Uniform child scale factor.
    pub scale_factor: f64,
    /// Content box the children were arranged in.
    pub content: Rect,
    /// Spacing used between consecutive children.
    pub spacing: f64,
}

/// Emitted at the end of every screen-fit pass.
#[derive(Clone, Copy, Debug)]
pub struct ScreenFitEvent {
    /// The container.
    pub container: NodeId,
    /// Effective (pre-scale) size.
    pub size: Size,
    /// Uniform container scale.
    pub scale: f64,
    /// Width decision, if the width axis was evaluated.
    pub width: Option<AxisFit>,
    /// Height decision, if the height axis was evaluated.
    pub height: Option<AxisFit>,
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from layout passes.
pub trait TraceSink {
    /// Called when the viewport changes.
    fn on_viewport_change(&mut self, e: &ViewportEvent) {
        _ = e;
    }

    /// Called when the registry skips a tracked element.
    fn on_skip(&mut self, e: &SkipEvent) {
        _ = e;
    }

    /// Called for every repositioned element (requires `trace-rich`).
    #[cfg(feature = "trace-rich")]
    fn on_reposition(&mut self, e: &RepositionEvent) {
        _ = e;
    }

    /// Called after a container lays out its children.
    fn on_layout_pass(&mut self, e: &LayoutPassEvent) {
        _ = e;
    }

    /// Called after a container recomputes its screen fit.
    fn on_screen_fit(&mut self, e: &ScreenFitEvent) {
        _ = e;
    }
}

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Emits a [`ViewportEvent`].
    #[inline]
    pub fn viewport_change(&mut self, e: &ViewportEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_viewport_change(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`SkipEvent`].
    #[inline]
    pub fn skip(&mut self, e: &SkipEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_skip(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`RepositionEvent`].
    #[cfg(feature = "trace-rich")]
    #[inline]
    pub fn reposition(&mut self, e: &RepositionEvent) {
        if let Some(s) = &mut self.sink {
            s.on_reposition(e);
        }
    }

    /// Emits a [`LayoutPassEvent`].
    #[inline]
    pub fn layout_pass(&mut self, e: &LayoutPassEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_layout_pass(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`ScreenFitEvent`].
    #[inline]
    pub fn screen_fit(&mut self, e: &ScreenFitEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_screen_fit(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}
