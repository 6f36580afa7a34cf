// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracked-element registry.
//!
//! The registry holds one [`TrackedElement`] per node: an alignment, a margin
//! and [`TrackOptions`]. Whenever the viewport changes, [`Registry::update_all`]
//! replays every entry in insertion order through
//! [`resolve_position`](crate::align::resolve_position) and writes the result
//! into the [`Scene`].
//!
//! Entries only hold a [`NodeId`]. Destroying a node without untracking it
//! first leaves a stale entry behind; `update_all` detects the stale handle,
//! logs a warning and skips it. Removing the entry is still the caller's job.

use alloc::vec::Vec;

use kurbo::{Size, Vec2};

use crate::align::{Alignment, Margin, resolve_position};
use crate::scene::{NodeId, Scene};
use crate::trace::{SkipEvent, SkipReason, Tracer};
use crate::viewport::{Orientation, Viewport};

/// Alignment (and optionally margin) used instead of the entry's own while
/// the viewport is in a given orientation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrientationOverride {
    /// Alignment to use.
    pub alignment: Alignment,
    /// Margin to use; `None` keeps the entry's margin.
    pub margin: Option<Margin>,
}

impl OrientationOverride {
    /// Overrides only the alignment.
    #[must_use]
    pub const fn new(alignment: Alignment) -> Self {
        Self {
            alignment,
            margin: None,
        }
    }

    /// Also overrides the margin.
    #[must_use]
    pub fn with_margin(mut self, margin: impl Into<Margin>) -> Self {
        self.margin = Some(margin.into());
        self
    }
}

/// Per-orientation overrides.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OrientationOverrides {
    /// Used while `height >= width`.
    pub portrait: Option<OrientationOverride>,
    /// Used while `width > height`.
    pub landscape: Option<OrientationOverride>,
}

impl OrientationOverrides {
    /// Returns the override for an orientation, if one is set.
    #[must_use]
    pub const fn get(&self, orientation: Orientation) -> Option<&OrientationOverride> {
        match orientation {
            Orientation::Portrait => self.portrait.as_ref(),
            Orientation::Landscape => self.landscape.as_ref(),
        }
    }
}

/// Options for [`Registry::track`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackOptions {
    /// Write the resolved origin to nodes that accept one. Default `true`.
    pub auto_origin: bool,
    /// Set the node's scale to the global screen scale. Default `false`.
    pub scale_with_screen: bool,
    /// Per-orientation alignment overrides.
    pub orientation_overrides: OrientationOverrides,
}

impl Default for TrackOptions {
    fn default() -> Self {
        Self {
            auto_origin: true,
            scale_with_screen: false,
            orientation_overrides: OrientationOverrides::default(),
        }
    }
}

impl TrackOptions {
    /// Sets [`auto_origin`](Self::auto_origin).
    #[must_use]
    pub const fn with_auto_origin(mut self, auto_origin: bool) -> Self {
        self.auto_origin = auto_origin;
        self
    }

    /// Sets [`scale_with_screen`](Self::scale_with_screen).
    #[must_use]
    pub const fn with_scale_with_screen(mut self, scale_with_screen: bool) -> Self {
        self.scale_with_screen = scale_with_screen;
        self
    }

    /// Sets the portrait override.
    #[must_use]
    pub const fn with_portrait(mut self, o: OrientationOverride) -> Self {
        self.orientation_overrides.portrait = Some(o);
        self
    }

    /// Sets the landscape override.
    #[must_use]
    pub const fn with_landscape(mut self, o: OrientationOverride) -> Self {
        self.orientation_overrides.landscape = Some(o);
        self
    }
}

/// One registry entry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TrackedElement {
    /// The tracked node.
    pub node: NodeId,
    /// Stored alignment.
    pub alignment: Alignment,
    /// Stored margin.
    pub margin: Margin,
    /// Options.
    pub options: TrackOptions,
}

impl TrackedElement {
    /// Alignment and margin in effect for the given orientation.
    ///
    /// The stored values are never modified by an override.
    #[must_use]
    pub fn effective(&self, orientation: Orientation) -> (Alignment, Margin) {
        match self.options.orientation_overrides.get(orientation) {
            Some(o) => (o.alignment, o.margin.unwrap_or(self.margin)),
            None => (self.alignment, self.margin),
        }
    }
}

/// Ordered set of tracked nodes, at most one entry per node.
#[derive(Clone, Debug)]
pub struct Registry {
    entries: Vec<TrackedElement>,
    base_size: Size,
}

impl Registry {
    /// Creates an empty registry. `base_size` is the design resolution used
    /// for [`TrackOptions::scale_with_screen`].
    #[must_use]
    pub fn new(base_size: Size) -> Self {
        Self {
            entries: Vec::new(),
            base_size,
        }
    }

    /// The design resolution.
    #[must_use]
    pub const fn base_size(&self) -> Size {
        self.base_size
    }

    /// Tracks a node and positions it immediately.
    ///
    /// Tracking an already-tracked node replaces its entry in place, keeping
    /// its position in the update order. Tracking a dead node is a no-op that
    /// logs a warning and returns `false`.
    pub fn track(
        &mut self,
        scene: &mut Scene,
        viewport: &Viewport,
        node: NodeId,
        alignment: Alignment,
        margin: impl Into<Margin>,
        options: TrackOptions,
    ) -> bool {
        if !scene.is_alive(node) {
            log::warn!("track: {node:?} is not a live node, ignoring");
            return false;
        }
        let entry = TrackedElement {
            node,
            alignment,
            margin: margin.into(),
            options,
        };
        if let Some(existing) = self.entries.iter_mut().find(|e| e.node == node) {
            *existing = entry;
        } else {
            self.entries.push(entry);
        }
        self.apply(&entry, scene, viewport, &mut Tracer::none());
        true
    }

    /// Stops tracking a node. Returns `false` if it was not tracked.
    pub fn untrack(&mut self, node: NodeId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.node != node);
        self.entries.len() != before
    }

    /// Repositions a single tracked node. Returns `false` if the node is not
    /// tracked or was skipped.
    pub fn reposition(&self, scene: &mut Scene, viewport: &Viewport, node: NodeId) -> bool {
        match self.get(node) {
            Some(entry) => self.apply(entry, scene, viewport, &mut Tracer::none()),
            None => false,
        }
    }

    /// Repositions every tracked node in insertion order.
    pub fn update_all(&self, scene: &mut Scene, viewport: &Viewport, tracer: &mut Tracer<'_>) {
        let mut skipped = 0_usize;
        for entry in &self.entries {
            if !self.apply(entry, scene, viewport, tracer) {
                skipped += 1;
            }
        }
        log::debug!(
            "registry: repositioned {} of {} tracked elements",
            self.entries.len() - skipped,
            self.entries.len()
        );
    }

    /// Returns the entry for a node.
    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<&TrackedElement> {
        self.entries.iter().find(|e| e.node == node)
    }

    /// Whether a node is tracked.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.get(node).is_some()
    }

    /// Entries in update order.
    pub fn iter(&self) -> impl Iterator<Item = &TrackedElement> {
        self.entries.iter()
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn apply(
        &self,
        entry: &TrackedElement,
        scene: &mut Scene,
        viewport: &Viewport,
        tracer: &mut Tracer<'_>,
    ) -> bool {
        let node = entry.node;
        if !scene.is_alive(node) {
            log::warn!("registry: {node:?} was destroyed without being untracked, skipping");
            tracer.skip(&SkipEvent {
                node,
                reason: SkipReason::Stale,
            });
            return false;
        }
        if !scene.flags(node).active {
            tracer.skip(&SkipEvent {
                node,
                reason: SkipReason::Inactive,
            });
            return false;
        }

        let (alignment, margin) = entry.effective(viewport.orientation());
        let resolved = resolve_position(alignment, margin, viewport);
        scene.set_position(node, resolved.position);

        let origin = (entry.options.auto_origin && scene.set_origin(node, resolved.origin))
            .then_some(resolved.origin);

        let scale = entry.options.scale_with_screen.then(|| {
            let s = viewport.screen_scale(self.base_size);
            scene.set_scale(node, Vec2::new(s, s));
            s
        });

        #[cfg(feature = "trace-rich")]
        tracer.reposition(&crate::trace::RepositionEvent {
            node,
            alignment,
            position: resolved.position,
            origin,
            scale,
        });
        #[cfg(not(feature = "trace-rich"))]
        {
            _ = (origin, scale);
        }

        true
    }
}
