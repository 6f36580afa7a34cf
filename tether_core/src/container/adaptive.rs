// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The adaptive container state machine.

use alloc::vec::Vec;

use kurbo::{Rect, Size};

use super::config::{ChildAnchor, ContainerConfig, Direction};
use super::fit::{FitPhase, ScreenFit, compute_screen_fit, tightened_spacing};
use super::layout::{ChildEntry, arrange, content_box, required_space, scale_factor};
use crate::scene::{NodeDesc, NodeId, Scene};
use crate::subscription::SubscriptionId;
use crate::trace::{LayoutPassEvent, ScreenFitEvent, Tracer};
use crate::viewport::Viewport;

/// Layout validity of a container.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum LayoutState {
    /// Children or configuration changed since the last pass.
    #[default]
    Dirty,
    /// Children are positioned for the current inputs.
    Clean,
}

/// A scene node that owns and lays out a set of children.
///
/// Mutators mark the container [`Dirty`](LayoutState::Dirty) and re-run the
/// full recompute before returning, so callers only ever observe
/// [`Clean`](LayoutState::Clean) containers. Mutating a container while its
/// own recompute is running is impossible: every mutator takes `&mut self`.
#[derive(Clone, Debug)]
pub struct AdaptiveContainer {
    node: NodeId,
    config: ContainerConfig,
    children: Vec<ChildEntry>,
    effective_size: Size,
    scale_factor: f64,
    fit_scale: f64,
    spacing: f64,
    last_fit: Option<ScreenFit>,
    state: LayoutState,
    pub(crate) subscription: Option<SubscriptionId>,
}

impl AdaptiveContainer {
    /// Creates the container's node in `scene` and runs the first pass.
    ///
    /// Container nodes have no origin setter; their local space is centered.
    pub fn new(scene: &mut Scene, viewport: &Viewport, config: ContainerConfig) -> Self {
        let node = scene.create_node(
            NodeDesc::sized(config.size.width, config.size.height).without_origin(),
        );
        let mut container = Self {
            node,
            config,
            children: Vec::new(),
            effective_size: config.size,
            scale_factor: 1.0,
            fit_scale: 1.0,
            spacing: config.spacing,
            last_fit: None,
            state: LayoutState::Dirty,
            subscription: None,
        };
        container.update(scene, viewport, &mut Tracer::none());
        container
    }

    /// The container's scene node.
    #[must_use]
    pub const fn node(&self) -> NodeId {
        self.node
    }

    /// Current configuration.
    #[must_use]
    pub const fn config(&self) -> &ContainerConfig {
        &self.config
    }

    /// Layout validity.
    #[must_use]
    pub const fn state(&self) -> LayoutState {
        self.state
    }

    /// Uniform child scale factor from the last pass.
    #[must_use]
    pub const fn scale_factor(&self) -> f64 {
        self.scale_factor
    }

    /// Uniform container scale from screen-fit (`1.0` without screen-fit).
    #[must_use]
    pub const fn fit_scale(&self) -> f64 {
        self.fit_scale
    }

    /// Spacing used by the last pass.
    #[must_use]
    pub const fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Effective (possibly screen-fit-reduced) size.
    #[must_use]
    pub const fn effective_size(&self) -> Size {
        self.effective_size
    }

    /// Declared size.
    #[must_use]
    pub const fn declared_size(&self) -> Size {
        self.config.size
    }

    /// Content box derived from the effective size and padding, in
    /// container-local coordinates.
    #[must_use]
    pub fn content_bounds(&self) -> Rect {
        content_box(self.effective_size, &self.config)
    }

    /// Children in insertion order.
    pub fn children(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.children.iter().map(|c| c.node)
    }

    /// Recorded entry for a child.
    #[must_use]
    pub fn child(&self, node: NodeId) -> Option<&ChildEntry> {
        self.children.iter().find(|c| c.node == node)
    }

    /// Whether `node` is a child of this container.
    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.child(node).is_some()
    }

    /// Number of children.
    #[must_use]
    pub fn len(&self) -> usize {
        self.children.len()
    }

    /// Whether the container has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Screen-fit report from the last pass.
    #[must_use]
    pub const fn last_fit(&self) -> Option<&ScreenFit> {
        self.last_fit.as_ref()
    }

    /// Adds a child, capturing its current size, scale and origin as the
    /// originals every later pass scales from. Add children at their
    /// natural, unscaled size.
    ///
    /// `anchor` defaults to the configured default anchor. Adding a child
    /// that is already present re-captures it with the new anchor. Returns
    /// `false` (with a warning) if the node is dead or is this container.
    pub fn add_child(
        &mut self,
        scene: &mut Scene,
        viewport: &Viewport,
        node: NodeId,
        anchor: Option<ChildAnchor>,
    ) -> bool {
        if !scene.is_alive(node) || node == self.node {
            log::warn!("container {:?}: cannot add {node:?} as a child", self.node);
            return false;
        }
        if let Some(i) = self.children.iter().position(|c| c.node == node) {
            let old = self.children.remove(i);
            scene.set_scale(node, old.original_scale);
        }
        self.children.push(ChildEntry {
            node,
            anchor: anchor.unwrap_or(self.config.default_anchor),
            original_size: scene.size(node),
            original_scale: scene.scale(node),
            pivot: scene.origin(node),
        });
        scene.attach(self.node, node);
        self.invalidate();
        self.update(scene, viewport, &mut Tracer::none());
        true
    }

    /// Removes a child, restoring its original scale and detaching it.
    /// Returns `false` if it was not a child.
    pub fn remove_child(&mut self, scene: &mut Scene, viewport: &Viewport, node: NodeId) -> bool {
        let Some(i) = self.children.iter().position(|c| c.node == node) else {
            return false;
        };
        let entry = self.children.remove(i);
        self.release(scene, &entry);
        self.invalidate();
        self.update(scene, viewport, &mut Tracer::none());
        true
    }

    /// Removes every child, restoring their original scales.
    pub fn clear_children(&mut self, scene: &mut Scene, viewport: &Viewport) {
        for entry in core::mem::take(&mut self.children) {
            self.release(scene, &entry);
        }
        self.invalidate();
        self.update(scene, viewport, &mut Tracer::none());
    }

    /// Changes the declared size.
    pub fn set_container_size(&mut self, scene: &mut Scene, viewport: &Viewport, size: Size) {
        self.config.size = size;
        self.invalidate();
        self.update(scene, viewport, &mut Tracer::none());
    }

    /// Edits the configuration in place and re-runs the layout.
    pub fn update_config(
        &mut self,
        scene: &mut Scene,
        viewport: &Viewport,
        edit: impl FnOnce(&mut ContainerConfig),
    ) {
        edit(&mut self.config);
        self.invalidate();
        self.update(scene, viewport, &mut Tracer::none());
    }

    /// Marks the layout stale.
    pub fn invalidate(&mut self) {
        self.state = LayoutState::Dirty;
    }

    /// Runs the recompute pass if the layout is stale.
    ///
    /// With screen-fit enabled the effective size and container scale are
    /// derived from the viewport first; the children are then laid out in
    /// the effective content box and the container scale is applied to the
    /// container node as a whole.
    pub fn update(&mut self, scene: &mut Scene, viewport: &Viewport, tracer: &mut Tracer<'_>) {
        if self.state == LayoutState::Clean {
            return;
        }
        if !scene.is_alive(self.node) {
            log::warn!("container {:?} has no live node, skipping layout", self.node);
            return;
        }
        self.prune_dead(scene);

        let fit = compute_screen_fit(&self.config, &self.children, viewport);
        let (size, fit_scale) = fit.map_or((self.config.size, 1.0), |f| (f.size, f.scale));
        self.effective_size = size;
        self.fit_scale = fit_scale;
        self.last_fit = fit;
        scene.set_size(self.node, size);
        scene.set_content_scale(self.node, fit_scale);
        if let Some(f) = fit {
            tracer.screen_fit(&ScreenFitEvent {
                container: self.node,
                size: f.size,
                scale: f.scale,
                width: f.width,
                height: f.height,
            });
        }

        let content = self.content_bounds();
        let (content_main, _) = self.config.direction.split(content.size());
        // Spacing only tightens once the main axis has given up declared size.
        let main_fit = fit.and_then(|f| match self.config.direction {
            Direction::Horizontal => f.width,
            Direction::Vertical => f.height,
        });
        self.spacing = match (self.config.fit_screen, main_fit) {
            (Some(fs), Some(axis)) if axis.phase != FitPhase::Declared => {
                tightened_spacing(&self.config, &fs, &self.children, content_main)
            }
            _ => self.config.spacing,
        };

        if !self.children.is_empty() {
            let required = required_space(
                &self.children,
                self.config.direction,
                self.spacing,
                self.config.flexible_spacing,
            );
            self.scale_factor = scale_factor(required, content, &self.config);
            for p in arrange(
                &self.children,
                content,
                self.config.direction,
                self.config.cross_align,
                self.spacing,
                self.config.flexible_spacing,
                self.scale_factor,
            ) {
                scene.set_position(p.node, p.position);
                scene.set_scale(p.node, p.scale);
            }
        }
        tracer.layout_pass(&LayoutPassEvent {
            container: self.node,
            children: self.children.len(),
            scale_factor: self.scale_factor,
            content,
            spacing: self.spacing,
        });
        log::debug!(
            "container {:?}: {} children, size {}x{}, child scale {:.3}, container scale {:.3}",
            self.node,
            self.children.len(),
            size.width,
            size.height,
            self.scale_factor,
            fit_scale,
        );

        self.state = LayoutState::Clean;
    }

    fn release(&self, scene: &mut Scene, entry: &ChildEntry) {
        if !scene.is_alive(entry.node) {
            return;
        }
        scene.set_scale(entry.node, entry.original_scale);
        if scene.parent(entry.node) == Some(self.node) {
            scene.detach(entry.node);
        }
    }

    fn prune_dead(&mut self, scene: &Scene) {
        let node = self.node;
        self.children.retain(|c| {
            let alive = scene.is_alive(c.node);
            if !alive {
                log::warn!(
                    "container {node:?}: child {:?} was destroyed without being removed",
                    c.node
                );
            }
            alive
        });
    }
}
