// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layout engine: one scene, one viewport, one registry and the
//! containers laid out in it.
//!
//! [`LayoutEngine`] is the process-scoped service a host creates once. It
//! owns the ordered list of resize subscribers: the registry subscribes when
//! the engine is created and every screen-fitted container subscribes when it
//! is created (or gains screen-fit) and unsubscribes when destroyed. A
//! viewport change dispatches to subscribers in subscription order.
//! [`destroy`](LayoutEngine::destroy) tears everything down and hands the
//! scene back.

use alloc::collections::BTreeMap;

use kurbo::Size;

use crate::align::{Alignment, Margin};
use crate::container::{AdaptiveContainer, ChildAnchor, ContainerConfig};
use crate::registry::{Registry, TrackOptions};
use crate::scene::{Element, NodeDesc, NodeId, Scene};
use crate::subscription::Subscriptions;
use crate::trace::{Tracer, ViewportEvent};
use crate::viewport::{Edges, Viewport};

/// Engine construction parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EngineConfig {
    /// Initial viewport.
    pub viewport: Viewport,
    /// Design resolution for the global screen scale.
    pub base_size: Size,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            base_size: Size::new(1024.0, 768.0),
        }
    }
}

/// A resize subscriber.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
enum ResizeTarget {
    Registry,
    Container(NodeId),
}

/// Responsive layout service.
#[derive(Debug)]
pub struct LayoutEngine {
    scene: Scene,
    viewport: Viewport,
    registry: Registry,
    containers: BTreeMap<NodeId, AdaptiveContainer>,
    subscriptions: Subscriptions<ResizeTarget>,
}

impl Default for LayoutEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl LayoutEngine {
    /// Creates an engine with an empty scene.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self::with_scene(Scene::new(), config)
    }

    /// Creates an engine around an existing scene.
    #[must_use]
    pub fn with_scene(scene: Scene, config: EngineConfig) -> Self {
        let mut subscriptions = Subscriptions::new();
        let _ = subscriptions.subscribe(ResizeTarget::Registry);
        Self {
            scene,
            viewport: config.viewport,
            registry: Registry::new(config.base_size),
            containers: BTreeMap::new(),
            subscriptions,
        }
    }

    /// The scene.
    #[must_use]
    pub const fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The scene, mutably. Use this to evaluate, to create plain nodes and to
    /// flip flags; go through the engine for anything a container or the
    /// registry tracks.
    pub const fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    /// Current viewport.
    #[must_use]
    pub const fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    /// The tracked-element registry.
    #[must_use]
    pub const fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Number of resize subscribers, the registry included.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.len()
    }

    // -- Nodes --

    /// Creates a plain node.
    pub fn create_node(&mut self, desc: NodeDesc) -> NodeId {
        self.scene.create_node(desc)
    }

    /// Creates a node mirroring a host element.
    pub fn adopt(&mut self, element: &dyn Element) -> NodeId {
        self.scene.adopt(element)
    }

    /// Destroys a plain node.
    ///
    /// The node is not untracked or removed from its container; do that
    /// first. Stale registry entries are skipped (with a warning) on the next
    /// resize.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the node has children.
    pub fn destroy_node(&mut self, node: NodeId) {
        self.scene.destroy_node(node);
    }

    // -- Registry --

    /// Tracks a node; see [`Registry::track`].
    pub fn track(
        &mut self,
        node: NodeId,
        alignment: Alignment,
        margin: impl Into<Margin>,
        options: TrackOptions,
    ) -> bool {
        self.registry
            .track(&mut self.scene, &self.viewport, node, alignment, margin, options)
    }

    /// Stops tracking a node.
    pub fn untrack(&mut self, node: NodeId) -> bool {
        self.registry.untrack(node)
    }

    /// Repositions one tracked node.
    pub fn reposition(&mut self, node: NodeId) -> bool {
        self.registry
            .reposition(&mut self.scene, &self.viewport, node)
    }

    // -- Containers --

    /// Creates a container, lays it out, and registers it for repositioning
    /// (if it has an alignment and `auto_position`) and for screen-fit (if
    /// enabled).
    pub fn create_container(&mut self, config: ContainerConfig) -> NodeId {
        let container = AdaptiveContainer::new(&mut self.scene, &self.viewport, config);
        let node = container.node();
        self.containers.insert(node, container);
        self.sync_container(node);
        node
    }

    /// Returns a container.
    #[must_use]
    pub fn container(&self, node: NodeId) -> Option<&AdaptiveContainer> {
        self.containers.get(&node)
    }

    /// Iterates over containers in handle order.
    pub fn containers(&self) -> impl Iterator<Item = &AdaptiveContainer> {
        self.containers.values()
    }

    /// Returns the container that currently holds `child`.
    #[must_use]
    pub fn container_of(&self, child: NodeId) -> Option<NodeId> {
        self.containers
            .values()
            .find(|c| c.contains(child))
            .map(AdaptiveContainer::node)
    }

    /// Adds `child` to a container; see [`AdaptiveContainer::add_child`].
    ///
    /// A child held by another container is removed from it first, which
    /// restores its original scale. Adding a node that would make the
    /// container its own descendant is refused.
    pub fn add_child(
        &mut self,
        container: NodeId,
        child: NodeId,
        anchor: Option<ChildAnchor>,
    ) -> bool {
        if !self.containers.contains_key(&container) {
            log::warn!("add_child: {container:?} is not a container");
            return false;
        }
        if self.is_ancestor_or_self(child, container) {
            log::warn!("add_child: {child:?} contains {container:?}, refusing to nest");
            return false;
        }
        if let Some(previous) = self.container_of(child)
            && previous != container
        {
            self.remove_child(previous, child);
        }
        if self.registry.contains(child) {
            log::warn!(
                "add_child: {child:?} is tracked by the registry; both will position it"
            );
        }
        let Some(c) = self.containers.get_mut(&container) else {
            return false;
        };
        c.add_child(&mut self.scene, &self.viewport, child, anchor)
    }

    /// Removes `child` from a container.
    pub fn remove_child(&mut self, container: NodeId, child: NodeId) -> bool {
        match self.containers.get_mut(&container) {
            Some(c) => c.remove_child(&mut self.scene, &self.viewport, child),
            None => false,
        }
    }

    /// Removes every child from a container.
    pub fn clear_children(&mut self, container: NodeId) -> bool {
        match self.containers.get_mut(&container) {
            Some(c) => {
                c.clear_children(&mut self.scene, &self.viewport);
                true
            }
            None => false,
        }
    }

    /// Changes a container's declared size.
    pub fn set_container_size(&mut self, container: NodeId, size: Size) -> bool {
        match self.containers.get_mut(&container) {
            Some(c) => {
                c.set_container_size(&mut self.scene, &self.viewport, size);
                true
            }
            None => false,
        }
    }

    /// Edits a container's configuration and re-runs its layout. Alignment
    /// and screen-fit changes update the registry and subscriptions.
    pub fn update_container_config(
        &mut self,
        container: NodeId,
        edit: impl FnOnce(&mut ContainerConfig),
    ) -> bool {
        let Some(c) = self.containers.get_mut(&container) else {
            return false;
        };
        c.update_config(&mut self.scene, &self.viewport, edit);
        self.sync_container(container);
        true
    }

    /// Destroys a container: restores and detaches its children, drops its
    /// registry entry and subscription, takes it out of any parent container
    /// and destroys its node.
    pub fn destroy_container(&mut self, container: NodeId) -> bool {
        if let Some(parent) = self.container_of(container) {
            self.remove_child(parent, container);
        }
        let Some(mut c) = self.containers.remove(&container) else {
            return false;
        };
        c.clear_children(&mut self.scene, &self.viewport);
        if let Some(id) = c.subscription.take() {
            self.subscriptions.unsubscribe(id);
        }
        self.registry.untrack(container);
        self.destroy_container_node(container);
        true
    }

    // -- Viewport --

    /// Handles a viewport resize.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.resize_traced(width, height, &mut Tracer::none());
    }

    /// Like [`resize`](Self::resize), reporting to a tracer.
    pub fn resize_traced(&mut self, width: f64, height: f64, tracer: &mut Tracer<'_>) {
        self.viewport.resize(width, height);
        self.dispatch(tracer);
    }

    /// Replaces the safe-area insets and re-runs every subscriber.
    pub fn set_safe_area(&mut self, safe_area: Edges) {
        self.viewport.set_safe_area(safe_area);
        self.dispatch(&mut Tracer::none());
    }

    /// Re-runs every subscriber against the current viewport.
    pub fn refresh(&mut self, tracer: &mut Tracer<'_>) {
        self.dispatch(tracer);
    }

    /// Tears the engine down: every container is destroyed (children
    /// restored), the registry is emptied, all subscriptions are dropped and
    /// the scene is returned.
    #[must_use]
    pub fn destroy(mut self) -> Scene {
        let nodes: alloc::vec::Vec<NodeId> = self.containers.keys().copied().collect();
        for node in &nodes {
            if let Some(c) = self.containers.get_mut(node) {
                c.clear_children(&mut self.scene, &self.viewport);
            }
        }
        for node in nodes {
            self.destroy_container_node(node);
        }
        self.containers.clear();
        self.registry.clear();
        self.subscriptions.clear();
        self.scene
    }

    fn dispatch(&mut self, tracer: &mut Tracer<'_>) {
        tracer.viewport_change(&ViewportEvent {
            width: self.viewport.width(),
            height: self.viewport.height(),
            orientation: self.viewport.orientation(),
            safe_area: self.viewport.safe_area(),
            screen_scale: self.viewport.screen_scale(self.registry.base_size()),
        });
        log::debug!(
            "viewport {}x{} ({:?}), {} subscribers",
            self.viewport.width(),
            self.viewport.height(),
            self.viewport.orientation(),
            self.subscriptions.len()
        );
        for target in self.subscriptions.snapshot() {
            match target {
                ResizeTarget::Registry => {
                    self.registry
                        .update_all(&mut self.scene, &self.viewport, tracer);
                }
                ResizeTarget::Container(node) => {
                    if let Some(c) = self.containers.get_mut(&node) {
                        c.invalidate();
                        c.update(&mut self.scene, &self.viewport, tracer);
                    }
                }
            }
        }
    }

    /// Brings a container's registry entry and subscription in line with
    /// its configuration.
    fn sync_container(&mut self, node: NodeId) {
        let Some(c) = self.containers.get_mut(&node) else {
            return;
        };
        let config = *c.config();

        match (config.fit_screen.is_some(), c.subscription) {
            (true, None) => {
                c.subscription = Some(self.subscriptions.subscribe(ResizeTarget::Container(node)));
            }
            (false, Some(id)) => {
                self.subscriptions.unsubscribe(id);
                c.subscription = None;
            }
            _ => {}
        }

        match config.alignment {
            Some(alignment) if config.auto_position => {
                self.registry.track(
                    &mut self.scene,
                    &self.viewport,
                    node,
                    alignment,
                    config.margin,
                    TrackOptions::default(),
                );
            }
            _ => {
                self.registry.untrack(node);
            }
        }
    }

    /// Destroys a container's node, detaching anything still attached to it
    /// through the scene directly.
    fn destroy_container_node(&mut self, node: NodeId) {
        if !self.scene.is_alive(node) {
            return;
        }
        let stray: alloc::vec::Vec<NodeId> = self.scene.children(node).collect();
        for child in stray {
            self.scene.detach(child);
        }
        self.scene.detach(node);
        self.scene.destroy_node(node);
    }

    fn is_ancestor_or_self(&self, candidate: NodeId, node: NodeId) -> bool {
        if !self.scene.is_alive(candidate) || !self.scene.is_alive(node) {
            return false;
        }
        node == candidate || self.scene.ancestors(node).any(|n| n == candidate)
    }

    #[cfg(test)]
    fn subscription_of(&self, node: NodeId) -> Option<crate::subscription::SubscriptionId> {
        self.containers.get(&node).and_then(|c| c.subscription)
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::{Point, Vec2};

    use super::*;
    use crate::container::{Direction, FitAxis, FitScreen};

    fn engine() -> LayoutEngine {
        LayoutEngine::new(EngineConfig::default())
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn registry_subscribes_at_init() {
        let e = engine();
        assert_eq!(e.subscriber_count(), 1);
    }

    #[test]
    fn fit_screen_containers_subscribe_and_unsubscribe() {
        let mut e = engine();
        let plain = e.create_container(ContainerConfig::new(100.0, 100.0));
        let fitted = e.create_container(
            ContainerConfig::new(100.0, 100.0).with_fit_screen(FitScreen::default()),
        );
        assert_eq!(e.subscriber_count(), 2);
        assert!(e.subscription_of(plain).is_none());
        assert!(e.subscription_of(fitted).is_some());

        assert!(e.destroy_container(fitted));
        assert_eq!(e.subscriber_count(), 1);
        assert!(!e.scene().is_alive(fitted));
        assert!(!e.destroy_container(fitted));
    }

    #[test]
    fn toggling_fit_screen_updates_subscription() {
        let mut e = engine();
        let c = e.create_container(ContainerConfig::new(100.0, 100.0));
        e.update_container_config(c, |cfg| cfg.fit_screen = Some(FitScreen::default()));
        assert_eq!(e.subscriber_count(), 2);
        e.update_container_config(c, |cfg| cfg.fit_screen = None);
        assert_eq!(e.subscriber_count(), 1);
        assert_eq!(e.scene().content_scale(c), 1.0);
    }

    #[test]
    fn aligned_container_is_tracked() {
        let mut e = engine();
        let c = e.create_container(
            ContainerConfig::new(200.0, 60.0).with_alignment(Alignment::BottomCenter, (0.0, 40.0)),
        );
        assert!(e.registry().contains(c));
        assert_eq!(e.scene().position(c), Point::new(512.0, 728.0));

        e.resize(800.0, 600.0);
        assert_eq!(e.scene().position(c), Point::new(400.0, 560.0));

        e.update_container_config(c, |cfg| cfg.auto_position = false);
        assert!(!e.registry().contains(c));
    }

    #[test]
    fn resize_is_idempotent() {
        let mut e = engine();
        let badge = e.create_node(NodeDesc::sized(32.0, 32.0));
        e.track(badge, Alignment::TopRight, 16.0, TrackOptions::default());
        let bar = e.create_container(
            ContainerConfig::new(600.0, 80.0)
                .with_alignment(Alignment::BottomCenter, (0.0, 50.0))
                .with_fit_screen(FitScreen::default().with_margin(10.0)),
        );
        let kids: Vec<_> = (0..4)
            .map(|_| {
                let k = e.create_node(NodeDesc::sized(120.0, 60.0));
                e.add_child(bar, k, None);
                k
            })
            .collect();

        e.resize(500.0, 900.0);
        let snapshot = |e: &LayoutEngine| {
            let mut v: Vec<(Point, Vec2)> = kids
                .iter()
                .chain([&badge, &bar])
                .map(|&n| (e.scene().position(n), e.scene().scale(n)))
                .collect();
            v.push((Point::ORIGIN, Vec2::new(e.scene().content_scale(bar), 0.0)));
            v
        };
        let first = snapshot(&e);
        let _ = e.scene_mut().evaluate();

        e.resize(500.0, 900.0);
        assert_eq!(snapshot(&e), first);
        assert!(e.scene_mut().evaluate().transforms.is_empty());
    }

    #[test]
    fn moving_child_between_containers_restores_scale() {
        let mut e = engine();
        let small = e.create_container(ContainerConfig::new(50.0, 50.0));
        let big = e.create_container(ContainerConfig::new(500.0, 500.0));
        let k = e.create_node(NodeDesc::sized(100.0, 100.0));

        e.add_child(small, k, None);
        assert!(approx(e.scene().scale(k).x, 0.5));

        assert!(e.add_child(big, k, None));
        assert_eq!(e.container_of(k), Some(big));
        assert!(e.container(small).is_some_and(AdaptiveContainer::is_empty));
        assert_eq!(e.scene().scale(k), Vec2::new(1.0, 1.0));
        assert_eq!(e.container(big).unwrap().child(k).unwrap().original_scale, Vec2::new(1.0, 1.0));
    }

    #[test]
    fn nested_container_is_placed_by_parent() {
        let mut e = engine();
        let outer = e.create_container(
            ContainerConfig::new(400.0, 200.0)
                .with_direction(Direction::Vertical)
                .with_alignment(Alignment::Center, 0.0),
        );
        let inner = e.create_container(
            ContainerConfig::new(300.0, 50.0)
                .with_alignment(Alignment::TopLeft, 0.0)
                .with_auto_position(false),
        );
        assert!(!e.registry().contains(inner));

        assert!(e.add_child(outer, inner, Some(ChildAnchor::Start)));
        assert_eq!(e.scene().parent(inner), Some(outer));
        assert_eq!(e.scene().position(inner), Point::new(0.0, -75.0));

        e.resize(640.0, 480.0);
        let _ = e.scene_mut().evaluate();
        let world = e.scene().world_transform(inner) * Point::ORIGIN;
        assert_eq!(world, Point::new(320.0, 165.0));
    }

    #[test]
    fn nesting_cycles_are_refused() {
        let mut e = engine();
        let outer = e.create_container(ContainerConfig::new(400.0, 200.0));
        let inner = e.create_container(ContainerConfig::new(100.0, 50.0).with_auto_position(false));
        assert!(e.add_child(outer, inner, None));
        assert!(!e.add_child(inner, outer, None));
        assert!(!e.add_child(outer, outer, None));
    }

    #[test]
    fn destroying_nested_container_leaves_parent_consistent() {
        let mut e = engine();
        let outer = e.create_container(ContainerConfig::new(400.0, 200.0));
        let inner = e.create_container(ContainerConfig::new(100.0, 50.0));
        let leaf = e.create_node(NodeDesc::sized(10.0, 10.0));
        e.add_child(outer, inner, None);
        e.add_child(inner, leaf, None);

        assert!(e.destroy_container(inner));
        assert!(e.container(outer).unwrap().is_empty());
        assert_eq!(e.scene().parent(leaf), None);
        assert!(e.scene().is_alive(leaf));
    }

    #[test]
    fn stale_tracked_node_does_not_break_resize() {
        let mut e = engine();
        let gone = e.create_node(NodeDesc::sized(10.0, 10.0));
        let kept = e.create_node(NodeDesc::sized(10.0, 10.0));
        e.track(gone, Alignment::TopLeft, 0.0, TrackOptions::default());
        e.track(kept, Alignment::BottomRight, 0.0, TrackOptions::default());
        e.destroy_node(gone);

        e.resize(300.0, 200.0);
        assert_eq!(e.scene().position(kept), Point::new(300.0, 200.0));
        assert_eq!(e.registry().len(), 2);
    }

    #[test]
    fn safe_area_change_repositions() {
        let mut e = engine();
        let n = e.create_node(NodeDesc::sized(10.0, 10.0));
        e.track(n, Alignment::TopLeft, 8.0, TrackOptions::default());
        e.set_safe_area(Edges::new(44.0, 0.0, 34.0, 0.0));
        assert_eq!(e.scene().position(n), Point::new(8.0, 52.0));
    }

    #[test]
    fn fit_screen_width_axis_follows_resize() {
        let mut e = engine();
        let bar = e.create_container(
            ContainerConfig::new(600.0, 100.0)
                .with_spacing(30.0)
                .with_fit_screen(
                    FitScreen::default()
                        .with_axis(FitAxis::Width)
                        .with_min_spacing(5.0),
                ),
        );
        for w in [100.0, 120.0, 100.0] {
            let k = e.create_node(NodeDesc::sized(w, 40.0));
            e.add_child(bar, k, None);
        }
        e.resize(400.0, 768.0);
        let c = e.container(bar).unwrap();
        assert_eq!(c.effective_size().width, 400.0);
        assert_eq!(c.fit_scale(), 1.0);

        e.resize(264.0, 768.0);
        let c = e.container(bar).unwrap();
        assert_eq!(c.effective_size().width, 330.0);
        assert!(approx(c.fit_scale(), 0.8));
    }

    #[test]
    fn destroy_restores_children_and_returns_scene() {
        let mut e = engine();
        let bar = e.create_container(ContainerConfig::new(50.0, 50.0));
        let k = e.create_node(NodeDesc::sized(100.0, 100.0));
        e.add_child(bar, k, None);
        e.track(k, Alignment::Center, 0.0, TrackOptions::default());

        let scene = e.destroy();
        assert!(!scene.is_alive(bar));
        assert!(scene.is_alive(k));
        assert_eq!(scene.scale(k), Vec2::new(1.0, 1.0));
        assert_eq!(scene.node_count(), 1);
    }
}
