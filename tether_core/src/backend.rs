// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Presenter contract for host integrations.
//!
//! The engine only writes local properties into its [`Scene`]. Getting those
//! values onto real host objects (sprites, text, DOM nodes) is the job of a
//! [`Presenter`], which consumes the [`SceneChanges`] produced by
//! [`Scene::evaluate`].
//!
//! # Resize loop pseudocode
//!
//! ```rust,ignore
//! fn on_host_resize(width: f64, height: f64) {
//!     // Layout: reposition tracked elements, re-fit containers
//!     engine.resize(width, height);
//!
//!     // Evaluate: drain dirty channels, recompute world transforms
//!     let changes = engine.scene_mut().evaluate();
//!
//!     // Present: push the changed nodes to the host
//!     presenter.apply(engine.scene(), &changes);
//! }
//! ```

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use crate::scene::{Element, NodeId, Scene, SceneChanges};

/// Applies evaluated scene changes to host elements.
pub trait Presenter {
    /// Applies the given [`SceneChanges`], reading current property values
    /// from `scene` as needed.
    fn apply(&mut self, scene: &Scene, changes: &SceneChanges);
}

/// A [`Presenter`] that owns host elements keyed by [`NodeId`] and writes
/// back only the nodes that changed.
///
/// Changed transforms and origins go through [`Scene::write_back`];
/// visibility transitions go through [`Element::set_visible`]. Slots that
/// were destroyed since the last evaluate are skipped.
#[derive(Debug)]
pub struct MirrorPresenter<E> {
    elements: BTreeMap<NodeId, E>,
    scratch: Vec<u32>,
}

impl<E> Default for MirrorPresenter<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> MirrorPresenter<E> {
    /// Creates an empty presenter.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            elements: BTreeMap::new(),
            scratch: Vec::new(),
        }
    }

    /// Registers the host element for a node, returning any previous one.
    pub fn insert(&mut self, node: NodeId, element: E) -> Option<E> {
        self.elements.insert(node, element)
    }

    /// Unregisters a node's host element.
    pub fn remove(&mut self, node: NodeId) -> Option<E> {
        self.elements.remove(&node)
    }

    /// Returns the host element for a node.
    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<&E> {
        self.elements.get(&node)
    }

    /// Returns the host element for a node mutably.
    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut E> {
        self.elements.get_mut(&node)
    }

    /// Iterates over registered elements in handle order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &E)> {
        self.elements.iter().map(|(&id, e)| (id, e))
    }

    /// Number of registered elements.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Whether no elements are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

impl<E: Element> Presenter for MirrorPresenter<E> {
    fn apply(&mut self, scene: &Scene, changes: &SceneChanges) {
        self.scratch.clear();
        self.scratch.extend_from_slice(&changes.transforms);
        self.scratch.extend_from_slice(&changes.origins);
        self.scratch.sort_unstable();
        self.scratch.dedup();

        for &idx in &self.scratch {
            let id = scene.id_at(idx);
            if !scene.is_alive(id) {
                continue;
            }
            if let Some(element) = self.elements.get_mut(&id) {
                scene.write_back(id, element);
            }
        }

        for (list, visible) in [(&changes.hidden, false), (&changes.unhidden, true)] {
            for &idx in list {
                let id = scene.id_at(idx);
                if let Some(element) = self.elements.get_mut(&id) {
                    element.set_visible(visible);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Size, Vec2};

    use super::*;
    use crate::scene::NodeDesc;

    #[derive(Clone, Debug, PartialEq)]
    struct Label {
        position: Point,
        scale: Vec2,
        origin: Option<Point>,
        visible: bool,
        writes: u32,
    }

    impl Label {
        fn new() -> Self {
            Self {
                position: Point::ORIGIN,
                scale: Vec2::new(1.0, 1.0),
                origin: Some(Point::new(0.5, 0.5)),
                visible: true,
                writes: 0,
            }
        }
    }

    impl Element for Label {
        fn position(&self) -> Point {
            self.position
        }
        fn set_position(&mut self, position: Point) {
            self.position = position;
            self.writes += 1;
        }
        fn size(&self) -> Size {
            Size::new(80.0, 20.0)
        }
        fn scale(&self) -> Vec2 {
            self.scale
        }
        fn set_scale(&mut self, scale: Vec2) {
            self.scale = scale;
        }
        fn origin(&self) -> Option<Point> {
            self.origin
        }
        fn set_origin(&mut self, origin: Point) {
            self.origin = Some(origin);
        }
        fn set_visible(&mut self, visible: bool) {
            self.visible = visible;
        }
    }

    #[test]
    fn writes_back_only_changed_nodes() {
        let mut scene = Scene::new();
        let mut presenter = MirrorPresenter::new();
        let a = scene.adopt(&Label::new());
        let b = scene.adopt(&Label::new());
        presenter.insert(a, Label::new());
        presenter.insert(b, Label::new());
        let changes = scene.evaluate();
        presenter.apply(&scene, &changes);

        scene.set_position(a, Point::new(10.0, 20.0));
        scene.set_origin(a, Point::new(1.0, 0.0));
        let changes = scene.evaluate();
        presenter.apply(&scene, &changes);

        let la = presenter.get(a).unwrap();
        assert_eq!(la.position, Point::new(10.0, 20.0));
        assert_eq!(la.origin, Some(Point::new(1.0, 0.0)));
        assert_eq!(la.writes, 2);
        assert_eq!(presenter.get(b).unwrap().writes, 1);
    }

    #[test]
    fn hidden_transitions_reach_elements() {
        let mut scene = Scene::new();
        let mut presenter = MirrorPresenter::new();
        let parent = scene.create_node(NodeDesc::sized(100.0, 100.0));
        let child = scene.adopt(&Label::new());
        scene.attach(parent, child);
        presenter.insert(child, Label::new());
        let _ = scene.evaluate();

        scene.set_hidden(parent, true);
        let changes = scene.evaluate();
        presenter.apply(&scene, &changes);
        assert!(!presenter.get(child).unwrap().visible);

        scene.set_hidden(parent, false);
        let changes = scene.evaluate();
        presenter.apply(&scene, &changes);
        assert!(presenter.get(child).unwrap().visible);
    }

    #[test]
    fn destroyed_slots_are_skipped() {
        let mut scene = Scene::new();
        let mut presenter = MirrorPresenter::new();
        let a = scene.adopt(&Label::new());
        presenter.insert(a, Label::new());
        scene.destroy_node(a);
        let changes = scene.evaluate();
        presenter.apply(&scene, &changes);
        assert_eq!(presenter.get(a).unwrap().writes, 0);
        assert_eq!(presenter.remove(a).map(|l| l.writes), Some(0));
        assert!(presenter.is_empty());
    }
}
