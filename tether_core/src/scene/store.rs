// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays node storage with allocation, topology, and property management.

use alloc::vec::Vec;

use kurbo::{Affine, Point, Rect, Size, Vec2};
use understory_dirty::{CycleHandling, DirtyTracker, EagerPolicy};

use super::element::{Element, NodeCaps, NodeDesc, NodeFlags};
use super::id::{INVALID, NodeId};
use super::traverse::{Ancestors, Children};
use crate::dirty;

/// Struct-of-arrays storage for all visual element nodes.
///
/// Nodes are addressed by [`NodeId`] handles. Internally, each node occupies
/// a slot in parallel arrays. Destroyed nodes are recycled via a free list,
/// and generation counters prevent stale handle access.
#[derive(Debug)]
pub struct Scene {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Local properties (set by the engine or callers) --
    pub(crate) position: Vec<Point>,
    pub(crate) origin: Vec<Point>,
    pub(crate) size: Vec<Size>,
    pub(crate) scale: Vec<Vec2>,
    pub(crate) content_scale: Vec<f64>,
    pub(crate) flags: Vec<NodeFlags>,
    pub(crate) caps: Vec<NodeCaps>,

    // -- Computed properties (written by evaluate) --
    pub(crate) world_transform: Vec<Affine>,
    pub(crate) effective_hidden: Vec<bool>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,

    // -- Traversal cache --
    pub(crate) traversal_order: Vec<u32>,
    pub(crate) traversal_dirty: bool,

    // -- Lifecycle tracking --
    pub(crate) pending_added: Vec<u32>,
    pub(crate) pending_removed: Vec<u32>,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    /// Creates an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            position: Vec::new(),
            origin: Vec::new(),
            size: Vec::new(),
            scale: Vec::new(),
            content_scale: Vec::new(),
            flags: Vec::new(),
            caps: Vec::new(),
            world_transform: Vec::new(),
            effective_hidden: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            traversal_order: Vec::new(),
            traversal_dirty: true,
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
        }
    }

    // -- Allocation API --

    /// Creates a new node from a descriptor and returns its handle.
    ///
    /// A descriptor without an origin records the node as having no origin
    /// setter; such nodes are treated as centered.
    pub fn create_node(&mut self, desc: NodeDesc) -> NodeId {
        let caps = NodeCaps {
            origin: desc.origin.is_some(),
        };
        let origin = desc.origin.unwrap_or(NodeDesc::CENTER);
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            let i = idx as usize;
            self.generation[i] += 1;
            self.parent[i] = INVALID;
            self.first_child[i] = INVALID;
            self.next_sibling[i] = INVALID;
            self.prev_sibling[i] = INVALID;
            self.position[i] = desc.position;
            self.origin[i] = origin;
            self.size[i] = desc.size;
            self.scale[i] = desc.scale;
            self.content_scale[i] = 1.0;
            self.flags[i] = NodeFlags::default();
            self.caps[i] = caps;
            self.world_transform[i] = Affine::IDENTITY;
            self.effective_hidden[i] = false;
            idx
        } else {
            // Allocate a new slot.
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.position.push(desc.position);
            self.origin.push(origin);
            self.size.push(desc.size);
            self.scale.push(desc.scale);
            self.content_scale.push(1.0);
            self.flags.push(NodeFlags::default());
            self.caps.push(caps);
            self.world_transform.push(Affine::IDENTITY);
            self.effective_hidden.push(false);
            self.generation.push(0);
            idx
        };

        self.traversal_dirty = true;
        self.pending_added.push(idx);
        self.dirty.mark(idx, dirty::TOPOLOGY);
        self.dirty.mark_with(idx, dirty::TRANSFORM, &EagerPolicy);

        NodeId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Creates a node mirroring a host element, detecting its capabilities
    /// once.
    pub fn adopt(&mut self, element: &dyn Element) -> NodeId {
        let id = self.create_node(NodeDesc::from_element(element));
        if !element.is_active() {
            self.flags[id.idx as usize].active = false;
        }
        id
    }

    /// Destroys a node, freeing its slot for reuse.
    ///
    /// The registry and containers are not told; untrack the node and remove
    /// it from its container first.
    ///
    /// # Panics
    ///
    /// Panics if the node has children (remove them first) or if the handle
    /// is stale.
    pub fn destroy_node(&mut self, id: NodeId) {
        self.validate(id);
        let idx = id.idx;
        assert!(
            self.first_child[idx as usize] == INVALID,
            "cannot destroy node with children"
        );

        if self.parent[idx as usize] != INVALID {
            let p = self.parent[idx as usize];
            self.unlink_from_parent(idx);
            self.dirty.mark(p, dirty::TOPOLOGY);
        }

        self.dirty.remove_key(idx);

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;

        self.free_list.push(idx);
        self.traversal_dirty = true;
        self.pending_removed.push(idx);
    }

    /// Returns whether the given handle refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        (id.idx < self.len)
            && self.generation[id.idx as usize] == id.generation
            && !self.free_list.contains(&id.idx)
    }

    /// Number of live nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    // -- Topology API --

    /// Makes `child` the last child of `parent`, detaching it from any
    /// previous parent first.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale or if `child == parent`.
    pub fn attach(&mut self, parent: NodeId, child: NodeId) {
        self.validate(parent);
        self.validate(child);
        assert!(parent != child, "cannot attach a node to itself");
        let p = parent.idx;
        let c = child.idx;

        if self.parent[c as usize] != INVALID {
            let old_p = self.parent[c as usize];
            self.unlink_from_parent(c);
            self.dirty.remove_dependency(c, old_p, dirty::TRANSFORM);
            self.dirty.mark(old_p, dirty::TOPOLOGY);
        }

        self.parent[c as usize] = p;
        self.prev_sibling[c as usize] = INVALID;
        self.next_sibling[c as usize] = INVALID;

        if self.first_child[p as usize] == INVALID {
            self.first_child[p as usize] = c;
        } else {
            // Walk to last child.
            let mut last = self.first_child[p as usize];
            while self.next_sibling[last as usize] != INVALID {
                last = self.next_sibling[last as usize];
            }
            self.next_sibling[last as usize] = c;
            self.prev_sibling[c as usize] = last;
        }

        // Child depends on parent for TRANSFORM.
        let _ = self.dirty.add_dependency(c, p, dirty::TRANSFORM);

        self.dirty.mark_with(c, dirty::TRANSFORM, &EagerPolicy);
        self.traversal_dirty = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
    }

    /// Detaches `child` from its parent. Returns `false` if it had none.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn detach(&mut self, child: NodeId) -> bool {
        self.validate(child);
        let c = child.idx;
        let p = self.parent[c as usize];
        if p == INVALID {
            return false;
        }
        self.unlink_from_parent(c);
        self.dirty.remove_dependency(c, p, dirty::TRANSFORM);

        self.dirty.mark_with(c, dirty::TRANSFORM, &EagerPolicy);
        self.traversal_dirty = true;
        self.dirty.mark(p, dirty::TOPOLOGY);
        true
    }

    /// Returns the parent of a node, if any.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        let p = self.parent[id.idx as usize];
        if p == INVALID {
            None
        } else {
            Some(NodeId {
                idx: p,
                generation: self.generation[p as usize],
            })
        }
    }

    /// Returns an iterator over the direct children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.idx as usize])
    }

    /// Returns an iterator over a node's parent chain, nearest first.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        self.validate(id);
        Ancestors::new(self, self.parent[id.idx as usize])
    }

    // -- Property getters (read-only, no dirty marking) --

    /// Returns the local position of a node.
    #[must_use]
    pub fn position(&self, id: NodeId) -> Point {
        self.validate(id);
        self.position[id.idx as usize]
    }

    /// Returns the origin of a node.
    #[must_use]
    pub fn origin(&self, id: NodeId) -> Point {
        self.validate(id);
        self.origin[id.idx as usize]
    }

    /// Returns the natural size of a node.
    #[must_use]
    pub fn size(&self, id: NodeId) -> Size {
        self.validate(id);
        self.size[id.idx as usize]
    }

    /// Returns the scale of a node.
    #[must_use]
    pub fn scale(&self, id: NodeId) -> Vec2 {
        self.validate(id);
        self.scale[id.idx as usize]
    }

    /// Returns the uniform content scale of a node (`1.0` unless the node is
    /// a screen-fitted container).
    #[must_use]
    pub fn content_scale(&self, id: NodeId) -> f64 {
        self.validate(id);
        self.content_scale[id.idx as usize]
    }

    /// Returns the flags of a node.
    #[must_use]
    pub fn flags(&self, id: NodeId) -> NodeFlags {
        self.validate(id);
        self.flags[id.idx as usize]
    }

    /// Returns the capabilities detected when the node was created.
    #[must_use]
    pub fn caps(&self, id: NodeId) -> NodeCaps {
        self.validate(id);
        self.caps[id.idx as usize]
    }

    /// Returns the local transform:
    /// `translate(position) * scale(scale * content_scale)`.
    #[must_use]
    pub fn local_transform(&self, id: NodeId) -> Affine {
        self.validate(id);
        self.local_transform_at(id.idx)
    }

    /// Returns the computed world transform of a node.
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called.
    #[must_use]
    pub fn world_transform(&self, id: NodeId) -> Affine {
        self.validate(id);
        self.world_transform[id.idx as usize]
    }

    /// Returns the node's drawn bounds in viewport space.
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called.
    #[must_use]
    pub fn world_bounds(&self, id: NodeId) -> Rect {
        self.validate(id);
        let i = id.idx as usize;
        let size = self.size[i];
        let origin = self.origin[i];
        let x0 = -origin.x * size.width;
        let y0 = -origin.y * size.height;
        let local = Rect::new(x0, y0, x0 + size.width, y0 + size.height);
        self.world_transform[i].transform_rect_bbox(local)
    }

    /// Returns whether the node is effectively hidden (including by an
    /// ancestor's hidden flag).
    ///
    /// Only valid after [`evaluate`](Self::evaluate) has been called.
    #[must_use]
    pub fn effective_hidden(&self, id: NodeId) -> bool {
        self.validate(id);
        self.effective_hidden[id.idx as usize]
    }

    // -- Mutation API (auto-marks dirty) --

    /// Sets the local position of a node.
    pub fn set_position(&mut self, id: NodeId, position: Point) {
        self.validate(id);
        let i = id.idx as usize;
        if self.position[i] != position {
            self.position[i] = position;
            self.dirty.mark_with(id.idx, dirty::TRANSFORM, &EagerPolicy);
        }
    }

    /// Sets the scale of a node.
    pub fn set_scale(&mut self, id: NodeId, scale: Vec2) {
        self.validate(id);
        let i = id.idx as usize;
        if self.scale[i] != scale {
            self.scale[i] = scale;
            self.dirty.mark_with(id.idx, dirty::TRANSFORM, &EagerPolicy);
        }
    }

    /// Sets the uniform content scale of a node.
    pub fn set_content_scale(&mut self, id: NodeId, content_scale: f64) {
        self.validate(id);
        let i = id.idx as usize;
        if self.content_scale[i] != content_scale {
            self.content_scale[i] = content_scale;
            self.dirty.mark_with(id.idx, dirty::TRANSFORM, &EagerPolicy);
        }
    }

    /// Sets the natural size of a node.
    pub fn set_size(&mut self, id: NodeId, size: Size) {
        self.validate(id);
        let i = id.idx as usize;
        if self.size[i] != size {
            self.size[i] = size;
            self.dirty.mark(id.idx, dirty::SIZE);
        }
    }

    /// Sets the origin of a node.
    ///
    /// Returns `false` (and changes nothing) if the node has no origin setter.
    pub fn set_origin(&mut self, id: NodeId, origin: Point) -> bool {
        self.validate(id);
        let i = id.idx as usize;
        if !self.caps[i].origin {
            return false;
        }
        if self.origin[i] != origin {
            self.origin[i] = origin;
            self.dirty.mark(id.idx, dirty::ORIGIN);
        }
        true
    }

    /// Sets whether a node is hidden.
    pub fn set_hidden(&mut self, id: NodeId, hidden: bool) {
        self.validate(id);
        let i = id.idx as usize;
        if self.flags[i].hidden != hidden {
            self.flags[i].hidden = hidden;
            self.dirty.mark_with(id.idx, dirty::TRANSFORM, &EagerPolicy);
        }
    }

    /// Sets whether a node is active. Inactive nodes are skipped by the
    /// registry's repositioning.
    pub fn set_active(&mut self, id: NodeId, active: bool) {
        self.validate(id);
        self.flags[id.idx as usize].active = active;
    }

    /// Pushes a node's resolved state to a host element.
    ///
    /// The origin is only written if the node was created with an origin
    /// setter. The element receives the combined `scale * content_scale`.
    pub fn write_back(&self, id: NodeId, element: &mut dyn Element) {
        self.validate(id);
        let i = id.idx as usize;
        element.set_position(self.position[i]);
        element.set_scale(self.scale[i] * self.content_scale[i]);
        if self.caps[i].origin {
            element.set_origin(self.origin[i]);
        }
    }

    // -- Raw-index accessors for presenters --
    //
    // These accept raw slot indices (as found in `SceneChanges`) rather than
    // `NodeId` handles, skipping generation validation. Only use with indices
    // that came from `SceneChanges` or `traversal_order()`.

    /// Returns the computed world transform at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn world_transform_at(&self, idx: u32) -> Affine {
        self.check_slot(idx);
        self.world_transform[idx as usize]
    }

    /// Returns the handle currently occupying raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn id_at(&self, idx: u32) -> NodeId {
        self.check_slot(idx);
        NodeId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Returns whether the node at raw slot `idx` is effectively hidden.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn effective_hidden_at(&self, idx: u32) -> bool {
        self.check_slot(idx);
        self.effective_hidden[idx as usize]
    }

    // -- Internal helpers --

    pub(crate) fn local_transform_at(&self, idx: u32) -> Affine {
        let i = idx as usize;
        let s = self.scale[i] * self.content_scale[i];
        Affine::translate(self.position[i].to_vec2()) * Affine::scale_non_uniform(s.x, s.y)
    }

    fn check_slot(&self, idx: u32) {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
    }

    /// Panics if the handle is stale.
    fn validate(&self, id: NodeId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale NodeId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    /// Removes `idx` from its parent's child list without touching dirty state.
    fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            // Was first child.
            self.first_child[p as usize] = next;
        }

        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        }

        self.parent[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn create_and_destroy() {
        let mut scene = Scene::new();
        let id = scene.create_node(NodeDesc::sized(10.0, 10.0));
        assert!(scene.is_alive(id));
        assert_eq!(scene.node_count(), 1);
        scene.destroy_node(id);
        assert!(!scene.is_alive(id));
        assert_eq!(scene.node_count(), 0);
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut scene = Scene::new();
        let id1 = scene.create_node(NodeDesc::sized(1.0, 1.0));
        scene.destroy_node(id1);
        let id2 = scene.create_node(NodeDesc::sized(1.0, 1.0));
        assert!(!scene.is_alive(id1));
        assert!(scene.is_alive(id2));
        assert_eq!(id1.idx, id2.idx);
        assert_ne!(id1.generation, id2.generation);
    }

    #[test]
    fn attach_moves_between_parents() {
        let mut scene = Scene::new();
        let p1 = scene.create_node(NodeDesc::sized(100.0, 100.0));
        let p2 = scene.create_node(NodeDesc::sized(100.0, 100.0));
        let a = scene.create_node(NodeDesc::sized(10.0, 10.0));
        let b = scene.create_node(NodeDesc::sized(10.0, 10.0));

        scene.attach(p1, a);
        scene.attach(p1, b);
        assert_eq!(scene.children(p1).collect::<Vec<_>>(), vec![a, b]);

        scene.attach(p2, a);
        assert_eq!(scene.parent(a), Some(p2));
        assert_eq!(scene.children(p1).collect::<Vec<_>>(), vec![b]);
    }

    #[test]
    fn detach_without_parent_is_false() {
        let mut scene = Scene::new();
        let a = scene.create_node(NodeDesc::sized(10.0, 10.0));
        assert!(!scene.detach(a));
    }

    #[test]
    fn origin_capability_is_fixed_at_creation() {
        let mut scene = Scene::new();
        let with = scene.create_node(NodeDesc::sized(10.0, 10.0));
        let without = scene.create_node(NodeDesc::sized(10.0, 10.0).without_origin());

        assert!(scene.set_origin(with, Point::new(1.0, 0.0)));
        assert_eq!(scene.origin(with), Point::new(1.0, 0.0));

        assert!(!scene.set_origin(without, Point::new(1.0, 0.0)));
        assert_eq!(scene.origin(without), NodeDesc::CENTER);
    }

    #[test]
    fn world_bounds_respects_origin_and_scale() {
        let mut scene = Scene::new();
        let id = scene.create_node(NodeDesc::sized(100.0, 50.0).at(200.0, 100.0));
        scene.set_scale(id, Vec2::new(0.5, 0.5));
        let _ = scene.evaluate();
        assert_eq!(scene.world_bounds(id), Rect::new(175.0, 87.5, 225.0, 112.5));
    }

    #[test]
    #[should_panic(expected = "cannot destroy node with children")]
    fn destroy_with_children_panics() {
        let mut scene = Scene::new();
        let parent = scene.create_node(NodeDesc::sized(1.0, 1.0));
        let child = scene.create_node(NodeDesc::sized(1.0, 1.0));
        scene.attach(parent, child);
        scene.destroy_node(parent);
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn destroyed_handle_panics_on_set_position() {
        let mut scene = Scene::new();
        let id = scene.create_node(NodeDesc::sized(1.0, 1.0));
        scene.destroy_node(id);
        scene.set_position(id, Point::ORIGIN);
    }

    #[test]
    fn unchanged_writes_do_not_dirty() {
        let mut scene = Scene::new();
        let id = scene.create_node(NodeDesc::sized(10.0, 10.0));
        let _ = scene.evaluate();

        scene.set_position(id, Point::ORIGIN);
        scene.set_scale(id, Vec2::new(1.0, 1.0));
        let changes = scene.evaluate();
        assert!(changes.transforms.is_empty());
    }

    #[test]
    fn write_back_skips_origin_without_capability() {
        #[derive(Default)]
        struct Sprite {
            position: Point,
            scale: Vec2,
            origin_writes: u32,
        }
        impl Element for Sprite {
            fn position(&self) -> Point {
                self.position
            }
            fn set_position(&mut self, position: Point) {
                self.position = position;
            }
            fn size(&self) -> Size {
                Size::new(32.0, 32.0)
            }
            fn scale(&self) -> Vec2 {
                self.scale
            }
            fn set_scale(&mut self, scale: Vec2) {
                self.scale = scale;
            }
            fn set_origin(&mut self, _origin: Point) {
                self.origin_writes += 1;
            }
        }

        let mut scene = Scene::new();
        let mut sprite = Sprite {
            scale: Vec2::new(1.0, 1.0),
            ..Sprite::default()
        };
        let id = scene.adopt(&sprite);
        assert!(!scene.caps(id).origin);

        scene.set_position(id, Point::new(5.0, 6.0));
        scene.write_back(id, &mut sprite);
        assert_eq!(sprite.position, Point::new(5.0, 6.0));
        assert_eq!(sprite.origin_writes, 0);
    }
}
