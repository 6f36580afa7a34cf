// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Link-following iterators over the node tree.
//!
//! Both iterators walk one of the scene's index links (`next_sibling` for
//! [`Children`], `parent` for [`Ancestors`]) until they reach [`INVALID`],
//! and hand out handles stamped with the slot's current generation.

use core::iter::FusedIterator;

use super::id::{INVALID, NodeId};
use super::store::Scene;

fn handle(scene: &Scene, idx: u32) -> NodeId {
    NodeId {
        idx,
        generation: scene.generation[idx as usize],
    }
}

/// The direct children of a node, first to last.
///
/// Created by [`Scene::children`].
#[derive(Debug)]
pub struct Children<'a> {
    scene: &'a Scene,
    current: u32,
}

impl<'a> Children<'a> {
    pub(crate) fn new(scene: &'a Scene, first: u32) -> Self {
        Self {
            scene,
            current: first,
        }
    }
}

impl Iterator for Children<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let idx = self.current;
        if idx == INVALID {
            return None;
        }
        self.current = self.scene.next_sibling[idx as usize];
        Some(handle(self.scene, idx))
    }
}

impl FusedIterator for Children<'_> {}

/// The parent chain of a node, nearest first, not including the node.
///
/// Created by [`Scene::ancestors`]. Used to refuse container nesting
/// cycles.
#[derive(Debug)]
pub struct Ancestors<'a> {
    scene: &'a Scene,
    current: u32,
}

impl<'a> Ancestors<'a> {
    pub(crate) fn new(scene: &'a Scene, parent: u32) -> Self {
        Self {
            scene,
            current: parent,
        }
    }
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let idx = self.current;
        if idx == INVALID {
            return None;
        }
        self.current = self.scene.parent[idx as usize];
        Some(handle(self.scene, idx))
    }
}

impl FusedIterator for Ancestors<'_> {}
