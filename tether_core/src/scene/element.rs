// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host-element contract and node descriptors.

use kurbo::{Point, Size, Vec2};

/// A host-side visual element (sprite, text, button, …) whose layout the
/// engine drives.
///
/// The engine never holds on to an `Element`. [`Scene::adopt`] reads its
/// state once to create a node, and [`Scene::write_back`] pushes the node's
/// resolved state back out.
///
/// Origin support is optional: an element that returns `None` from
/// [`origin`](Self::origin) is recorded as having no origin setter, and the
/// engine will never call [`set_origin`](Self::set_origin) on it.
///
/// [`Scene::adopt`]: super::Scene::adopt
/// [`Scene::write_back`]: super::Scene::write_back
pub trait Element {
    /// Current position.
    fn position(&self) -> Point;

    /// Moves the element.
    fn set_position(&mut self, position: Point);

    /// Natural (unscaled) display size.
    fn size(&self) -> Size;

    /// Current scale.
    fn scale(&self) -> Vec2;

    /// Sets the scale.
    fn set_scale(&mut self, scale: Vec2);

    /// Current origin, or `None` if the element has no origin setter.
    fn origin(&self) -> Option<Point> {
        None
    }

    /// Sets the origin. Only called on elements whose [`origin`](Self::origin)
    /// returned `Some` at adoption time.
    fn set_origin(&mut self, origin: Point) {
        _ = origin;
    }

    /// Shows or hides the element.
    fn set_visible(&mut self, visible: bool) {
        _ = visible;
    }

    /// Whether the element is live. Inactive elements are skipped by the
    /// registry.
    fn is_active(&self) -> bool {
        true
    }
}

/// Capabilities detected once, when a node is created.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct NodeCaps {
    /// The element accepts origin changes.
    pub origin: bool,
}

/// Per-node boolean flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeFlags {
    /// Whether the node (and its subtree) is hidden.
    pub hidden: bool,
    /// Whether the node is live. Inactive nodes keep their state but the
    /// registry does not reposition them.
    pub active: bool,
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self {
            hidden: false,
            active: true,
        }
    }
}

/// Initial state for [`Scene::create_node`](super::Scene::create_node).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeDesc {
    /// Local position.
    pub position: Point,
    /// Natural size.
    pub size: Size,
    /// Scale.
    pub scale: Vec2,
    /// Origin; `None` marks a node without an origin setter, which is then
    /// treated as centered.
    pub origin: Option<Point>,
}

impl NodeDesc {
    /// Centered origin used for nodes that can not change theirs.
    pub const CENTER: Point = Point::new(0.5, 0.5);

    /// A node of the given natural size at the origin, unit scale, with an
    /// origin setter initialised to the center.
    #[must_use]
    pub const fn sized(width: f64, height: f64) -> Self {
        Self {
            position: Point::ORIGIN,
            size: Size::new(width, height),
            scale: Vec2::new(1.0, 1.0),
            origin: Some(Self::CENTER),
        }
    }

    /// Returns this descriptor without an origin setter.
    #[must_use]
    pub const fn without_origin(mut self) -> Self {
        self.origin = None;
        self
    }

    /// Returns this descriptor with the given scale.
    #[must_use]
    pub const fn with_scale(mut self, sx: f64, sy: f64) -> Self {
        self.scale = Vec2::new(sx, sy);
        self
    }

    /// Returns this descriptor at the given position.
    #[must_use]
    pub const fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Point::new(x, y);
        self
    }

    /// Captures a host element's current state.
    #[must_use]
    pub fn from_element(element: &dyn Element) -> Self {
        Self {
            position: element.position(),
            size: element.size(),
            scale: element.scale(),
            origin: element.origin(),
        }
    }
}
