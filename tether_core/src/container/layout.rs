// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Child layout: required space, uniform scale factor and placement.
//!
//! Everything here is a pure function of the child entries and the content
//! box. Container-local space is centered on the container's position, so a
//! content box is a [`Rect`] around the origin shrunk by the padding.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};

use super::config::{ChildAnchor, ContainerConfig, CrossAlign, Direction, ScaleMode};
use crate::scene::NodeId;

/// A child as recorded when it was added.
///
/// The `original_*` fields are captured once and never rewritten; every scale
/// the layout writes is `original_scale * factor`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChildEntry {
    /// The child node.
    pub node: NodeId,
    /// Main-axis group.
    pub anchor: ChildAnchor,
    /// Natural size at insertion.
    pub original_size: kurbo::Size,
    /// Scale at insertion.
    pub original_scale: Vec2,
    /// Origin at insertion, used as the placement pivot.
    pub pivot: Point,
}

impl ChildEntry {
    /// `(main, cross)` extents at the original scale.
    #[must_use]
    pub fn extents(&self, direction: Direction) -> (f64, f64) {
        let w = self.original_size.width * self.original_scale.x;
        let h = self.original_size.height * self.original_scale.y;
        direction.split(kurbo::Size::new(w, h))
    }

    fn pivot_split(&self, direction: Direction) -> (f64, f64) {
        match direction {
            Direction::Horizontal => (self.pivot.x, self.pivot.y),
            Direction::Vertical => (self.pivot.y, self.pivot.x),
        }
    }
}

/// Space the children need at the original scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Required {
    /// Main-axis requirement.
    pub main: f64,
    /// Cross-axis requirement.
    pub cross: f64,
}

/// Content box of a container of the given size: centered on the origin and
/// shrunk by the padding.
#[must_use]
pub fn content_box(size: kurbo::Size, config: &ContainerConfig) -> Rect {
    let pad = config.padding;
    Rect::new(
        -size.width / 2.0 + pad.left,
        -size.height / 2.0 + pad.top,
        size.width / 2.0 - pad.right,
        size.height / 2.0 - pad.bottom,
    )
}

/// Sum of main-axis extents (plus `spacing` between children unless
/// flexible) and the largest cross-axis extent.
#[must_use]
pub fn required_space(
    children: &[ChildEntry],
    direction: Direction,
    spacing: f64,
    flexible: bool,
) -> Required {
    let mut main = 0.0;
    let mut cross: f64 = 0.0;
    for child in children {
        let (m, c) = child.extents(direction);
        main += m;
        cross = cross.max(c);
    }
    if !flexible && children.len() > 1 {
        main += spacing * (children.len() - 1) as f64;
    }
    Required { main, cross }
}

/// Uniform child scale factor for the given content box.
///
/// A non-positive requirement contributes `1.0`. [`ScaleMode::Off`] always
/// yields `1.0`; otherwise the result is bounded by the configured min and
/// max scale factors.
#[must_use]
pub fn scale_factor(required: Required, content: Rect, config: &ContainerConfig) -> f64 {
    let (avail_main, avail_cross) = config.direction.split(content.size());
    let ratio = |avail: f64, req: f64| if req > 0.0 { avail / req } else { 1.0 };
    let fit = ratio(avail_main, required.main).min(ratio(avail_cross, required.cross));
    let scale = match config.scale_mode {
        ScaleMode::Off => return 1.0,
        ScaleMode::Shrink => fit.min(1.0),
        ScaleMode::Fit => fit,
    };
    scale
        .max(config.min_scale_factor)
        .min(config.max_scale_factor)
}

/// Final position and scale of one child.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    /// The child node.
    pub node: NodeId,
    /// Container-local position.
    pub position: Point,
    /// Absolute scale (`original_scale * factor`).
    pub scale: Vec2,
}

/// Places the children inside `content`.
///
/// Children are grouped by anchor, keeping insertion order within each group.
/// The start group begins at the leading edge, the end group finishes at the
/// trailing edge and the center group is centered on the container midpoint,
/// shifted just far enough to clear the start and end groups when the
/// content box has room for all three.
/// With `flexible` set, the gap is the leftover main-axis space split evenly
/// over all children (never negative); otherwise it is `spacing * factor`.
#[must_use]
pub fn arrange(
    children: &[ChildEntry],
    content: Rect,
    direction: Direction,
    cross_align: CrossAlign,
    spacing: f64,
    flexible: bool,
    factor: f64,
) -> Vec<Placement> {
    let (main_start, main_end, cross_start, cross_end) = match direction {
        Direction::Horizontal => (content.x0, content.x1, content.y0, content.y1),
        Direction::Vertical => (content.y0, content.y1, content.x0, content.x1),
    };

    let gap = if flexible {
        if children.len() > 1 {
            let used: f64 = children.iter().map(|c| c.extents(direction).0 * factor).sum();
            (main_end - main_start - used).max(0.0) / (children.len() - 1) as f64
        } else {
            0.0
        }
    } else {
        spacing * factor
    };

    let group_span = |anchor: ChildAnchor| {
        let (sum, count) = children
            .iter()
            .filter(|c| c.anchor == anchor)
            .fold((0.0, 0_usize), |(sum, n), c| {
                (sum + c.extents(direction).0 * factor, n + 1)
            });
        (count > 0).then(|| sum + gap * (count - 1) as f64)
    };
    let start_span = group_span(ChildAnchor::Start);
    let end_span = group_span(ChildAnchor::End);

    let mut placements = Vec::with_capacity(children.len());
    for anchor in [ChildAnchor::Start, ChildAnchor::Center, ChildAnchor::End] {
        let Some(span) = group_span(anchor) else {
            continue;
        };
        let mut cursor = match anchor {
            ChildAnchor::Start => main_start,
            ChildAnchor::Center => {
                // Centered, but pushed clear of the edge groups while there is room.
                let lo = start_span.map_or(main_start, |s| main_start + s + gap);
                let hi = end_span.map_or(main_end, |s| main_end - s - gap) - span;
                let centered = -span / 2.0;
                if lo <= hi {
                    centered.max(lo).min(hi)
                } else {
                    centered
                }
            }
            ChildAnchor::End => main_end - span,
        };
        for child in children.iter().filter(|c| c.anchor == anchor) {
            let (m, c) = child.extents(direction);
            let (m, c) = (m * factor, c * factor);
            let (pm, pc) = child.pivot_split(direction);
            let main = cursor + m * pm;
            cursor += m + gap;
            let cross = match cross_align {
                CrossAlign::Start => cross_start + c * pc,
                CrossAlign::Center => (cross_start + cross_end) / 2.0 + c * (pc - 0.5),
                CrossAlign::End => cross_end - c * (1.0 - pc),
            };
            let position = match direction {
                Direction::Horizontal => Point::new(main, cross),
                Direction::Vertical => Point::new(cross, main),
            };
            placements.push(Placement {
                node: child.node,
                position,
                scale: child.original_scale * factor,
            });
        }
    }
    placements
}
