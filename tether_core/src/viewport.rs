// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport state: render-surface size, safe-area insets and orientation.
//!
//! The viewport is passive data. The host surface reports size changes and
//! safe-area insets; everything else in the crate reads from it. Orientation
//! is never stored independently of the size, so it can not drift out of
//! sync with it.

use kurbo::Size;

/// Per-edge distances, used both for safe-area insets and container padding.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Edges {
    /// Top edge.
    pub top: f64,
    /// Right edge.
    pub right: f64,
    /// Bottom edge.
    pub bottom: f64,
    /// Left edge.
    pub left: f64,
}

impl Edges {
    /// All edges zero.
    pub const ZERO: Self = Self::uniform(0.0);

    /// Creates edges with the same value on every side.
    #[inline]
    #[must_use]
    pub const fn uniform(value: f64) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// Creates edges from individual values, CSS order.
    #[inline]
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Sum of the left and right edges.
    #[inline]
    #[must_use]
    pub const fn horizontal(&self) -> f64 {
        self.left + self.right
    }

    /// Sum of the top and bottom edges.
    #[inline]
    #[must_use]
    pub const fn vertical(&self) -> f64 {
        self.top + self.bottom
    }
}

/// Screen orientation, derived from the viewport size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    /// Height is greater than or equal to width.
    #[default]
    Portrait,
    /// Width is strictly greater than height.
    Landscape,
}

impl Orientation {
    /// Derives the orientation for a `width × height` surface.
    #[inline]
    #[must_use]
    pub fn from_size(width: f64, height: f64) -> Self {
        if width > height {
            Self::Landscape
        } else {
            Self::Portrait
        }
    }
}

/// Current render-surface dimensions and safe-area insets.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    width: f64,
    height: f64,
    safe_area: Edges,
    orientation: Orientation,
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(1024.0, 768.0)
    }
}

impl Viewport {
    /// Creates a viewport with no safe-area insets.
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        let width = sanitize_extent(width);
        let height = sanitize_extent(height);
        Self {
            width,
            height,
            safe_area: Edges::ZERO,
            orientation: Orientation::from_size(width, height),
        }
    }

    /// Returns this viewport with the given safe-area insets.
    #[must_use]
    pub fn with_safe_area(mut self, safe_area: Edges) -> Self {
        self.set_safe_area(safe_area);
        self
    }

    /// Surface width in pixels.
    #[inline]
    #[must_use]
    pub const fn width(&self) -> f64 {
        self.width
    }

    /// Surface height in pixels.
    #[inline]
    #[must_use]
    pub const fn height(&self) -> f64 {
        self.height
    }

    /// Surface size in pixels.
    #[inline]
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Safe-area insets.
    #[inline]
    #[must_use]
    pub const fn safe_area(&self) -> Edges {
        self.safe_area
    }

    /// Orientation derived from the current size.
    #[inline]
    #[must_use]
    pub const fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Updates the surface size and recomputes orientation.
    ///
    /// Negative or non-finite extents are treated as zero.
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = sanitize_extent(width);
        self.height = sanitize_extent(height);
        self.orientation = Orientation::from_size(self.width, self.height);
    }

    /// Replaces the safe-area insets.
    ///
    /// Negative or non-finite insets are treated as zero.
    pub fn set_safe_area(&mut self, safe_area: Edges) {
        self.safe_area = Edges {
            top: sanitize_extent(safe_area.top),
            right: sanitize_extent(safe_area.right),
            bottom: sanitize_extent(safe_area.bottom),
            left: sanitize_extent(safe_area.left),
        };
    }

    /// Global scale factor relative to a design resolution:
    /// `min(width / base.width, height / base.height)`.
    ///
    /// Returns `1.0` when the base size is degenerate.
    #[must_use]
    pub fn screen_scale(&self, base: Size) -> f64 {
        if base.width <= 0.0 || base.height <= 0.0 {
            return 1.0;
        }
        (self.width / base.width).min(self.height / base.height)
    }
}

fn sanitize_extent(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        if value != 0.0 {
            log::warn!("viewport extent {value} is not a finite non-negative number; using 0");
        }
        0.0
    }
}
