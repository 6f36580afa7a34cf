// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Named screen anchors and the position resolver.
//!
//! An [`Alignment`] names one of nine points on the unit square. Resolving it
//! against a [`Viewport`] yields a concrete pixel position plus the origin the
//! element should use so that it hangs inward from that point:
//!
//! ```text
//!   (0,0) top-left ─── top-center ─── top-right (1,0)
//!        │                                   │
//!   center-left        center          center-right
//!        │                                   │
//!   (0,1) bottom-left ─ bottom-center ─ bottom-right (1,1)
//! ```
//!
//! Margins push inward from edge anchors (and add the safe-area inset of that
//! edge); on a centered axis the margin is a plain offset.

use alloc::string::String;
use core::fmt;
use core::str::FromStr;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;
use kurbo::Point;

use crate::viewport::Viewport;

/// One of the nine named screen positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// `top-left`
    TopLeft,
    /// `top-center`
    TopCenter,
    /// `top-right`
    TopRight,
    /// `center-left`
    CenterLeft,
    /// `center`
    #[default]
    Center,
    /// `center-right`
    CenterRight,
    /// `bottom-left`
    BottomLeft,
    /// `bottom-center`
    BottomCenter,
    /// `bottom-right`
    BottomRight,
}

impl Alignment {
    /// Every alignment, row by row.
    pub const ALL: [Self; 9] = [
        Self::TopLeft,
        Self::TopCenter,
        Self::TopRight,
        Self::CenterLeft,
        Self::Center,
        Self::CenterRight,
        Self::BottomLeft,
        Self::BottomCenter,
        Self::BottomRight,
    ];

    /// Normalized `(ax, ay)` coordinates, each in `{0, 0.5, 1}`.
    #[must_use]
    pub const fn anchor(self) -> (f64, f64) {
        match self {
            Self::TopLeft => (0.0, 0.0),
            Self::TopCenter => (0.5, 0.0),
            Self::TopRight => (1.0, 0.0),
            Self::CenterLeft => (0.0, 0.5),
            Self::Center => (0.5, 0.5),
            Self::CenterRight => (1.0, 0.5),
            Self::BottomLeft => (0.0, 1.0),
            Self::BottomCenter => (0.5, 1.0),
            Self::BottomRight => (1.0, 1.0),
        }
    }

    /// The origin an element should use; always equal to [`anchor`](Self::anchor).
    #[must_use]
    pub const fn origin(self) -> Point {
        let (x, y) = self.anchor();
        Point::new(x, y)
    }

    /// The canonical kebab-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopCenter => "top-center",
            Self::TopRight => "top-right",
            Self::CenterLeft => "center-left",
            Self::Center => "center",
            Self::CenterRight => "center-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomCenter => "bottom-center",
            Self::BottomRight => "bottom-right",
        }
    }

    /// Parses `name`, falling back to [`Center`](Self::Center) with a warning.
    #[must_use]
    pub fn from_name_or_center(name: &str) -> Self {
        name.parse().unwrap_or_else(|err: UnknownAlignment| {
            log::warn!("{err}; falling back to `center`");
            Self::Center
        })
    }
}

impl fmt::Display for Alignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Alignment {
    type Err = UnknownAlignment;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "top-left" => Self::TopLeft,
            "top-center" => Self::TopCenter,
            "top-right" => Self::TopRight,
            "center-left" => Self::CenterLeft,
            "center" | "center-center" => Self::Center,
            "center-right" => Self::CenterRight,
            "bottom-left" => Self::BottomLeft,
            "bottom-center" => Self::BottomCenter,
            "bottom-right" => Self::BottomRight,
            _ => {
                return Err(UnknownAlignment {
                    name: String::from(s),
                });
            }
        })
    }
}

/// Error returned when parsing an alignment name that is not one of the nine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownAlignment {
    name: String,
}

impl UnknownAlignment {
    /// The name that failed to parse.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for UnknownAlignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown alignment `{}`", self.name)
    }
}

impl core::error::Error for UnknownAlignment {}

/// Inward offset from an anchor, in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Margin {
    /// Horizontal component.
    pub x: f64,
    /// Vertical component.
    pub y: f64,
}

impl Margin {
    /// No margin.
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a margin from both components.
    #[inline]
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Creates a margin with the same value on both axes.
    #[inline]
    #[must_use]
    pub const fn uniform(v: f64) -> Self {
        Self { x: v, y: v }
    }
}

impl From<f64> for Margin {
    fn from(v: f64) -> Self {
        Self::uniform(v)
    }
}

impl From<(f64, f64)> for Margin {
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

/// Output of [`resolve_position`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedPosition {
    /// Pixel position, snapped to the integer grid.
    pub position: Point,
    /// Origin the element should adopt.
    pub origin: Point,
}

/// Resolves an alignment plus margin against the viewport.
///
/// Per axis, with `a` the alignment's normalized coordinate:
///
/// - `a == 0`: `extent * 0 + margin + near inset`
/// - `a == 1`: `extent * 1 - margin - far inset`
/// - `a == 0.5`: `extent / 2 + margin` (safe area ignored)
///
/// Both coordinates are rounded to the nearest pixel.
#[must_use]
pub fn resolve_position(
    alignment: Alignment,
    margin: impl Into<Margin>,
    viewport: &Viewport,
) -> ResolvedPosition {
    let margin = margin.into();
    let (ax, ay) = alignment.anchor();
    let safe = viewport.safe_area();
    let x = resolve_axis(viewport.width(), ax, margin.x, safe.left, safe.right);
    let y = resolve_axis(viewport.height(), ay, margin.y, safe.top, safe.bottom);
    ResolvedPosition {
        position: Point::new(x.round(), y.round()),
        origin: alignment.origin(),
    }
}

/// Resolves one axis. `near` / `far` are the safe-area insets at 0 and 1.
fn resolve_axis(extent: f64, anchor: f64, margin: f64, near: f64, far: f64) -> f64 {
    let base = extent * anchor;
    if anchor == 0.0 {
        base + margin + near
    } else if anchor == 1.0 {
        base - (margin + far)
    } else {
        base + margin
    }
}
