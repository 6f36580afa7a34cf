// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Container configuration types.

use kurbo::Size;

use crate::align::{Alignment, Margin};
use crate::viewport::Edges;

/// Layout direction. The main axis is width for [`Horizontal`](Self::Horizontal)
/// and height for [`Vertical`](Self::Vertical).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Children run left to right.
    #[default]
    Horizontal,
    /// Children run top to bottom.
    Vertical,
}

impl Direction {
    /// Splits a size into `(main, cross)` extents.
    #[must_use]
    pub const fn split(self, size: Size) -> (f64, f64) {
        match self {
            Self::Horizontal => (size.width, size.height),
            Self::Vertical => (size.height, size.width),
        }
    }

    /// Inverse of [`split`](Self::split).
    #[must_use]
    pub const fn join(self, main: f64, cross: f64) -> Size {
        match self {
            Self::Horizontal => Size::new(main, cross),
            Self::Vertical => Size::new(cross, main),
        }
    }
}

/// Main-axis group a child belongs to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ChildAnchor {
    /// Packed against the content box's leading edge.
    #[default]
    Start,
    /// Centered on the container's midpoint.
    Center,
    /// Packed against the content box's trailing edge.
    End,
}

impl ChildAnchor {
    /// Parses `start`, `center` or `end`, falling back to
    /// [`Start`](Self::Start) with a warning.
    #[must_use]
    pub fn from_name_or_start(name: &str) -> Self {
        match name {
            "start" => Self::Start,
            "center" => Self::Center,
            "end" => Self::End,
            _ => {
                log::warn!("unknown child anchor `{name}`; falling back to `start`");
                Self::Start
            }
        }
    }
}

/// Cross-axis placement of every child within the content box.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CrossAlign {
    /// Leading cross edge.
    Start,
    /// Cross-axis center.
    #[default]
    Center,
    /// Trailing cross edge.
    End,
}

/// How the uniform child scale factor is derived from the available space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ScaleMode {
    /// Scale down to fit, never up.
    #[default]
    Shrink,
    /// Scale up or down to fit.
    Fit,
    /// Always `1.0`; children may overflow.
    Off,
}

/// Axes evaluated by screen-fit.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum FitAxis {
    /// Width only.
    Width,
    /// Height only.
    Height,
    /// Both; the smaller scale wins.
    #[default]
    Both,
}

impl FitAxis {
    /// Whether the width axis is evaluated.
    #[must_use]
    pub const fn width(self) -> bool {
        matches!(self, Self::Width | Self::Both)
    }

    /// Whether the height axis is evaluated.
    #[must_use]
    pub const fn height(self) -> bool {
        matches!(self, Self::Height | Self::Both)
    }
}

/// Screen-fit settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FitScreen {
    /// Axes to evaluate.
    pub axis: FitAxis,
    /// Space kept clear on each side of the container, in pixels.
    pub margin: f64,
    /// Smallest spacing between children before scaling kicks in.
    pub min_spacing: f64,
    /// Floor for the uniform container scale.
    pub min_container_scale: f64,
}

impl Default for FitScreen {
    fn default() -> Self {
        Self {
            axis: FitAxis::Both,
            margin: 0.0,
            min_spacing: 0.0,
            min_container_scale: 0.5,
        }
    }
}

impl FitScreen {
    /// Sets [`axis`](Self::axis).
    #[must_use]
    pub const fn with_axis(mut self, axis: FitAxis) -> Self {
        self.axis = axis;
        self
    }

    /// Sets [`margin`](Self::margin).
    #[must_use]
    pub const fn with_margin(mut self, margin: f64) -> Self {
        self.margin = margin;
        self
    }

    /// Sets [`min_spacing`](Self::min_spacing).
    #[must_use]
    pub const fn with_min_spacing(mut self, min_spacing: f64) -> Self {
        self.min_spacing = min_spacing;
        self
    }

    /// Sets [`min_container_scale`](Self::min_container_scale).
    #[must_use]
    pub const fn with_min_container_scale(mut self, scale: f64) -> Self {
        self.min_container_scale = scale;
        self
    }
}

/// Full configuration of an adaptive container.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ContainerConfig {
    /// Declared size.
    pub size: Size,
    /// Layout direction.
    pub direction: Direction,
    /// Gap between consecutive children.
    pub spacing: f64,
    /// Distribute leftover main-axis space evenly instead of using `spacing`.
    pub flexible_spacing: bool,
    /// Cross-axis placement.
    pub cross_align: CrossAlign,
    /// Anchor for children added without one.
    pub default_anchor: ChildAnchor,
    /// Child scale mode.
    pub scale_mode: ScaleMode,
    /// Lower bound for the child scale factor.
    pub min_scale_factor: f64,
    /// Upper bound for the child scale factor.
    pub max_scale_factor: f64,
    /// Inner padding.
    pub padding: Edges,
    /// Screen-fit settings, if enabled.
    pub fit_screen: Option<FitScreen>,
    /// Screen alignment used to position the container itself.
    pub alignment: Option<Alignment>,
    /// Margin for [`alignment`](Self::alignment).
    pub margin: Margin,
    /// Whether the container registers itself for repositioning. Turn this
    /// off for containers nested in another container.
    pub auto_position: bool,
}

impl ContainerConfig {
    /// A horizontal container of the given declared size with default
    /// settings.
    #[must_use]
    pub const fn new(width: f64, height: f64) -> Self {
        Self {
            size: Size::new(width, height),
            direction: Direction::Horizontal,
            spacing: 10.0,
            flexible_spacing: false,
            cross_align: CrossAlign::Center,
            default_anchor: ChildAnchor::Start,
            scale_mode: ScaleMode::Shrink,
            min_scale_factor: 0.1,
            max_scale_factor: 2.0,
            padding: Edges::ZERO,
            fit_screen: None,
            alignment: None,
            margin: Margin::ZERO,
            auto_position: true,
        }
    }

    /// Sets [`direction`](Self::direction).
    #[must_use]
    pub const fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Sets [`spacing`](Self::spacing).
    #[must_use]
    pub const fn with_spacing(mut self, spacing: f64) -> Self {
        self.spacing = spacing;
        self
    }

    /// Sets [`flexible_spacing`](Self::flexible_spacing).
    #[must_use]
    pub const fn with_flexible_spacing(mut self, flexible: bool) -> Self {
        self.flexible_spacing = flexible;
        self
    }

    /// Sets [`cross_align`](Self::cross_align).
    #[must_use]
    pub const fn with_cross_align(mut self, align: CrossAlign) -> Self {
        self.cross_align = align;
        self
    }

    /// Sets [`default_anchor`](Self::default_anchor).
    #[must_use]
    pub const fn with_default_anchor(mut self, anchor: ChildAnchor) -> Self {
        self.default_anchor = anchor;
        self
    }

    /// Sets [`scale_mode`](Self::scale_mode).
    #[must_use]
    pub const fn with_scale_mode(mut self, mode: ScaleMode) -> Self {
        self.scale_mode = mode;
        self
    }

    /// Sets the child scale factor bounds.
    #[must_use]
    pub const fn with_scale_bounds(mut self, min: f64, max: f64) -> Self {
        self.min_scale_factor = min;
        self.max_scale_factor = max;
        self
    }

    /// Sets [`padding`](Self::padding).
    #[must_use]
    pub const fn with_padding(mut self, padding: Edges) -> Self {
        self.padding = padding;
        self
    }

    /// Enables screen-fit.
    #[must_use]
    pub const fn with_fit_screen(mut self, fit: FitScreen) -> Self {
        self.fit_screen = Some(fit);
        self
    }

    /// Positions the container on screen.
    #[must_use]
    pub fn with_alignment(mut self, alignment: Alignment, margin: impl Into<Margin>) -> Self {
        self.alignment = Some(alignment);
        self.margin = margin.into();
        self
    }

    /// Sets [`auto_position`](Self::auto_position).
    #[must_use]
    pub const fn with_auto_position(mut self, auto_position: bool) -> Self {
        self.auto_position = auto_position;
        self
    }

    /// Padding along the main axis (leading + trailing).
    #[must_use]
    pub const fn main_padding(&self) -> f64 {
        match self.direction {
            Direction::Horizontal => self.padding.horizontal(),
            Direction::Vertical => self.padding.vertical(),
        }
    }
}
