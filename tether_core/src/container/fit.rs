// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Two-phase screen-fit.
//!
//! When the viewport leaves a container less room than its declared size,
//! the container first gives up bounds (phase 1, which tightens spacing
//! through the ordinary layout pass) and only once it reaches its minimum
//! size does it scale down uniformly (phase 2).
//!
//! Available space is always measured against the viewport, including for a
//! container nested inside another one. A nested container therefore does
//! not see its parent's content box; this matches existing layouts and may
//! change.

use kurbo::Size;

use super::config::{ContainerConfig, Direction, FitScreen};
use super::layout::ChildEntry;
use crate::align::resolve_position;
use crate::viewport::Viewport;

/// Which branch a screen-fit axis took.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FitPhase {
    /// Enough room: the declared size is kept.
    Declared,
    /// Bounds shrunk to the available space, no scaling.
    Shrink,
    /// Bounds at the minimum size and scaled down.
    Scale,
}

/// Screen-fit decision for one axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisFit {
    /// Space the viewport leaves on this axis.
    pub available: f64,
    /// Declared extent.
    pub declared: f64,
    /// Smallest extent reachable by shrinking alone.
    pub min_size: f64,
    /// Effective extent.
    pub size: f64,
    /// Scale this axis asks for.
    pub scale: f64,
    /// Branch taken.
    pub phase: FitPhase,
}

/// Decides one axis.
///
/// `min_size` is capped at `declared`. A non-positive minimum never asks for
/// scaling.
#[must_use]
pub fn fit_axis(available: f64, declared: f64, min_size: f64) -> AxisFit {
    let available = available.max(0.0);
    let min_size = min_size.min(declared);
    let (size, scale, phase) = if available >= declared {
        (declared, 1.0, FitPhase::Declared)
    } else if available >= min_size {
        (available, 1.0, FitPhase::Shrink)
    } else {
        // `available >= 0` here, so `min_size > 0`.
        (min_size, available / min_size, FitPhase::Scale)
    };
    AxisFit {
        available,
        declared,
        min_size,
        size,
        scale,
        phase,
    }
}

/// Room the viewport leaves along one axis.
///
/// With an anchor point `p` the room is symmetric around it,
/// `2 * min(p, extent - p)`; without one it is the whole extent. Twice the
/// fit margin is taken off either way.
#[must_use]
pub fn available_extent(extent: f64, anchor_point: Option<f64>, margin: f64) -> f64 {
    let room = match anchor_point {
        Some(p) => 2.0 * p.min(extent - p),
        None => extent,
    };
    (room - 2.0 * margin).max(0.0)
}

/// Result of a screen-fit pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScreenFit {
    /// Effective (pre-scale) container size.
    pub size: Size,
    /// Uniform container scale.
    pub scale: f64,
    /// Width decision, if evaluated.
    pub width: Option<AxisFit>,
    /// Height decision, if evaluated.
    pub height: Option<AxisFit>,
}

/// Minimum extent of a container along one axis.
///
/// On the main axis this is the children's original extents plus
/// `min_spacing` between them plus padding; on the cross axis it is the
/// declared extent.
fn min_extent(
    config: &ContainerConfig,
    fit: &FitScreen,
    children: &[ChildEntry],
    axis: Direction,
) -> f64 {
    let declared = match axis {
        Direction::Horizontal => config.size.width,
        Direction::Vertical => config.size.height,
    };
    if axis != config.direction {
        return declared;
    }
    let extents: f64 = children.iter().map(|c| c.extents(config.direction).0).sum();
    let gaps = children.len().saturating_sub(1) as f64;
    extents + fit.min_spacing * gaps + config.main_padding()
}

/// Runs screen-fit for a container against the viewport.
///
/// Returns `None` when screen-fit is disabled.
#[must_use]
pub fn compute_screen_fit(
    config: &ContainerConfig,
    children: &[ChildEntry],
    viewport: &Viewport,
) -> Option<ScreenFit> {
    let fit = config.fit_screen?;
    let anchor = config
        .alignment
        .map(|a| resolve_position(a, config.margin, viewport).position);

    let width = fit.axis.width().then(|| {
        fit_axis(
            available_extent(viewport.width(), anchor.map(|p| p.x), fit.margin),
            config.size.width,
            min_extent(config, &fit, children, Direction::Horizontal),
        )
    });
    let height = fit.axis.height().then(|| {
        fit_axis(
            available_extent(viewport.height(), anchor.map(|p| p.y), fit.margin),
            config.size.height,
            min_extent(config, &fit, children, Direction::Vertical),
        )
    });

    let scale = [width, height]
        .into_iter()
        .flatten()
        .map(|a| a.scale)
        .fold(1.0_f64, f64::min)
        .max(fit.min_container_scale)
        .max(0.0);
    let size = Size::new(
        width.map_or(config.size.width, |a| a.size),
        height.map_or(config.size.height, |a| a.size),
    );
    Some(ScreenFit {
        size,
        scale,
        width,
        height,
    })
}

/// Spacing to use while the container is screen-fitted: the gap that makes
/// the children exactly fill `content_main`, kept between `min_spacing` and
/// the configured spacing.
#[must_use]
pub fn tightened_spacing(
    config: &ContainerConfig,
    fit: &FitScreen,
    children: &[ChildEntry],
    content_main: f64,
) -> f64 {
    if config.flexible_spacing || children.len() < 2 {
        return config.spacing;
    }
    let extents: f64 = children.iter().map(|c| c.extents(config.direction).0).sum();
    let gap = (content_main - extents) / (children.len() - 1) as f64;
    gap.min(config.spacing).max(fit.min_spacing.min(config.spacing))
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Vec2};

    use super::*;
    use crate::align::Alignment;
    use crate::container::ChildAnchor;
    use crate::scene::NodeId;

    fn entries(widths: &[f64]) -> alloc::vec::Vec<ChildEntry> {
        widths
            .iter()
            .enumerate()
            .map(|(i, &w)| ChildEntry {
                node: NodeId {
                    idx: i as u32,
                    generation: 0,
                },
                anchor: ChildAnchor::Start,
                original_size: Size::new(w, 40.0),
                original_scale: Vec2::new(1.0, 1.0),
                pivot: Point::new(0.5, 0.5),
            })
            .collect()
    }

    fn fitted(min_spacing: f64) -> ContainerConfig {
        ContainerConfig::new(600.0, 100.0)
            .with_spacing(30.0)
            .with_fit_screen(
                FitScreen::default()
                    .with_axis(crate::container::FitAxis::Width)
                    .with_min_spacing(min_spacing)
                    .with_min_container_scale(0.25),
            )
    }

    #[test]
    fn phases_follow_available_space() {
        let declared = fit_axis(700.0, 600.0, 330.0);
        assert_eq!((declared.size, declared.scale), (600.0, 1.0));
        assert_eq!(declared.phase, FitPhase::Declared);

        let shrink = fit_axis(400.0, 600.0, 330.0);
        assert_eq!((shrink.size, shrink.scale), (400.0, 1.0));
        assert_eq!(shrink.phase, FitPhase::Shrink);

        let scale = fit_axis(300.0, 600.0, 330.0);
        assert_eq!(scale.size, 330.0);
        assert!((scale.scale - 300.0 / 330.0).abs() < 1e-12);
        assert_eq!(scale.phase, FitPhase::Scale);
    }

    #[test]
    fn min_size_is_capped_by_declared() {
        let a = fit_axis(500.0, 600.0, 900.0);
        assert_eq!(a.min_size, 600.0);
        assert_eq!(a.phase, FitPhase::Scale);
        assert_eq!(a.size, 600.0);
    }

    #[test]
    fn degenerate_minimum_never_scales() {
        let a = fit_axis(-20.0, 100.0, 0.0);
        assert_eq!(a.available, 0.0);
        assert_eq!(a.scale, 1.0);
        assert_eq!(a.phase, FitPhase::Shrink);
    }

    #[test]
    fn anchored_room_is_symmetric() {
        assert_eq!(available_extent(1000.0, Some(500.0), 0.0), 1000.0);
        assert_eq!(available_extent(1000.0, Some(100.0), 0.0), 200.0);
        assert_eq!(available_extent(1000.0, Some(900.0), 10.0), 180.0);
        assert_eq!(available_extent(1000.0, None, 25.0), 950.0);
        assert_eq!(available_extent(10.0, None, 25.0), 0.0);
    }

    #[test]
    fn two_phase_ordering() {
        // 100 + 120 + 100 + 2 * 5 = 330.
        let children = entries(&[100.0, 120.0, 100.0]);
        let config = fitted(5.0);
        let run = |w: f64| {
            compute_screen_fit(&config, &children, &Viewport::new(w, 768.0)).unwrap()
        };

        assert_eq!(run(800.0).size.width, 600.0);
        assert_eq!(run(800.0).scale, 1.0);

        let shrunk = run(400.0);
        assert_eq!(shrunk.size.width, 400.0);
        assert_eq!(shrunk.scale, 1.0);

        assert_eq!(run(330.0).scale, 1.0);

        let scaled = run(300.0);
        assert_eq!(scaled.size.width, 330.0);
        assert!((scaled.scale - 300.0 / 330.0).abs() < 1e-12);

        assert_eq!(run(10.0).scale, 0.25);
        assert!(shrunk.height.is_none());
    }

    #[test]
    fn cross_axis_minimum_is_declared() {
        let children = entries(&[100.0]);
        let config = fitted(0.0).with_fit_screen(FitScreen::default());
        let fit = compute_screen_fit(&config, &children, &Viewport::new(1024.0, 80.0)).unwrap();
        let height = fit.height.unwrap();
        assert_eq!(height.min_size, 100.0);
        assert_eq!(height.phase, FitPhase::Scale);
        assert!((fit.scale - 0.8).abs() < 1e-12);
        assert_eq!(fit.size, Size::new(600.0, 100.0));
    }

    #[test]
    fn aligned_container_uses_anchor_room() {
        let children = entries(&[100.0]);
        let config = fitted(0.0).with_alignment(Alignment::CenterLeft, (200.0, 0.0));
        // Anchor at x = 200 leaves 400 of symmetric room.
        let fit = compute_screen_fit(&config, &children, &Viewport::new(1024.0, 768.0)).unwrap();
        assert_eq!(fit.width.unwrap().available, 400.0);
        assert_eq!(fit.size.width, 400.0);
    }

    #[test]
    fn disabled_fit_returns_none() {
        let config = ContainerConfig::new(100.0, 100.0);
        assert!(compute_screen_fit(&config, &[], &Viewport::default()).is_none());
    }

    #[test]
    fn spacing_tightens_between_bounds() {
        let children = entries(&[100.0, 120.0, 100.0]);
        let config = fitted(5.0);
        let fit = config.fit_screen.unwrap();
        assert_eq!(tightened_spacing(&config, &fit, &children, 600.0), 30.0);
        assert_eq!(tightened_spacing(&config, &fit, &children, 360.0), 20.0);
        assert_eq!(tightened_spacing(&config, &fit, &children, 300.0), 5.0);

        let flexible = config.with_flexible_spacing(true);
        assert_eq!(tightened_spacing(&flexible, &fit, &children, 300.0), 30.0);
    }
}
