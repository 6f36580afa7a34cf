// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adaptive containers.
//!
//! An [`AdaptiveContainer`] owns a scene node and a list of children attached
//! to it. Each pass:
//!
//! 1. **Screen-fit** (optional): derive the effective size and a uniform
//!    container scale from the viewport ([`compute_screen_fit`]).
//! 2. **Required space**: sum the children's main-axis extents at their
//!    original scale ([`required_space`]).
//! 3. **Scale factor**: fit the requirement into the content box according
//!    to the [`ScaleMode`] ([`scale_factor`]).
//! 4. **Placement**: pack the start, center and end groups and align each
//!    child on the cross axis ([`arrange`]).
//!
//! Children are positioned in container-local space, which is centered on
//! the container's node. The container scale goes on the node as its content
//! scale, so bounds and children scale together.

mod adaptive;
mod config;
mod fit;
mod layout;

pub use adaptive::{AdaptiveContainer, LayoutState};
pub use config::{
    ChildAnchor, ContainerConfig, CrossAlign, Direction, FitAxis, FitScreen, ScaleMode,
};
pub use fit::{
    AxisFit, FitPhase, ScreenFit, available_extent, compute_screen_fit, fit_axis,
    tightened_spacing,
};
pub use layout::{
    ChildEntry, Placement, Required, arrange, content_box, required_space, scale_factor,
};
