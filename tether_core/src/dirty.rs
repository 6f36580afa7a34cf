// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants for the scene.
//!
//! Tether uses multi-channel dirty tracking (via [`understory_dirty`]) so that
//! a resize pass which only nudges a handful of HUD elements produces a
//! correspondingly small set of [`SceneChanges`](crate::scene::SceneChanges).
//!
//! # Propagation semantics
//!
//! - **Propagating**: [`TRANSFORM`] uses
//!   [`EagerPolicy`](understory_dirty::EagerPolicy) and has dependency edges
//!   from child to parent. Moving or scaling a container marks every node
//!   placed inside it, because world transforms and effective hidden state are
//!   inherited. Position, scale, content scale and the hidden flag all route
//!   through this channel.
//!
//! - **Local-only**: [`ORIGIN`] and [`SIZE`] are marked with the default
//!   policy. An origin or natural-size change affects how the node itself is
//!   drawn, not where its children sit.
//!
//! - **Structural**: [`TOPOLOGY`] is marked on create/destroy and on
//!   attach/detach. It triggers a traversal-order rebuild during evaluation.
//!
//! Layout validity of an [`AdaptiveContainer`](crate::container::AdaptiveContainer)
//! is tracked separately by [`LayoutState`](crate::container::LayoutState); the
//! channels here only describe what a presenter has to push to the host.

use understory_dirty::Channel;

/// Position, scale, content scale or hidden flag changed.
pub const TRANSFORM: Channel = Channel::new(0);

/// Origin / pivot changed.
pub const ORIGIN: Channel = Channel::new(1);

/// Natural size changed (containers resized by screen-fit).
pub const SIZE: Channel = Channel::new(2);

/// Tree topology changed: triggers traversal order rebuild.
pub const TOPOLOGY: Channel = Channel::new(3);
