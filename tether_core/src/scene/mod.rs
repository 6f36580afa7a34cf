// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene data model.
//!
//! A *node* is the engine's record of one visual element. Each node has:
//!
//! - An identity ([`NodeId`]): a generational handle that becomes stale when
//!   the node is destroyed.
//! - Topology: parent, first-child, and sibling links. A node placed inside
//!   an adaptive container is a child of the container's node, so its
//!   position is local to the container's center.
//! - **Local properties** written by the layout engine or the caller:
//!   position, origin, natural size, scale, content scale and flags.
//! - **Capabilities** ([`NodeCaps`]) detected once at creation.
//! - **Computed properties** produced by [`evaluate`](Scene::evaluate): the
//!   world transform and effective hidden state.
//!
//! Nodes are stored in struct-of-arrays layout with index-based handles.
//! Host elements are connected through the [`Element`] trait: adopt them
//! into the scene, let the engine lay them out, and write the results back
//! through a [`Presenter`](crate::backend::Presenter).

mod element;
mod evaluate;
mod id;
mod store;
mod traverse;

pub use element::{Element, NodeCaps, NodeDesc, NodeFlags};
pub use evaluate::SceneChanges;
pub use id::{INVALID, NodeId};
pub use store::Scene;
pub use traverse::{Ancestors, Children};
