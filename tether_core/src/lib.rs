// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Responsive layout for retained 2D scenes.
//!
//! `tether_core` positions visual elements against a live viewport and lays
//! out groups of elements inside adaptive containers. It is `no_std`
//! compatible (with `alloc`) and keeps element state in a struct-of-arrays
//! [`Scene`](scene::Scene) addressed by generational handles.
//!
//! # Architecture
//!
//! Every viewport change flows through the engine's subscribers in
//! subscription order, then out to the host through a presenter:
//!
//! ```text
//!   Host resize / safe-area change
//!       │
//!       ▼
//!   LayoutEngine::resize() ──► Viewport (size, insets, orientation)
//!       │
//!       ├──► Registry::update_all()          (tracked elements)
//!       │        resolve_position() per entry
//!       │
//!       └──► AdaptiveContainer::update()     (screen-fitted containers)
//!                screen-fit ──► required space ──► scale ──► placement
//!                                                    │
//!                 ┌──────────────────────────────────┘
//!                 ▼
//!   Scene::evaluate() ──► SceneChanges ──► Presenter::apply()
//! ```
//!
//! **[`viewport`]**: Surface size, safe-area insets and derived orientation.
//!
//! **[`align`]**: The nine screen alignments and
//! [`resolve_position`](align::resolve_position), a pure function from
//! alignment, margin and viewport to a pixel-snapped position and origin.
//!
//! **[`registry`]**: Tracked elements replayed on every viewport change,
//! with per-orientation overrides.
//!
//! **[`container`]**: Adaptive containers: anchor-grouped child layout with a
//! uniform child scale, and two-phase screen-fit (shrink bounds, then scale).
//!
//! **[`scene`]**: Struct-of-arrays node store. Layout writes local
//! properties; evaluation computes world transforms and reports changes.
//!
//! **[`dirty`]**: Dirty channels via `understory_dirty`.
//!
//! **[`engine`]**: [`LayoutEngine`](engine::LayoutEngine), the service that
//! owns the scene, viewport, registry and containers and dispatches resizes.
//!
//! **[`backend`]**: The [`Presenter`](backend::Presenter) trait and a
//! ready-made [`MirrorPresenter`](backend::MirrorPresenter).
//!
//! **[`subscription`]**: Ordered observer list used for resize dispatch.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! layout instrumentation, with zero-overhead [`Tracer`](trace::Tracer)
//! wrapper.
//!
//! # Errors and logging
//!
//! Nothing in the resize path fails. Unknown names fall back to defaults,
//! degenerate sizes short-circuit to identity results, and stale handles held
//! by the registry or a container are skipped. Fallbacks are reported through
//! the [`log`] facade; pick a logger in the host.
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies (one branch
//!   per call site).
//! - `trace-rich` (disabled by default, implies `trace`): Gates per-element
//!   reposition events.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod align;
pub mod backend;
pub mod container;
pub mod dirty;
pub mod engine;
pub mod registry;
pub mod scene;
pub mod subscription;
pub mod trace;
pub mod viewport;
