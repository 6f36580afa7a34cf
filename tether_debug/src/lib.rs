// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing, event recording and JSON layout snapshots for tether
//! diagnostics.
//!
//! This crate provides [`TraceSink`](tether_core::trace::TraceSink)
//! implementations and dump helpers for development:
//!
//! - [`pretty::PrettyPrintSink`]: human-readable one-line-per-event output.
//! - [`recorder::RecorderSink`]: in-memory event log for assertions and
//!   later export.
//! - [`snapshot`]: JSON dumps of the engine's current layout and of recorded
//!   events.

pub mod pretty;
pub mod recorder;
pub mod snapshot;
