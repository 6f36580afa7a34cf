// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] implements [`TraceSink`] and writes one line per event
//! to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use tether_core::container::{AxisFit, FitPhase};
use tether_core::trace::{
    LayoutPassEvent, RepositionEvent, ScreenFitEvent, SkipEvent, SkipReason, TraceSink,
    ViewportEvent,
};

/// Writes human-readable trace lines to a [`Write`](std::io::Write) destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn phase_name(phase: FitPhase) -> &'static str {
    match phase {
        FitPhase::Declared => "declared",
        FitPhase::Shrink => "shrink",
        FitPhase::Scale => "scale",
    }
}

fn axis(fit: Option<AxisFit>) -> String {
    match fit {
        Some(a) => format!(
            "{}(avail={:.0} min={:.0} size={:.0} x{:.3})",
            phase_name(a.phase),
            a.available,
            a.min_size,
            a.size,
            a.scale,
        ),
        None => "-".to_owned(),
    }
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_viewport_change(&mut self, e: &ViewportEvent) {
        let _ = writeln!(
            self.writer,
            "[viewport] {}x{} {:?} safe=({},{},{},{}) scale={:.3}",
            e.width,
            e.height,
            e.orientation,
            e.safe_area.top,
            e.safe_area.right,
            e.safe_area.bottom,
            e.safe_area.left,
            e.screen_scale,
        );
    }

    fn on_skip(&mut self, e: &SkipEvent) {
        let reason = match e.reason {
            SkipReason::Stale => "stale",
            SkipReason::Inactive => "inactive",
        };
        let _ = writeln!(self.writer, "[skip] {:?} {reason}", e.node);
    }

    fn on_reposition(&mut self, e: &RepositionEvent) {
        let _ = writeln!(
            self.writer,
            "[reposition] {:?} {} -> ({}, {}){}{}",
            e.node,
            e.alignment,
            e.position.x,
            e.position.y,
            e.origin
                .map(|o| format!(" origin=({}, {})", o.x, o.y))
                .unwrap_or_default(),
            e.scale
                .map(|s| format!(" scale={s:.3}"))
                .unwrap_or_default(),
        );
    }

    fn on_layout_pass(&mut self, e: &LayoutPassEvent) {
        let _ = writeln!(
            self.writer,
            "[layout] {:?} children={} scale={:.3} spacing={:.1} content={:.0}x{:.0}",
            e.container,
            e.children,
            e.scale_factor,
            e.spacing,
            e.content.width(),
            e.content.height(),
        );
    }

    fn on_screen_fit(&mut self, e: &ScreenFitEvent) {
        let _ = writeln!(
            self.writer,
            "[fit] {:?} size={:.0}x{:.0} scale={:.3} width={} height={}",
            e.container,
            e.size.width,
            e.size.height,
            e.scale,
            axis(e.width),
            axis(e.height),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tether_core::viewport::{Edges, Orientation};

    #[test]
    fn pretty_print_viewport() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_viewport_change(&ViewportEvent {
            width: 800.0,
            height: 600.0,
            orientation: Orientation::Landscape,
            safe_area: Edges::ZERO,
            screen_scale: 0.78125,
        });
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.contains("[viewport]"), "got: {output}");
        assert!(output.contains("800x600"), "got: {output}");
        assert!(output.contains("Landscape"), "got: {output}");
    }

    #[test]
    fn pretty_print_unevaluated_axis() {
        assert_eq!(axis(None), "-");
        let a = tether_core::container::fit_axis(300.0, 600.0, 330.0);
        assert!(axis(Some(a)).starts_with("scale("), "got: {}", axis(Some(a)));
    }
}
