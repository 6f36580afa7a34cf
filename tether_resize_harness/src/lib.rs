// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resize sweeps and scale-stability grading for layout harnesses.

#![no_std]

extern crate alloc;

use alloc::string::String;
use kurbo::Size;

/// Changes below this are treated as no change.
const EPSILON: f64 = 1e-9;

/// Deterministic drag-resize from one viewport size to another.
///
/// Yields `steps + 1` sizes, both ends included, linearly interpolated. With
/// [`ping_pong`](Self::ping_pong) the sweep walks back to `from` afterwards,
/// for `2 * steps + 1` sizes in total.
#[derive(Clone, Copy, Debug)]
pub struct ResizeSweep {
    from: Size,
    to: Size,
    steps: u32,
    ping_pong: bool,
    cursor: u32,
}

impl ResizeSweep {
    /// Creates a one-way sweep.
    #[must_use]
    pub const fn new(from: Size, to: Size, steps: u32) -> Self {
        Self {
            from,
            to,
            steps,
            ping_pong: false,
            cursor: 0,
        }
    }

    /// Walks back to the start after reaching the end.
    #[must_use]
    pub const fn ping_pong(mut self) -> Self {
        self.ping_pong = true;
        self
    }

    /// Total number of sizes the sweep yields.
    #[must_use]
    pub const fn total(&self) -> u32 {
        if self.ping_pong {
            self.steps * 2 + 1
        } else {
            self.steps + 1
        }
    }

    fn at(&self, i: u32) -> Size {
        if self.steps == 0 {
            return self.from;
        }
        let leg = if i <= self.steps {
            i
        } else {
            2 * self.steps - i
        };
        let t = f64::from(leg) / f64::from(self.steps);
        Size::new(
            self.from.width + (self.to.width - self.from.width) * t,
            self.from.height + (self.to.height - self.from.height) * t,
        )
    }
}

impl Iterator for ResizeSweep {
    type Item = Size;

    fn next(&mut self) -> Option<Size> {
        if self.cursor >= self.total() {
            return None;
        }
        let size = self.at(self.cursor);
        self.cursor += 1;
        Some(size)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.total().saturating_sub(self.cursor) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for ResizeSweep {}

/// Direction the available space moved between two samples.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Trend {
    /// Neither dimension grew and at least one shrank.
    Shrinking,
    /// Neither dimension shrank and at least one grew.
    Growing,
    /// No change.
    Steady,
    /// One dimension grew while the other shrank.
    Mixed,
}

impl Trend {
    /// Classifies the change from `prev` to `next`.
    #[must_use]
    pub fn between(prev: Size, next: Size) -> Self {
        let sign = |d: f64| {
            if d > EPSILON {
                1
            } else if d < -EPSILON {
                -1
            } else {
                0
            }
        };
        match (
            sign(next.width - prev.width),
            sign(next.height - prev.height),
        ) {
            (0, 0) => Self::Steady,
            (w, h) if w <= 0 && h <= 0 => Self::Shrinking,
            (w, h) if w >= 0 && h >= 0 => Self::Growing,
            _ => Self::Mixed,
        }
    }
}

/// Letter grade for scale stability.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StabilityGrade {
    /// No violations and no oscillation.
    A,
    /// Rare violations.
    B,
    /// Noticeable jitter.
    C,
    /// Unstable.
    D,
}

impl StabilityGrade {
    /// Returns a short label for HUD rendering.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }
}

/// Aggregated report returned by [`ScaleMonitor::observe`].
#[derive(Clone, Copy, Debug)]
pub struct StabilityReport {
    /// Current grade.
    pub grade: StabilityGrade,
    /// Change from the previous sample.
    pub delta: f64,
    /// Total samples observed.
    pub samples: u64,
    /// Samples that moved against the resize direction.
    pub violations: u64,
    /// Direction reversals while the resize direction held.
    pub oscillations: u64,
}

/// Rolling scale monitor with a fixed-size history.
///
/// Each sample carries the [`Trend`] of the resize that produced it. A scale
/// that grows while space shrinks (or the reverse), or changes at all while
/// space holds still, is a violation. A scale whose direction of change flips
/// while the resize direction did not is an oscillation.
#[derive(Debug)]
pub struct ScaleMonitor<const N: usize> {
    scales: [f64; N],
    cursor: usize,
    last: Option<(f64, Trend)>,
    last_sign: i8,
    samples: u64,
    violations: u64,
    oscillations: u64,
}

impl<const N: usize> Default for ScaleMonitor<N> {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl<const N: usize> ScaleMonitor<N> {
    /// Creates a monitor with `seed` prefilled in the ring buffer.
    #[must_use]
    pub const fn new(seed: f64) -> Self {
        Self {
            scales: [seed; N],
            cursor: 0,
            last: None,
            last_sign: 0,
            samples: 0,
            violations: 0,
            oscillations: 0,
        }
    }

    /// Observes one scale and returns an updated report.
    ///
    /// The first sample only establishes a baseline.
    #[must_use]
    pub fn observe(&mut self, scale: f64, trend: Trend) -> StabilityReport {
        self.samples = self.samples.saturating_add(1);
        self.scales[self.cursor % N] = scale;
        self.cursor = (self.cursor + 1) % N;

        let mut delta = 0.0;
        if let Some((prev, prev_trend)) = self.last {
            delta = scale - prev;
            let sign: i8 = if delta > EPSILON {
                1
            } else if delta < -EPSILON {
                -1
            } else {
                0
            };
            let against = match trend {
                Trend::Shrinking => sign > 0,
                Trend::Growing => sign < 0,
                Trend::Steady => sign != 0,
                Trend::Mixed => false,
            };
            if against {
                self.violations = self.violations.saturating_add(1);
            }
            if sign != 0 {
                if self.last_sign != 0 && sign != self.last_sign && trend == prev_trend {
                    self.oscillations = self.oscillations.saturating_add(1);
                }
                self.last_sign = sign;
            }
        }
        self.last = Some((scale, trend));

        StabilityReport {
            grade: grade_for(self.samples, self.violations, self.oscillations),
            delta,
            samples: self.samples,
            violations: self.violations,
            oscillations: self.oscillations,
        }
    }

    /// Returns ring-buffer scales oldest→newest.
    #[must_use]
    pub fn recent(&self) -> [f64; N] {
        let mut out = [0.0; N];
        let mut i = 0;
        while i < N {
            out[i] = self.scales[(self.cursor + i) % N];
            i += 1;
        }
        out
    }

    /// Returns an ASCII sparkline over [`recent`](Self::recent).
    #[must_use]
    pub fn sparkline_ascii(&self, min: f64, max: f64) -> String {
        const LEVELS: &[u8] = b" .:-=+*#%@";
        let mut out = String::with_capacity(N);
        let span = max - min;
        let mut i = 0;
        while i < N {
            let v = self.scales[(self.cursor + i) % N].max(min).min(max);
            let t = if span > 0.0 { (v - min) / span } else { 0.0 };
            #[expect(
                clippy::cast_possible_truncation,
                reason = "index is clamped to ASCII level count"
            )]
            let level = (t * (LEVELS.len() as f64 - 1.0) + 0.5) as usize;
            out.push(LEVELS[level] as char);
            i += 1;
        }
        out
    }
}

fn grade_for(samples: u64, violations: u64, oscillations: u64) -> StabilityGrade {
    if violations == 0 && oscillations == 0 {
        return StabilityGrade::A;
    }
    let per_1000 = (violations + oscillations) as f64 * 1000.0 / samples.max(1) as f64;
    if per_1000 < 5.0 {
        StabilityGrade::B
    } else if per_1000 < 25.0 {
        StabilityGrade::C
    } else {
        StabilityGrade::D
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::{Point, Vec2};
    use tether_core::align::Alignment;
    use tether_core::container::{ContainerConfig, FitAxis, FitPhase, FitScreen};
    use tether_core::engine::{EngineConfig, LayoutEngine};
    use tether_core::registry::TrackOptions;
    use tether_core::scene::{NodeDesc, NodeId};
    use tether_core::trace::Tracer;

    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn sweep_includes_both_ends() {
        let sizes: Vec<Size> =
            ResizeSweep::new(Size::new(100.0, 50.0), Size::new(200.0, 50.0), 4).collect();
        assert_eq!(sizes.len(), 5);
        assert_eq!(sizes[0], Size::new(100.0, 50.0));
        assert_eq!(sizes[2], Size::new(150.0, 50.0));
        assert_eq!(sizes[4], Size::new(200.0, 50.0));
    }

    #[test]
    fn ping_pong_returns_to_start() {
        let sweep = ResizeSweep::new(Size::new(0.0, 0.0), Size::new(10.0, 20.0), 2).ping_pong();
        assert_eq!(sweep.len(), 5);
        let sizes: Vec<Size> = sweep.collect();
        assert_eq!(sizes[2], Size::new(10.0, 20.0));
        assert_eq!(sizes[3], Size::new(5.0, 10.0));
        assert_eq!(sizes[4], Size::new(0.0, 0.0));
    }

    #[test]
    fn zero_step_sweep_yields_start() {
        let sizes: Vec<Size> =
            ResizeSweep::new(Size::new(3.0, 4.0), Size::new(9.0, 9.0), 0).collect();
        assert_eq!(sizes, [Size::new(3.0, 4.0)]);
    }

    #[test]
    fn trend_classification() {
        let a = Size::new(100.0, 100.0);
        assert_eq!(Trend::between(a, Size::new(90.0, 100.0)), Trend::Shrinking);
        assert_eq!(Trend::between(a, Size::new(100.0, 110.0)), Trend::Growing);
        assert_eq!(Trend::between(a, a), Trend::Steady);
        assert_eq!(Trend::between(a, Size::new(90.0, 110.0)), Trend::Mixed);
    }

    #[test]
    fn monitor_counts_violations_and_oscillations() {
        let mut m = ScaleMonitor::<4>::new(1.0);
        let _ = m.observe(1.0, Trend::Steady);
        let _ = m.observe(0.9, Trend::Shrinking);
        let r = m.observe(0.95, Trend::Shrinking);
        assert_eq!(r.violations, 1);
        assert_eq!(r.oscillations, 1);
        assert!(close(r.delta, 0.05));
        assert_eq!(r.grade, StabilityGrade::D);
    }

    #[test]
    fn turning_around_is_not_an_oscillation() {
        let mut m = ScaleMonitor::<4>::default();
        let _ = m.observe(1.0, Trend::Steady);
        let _ = m.observe(0.8, Trend::Shrinking);
        let r = m.observe(0.9, Trend::Growing);
        assert_eq!(r.violations, 0);
        assert_eq!(r.oscillations, 0);
        assert_eq!(r.grade, StabilityGrade::A);
    }

    #[test]
    fn recent_is_oldest_first() {
        let mut m = ScaleMonitor::<3>::new(0.0);
        for s in [1.0, 2.0, 3.0, 4.0] {
            let _ = m.observe(s, Trend::Mixed);
        }
        assert_eq!(m.recent(), [2.0, 3.0, 4.0]);
        assert_eq!(m.sparkline_ascii(0.0, 4.0).len(), 3);
    }

    // -- Engine-driven properties --

    fn trio_bar(engine: &mut LayoutEngine, config: ContainerConfig) -> (NodeId, [NodeId; 3]) {
        let bar = engine.create_container(config);
        let kids = [100.0, 120.0, 100.0].map(|w| engine.create_node(NodeDesc::sized(w, 40.0)));
        for k in kids {
            engine.add_child(bar, k, None);
        }
        (bar, kids)
    }

    fn positions(engine: &LayoutEngine, nodes: &[NodeId]) -> Vec<(Point, Point, Vec2)> {
        let scene = engine.scene();
        nodes
            .iter()
            .map(|&n| (scene.position(n), scene.origin(n), scene.scale(n)))
            .collect()
    }

    #[test]
    fn refresh_is_idempotent_across_a_sweep() {
        let mut engine = LayoutEngine::new(EngineConfig::default());
        let badge = engine.create_node(NodeDesc::sized(32.0, 32.0));
        engine.track(
            badge,
            Alignment::TopRight,
            12.0,
            TrackOptions::default().with_scale_with_screen(true),
        );
        let (bar, kids) = trio_bar(
            &mut engine,
            ContainerConfig::new(600.0, 80.0)
                .with_spacing(30.0)
                .with_alignment(Alignment::BottomCenter, (0.0, 40.0))
                .with_fit_screen(FitScreen::default().with_min_spacing(10.0)),
        );
        let mut watched = Vec::from(kids);
        watched.push(badge);
        watched.push(bar);

        let sweep = ResizeSweep::new(Size::new(1280.0, 800.0), Size::new(320.0, 568.0), 120)
            .ping_pong();
        for size in sweep {
            engine.resize(size.width, size.height);
            let first = positions(&engine, &watched);
            engine.refresh(&mut Tracer::none());
            assert_eq!(first, positions(&engine, &watched), "at {size:?}");
        }
    }

    #[test]
    fn child_scale_is_monotonic_while_container_shrinks() {
        let mut engine = LayoutEngine::new(EngineConfig::default());
        let (bar, _) = trio_bar(&mut engine, ContainerConfig::new(600.0, 80.0).with_spacing(30.0));

        let mut monitor = ScaleMonitor::<16>::default();
        let mut prev: Option<Size> = None;
        for size in ResizeSweep::new(Size::new(600.0, 80.0), Size::new(40.0, 80.0), 280) {
            engine.set_container_size(bar, size);
            let trend = prev.map_or(Trend::Steady, |p| Trend::between(p, size));
            let factor = engine.container(bar).map_or(f64::NAN, |c| c.scale_factor());
            let report = monitor.observe(factor, trend);
            assert_eq!(report.violations, 0, "at {size:?}");
            assert_eq!(report.oscillations, 0, "at {size:?}");
            if size.width >= 380.0 {
                assert!(close(factor, 1.0), "at {size:?}: {factor}");
            } else {
                let expected = (size.width / 380.0).max(0.1);
                assert!(close(factor, expected), "at {size:?}: {factor}");
            }
            prev = Some(size);
        }
    }

    #[test]
    fn screen_fit_shrinks_bounds_before_scaling() {
        let mut engine = LayoutEngine::new(EngineConfig::default());
        let bar = engine.create_container(
            ContainerConfig::new(600.0, 80.0)
                .with_spacing(30.0)
                .with_fit_screen(
                    FitScreen::default()
                        .with_axis(FitAxis::Width)
                        .with_min_spacing(15.0)
                        .with_min_container_scale(0.25),
                ),
        );
        for _ in 0..3 {
            let k = engine.create_node(NodeDesc::sized(100.0, 40.0));
            engine.add_child(bar, k, None);
        }

        let mut monitor = ScaleMonitor::<16>::default();
        let mut prev = None;
        for size in ResizeSweep::new(Size::new(700.0, 800.0), Size::new(100.0, 800.0), 300) {
            engine.resize(size.width, size.height);
            let Some(c) = engine.container(bar) else {
                panic!("container vanished");
            };
            let fit = c.last_fit().and_then(|f| f.width);
            let Some(fit) = fit else {
                panic!("width was not evaluated");
            };
            let w = size.width;
            if w >= 600.0 {
                assert_eq!(fit.phase, FitPhase::Declared);
                assert!(close(c.effective_size().width, 600.0));
                assert!(close(c.fit_scale(), 1.0));
            } else if w >= 330.0 {
                assert_eq!(fit.phase, FitPhase::Shrink, "at {w}");
                assert!(close(c.effective_size().width, w));
                assert!(close(c.fit_scale(), 1.0), "at {w}: {}", c.fit_scale());
            } else {
                assert_eq!(fit.phase, FitPhase::Scale, "at {w}");
                assert!(close(c.effective_size().width, 330.0));
                assert!(close(c.fit_scale(), (w / 330.0).max(0.25)), "at {w}");
            }
            assert!(close(c.scale_factor(), 1.0), "children never scale at {w}");

            let trend = prev.map_or(Trend::Steady, |p| Trend::between(p, size));
            let report = monitor.observe(c.fit_scale(), trend);
            assert_eq!(report.grade, StabilityGrade::A, "at {w}");
            prev = Some(size);
        }
    }

    #[test]
    fn repeated_resizes_never_compound_child_scale() {
        let mut engine = LayoutEngine::new(EngineConfig::default());
        let config = ContainerConfig::new(600.0, 80.0).with_spacing(30.0);
        let (bar, kids) = trio_bar(&mut engine, config);
        let big = engine.create_node(NodeDesc::sized(50.0, 20.0).with_scale(1.5, 1.5));
        engine.add_child(bar, big, None);
        let original = Vec2::new(1.5, 1.5);

        let sweep =
            ResizeSweep::new(Size::new(600.0, 80.0), Size::new(150.0, 40.0), 50).ping_pong();
        assert_eq!(sweep.len(), 101);
        for size in sweep {
            engine.resize(size.width * 2.0, size.height * 10.0);
            engine.set_container_size(bar, size);
            let Some(c) = engine.container(bar) else {
                panic!("container vanished");
            };
            let factor = c.scale_factor();
            let scale = engine.scene().scale(big);
            assert!(close(scale.x, original.x * factor), "at {size:?}");
            assert!(close(scale.y, original.y * factor), "at {size:?}");
            for k in kids {
                assert!(close(engine.scene().scale(k).x, factor));
            }
        }

        // Back at the declared size: required 380 + 75 + 30 = 485 fits in 600.
        assert!(close(engine.scene().scale(big).x, 1.5));
        assert!(engine.remove_child(bar, big));
        assert_eq!(engine.scene().scale(big), original);
    }
}
