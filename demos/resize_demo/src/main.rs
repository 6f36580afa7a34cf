// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag-resize demo that exercises the layout, tracing and snapshot pipeline.
//!
//! Builds a small HUD (a tracked badge, a score label and a screen-fitted
//! toolbar), drags the viewport from desktop to phone size and back, and
//! prints every layout event through a
//! [`PrettyPrintSink`](tether_debug::pretty::PrettyPrintSink). The toolbar's
//! combined scale is graded by a
//! [`ScaleMonitor`](tether_resize_harness::ScaleMonitor), and the final
//! layout is written to `layout.json`.

use std::fs::File;
use std::io::BufWriter;

use kurbo::{Point, Size, Vec2};
use tether_core::align::Alignment;
use tether_core::backend::{MirrorPresenter, Presenter};
use tether_core::container::{ChildAnchor, ContainerConfig, FitScreen};
use tether_core::engine::{EngineConfig, LayoutEngine};
use tether_core::registry::{OrientationOverride, TrackOptions};
use tether_core::scene::{Element, NodeId};
use tether_core::trace::{
    LayoutPassEvent, RepositionEvent, ScreenFitEvent, SkipEvent, TraceSink, Tracer, ViewportEvent,
};
use tether_core::viewport::Edges;

use tether_debug::pretty::PrettyPrintSink;
use tether_debug::recorder::RecorderSink;
use tether_debug::snapshot;
use tether_resize_harness::{ResizeSweep, ScaleMonitor, Trend};

const SWEEP_STEPS: u32 = 24;

/// Stand-in for a host display object.
#[derive(Clone, Debug)]
struct Sprite {
    name: &'static str,
    position: Point,
    size: Size,
    scale: Vec2,
    origin: Point,
    visible: bool,
}

impl Sprite {
    fn new(name: &'static str, width: f64, height: f64) -> Self {
        Self {
            name,
            position: Point::ZERO,
            size: Size::new(width, height),
            scale: Vec2::new(1.0, 1.0),
            origin: Point::new(0.5, 0.5),
            visible: true,
        }
    }
}

impl Element for Sprite {
    fn position(&self) -> Point {
        self.position
    }

    fn set_position(&mut self, position: Point) {
        self.position = position;
    }

    fn size(&self) -> Size {
        self.size
    }

    fn scale(&self) -> Vec2 {
        self.scale
    }

    fn set_scale(&mut self, scale: Vec2) {
        self.scale = scale;
    }

    fn origin(&self) -> Option<Point> {
        Some(self.origin)
    }

    fn set_origin(&mut self, origin: Point) {
        self.origin = origin;
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }
}

/// Fans events out to the console and the recorder.
struct Tee<'a> {
    pretty: &'a mut PrettyPrintSink,
    recorder: &'a mut RecorderSink,
}

impl TraceSink for Tee<'_> {
    fn on_viewport_change(&mut self, e: &ViewportEvent) {
        self.pretty.on_viewport_change(e);
        self.recorder.on_viewport_change(e);
    }

    fn on_skip(&mut self, e: &SkipEvent) {
        self.pretty.on_skip(e);
        self.recorder.on_skip(e);
    }

    fn on_reposition(&mut self, e: &RepositionEvent) {
        self.pretty.on_reposition(e);
        self.recorder.on_reposition(e);
    }

    fn on_layout_pass(&mut self, e: &LayoutPassEvent) {
        self.pretty.on_layout_pass(e);
        self.recorder.on_layout_pass(e);
    }

    fn on_screen_fit(&mut self, e: &ScreenFitEvent) {
        self.pretty.on_screen_fit(e);
        self.recorder.on_screen_fit(e);
    }
}

fn adopt(
    engine: &mut LayoutEngine,
    presenter: &mut MirrorPresenter<Sprite>,
    sprite: Sprite,
) -> NodeId {
    let node = engine.adopt(&sprite);
    presenter.insert(node, sprite);
    node
}

fn main() {
    let mut engine = LayoutEngine::new(EngineConfig {
        base_size: Size::new(1280.0, 800.0),
        ..EngineConfig::default()
    });
    engine.resize(1280.0, 800.0);
    engine.set_safe_area(Edges::new(24.0, 0.0, 16.0, 0.0));
    let mut presenter = MirrorPresenter::new();

    // -- tracked elements --------------------------------------------------
    let badge = adopt(&mut engine, &mut presenter, Sprite::new("badge", 48.0, 48.0));
    engine.track(
        badge,
        Alignment::TopRight,
        16.0,
        TrackOptions::default()
            .with_scale_with_screen(true)
            .with_portrait(
                OrientationOverride::new(Alignment::TopCenter).with_margin((0.0, 8.0)),
            ),
    );
    let score = adopt(&mut engine, &mut presenter, Sprite::new("score", 160.0, 32.0));
    engine.track(score, Alignment::TopLeft, 16.0, TrackOptions::default());

    // -- toolbar -----------------------------------------------------------
    let toolbar = engine.create_container(
        ContainerConfig::new(720.0, 72.0)
            .with_spacing(24.0)
            .with_padding(Edges::uniform(8.0))
            .with_alignment(Alignment::BottomCenter, (0.0, 12.0))
            .with_fit_screen(
                FitScreen::default()
                    .with_margin(8.0)
                    .with_min_spacing(6.0)
                    .with_min_container_scale(0.4),
            ),
    );
    let buttons = [
        ("menu", ChildAnchor::Start),
        ("map", ChildAnchor::Center),
        ("bag", ChildAnchor::Center),
        ("chat", ChildAnchor::End),
    ];
    for (name, anchor) in buttons {
        let b = adopt(&mut engine, &mut presenter, Sprite::new(name, 96.0, 56.0));
        engine.add_child(toolbar, b, Some(anchor));
    }

    // -- sweep -------------------------------------------------------------
    let mut pretty = PrettyPrintSink::new(Box::new(std::io::stdout()));
    let mut recorder = RecorderSink::new();
    let mut monitor = ScaleMonitor::<32>::default();

    let sweep = ResizeSweep::new(Size::new(1280.0, 800.0), Size::new(360.0, 640.0), SWEEP_STEPS)
        .ping_pong();
    let mut prev: Option<Size> = None;
    for size in sweep {
        {
            let mut tee = Tee {
                pretty: &mut pretty,
                recorder: &mut recorder,
            };
            engine.resize_traced(size.width, size.height, &mut Tracer::new(&mut tee));
        }
        let changes = engine.scene_mut().evaluate();
        presenter.apply(engine.scene(), &changes);

        let combined = engine
            .container(toolbar)
            .map_or(1.0, |c| c.fit_scale() * c.scale_factor());
        let trend = prev.map_or(Trend::Steady, |p| Trend::between(p, size));
        let report = monitor.observe(combined, trend);
        println!(
            "  -> toolbar x{combined:.3} grade={} violations={} oscillations={}",
            report.grade.as_str(),
            report.violations,
            report.oscillations,
        );
        prev = Some(size);
    }

    println!();
    println!("scale history  [{}]", monitor.sparkline_ascii(0.0, 1.0));
    println!(
        "viewport changes: {}, toolbar fits: {}",
        recorder.viewport_changes(),
        recorder.fit_scales(toolbar).len(),
    );
    for (_, sprite) in presenter.iter() {
        println!(
            "  {:<6} at ({:>7.1}, {:>7.1}) scale {:.3} visible={}",
            sprite.name, sprite.position.x, sprite.position.y, sprite.scale.x, sprite.visible,
        );
    }

    // -- snapshot ----------------------------------------------------------
    let path = "layout.json";
    let file = File::create(path).expect("failed to create layout.json");
    let mut writer = BufWriter::new(file);
    snapshot::write_layout(&engine, &mut writer).expect("failed to write layout snapshot");
    println!("Wrote {path} ({} resize steps)", SWEEP_STEPS * 2 + 1);

    let scene = engine.destroy();
    println!("{} nodes left after teardown", scene.node_count());
}
