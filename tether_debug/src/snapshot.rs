// Copyright 2026 the Tether Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! JSON snapshots.
//!
//! [`layout_to_json`] captures the viewport, every tracked element and every
//! container with its children, as they stand after the last pass.
//! [`events_to_json`] turns a [`RecorderSink`](crate::recorder::RecorderSink)
//! log into an array of tagged event objects. Both are meant for diffing
//! layouts across resizes and attaching to bug reports.

use std::io::{self, Write};

use kurbo::{Point, Rect, Size, Vec2};
use serde_json::{Value, json};

use tether_core::container::{AdaptiveContainer, AxisFit, FitPhase};
use tether_core::engine::LayoutEngine;
use tether_core::scene::{NodeId, Scene};

use crate::recorder::RecordedEvent;

fn point(p: Point) -> Value {
    json!([p.x, p.y])
}

fn vec2(v: Vec2) -> Value {
    json!([v.x, v.y])
}

fn size(s: Size) -> Value {
    json!([s.width, s.height])
}

fn rect(r: Rect) -> Value {
    json!([r.x0, r.y0, r.x1, r.y1])
}

fn id(n: NodeId) -> Value {
    json!(format!("{}@{}", n.index(), n.generation()))
}

fn axis(fit: Option<AxisFit>) -> Value {
    match fit {
        Some(a) => {
            let phase = match a.phase {
                FitPhase::Declared => "declared",
                FitPhase::Shrink => "shrink",
                FitPhase::Scale => "scale",
            };
            json!({
                "phase": phase,
                "available": a.available,
                "declared": a.declared,
                "min_size": a.min_size,
                "size": a.size,
                "scale": a.scale,
            })
        }
        None => Value::Null,
    }
}

fn node(scene: &Scene, n: NodeId) -> Value {
    if !scene.is_alive(n) {
        return json!({ "id": id(n), "alive": false });
    }
    json!({
        "id": id(n),
        "alive": true,
        "position": point(scene.position(n)),
        "origin": point(scene.origin(n)),
        "size": size(scene.size(n)),
        "scale": vec2(scene.scale(n)),
        "active": scene.flags(n).active,
        "hidden": scene.flags(n).hidden,
    })
}

fn container(scene: &Scene, c: &AdaptiveContainer) -> Value {
    let fit = c.last_fit();
    json!({
        "node": node(scene, c.node()),
        "declared_size": size(c.declared_size()),
        "effective_size": size(c.effective_size()),
        "content": rect(c.content_bounds()),
        "scale_factor": c.scale_factor(),
        "fit_scale": c.fit_scale(),
        "spacing": c.spacing(),
        "state": format!("{:?}", c.state()),
        "fit": {
            "width": axis(fit.and_then(|f| f.width)),
            "height": axis(fit.and_then(|f| f.height)),
        },
        "children": c
            .children()
            .map(|child| {
                let mut v = node(scene, child);
                if let Some(entry) = c.child(child) {
                    v["anchor"] = json!(format!("{:?}", entry.anchor));
                    v["original_scale"] = vec2(entry.original_scale);
                }
                v
            })
            .collect::<Vec<_>>(),
    })
}

/// Captures the engine's current layout.
#[must_use]
pub fn layout_to_json(engine: &LayoutEngine) -> Value {
    let scene = engine.scene();
    let vp = engine.viewport();
    let safe = vp.safe_area();
    json!({
        "viewport": {
            "size": size(vp.size()),
            "orientation": format!("{:?}", vp.orientation()),
            "safe_area": [safe.top, safe.right, safe.bottom, safe.left],
            "screen_scale": vp.screen_scale(engine.registry().base_size()),
        },
        "tracked": engine
            .registry()
            .iter()
            .map(|e| {
                let mut v = node(scene, e.node);
                v["alignment"] = json!(e.alignment.name());
                v["margin"] = json!([e.margin.x, e.margin.y]);
                v
            })
            .collect::<Vec<_>>(),
        "containers": engine
            .containers()
            .map(|c| container(scene, c))
            .collect::<Vec<_>>(),
    })
}

/// Writes [`layout_to_json`] as pretty-printed JSON.
pub fn write_layout(engine: &LayoutEngine, writer: &mut dyn Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *writer, &layout_to_json(engine)).map_err(io::Error::from)?;
    writeln!(writer)
}

/// Converts recorded events into a JSON array.
#[must_use]
pub fn events_to_json(events: &[RecordedEvent]) -> Value {
    let out: Vec<Value> = events
        .iter()
        .map(|event| match event {
            RecordedEvent::Viewport(e) => json!({
                "type": "viewport",
                "size": [e.width, e.height],
                "orientation": format!("{:?}", e.orientation),
                "screen_scale": e.screen_scale,
            }),
            RecordedEvent::Skip(e) => json!({
                "type": "skip",
                "node": id(e.node),
                "reason": format!("{:?}", e.reason),
            }),
            RecordedEvent::Reposition(e) => json!({
                "type": "reposition",
                "node": id(e.node),
                "alignment": e.alignment.name(),
                "position": point(e.position),
                "origin": e.origin.map(point),
                "scale": e.scale,
            }),
            RecordedEvent::LayoutPass(e) => json!({
                "type": "layout",
                "container": id(e.container),
                "children": e.children,
                "scale_factor": e.scale_factor,
                "spacing": e.spacing,
                "content": rect(e.content),
            }),
            RecordedEvent::ScreenFit(e) => json!({
                "type": "fit",
                "container": id(e.container),
                "size": size(e.size),
                "scale": e.scale,
                "width": axis(e.width),
                "height": axis(e.height),
            }),
        })
        .collect();
    Value::Array(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recorder::RecorderSink;
    use tether_core::align::Alignment;
    use tether_core::container::{ChildAnchor, ContainerConfig, FitScreen};
    use tether_core::engine::EngineConfig;
    use tether_core::registry::TrackOptions;
    use tether_core::scene::NodeDesc;
    use tether_core::trace::Tracer;

    fn hud() -> (LayoutEngine, NodeId) {
        let mut engine = LayoutEngine::new(EngineConfig::default());
        let bar = engine.create_container(
            ContainerConfig::new(500.0, 80.0)
                .with_alignment(Alignment::BottomCenter, (0.0, 60.0))
                .with_fit_screen(FitScreen::default()),
        );
        for anchor in [ChildAnchor::Start, ChildAnchor::Center, ChildAnchor::End] {
            let k = engine.create_node(NodeDesc::sized(90.0, 50.0));
            engine.add_child(bar, k, Some(anchor));
        }
        (engine, bar)
    }

    #[test]
    fn layout_snapshot_lists_tracked_and_containers() {
        let (engine, bar) = hud();
        let v = layout_to_json(&engine);
        assert_eq!(v["viewport"]["size"], json!([1024.0, 768.0]));
        assert_eq!(v["tracked"][0]["id"], id(bar));
        assert_eq!(v["tracked"][0]["alignment"], "bottom-center");
        let children = v["containers"][0]["children"].as_array().unwrap();
        assert_eq!(children.len(), 3);
        assert_eq!(children[2]["anchor"], "End");
        assert_eq!(v["containers"][0]["state"], "Clean");
    }

    #[test]
    fn write_layout_is_valid_json() {
        let (engine, _) = hud();
        let mut out = Vec::new();
        write_layout(&engine, &mut out).unwrap();
        let parsed: Value = serde_json::from_slice(&out).unwrap();
        assert!(parsed["containers"].is_array());
    }

    #[test]
    fn events_export_is_tagged() {
        let (mut engine, _) = hud();
        let badge = engine.create_node(NodeDesc::sized(10.0, 10.0));
        engine.track(badge, Alignment::TopRight, 8.0, TrackOptions::default());

        let mut rec = RecorderSink::new();
        engine.resize_traced(360.0, 640.0, &mut Tracer::new(&mut rec));
        let v = events_to_json(rec.events());
        let arr = v.as_array().unwrap();
        assert_eq!(arr[0]["type"], "viewport");
        assert!(arr.iter().any(|e| e["type"] == "fit"));
        assert!(
            arr.iter()
                .any(|e| e["type"] == "reposition" && e["alignment"] == "top-right")
        );
    }

    #[test]
    fn dead_nodes_are_marked() {
        let mut scene = Scene::new();
        let n = scene.create_node(NodeDesc::sized(1.0, 1.0));
        scene.destroy_node(n);
        assert_eq!(node(&scene, n)["alive"], false);
    }
}
