// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless scatter viewport rendered to PNG.
//!
//! Loads a dataset (and optionally a session config) from JSON, mounts a
//! viewport session on the CPU surface, hovers a point, widens the x axis,
//! zooms in, and writes one PNG per step.
//!
//! Examples:
//!   `cargo run -p canopy_demos --example scatter_png`
//!   `cargo run -p canopy_demos --example scatter_png -- data.json config.json`
//!
//! Set `RUST_LOG=debug` to follow the session.

use std::env;
use std::error::Error;
use std::fs;

use canopy_camera::WheelDelta;
use canopy_demos::{init_logging, write_png};
use canopy_render_cpu::CpuSurface;
use canopy_scene::Dataset;
use canopy_session::{Axis, ManualFrames, PointerEvent, SessionConfig, ViewportSession};
use kurbo::{Point, Size};
use tracing::info;

const BUNDLED_DATA: &str = include_str!("../data/points-10.json");

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();

    let mut args = env::args().skip(1);
    let dataset: Dataset = match args.next() {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => serde_json::from_str(BUNDLED_DATA)?,
    };
    let config: SessionConfig = match args.next() {
        Some(path) => serde_json::from_str(&fs::read_to_string(path)?)?,
        None => SessionConfig::default(),
    };

    let viewport = Size::new(800.0, 600.0);
    let mut session = ViewportSession::mount(
        config,
        dataset,
        viewport,
        CpuSurface::new(viewport),
        ManualFrames::default(),
    )?;
    session.on_frame();
    write_png(session.surface(), "scatter_initial.png")?;
    eprintln!("Wrote scatter_initial.png");

    // Hover the last point wherever it landed on screen.
    let last = session.scene().geometry().len().saturating_sub(1);
    if let Some(world) = session.scene().world_position(last) {
        let screen = session
            .projection()
            .world_to_screen(Point::new(world.x, world.y), session.camera());
        session.handle_pointer(PointerEvent::Move(screen));
    }
    if let Some(tooltip) = session.tooltip() {
        let [id, group] = tooltip.lines();
        info!(%id, %group, x = tooltip.anchor.x, y = tooltip.anchor.y, "tooltip");
    }
    session.on_frame();
    write_png(session.surface(), "scatter_hover.png")?;
    eprintln!("Wrote scatter_hover.png");

    session.handle_pointer(PointerEvent::Leave);
    session.set_slider(Axis::X, 150.0);
    session.handle_pointer(PointerEvent::Wheel {
        position: Point::new(viewport.width / 2.0, viewport.height / 2.0),
        delta: WheelDelta::pixels(-300.0),
    });
    session.on_frame();
    write_png(session.surface(), "scatter_zoomed.png")?;
    eprintln!("Wrote scatter_zoomed.png");

    let camera = session.camera();
    info!(
        x = camera.x,
        y = camera.y,
        z = camera.z,
        x_multiplier = session.multipliers().x,
        "final camera"
    );
    session.teardown();
    Ok(())
}
