// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_render_cpu --heading-base-level=0

//! Canopy Render CPU: a [`RenderSurface`] that rasterizes sessions with
//! [`vello_cpu`].
//!
//! Each frame clears to the background, strokes the branches one pixel wide,
//! fills every point as a disc of the frame's point size, and draws the
//! highlight on top. Markers keep their pixel size at every zoom level.
//! Points whose disc lies entirely outside the viewport are skipped.
//!
//! The last frame stays available through [`CpuSurface::pixmap`], or as
//! straight-alpha RGBA bytes through [`CpuSurface::rgba8`].

use canopy_session::{Frame, RenderSurface};
use glam::DVec3;
use kurbo::Size;
use tracing::debug;
use vello_cpu::kurbo::{BezPath, Circle, Point, Rect, Shape, Stroke};
use vello_cpu::{Pixmap, RenderContext, RenderMode, RenderSettings};

const BRANCH_WIDTH: f64 = 1.0;
const DISC_TOLERANCE: f64 = 0.1;

struct Target {
    ctx: RenderContext,
    pixmap: Pixmap,
    width: u16,
    height: u16,
}

impl Target {
    fn new(width: u16, height: u16) -> Self {
        let settings = RenderSettings {
            render_mode: RenderMode::OptimizeSpeed,
            ..RenderSettings::default()
        };
        Self {
            ctx: RenderContext::new_with(width, height, settings),
            pixmap: Pixmap::new(width, height),
            width,
            height,
        }
    }
}

/// An offscreen CPU surface.
///
/// The surface is always available. After [`release`](RenderSurface::release)
/// it holds no pixels and ignores further frames.
pub struct CpuSurface {
    target: Option<Target>,
    frames: u64,
}

impl core::fmt::Debug for CpuSurface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("CpuSurface")
            .field("size", &self.target.as_ref().map(|t| (t.width, t.height)))
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}

impl CpuSurface {
    /// Creates a surface of `size` pixels (rounded, at least 1×1).
    #[must_use]
    pub fn new(size: Size) -> Self {
        Self {
            target: Some(Target::new(pixel_dim(size.width), pixel_dim(size.height))),
            frames: 0,
        }
    }

    /// Size in whole pixels, or `None` once released.
    #[must_use]
    pub fn dimensions(&self) -> Option<(u16, u16)> {
        self.target.as_ref().map(|t| (t.width, t.height))
    }

    /// The last rendered frame, or `None` once released.
    #[must_use]
    pub fn pixmap(&self) -> Option<&Pixmap> {
        self.target.as_ref().map(|t| &t.pixmap)
    }

    /// The last rendered frame as straight-alpha RGBA bytes, row by row.
    /// Empty once released.
    #[must_use]
    pub fn rgba8(&self) -> Vec<u8> {
        let Some(pixmap) = self.pixmap() else {
            return Vec::new();
        };
        let mut bytes = Vec::with_capacity(pixmap.data().len() * 4);
        for p in pixmap.data() {
            bytes.extend_from_slice(&unpremultiply([p.r, p.g, p.b, p.a]));
        }
        bytes
    }

    /// Straight-alpha RGBA of the pixel at `(x, y)`.
    #[must_use]
    pub fn pixel(&self, x: u16, y: u16) -> Option<[u8; 4]> {
        let target = self.target.as_ref()?;
        if x >= target.width || y >= target.height {
            return None;
        }
        let index = usize::from(y) * usize::from(target.width) + usize::from(x);
        let p = target.pixmap.data().get(index)?;
        Some(unpremultiply([p.r, p.g, p.b, p.a]))
    }

    /// Number of frames rendered.
    #[must_use]
    pub fn frames_rendered(&self) -> u64 {
        self.frames
    }

    /// Whether the surface was released.
    #[must_use]
    pub fn is_released(&self) -> bool {
        self.target.is_none()
    }
}

impl RenderSurface for CpuSurface {
    fn is_available(&self) -> bool {
        true
    }

    fn resize(&mut self, size: Size) {
        let (width, height) = (pixel_dim(size.width), pixel_dim(size.height));
        if let Some(target) = &mut self.target {
            if (target.width, target.height) != (width, height) {
                debug!(width, height, "cpu surface resized");
                *target = Target::new(width, height);
            }
        }
    }

    fn render(&mut self, frame: &Frame<'_>) {
        let Some(target) = &mut self.target else {
            return;
        };
        draw(target, frame);
        self.frames += 1;
    }

    fn release(&mut self) {
        if self.target.take().is_some() {
            debug!(frames = self.frames, "cpu surface released");
        }
    }
}

fn draw(target: &mut Target, frame: &Frame<'_>) {
    let ctx = &mut target.ctx;
    let width = f64::from(target.width);
    let height = f64::from(target.height);
    let scene = frame.scene;
    let geometry = scene.geometry();
    let object_scale = scene.object_scale();
    let screen = |p: DVec3| {
        let s = frame.to_screen(p * object_scale);
        Point::new(s.x, s.y)
    };

    ctx.reset();
    ctx.set_paint(frame.background);
    ctx.fill_rect(&Rect::new(0.0, 0.0, width, height));

    if !geometry.segments.is_empty() {
        let mut branches = BezPath::new();
        for pair in geometry.segments.chunks_exact(2) {
            branches.move_to(screen(pair[0].as_dvec3()));
            branches.line_to(screen(pair[1].as_dvec3()));
        }
        ctx.set_paint(frame.branch_color);
        ctx.set_stroke(Stroke::new(BRANCH_WIDTH));
        ctx.stroke_path(&branches);
    }

    let visible = Rect::new(0.0, 0.0, width, height);
    let radius = f64::from(frame.point_size) / 2.0;
    for (position, color) in geometry.positions.iter().zip(&geometry.colors) {
        let center = screen(position.as_dvec3());
        if !visible.inflate(radius, radius).contains(center) {
            continue;
        }
        ctx.set_paint(*color);
        ctx.fill_path(&Circle::new(center, radius).to_path(DISC_TOLERANCE));
    }

    if let Some(highlight) = scene.highlight() {
        let s = frame.to_screen(highlight.world_position());
        let center = Point::new(s.x, s.y);
        ctx.set_paint(highlight.color);
        ctx.fill_path(&Circle::new(center, f64::from(highlight.size) / 2.0).to_path(DISC_TOLERANCE));
    }

    ctx.flush();
    ctx.render_to_pixmap(&mut target.pixmap);
}

fn unpremultiply([r, g, b, a]: [u8; 4]) -> [u8; 4] {
    if a == 0 || a == 255 {
        return [r, g, b, a];
    }
    let un = |c: u8| {
        let value = (u16::from(c) * 255 + u16::from(a) / 2) / u16::from(a);
        u8::try_from(value).unwrap_or(u8::MAX)
    };
    [un(r), un(g), un(b), a]
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "value is rounded and clamped into u16 range first"
)]
fn pixel_dim(value: f64) -> u16 {
    if value.is_nan() {
        return 1;
    }
    value.round().clamp(1.0, f64::from(u16::MAX)) as u16
}
