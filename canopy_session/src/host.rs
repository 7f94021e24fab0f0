// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seams between a session and its host: the drawing surface and the frame
//! scheduler.

use canopy_camera::{CameraPosition, Projection};
use canopy_scene::Scene;
use glam::DVec3;
use kurbo::{Point, Size};
use peniko::Color;

/// Message shown in place of the viewport when a surface cannot render.
pub const DEFAULT_FALLBACK_MESSAGE: &str =
    "This viewport needs a graphics context that is not available here.";

/// Everything a surface needs to draw one frame.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    /// Geometry, object scale, and highlight.
    pub scene: &'a Scene,
    /// Camera position in world space.
    pub camera: CameraPosition,
    /// Projection the camera uses.
    pub projection: &'a Projection,
    /// Clear color.
    pub background: Color,
    /// Branch line color.
    pub branch_color: Color,
    /// Point marker size in pixels. Markers keep this size at every zoom.
    pub point_size: f32,
}

impl Frame<'_> {
    /// Screen position of a world-space point on the z = 0 plane.
    #[must_use]
    pub fn to_screen(&self, world: DVec3) -> Point {
        self.projection
            .world_to_screen(Point::new(world.x, world.y), self.camera)
    }

    /// Viewport size in pixels.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.projection.viewport()
    }
}

/// A drawing target for sessions.
pub trait RenderSurface {
    /// Whether the surface can render at all. Checked once, at mount.
    fn is_available(&self) -> bool;

    /// Message to show instead of the viewport when unavailable.
    fn fallback_message(&self) -> String {
        DEFAULT_FALLBACK_MESSAGE.into()
    }

    /// Resizes the drawing target to `size` pixels.
    fn resize(&mut self, size: Size);

    /// Draws `frame`.
    fn render(&mut self, frame: &Frame<'_>);

    /// Frees the drawing target. Called exactly once, at teardown.
    fn release(&mut self);
}

/// Handle of a scheduled frame callback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FrameRequest(pub u64);

/// Schedules frame callbacks, like a display's refresh loop.
///
/// When a requested frame is due, the host calls
/// [`ViewportSession::on_frame`](crate::ViewportSession::on_frame).
pub trait FrameHost {
    /// Schedules one callback.
    fn request_frame(&mut self) -> FrameRequest;

    /// Cancels a callback that has not fired.
    fn cancel_frame(&mut self, request: FrameRequest);
}

/// A [`FrameHost`] driven by hand: frames fire whenever the owner calls
/// `on_frame`.
#[derive(Clone, Debug, Default)]
pub struct ManualFrames {
    next: u64,
    outstanding: Option<FrameRequest>,
    cancelled: u64,
}

impl ManualFrames {
    /// The request waiting to fire, if any.
    #[must_use]
    pub fn outstanding(&self) -> Option<FrameRequest> {
        self.outstanding
    }

    /// Total number of requests made.
    #[must_use]
    pub fn requested(&self) -> u64 {
        self.next
    }

    /// Total number of requests cancelled.
    #[must_use]
    pub fn cancelled(&self) -> u64 {
        self.cancelled
    }
}

impl FrameHost for ManualFrames {
    fn request_frame(&mut self) -> FrameRequest {
        let request = FrameRequest(self.next);
        self.next += 1;
        self.outstanding = Some(request);
        request
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        if self.outstanding == Some(request) {
            self.outstanding = None;
            self.cancelled += 1;
        }
    }
}

/// The continuous render loop: keeps exactly one frame request outstanding
/// while running.
#[derive(Clone, Debug, Default)]
pub struct RenderTask {
    pending: Option<FrameRequest>,
    frames: u64,
}

impl RenderTask {
    /// Requests the first frame. Does nothing if already running.
    pub fn start<H: FrameHost + ?Sized>(&mut self, host: &mut H) {
        if self.pending.is_none() {
            self.pending = Some(host.request_frame());
        }
    }

    /// Records that the pending frame fired and requests the next one.
    ///
    /// Returns `false`, requesting nothing, when the task is stopped.
    pub fn on_frame<H: FrameHost + ?Sized>(&mut self, host: &mut H) -> bool {
        if self.pending.take().is_none() {
            return false;
        }
        self.frames += 1;
        self.pending = Some(host.request_frame());
        true
    }

    /// Cancels the pending frame. Idempotent.
    pub fn stop<H: FrameHost + ?Sized>(&mut self, host: &mut H) {
        if let Some(request) = self.pending.take() {
            host.cancel_frame(request);
        }
    }

    /// Whether a frame request is outstanding.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.pending.is_some()
    }

    /// Number of frames that fired while running.
    #[must_use]
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
