// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared helpers for session integration tests.

#![allow(
    missing_docs,
    reason = "Integration-test helper module; not part of the public API."
)]
#![allow(
    dead_code,
    reason = "Each test binary uses a different subset of the helpers."
)]

use std::cell::RefCell;
use std::rc::Rc;

use canopy_camera::CameraPosition;
use canopy_scene::{BranchRecords, Dataset, PointRecord};
use canopy_session::{
    Frame, FrameHost, FrameRequest, ManualFrames, RenderSurface, SessionConfig, ViewportSession,
};
use kurbo::{Point, Size, TranslateScale};

pub(crate) const VIEWPORT: Size = Size::new(800.0, 600.0);

/// What a surface saw, kept outside the surface so tests can inspect it
/// after the session is gone.
#[derive(Debug, Default)]
pub(crate) struct SurfaceLog {
    pub(crate) resizes: Vec<Size>,
    pub(crate) frames: Vec<FrameSnapshot>,
    pub(crate) releases: u32,
}

#[derive(Clone, Debug)]
pub(crate) struct FrameSnapshot {
    pub(crate) camera: CameraPosition,
    pub(crate) highlight: Option<usize>,
    pub(crate) point_size: f32,
    pub(crate) screen_points: Vec<Point>,
}

#[derive(Clone, Debug)]
pub(crate) struct RecordingSurface {
    pub(crate) available: bool,
    pub(crate) log: Rc<RefCell<SurfaceLog>>,
}

impl RecordingSurface {
    pub(crate) fn new() -> Self {
        Self {
            available: true,
            log: Rc::default(),
        }
    }

    pub(crate) fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }
}

impl RenderSurface for RecordingSurface {
    fn is_available(&self) -> bool {
        self.available
    }

    fn resize(&mut self, size: Size) {
        self.log.borrow_mut().resizes.push(size);
    }

    fn render(&mut self, frame: &Frame<'_>) {
        let scene = frame.scene;
        let screen_points = (0..scene.geometry().len())
            .filter_map(|i| scene.world_position(i))
            .map(|p| frame.to_screen(p))
            .collect();
        self.log.borrow_mut().frames.push(FrameSnapshot {
            camera: frame.camera,
            highlight: scene.highlight().map(|h| h.index),
            point_size: frame.point_size,
            screen_points,
        });
    }

    fn release(&mut self) {
        self.log.borrow_mut().releases += 1;
    }
}

/// A frame host whose state outlives the session.
#[derive(Clone, Debug, Default)]
pub(crate) struct SharedFrames(pub(crate) Rc<RefCell<ManualFrames>>);

impl FrameHost for SharedFrames {
    fn request_frame(&mut self) -> FrameRequest {
        self.0.borrow_mut().request_frame()
    }

    fn cancel_frame(&mut self, request: FrameRequest) {
        self.0.borrow_mut().cancel_frame(request);
    }
}

pub(crate) type TestSession = ViewportSession<RecordingSurface, SharedFrames>;

pub(crate) struct Harness {
    pub(crate) session: TestSession,
    pub(crate) log: Rc<RefCell<SurfaceLog>>,
    pub(crate) frames: Rc<RefCell<ManualFrames>>,
}

pub(crate) fn mount_with(config: SessionConfig, dataset: Dataset) -> Harness {
    let surface = RecordingSurface::new();
    let log = surface.log.clone();
    let frames = SharedFrames::default();
    let frames_state = frames.0.clone();
    let session = ViewportSession::mount(config, dataset, VIEWPORT, surface, frames)
        .expect("surface is available");
    Harness {
        session,
        log,
        frames: frames_state,
    }
}

pub(crate) fn mount(dataset: Dataset) -> Harness {
    mount_with(SessionConfig::default(), dataset)
}

/// Ten points of a small tree layout and its branches.
pub(crate) fn tree_dataset() -> Dataset {
    let points = vec![
        PointRecord::new(0, 0.0, 0.0, "root"),
        PointRecord::new(1, 1.0, 4.0, "alpha"),
        PointRecord::new(2, 1.0, -4.0, "beta"),
        PointRecord::new(3, 2.0, 6.0, "alpha"),
        PointRecord::new(4, 2.0, 2.0, "alpha"),
        PointRecord::new(5, 2.0, -2.0, "beta"),
        PointRecord::new(6, 2.0, -6.0, ""),
        PointRecord::new("leaf-7", 3.0, 7.0, "gamma"),
        PointRecord::new("leaf-8", 3.0, 5.0, "gamma"),
        PointRecord::new("leaf-9", 4.0, -8.0, ""),
    ];
    let branches = BranchRecords {
        vertical: vec![
            [0.0, -4.0, 4.0],
            [1.0, 2.0, 6.0],
            [1.0, -6.0, -2.0],
            [2.0, 5.0, 7.0],
        ],
        horizontal: vec![
            [4.0, 0.0, 1.0],
            [-4.0, 0.0, 1.0],
            [6.0, 1.0, 2.0],
            [2.0, 1.0, 2.0],
            [-2.0, 1.0, 2.0],
            [-6.0, 1.0, 2.0],
            [7.0, 2.0, 3.0],
            [5.0, 2.0, 3.0],
            [-8.0, 2.0, 4.0],
        ],
    };
    Dataset::new(points, branches)
}

/// Where point `index` currently appears on screen.
pub(crate) fn screen_of(session: &TestSession, index: usize) -> Point {
    let world = session
        .scene()
        .world_position(index)
        .expect("index in range");
    session
        .projection()
        .world_to_screen(Point::new(world.x, world.y), session.camera())
}

pub(crate) fn assert_close(actual: f64, expected: f64, what: &str) {
    let tolerance = 1e-6 * expected.abs().max(1.0);
    assert!(
        (actual - expected).abs() <= tolerance,
        "{what}: expected {expected}, got {actual}"
    );
}

pub(crate) fn assert_same_transform(actual: TranslateScale, expected: TranslateScale) {
    assert_close(actual.scale, expected.scale, "transform scale");
    assert_close(actual.translation.x, expected.translation.x, "transform x");
    assert_close(actual.translation.y, expected.translation.y, "transform y");
}
