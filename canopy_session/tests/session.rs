// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End-to-end tests for `ViewportSession`: mounting, hover, axis sliders,
//! zoom, resize, and teardown.

use canopy_camera::WheelDelta;
use canopy_scene::{BranchRecords, Dataset, LengthPolicy, PointColumns, PointId, PointRecord};
use canopy_session::{
    Axis, DEFAULT_FALLBACK_MESSAGE, MountError, PointerEvent, RebuildFlags, SessionConfig,
    SliderOrientation, SliderSpec, ViewportSession,
};
use glam::DVec3;
use kurbo::{Point, Size};

mod common;

use common::{
    RecordingSurface, SharedFrames, VIEWPORT, assert_close, assert_same_transform, mount,
    mount_with, screen_of, tree_dataset,
};

#[test]
fn mount_centers_data_fully_zoomed_out() {
    let h = mount(tree_dataset());
    let session = &h.session;
    let far = session.projection().far();

    assert_close(session.camera().x, 0.0, "camera x");
    assert_close(session.camera().y, 0.0, "camera y");
    assert_close(session.camera().z, far, "camera z");
    assert_same_transform(session.transform(), session.projection().initial_transform());
    assert_eq!(session.scene().geometry().len(), 10);
    assert_eq!(session.scene().geometry().segment_count(), 13);

    assert_eq!(h.frames.borrow().requested(), 1);
    assert_eq!(h.log.borrow().resizes, vec![VIEWPORT]);
}

#[test]
fn unavailable_surface_shows_fallback_and_starts_nothing() {
    let surface = RecordingSurface::unavailable();
    let log = surface.log.clone();
    let frames = SharedFrames::default();
    let frames_state = frames.0.clone();

    let result = ViewportSession::mount(
        SessionConfig::default(),
        tree_dataset(),
        VIEWPORT,
        surface,
        frames,
    );
    let Err(MountError::SurfaceUnavailable { message }) = result else {
        panic!("mount must fail on an unavailable surface");
    };
    assert_eq!(message, DEFAULT_FALLBACK_MESSAGE);
    assert_eq!(frames_state.borrow().requested(), 0);
    assert!(log.borrow().resizes.is_empty());
    assert_eq!(log.borrow().releases, 0);
}

#[test]
fn pointer_over_point_hits_it_and_far_pointer_misses() {
    let mut h = mount(tree_dataset());
    let ids: Vec<PointId> = h.session.dataset().points.iter().map(|p| p.id.clone()).collect();

    for (index, id) in ids.iter().enumerate() {
        let pointer = screen_of(&h.session, index);
        h.session.handle_pointer(PointerEvent::Move(pointer));
        let tooltip = h.session.tooltip().expect("pointer is on a point");
        assert_eq!(&tooltip.id, id);
        assert_eq!(tooltip.pointer, pointer);
        assert_eq!(h.session.scene().highlight().map(|h| h.index), Some(index));
    }

    h.session.handle_pointer(PointerEvent::Move(Point::new(3.0, 3.0)));
    assert!(h.session.tooltip().is_none());
    assert!(h.session.scene().highlight().is_none());
}

#[test]
fn tooltip_and_highlight_use_group_colors() {
    let mut h = mount(tree_dataset());

    // Point 6 is ungrouped.
    let pointer = screen_of(&h.session, 6);
    h.session.handle_pointer(PointerEvent::Move(pointer));
    let tooltip = h.session.tooltip().expect("hit").clone();
    assert_eq!(tooltip.swatch, peniko::Color::BLACK);
    assert_eq!(tooltip.text_color, peniko::Color::WHITE);
    assert_eq!(tooltip.anchor, pointer + kurbo::Vec2::new(-60.0, 30.0));

    // Point 1 is the first of group "alpha", the second group seen.
    h.session.handle_pointer(PointerEvent::Move(screen_of(&h.session, 1)));
    let palette = &h.session.config().palette;
    let tooltip = h.session.tooltip().expect("hit");
    assert_eq!(tooltip.swatch, palette.color(1));
    assert_eq!(tooltip.text_color, peniko::Color::BLACK);
    let highlight = h.session.scene().highlight().expect("hit");
    assert_eq!(highlight.color, palette.color(1));
    assert_eq!(highlight.size, 12.0);
}

#[test]
fn leave_clears_hover() {
    let mut h = mount(tree_dataset());
    h.session.handle_pointer(PointerEvent::Move(screen_of(&h.session, 3)));
    assert!(h.session.tooltip().is_some());
    h.session.take_changes();

    h.session.handle_pointer(PointerEvent::Leave);
    assert!(h.session.tooltip().is_none());
    assert!(h.session.scene().highlight().is_none());
    assert!(h.session.take_changes().contains(RebuildFlags::HIGHLIGHT));

    h.session.handle_pointer(PointerEvent::Leave);
    assert!(h.session.take_changes().is_empty());
}

#[test]
fn hover_follows_rescaled_axes() {
    let mut h = mount(tree_dataset());
    h.session.set_slider(Axis::X, 100.0);
    h.session.set_slider(Axis::Y, 25.0);

    let pointer = screen_of(&h.session, 7);
    h.session.handle_pointer(PointerEvent::Move(pointer));
    let highlight = *h.session.scene().highlight().expect("hit after rescale");
    assert_eq!(highlight.index, 7);
    assert_eq!(highlight.scale, DVec3::new(2.0, 0.5, 1.0));
}

#[test]
fn rescale_keeps_centered_data_coordinate_centered() {
    let mut h = mount(tree_dataset());

    // Zoom in off-center, then pan, so the camera is somewhere arbitrary.
    h.session.handle_pointer(PointerEvent::Wheel {
        position: Point::new(250.0, 180.0),
        delta: WheelDelta::pixels(-600.0),
    });
    h.session.handle_pointer(PointerEvent::Down(Point::new(400.0, 300.0)));
    h.session.handle_pointer(PointerEvent::Move(Point::new(330.0, 340.0)));
    h.session.handle_pointer(PointerEvent::Up(Point::new(330.0, 340.0)));

    let k = h.session.transform().scale;
    let before = h.session.camera();
    let centered = (before.x, before.y);

    h.session.set_slider(Axis::X, 150.0);
    let after = h.session.camera();
    assert_close(after.x / 3.0, centered.0, "x stays centered");
    assert_close(after.y, centered.1, "y untouched");
    assert_close(after.z, before.z, "zoom distance unchanged");
    assert_close(h.session.transform().scale, k, "zoom scale unchanged");

    h.session.set_slider(Axis::Y, 10.0);
    let after = h.session.camera();
    assert_close(after.x / 3.0, centered.0, "x still centered");
    assert_close(after.y / 0.2, centered.1, "y stays centered");

    h.session.reset_slider(Axis::X);
    h.session.reset_slider(Axis::Y);
    let after = h.session.camera();
    assert_close(after.x, centered.0, "x after reset");
    assert_close(after.y, centered.1, "y after reset");
    assert_eq!(h.session.scene().object_scale(), DVec3::ONE);
}

#[test]
fn slider_values_are_clamped() {
    let mut h = mount(tree_dataset());
    h.session.set_slider(Axis::X, 10_000.0);
    assert_eq!(h.session.controls().x.value(), 800.0);
    assert_eq!(h.session.multipliers().x, 16.0);
    h.session.set_slider(Axis::Y, 0.0);
    assert_eq!(h.session.controls().y.value(), 1.0);
    assert_eq!(h.session.multipliers().y, 0.02);
}

#[test]
fn zero_slider_range_keeps_camera_finite() {
    let config = SessionConfig::default().with_sliders(
        SliderSpec::new("x", SliderOrientation::Horizontal, 0.0, 800.0),
        SliderSpec::new("y", SliderOrientation::Vertical, 0.0, 100.0).with_default(0.0),
    );
    let mut h = mount_with(config, tree_dataset());
    h.session.handle_pointer(PointerEvent::Down(Point::new(400.0, 300.0)));
    h.session.handle_pointer(PointerEvent::Move(Point::new(330.0, 340.0)));
    h.session.handle_pointer(PointerEvent::Up(Point::new(330.0, 340.0)));

    h.session.set_slider(Axis::X, 0.0);
    h.session.set_slider(Axis::X, 100.0);
    h.session.set_slider(Axis::Y, 0.0);
    h.session.set_slider(Axis::Y, 50.0);
    let camera = h.session.camera();
    assert!(camera.is_finite(), "camera {camera:?}");
    assert!(h.session.multipliers().x > 0.0);
    assert!(h.session.multipliers().y > 0.0);

    // Far from every point: no hover.
    h.session.handle_pointer(PointerEvent::Move(Point::new(2.0, 2.0)));
    assert!(h.session.tooltip().is_none());
}

#[test]
fn reset_camera_keeps_multipliers() {
    let mut h = mount(tree_dataset());
    h.session.set_slider(Axis::X, 200.0);
    h.session.handle_pointer(PointerEvent::DoubleClick {
        position: Point::new(100.0, 100.0),
        zoom_out: false,
    });
    h.session.reset_camera();

    assert_same_transform(
        h.session.transform(),
        h.session.projection().initial_transform(),
    );
    assert_close(h.session.camera().x, 0.0, "camera x");
    assert_close(h.session.camera().z, h.session.projection().far(), "camera z");
    assert_eq!(h.session.multipliers().x, 4.0);
    assert_eq!(h.session.scene().object_scale().x, 4.0);
}

#[test]
fn wheel_zooms_about_pointer() {
    let mut h = mount(tree_dataset());
    let far = h.session.projection().far();
    let k0 = h.session.transform().scale;

    // 500 px of wheel doubles the scale.
    h.session.handle_pointer(PointerEvent::Wheel {
        position: Point::new(400.0, 300.0),
        delta: WheelDelta::pixels(-500.0),
    });
    assert_close(h.session.transform().scale, 2.0 * k0, "scale doubled");
    assert_close(h.session.camera().z, far / 2.0, "camera moved halfway in");
    assert_close(h.session.camera().x, 0.0, "center fixed");
    assert_close(h.session.camera().y, 0.0, "center fixed");

    // The world point under an off-center pointer stays under it.
    let pointer = Point::new(120.0, 450.0);
    let projection = *h.session.projection();
    let before = projection.screen_to_world(pointer, h.session.camera());
    h.session.handle_pointer(PointerEvent::Wheel {
        position: pointer,
        delta: WheelDelta::pixels(-120.0),
    });
    let after = projection.screen_to_world(pointer, h.session.camera());
    assert_close(after.x, before.x, "anchored x");
    assert_close(after.y, before.y, "anchored y");
}

#[test]
fn zoom_is_clamped_to_clip_range() {
    let mut h = mount(tree_dataset());
    let (min_scale, max_scale) = h.session.projection().scale_extent();

    for _ in 0..50 {
        h.session.handle_pointer(PointerEvent::Wheel {
            position: Point::new(400.0, 300.0),
            delta: WheelDelta::pixels(-2_000.0),
        });
    }
    assert_close(h.session.transform().scale, max_scale, "max zoom");
    assert_close(h.session.camera().z, h.session.projection().near(), "at near plane");

    for _ in 0..50 {
        h.session.handle_pointer(PointerEvent::DoubleClick {
            position: Point::new(400.0, 300.0),
            zoom_out: true,
        });
    }
    assert_close(h.session.transform().scale, min_scale, "min zoom");
}

#[test]
fn drag_pans_camera_against_pointer() {
    let mut h = mount(tree_dataset());
    let k = h.session.transform().scale;

    h.session.handle_pointer(PointerEvent::Down(Point::new(400.0, 300.0)));
    h.session.handle_pointer(PointerEvent::Move(Point::new(450.0, 280.0)));
    h.session.handle_pointer(PointerEvent::Up(Point::new(450.0, 280.0)));
    assert_close(h.session.camera().x, -50.0 / k, "dragging right moves camera left");
    assert_close(h.session.camera().y, -20.0 / k, "dragging up moves camera down");

    // Moves after release no longer pan.
    let camera = h.session.camera();
    h.session.handle_pointer(PointerEvent::Move(Point::new(10.0, 10.0)));
    assert_eq!(h.session.camera(), camera);
}

#[test]
fn resize_applies_after_quiet_window() {
    let mut h = mount(tree_dataset());
    h.session.handle_pointer(PointerEvent::Wheel {
        position: Point::new(10.0, 10.0),
        delta: WheelDelta::pixels(-300.0),
    });
    h.session.set_slider(Axis::Y, 75.0);
    h.session.take_changes();

    h.session.on_resize(Size::new(1000.0, 500.0), 0);
    h.session.on_resize(Size::new(1200.0, 800.0), 60);
    assert_eq!(h.session.resize_deadline(), Some(160));
    assert!(!h.session.tick(100));
    assert_eq!(h.session.projection().viewport(), VIEWPORT);

    assert!(h.session.tick(160));
    let new_size = Size::new(1200.0, 800.0);
    assert_eq!(h.session.projection().viewport(), new_size);
    assert_same_transform(
        h.session.transform(),
        h.session.projection().initial_transform(),
    );
    assert_eq!(h.session.projection().scale_extent().0, h.session.transform().scale);
    assert_eq!(h.session.multipliers().y, 1.5);
    assert_eq!(h.log.borrow().resizes.last(), Some(&new_size));
    let changes = h.session.take_changes();
    assert!(changes.contains(RebuildFlags::VIEWPORT | RebuildFlags::DATA | RebuildFlags::CAMERA));
}

#[test]
fn frames_render_continuously_until_teardown() {
    let mut h = mount(tree_dataset());
    assert!(h.session.on_frame());
    assert!(h.session.on_frame());
    assert!(h.session.on_frame());
    assert_eq!(h.log.borrow().frames.len(), 3);
    assert_eq!(h.frames.borrow().requested(), 4);

    h.session.on_resize(Size::new(10.0, 10.0), 0);
    h.session.teardown();
    assert!(h.session.is_torn_down());
    assert_eq!(h.frames.borrow().cancelled(), 1);
    assert_eq!(h.frames.borrow().outstanding(), None);
    assert_eq!(h.log.borrow().releases, 1);

    assert!(!h.session.on_frame());
    assert!(!h.session.tick(1_000));
    assert_eq!(h.log.borrow().frames.len(), 3);

    h.session.teardown();
    drop(h.session);
    assert_eq!(h.log.borrow().releases, 1);
    assert_eq!(h.frames.borrow().cancelled(), 1);
}

#[test]
fn drop_tears_down() {
    let h = mount(tree_dataset());
    let log = h.log.clone();
    let frames = h.frames.clone();
    drop(h);
    assert_eq!(log.borrow().releases, 1);
    assert_eq!(frames.borrow().cancelled(), 1);
}

#[test]
fn frame_carries_scene_state() {
    let mut h = mount(tree_dataset());
    h.session.handle_pointer(PointerEvent::Move(screen_of(&h.session, 2)));
    assert!(h.session.on_frame());

    let log = h.log.borrow();
    let frame = log.frames.last().expect("one frame");
    assert_eq!(frame.highlight, Some(2));
    assert_eq!(frame.point_size, 4.0);
    assert_eq!(frame.camera, h.session.camera());
    assert_eq!(frame.screen_points.len(), 10);
    let expected = screen_of(&h.session, 2);
    assert!((frame.screen_points[2] - expected).hypot() < 1e-9);
}

#[test]
fn new_dataset_rebuilds_and_clears_hover() {
    let mut h = mount(tree_dataset());
    h.session.handle_pointer(PointerEvent::Move(screen_of(&h.session, 0)));
    assert!(h.session.tooltip().is_some());
    h.session.take_changes();

    h.session.set_dataset(Dataset::new(
        vec![
            PointRecord::new(100, 5.0, 5.0, "z"),
            PointRecord::new(101, 6.0, 7.0, "z"),
        ],
        BranchRecords::default(),
    ));
    assert!(h.session.tooltip().is_none());
    assert!(h.session.scene().highlight().is_none());
    assert_eq!(h.session.scene().geometry().len(), 2);
    assert_eq!(h.session.scene().geometry().segment_count(), 0);
    assert!(h.session.take_changes().contains(RebuildFlags::DATA));
}

#[test]
fn tiling_multiplies_loaded_data() {
    let h = mount_with(SessionConfig::default().with_tiling(2, 100.0), tree_dataset());
    assert_eq!(h.session.dataset().points.len(), 40);
    assert_eq!(h.session.scene().geometry().len(), 40);
    assert_eq!(h.session.scene().geometry().segment_count(), 52);
    assert!(h.session.scene().geometry().is_finite());
}

#[test]
fn columns_respect_length_policy() {
    let columns = PointColumns {
        id: vec![PointId::Int(1), PointId::Int(2), PointId::Int(3)],
        x: vec![0.0, 1.0, 2.0],
        y: vec![0.0, 1.0],
        group: vec!["a".into(), "b".into(), "c".into()],
    };

    let err = ViewportSession::mount_columns(
        SessionConfig::default(),
        columns.clone(),
        BranchRecords::default(),
        VIEWPORT,
        RecordingSurface::new(),
        SharedFrames::default(),
    )
    .unwrap_err();
    assert!(matches!(err, MountError::Data(_)));

    let session = ViewportSession::mount_columns(
        SessionConfig::default().with_length_policy(LengthPolicy::Truncate),
        columns,
        BranchRecords::default(),
        VIEWPORT,
        RecordingSurface::new(),
        SharedFrames::default(),
    )
    .unwrap();
    assert_eq!(session.dataset().points.len(), 2);
}
