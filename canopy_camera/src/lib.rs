// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_camera --heading-base-level=0

//! Canopy Camera: perspective camera mapping for flat scatter scenes.
//!
//! Canopy renders a flat (z = 0) scene through a perspective camera that
//! looks straight down the −z axis. Pan and zoom gestures, however, are
//! naturally expressed as a 2D screen-space transform: a uniform scale `k`
//! plus a translation in pixels. This crate reconciles the two:
//!
//! - [`Projection`] converts between the camera's distance from the plane
//!   and the zoom scale (pixels per world unit), given the vertical field of
//!   view and the viewport height.
//! - [`Projection::camera_from_transform`] and
//!   [`Projection::transform_from_camera`] convert between a pan/zoom
//!   transform ([`kurbo::TranslateScale`]) and a 3D camera position.
//! - [`ZoomBehavior`] turns wheel, drag and double-click input into pan/zoom
//!   transforms, clamped to the zoom extent derived from the near/far planes.
//!
//! It does **not** own a scene or a renderer.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use canopy_camera::{Projection, ZoomBehavior};
//!
//! let projection = Projection::new(Size::new(800.0, 600.0));
//!
//! // Start zoomed fully out, with the data centered.
//! let (min_k, max_k) = projection.scale_extent();
//! let mut zoom = ZoomBehavior::new(min_k, max_k);
//! zoom.set_transform(projection.initial_transform());
//!
//! let camera = projection.camera_from_transform(zoom.transform());
//! assert!((camera.z - projection.far()).abs() < 1e-9);
//!
//! // Scroll in around the viewport center; the camera moves closer.
//! let t = zoom.wheel(Point::new(400.0, 300.0), canopy_camera::WheelDelta::pixels(-100.0));
//! let closer = projection.camera_from_transform(t);
//! assert!(closer.z < camera.z);
//! ```
//!
//! ## Coordinate conventions
//!
//! - Screen space has its origin at the top-left corner and Y grows
//!   downwards. World space has Y growing upwards, so the vertical pan
//!   component flips sign when converted to a camera position.
//! - The camera is never rotated; it always looks down −z.
//!
//! This crate is `no_std`.

#![no_std]

mod drag;
mod projection;
mod zoom;

pub use drag::PanDrag;
pub use projection::Projection;
pub use zoom::{DeltaMode, WheelDelta, ZoomBehavior};

/// A camera position in world space.
///
/// `x`/`y` locate the point of the z = 0 plane under the viewport center and
/// `z` is the camera's distance from that plane.
pub type CameraPosition = glam::DVec3;
