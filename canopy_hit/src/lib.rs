// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_hit --heading-base-level=0

//! Canopy Hit: pointer picking for point clouds seen through a perspective
//! camera.
//!
//! Picking runs in three steps:
//!
//! - [`pointer_to_ndc`] maps a pointer position in pixels to normalized
//!   device coordinates.
//! - [`Ray::from_camera`] casts a ray from the camera through that position.
//! - [`PointPicker`] reports the points whose distance to the ray is below
//!   its pickup radius, in buffer order, each with its distance to the ray.
//!   [`PointPicker::nearest`] selects the closest; ties keep the earlier
//!   point.
//!
//! The pickup radius is in world units. [`PointPicker::from_pixels`] derives
//! one from a pixel radius at the camera's current zoom.
//!
//! ```rust
//! use canopy_camera::{CameraPosition, Projection};
//! use canopy_hit::{PointPicker, Ray, pointer_to_ndc};
//! use glam::{DVec3, Vec3};
//! use kurbo::{Point, Size};
//!
//! let projection = Projection::new(Size::new(800.0, 600.0));
//! let camera = CameraPosition::new(0.0, 0.0, 100.0);
//! let positions = [Vec3::new(0.0, 0.0, 0.0), Vec3::new(40.0, 0.0, 0.0)];
//!
//! // Pointer over the second point.
//! let pointer = projection.world_to_screen(Point::new(40.0, 0.0), camera);
//! let ndc = pointer_to_ndc(pointer, projection.viewport());
//! let ray = Ray::from_camera(camera, ndc, &projection);
//! let picker = PointPicker::from_pixels(6.0, &projection, camera);
//! let hit = picker.nearest(&ray, &positions, DVec3::ONE).unwrap();
//! assert_eq!(hit.index, 1);
//! ```
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

mod picker;
mod ray;

pub use picker::{PointHit, PointPicker};
pub use ray::{Ray, pointer_to_ndc};
