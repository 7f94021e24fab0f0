// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use canopy_camera::{CameraPosition, Projection};
use glam::{DVec2, DVec3};
use kurbo::{Point, Size};

/// Maps a pointer position in pixels to normalized device coordinates.
///
/// The viewport's top-left corner maps to `(-1, 1)` and its bottom-right
/// corner to `(1, -1)`. Positions outside the viewport map outside that
/// square.
#[must_use]
pub fn pointer_to_ndc(pointer: Point, viewport: Size) -> DVec2 {
    DVec2::new(
        pointer.x / viewport.width * 2.0 - 1.0,
        -(pointer.y / viewport.height) * 2.0 + 1.0,
    )
}

/// A half-line with a unit direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    /// Start of the ray.
    pub origin: DVec3,
    /// Unit direction.
    pub direction: DVec3,
}

impl Ray {
    /// Creates a ray, normalizing `direction`.
    #[must_use]
    pub fn new(origin: DVec3, direction: DVec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    /// The ray from `camera` through the normalized device position `ndc`.
    ///
    /// The camera looks down −z with `projection`'s field of view and aspect.
    #[must_use]
    pub fn from_camera(camera: CameraPosition, ndc: DVec2, projection: &Projection) -> Self {
        let tan = projection.half_fov_tan();
        Self::new(
            camera,
            DVec3::new(ndc.x * tan * projection.aspect(), ndc.y * tan, -1.0),
        )
    }

    /// Point at parameter `t` along the ray.
    #[must_use]
    pub fn at(&self, t: f64) -> DVec3 {
        self.origin + self.direction * t
    }

    /// Parameter of the projection of `point` onto the ray's line.
    ///
    /// Negative values lie behind the origin.
    #[must_use]
    pub fn parameter_of(&self, point: DVec3) -> f64 {
        (point - self.origin).dot(self.direction)
    }

    /// Closest point on the ray to `point`. Points behind the origin map to
    /// the origin.
    #[must_use]
    pub fn closest_point_to_point(&self, point: DVec3) -> DVec3 {
        let t = self.parameter_of(point);
        if t < 0.0 { self.origin } else { self.at(t) }
    }

    /// Squared distance from `point` to the ray.
    #[must_use]
    pub fn distance_sq_to_point(&self, point: DVec3) -> f64 {
        self.closest_point_to_point(point).distance_squared(point)
    }

    /// This ray expressed in the local space of an object scaled by `scale`.
    ///
    /// Every component of `scale` must be non-zero.
    #[must_use]
    pub fn to_local(&self, scale: DVec3) -> Self {
        Self::new(self.origin / scale, self.direction / scale)
    }
}
