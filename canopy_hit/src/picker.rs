// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::cmp::Ordering;

use canopy_camera::{CameraPosition, Projection};
use glam::{DVec3, Vec3};
use smallvec::SmallVec;

use crate::Ray;

/// A point intersected by a pick ray.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointHit {
    /// Index of the point in the position buffer.
    pub index: usize,
    /// Distance from the point to the ray, in the object's local units.
    pub distance_to_ray: f64,
    /// Distance from the ray origin to the intersection, in world units.
    pub distance: f64,
    /// Intersection on the ray, in world space.
    pub point: DVec3,
}

impl PointHit {
    /// Compare two hits, preferring the one closer to the ray.
    pub fn cmp_distance_to_ray(&self, other: &Self) -> Ordering {
        self.distance_to_ray
            .partial_cmp(&other.distance_to_ray)
            .unwrap_or(Ordering::Equal)
    }
}

/// Hit-tests point clouds against rays with a fixed pickup radius.
///
/// The radius is in world units and is divided by the mean of the object
/// scale before testing in local space, so an object stretched along one
/// axis keeps a round-ish pickup area in world space. A point is hit when
/// its distance to the ray is strictly less than the local radius.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointPicker {
    threshold: f64,
}

impl Default for PointPicker {
    fn default() -> Self {
        Self::new(Self::DEFAULT_THRESHOLD)
    }
}

impl PointPicker {
    /// Default pickup radius.
    pub const DEFAULT_THRESHOLD: f64 = 6.0;

    /// Creates a picker with pickup radius `threshold` in world units.
    #[must_use]
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.max(0.0),
        }
    }

    /// Creates a picker whose radius covers `pixels` screen pixels for a
    /// camera at `camera`.
    ///
    /// The world-space radius shrinks as the camera moves towards the plane,
    /// so the on-screen pickup area stays constant across zoom levels.
    #[must_use]
    pub fn from_pixels(pixels: f64, projection: &Projection, camera: CameraPosition) -> Self {
        Self::new(pixels / projection.scale_from_distance(camera.z))
    }

    /// Pickup radius in world units.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// All points within the radius of `ray`, in buffer order.
    ///
    /// `positions` are local to an object scaled by `object_scale`. Points
    /// behind the ray origin are never reported.
    pub fn intersect(
        &self,
        ray: &Ray,
        positions: &[Vec3],
        object_scale: DVec3,
    ) -> SmallVec<[PointHit; 8]> {
        self.hits(ray, positions, object_scale).collect()
    }

    /// The hit closest to `ray`.
    ///
    /// Equal distances keep the earlier point in buffer order.
    pub fn nearest(&self, ray: &Ray, positions: &[Vec3], object_scale: DVec3) -> Option<PointHit> {
        self.hits(ray, positions, object_scale)
            .fold(None, |best: Option<PointHit>, hit| match best {
                Some(best) if hit.cmp_distance_to_ray(&best) != Ordering::Less => Some(best),
                _ => Some(hit),
            })
    }

    fn hits(
        &self,
        ray: &Ray,
        positions: &[Vec3],
        object_scale: DVec3,
    ) -> impl Iterator<Item = PointHit> {
        let local_ray = ray.to_local(object_scale);
        let mean_scale = (object_scale.x + object_scale.y + object_scale.z) / 3.0;
        let local_threshold = self.threshold / mean_scale;
        // A NaN threshold collapses to zero.
        let local_threshold_sq = (local_threshold * local_threshold).max(0.0);

        positions.iter().enumerate().filter_map(move |(index, position)| {
            let position = position.as_dvec3();
            let t = local_ray.parameter_of(position);
            // NaN counts as a miss.
            if t.is_nan() || t < 0.0 {
                return None;
            }
            let on_ray = local_ray.at(t);
            let distance_sq = on_ray.distance_squared(position);
            if distance_sq.is_nan() || distance_sq >= local_threshold_sq {
                return None;
            }
            let point = on_ray * object_scale;
            Some(PointHit {
                index,
                distance_to_ray: on_ray.distance(position),
                distance: ray.origin.distance(point),
                point,
            })
        })
    }
}
