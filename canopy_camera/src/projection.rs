// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Size, TranslateScale, Vec2};

use crate::CameraPosition;

/// Perspective projection parameters for a camera looking down −z at the
/// z = 0 plane.
///
/// The projection relates the camera's distance `d` from the plane to the
/// zoom *scale*, the number of screen pixels covered by one world unit:
///
/// - the visible height at distance `d` is `2·d·tan(fov/2)`;
/// - the scale is `viewport_height / visible_height`.
///
/// [`Projection::scale_from_distance`] and
/// [`Projection::distance_from_scale`] are exact inverses of each other.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    fov_degrees: f64,
    near: f64,
    far: f64,
    viewport: Size,
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(Size::new(800.0, 600.0))
    }
}

impl Projection {
    /// Default vertical field of view, in degrees.
    pub const DEFAULT_FOV_DEGREES: f64 = 75.0;
    /// Default near plane distance.
    pub const DEFAULT_NEAR: f64 = 0.1;
    /// Default far plane distance.
    pub const DEFAULT_FAR: f64 = 600.0;
    /// Smallest accepted near plane distance.
    pub const MIN_NEAR: f64 = 1e-3;

    /// Creates a projection for the given viewport with the default field of
    /// view and clip distances.
    ///
    /// Viewport dimensions are clamped to at least one pixel.
    #[must_use]
    pub fn new(viewport: Size) -> Self {
        Self {
            fov_degrees: Self::DEFAULT_FOV_DEGREES,
            near: Self::DEFAULT_NEAR,
            far: Self::DEFAULT_FAR,
            viewport: sanitize_viewport(viewport),
        }
    }

    /// Returns a copy with a different vertical field of view (degrees).
    ///
    /// The angle is clamped into `(0, 180)` degrees.
    #[must_use]
    pub fn with_fov_degrees(mut self, fov_degrees: f64) -> Self {
        self.fov_degrees = fov_degrees.clamp(1e-3, 180.0 - 1e-3);
        self
    }

    /// Returns a copy with different near/far distances.
    ///
    /// The pair is normalized so that `near <= far`. Non-finite distances
    /// fall back to the defaults and `near` is at least
    /// [`MIN_NEAR`](Self::MIN_NEAR), so the scale extent stays finite.
    #[must_use]
    pub fn with_clip(mut self, near: f64, far: f64) -> Self {
        let near = if near.is_finite() { near } else { Self::DEFAULT_NEAR };
        let far = if far.is_finite() { far } else { Self::DEFAULT_FAR };
        let (near, far) = if near <= far { (near, far) } else { (far, near) };
        self.near = near.max(Self::MIN_NEAR);
        self.far = far.max(self.near);
        self
    }

    /// Vertical field of view in degrees.
    #[must_use]
    pub fn fov_degrees(&self) -> f64 {
        self.fov_degrees
    }

    /// Near plane distance.
    #[must_use]
    pub fn near(&self) -> f64 {
        self.near
    }

    /// Far plane distance.
    #[must_use]
    pub fn far(&self) -> f64 {
        self.far
    }

    /// Current viewport size in pixels.
    #[must_use]
    pub fn viewport(&self) -> Size {
        self.viewport
    }

    /// Sets the viewport size in pixels. Dimensions are clamped to at least
    /// one pixel.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = sanitize_viewport(viewport);
    }

    /// Viewport aspect ratio (width / height).
    #[must_use]
    pub fn aspect(&self) -> f64 {
        self.viewport.width / self.viewport.height
    }

    /// Tangent of half the vertical field of view.
    #[must_use]
    pub fn half_fov_tan(&self) -> f64 {
        libm::tan((self.fov_degrees / 2.0).to_radians())
    }

    /// Zoom scale (pixels per world unit) for a camera at distance `distance`
    /// from the plane.
    #[must_use]
    pub fn scale_from_distance(&self, distance: f64) -> f64 {
        let visible_height = 2.0 * distance * self.half_fov_tan();
        self.viewport.height / visible_height
    }

    /// Camera distance from the plane that yields the zoom scale `scale`.
    #[must_use]
    pub fn distance_from_scale(&self, scale: f64) -> f64 {
        let visible_height = self.viewport.height / scale;
        visible_height / (2.0 * self.half_fov_tan())
    }

    /// Permitted zoom range `(min, max)`: the scales at the far and near
    /// plane respectively.
    #[must_use]
    pub fn scale_extent(&self) -> (f64, f64) {
        (
            self.scale_from_distance(self.far),
            self.scale_from_distance(self.near),
        )
    }

    /// Initial pan/zoom transform: world origin at the viewport center, zoomed
    /// fully out.
    #[must_use]
    pub fn initial_transform(&self) -> TranslateScale {
        TranslateScale::new(self.center().to_vec2(), self.scale_from_distance(self.far))
    }

    /// Converts a pan/zoom transform into a camera position.
    ///
    /// Horizontal pan follows the drag direction; vertical pan is inverted
    /// because screen Y grows downwards while world Y grows upwards.
    #[must_use]
    pub fn camera_from_transform(&self, transform: TranslateScale) -> CameraPosition {
        let k = transform.scale;
        let center = self.center();
        CameraPosition::new(
            -(transform.translation.x - center.x) / k,
            (transform.translation.y - center.y) / k,
            self.distance_from_scale(k),
        )
    }

    /// Converts a camera position back into a pan/zoom transform at scale `k`.
    ///
    /// This is the inverse of [`Projection::camera_from_transform`] for the
    /// `x`/`y` components; the camera's `z` is ignored in favor of `k`.
    #[must_use]
    pub fn transform_from_camera(&self, camera: CameraPosition, k: f64) -> TranslateScale {
        let center = self.center();
        TranslateScale::new(
            Vec2::new(-(camera.x * k) + center.x, camera.y * k + center.y),
            k,
        )
    }

    /// Projects a point of the z = 0 plane into screen pixels.
    #[must_use]
    pub fn world_to_screen(&self, world: Point, camera: CameraPosition) -> Point {
        let k = self.scale_from_distance(camera.z);
        let center = self.center();
        Point::new(
            (world.x - camera.x) * k + center.x,
            -(world.y - camera.y) * k + center.y,
        )
    }

    /// Maps a screen position onto the z = 0 plane.
    #[must_use]
    pub fn screen_to_world(&self, screen: Point, camera: CameraPosition) -> Point {
        let k = self.scale_from_distance(camera.z);
        let center = self.center();
        Point::new(
            (screen.x - center.x) / k + camera.x,
            -(screen.y - center.y) / k + camera.y,
        )
    }

    fn center(&self) -> Point {
        Point::new(self.viewport.width / 2.0, self.viewport.height / 2.0)
    }
}

fn sanitize_viewport(viewport: Size) -> Size {
    Size::new(viewport.width.max(1.0), viewport.height.max(1.0))
}
