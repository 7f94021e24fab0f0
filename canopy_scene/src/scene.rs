// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Live scene state: geometry, per-axis object scale, and the hover highlight.

use glam::{DVec3, Vec3};
use peniko::Color;

use crate::builder::SceneGeometry;

/// Enlarged marker drawn over the hovered point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Highlight {
    /// Index of the highlighted point in the input sequence.
    pub index: usize,
    /// Local position of the point (before object scale).
    pub position: Vec3,
    /// Color of the point.
    pub color: Color,
    /// Marker size in pixels.
    pub size: f32,
    /// Object scale the marker is drawn with, matching the points.
    pub scale: DVec3,
}

impl Highlight {
    /// Position after applying the object scale.
    #[must_use]
    pub fn world_position(&self) -> DVec3 {
        self.position.as_dvec3() * self.scale
    }
}

/// Geometry plus the mutable presentation state layered on it.
///
/// The object scale is the `(x, y, 1)` scale applied to both points and
/// branches when the axis multipliers change; geometry itself is never
/// rebuilt for a rescale. The highlight overlay has a single owner and is
/// replaced wholesale on every change.
#[derive(Clone, Debug)]
pub struct Scene {
    geometry: SceneGeometry,
    object_scale: DVec3,
    highlight: Option<Highlight>,
    highlight_size: f32,
}

impl Scene {
    /// Default highlight marker size, in pixels.
    pub const DEFAULT_HIGHLIGHT_SIZE: f32 = 12.0;

    /// Creates a scene with unit object scale and no highlight.
    #[must_use]
    pub fn new(geometry: SceneGeometry) -> Self {
        Self {
            geometry,
            object_scale: DVec3::ONE,
            highlight: None,
            highlight_size: Self::DEFAULT_HIGHLIGHT_SIZE,
        }
    }

    /// Sets the highlight marker size in pixels.
    #[must_use]
    pub fn with_highlight_size(mut self, size: f32) -> Self {
        self.highlight_size = size;
        self
    }

    /// Current geometry.
    #[must_use]
    pub fn geometry(&self) -> &SceneGeometry {
        &self.geometry
    }

    /// Replaces the geometry. Any highlight is dropped; the object scale is
    /// kept.
    pub fn set_geometry(&mut self, geometry: SceneGeometry) {
        self.geometry = geometry;
        self.highlight = None;
    }

    /// Object scale applied to points and branches.
    #[must_use]
    pub fn object_scale(&self) -> DVec3 {
        self.object_scale
    }

    /// Sets the per-axis object scale. A live highlight follows the new scale.
    pub fn set_object_scale(&mut self, x: f64, y: f64) {
        self.object_scale = DVec3::new(x, y, 1.0);
        if let Some(highlight) = &mut self.highlight {
            highlight.scale = self.object_scale;
        }
    }

    /// Position of point `index` after the object scale, if it exists.
    #[must_use]
    pub fn world_position(&self, index: usize) -> Option<DVec3> {
        self.geometry
            .positions
            .get(index)
            .map(|p| p.as_dvec3() * self.object_scale)
    }

    /// Current highlight, if any.
    #[must_use]
    pub fn highlight(&self) -> Option<&Highlight> {
        self.highlight.as_ref()
    }

    /// Highlights point `index`, replacing any previous highlight.
    ///
    /// Returns `None` (and clears the highlight) when `index` has no
    /// position or no color.
    pub fn set_highlight(&mut self, index: usize) -> Option<&Highlight> {
        let position = self.geometry.positions.get(index).copied();
        let color = self.geometry.colors.get(index).copied();
        self.highlight = position.zip(color).map(|(position, color)| Highlight {
            index,
            position,
            color,
            size: self.highlight_size,
            scale: self.object_scale,
        });
        self.highlight.as_ref()
    }

    /// Removes the highlight. Returns `true` if one was present.
    pub fn clear_highlight(&mut self) -> bool {
        self.highlight.take().is_some()
    }
}
