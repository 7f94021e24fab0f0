// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Session configuration.

use canopy_camera::Projection;
use canopy_scene::{LengthPolicy, Palette, SceneExtents, SceneBuilder};
use kurbo::{Size, Vec2};
use peniko::Color;

use crate::controls::{SliderOrientation, SliderSpec};

/// Placement of the hover tooltip relative to the pointer.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TooltipLayout {
    /// Tooltip width in pixels.
    pub width: f64,
    /// Vertical distance below the pointer, in pixels.
    pub y_offset: f64,
}

impl Default for TooltipLayout {
    fn default() -> Self {
        Self {
            width: 120.0,
            y_offset: 30.0,
        }
    }
}

impl TooltipLayout {
    /// Offset from the pointer to the tooltip's top-left corner: centered
    /// horizontally, `y_offset` below.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        Vec2::new(-self.width / 2.0, self.y_offset)
    }
}

/// Everything a [`ViewportSession`](crate::ViewportSession) needs besides its
/// data, surface, and host.
///
/// Every field has a default; with the `serde` feature any subset of fields
/// can be given as JSON. Colors are CSS color strings there.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SessionConfig {
    /// Vertical field of view in degrees.
    pub fov_degrees: f64,
    /// Nearest camera distance (maximum zoom).
    pub near: f64,
    /// Farthest camera distance (minimum zoom, initial view).
    pub far: f64,
    /// Half-extents of the rendering space.
    pub extents: SceneExtents,
    /// Point marker size in pixels.
    pub point_size: f32,
    /// Highlight marker size in pixels.
    pub highlight_size: f32,
    /// Hover pickup radius in pixels.
    pub pickup_radius: f64,
    /// Clear color.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "css::color"))]
    pub background: Color,
    /// Branch line color.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "css::color"))]
    pub branch_color: Color,
    /// Group palette.
    #[cfg_attr(feature = "serde", serde(deserialize_with = "css::palette"))]
    pub palette: Palette,
    /// How columnar input with unequal column lengths is handled.
    pub length_policy: LengthPolicy,
    /// Horizontal axis slider.
    pub x_slider: SliderSpec,
    /// Vertical axis slider.
    pub y_slider: SliderSpec,
    /// Tooltip placement.
    pub tooltip: TooltipLayout,
    /// Quiet window before a viewport resize is applied, in milliseconds.
    pub resize_debounce_ms: u64,
    /// Number of times the dataset is doubled side by side when loaded.
    pub tile_doublings: u32,
    /// Horizontal gap added between tiled copies, in data units.
    pub tile_gap: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            fov_degrees: Projection::DEFAULT_FOV_DEGREES,
            near: Projection::DEFAULT_NEAR,
            far: Projection::DEFAULT_FAR,
            extents: SceneExtents::default(),
            point_size: 4.0,
            highlight_size: canopy_scene::Scene::DEFAULT_HIGHLIGHT_SIZE,
            pickup_radius: canopy_hit::PointPicker::DEFAULT_THRESHOLD,
            background: Color::from_rgb8(0xcc, 0xcc, 0xcc),
            branch_color: Color::BLACK,
            palette: Palette::default(),
            length_policy: LengthPolicy::default(),
            x_slider: SliderSpec::new(
                "Horizontal slider",
                SliderOrientation::Horizontal,
                1.0,
                800.0,
            ),
            y_slider: SliderSpec::new("Vertical slider", SliderOrientation::Vertical, 1.0, 100.0),
            tooltip: TooltipLayout::default(),
            resize_debounce_ms: canopy_timing::DEFAULT_WINDOW_MS,
            tile_doublings: 0,
            tile_gap: 100.0,
        }
    }
}

impl SessionConfig {
    /// Projection for a viewport of `viewport` pixels.
    #[must_use]
    pub fn projection(&self, viewport: Size) -> Projection {
        Projection::new(viewport)
            .with_fov_degrees(self.fov_degrees)
            .with_clip(self.near, self.far)
    }

    /// Scene builder for this configuration.
    #[must_use]
    pub fn scene_builder(&self) -> SceneBuilder {
        SceneBuilder::new(self.extents, self.palette.clone())
    }

    /// Sets the near and far camera distances.
    #[must_use]
    pub fn with_clip(mut self, near: f64, far: f64) -> Self {
        self.near = near;
        self.far = far;
        self
    }

    /// Sets the rendering half-extents.
    #[must_use]
    pub fn with_extents(mut self, extents: SceneExtents) -> Self {
        self.extents = extents;
        self
    }

    /// Sets the point and highlight marker sizes.
    #[must_use]
    pub fn with_marker_sizes(mut self, point_size: f32, highlight_size: f32) -> Self {
        self.point_size = point_size;
        self.highlight_size = highlight_size;
        self
    }

    /// Sets the hover pickup radius in pixels.
    #[must_use]
    pub fn with_pickup_radius(mut self, pixels: f64) -> Self {
        self.pickup_radius = pixels;
        self
    }

    /// Sets the background and branch colors.
    #[must_use]
    pub fn with_colors(mut self, background: Color, branch_color: Color) -> Self {
        self.background = background;
        self.branch_color = branch_color;
        self
    }

    /// Sets the group palette.
    #[must_use]
    pub fn with_palette(mut self, palette: Palette) -> Self {
        self.palette = palette;
        self
    }

    /// Sets the policy for columnar input.
    #[must_use]
    pub fn with_length_policy(mut self, policy: LengthPolicy) -> Self {
        self.length_policy = policy;
        self
    }

    /// Sets both axis sliders.
    #[must_use]
    pub fn with_sliders(mut self, x: SliderSpec, y: SliderSpec) -> Self {
        self.x_slider = x;
        self.y_slider = y;
        self
    }

    /// Sets the tooltip placement.
    #[must_use]
    pub fn with_tooltip(mut self, tooltip: TooltipLayout) -> Self {
        self.tooltip = tooltip;
        self
    }

    /// Sets the resize quiet window in milliseconds.
    #[must_use]
    pub fn with_resize_debounce_ms(mut self, window_ms: u64) -> Self {
        self.resize_debounce_ms = window_ms;
        self
    }

    /// Tiles loaded datasets `doublings` times, `gap` data units apart.
    #[must_use]
    pub fn with_tiling(mut self, doublings: u32, gap: f64) -> Self {
        self.tile_doublings = doublings;
        self.tile_gap = gap;
        self
    }
}

#[cfg(feature = "serde")]
mod css {
    use canopy_scene::Palette;
    use peniko::Color;
    use peniko::color::{Srgb, parse_color};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer};

    pub(super) fn color<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Color, D::Error> {
        let text = String::deserialize(deserializer)?;
        parse_color(&text)
            .map(|c| c.to_alpha_color::<Srgb>())
            .map_err(|err| D::Error::custom(format_args!("invalid color {text:?}: {err}")))
    }

    pub(super) fn palette<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Palette, D::Error> {
        let entries = Vec::<String>::deserialize(deserializer)?;
        Palette::from_css(&entries).map_err(D::Error::custom)
    }
}
