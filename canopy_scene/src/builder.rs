// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Conversion from records into renderable geometry.

use alloc::vec::Vec;

use glam::Vec3;
use peniko::Color;

use crate::palette::{GroupColors, Palette};
use crate::record::{BranchRecords, Dataset, PointRecord};
use crate::scale::{LinearScale, extent};

/// Half-extents of the rendering space along each axis.
///
/// Data is mapped onto `[-half_width, half_width] × [-half_height, half_height]`.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct SceneExtents {
    /// Half-extent along x.
    pub half_width: f64,
    /// Half-extent along y.
    pub half_height: f64,
}

impl Default for SceneExtents {
    fn default() -> Self {
        Self {
            half_width: 400.0,
            half_height: 300.0,
        }
    }
}

/// Renderable geometry built from a [`Dataset`].
#[derive(Clone, Debug)]
pub struct SceneGeometry {
    /// Point positions in rendering space, one per input point and in input
    /// order. `z` is always zero.
    pub positions: Vec<Vec3>,
    /// Per-point colors, parallel to `positions`.
    pub colors: Vec<Color>,
    /// Branch segments as consecutive endpoint pairs: horizontal segments
    /// first, then vertical ones.
    pub segments: Vec<Vec3>,
    /// Data → rendering map along x.
    pub x_scale: LinearScale,
    /// Data → rendering map along y.
    pub y_scale: LinearScale,
    /// Group color assignment for this dataset.
    pub group_colors: GroupColors,
}

impl SceneGeometry {
    /// Number of points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Returns `true` when there are no points.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Number of branch segments.
    #[must_use]
    pub fn segment_count(&self) -> usize {
        self.segments.len() / 2
    }

    /// Returns `true` when every coordinate is finite.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.positions.iter().all(|p| p.is_finite()) && self.segments.iter().all(|p| p.is_finite())
    }
}

/// Builds [`SceneGeometry`] from datasets.
#[derive(Clone, Debug, Default)]
pub struct SceneBuilder {
    extents: SceneExtents,
    palette: Palette,
}

impl SceneBuilder {
    /// Creates a builder.
    #[must_use]
    pub fn new(extents: SceneExtents, palette: Palette) -> Self {
        Self { extents, palette }
    }

    /// Rendering half-extents.
    #[must_use]
    pub fn extents(&self) -> SceneExtents {
        self.extents
    }

    /// Palette used for groups.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Axis scales fitted to the observed extent of `points`.
    ///
    /// An empty point set produces degenerate scales that map everything to
    /// the origin.
    #[must_use]
    pub fn fit_scales(&self, points: &[PointRecord]) -> (LinearScale, LinearScale) {
        let x_domain = extent(points.iter().map(|p| p.x)).unwrap_or((0.0, 0.0));
        let y_domain = extent(points.iter().map(|p| p.y)).unwrap_or((0.0, 0.0));
        let SceneExtents {
            half_width,
            half_height,
        } = self.extents;
        (
            LinearScale::new(x_domain, (-half_width, half_width)),
            LinearScale::new(y_domain, (-half_height, half_height)),
        )
    }

    /// Builds geometry for `dataset`.
    #[must_use]
    pub fn build(&self, dataset: &Dataset) -> SceneGeometry {
        let (x_scale, y_scale) = self.fit_scales(&dataset.points);
        let mut group_colors = GroupColors::new(core::iter::empty(), self.palette.clone());

        let mut positions = Vec::with_capacity(dataset.points.len());
        let mut colors = Vec::with_capacity(dataset.points.len());
        for point in &dataset.points {
            positions.push(project(&x_scale, &y_scale, point.x, point.y));
            let color = match group_colors.assign(&point.group) {
                Some(index) => self.palette.color(index),
                None => crate::palette::UNGROUPED_COLOR,
            };
            colors.push(color);
        }

        let segments = branch_segments(&dataset.branches, &x_scale, &y_scale);

        SceneGeometry {
            positions,
            colors,
            segments,
            x_scale,
            y_scale,
            group_colors,
        }
    }
}

#[expect(
    clippy::cast_possible_truncation,
    reason = "rendering buffers are single precision"
)]
fn project(x_scale: &LinearScale, y_scale: &LinearScale, x: f64, y: f64) -> Vec3 {
    Vec3::new(x_scale.apply(x) as f32, y_scale.apply(y) as f32, 0.0)
}

fn branch_segments(
    branches: &BranchRecords,
    x_scale: &LinearScale,
    y_scale: &LinearScale,
) -> Vec<Vec3> {
    let mut segments = Vec::with_capacity(branches.len() * 2);
    for &[y, x0, x1] in &branches.horizontal {
        segments.push(project(x_scale, y_scale, x0, y));
        segments.push(project(x_scale, y_scale, x1, y));
    }
    for &[x, y0, y1] in &branches.vertical {
        segments.push(project(x_scale, y_scale, x, y0));
        segments.push(project(x_scale, y_scale, x, y1));
    }
    segments
}
