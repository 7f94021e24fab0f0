// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use canopy_scene::{PointId, PointRecord};
use kurbo::Point;
use peniko::Color;

use crate::config::TooltipLayout;

/// Hover details for the highlighted point.
#[derive(Clone, Debug, PartialEq)]
pub struct Tooltip {
    /// Top-left corner in viewport pixels.
    pub anchor: Point,
    /// Pointer position the tooltip follows.
    pub pointer: Point,
    /// Id of the point.
    pub id: PointId,
    /// Group of the point; empty for ungrouped points.
    pub group: String,
    /// Background of the group label: the group color.
    pub swatch: Color,
    /// Text color of the group label, chosen to contrast with `swatch`.
    pub text_color: Color,
}

impl Tooltip {
    /// Builds the tooltip for `record`, drawn in `color`, hovered at `pointer`.
    ///
    /// Ungrouped points get a black swatch with white text; grouped points
    /// get their group color with black text.
    #[must_use]
    pub fn new(record: &PointRecord, color: Color, pointer: Point, layout: &TooltipLayout) -> Self {
        let (swatch, text_color) = if record.is_ungrouped() {
            (Color::BLACK, Color::WHITE)
        } else {
            (color, Color::BLACK)
        };
        Self {
            anchor: pointer + layout.offset(),
            pointer,
            id: record.id.clone(),
            group: record.group.clone(),
            swatch,
            text_color,
        }
    }

    /// Text lines: the id, then the group.
    #[must_use]
    pub fn lines(&self) -> [String; 2] {
        [format!("ID: {}", self.id), format!("Group: {}", self.group)]
    }
}
