// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input records: points, branches, and the columnar point form.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

/// Identifier carried by a point. Fixtures use both numeric and string ids.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum PointId {
    /// Numeric id.
    Int(i64),
    /// Textual id.
    Text(String),
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Text(id) => f.write_str(id),
        }
    }
}

impl From<i64> for PointId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<i32> for PointId {
    fn from(id: i32) -> Self {
        Self::Int(id.into())
    }
}

impl From<&str> for PointId {
    fn from(id: &str) -> Self {
        Self::Text(id.into())
    }
}

impl From<String> for PointId {
    fn from(id: String) -> Self {
        Self::Text(id)
    }
}

/// A single data point.
///
/// A point's identity inside a scene is its index in the input sequence; the
/// id is only carried for display.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct PointRecord {
    /// Display id.
    pub id: PointId,
    /// Data-space x.
    pub x: f64,
    /// Data-space y.
    pub y: f64,
    /// Group label. The empty string means "ungrouped".
    #[cfg_attr(feature = "serde", serde(default))]
    pub group: String,
}

impl PointRecord {
    /// Creates a point record.
    pub fn new(id: impl Into<PointId>, x: f64, y: f64, group: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            x,
            y,
            group: group.into(),
        }
    }

    /// Returns `true` when the point carries the ungrouped sentinel.
    #[must_use]
    pub fn is_ungrouped(&self) -> bool {
        self.group.is_empty()
    }
}

/// Axis-aligned branch segments of a tree layout, in data space.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct BranchRecords {
    /// Horizontal segments as `[y, x0, x1]`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub horizontal: Vec<[f64; 3]>,
    /// Vertical segments as `[x, y0, y1]`.
    #[cfg_attr(feature = "serde", serde(default))]
    pub vertical: Vec<[f64; 3]>,
}

impl BranchRecords {
    /// Total number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.horizontal.len() + self.vertical.len()
    }

    /// Returns `true` when there are no segments.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.horizontal.is_empty() && self.vertical.is_empty()
    }
}

/// What to do when the parallel arrays of [`PointColumns`] differ in length.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum LengthPolicy {
    /// Reject mismatched columns with a [`LengthMismatch`] error.
    #[default]
    Enforce,
    /// Use the shortest column length and ignore trailing entries.
    Truncate,
}

/// Error returned when point columns have different lengths under
/// [`LengthPolicy::Enforce`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LengthMismatch {
    /// Length of the id column.
    pub ids: usize,
    /// Length of the x column.
    pub xs: usize,
    /// Length of the y column.
    pub ys: usize,
    /// Length of the group column.
    pub groups: usize,
}

impl fmt::Display for LengthMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "point columns differ in length (id: {}, x: {}, y: {}, group: {})",
            self.ids, self.xs, self.ys, self.groups
        )
    }
}

impl core::error::Error for LengthMismatch {}

/// Columnar point input: four parallel arrays.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct PointColumns {
    /// Ids.
    #[cfg_attr(feature = "serde", serde(default))]
    pub id: Vec<PointId>,
    /// X coordinates.
    #[cfg_attr(feature = "serde", serde(default))]
    pub x: Vec<f64>,
    /// Y coordinates.
    #[cfg_attr(feature = "serde", serde(default))]
    pub y: Vec<f64>,
    /// Group labels.
    #[cfg_attr(feature = "serde", serde(default))]
    pub group: Vec<String>,
}

impl PointColumns {
    /// Zips the columns into records according to `policy`.
    pub fn into_records(self, policy: LengthPolicy) -> Result<Vec<PointRecord>, LengthMismatch> {
        let lens = LengthMismatch {
            ids: self.id.len(),
            xs: self.x.len(),
            ys: self.y.len(),
            groups: self.group.len(),
        };
        let shortest = lens.ids.min(lens.xs).min(lens.ys).min(lens.groups);
        let longest = lens.ids.max(lens.xs).max(lens.ys).max(lens.groups);
        if shortest != longest && policy == LengthPolicy::Enforce {
            return Err(lens);
        }
        Ok(self
            .id
            .into_iter()
            .zip(self.x)
            .zip(self.y)
            .zip(self.group)
            .map(|(((id, x), y), group)| PointRecord { id, x, y, group })
            .collect())
    }
}

/// Points plus the branch segments that connect them.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct Dataset {
    /// Points, in rendering order.
    #[cfg_attr(feature = "serde", serde(default))]
    pub points: Vec<PointRecord>,
    /// Branch segments.
    #[cfg_attr(feature = "serde", serde(default))]
    pub branches: BranchRecords,
}

impl Dataset {
    /// Creates a dataset.
    #[must_use]
    pub fn new(points: Vec<PointRecord>, branches: BranchRecords) -> Self {
        Self { points, branches }
    }

    /// Repeats the dataset side by side to multiply its size.
    ///
    /// Each doubling appends a copy of everything accumulated so far, shifted
    /// along x by `max(x) + gap`. `doublings` rounds therefore yield `2^doublings`
    /// copies. Useful for load-testing renderers with real-looking data.
    #[must_use]
    pub fn tiled(mut self, doublings: u32, gap: f64) -> Self {
        for _ in 0..doublings {
            let Some(max_x) = self.points.iter().map(|p| p.x).reduce(f64::max) else {
                break;
            };
            let dx = max_x + gap;

            let shifted: Vec<PointRecord> = self
                .points
                .iter()
                .map(|p| PointRecord {
                    x: p.x + dx,
                    ..p.clone()
                })
                .collect();
            self.points.extend(shifted);

            let vertical: Vec<[f64; 3]> = self
                .branches
                .vertical
                .iter()
                .map(|&[x, y0, y1]| [x + dx, y0, y1])
                .collect();
            self.branches.vertical.extend(vertical);

            let horizontal: Vec<[f64; 3]> = self
                .branches
                .horizontal
                .iter()
                .map(|&[y, x0, x1]| [y, x0 + dx, x1 + dx])
                .collect();
            self.branches.horizontal.extend(horizontal);
        }
        self
    }
}
