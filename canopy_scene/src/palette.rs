// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Group palettes and per-dataset group color assignment.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt;

use hashbrown::HashMap;
use peniko::Color;
use peniko::color::{Srgb, parse_color};

/// Errors produced while building a [`Palette`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PaletteError {
    /// The palette has no colors.
    Empty,
    /// An entry could not be parsed as a color.
    InvalidColor {
        /// Position of the entry in the input.
        index: usize,
        /// The rejected text.
        value: String,
    },
}

impl fmt::Display for PaletteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("palette must contain at least one color"),
            Self::InvalidColor { index, value } => {
                write!(f, "palette entry {index} is not a color: {value:?}")
            }
        }
    }
}

impl core::error::Error for PaletteError {}

/// An ordered, non-empty list of colors, reused cyclically.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Default for Palette {
    /// Ten categorical colors.
    fn default() -> Self {
        Self {
            colors: Vec::from([
                Color::from_rgba8(0x1f, 0x77, 0xb4, 0xff),
                Color::from_rgba8(0xff, 0x7f, 0x0e, 0xff),
                Color::from_rgba8(0x2c, 0xa0, 0x2c, 0xff),
                Color::from_rgba8(0xd6, 0x27, 0x28, 0xff),
                Color::from_rgba8(0x94, 0x67, 0xbd, 0xff),
                Color::from_rgba8(0x8c, 0x56, 0x4b, 0xff),
                Color::from_rgba8(0xe3, 0x77, 0xc2, 0xff),
                Color::from_rgba8(0x7f, 0x7f, 0x7f, 0xff),
                Color::from_rgba8(0xbc, 0xbd, 0x22, 0xff),
                Color::from_rgba8(0x17, 0xbe, 0xcf, 0xff),
            ]),
        }
    }
}

impl Palette {
    /// Creates a palette from colors.
    pub fn new(colors: Vec<Color>) -> Result<Self, PaletteError> {
        if colors.is_empty() {
            return Err(PaletteError::Empty);
        }
        Ok(Self { colors })
    }

    /// Parses a palette from CSS color strings such as `"#1f77b4"`.
    pub fn from_css<I, S>(values: I) -> Result<Self, PaletteError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let colors = values
            .into_iter()
            .enumerate()
            .map(|(index, value)| {
                let value = value.as_ref();
                parse_color(value)
                    .map(|c| c.to_alpha_color::<Srgb>())
                    .map_err(|_| PaletteError::InvalidColor {
                        index,
                        value: value.into(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(colors)
    }

    /// Number of colors.
    #[must_use]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// Always `false`; palettes are non-empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// Color for `index`, wrapping around the palette.
    #[must_use]
    pub fn color(&self, index: usize) -> Color {
        self.colors[index % self.colors.len()]
    }

    /// All colors in order.
    #[must_use]
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }
}

/// Color used for ungrouped points.
pub const UNGROUPED_COLOR: Color = Color::BLACK;

/// Group → palette index assignment for one dataset.
///
/// Groups are numbered in order of first appearance. The empty group is the
/// ungrouped sentinel; it takes no index and always renders as
/// [`UNGROUPED_COLOR`].
#[derive(Clone, Debug)]
pub struct GroupColors {
    indices: HashMap<String, usize>,
    palette: Palette,
}

impl GroupColors {
    /// Assigns indices to `groups` in first-seen order.
    pub fn new<'a>(groups: impl IntoIterator<Item = &'a str>, palette: Palette) -> Self {
        let mut colors = Self {
            indices: HashMap::new(),
            palette,
        };
        for group in groups {
            colors.assign(group);
        }
        colors
    }

    /// Returns the index of `group`, assigning the next one if it is new.
    /// The sentinel yields `None`.
    pub fn assign(&mut self, group: &str) -> Option<usize> {
        if group.is_empty() {
            return None;
        }
        if let Some(&index) = self.indices.get(group) {
            return Some(index);
        }
        let index = self.indices.len();
        self.indices.insert(group.into(), index);
        Some(index)
    }

    /// Index of `group`, if it is known and not the sentinel.
    #[must_use]
    pub fn index_of(&self, group: &str) -> Option<usize> {
        self.indices.get(group).copied()
    }

    /// Color of `group`. The sentinel and unknown groups are black.
    #[must_use]
    pub fn color_for(&self, group: &str) -> Color {
        self.index_of(group)
            .map_or(UNGROUPED_COLOR, |index| self.palette.color(index))
    }

    /// Number of distinct non-sentinel groups.
    #[must_use]
    pub fn group_count(&self) -> usize {
        self.indices.len()
    }

    /// The palette colors are drawn from.
    #[must_use]
    pub fn palette(&self) -> &Palette {
        &self.palette
    }
}
