// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_scene --heading-base-level=0

//! Canopy Scene: from point and branch records to renderable geometry.
//!
//! Input is a [`Dataset`]: a sequence of [`PointRecord`]s (id, x, y, group)
//! and the axis-aligned [`BranchRecords`] of a tree layout. A
//! [`SceneBuilder`] fits one [`LinearScale`] per axis to the observed data
//! extent, maps every point and branch endpoint into rendering space, and
//! assigns each point a color by group.
//!
//! - Point order is preserved: vertex `i` of the geometry is input point `i`.
//!   Hit-testing relies on this to map a vertex back to its record.
//! - Groups are numbered in first-seen order once per dataset ([`GroupColors`])
//!   and colored from a cyclic [`Palette`]; the empty group renders black.
//! - A zero-width data axis maps to the middle of the rendering range instead
//!   of producing NaN.
//!
//! A [`Scene`] wraps built geometry with the presentation state that changes
//! without a rebuild: the per-axis object scale and the hover [`Highlight`].
//!
//! ```rust
//! use canopy_scene::{BranchRecords, Dataset, PointRecord, Scene, SceneBuilder};
//!
//! let data = Dataset::new(
//!     vec![
//!         PointRecord::new(0, 0.0, 0.0, "leaf"),
//!         PointRecord::new(1, 2.0, 1.0, ""),
//!     ],
//!     BranchRecords {
//!         horizontal: vec![[1.0, 0.0, 2.0]],
//!         vertical: vec![],
//!     },
//! );
//! let mut scene = Scene::new(SceneBuilder::default().build(&data));
//! assert_eq!(scene.geometry().len(), 2);
//! assert_eq!(scene.geometry().segment_count(), 1);
//!
//! scene.set_object_scale(2.0, 1.0);
//! let highlight = scene.set_highlight(1).unwrap();
//! assert_eq!(highlight.world_position().x, 800.0);
//! ```
//!
//! ## Features
//!
//! - `serde`: deserialize records, branches, columns, and extents from the
//!   JSON fixture shapes.
//!
//! This crate is `no_std` compatible (with `alloc`).

#![no_std]

extern crate alloc;

mod builder;
mod palette;
mod record;
mod scale;
mod scene;

pub use builder::{SceneBuilder, SceneExtents, SceneGeometry};
pub use palette::{GroupColors, Palette, PaletteError, UNGROUPED_COLOR};
pub use record::{
    BranchRecords, Dataset, LengthMismatch, LengthPolicy, PointColumns, PointId, PointRecord,
};
pub use scale::{LinearScale, extent};
pub use scene::{Highlight, Scene};
