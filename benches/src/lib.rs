// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared inputs for the Canopy benches.

use canopy_scene::{BranchRecords, Dataset, PointRecord};

/// A deterministic tree-like dataset of `len` points: leaves spread over a
/// few hundred columns, each linked to its column by a horizontal branch.
pub fn synthetic_dataset(len: usize) -> Dataset {
    let groups = ["alpha", "beta", "gamma", "delta", "epsilon", ""];
    let mut state = 0x2545_f491_4f6c_dd1d_u64;
    let mut points = Vec::with_capacity(len);
    let mut branches = BranchRecords::default();
    for i in 0..len {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let column = (i % 400) as f64;
        let x = column + (state % 1_000) as f64 / 1_000.0;
        let y = (i / 400) as f64;
        points.push(PointRecord::new(
            i64::try_from(i).unwrap_or(i64::MAX),
            x,
            y,
            groups[i % groups.len()],
        ));
        branches.horizontal.push([y, column, x]);
    }
    Dataset::new(points, branches)
}
