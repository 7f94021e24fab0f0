// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Vec2};

/// Tracks an in-progress pan drag and yields per-move pointer deltas.
#[derive(Clone, Copy, Debug, Default)]
pub struct PanDrag {
    last: Option<Point>,
}

impl PanDrag {
    /// Begins a drag at `pos`.
    pub fn start(&mut self, pos: Point) {
        self.last = Some(pos);
    }

    /// Records a new pointer position and returns the delta since the
    /// previous one, or `None` when no drag is active.
    pub fn update(&mut self, pos: Point) -> Option<Vec2> {
        let last = self.last.as_mut()?;
        let delta = pos - *last;
        *last = pos;
        Some(delta)
    }

    /// Ends the drag.
    pub fn end(&mut self) {
        self.last = None;
    }

    /// Returns `true` while a drag is active.
    #[must_use]
    pub fn is_dragging(&self) -> bool {
        self.last.is_some()
    }
}
