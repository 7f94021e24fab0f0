// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use canopy_timing::Debouncer;
use kurbo::Size;

/// Tracks the viewport size, applying changes only after resizing settles.
#[derive(Clone, Debug)]
pub struct WindowSizeObserver {
    size: Size,
    pending: Debouncer<Size>,
}

impl WindowSizeObserver {
    /// Creates an observer reporting `size`, with a quiet window of
    /// `window_ms` milliseconds.
    #[must_use]
    pub fn new(size: Size, window_ms: u64) -> Self {
        Self {
            size,
            pending: Debouncer::new(window_ms),
        }
    }

    /// Last applied size.
    #[must_use]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Records a resize at time `now` (milliseconds).
    pub fn on_resize(&mut self, size: Size, now: u64) {
        self.pending.push(size, now);
    }

    /// Time at which a pending resize will apply.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.pending.deadline()
    }

    /// Applies a settled resize. Returns the new size when it differs from
    /// the current one.
    pub fn poll(&mut self, now: u64) -> Option<Size> {
        let size = self.pending.poll(now)?;
        if size == self.size {
            return None;
        }
        self.size = size;
        Some(size)
    }

    /// Drops any pending resize.
    pub fn cancel(&mut self) {
        self.pending.cancel();
    }
}
