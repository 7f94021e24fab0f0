// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_timing --heading-base-level=0

//! Canopy Timing: a host-agnostic debounce timer.
//!
//! The host owns the clock. Every call takes `now` in milliseconds from any
//! monotonic origin the host chooses; the timer never reads time itself and
//! never sleeps. A host drives it by calling [`Debouncer::poll`] from its
//! event loop, or by scheduling a wakeup at [`Debouncer::deadline`].
//!
//! ```rust
//! use canopy_timing::Debouncer;
//!
//! let mut resize = Debouncer::new(100);
//! resize.push((800, 600), 0);
//! resize.push((1024, 768), 40);
//! assert_eq!(resize.poll(120), None);
//! assert_eq!(resize.poll(140), Some((1024, 768)));
//! assert_eq!(resize.poll(500), None);
//! ```
//!
//! This crate is `no_std` compatible.

#![no_std]

/// Default quiet window, in milliseconds.
pub const DEFAULT_WINDOW_MS: u64 = 100;

/// Coalesces bursts of values into the last one pushed.
///
/// A value becomes ready once no newer value has been pushed for the quiet
/// window. Each push restarts the window.
#[derive(Clone, Debug)]
pub struct Debouncer<T> {
    window: u64,
    pending: Option<(T, u64)>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_WINDOW_MS)
    }
}

impl<T> Debouncer<T> {
    /// Creates an idle debouncer with a quiet window of `window_ms`.
    #[must_use]
    pub const fn new(window_ms: u64) -> Self {
        Self {
            window: window_ms,
            pending: None,
        }
    }

    /// Quiet window in milliseconds.
    #[must_use]
    pub const fn window(&self) -> u64 {
        self.window
    }

    /// Replaces any pending value with `value` and restarts the window at
    /// `now`.
    pub fn push(&mut self, value: T, now: u64) {
        let deadline = now.saturating_add(self.window);
        self.pending = Some((value, deadline));
    }

    /// Time at which the pending value becomes ready, if any.
    #[must_use]
    pub fn deadline(&self) -> Option<u64> {
        self.pending.as_ref().map(|(_, deadline)| *deadline)
    }

    /// Returns `true` while a value is waiting.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Takes the pending value if its window elapsed by `now`.
    pub fn poll(&mut self, now: u64) -> Option<T> {
        if self.deadline().is_some_and(|deadline| now >= deadline) {
            self.cancel()
        } else {
            None
        }
    }

    /// Drops the pending value without firing. Returns it, if there was one.
    pub fn cancel(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }
}
