// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Continuous linear scales.

/// A linear map from a data domain onto a rendering range.
///
/// Domain endpoints map exactly onto range endpoints. A degenerate domain
/// (`min == max`) maps every input onto the middle of the range rather than
/// dividing by zero.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl LinearScale {
    /// Creates a scale mapping `domain` onto `range`.
    #[must_use]
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> Self {
        Self { domain, range }
    }

    /// The data domain.
    #[must_use]
    pub fn domain(&self) -> (f64, f64) {
        self.domain
    }

    /// The output range.
    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Returns `true` when the domain has zero width.
    #[must_use]
    pub fn is_degenerate(&self) -> bool {
        self.domain.0 == self.domain.1
    }

    /// Maps a domain value onto the range.
    #[must_use]
    pub fn apply(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if self.is_degenerate() {
            return r0 + (r1 - r0) * 0.5;
        }
        let t = (value - d0) / (d1 - d0);
        // Interpolate from whichever end is nearer so both endpoints are exact.
        if t <= 0.5 {
            r0 + (r1 - r0) * t
        } else {
            r1 - (r1 - r0) * (1.0 - t)
        }
    }

    /// Maps a range value back onto the domain. Degenerate domains return
    /// their single value.
    #[must_use]
    pub fn invert(&self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        if self.is_degenerate() || r0 == r1 {
            return d0;
        }
        d0 + (d1 - d0) * ((value - r0) / (r1 - r0))
    }
}

/// Minimum and maximum of `values`, ignoring NaN. Returns `None` when no
/// comparable value is present.
pub fn extent(values: impl IntoIterator<Item = f64>) -> Option<(f64, f64)> {
    values
        .into_iter()
        .filter(|v| !v.is_nan())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}
