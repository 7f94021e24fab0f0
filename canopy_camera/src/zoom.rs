// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, TranslateScale, Vec2};

use crate::drag::PanDrag;

/// Units of a wheel delta, as reported by the host.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DeltaMode {
    /// Delta is in pixels (trackpads, most mice in browsers).
    #[default]
    Pixel,
    /// Delta is in lines.
    Line,
    /// Delta is in pages.
    Page,
}

impl DeltaMode {
    fn factor(self) -> f64 {
        match self {
            Self::Pixel => 0.002,
            Self::Line => 0.05,
            Self::Page => 1.0,
        }
    }
}

/// A vertical wheel delta. Positive values scroll down (zoom out).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelDelta {
    /// Vertical delta in `mode` units.
    pub y: f64,
    /// Units of `y`.
    pub mode: DeltaMode,
    /// Whether the gesture is a pinch (reported as ctrl+wheel by browsers),
    /// which zooms ten times faster.
    pub pinch: bool,
}

impl WheelDelta {
    /// A pixel-mode wheel delta.
    #[must_use]
    pub fn pixels(y: f64) -> Self {
        Self {
            y,
            mode: DeltaMode::Pixel,
            pinch: false,
        }
    }

    fn exponent(&self) -> f64 {
        let pinch = if self.pinch { 10.0 } else { 1.0 };
        -self.y * self.mode.factor() * pinch
    }
}

/// Pan/zoom gesture state producing clamped [`TranslateScale`] transforms.
///
/// The transform maps world points (with Y pointing down) to screen pixels as
/// `p * k + t`. Every transform produced by this type has its scale `k`
/// clamped into the configured scale extent.
///
/// Gestures:
/// - wheel: zoom by `2^(-dy * f)` about the pointer;
/// - double click: zoom in (or out) by a factor of two about the pointer;
/// - drag: translate by the pointer movement.
#[derive(Clone, Debug)]
pub struct ZoomBehavior {
    transform: TranslateScale,
    min_scale: f64,
    max_scale: f64,
    drag: PanDrag,
}

impl ZoomBehavior {
    /// Creates a zoom behavior with the identity transform and the given
    /// scale extent. The extent is normalized so that `min <= max`.
    #[must_use]
    pub fn new(min_scale: f64, max_scale: f64) -> Self {
        let mut zoom = Self {
            transform: TranslateScale::new(Vec2::ZERO, 1.0),
            min_scale: 1.0,
            max_scale: 1.0,
            drag: PanDrag::default(),
        };
        zoom.set_scale_extent(min_scale, max_scale);
        zoom
    }

    /// Current transform.
    #[must_use]
    pub fn transform(&self) -> TranslateScale {
        self.transform
    }

    /// Current scale extent `(min, max)`.
    #[must_use]
    pub fn scale_extent(&self) -> (f64, f64) {
        (self.min_scale, self.max_scale)
    }

    /// Sets the permitted scale extent and re-clamps the current scale.
    pub fn set_scale_extent(&mut self, min_scale: f64, max_scale: f64) {
        let (min_scale, max_scale) = if min_scale <= max_scale {
            (min_scale, max_scale)
        } else {
            (max_scale, min_scale)
        };
        self.min_scale = min_scale;
        self.max_scale = max_scale;
        self.transform.scale = self.clamp_scale(self.transform.scale);
    }

    /// Replaces the transform, clamping its scale into the extent.
    pub fn set_transform(&mut self, transform: TranslateScale) -> TranslateScale {
        self.transform =
            TranslateScale::new(transform.translation, self.clamp_scale(transform.scale));
        self.transform
    }

    /// Applies a wheel gesture at `pointer`.
    pub fn wheel(&mut self, pointer: Point, delta: WheelDelta) -> TranslateScale {
        let factor = libm::pow(2.0, delta.exponent());
        self.scale_about(pointer, self.transform.scale * factor)
    }

    /// Applies a double click at `pointer`: zoom in by two, or out by two
    /// when `zoom_out` is set.
    pub fn double_click(&mut self, pointer: Point, zoom_out: bool) -> TranslateScale {
        let factor = if zoom_out { 0.5 } else { 2.0 };
        self.scale_about(pointer, self.transform.scale * factor)
    }

    /// Zooms to scale `k` keeping the world point under `anchor` fixed.
    pub fn scale_about(&mut self, anchor: Point, k: f64) -> TranslateScale {
        let k = self.clamp_scale(k);
        let t = self.transform;
        let world = (anchor.to_vec2() - t.translation) / t.scale;
        self.transform = TranslateScale::new(anchor.to_vec2() - world * k, k);
        self.transform
    }

    /// Translates the transform by `delta` screen pixels.
    pub fn pan_by(&mut self, delta: Vec2) -> TranslateScale {
        self.transform.translation += delta;
        self.transform
    }

    /// Begins a drag pan at `pointer`.
    pub fn pointer_down(&mut self, pointer: Point) {
        self.drag.start(pointer);
    }

    /// Continues a drag pan; returns the new transform when a drag is active.
    pub fn pointer_move(&mut self, pointer: Point) -> Option<TranslateScale> {
        let delta = self.drag.update(pointer)?;
        Some(self.pan_by(delta))
    }

    /// Ends a drag pan.
    pub fn pointer_up(&mut self) {
        self.drag.end();
    }

    /// Returns `true` while a drag pan is in progress.
    #[must_use]
    pub fn is_panning(&self) -> bool {
        self.drag.is_dragging()
    }

    fn clamp_scale(&self, k: f64) -> f64 {
        k.clamp(self.min_scale, self.max_scale)
    }
}
