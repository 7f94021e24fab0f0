// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis sliders and the control panel state.

use crate::config::SessionConfig;

/// A data axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal.
    X,
    /// Vertical.
    Y,
}

/// How a slider is laid out on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SliderOrientation {
    /// Along the bottom edge.
    Horizontal,
    /// Along the left edge.
    Vertical,
}

/// Static description of a slider.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize))]
pub struct SliderSpec {
    /// Label shown next to the slider.
    pub title: String,
    /// Layout.
    pub orientation: SliderOrientation,
    /// Smallest value.
    pub min: f64,
    /// Largest value.
    pub max: f64,
    /// Initial value; also the value at which the multiplier is 1.
    #[cfg_attr(feature = "serde", serde(default = "SliderSpec::default_value"))]
    pub default: f64,
}

impl SliderSpec {
    /// Value at which a slider's multiplier is 1, unless overridden.
    pub const DEFAULT_VALUE: f64 = 50.0;
    /// Smallest value any slider can take. Multipliers stay positive.
    pub const MIN_VALUE: f64 = 1e-3;

    /// Creates a spec with the default value of 50.
    #[must_use]
    pub fn new(title: impl Into<String>, orientation: SliderOrientation, min: f64, max: f64) -> Self {
        Self {
            title: title.into(),
            orientation,
            min,
            max,
            default: Self::DEFAULT_VALUE,
        }
    }

    /// Returns a copy with a different default value.
    #[must_use]
    pub fn with_default(mut self, default: f64) -> Self {
        self.default = default;
        self
    }

    #[cfg(feature = "serde")]
    fn default_value() -> f64 {
        Self::DEFAULT_VALUE
    }
}

/// A slider controlling one axis multiplier.
#[derive(Clone, Debug, PartialEq)]
pub struct AxisSlider {
    spec: SliderSpec,
    value: f64,
}

impl AxisSlider {
    /// Creates a slider at its default value.
    ///
    /// The range is floored at [`SliderSpec::MIN_VALUE`] and kept finite,
    /// and the default is clamped into it. A NaN default becomes
    /// [`SliderSpec::DEFAULT_VALUE`].
    #[must_use]
    pub fn new(spec: SliderSpec) -> Self {
        let (min, max) = ordered(positive(spec.min), positive(spec.max));
        let default = if spec.default.is_nan() {
            SliderSpec::DEFAULT_VALUE
        } else {
            spec.default
        };
        let spec = SliderSpec {
            min,
            max,
            default: default.clamp(min, max),
            ..spec
        };
        Self {
            value: spec.default,
            spec,
        }
    }

    /// The slider description.
    #[must_use]
    pub fn spec(&self) -> &SliderSpec {
        &self.spec
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Sets the value, clamped into the slider range. NaN is ignored.
    ///
    /// Returns `true` if the value changed.
    pub fn set_value(&mut self, value: f64) -> bool {
        if value.is_nan() {
            return false;
        }
        let value = value.clamp(self.spec.min, self.spec.max);
        let changed = value != self.value;
        self.value = value;
        changed
    }

    /// Returns to the default value. Returns `true` if the value changed.
    pub fn reset(&mut self) -> bool {
        self.set_value(self.spec.default)
    }

    /// Scale factor for the axis: `value / default`.
    #[must_use]
    pub fn multiplier(&self) -> f64 {
        self.value / self.spec.default
    }
}

fn positive(value: f64) -> f64 {
    value.clamp(SliderSpec::MIN_VALUE, f64::MAX / 2.0)
}

fn ordered(a: f64, b: f64) -> (f64, f64) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Per-axis scale factors applied to the scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AxisMultipliers {
    /// Horizontal factor.
    pub x: f64,
    /// Vertical factor.
    pub y: f64,
}

impl Default for AxisMultipliers {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

/// The horizontal and vertical axis sliders.
#[derive(Clone, Debug, PartialEq)]
pub struct ControlPanel {
    /// Horizontal axis slider.
    pub x: AxisSlider,
    /// Vertical axis slider.
    pub y: AxisSlider,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self::new(&SessionConfig::default())
    }
}

impl ControlPanel {
    /// Creates sliders from the configured specs.
    #[must_use]
    pub fn new(config: &SessionConfig) -> Self {
        Self {
            x: AxisSlider::new(config.x_slider.clone()),
            y: AxisSlider::new(config.y_slider.clone()),
        }
    }

    /// The slider for `axis`.
    #[must_use]
    pub fn slider(&self, axis: Axis) -> &AxisSlider {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
        }
    }

    /// The slider for `axis`, mutably.
    pub fn slider_mut(&mut self, axis: Axis) -> &mut AxisSlider {
        match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
        }
    }

    /// Current multipliers.
    #[must_use]
    pub fn multipliers(&self) -> AxisMultipliers {
        AxisMultipliers {
            x: self.x.multiplier(),
            y: self.y.multiplier(),
        }
    }
}
