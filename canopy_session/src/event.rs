// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use canopy_camera::WheelDelta;
use kurbo::Point;

/// Pointer input in viewport pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    /// The pointer moved.
    Move(Point),
    /// The pointer left the viewport.
    Leave,
    /// A button was pressed.
    Down(Point),
    /// A button was released.
    Up(Point),
    /// The wheel turned.
    Wheel {
        /// Pointer position.
        position: Point,
        /// Wheel movement.
        delta: WheelDelta,
    },
    /// A double click.
    DoubleClick {
        /// Pointer position.
        position: Point,
        /// Zoom out instead of in (shift held).
        zoom_out: bool,
    },
}
