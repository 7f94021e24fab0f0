// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=canopy_session --heading-base-level=0

//! Canopy Session: an interactive scatter viewport, minus the windowing.
//!
//! A [`ViewportSession`] ties the Canopy building blocks together for one
//! viewport:
//!
//! - the camera ([`canopy_camera`]): pan and zoom gestures drive a
//!   perspective camera over the data plane;
//! - the scene ([`canopy_scene`]): points and branches, rescaled per axis by
//!   two sliders ([`ControlPanel`]);
//! - hover ([`canopy_hit`]): every pointer move hit-tests the points and
//!   updates the highlight and [`Tooltip`];
//! - resizing: a [`WindowSizeObserver`] applies viewport changes once they
//!   settle;
//! - rendering: a [`RenderTask`] keeps one frame requested from the
//!   [`FrameHost`] and draws each frame on a [`RenderSurface`].
//!
//! The host supplies the surface and the frame scheduler, forwards input,
//! and owns the clock. Dropping the session cancels the frame loop and any
//! pending resize, and releases the surface.
//!
//! ```rust
//! use canopy_scene::{BranchRecords, Dataset, PointRecord};
//! use canopy_session::{
//!     Axis, Frame, ManualFrames, PointerEvent, RenderSurface, SessionConfig, ViewportSession,
//! };
//! use kurbo::{Point, Size};
//!
//! #[derive(Default)]
//! struct Counter(u32);
//!
//! impl RenderSurface for Counter {
//!     fn is_available(&self) -> bool { true }
//!     fn resize(&mut self, _: Size) {}
//!     fn render(&mut self, _: &Frame<'_>) { self.0 += 1; }
//!     fn release(&mut self) {}
//! }
//!
//! let data = Dataset::new(
//!     vec![PointRecord::new(1, 0.0, 0.0, "a"), PointRecord::new(2, 1.0, 1.0, "")],
//!     BranchRecords::default(),
//! );
//! let mut session = ViewportSession::mount(
//!     SessionConfig::default(),
//!     data,
//!     Size::new(800.0, 600.0),
//!     Counter::default(),
//!     ManualFrames::default(),
//! )
//! .unwrap();
//!
//! // The viewport center looks at the middle of the data, where no point is.
//! session.handle_pointer(PointerEvent::Move(Point::new(400.0, 300.0)));
//! assert!(session.tooltip().is_none());
//!
//! session.set_slider(Axis::X, 100.0);
//! assert_eq!(session.multipliers().x, 2.0);
//!
//! assert!(session.on_frame());
//! assert_eq!(session.surface().0, 1);
//! ```
//!
//! ## Features
//!
//! - `serde`: deserialize [`SessionConfig`] and the scene records from JSON.

mod config;
mod controls;
mod event;
mod host;
mod observer;
mod session;
mod tooltip;

pub use config::{SessionConfig, TooltipLayout};
pub use controls::{Axis, AxisMultipliers, AxisSlider, ControlPanel, SliderOrientation, SliderSpec};
pub use event::PointerEvent;
pub use host::{
    DEFAULT_FALLBACK_MESSAGE, Frame, FrameHost, FrameRequest, ManualFrames, RenderSurface,
    RenderTask,
};
pub use observer::WindowSizeObserver;
pub use session::{MountError, RebuildFlags, ViewportSession};
pub use tooltip::Tooltip;
