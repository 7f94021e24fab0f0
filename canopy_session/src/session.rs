// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::fmt;

use canopy_camera::{CameraPosition, Projection, ZoomBehavior};
use canopy_hit::{PointPicker, Ray, pointer_to_ndc};
use canopy_scene::{BranchRecords, Dataset, LengthMismatch, PointColumns, Scene, SceneBuilder};
use kurbo::{Point, Size, TranslateScale};
use tracing::{debug, info, warn};

use crate::config::SessionConfig;
use crate::controls::{Axis, AxisMultipliers, ControlPanel};
use crate::event::PointerEvent;
use crate::host::{Frame, FrameHost, RenderSurface, RenderTask};
use crate::observer::WindowSizeObserver;
use crate::tooltip::Tooltip;

bitflags::bitflags! {
    /// What changed since the host last asked.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct RebuildFlags: u8 {
        /// Scene geometry was rebuilt.
        const DATA      = 0b0000_0001;
        /// The viewport size changed.
        const VIEWPORT  = 0b0000_0010;
        /// An axis multiplier changed.
        const AXES      = 0b0000_0100;
        /// The camera moved.
        const CAMERA    = 0b0000_1000;
        /// The highlight or tooltip changed.
        const HIGHLIGHT = 0b0001_0000;
    }
}

impl Default for RebuildFlags {
    fn default() -> Self {
        Self::empty()
    }
}

/// Why a session could not be mounted.
#[derive(Clone, Debug, PartialEq)]
pub enum MountError {
    /// The surface cannot render. The host should show `message` instead of
    /// the viewport; no frame loop was started.
    SurfaceUnavailable {
        /// Fallback text from the surface.
        message: String,
    },
    /// Columnar input had unequal column lengths.
    Data(LengthMismatch),
}

impl fmt::Display for MountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SurfaceUnavailable { message } => write!(f, "surface unavailable: {message}"),
            Self::Data(err) => write!(f, "invalid point data: {err}"),
        }
    }
}

impl core::error::Error for MountError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::SurfaceUnavailable { .. } => None,
            Self::Data(err) => Some(err),
        }
    }
}

impl From<LengthMismatch> for MountError {
    fn from(err: LengthMismatch) -> Self {
        Self::Data(err)
    }
}

/// An interactive scatter viewport bound to one surface and one frame host.
///
/// The session owns every piece of viewport state: camera, scene, hover
/// state, axis sliders, pending resize, and the render loop. Hosts feed it
/// pointer events, slider changes, resizes, clock ticks, and frame
/// callbacks. Dropping the session tears it down.
///
/// Camera and transform stay in lockstep: every pan/zoom transform change
/// recomputes the camera position through the [`Projection`].
pub struct ViewportSession<S: RenderSurface, H: FrameHost> {
    config: SessionConfig,
    builder: SceneBuilder,
    dataset: Dataset,
    projection: Projection,
    zoom: ZoomBehavior,
    camera: CameraPosition,
    scene: Scene,
    tooltip: Option<Tooltip>,
    controls: ControlPanel,
    multipliers: AxisMultipliers,
    window: WindowSizeObserver,
    task: RenderTask,
    surface: S,
    host: H,
    changes: RebuildFlags,
    torn_down: bool,
}

impl<S: RenderSurface, H: FrameHost> fmt::Debug for ViewportSession<S, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ViewportSession")
            .field("viewport", &self.projection.viewport())
            .field("points", &self.dataset.points.len())
            .field("camera", &self.camera)
            .field("transform", &self.zoom.transform())
            .field("multipliers", &self.multipliers)
            .field("highlight", &self.scene.highlight().map(|h| h.index))
            .field("running", &self.task.is_running())
            .field("torn_down", &self.torn_down)
            .finish_non_exhaustive()
    }
}

impl<S: RenderSurface, H: FrameHost> ViewportSession<S, H> {
    /// Mounts a session showing `dataset` in a `viewport`-sized surface.
    ///
    /// Builds the scene, zooms fully out with the data centered, and requests
    /// the first frame. An unavailable surface is terminal: the error
    /// carries the fallback message and no frame is requested.
    pub fn mount(
        config: SessionConfig,
        dataset: Dataset,
        viewport: Size,
        mut surface: S,
        mut host: H,
    ) -> Result<Self, MountError> {
        if !surface.is_available() {
            let message = surface.fallback_message();
            warn!(%message, "render surface unavailable; showing fallback");
            return Err(MountError::SurfaceUnavailable { message });
        }

        let dataset = dataset.tiled(config.tile_doublings, config.tile_gap);
        let projection = config.projection(viewport);
        let builder = config.scene_builder();
        let controls = ControlPanel::new(&config);
        let multipliers = controls.multipliers();

        let mut scene =
            Scene::new(builder.build(&dataset)).with_highlight_size(config.highlight_size);
        scene.set_object_scale(multipliers.x, multipliers.y);

        let (min_scale, max_scale) = projection.scale_extent();
        let zoom = ZoomBehavior::new(min_scale, max_scale);
        surface.resize(projection.viewport());

        let mut task = RenderTask::default();
        task.start(&mut host);

        info!(
            points = scene.geometry().len(),
            segments = scene.geometry().segment_count(),
            groups = scene.geometry().group_colors.group_count(),
            width = viewport.width,
            height = viewport.height,
            "mounted viewport session"
        );

        let mut session = Self {
            window: WindowSizeObserver::new(projection.viewport(), config.resize_debounce_ms),
            camera: CameraPosition::ZERO,
            config,
            builder,
            dataset,
            projection,
            zoom,
            scene,
            tooltip: None,
            controls,
            multipliers,
            task,
            surface,
            host,
            changes: RebuildFlags::DATA | RebuildFlags::VIEWPORT,
            torn_down: false,
        };
        session.apply_transform(session.projection.initial_transform());
        Ok(session)
    }

    /// Like [`mount`](Self::mount), from columnar point data checked against
    /// the configured [`LengthPolicy`](canopy_scene::LengthPolicy).
    pub fn mount_columns(
        config: SessionConfig,
        columns: PointColumns,
        branches: BranchRecords,
        viewport: Size,
        surface: S,
        host: H,
    ) -> Result<Self, MountError> {
        let points = columns.into_records(config.length_policy)?;
        Self::mount(
            config,
            Dataset::new(points, branches),
            viewport,
            surface,
            host,
        )
    }

    /// Feeds one pointer event.
    ///
    /// Moves pan while a button is held and hit-test on every call. Wheel and
    /// double click zoom about the pointer.
    pub fn handle_pointer(&mut self, event: PointerEvent) {
        if self.torn_down {
            return;
        }
        match event {
            PointerEvent::Move(position) => {
                if let Some(transform) = self.zoom.pointer_move(position) {
                    self.sync_camera(transform);
                }
                self.hover(position);
            }
            PointerEvent::Leave => self.clear_hover(),
            PointerEvent::Down(position) => self.zoom.pointer_down(position),
            PointerEvent::Up(_) => self.zoom.pointer_up(),
            PointerEvent::Wheel { position, delta } => {
                let transform = self.zoom.wheel(position, delta);
                self.sync_camera(transform);
            }
            PointerEvent::DoubleClick { position, zoom_out } => {
                let transform = self.zoom.double_click(position, zoom_out);
                self.sync_camera(transform);
            }
        }
    }

    /// Moves `axis`'s slider to `value` (clamped) and rescales that axis.
    ///
    /// The camera follows the data: whatever data coordinate was centered
    /// stays centered, at the same zoom.
    pub fn set_slider(&mut self, axis: Axis, value: f64) {
        if self.torn_down {
            return;
        }
        if self.controls.slider_mut(axis).set_value(value) {
            self.apply_multipliers();
        }
    }

    /// Returns `axis`'s slider to its default and rescales that axis.
    pub fn reset_slider(&mut self, axis: Axis) {
        if self.torn_down {
            return;
        }
        if self.controls.slider_mut(axis).reset() {
            self.apply_multipliers();
        }
    }

    /// Returns to the initial view: data centered, zoomed fully out. Axis
    /// multipliers are kept.
    pub fn reset_camera(&mut self) {
        if self.torn_down {
            return;
        }
        info!("camera reset");
        self.apply_transform(self.projection.initial_transform());
    }

    /// Replaces the data. Tiling from the configuration applies; the
    /// highlight and tooltip are cleared.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        if self.torn_down {
            return;
        }
        self.dataset = dataset.tiled(self.config.tile_doublings, self.config.tile_gap);
        self.rebuild_scene();
        info!(
            points = self.scene.geometry().len(),
            segments = self.scene.geometry().segment_count(),
            "dataset replaced"
        );
    }

    /// Records a viewport resize at time `now` (milliseconds). The resize
    /// applies on a later [`tick`](Self::tick) once resizing settles.
    pub fn on_resize(&mut self, size: Size, now: u64) {
        if self.torn_down {
            return;
        }
        self.window.on_resize(size, now);
    }

    /// Advances the session clock. Returns `true` if a pending resize was
    /// applied.
    ///
    /// Applying a resize refits the projection, rebuilds the scene, and
    /// returns to the initial view.
    pub fn tick(&mut self, now: u64) -> bool {
        if self.torn_down {
            return false;
        }
        let Some(size) = self.window.poll(now) else {
            return false;
        };
        self.projection.set_viewport(size);
        let (min_scale, max_scale) = self.projection.scale_extent();
        self.zoom.set_scale_extent(min_scale, max_scale);
        self.surface.resize(self.projection.viewport());
        self.rebuild_scene();
        self.apply_transform(self.projection.initial_transform());
        self.changes |= RebuildFlags::VIEWPORT;
        info!(width = size.width, height = size.height, "viewport resized");
        true
    }

    /// Renders the current frame and requests the next one.
    ///
    /// Returns `false`, rendering nothing, once the loop is stopped.
    pub fn on_frame(&mut self) -> bool {
        if !self.task.is_running() {
            return false;
        }
        let frame = Frame {
            scene: &self.scene,
            camera: self.camera,
            projection: &self.projection,
            background: self.config.background,
            branch_color: self.config.branch_color,
            point_size: self.config.point_size,
        };
        self.surface.render(&frame);
        self.task.on_frame(&mut self.host)
    }

    /// Stops the session: cancels the outstanding frame and any pending
    /// resize, then releases the surface. Idempotent; also runs on drop.
    pub fn teardown(&mut self) {
        if self.torn_down {
            return;
        }
        self.torn_down = true;
        self.task.stop(&mut self.host);
        self.window.cancel();
        self.surface.release();
        info!(frames = self.task.frames(), "viewport session torn down");
    }

    /// Returns and clears the accumulated change flags.
    pub fn take_changes(&mut self) -> RebuildFlags {
        core::mem::take(&mut self.changes)
    }

    /// Current camera position.
    #[must_use]
    pub fn camera(&self) -> CameraPosition {
        self.camera
    }

    /// Current pan/zoom transform.
    #[must_use]
    pub fn transform(&self) -> TranslateScale {
        self.zoom.transform()
    }

    /// Current projection.
    #[must_use]
    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    /// Current scene.
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Loaded data, after tiling.
    #[must_use]
    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Tooltip for the hovered point, if any.
    #[must_use]
    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.tooltip.as_ref()
    }

    /// Slider state.
    #[must_use]
    pub fn controls(&self) -> &ControlPanel {
        &self.controls
    }

    /// Axis multipliers currently applied to the scene.
    #[must_use]
    pub fn multipliers(&self) -> AxisMultipliers {
        self.multipliers
    }

    /// Configuration the session was mounted with.
    #[must_use]
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Time at which a pending resize will apply.
    #[must_use]
    pub fn resize_deadline(&self) -> Option<u64> {
        self.window.deadline()
    }

    /// The drawing surface.
    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The frame host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Whether [`teardown`](Self::teardown) has run.
    #[must_use]
    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    fn apply_transform(&mut self, transform: TranslateScale) {
        let transform = self.zoom.set_transform(transform);
        self.sync_camera(transform);
    }

    fn sync_camera(&mut self, transform: TranslateScale) {
        self.camera = self.projection.camera_from_transform(transform);
        self.changes |= RebuildFlags::CAMERA;
    }

    fn apply_multipliers(&mut self) {
        let previous = self.multipliers;
        let next = self.controls.multipliers();
        self.multipliers = next;
        self.scene.set_object_scale(next.x, next.y);

        let target = CameraPosition::new(
            self.camera.x / previous.x * next.x,
            self.camera.y / previous.y * next.y,
            self.camera.z,
        );
        let k = self.zoom.transform().scale;
        self.apply_transform(self.projection.transform_from_camera(target, k));
        self.changes |= RebuildFlags::AXES;
        debug!(x = next.x, y = next.y, "axis multipliers changed");
    }

    fn rebuild_scene(&mut self) {
        self.scene.set_geometry(self.builder.build(&self.dataset));
        self.tooltip = None;
        self.changes |= RebuildFlags::DATA | RebuildFlags::HIGHLIGHT;
    }

    fn hover(&mut self, pointer: Point) {
        let ndc = pointer_to_ndc(pointer, self.projection.viewport());
        let ray = Ray::from_camera(self.camera, ndc, &self.projection);
        let picker =
            PointPicker::from_pixels(self.config.pickup_radius, &self.projection, self.camera);
        let hit = picker.nearest(
            &ray,
            &self.scene.geometry().positions,
            self.scene.object_scale(),
        );
        let Some(hit) = hit else {
            self.clear_hover();
            return;
        };
        let Some(record) = self.dataset.points.get(hit.index) else {
            self.clear_hover();
            return;
        };
        let color = self.scene.geometry().colors[hit.index];
        self.scene.set_highlight(hit.index);
        self.tooltip = Some(Tooltip::new(record, color, pointer, &self.config.tooltip));
        self.changes |= RebuildFlags::HIGHLIGHT;
    }

    fn clear_hover(&mut self) {
        let had_highlight = self.scene.clear_highlight();
        if self.tooltip.take().is_some() || had_highlight {
            self.changes |= RebuildFlags::HIGHLIGHT;
        }
    }
}

impl<S: RenderSurface, H: FrameHost> Drop for ViewportSession<S, H> {
    fn drop(&mut self) {
        self.teardown();
    }
}
