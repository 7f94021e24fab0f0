// Copyright 2025 the Canopy Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Helpers shared by the Canopy demos.

use std::error::Error;
use std::fs::File;
use std::path::Path;

use canopy_render_cpu::CpuSurface;
use png::{BitDepth, ColorType, Encoder};
use tracing_subscriber::EnvFilter;

/// Installs a `fmt` subscriber filtered by `RUST_LOG`.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_target(false)
        .init();
}

/// Writes the last frame rendered on `surface` as an RGBA PNG.
pub fn write_png(surface: &CpuSurface, path: impl AsRef<Path>) -> Result<(), Box<dyn Error>> {
    let (width, height) = surface
        .dimensions()
        .ok_or("surface was released before the frame was saved")?;
    let data = surface.rgba8();

    let file = File::create(path)?;
    let mut encoder = Encoder::new(file, u32::from(width), u32::from(height));
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);
    let mut writer = encoder.write_header()?;
    writer.write_image_data(&data)?;
    Ok(())
}
