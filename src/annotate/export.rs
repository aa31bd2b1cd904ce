use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use image::RgbaImage;

use crate::annotate::canvas::OverlayBitmap;
use crate::annotate::model::Color;

pub const EXPORT_SUBDIR: &str = "annotation_exports";

/// Backdrop the annotation layer is flattened over. `Transparent` keeps the
/// raw layer; `Solid` blends it over one colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportBackdrop {
    Transparent,
    Solid(Color),
}

pub fn exe_relative_export_folder_from_path(exe_path: &Path) -> Result<PathBuf> {
    let parent = exe_path
        .parent()
        .ok_or_else(|| anyhow!("executable path has no parent: {}", exe_path.display()))?;
    Ok(parent.join(EXPORT_SUBDIR))
}

pub fn ensure_export_folder() -> Result<PathBuf> {
    let exe_path = std::env::current_exe().context("resolve current executable")?;
    let output = exe_relative_export_folder_from_path(&exe_path)?;
    fs::create_dir_all(&output)
        .with_context(|| format!("create export folder {}", output.display()))?;
    Ok(output)
}

pub fn timestamped_name(now: chrono::DateTime<Local>) -> String {
    format!("{}_annotation.png", now.format("%Y%m%d_%H%M%S"))
}

/// Flattens the overlay into an image. This is a one-way export: the PNG
/// cannot be loaded back as annotation state.
pub fn annotation_image(canvas: &OverlayBitmap, backdrop: ExportBackdrop) -> RgbaImage {
    let (width, height) = canvas.size();
    let mut pixels = canvas.pixels().to_vec();
    if let ExportBackdrop::Solid(bg) = backdrop {
        for px in pixels.chunks_exact_mut(4) {
            let alpha = px[3] as f32 / 255.0;
            let blend = |s: u8, d: u8| -> u8 {
                (s as f32 * alpha + d as f32 * (1.0 - alpha))
                    .round()
                    .clamp(0.0, 255.0) as u8
            };
            px[0] = blend(px[0], bg.r);
            px[1] = blend(px[1], bg.g);
            px[2] = blend(px[2], bg.b);
            px[3] = 255;
        }
    }
    RgbaImage::from_raw(width, height, pixels).expect("overlay pixel buffer matches dimensions")
}

/// Writes the current overlay to `<output_dir>/<timestamp>_annotation.png`
/// and returns the path written.
pub fn export_annotation(
    canvas: &OverlayBitmap,
    backdrop: ExportBackdrop,
    output_dir: &Path,
    now: chrono::DateTime<Local>,
) -> Result<PathBuf> {
    if !canvas.has_area() {
        return Err(anyhow!("overlay has not been sized yet"));
    }
    let path = output_dir.join(timestamped_name(now));
    annotation_image(canvas, backdrop)
        .save(&path)
        .with_context(|| format!("write annotation export {}", path.display()))?;
    Ok(path)
}
