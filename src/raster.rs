//! Decoding and compositing of embedded images.

use base64::Engine;
use egui::{ColorImage, IconData};
use image::{RgbaImage, imageops::FilterType};
use std::path::Path;

use crate::error::RasterError;

/// Decodes the base64 payload of a `data:` URL (or a bare base64 string).
pub fn decode_data_url(src: &str) -> Result<RgbaImage, RasterError> {
    let payload = src.rsplit(',').next().unwrap_or_default().trim();
    let bytes = base64::engine::general_purpose::STANDARD.decode(payload)?;
    let img = image::load_from_memory(&bytes)?.into_rgba8();
    if img.width() == 0 || img.height() == 0 {
        return Err(RasterError::Empty);
    }
    Ok(img)
}

/// Scales `alpha` by `opacity` and masks everything outside a rounded
/// rectangle of `radius` (clamped to half the shorter side).
pub fn composite(mut img: RgbaImage, radius: f32, opacity: f32) -> RgbaImage {
    let opacity = opacity.clamp(0.0, 1.0);
    let (w, h) = img.dimensions();
    let radius = radius.max(0.0).min(w.min(h) as f32 / 2.0);
    for (x, y, px) in img.enumerate_pixels_mut() {
        let mut alpha = px[3] as f32;
        if opacity < 1.0 {
            alpha *= opacity;
        }
        if radius > 0.0 && !inside_rounded_rect(x, y, w, h, radius) {
            alpha = 0.0;
        }
        px[3] = alpha.round() as u8;
    }
    img
}

fn inside_rounded_rect(x: u32, y: u32, w: u32, h: u32, radius: f32) -> bool {
    // pixel centers against the corner circles
    let px = x as f32 + 0.5;
    let py = y as f32 + 0.5;
    let (w, h) = (w as f32, h as f32);
    let cx = px.clamp(radius, w - radius);
    let cy = py.clamp(radius, h - radius);
    let (dx, dy) = (px - cx, py - cy);
    dx * dx + dy * dy <= radius * radius
}

/// Full pipeline for an `Image` component: decode, resize to the component
/// size, then composite.
pub fn component_image(
    src: &str,
    width: u32,
    height: u32,
    radius: f32,
    opacity: f32,
) -> Result<ColorImage, RasterError> {
    let img = decode_data_url(src)?;
    let img = image::imageops::resize(&img, width.max(1), height.max(1), FilterType::Lanczos3);
    let img = composite(img, radius, opacity);
    Ok(ColorImage::from_rgba_unmultiplied(
        [img.width() as usize, img.height() as usize],
        img.as_raw(),
    ))
}

/// Loads a window icon from disk.
pub fn load_icon(path: &Path) -> Result<IconData, RasterError> {
    let img = image::open(path)?.into_rgba8();
    let (width, height) = img.dimensions();
    Ok(IconData {
        rgba: img.into_raw(),
        width,
        height,
    })
}
