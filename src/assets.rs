//! The decal's alpha map.
//!
//! A loaded image wins when one is configured; otherwise, or when it fails to
//! load, a radial falloff is generated in memory.

use std::path::Path;

use image::{GrayImage, Luma};

use crate::error::Result;

/// Side length of the generated alpha map in pixels
pub const ALPHA_MAP_SIZE: u32 = 128;

/// White disc in the middle fading to black at the edge
pub fn radial_alpha_map(size: u32) -> GrayImage {
    let size = size.max(2);
    let center = (size as f32 - 1.0) * 0.5;
    GrayImage::from_fn(size, size, |x, y| {
        let dx = (x as f32 - center) / center;
        let dy = (y as f32 - center) / center;
        let r = (dx * dx + dy * dy).sqrt();
        // smooth falloff starting at 20% of the radius
        let t = ((r - 0.2) / 0.8).clamp(0.0, 1.0);
        let a = 1.0 - t * t * (3.0 - 2.0 * t);
        Luma([(a * 255.0).round() as u8])
    })
}

/// Decode any supported image format and keep its luminance
pub fn decode_alpha_map(bytes: &[u8]) -> Result<GrayImage> {
    Ok(image::load_from_memory(bytes)?.into_luma8())
}

#[cfg(not(target_arch = "wasm32"))]
pub fn read_alpha_map(path: &Path) -> Result<GrayImage> {
    let bytes = std::fs::read(path)?;
    decode_alpha_map(&bytes)
}

#[cfg(target_arch = "wasm32")]
pub fn read_alpha_map(path: &Path) -> Result<GrayImage> {
    Err(crate::error::ShadowsError::Dom(format!(
        "cannot read {} from the browser sandbox",
        path.display()
    )))
}

/// Configured image, falling back to the generated one on error
pub fn load_alpha_map(path: Option<&Path>) -> GrayImage {
    match path {
        Some(path) => match read_alpha_map(path) {
            Ok(img) => {
                tracing::info!("loaded alpha map {} ({}x{})", path.display(), img.width(), img.height());
                img
            }
            Err(e) => {
                tracing::warn!("error loading alpha map {}: {e}; using generated one", path.display());
                radial_alpha_map(ALPHA_MAP_SIZE)
            }
        },
        None => radial_alpha_map(ALPHA_MAP_SIZE),
    }
}
