use image::{GrayImage, ImageError, ImageFormat, Luma};
use std::path::{Path, PathBuf};

use crate::scattering::IsarImage;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("image of size {0} does not fit a PNG canvas")]
    Size(usize),
    #[error("failed to save ISAR preview to {1:?}")]
    Save(#[source] ImageError, PathBuf),
}

/// Grayscale preview: magnitude normalised to the image's own peak.
/// Rows follow the range axis, columns the cross-range axis.
pub fn to_grayscale(image: &IsarImage) -> Result<GrayImage, RenderError> {
    let magnitude = image.magnitude();
    let (rows, cols) = magnitude.dim();
    let width = u32::try_from(cols).map_err(|_| RenderError::Size(cols))?;
    let height = u32::try_from(rows).map_err(|_| RenderError::Size(rows))?;

    let peak = magnitude.iter().copied().fold(0.0, f64::max);
    let scale = if peak > 0.0 { 255.0 / peak } else { 0.0 };

    Ok(GrayImage::from_fn(width, height, |x, y| {
        let value = magnitude[(y as usize, x as usize)] * scale;
        Luma([value.round().clamp(0.0, 255.0) as u8])
    }))
}

pub fn save_png(isar: &IsarImage, path: impl AsRef<Path>) -> Result<(), RenderError> {
    let path = path.as_ref();
    to_grayscale(isar)?
        .save_with_format(path, ImageFormat::Png)
        .map_err(|err| RenderError::Save(err, path.to_path_buf()))
}
