use std::path::Path;

use crate::{
    foundation::error::{LedError, LedResult},
    raster::image::RasterImage,
};

/// Decodes any format the `image` crate understands into straight RGBA8. Palette,
/// grayscale, 16-bit and alpha-less sources are normalized by `to_rgba8`.
pub fn decode_image(bytes: &[u8]) -> LedResult<RasterImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| LedError::source_unavailable(format!("decode image from memory: {e}")))?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();
    RasterImage::from_rgba8(width, height, rgba.as_raw())
}

#[tracing::instrument]
pub fn load_image(path: &Path) -> LedResult<RasterImage> {
    let bytes = std::fs::read(path)
        .map_err(|e| LedError::source_unavailable(format!("read '{}': {e}", path.display())))?;
    let img = decode_image(&bytes).map_err(|e| match e {
        LedError::SourceUnavailable(msg) => {
            LedError::source_unavailable(format!("'{}': {msg}", path.display()))
        }
        other => other,
    })?;
    tracing::debug!(width = img.width(), height = img.height(), "loaded image");
    Ok(img)
}

pub fn ensure_parent_dir(path: &Path) -> LedResult<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent).map_err(|e| {
            LedError::source_unavailable(format!(
                "create output directory '{}': {e}",
                parent.display()
            ))
        })?;
    }
    Ok(())
}

/// Writes the image as an 8-bit RGBA PNG.
pub fn save_png(img: &RasterImage, path: &Path) -> LedResult<()> {
    ensure_parent_dir(path)?;
    image::save_buffer_with_format(
        path,
        &img.to_rgba8(),
        img.width(),
        img.height(),
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .map_err(|e| LedError::source_unavailable(format!("write png '{}': {e}", path.display())))
}
