//! PNG export of normalized image samples, for eyeballing what the decoder
//! produced.

use std::path::Path;

use image::GrayImage;

use crate::error::Sn3Error;
use crate::format::element::ElementType;
use crate::tensor::TensorView;

/// Converts a rank-2 float32 view with values in [0, 1] back to 8-bit
/// grayscale. Values are scaled by 255, rounded and clamped.
///
/// Returns `None` for any other rank or element type.
pub fn to_luma8(view: &TensorView<'_>) -> Option<GrayImage> {
    if view.rank() != 2 || view.element_type() != ElementType::Float32 {
        return None;
    }
    let (height, width) = (view.dims()[0], view.dims()[1]);
    let pixels: Vec<u8> = view
        .as_slice::<f32>()?
        .iter()
        .map(|&v| (v * 255.0).round().clamp(0.0, 255.0) as u8)
        .collect();
    GrayImage::from_raw(u32::try_from(width).ok()?, u32::try_from(height).ok()?, pixels)
}

/// Writes an image view to `path` as an 8-bit grayscale PNG.
pub fn save_grayscale_png(view: &TensorView<'_>, path: impl AsRef<Path>) -> Result<(), Sn3Error> {
    let path = path.as_ref();
    let img = to_luma8(view).ok_or_else(|| {
        Sn3Error::shape(
            path,
            format!(
                "PNG export needs a rank-2 float32 view, got {:?} {}",
                view.dims(),
                view.element_type()
            ),
        )
    })?;
    img.save_with_format(path, image::ImageFormat::Png).map_err(|e| Sn3Error::Io {
        path: path.to_path_buf(),
        source: std::io::Error::new(std::io::ErrorKind::Other, e),
    })
}
