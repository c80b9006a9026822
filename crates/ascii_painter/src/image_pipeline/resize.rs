use image::imageops::{self, FilterType};
use image::{ImageBuffer, Pixel};

use crate::AsciiError;

/// Character grid size derived from a source image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetGeometry {
    pub columns: u32,
    pub rows: u32,
}

impl TargetGeometry {
    /// Fixed column count; rows follow the source aspect ratio scaled by
    /// `aspect_correction` to account for glyphs being taller than wide.
    pub fn fixed_columns(
        source_width: u32,
        source_height: u32,
        columns: u32,
        aspect_correction: f32,
    ) -> Result<Self, AsciiError> {
        if source_width == 0 || source_height == 0 {
            return Err(AsciiError::InvalidArgument(format!(
                "image has no pixels ({source_width}x{source_height})"
            )));
        }
        if columns == 0 {
            return Err(AsciiError::InvalidArgument("target width must be positive".into()));
        }

        let ratio = f64::from(source_height) / f64::from(source_width);
        let rows = (f64::from(columns) * ratio * f64::from(aspect_correction)).round();
        if rows.is_nan() || rows < 1.0 {
            return Err(AsciiError::InvalidArgument(format!(
                "target width {columns} yields no rows for a {source_width}x{source_height} image"
            )));
        }

        Ok(Self { columns, rows: rows.min(f64::from(u32::MAX)) as u32 })
    }
}

/// Lanczos3 resample to the target geometry, skipped when the size already
/// matches.
pub fn resample<P>(
    image: &ImageBuffer<P, Vec<P::Subpixel>>,
    geometry: TargetGeometry,
) -> ImageBuffer<P, Vec<P::Subpixel>>
where
    P: Pixel + 'static,
    P::Subpixel: 'static,
{
    if image.dimensions() == (geometry.columns, geometry.rows) {
        return image.clone();
    }
    imageops::resize(image, geometry.columns, geometry.rows, FilterType::Lanczos3)
}
