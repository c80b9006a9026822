mod ascii;
pub mod escape;
mod image_pipeline;
mod options;

use std::path::Path;

use image::{DynamicImage, GenericImageView};

pub use ascii::{
    grid::{Cell, GlyphGrid},
    mapping::GlyphMapper,
    ramp::DensityRamp,
    trim::BackgroundTrimmer,
};
pub use image_pipeline::resize::TargetGeometry;
pub use options::{AsciiOptions, ContrastPivot};

use image_pipeline::{adjust, resize};

#[derive(Debug, thiserror::Error)]
pub enum AsciiError {
    #[error("failed to load image: {0}")]
    Image(#[from] image::ImageError),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("density ramp needs at least two glyphs, got {0}")]
    InvalidRamp(usize),
}

/// Renders bitmaps into glyph grids with a fixed set of options.
#[derive(Clone, Debug)]
pub struct GlyphRenderer {
    options: AsciiOptions,
    mapper: GlyphMapper,
}

impl Default for GlyphRenderer {
    fn default() -> Self {
        Self::with_options(AsciiOptions::default())
    }
}

impl GlyphRenderer {
    pub fn new(options: AsciiOptions) -> Result<Self, AsciiError> {
        options.validate()?;
        Ok(Self::with_options(options))
    }

    fn with_options(options: AsciiOptions) -> Self {
        let mapper = GlyphMapper::new(options.ramp.clone(), options.gamma, options.invert);
        Self { options, mapper }
    }

    pub fn ramp(&self) -> &DensityRamp {
        &self.options.ramp
    }

    /// Trimmer sharing this renderer's background glyphs.
    pub fn trimmer(&self) -> BackgroundTrimmer {
        BackgroundTrimmer::for_ramp(&self.options.ramp)
    }

    /// Grid size `render` would produce for an image of the given size.
    pub fn geometry(
        &self,
        source_width: u32,
        source_height: u32,
        target_width: u32,
    ) -> Result<TargetGeometry, AsciiError> {
        TargetGeometry::fixed_columns(
            source_width,
            source_height,
            target_width,
            self.options.aspect_correction,
        )
    }

    pub fn render_path<P: AsRef<Path>>(
        &self,
        path: P,
        target_width: u32,
        use_color: bool,
    ) -> Result<GlyphGrid, AsciiError> {
        let image = image::open(path)?;
        self.render(&image, target_width, use_color)
    }

    pub fn render(
        &self,
        image: &DynamicImage,
        target_width: u32,
        use_color: bool,
    ) -> Result<GlyphGrid, AsciiError> {
        let (width, height) = image.dimensions();
        let geometry = self.geometry(width, height, target_width)?;

        let colors = use_color.then(|| image.to_rgb8());
        let mut luminance = match &colors {
            Some(rgb) => adjust::luminance_from_rgb(rgb),
            None => adjust::luminance(image),
        };

        adjust::enhance_contrast(
            &mut luminance,
            self.options.contrast,
            self.options.contrast_pivot,
        );
        let mut luminance = resize::resample(&luminance, geometry);
        adjust::apply_brightness(&mut luminance, self.options.brightness_offset);

        let colors = colors.map(|rgb| resize::resample(&rgb, geometry));

        Ok(self.mapper.map(&luminance, colors.as_ref()))
    }
}

#[cfg(test)]
mod tests {
    use image::{GrayImage, Luma};

    use super::*;

    #[test]
    fn zero_width_is_invalid() {
        let image = DynamicImage::ImageLuma8(GrayImage::from_pixel(4, 4, Luma([0])));
        let err = GlyphRenderer::default().render(&image, 0, false).unwrap_err();
        assert!(matches!(err, AsciiError::InvalidArgument(_)));
    }

    #[test]
    fn invalid_options_are_rejected() {
        let options = AsciiOptions { gamma: -1.0, ..Default::default() };
        assert!(GlyphRenderer::new(options).is_err());
    }

    #[test]
    fn trimmer_uses_the_ramp_background() {
        let options = AsciiOptions { ramp: DensityRamp::blocks(), ..Default::default() };
        let renderer = GlyphRenderer::new(options).unwrap();
        assert_eq!(renderer.trimmer().background_glyphs(), &[' ', '░']);
    }

    #[test]
    fn missing_file_surfaces_image_error() {
        let err = GlyphRenderer::default()
            .render_path("/definitely/not/here.png", 10, false)
            .unwrap_err();
        assert!(matches!(err, AsciiError::Image(_)));
    }
}
