use image::{GrayImage, RgbImage};

use super::{
    grid::{Cell, GlyphGrid},
    ramp::DensityRamp,
};

/// Maps luminance samples to ramp glyphs through a gamma curve.
///
/// Every possible 8-bit sample is resolved once up front, so mapping a grid
/// is a table lookup per cell.
#[derive(Clone, Debug)]
pub struct GlyphMapper {
    ramp: DensityRamp,
    levels: [usize; 256],
    invert: bool,
}

impl GlyphMapper {
    pub fn new(ramp: DensityRamp, gamma: f32, invert: bool) -> Self {
        let max_level = ramp.len() - 1;
        let mut levels = [0; 256];
        for (sample, level) in levels.iter_mut().enumerate() {
            let normalized = sample as f64 / 255.0;
            let corrected = normalized.powf(f64::from(gamma));
            *level = ((corrected * max_level as f64).floor() as usize).min(max_level);
        }
        Self { ramp, levels, invert }
    }

    /// Brightness level of `sample`, from 0 (black) to `ramp.len() - 1`.
    pub fn level(&self, sample: u8) -> usize {
        self.levels[sample as usize]
    }

    /// Ramp index selected for `sample`.
    pub fn ramp_index(&self, sample: u8) -> usize {
        let level = self.level(sample);
        if self.invert {
            self.ramp.len() - 1 - level
        } else {
            level
        }
    }

    pub fn glyph(&self, sample: u8) -> char {
        self.ramp.glyph(self.ramp_index(sample))
    }

    /// Maps every luminance sample to a cell, attaching the matching pixel of
    /// `colors` when given. `colors` must have the same dimensions.
    pub fn map(&self, luminance: &GrayImage, colors: Option<&RgbImage>) -> GlyphGrid {
        debug_assert!(colors.map_or(true, |rgb| rgb.dimensions() == luminance.dimensions()));

        let rows = luminance
            .rows()
            .enumerate()
            .map(|(y, row)| {
                row.enumerate()
                    .map(|(x, sample)| {
                        let glyph = self.glyph(sample.0[0]);
                        match colors {
                            Some(rgb) => Cell::colored(glyph, rgb.get_pixel(x as u32, y as u32).0),
                            None => Cell::new(glyph),
                        }
                    })
                    .collect()
            })
            .collect();

        GlyphGrid::new(rows)
    }
}
