use image::{DynamicImage, GrayImage, Luma, RgbImage};

use crate::options::ContrastPivot;

/// ITU-R BT.601 luma with integer weights scaled by 1000.
pub fn bt601(rgb: [u8; 3]) -> u8 {
    let [r, g, b] = rgb.map(u32::from);
    ((299 * r + 587 * g + 114 * b) / 1000) as u8
}

pub fn luminance(image: &DynamicImage) -> GrayImage {
    luminance_from_rgb(&image.to_rgb8())
}

pub fn luminance_from_rgb(rgb: &RgbImage) -> GrayImage {
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| Luma([bt601(rgb.get_pixel(x, y).0)]))
}

pub fn mean_luminance(image: &GrayImage) -> f32 {
    let count = u64::from(image.width()) * u64::from(image.height());
    if count == 0 {
        return 0.0;
    }
    let total: u64 = image.pixels().map(|pixel| u64::from(pixel.0[0])).sum();
    total as f32 / count as f32
}

/// Scales every sample's distance from the pivot by `factor`.
pub fn enhance_contrast(image: &mut GrayImage, factor: f32, pivot: ContrastPivot) {
    if factor == 1.0 {
        return;
    }

    let pivot = match pivot {
        ContrastPivot::MidGray => 127.5,
        ContrastPivot::Mean => mean_luminance(image).round(),
    };

    for pixel in image.pixels_mut() {
        let value = pivot + factor * (f32::from(pixel.0[0]) - pivot);
        pixel.0[0] = value.round().clamp(0.0, 255.0) as u8;
    }
}

pub fn apply_brightness(image: &mut GrayImage, offset: i32) {
    if offset == 0 {
        return;
    }

    for pixel in image.pixels_mut() {
        pixel.0[0] = (i32::from(pixel.0[0]) + offset).clamp(0, 255) as u8;
    }
}
