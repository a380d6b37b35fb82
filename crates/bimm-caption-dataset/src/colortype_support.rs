//! # [`ColorType`] Utilities
use image::{ColorType, DynamicImage};

/// Convert an image to 8-bit RGB, dropping any alpha channel.
///
/// Images already in `Rgb8` are returned unchanged.
pub fn ensure_rgb8(img: DynamicImage) -> DynamicImage {
    if img.color() == ColorType::Rgb8 {
        return img;
    }
    img.to_rgb8().into()
}
