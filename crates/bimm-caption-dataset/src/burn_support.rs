//! Image to `TensorData` conversion.
use burn::tensor::TensorData;
use image::DynamicImage;

/// Scale an 8-bit channel value to ``[-1.0, 1.0]``.
#[inline]
pub fn u8_to_signed_unit(v: u8) -> f32 {
    (v as f64 / 127.5 - 1.0) as f32
}

/// Invert [`u8_to_signed_unit`], rounding to the nearest channel value.
#[inline]
pub fn signed_unit_to_u8(x: f32) -> u8 {
    ((x as f64 + 1.0) * 127.5).round().clamp(0.0, 255.0) as u8
}

/// Converts an image to `[h, w, 3]` `f32` data with values in ``[-1.0, 1.0]``.
///
/// The image is read as 8-bit RGB; other color types are converted first.
pub fn image_to_signed_unit_tensor_data(image: &DynamicImage) -> TensorData {
    let rgb = image.to_rgb8();
    let shape = vec![rgb.height() as usize, rgb.width() as usize, 3];

    let data: Vec<f32> = rgb.as_raw().iter().map(|&v| u8_to_signed_unit(v)).collect();

    TensorData::new(data, shape)
}
