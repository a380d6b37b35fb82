//! Fixtures for tests of caption datasets.
use crate::ImageShape;
use crate::scanning::{CAPTION_DIR, IMAGE_DIR};
use image::{DynamicImage, ImageBuffer, Rgb, RgbImage};
use image_compare::BlendInput;
use std::path::{Path, PathBuf};

/// Generates a simple gradient pattern image.
pub fn generate_gradient_pattern(shape: ImageShape) -> RgbImage {
    let r_scale = shape.width as f32 - 1.0;
    let g_scale = shape.height as f32 - 1.0;
    let b_scale = (shape.width + shape.height - 2) as f32;

    ImageBuffer::from_fn(shape.width, shape.height, |x, y| {
        let a = x as f32 * 255.0;
        let b = y as f32 * 255.0;

        let r = (a / r_scale) as u8;
        let g = (b / g_scale) as u8;
        let b = ((a + b) / b_scale) as u8;

        Rgb([r, g, b])
    })
}

/// Asserts that two images are similar within a given tolerance.
///
/// # Arguments
///
/// * `actual` - The actual image to compare.
/// * `expected` - The expected image to compare against.
/// * `tolerance` - An optional tolerance value for the similarity score. If not provided, defaults to 0.01.
pub fn assert_image_close_rgba<'a, A, B>(
    actual: A,
    expected: B,
    tolerance: Option<f64>,
) where
    A: Into<BlendInput<'a>>,
    B: Into<BlendInput<'a>>,
{
    let tolerance = tolerance.unwrap_or(0.01);
    let actual = actual.into();
    let expected = expected.into();

    let white = Rgb([255, 255, 255]);
    match image_compare::rgba_blended_hybrid_compare(actual, expected, white) {
        Ok(similarity) => {
            let target_score = 1.0 - tolerance;
            assert!(
                similarity.score >= target_score,
                "Image similarity {} < target {target_score}",
                similarity.score
            );
        }
        Err(e) => panic!("Image comparison failed: {e:?}"),
    }
}

/// Asserts that two `DynamicImage` instances are similar within a given tolerance.
///
/// # Panics
///
/// If the images are not similar enough according to the specified tolerance.
pub fn assert_image_close(
    actual: &DynamicImage,
    expected: &DynamicImage,
    tolerance: Option<f64>,
) {
    let actual = actual.to_rgba8();
    let expected = expected.to_rgba8();
    assert_image_close_rgba(&actual, &expected, tolerance);
}

/// Writes ``$ROOT/img/$STEM.$EXT`` and, if given, ``$ROOT/txt/$STEM.txt``.
///
/// # Returns
///
/// The image path.
pub fn write_example(
    root: &Path,
    stem: &str,
    ext: &str,
    image: &DynamicImage,
    caption: Option<&str>,
) -> anyhow::Result<PathBuf> {
    let image_dir = root.join(IMAGE_DIR);
    let caption_dir = root.join(CAPTION_DIR);
    std::fs::create_dir_all(&image_dir)?;
    std::fs::create_dir_all(&caption_dir)?;

    let image_path = image_dir.join(format!("{stem}.{ext}"));
    image.save(&image_path)?;

    if let Some(caption) = caption {
        std::fs::write(caption_dir.join(format!("{stem}.txt")), caption)?;
    }

    Ok(image_path)
}

/// Writes `count` gradient examples, stems `item_000`, `item_001`, ...
///
/// Captions read `caption {i}`.
pub fn write_gradient_dataset(
    root: &Path,
    count: usize,
    shape: ImageShape,
) -> anyhow::Result<Vec<PathBuf>> {
    let image: DynamicImage = generate_gradient_pattern(shape).into();
    (0..count)
        .map(|i| {
            write_example(
                root,
                &format!("item_{i:03}"),
                "png",
                &image,
                Some(&format!("caption {i}")),
            )
        })
        .collect()
}
