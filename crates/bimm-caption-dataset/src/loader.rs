//! # Image decoding and geometric preprocessing.
use crate::config::Interpolation;
use crate::error::ItemError;
use crate::{ImageShape, colortype_support};
use image::{DynamicImage, ImageReader};
use std::path::Path;

/// Represents the resize specification for an image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResizeSpec {
    /// The target shape of the image after resizing.
    pub shape: ImageShape,

    /// The resampling kind.
    pub interpolation: Interpolation,
}

impl ResizeSpec {
    /// Creates a square `ResizeSpec` using bicubic resampling.
    pub fn square(size: u32) -> Self {
        ResizeSpec {
            shape: ImageShape {
                width: size,
                height: size,
            },
            interpolation: Interpolation::Bicubic,
        }
    }

    /// Extends the `ResizeSpec` with a new interpolation, keeping the shape.
    pub fn with_interpolation(
        self,
        interpolation: Interpolation,
    ) -> Self {
        ResizeSpec {
            shape: self.shape,
            interpolation,
        }
    }
}

/// Loads an image from disk, then optionally crops and resizes it.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageLoader {
    /// If enabled, take the centered square of side `min(width, height)`.
    pub crop: bool,

    /// If enabled, the loader will resize images to the specified shape.
    pub resize: Option<ResizeSpec>,

    /// If enabled, images with more pixels are rejected before decoding.
    pub max_pixels: Option<u64>,
}

impl Default for ImageLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageLoader {
    /// Creates a new `ImageLoader` with no crop, resize, or pixel limit.
    pub fn new() -> Self {
        ImageLoader {
            crop: false,
            resize: None,
            max_pixels: None,
        }
    }

    /// Extends the `ImageLoader` with center cropping.
    pub fn with_crop(
        self,
        crop: bool,
    ) -> Self {
        ImageLoader { crop, ..self }
    }

    /// Extends the `ImageLoader` with a resize specification.
    ///
    /// # Arguments
    ///
    /// * `resize`: The resize specification to apply to the image.
    pub fn with_resize(
        self,
        resize: Option<ResizeSpec>,
    ) -> Self {
        ImageLoader { resize, ..self }
    }

    /// Extends the `ImageLoader` with a decode pixel limit.
    pub fn with_max_pixels(
        self,
        max_pixels: Option<u64>,
    ) -> Self {
        ImageLoader { max_pixels, ..self }
    }

    /// Decode the image at `path` as 8-bit RGB.
    ///
    /// When `max_pixels` is set, the header is probed first and oversized
    /// images are rejected without decoding. Decoding itself runs without
    /// the decoder's default allocation limits.
    pub fn decode(
        &self,
        path: &Path,
    ) -> Result<DynamicImage, ItemError> {
        let decode_err = |source: image::ImageError| ItemError::ImageDecode {
            path: path.to_path_buf(),
            source,
        };

        if let Some(limit) = self.max_pixels {
            let (width, height) = ImageReader::open(path)
                .map_err(|e| decode_err(e.into()))?
                .with_guessed_format()
                .map_err(|e| decode_err(e.into()))?
                .into_dimensions()
                .map_err(decode_err)?;
            let pixels = width as u64 * height as u64;
            if pixels > limit {
                return Err(ItemError::ImageTooLarge {
                    path: path.to_path_buf(),
                    pixels,
                    limit,
                });
            }
        }

        let mut reader = ImageReader::open(path)
            .map_err(|e| decode_err(e.into()))?
            .with_guessed_format()
            .map_err(|e| decode_err(e.into()))?;
        reader.no_limits();
        let image = reader.decode().map_err(decode_err)?;

        Ok(colortype_support::ensure_rgb8(image))
    }

    /// Apply the crop and resize stages to a decoded image.
    pub fn transform(
        &self,
        image: DynamicImage,
    ) -> DynamicImage {
        let mut image = image;

        if self.crop {
            image = center_crop(&image);
        }

        if let Some(spec) = &self.resize
            && (image.width() != spec.shape.width || image.height() != spec.shape.height)
        {
            image = image.resize_exact(
                spec.shape.width,
                spec.shape.height,
                spec.interpolation.filter(),
            );
        }

        image
    }

    /// Decode and transform the image at `path`.
    pub fn load(
        &self,
        path: &Path,
    ) -> Result<DynamicImage, ItemError> {
        Ok(self.transform(self.decode(path)?))
    }
}

/// The bounds `(x, y, side)` of the centered square of an image.
pub fn center_crop_bounds(
    width: u32,
    height: u32,
) -> (u32, u32, u32) {
    let side = width.min(height);
    ((width - side) / 2, (height - side) / 2, side)
}

/// Take the centered square of side `min(width, height)`.
pub fn center_crop(image: &DynamicImage) -> DynamicImage {
    let (x, y, side) = center_crop_bounds(image.width(), image.height());
    image.crop_imm(x, y, side, side)
}
