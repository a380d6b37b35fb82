#![warn(missing_docs)]
//!# bimm-caption-dataset - Image/Caption Folder Dataset
//!
//! Pairs ``$ROOT/img/$STEM.{png,jpg,jpeg,bmp}`` with ``$ROOT/txt/$STEM.txt``
//! and serves center-cropped, resized, randomly flipped images as
//! `[h, w, 3]` `f32` data in ``[-1.0, 1.0]``, alongside their captions.
//!
//! ```no_run
//! use bimm_caption_dataset::{CaptionDatasetConfig, CaptionImageDataset};
//!
//! let dataset = CaptionImageDataset::new(
//!     CaptionDatasetConfig::new("./danbooru-aesthetic").with_size(Some(256)),
//! )?;
//! if let Some(item) = dataset.get(0)? {
//!     println!("{}: {:?}", item.caption, item.image.shape);
//! }
//! # Ok::<(), bimm_caption_dataset::DatasetError>(())
//! ```
pub mod augmentation;
pub mod burn_support;
pub mod caption;
pub mod colortype_support;
pub mod config;
pub mod dataset;
pub mod error;
pub mod loader;
pub mod probability;
pub mod scanning;
pub mod test_util;

pub use config::{CaptionDatasetConfig, Interpolation, SplitMode};
pub use dataset::{CaptionImageDataset, CaptionImageItem};
pub use error::{DatasetError, ItemError};
pub use scanning::CaptionExample;

/// Represents the shape of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageShape {
    /// The width of the image in pixels.
    pub width: u32,

    /// The height of the image in pixels.
    pub height: u32,
}
