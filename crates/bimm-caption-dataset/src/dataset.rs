//! # The indexed image/caption dataset.
use crate::augmentation::RandomHorizontalFlip;
use crate::burn_support::image_to_signed_unit_tensor_data;
use crate::caption::read_caption;
use crate::config::CaptionDatasetConfig;
use crate::error::{DatasetError, ItemError};
use crate::loader::{ImageLoader, ResizeSpec};
use crate::scanning::{CaptionExample, ExampleIndex, scan_image_files};
use burn::data::dataset::Dataset;
use burn::tensor::TensorData;
use image::DynamicImage;
use rand::Rng;

/// A preprocessed example.
#[derive(Debug, Clone)]
pub struct CaptionImageItem {
    /// The normalized caption.
    pub caption: String,

    /// `[height, width, 3]` `f32` pixels in ``[-1.0, 1.0]``.
    pub image: TensorData,
}

/// A fixed-length view over ``$ROOT/img/*`` paired with ``$ROOT/txt/*.txt``.
///
/// The directory is scanned once, at construction. Each access decodes one
/// image (and reads one caption) on the calling thread; per-file failures
/// are logged and reported as `Ok(None)`.
#[derive(Debug, Clone)]
pub struct CaptionImageDataset {
    config: CaptionDatasetConfig,
    index: ExampleIndex,
    loader: ImageLoader,
    flip: RandomHorizontalFlip,
}

impl CaptionImageDataset {
    /// Scan `config.data_root` and build the dataset.
    ///
    /// # Errors
    ///
    /// On an invalid config, or when ``$ROOT`` or ``$ROOT/img`` is not a directory.
    pub fn new(config: CaptionDatasetConfig) -> Result<Self, DatasetError> {
        config.validate()?;
        let flip = RandomHorizontalFlip::new(config.flip_p)?;

        log::info!("Fetching data from {}", config.data_root.display());
        let mut image_files = scan_image_files(&config.data_root)?;
        image_files.truncate(config.mode.retained(image_files.len(), config.val_split));
        log::info!(
            "image files length ({}): {}",
            config.mode,
            image_files.len()
        );
        log::debug!("image files ({}): {image_files:?}", config.mode);

        let index = ExampleIndex::build(&config.data_root, image_files);
        log::info!(
            "image-caption map has {} examples",
            index.unique_len()
        );

        let loader = ImageLoader::new()
            .with_crop(config.crop)
            .with_resize(
                config
                    .size
                    .map(|size| ResizeSpec::square(size).with_interpolation(config.interpolation)),
            )
            .with_max_pixels(config.max_image_pixels);

        Ok(Self {
            config,
            index,
            loader,
            flip,
        })
    }

    /// The construction config.
    pub fn config(&self) -> &CaptionDatasetConfig {
        &self.config
    }

    /// Number of retained examples.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether no examples were retained.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// The ordered stems.
    pub fn stems(&self) -> &[String] {
        self.index.stems()
    }

    /// The file pair at `index`.
    pub fn example(
        &self,
        index: usize,
    ) -> Option<&CaptionExample> {
        self.index.get(index)
    }

    fn checked_example(
        &self,
        index: usize,
    ) -> Result<&CaptionExample, DatasetError> {
        self.index.get(index).ok_or(DatasetError::IndexOutOfRange {
            index,
            len: self.len(),
        })
    }

    /// Read the normalized caption at `index`.
    ///
    /// `Ok(None)` if the caption is missing, unreadable, or empty.
    pub fn caption(
        &self,
        index: usize,
    ) -> Result<Option<String>, DatasetError> {
        let example = self.checked_example(index)?;
        Ok(soft(index, read_caption(&example.caption)))
    }

    /// Load the preprocessed example at `index`.
    ///
    /// `Ok(None)` is the absence marker: the image failed to decode, or the
    /// caption is missing, unreadable, or empty.
    ///
    /// # Errors
    ///
    /// `IndexOutOfRange` when `index >= len()`.
    pub fn get(
        &self,
        index: usize,
    ) -> Result<Option<CaptionImageItem>, DatasetError> {
        self.get_with_rng(index, &mut rand::rng())
    }

    /// [`Self::get`], drawing the flip from `rng`.
    pub fn get_with_rng<R: Rng + ?Sized>(
        &self,
        index: usize,
        rng: &mut R,
    ) -> Result<Option<CaptionImageItem>, DatasetError> {
        let example = self.checked_example(index)?;

        let Some(image) = soft(index, self.loader.decode(&example.image)) else {
            return Ok(None);
        };
        let Some(caption) = soft(index, read_caption(&example.caption)) else {
            return Ok(None);
        };

        let image = self.flip.augment_image(self.loader.transform(image), rng);

        Ok(Some(CaptionImageItem {
            caption,
            image: image_to_signed_unit_tensor_data(&image),
        }))
    }

    /// Load the cropped, resized, and flipped 8-bit RGB image at `index`.
    ///
    /// Captions are not read. `Ok(None)` if the image failed to decode.
    pub fn get_image(
        &self,
        index: usize,
    ) -> Result<Option<DynamicImage>, DatasetError> {
        self.get_image_with_rng(index, &mut rand::rng())
    }

    /// [`Self::get_image`], drawing the flip from `rng`.
    pub fn get_image_with_rng<R: Rng + ?Sized>(
        &self,
        index: usize,
        rng: &mut R,
    ) -> Result<Option<DynamicImage>, DatasetError> {
        let example = self.checked_example(index)?;
        Ok(soft(index, self.loader.load(&example.image))
            .map(|image| self.flip.augment_image(image, rng)))
    }

    /// [`Self::get`] at a uniformly random index.
    ///
    /// # Errors
    ///
    /// `Empty` when there is nothing to sample.
    pub fn random_sample(&self) -> Result<Option<CaptionImageItem>, DatasetError> {
        self.random_sample_with_rng(&mut rand::rng())
    }

    /// [`Self::random_sample`], drawing the index and flip from `rng`.
    pub fn random_sample_with_rng<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<Option<CaptionImageItem>, DatasetError> {
        if self.is_empty() {
            return Err(DatasetError::Empty);
        }
        let index = rng.random_range(0..self.len());
        self.get_with_rng(index, rng)
    }

    /// [`Self::get`] at the index after `index`, wrapping to 0 at the end.
    pub fn sequential_sample(
        &self,
        index: usize,
    ) -> Result<Option<CaptionImageItem>, DatasetError> {
        if index.saturating_add(1) >= self.len() {
            self.get(0)
        } else {
            self.get(index + 1)
        }
    }

    /// Always `None`; an explicit "skipped" marker.
    pub fn skip_sample(
        &self,
        _index: usize,
    ) -> Option<CaptionImageItem> {
        None
    }
}

/// Log a per-item failure and convert it to absence.
fn soft<T>(
    index: usize,
    result: Result<T, ItemError>,
) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            log::warn!("{err} -- skipping {index}");
            None
        }
    }
}

impl Dataset<CaptionImageItem> for CaptionImageDataset {
    /// Absent items and out-of-range indices are both `None`.
    fn get(
        &self,
        index: usize,
    ) -> Option<CaptionImageItem> {
        CaptionImageDataset::get(self, index).ok().flatten()
    }

    fn len(&self) -> usize {
        CaptionImageDataset::len(self)
    }
}
