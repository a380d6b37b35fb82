//! # Dataset configuration.
use crate::error::DatasetError;
use crate::probability::try_probability;
use anyhow::Context;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Default decode-bomb guard, in pixels.
pub const DEFAULT_MAX_IMAGE_PIXELS: u64 = 933_120_000;

/// Resampling kind used when resizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// Nearest neighbor.
    Nearest,
    /// Linear; an alias of `Bilinear`.
    Linear,
    /// Bilinear (triangle filter).
    Bilinear,
    /// Bicubic (Catmull-Rom).
    Bicubic,
    /// Lanczos with a window of 3.
    Lanczos,
}

impl Interpolation {
    /// All variants, in name order.
    pub const ALL: [Interpolation; 5] = [
        Interpolation::Nearest,
        Interpolation::Linear,
        Interpolation::Bilinear,
        Interpolation::Bicubic,
        Interpolation::Lanczos,
    ];

    /// The config name of this variant.
    pub fn name(&self) -> &'static str {
        match self {
            Interpolation::Nearest => "nearest",
            Interpolation::Linear => "linear",
            Interpolation::Bilinear => "bilinear",
            Interpolation::Bicubic => "bicubic",
            Interpolation::Lanczos => "lanczos",
        }
    }

    /// The `image` resampling filter.
    pub fn filter(&self) -> FilterType {
        match self {
            Interpolation::Nearest => FilterType::Nearest,
            Interpolation::Linear | Interpolation::Bilinear => FilterType::Triangle,
            Interpolation::Bicubic => FilterType::CatmullRom,
            Interpolation::Lanczos => FilterType::Lanczos3,
        }
    }
}

impl Display for Interpolation {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Interpolation {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interpolation::ALL
            .into_iter()
            .find(|i| i.name() == s)
            .ok_or_else(|| {
                DatasetError::invalid_config(
                    "interpolation",
                    format!("unknown interpolation {s:?}"),
                )
            })
    }
}

/// Which slice of the index to keep.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SplitMode {
    /// Keep every example.
    #[default]
    Train,

    /// Keep the first `count / val_split` examples.
    Val,
}

impl SplitMode {
    /// The config name of this variant.
    pub fn name(&self) -> &'static str {
        match self {
            SplitMode::Train => "train",
            SplitMode::Val => "val",
        }
    }

    /// The number of examples retained from `count` scanned files.
    pub fn retained(
        &self,
        count: usize,
        val_split: usize,
    ) -> usize {
        match self {
            SplitMode::Train => count,
            SplitMode::Val => count / val_split,
        }
    }
}

impl Display for SplitMode {
    fn fmt(
        &self,
        f: &mut Formatter<'_>,
    ) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SplitMode {
    type Err = DatasetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "train" => Ok(SplitMode::Train),
            "val" => Ok(SplitMode::Val),
            _ => Err(DatasetError::invalid_config(
                "mode",
                format!("unknown mode {s:?}"),
            )),
        }
    }
}

/// Construction options for [`crate::CaptionImageDataset`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptionDatasetConfig {
    /// Directory holding `img/` and `txt/`.
    pub data_root: PathBuf,

    /// Square output side; `None` disables resizing.
    pub size: Option<u32>,

    /// Resampling kind used when resizing.
    pub interpolation: Interpolation,

    /// Per-access probability of a horizontal flip.
    pub flip_p: f64,

    /// Center-crop to a square before resizing.
    pub crop: bool,

    /// Train or validation slice.
    pub mode: SplitMode,

    /// Validation divisor; see [`SplitMode::retained`].
    pub val_split: usize,

    /// Images with more pixels are skipped; `None` disables the guard.
    pub max_image_pixels: Option<u64>,
}

impl Default for CaptionDatasetConfig {
    fn default() -> Self {
        Self {
            data_root: PathBuf::from("./test_dataset"),
            size: Some(512),
            interpolation: Interpolation::Bicubic,
            flip_p: 0.5,
            crop: true,
            mode: SplitMode::Train,
            val_split: 64,
            max_image_pixels: Some(DEFAULT_MAX_IMAGE_PIXELS),
        }
    }
}

impl CaptionDatasetConfig {
    /// Creates a default config rooted at `data_root`.
    pub fn new<P: AsRef<Path>>(data_root: P) -> Self {
        Self {
            data_root: data_root.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    /// Loads a config from a JSON file; missing fields take their defaults.
    pub fn load_json<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Sets the output size; `None` disables resizing.
    pub fn with_size(
        self,
        size: Option<u32>,
    ) -> Self {
        Self { size, ..self }
    }

    /// Sets the interpolation kind.
    pub fn with_interpolation(
        self,
        interpolation: Interpolation,
    ) -> Self {
        Self {
            interpolation,
            ..self
        }
    }

    /// Sets the flip probability.
    pub fn with_flip_p(
        self,
        flip_p: f64,
    ) -> Self {
        Self { flip_p, ..self }
    }

    /// Enables or disables center cropping.
    pub fn with_crop(
        self,
        crop: bool,
    ) -> Self {
        Self { crop, ..self }
    }

    /// Sets the split mode.
    pub fn with_mode(
        self,
        mode: SplitMode,
    ) -> Self {
        Self { mode, ..self }
    }

    /// Sets the validation divisor.
    pub fn with_val_split(
        self,
        val_split: usize,
    ) -> Self {
        Self { val_split, ..self }
    }

    /// Sets the decode-bomb guard.
    pub fn with_max_image_pixels(
        self,
        max_image_pixels: Option<u64>,
    ) -> Self {
        Self {
            max_image_pixels,
            ..self
        }
    }

    /// Checks option ranges.
    pub fn validate(&self) -> Result<(), DatasetError> {
        try_probability("flip_p", self.flip_p)?;
        if self.size == Some(0) {
            return Err(DatasetError::invalid_config("size", "must be positive"));
        }
        if self.val_split == 0 {
            return Err(DatasetError::invalid_config("val_split", "must be positive"));
        }
        if self.max_image_pixels == Some(0) {
            return Err(DatasetError::invalid_config(
                "max_image_pixels",
                "must be positive",
            ));
        }
        Ok(())
    }
}
