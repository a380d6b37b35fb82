//! Dataset error types.
use std::fmt::{Debug, Display};
use std::path::{Path, PathBuf};

/// Errors raised by dataset construction and indexing.
///
/// Per-item file problems never surface here; see [`ItemError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatasetError {
    /// A configuration option was rejected.
    InvalidConfig {
        /// The offending option.
        field: String,

        /// Why it was rejected.
        reason: String,
    },

    /// A required directory is missing.
    NotADirectory {
        /// The path that was expected to be a directory.
        path: PathBuf,
    },

    /// Enumerating the image directory failed.
    Scan {
        /// The directory being scanned.
        path: PathBuf,

        /// The underlying failure, formatted.
        reason: String,
    },

    /// An index past the end of the dataset.
    IndexOutOfRange {
        /// The requested index.
        index: usize,

        /// The dataset length.
        len: usize,
    },

    /// The dataset has no examples to sample from.
    Empty,
}

impl Display for DatasetError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            DatasetError::InvalidConfig { field, reason } => {
                write!(f, "Invalid config: {field}: {reason}")
            }
            DatasetError::NotADirectory { path } => {
                write!(f, "Not a directory: {}", path.display())
            }
            DatasetError::Scan { path, reason } => {
                write!(f, "Failed to scan {}: {reason}", path.display())
            }
            DatasetError::IndexOutOfRange { index, len } => {
                write!(f, "Index out of range: index = {index}, len = {len}")
            }
            DatasetError::Empty => write!(f, "Dataset is empty"),
        }
    }
}

impl std::error::Error for DatasetError {}

impl DatasetError {
    /// Creates an `InvalidConfig` error.
    ///
    /// # Arguments
    ///
    /// * `field` - The name of the rejected option.
    /// * `reason` - Anything displayable describing the problem.
    pub fn invalid_config<R>(
        field: &str,
        reason: R,
    ) -> Self
    where
        R: Display,
    {
        DatasetError::InvalidConfig {
            field: field.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Creates a `NotADirectory` error.
    pub fn not_a_directory<P: AsRef<Path>>(path: P) -> Self {
        DatasetError::NotADirectory {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Creates a `Scan` error.
    pub fn scan<P, E>(
        path: P,
        err: &E,
    ) -> Self
    where
        P: AsRef<Path>,
        E: Debug,
    {
        DatasetError::Scan {
            path: path.as_ref().to_path_buf(),
            reason: format!("{err:?}"),
        }
    }
}

/// Recoverable failures while loading a single example.
///
/// These are logged and converted to an absent item by the dataset.
#[derive(Debug)]
pub enum ItemError {
    /// The image could not be opened or decoded.
    ImageDecode {
        /// The image file.
        path: PathBuf,

        /// The decoder error.
        source: image::ImageError,
    },

    /// The image exceeds the configured pixel limit.
    ImageTooLarge {
        /// The image file.
        path: PathBuf,

        /// Probed pixel count.
        pixels: u64,

        /// The configured limit.
        limit: u64,
    },

    /// The caption file could not be read.
    CaptionRead {
        /// The caption file.
        path: PathBuf,

        /// The I/O error.
        source: std::io::Error,
    },

    /// The caption normalized to an empty string.
    EmptyCaption {
        /// The caption file.
        path: PathBuf,
    },
}

impl Display for ItemError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            ItemError::ImageDecode { path, source } => {
                write!(f, "Error with {}: {source}", path.display())
            }
            ItemError::ImageTooLarge {
                path,
                pixels,
                limit,
            } => write!(
                f,
                "Error with {}: {pixels} pixels exceeds limit of {limit}",
                path.display()
            ),
            ItemError::CaptionRead { path, source } => {
                write!(f, "Error with caption {}: {source}", path.display())
            }
            ItemError::EmptyCaption { path } => {
                write!(f, "Error with caption {}: empty caption", path.display())
            }
        }
    }
}

impl std::error::Error for ItemError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ItemError::ImageDecode { source, .. } => Some(source),
            ItemError::CaptionRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            DatasetError::invalid_config("flip_p", "must be in [0.0, 1.0]").to_string(),
            "Invalid config: flip_p: must be in [0.0, 1.0]"
        );
        assert_eq!(
            DatasetError::IndexOutOfRange { index: 7, len: 3 }.to_string(),
            "Index out of range: index = 7, len = 3"
        );
        assert_eq!(
            DatasetError::not_a_directory("/no/such/dir").to_string(),
            "Not a directory: /no/such/dir"
        );
        assert_eq!(
            ItemError::EmptyCaption {
                path: PathBuf::from("txt/a.txt")
            }
            .to_string(),
            "Error with caption txt/a.txt: empty caption"
        );
    }
}
