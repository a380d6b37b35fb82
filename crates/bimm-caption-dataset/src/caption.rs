//! Caption file reading and whitespace normalization.
use crate::error::ItemError;
use std::path::Path;

/// Normalize caption whitespace.
///
/// Replaces each `"  "` with `" "` in a single pass, replaces newlines with
/// spaces, and trims the ends. Longer runs of spaces are only halved.
///
/// # Returns
///
/// The caption, or `None` if nothing but whitespace remains.
pub fn normalize_caption(raw: &str) -> Option<String> {
    let caption = raw.replace("  ", " ").replace('\n', " ");
    let caption = caption.trim();
    if caption.is_empty() {
        None
    } else {
        Some(caption.to_string())
    }
}

/// Read and normalize a caption file.
pub fn read_caption(path: &Path) -> Result<String, ItemError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ItemError::CaptionRead {
        path: path.to_path_buf(),
        source,
    })?;
    normalize_caption(&raw).ok_or_else(|| ItemError::EmptyCaption {
        path: path.to_path_buf(),
    })
}
