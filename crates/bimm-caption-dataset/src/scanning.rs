//! Image directory scanning and the stem → example mapping.
use crate::error::DatasetError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Image extensions, in enumeration order.
pub const IMAGE_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];

/// Image subdirectory name.
pub const IMAGE_DIR: &str = "img";

/// Caption subdirectory name.
pub const CAPTION_DIR: &str = "txt";

/// An image file and its caption file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptionExample {
    /// The image file.
    pub image: PathBuf,

    /// The caption file; not checked for existence.
    pub caption: PathBuf,
}

/// Scan ``$ROOT/img/*.{png,jpg,jpeg,bmp}``.
///
/// Each extension is globbed separately and the results concatenated in
/// [`IMAGE_EXTENSIONS`] order; within an extension, files are ordered by path.
/// Hidden files are skipped. An entry that cannot be read (a dangling
/// symlink, say) is logged and skipped; only a failure to read ``$ROOT/img``
/// itself is an error.
pub fn scan_image_files<P>(data_root: P) -> Result<Vec<PathBuf>, DatasetError>
where
    P: AsRef<Path>,
{
    let data_root = data_root.as_ref();
    if !data_root.is_dir() {
        return Err(DatasetError::not_a_directory(data_root));
    }
    let image_dir = data_root.join(IMAGE_DIR);
    if !image_dir.is_dir() {
        return Err(DatasetError::not_a_directory(&image_dir));
    }

    let mut files = Vec::new();
    for ext in IMAGE_EXTENSIONS {
        let walker = globwalk::GlobWalkerBuilder::from_patterns(&image_dir, &[format!("*.{ext}")])
            .max_depth(1)
            .follow_links(true)
            .sort_by(|p1, p2| p1.path().cmp(p2.path()))
            .build()
            .map_err(|e| DatasetError::scan(&image_dir, &e))?;

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() > 0 => {
                    // Errors surface on every extension's walk; report the one that matches.
                    if let Some(path) = err.path()
                        && is_listed(path, ext)
                    {
                        log::warn!("Skipping unreadable image entry {}: {err}", path.display());
                    }
                    continue;
                }
                Err(err) => return Err(DatasetError::scan(&image_dir, &err)),
            };
            if entry.file_type().is_file() && !is_hidden(entry.path()) {
                files.push(entry.path().to_path_buf());
            }
        }
    }
    Ok(files)
}

/// Dot-files (e.g. ``._cat.png`` resource forks) are not dataset entries.
fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.starts_with('.'))
}

fn is_listed(
    path: &Path,
    ext: &str,
) -> bool {
    !is_hidden(path) && path.extension().is_some_and(|e| e == ext)
}

/// The join key of an image file: its name up to the first `.`.
pub fn stem_of(path: &Path) -> Option<String> {
    let name = path.file_name()?.to_str()?;
    name.split('.').next().map(str::to_string)
}

/// The stem → example mapping, and the ordered stem index.
#[derive(Debug, Clone, Default)]
pub struct ExampleIndex {
    /// Stems, in image file order.
    stems: Vec<String>,

    /// Stem → example; later duplicates overwrite earlier entries.
    examples: HashMap<String, CaptionExample>,
}

impl ExampleIndex {
    /// Build the index from scanned image files.
    ///
    /// Captions are expected at ``$ROOT/txt/$STEM.txt``.
    pub fn build<P>(
        data_root: P,
        image_files: Vec<PathBuf>,
    ) -> Self
    where
        P: AsRef<Path>,
    {
        let caption_dir = data_root.as_ref().join(CAPTION_DIR);

        let mut index = ExampleIndex {
            stems: Vec::with_capacity(image_files.len()),
            examples: HashMap::with_capacity(image_files.len()),
        };

        for image in image_files {
            let Some(stem) = stem_of(&image) else {
                log::warn!("Skipping image with non UTF-8 name: {}", image.display());
                continue;
            };
            let caption = caption_dir.join(format!("{stem}.txt"));

            if let Some(previous) = index
                .examples
                .insert(stem.clone(), CaptionExample { image, caption })
            {
                log::warn!(
                    "Duplicate stem {stem:?}: {} replaced by {}",
                    previous.image.display(),
                    index.examples[&stem].image.display()
                );
            }
            index.stems.push(stem);
        }

        index
    }

    /// Number of indexed positions.
    pub fn len(&self) -> usize {
        self.stems.len()
    }

    /// Whether the index is empty.
    pub fn is_empty(&self) -> bool {
        self.stems.is_empty()
    }

    /// Number of distinct stems.
    pub fn unique_len(&self) -> usize {
        self.examples.len()
    }

    /// The ordered stems.
    pub fn stems(&self) -> &[String] {
        &self.stems
    }

    /// The example at `index`.
    pub fn get(
        &self,
        index: usize,
    ) -> Option<&CaptionExample> {
        self.stems.get(index).and_then(|stem| self.examples.get(stem))
    }
}
