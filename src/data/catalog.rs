//! Discovery of the images in a dataset.
//!
//! Images are ordered lexicographically by path; that order is the
//! navigation order of a session and wraps at both ends.

use std::path::{Path, PathBuf};

use crate::constants::IMAGES_DIRNAME;
use crate::error::SetupError;

/// One image of the dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageDescriptor {
    /// Full path to the image file
    pub path: PathBuf,
    /// File name, e.g. "receipt_001.jpg"
    pub file_name: String,
    /// File name without its extension, e.g. "receipt_001"
    pub stem: String,
}

impl ImageDescriptor {
    pub fn from_path(path: PathBuf) -> Self {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let stem = path
            .file_stem()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_name.clone());
        Self {
            path,
            file_name,
            stem,
        }
    }
}

/// Check if a filename has one of the given extensions (case-insensitive).
fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|want| want.eq_ignore_ascii_case(ext)))
}

/// The lexicographically first directory under `root`, used as the dataset
/// when none is given on the command line.
pub fn first_dataset_dir(root: &Path) -> Result<PathBuf, SetupError> {
    let not_found = || SetupError::NoDataset {
        root: root.to_path_buf(),
    };
    let entries = std::fs::read_dir(root).map_err(|_| not_found())?;
    entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir())
        .min()
        .ok_or_else(not_found)
}

/// The ordered, non-empty list of images of a dataset.
#[derive(Debug, Clone)]
pub struct Catalog {
    images: Vec<ImageDescriptor>,
}

impl Catalog {
    /// List the images under `<dataset_dir>/images`.
    ///
    /// A missing images directory or an empty image set is a setup error.
    pub fn scan(dataset_dir: &Path, extensions: &[String]) -> Result<Self, SetupError> {
        let images_dir = dataset_dir.join(IMAGES_DIRNAME);
        if !images_dir.is_dir() {
            return Err(SetupError::ImagesDirMissing { path: images_dir });
        }

        let mut paths: Vec<PathBuf> = std::fs::read_dir(&images_dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file() && has_extension(path, extensions))
            .collect();
        paths.sort();

        if paths.is_empty() {
            return Err(SetupError::NoImages { path: images_dir });
        }
        log::info!("{} images found in {:?}", paths.len(), images_dir);

        Ok(Self {
            images: paths.into_iter().map(ImageDescriptor::from_path).collect(),
        })
    }

    pub(crate) fn len(&self) -> usize {
        self.images.len()
    }

    /// The image at `index`, wrapping around the catalog.
    pub fn get(&self, index: usize) -> &ImageDescriptor {
        &self.images[index % self.images.len()]
    }

    /// Index of the image with the given file name.
    pub fn position(&self, file_name: &str) -> Option<usize> {
        self.images.iter().position(|i| i.file_name == file_name)
    }

    /// Index after `index`, wrapping from the last image to the first.
    pub fn next_index(&self, index: usize) -> usize {
        (index + 1) % self.images.len()
    }

    /// Index before `index`, wrapping from the first image to the last.
    pub fn previous_index(&self, index: usize) -> usize {
        let len = self.images.len();
        (index % len + len - 1) % len
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn extensions() -> Vec<String> {
        vec!["jpg".to_string()]
    }

    #[test]
    fn test_scan_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();
        let images = dir.path().join(IMAGES_DIRNAME);
        fs::create_dir(&images).unwrap();
        for name in ["b.jpg", "a.JPG", "c.png", "notes.txt"] {
            fs::write(images.join(name), b"x").unwrap();
        }

        let catalog = Catalog::scan(dir.path(), &extensions()).unwrap();
        let names: Vec<&str> = catalog.images.iter().map(|i| i.file_name.as_str()).collect();
        assert_eq!(names, vec!["a.JPG", "b.jpg"]);
        assert_eq!(catalog.get(0).stem, "a");
    }

    #[test]
    fn test_scan_missing_images_dir() {
        let dir = tempfile::tempdir().unwrap();
        let result = Catalog::scan(dir.path(), &extensions());
        assert!(matches!(result, Err(SetupError::ImagesDirMissing { .. })));
    }

    #[test]
    fn test_scan_empty_images_dir() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join(IMAGES_DIRNAME)).unwrap();
        let result = Catalog::scan(dir.path(), &extensions());
        assert!(matches!(result, Err(SetupError::NoImages { .. })));
    }

    #[test]
    fn test_navigation_wraps() {
        let catalog = Catalog {
            images: ["a.jpg", "b.jpg", "c.jpg"]
                .iter()
                .map(|name| ImageDescriptor::from_path(PathBuf::from("images").join(name)))
                .collect(),
        };

        assert_eq!(catalog.get(0).file_name, "a.jpg");
        assert_eq!(catalog.next_index(2), 0);
        assert_eq!(catalog.previous_index(0), 2);
        assert_eq!(catalog.next_index(0), 1);
        assert_eq!(catalog.previous_index(2), 1);
        assert_eq!(catalog.position("b.jpg"), Some(1));
        assert_eq!(catalog.position("zzz.jpg"), None);
    }

    #[test]
    fn test_descriptor_names() {
        let image = ImageDescriptor::from_path(PathBuf::from("data/images/scan.v2.jpg"));
        assert_eq!(image.file_name, "scan.v2.jpg");
        assert_eq!(image.stem, "scan.v2");
    }

    #[test]
    fn test_first_dataset_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(matches!(
            first_dataset_dir(dir.path()),
            Err(SetupError::NoDataset { .. })
        ));

        fs::create_dir(dir.path().join("receipts_b")).unwrap();
        fs::create_dir(dir.path().join("receipts_a")).unwrap();
        fs::write(dir.path().join("aaa.txt"), b"").unwrap();
        assert_eq!(
            first_dataset_dir(dir.path()).unwrap(),
            dir.path().join("receipts_a")
        );

        assert!(first_dataset_dir(&dir.path().join("missing")).is_err());
    }

    #[test]
    fn test_extension_match_ignores_case() {
        let extensions = vec!["jpg".to_string(), "png".to_string()];
        assert!(has_extension(Path::new("a.JPG"), &extensions));
        assert!(has_extension(Path::new("dir/b.png"), &extensions));
        assert!(!has_extension(Path::new("c.jpeg"), &extensions));
        assert!(!has_extension(Path::new("jpg"), &extensions));
    }
}
