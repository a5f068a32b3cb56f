//! Turning image files into display frames.
//!
//! The session asks an [`ImageLoader`] for a fresh frame each time it opens
//! an image. [`DiskImageLoader`] decodes the file with the `image` crate and
//! resizes it to the configured display width, keeping the aspect ratio.

use std::path::Path;

use fieldbox_view::Frame;
use image::imageops::FilterType;
use thiserror::Error;

use crate::data::ImageDescriptor;

/// Error type for loader operations.
#[derive(Debug, Error)]
#[error("Failed to load {path}: {message}")]
pub struct LoaderError {
    /// The file that failed to load
    pub path: String,
    /// Human-readable error message
    pub message: String,
}

impl LoaderError {
    /// Create a new loader error.
    pub fn new(path: &Path, message: impl Into<String>) -> Self {
        Self {
            path: path.display().to_string(),
            message: message.into(),
        }
    }
}

/// Source of display frames for dataset images.
pub trait ImageLoader {
    /// Decode and prepare the image for display.
    fn load(&self, image: &ImageDescriptor) -> Result<Frame, LoaderError>;

    /// Width of the frames this loader produces.
    fn display_width(&self) -> u32;
}

/// Loads images from disk and resizes them to a fixed width.
#[derive(Debug, Clone)]
pub struct DiskImageLoader {
    display_width: u32,
}

impl DiskImageLoader {
    pub fn new(display_width: u32) -> Self {
        Self {
            display_width: display_width.max(1),
        }
    }
}

/// Height of an image scaled to `target_width`, keeping the aspect ratio.
pub fn scaled_height(width: u32, height: u32, target_width: u32) -> u32 {
    if width == 0 {
        return height.max(1);
    }
    let scaled = (height as u64 * target_width as u64) / width as u64;
    (scaled as u32).max(1)
}

impl ImageLoader for DiskImageLoader {
    fn load(&self, image: &ImageDescriptor) -> Result<Frame, LoaderError> {
        let decoded = image::open(&image.path)
            .map_err(|e| LoaderError::new(&image.path, e.to_string()))?
            .to_rgb8();

        let height = scaled_height(decoded.width(), decoded.height(), self.display_width);
        let resized = image::imageops::resize(&decoded, self.display_width, height, FilterType::Nearest);
        log::debug!(
            "Loaded {} ({}x{} -> {}x{})",
            image.file_name,
            decoded.width(),
            decoded.height(),
            resized.width(),
            resized.height()
        );
        Ok(Frame::new(resized))
    }

    fn display_width(&self) -> u32 {
        self.display_width
    }
}
