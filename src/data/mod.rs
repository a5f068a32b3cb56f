//! Dataset images: discovery and loading.
//!
//! This module provides:
//! - `Catalog`: the ordered list of images under `<dataset>/images`
//! - `ImageLoader`: the seam between the session and image decoding, with
//!   `DiskImageLoader` as the implementation used by the application

mod catalog;
mod loader;

pub use catalog::{first_dataset_dir, Catalog, ImageDescriptor};
pub use loader::{scaled_height, DiskImageLoader, ImageLoader, LoaderError};
