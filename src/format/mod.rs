//! Annotation files on disk.
//!
//! A dataset directory looks like this:
//!
//! ```text
//! <dataset_dir>/
//!   images/*.jpg                 input, read-only
//!   template.json                {field_name: {"bbox": [], "content": ""}, ...}
//!   annotations/<stem>.json      one per image, same shape as the template
//!   .cache                       basename of the last viewed image
//! ```
//!
//! This module covers the template and the annotation files; the cache is
//! handled by [`SessionCache`](crate::state::SessionCache).

mod error;
mod store;
mod template;

pub use error::RecordError;
pub use store::AnnotationStore;
pub use template::load_schema;
