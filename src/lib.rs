//! fieldbox - field-by-field image annotation
//!
//! Annotates a directory of images with a fixed schema of named fields. Each
//! field gets a bounding box, dragged with the mouse, and a short digit
//! label typed on the keyboard. Records are saved as one JSON file per image
//! after every change, and the session resumes on the last viewed image.

pub mod app;
pub mod config;
pub mod constants;
pub mod data;
pub mod error;
pub mod format;
pub mod keybindings;
pub mod model;
pub mod session;
pub mod state;

pub use config::AppConfig;
pub use error::SetupError;
pub use session::{AnnotationSession, Mode};
