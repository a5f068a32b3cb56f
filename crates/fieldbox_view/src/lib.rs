//! fieldbox_view - the annotation window.
//!
//! Shows a rendered [`Frame`] scaled to the window, translates pointer and
//! keyboard input into image-space [`Event`]s, and provides the rectangle and
//! text primitives frames are drawn with.

mod application;
mod error;
mod event;
mod frame;

pub use application::{run, Application, Control, Settings};
pub use error::ViewError;
pub use event::{Event, Key, MouseButton, Point};
pub use frame::{Color, Frame, TextMark};
