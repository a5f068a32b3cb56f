use thiserror::Error;

/// Errors raised while running the viewer window.
#[derive(Error, Debug)]
pub enum ViewError {
    /// The native window or its event loop failed.
    #[error("Window error: {0}")]
    Window(#[from] eframe::Error),
}
