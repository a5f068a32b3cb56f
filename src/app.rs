//! Window glue: runs an [`AnnotationSession`] inside the viewer.

use fieldbox_view::{Application, Control, Event, Frame, Settings, ViewError};

use crate::constants::APP_NAME;
use crate::session::AnnotationSession;

impl Application for AnnotationSession {
    fn title(&self) -> String {
        AnnotationSession::title(self)
    }

    fn frame(&self) -> &Frame {
        AnnotationSession::frame(self)
    }

    fn on_event(&mut self, event: Event) -> Control {
        self.handle_event(event)
    }
}

/// Window settings sized to the first frame of the session.
pub fn window_settings(session: &AnnotationSession) -> Settings {
    let frame = session.frame();
    Settings {
        window_title: format!("{} {}", APP_NAME, session.current_image().file_name),
        window_size: (frame.width() as f32, frame.height() as f32),
        resizable: true,
    }
}

/// Open the window and block until the session quits or the window closes.
pub fn run(session: AnnotationSession) -> Result<(), ViewError> {
    let settings = window_settings(&session);
    fieldbox_view::run(session, settings)
}
