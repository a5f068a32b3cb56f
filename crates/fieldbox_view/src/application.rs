use crate::error::ViewError;
use crate::event::{Event, Key, MouseButton, Point};
use crate::frame::Frame;

/// Core application trait driven by the viewer window.
///
/// The window owns the event loop. Each input event is handed to
/// [`Application::on_event`] and processed to completion before the next one
/// is delivered; afterwards the window shows [`Application::frame`].
pub trait Application {
    /// Return the window title for the application.
    fn title(&self) -> String;

    /// The frame currently on display.
    fn frame(&self) -> &Frame;

    /// Handle one input event. Returning [`Control::Exit`] closes the window.
    fn on_event(&mut self, event: Event) -> Control;
}

/// What the window should do after an event has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

/// Settings for running an application.
pub struct Settings {
    /// Window title shown before the application provides its own.
    pub window_title: String,

    /// Initial window size
    pub window_size: (f32, f32),

    /// Whether the window should be resizable
    pub resizable: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            window_title: "fieldbox".to_string(),
            window_size: (1024.0, 768.0),
            resizable: true,
        }
    }
}

/// Run an application with the given settings.
///
/// Creates a window and runs the event loop. Returns when the window closes.
pub fn run<A: Application + 'static>(app: A, settings: Settings) -> Result<(), ViewError> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([settings.window_size.0, settings.window_size.1])
            .with_resizable(settings.resizable)
            .with_title(settings.window_title.clone()),
        ..Default::default()
    };

    log::debug!("Opening viewer window '{}'", settings.window_title);
    eframe::run_native(
        &settings.window_title,
        options,
        Box::new(move |_cc| Ok(Box::new(ApplicationState::new(app)))),
    )?;
    Ok(())
}

/// The application runtime state.
/// This is internal and managed by the viewer.
struct ApplicationState<A: Application> {
    app: A,
    texture: Option<egui::TextureHandle>,
    texture_dirty: bool,
    title: String,
    /// Where the image was drawn last frame, used to map pointer positions.
    image_rect: egui::Rect,
    exiting: bool,
}

impl<A: Application> ApplicationState<A> {
    fn new(app: A) -> Self {
        Self {
            app,
            texture: None,
            texture_dirty: true,
            title: String::new(),
            image_rect: egui::Rect::NOTHING,
            exiting: false,
        }
    }

    /// Convert a screen position into image pixel coordinates.
    fn to_image(&self, pos: egui::Pos2) -> Point {
        let frame = self.app.frame();
        let rect = self.image_rect;
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return Point::new(pos.x as i32, pos.y as i32);
        }
        let sx = frame.width() as f32 / rect.width();
        let sy = frame.height() as f32 / rect.height();
        Point::new(
            ((pos.x - rect.min.x) * sx).floor() as i32,
            ((pos.y - rect.min.y) * sy).floor() as i32,
        )
    }

    fn translate(&self, event: &egui::Event) -> Option<Event> {
        match event {
            egui::Event::PointerMoved(pos) => Some(Event::PointerMoved {
                position: self.to_image(*pos),
            }),
            egui::Event::PointerButton {
                pos,
                button,
                pressed,
                ..
            } => {
                let button = match button {
                    egui::PointerButton::Primary => MouseButton::Left,
                    egui::PointerButton::Secondary => MouseButton::Right,
                    egui::PointerButton::Middle => MouseButton::Middle,
                    egui::PointerButton::Extra1 => MouseButton::Other(1),
                    egui::PointerButton::Extra2 => MouseButton::Other(2),
                };
                let position = self.to_image(*pos);
                Some(if *pressed {
                    Event::PointerPressed { button, position }
                } else {
                    Event::PointerReleased { button, position }
                })
            }
            egui::Event::Key {
                key,
                pressed: true,
                repeat: false,
                ..
            } => Key::from_egui(*key).map(Event::KeyPressed),
            _ => None,
        }
    }

    fn dispatch(&mut self, ctx: &egui::Context, event: Event) {
        if self.exiting {
            return;
        }
        let closing = event == Event::CloseRequested;
        self.texture_dirty = true;
        if self.app.on_event(event) == Control::Exit {
            self.exiting = true;
            if !closing {
                ctx.send_viewport_cmd(egui::ViewportCommand::Close);
            }
        }
    }

    fn upload_texture(&mut self, ctx: &egui::Context) {
        if !self.texture_dirty && self.texture.is_some() {
            return;
        }
        let pixels = self.app.frame().pixels();
        let size = [pixels.width() as usize, pixels.height() as usize];
        let image = egui::ColorImage::from_rgb(size, pixels.as_raw());
        match &mut self.texture {
            Some(texture) => texture.set(image, egui::TextureOptions::NEAREST),
            None => {
                self.texture =
                    Some(ctx.load_texture("frame", image, egui::TextureOptions::NEAREST));
            }
        }
        self.texture_dirty = false;
    }

    fn paint(&mut self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::click_and_drag());
        let canvas = response.rect;
        painter.rect_filled(canvas, 0.0, egui::Color32::from_gray(30));

        let frame = self.app.frame();
        let (w, h) = (frame.width() as f32, frame.height() as f32);
        if w <= 0.0 || h <= 0.0 {
            return;
        }
        // Keep the aspect ratio and fill as much of the canvas as possible.
        let scale = (canvas.width() / w).min(canvas.height() / h);
        let rect = egui::Rect::from_center_size(canvas.center(), egui::vec2(w * scale, h * scale));
        self.image_rect = rect;

        if let Some(texture) = &self.texture {
            painter.image(
                texture.id(),
                rect,
                egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
                egui::Color32::WHITE,
            );
        }

        for mark in frame.marks() {
            let pos = rect.min
                + egui::vec2(mark.origin.x as f32 * scale, mark.origin.y as f32 * scale);
            let [r, g, b] = mark.color;
            painter.text(
                pos,
                egui::Align2::LEFT_BOTTOM,
                &mark.text,
                egui::FontId::monospace((mark.size * scale).max(6.0)),
                egui::Color32::from_rgb(r, g, b),
            );
        }
    }
}

impl<A: Application> eframe::App for ApplicationState<A> {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let events = ctx.input(|i| i.events.clone());
        for event in &events {
            if let Some(event) = self.translate(event) {
                self.dispatch(ctx, event);
            }
        }
        if ctx.input(|i| i.viewport().close_requested()) {
            self.dispatch(ctx, Event::CloseRequested);
        }

        let title = self.app.title();
        if title != self.title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.title = title;
        }

        self.upload_texture(ctx);
        egui::CentralPanel::default().show(ctx, |ui| self.paint(ui));
    }
}
