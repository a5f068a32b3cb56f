//! The annotation session.
//!
//! [`AnnotationSession`] owns everything needed to annotate one dataset: the
//! image catalog, the record store, the undo history of the current image
//! and the position within its fields. Input events are fed one at a time
//! through [`AnnotationSession::handle_event`]; each is processed to
//! completion, and every change to a record is saved before it returns.
//!
//! Per image, fields are annotated in schema order. For each field the user
//! drags a box, types its digits and confirms:
//!
//! ```text
//!   Idle --press--> Drawing --release--> TextEntry --confirm--> Idle (next field)
//! ```
//!
//! Once every field is done the cursor is full and pointer input is ignored
//! until the user undoes, cleans or moves to another image.

mod render;


use std::path::Path;

use fieldbox_view::{Control, Event, Frame, Key, MouseButton, Point};

use crate::config::AppConfig;
use crate::constants::{
    APP_NAME, PLACEHOLDER_COLOR, RECT_COMPLETE_COLOR, RECT_PENDING_COLOR, RECT_WIDTH,
    TEMPLATE_FILENAME,
};
use crate::data::{Catalog, ImageDescriptor, ImageLoader};
use crate::error::SetupError;
use crate::format::{load_schema, AnnotationStore};
use crate::keybindings::{Action, KeyBindings};
use crate::model::{normalize_drag, AnnotationRecord, DragBox, FieldCursor};
use crate::state::{CompletionTracker, SessionCache, SnapshotHistory};

/// What the session is doing with the current field.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    /// Waiting for a box to be drawn, or all fields done.
    Idle,
    /// Left button held, box being dragged from `anchor`.
    Drawing { anchor: Point },
    /// Box released, digits being typed.
    TextEntry { drag: DragBox, content: String },
}

/// Interactive annotation of one dataset.
pub struct AnnotationSession {
    catalog: Catalog,
    store: AnnotationStore,
    cache: SessionCache,
    loader: Box<dyn ImageLoader>,
    keybindings: KeyBindings,
    completion: CompletionTracker,

    /// Index of the current image in the catalog
    image_index: usize,
    /// Record of the current image, mirrors its file on disk
    record: AnnotationRecord,
    cursor: FieldCursor,
    mode: Mode,

    /// The current image as loaded, with nothing drawn on it
    base_frame: Frame,
    /// What is on screen
    frame: Frame,
    history: SnapshotHistory,
}

impl AnnotationSession {
    /// Open a dataset directory and start on the cached image, or the first
    /// one when there is no usable cache.
    pub fn open(
        dataset_dir: &Path,
        config: &AppConfig,
        loader: Box<dyn ImageLoader>,
    ) -> Result<Self, SetupError> {
        let catalog = Catalog::scan(dataset_dir, &config.preferences.image_extensions)?;
        let schema = load_schema(&dataset_dir.join(TEMPLATE_FILENAME))?;
        let store = AnnotationStore::open(dataset_dir, schema)?;
        let cache = SessionCache::for_dataset(dataset_dir);
        let completion = CompletionTracker::initial_count(&store);

        let start = match cache.read() {
            Some(name) => catalog.position(&name).unwrap_or_else(|| {
                log::warn!("Cached image {} is not in the dataset, starting at the first image", name);
                0
            }),
            None => 0,
        };

        let record = store.default_record();
        let cursor = FieldCursor::new(store.schema().len());
        let mut session = Self {
            catalog,
            store,
            cache,
            loader,
            keybindings: config.keybindings.clone(),
            completion,
            image_index: start,
            record,
            cursor,
            mode: Mode::Idle,
            base_frame: Frame::blank(1, 1, PLACEHOLDER_COLOR),
            frame: Frame::blank(1, 1, PLACEHOLDER_COLOR),
            history: SnapshotHistory::new(config.preferences.history_limit),
        };
        session.open_image(start);
        Ok(session)
    }

    /// Process one input event.
    pub fn handle_event(&mut self, event: Event) -> Control {
        match event {
            Event::PointerPressed {
                button: MouseButton::Left,
                position,
            } => self.on_pointer_down(position),
            Event::PointerMoved { position } => self.on_pointer_move(position),
            Event::PointerReleased {
                button: MouseButton::Left,
                position,
            } => self.on_pointer_up(position),
            Event::PointerPressed { .. } | Event::PointerReleased { .. } => {}
            Event::KeyPressed(key) => return self.on_key(key),
            Event::CloseRequested => return self.quit(),
        }
        Control::Continue
    }

    /// Window title: image name, position and overall progress.
    pub fn title(&self) -> String {
        format!(
            "{} {} ({}/{}) Completion: {:.1}%",
            APP_NAME,
            self.current_image().file_name,
            self.image_index + 1,
            self.catalog.len(),
            self.completion.percent(self.catalog.len())
        )
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    pub fn current_image(&self) -> &ImageDescriptor {
        self.catalog.get(self.image_index)
    }

    pub fn image_index(&self) -> usize {
        self.image_index
    }

    pub fn record(&self) -> &AnnotationRecord {
        &self.record
    }

    pub fn cursor(&self) -> FieldCursor {
        self.cursor
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn completed_images(&self) -> usize {
        self.completion.count()
    }

    pub fn history(&self) -> &SnapshotHistory {
        &self.history
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    // ------------------------------------------------------------------
    // Images
    // ------------------------------------------------------------------

    /// Show an image with its already committed fields and put the cursor
    /// after them.
    fn open_image(&mut self, index: usize) {
        self.image_index = index % self.catalog.len();
        let image = self.catalog.get(self.image_index).clone();

        let frame = match self.loader.load(&image) {
            Ok(frame) => frame,
            Err(e) => {
                log::error!("{}", e);
                let width = self.loader.display_width();
                Frame::blank(width, (width * 3 / 4).max(1), PLACEHOLDER_COLOR)
            }
        };
        self.base_frame = frame.clone();
        self.frame = frame;
        self.history.reset();
        self.history.push(self.frame.clone());
        self.mode = Mode::Idle;

        self.record = self.store.load_or_create(&image);
        let done = self.record.complete_prefix();
        for (name, entry) in self.record.iter().take(done) {
            render::draw_entry(&mut self.frame, name, entry, RECT_COMPLETE_COLOR);
            self.history.push(self.frame.clone());
        }
        self.cursor = FieldCursor::at(done, self.store.schema().len());

        log::info!(
            "🖼️ {} ({}/{}), {} of {} fields done",
            image.file_name,
            self.image_index + 1,
            self.catalog.len(),
            done,
            self.store.schema().len()
        );
        self.cache.write(&image.file_name);
    }

    fn next_image(&mut self) {
        self.open_image(self.catalog.next_index(self.image_index));
    }

    fn previous_image(&mut self) {
        self.open_image(self.catalog.previous_index(self.image_index));
    }

    // ------------------------------------------------------------------
    // Pointer
    // ------------------------------------------------------------------

    fn on_pointer_down(&mut self, position: Point) {
        if self.cursor.is_full() {
            return;
        }
        // A new press replaces a box that was never confirmed.
        self.drop_pending();
        self.history.push(self.frame.clone());
        self.mode = Mode::Drawing { anchor: position };
        log::debug!("✏️ Started box at ({}, {})", position.x, position.y);
    }

    fn on_pointer_move(&mut self, position: Point) {
        let Mode::Drawing { anchor } = self.mode else {
            return;
        };
        if let Some(previous) = self.history.pop_to_previous() {
            self.frame = previous;
        }
        self.frame
            .draw_rect(anchor, position, RECT_PENDING_COLOR, RECT_WIDTH);
        self.history.push(self.frame.clone());
    }

    fn on_pointer_up(&mut self, position: Point) {
        let Mode::Drawing { anchor } = self.mode else {
            return;
        };
        let Some(name) = self.cursor.current_field(self.store.schema()).map(str::to_string) else {
            self.mode = Mode::Idle;
            return;
        };
        if let Some(previous) = self.history.pop_to_previous() {
            self.frame = previous;
        }

        let drag = normalize_drag(anchor, position, self.frame.width(), self.frame.height());
        render::draw_box(
            &mut self.frame,
            drag.top_left,
            drag.bottom_right,
            &name,
            RECT_PENDING_COLOR,
        );
        log::debug!("📐 {} box {:?}", name, drag.normalized.to_array());
        self.mode = Mode::TextEntry {
            drag,
            content: String::new(),
        };
    }

    // ------------------------------------------------------------------
    // Keyboard
    // ------------------------------------------------------------------

    fn on_key(&mut self, key: Key) -> Control {
        if let Some(digit) = key.digit() {
            self.on_digit(digit);
            return Control::Continue;
        }
        let Some(action) = self.keybindings.action_for_key(key) else {
            return Control::Continue;
        };
        log::debug!("⌨️ {:?} -> {}", key, action.name());
        match action {
            Action::PreviousImage => self.previous_image(),
            Action::NextImage => self.next_image(),
            Action::Undo => self.undo(),
            Action::Clean => self.clean(),
            Action::Confirm => self.confirm(),
            Action::Quit => return self.quit(),
        }
        Control::Continue
    }

    fn on_digit(&mut self, digit: char) {
        let Mode::TextEntry { drag, content } = &mut self.mode else {
            return;
        };
        render::draw_char(&mut self.frame, drag.top_left, content.len(), digit);
        content.push(digit);
    }

    /// Commit the pending box and content to the current field.
    fn confirm(&mut self) {
        let Mode::TextEntry { drag, content } = &self.mode else {
            return;
        };
        if content.is_empty() {
            log::debug!("Nothing typed, not confirming");
            return;
        }
        let Some(name) = self.cursor.current_field(self.store.schema()).map(str::to_string) else {
            return;
        };
        let (drag, content) = (*drag, content.clone());

        let was_complete = self.record.is_complete();
        self.record.commit_field(&name, drag.normalized, content);
        self.save_record();
        self.cursor.advance();

        self.restore_latest();
        if let Some(entry) = self.record.get(&name) {
            render::draw_entry(&mut self.frame, &name, entry, RECT_COMPLETE_COLOR);
        }
        self.history.push(self.frame.clone());
        self.mode = Mode::Idle;
        log::info!("✅ {} = {:?}", name, self.record.get(&name).map(|e| e.content.as_str()));

        if !was_complete && self.record.is_complete() {
            self.completion.increment();
            log::info!(
                "🎉 {} complete ({}/{})",
                self.current_image().file_name,
                self.completion.count(),
                self.catalog.len()
            );
        }
    }

    /// Step back one field, or drop the box being drawn.
    fn undo(&mut self) {
        if self.drop_pending() {
            log::debug!("⏪ Dropped pending box");
            return;
        }
        if self.cursor.index() == 0 {
            return;
        }

        let was_complete = self.record.is_complete();
        let exhausted = self.history.len() <= 1;
        let previous = self.history.pop_to_previous();

        self.cursor.retreat();
        if let Some(name) = self.cursor.current_field(self.store.schema()).map(str::to_string) {
            self.record.clear_field(&name);
            log::info!("⏪ Cleared {}", name);
        }
        self.save_record();

        match previous {
            Some(frame) if !exhausted => self.frame = frame,
            // The history no longer reaches back far enough: redraw.
            _ => self.redraw_from_record(),
        }

        if was_complete && !self.record.is_complete() {
            self.completion.decrement();
        }
    }

    /// Reset the current image to the template default.
    fn clean(&mut self) {
        let was_complete = self.record.is_complete();

        self.frame = self.base_frame.clone();
        self.history.reset();
        self.history.push(self.frame.clone());
        self.mode = Mode::Idle;

        self.record = self.store.default_record();
        self.save_record();
        self.cursor.reset();
        log::info!("🗑️ Cleaned {}", self.current_image().file_name);

        if was_complete {
            self.completion.decrement();
        }
    }

    fn quit(&mut self) -> Control {
        self.cache.write(&self.current_image().file_name);
        log::info!("Quitting on {}", self.current_image().file_name);
        Control::Exit
    }

    // ------------------------------------------------------------------
    // Helpers
    // ------------------------------------------------------------------

    /// Discard a box that is being drawn or labelled and show the frame from
    /// before it. Returns false when there was none.
    ///
    /// While drawing, the newest snapshot holds the live rectangle and is
    /// popped; in text entry the newest snapshot is already the pre-drag frame.
    fn drop_pending(&mut self) -> bool {
        match self.mode {
            Mode::Idle => return false,
            Mode::Drawing { .. } => {
                if let Some(previous) = self.history.pop_to_previous() {
                    self.frame = previous;
                }
            }
            Mode::TextEntry { .. } => self.restore_latest(),
        }
        self.mode = Mode::Idle;
        true
    }

    /// Put the newest snapshot back on screen.
    fn restore_latest(&mut self) {
        if let Some(latest) = self.history.latest() {
            self.frame = latest.clone();
        }
    }

    /// Rebuild the frame from the base image and the committed fields before
    /// the cursor, and restart the history from it.
    fn redraw_from_record(&mut self) {
        self.frame = self.base_frame.clone();
        for (name, entry) in self.record.iter().take(self.cursor.index()) {
            render::draw_entry(&mut self.frame, name, entry, RECT_COMPLETE_COLOR);
        }
        self.history.reset();
        self.history.push(self.frame.clone());
    }

    fn save_record(&self) {
        let image = self.current_image();
        if let Err(e) = self.store.save(image, &self.record) {
            log::error!("Failed to save {:?}: {}", self.store.path_for(image), e);
        }
    }
}
