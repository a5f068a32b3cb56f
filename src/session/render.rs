//! Drawing fields onto frames.
//!
//! Sizes scale with the frame width so labels look the same whatever the
//! configured display width.

use fieldbox_view::{Color, Frame, Point};

use crate::constants::{
    CONTENT_TEXT_SHIFT, FIELD_TEXT_Y_SHIFT, RECT_WIDTH, TEXT_COLOR, TEXT_SIZE_RATIO,
    TEXT_SPACE_WIDTH_RATIO,
};
use crate::model::FieldEntry;

fn text_size(frame: &Frame) -> f32 {
    frame.width() as f32 * TEXT_SIZE_RATIO
}

/// Draw a field's rectangle with its name under the bottom edge.
pub(crate) fn draw_box(frame: &mut Frame, top_left: Point, bottom_right: Point, name: &str, color: Color) {
    frame.draw_rect(top_left, bottom_right, color, RECT_WIDTH);

    let size = text_size(frame);
    let origin = Point::new(
        top_left.x,
        bottom_right.y + FIELD_TEXT_Y_SHIFT + size.round() as i32,
    );
    frame.put_text(name, origin, TEXT_COLOR, size);
}

/// Draw the `index`-th typed character of a field's content above its box.
pub(crate) fn draw_char(frame: &mut Frame, top_left: Point, index: usize, ch: char) {
    let space = frame.width() as f32 * TEXT_SPACE_WIDTH_RATIO;
    let origin = Point::new(
        top_left.x + (space * index as f32).round() as i32 - CONTENT_TEXT_SHIFT,
        top_left.y - CONTENT_TEXT_SHIFT,
    );
    let size = text_size(frame);
    frame.put_text(ch.to_string(), origin, TEXT_COLOR, size);
}

/// Draw a stored field: box, name and content.
///
/// Fields without a box are not drawn.
pub(crate) fn draw_entry(frame: &mut Frame, name: &str, entry: &FieldEntry, color: Color) {
    let Some(bbox) = entry.bbox else {
        return;
    };
    let (top_left, bottom_right) = bbox.to_pixels(frame.width(), frame.height());
    draw_box(frame, top_left, bottom_right, name, color);
    for (i, ch) in entry.content.chars().enumerate() {
        draw_char(frame, top_left, i, ch);
    }
}
