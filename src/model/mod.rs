//! Data models for fieldbox.

mod annotation;
mod cursor;
mod schema;

pub use annotation::{
    normalize_drag, round_ratio, AnnotationRecord, DragBox, FieldEntry, NormalizedBox,
    SchemaMismatch,
};
pub use cursor::FieldCursor;
pub use schema::FieldSchema;
