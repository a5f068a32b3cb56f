//! Global constants for the fieldbox application

use fieldbox_view::Color;

/// Application name, used as the window title prefix.
pub const APP_NAME: &str = "fieldbox";

/// Sub-directory of a dataset holding the input images.
pub const IMAGES_DIRNAME: &str = "images";

/// Sub-directory of a dataset holding one annotation file per image.
pub const ANNOTATIONS_DIRNAME: &str = "annotations";

/// Extension of annotation files.
pub const ANNOTATION_EXTENSION: &str = "json";

/// Field schema every annotation file conforms to.
pub const TEMPLATE_FILENAME: &str = "template.json";

/// Single-line file holding the basename of the last viewed image.
pub const CACHE_FILENAME: &str = ".cache";

/// Optional per-dataset configuration file.
pub const CONFIG_FILENAME: &str = "fieldbox.json";

/// Directory searched for a dataset when none is given on the command line.
pub const DEFAULT_DATASET_ROOT: &str = "dataset";

/// Decimal places kept in normalized bounding box coordinates.
pub const BBOX_RATIO_PRECISION: i32 = 4;

/// Default width images are resized to for display.
pub const DEFAULT_DISPLAY_WIDTH: u32 = 800;

/// Default number of undo snapshots kept per image.
pub const DEFAULT_HISTORY_LIMIT: usize = 20;

/// Fewest undo snapshots that still leave room for the live drag rectangle.
pub const MIN_HISTORY_LIMIT: usize = 2;

/// Rectangle color of a committed field.
pub const RECT_COMPLETE_COLOR: Color = [5, 220, 5];

/// Rectangle color of a box still being drawn or labelled.
pub const RECT_PENDING_COLOR: Color = [5, 5, 220];

/// Stroke width of field rectangles, in display pixels.
pub const RECT_WIDTH: u32 = 2;

/// Color of field names and contents.
pub const TEXT_COLOR: Color = [220, 20, 20];

/// Glyph height of labels as a fraction of the display width.
pub const TEXT_SIZE_RATIO: f32 = 0.022;

/// Horizontal advance per typed character as a fraction of the display width.
pub const TEXT_SPACE_WIDTH_RATIO: f32 = 0.030;

/// Gap between the bottom edge of a box and its field name.
pub const FIELD_TEXT_Y_SHIFT: i32 = 10;

/// Offset of the content text from the top-left corner of a box.
pub const CONTENT_TEXT_SHIFT: i32 = 1;

/// Fill color used when an image cannot be decoded.
pub const PLACEHOLDER_COLOR: Color = [64, 64, 64];
