//! Per-image annotation records.
//!
//! A record maps every field of the schema, in schema order, to a bounding
//! box and a text content. Boxes are stored normalized to `[0, 1]` and
//! rounded to [`BBOX_RATIO_PRECISION`] decimals.
//!
//! On disk a record is a JSON object keyed by field name:
//!
//! ```json
//! {
//!     "total": { "bbox": [0.1, 0.0667, 0.4, 0.4], "content": "42" },
//!     "date": { "bbox": [], "content": "" }
//! }
//! ```

use std::fmt;

use fieldbox_view::Point;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::BBOX_RATIO_PRECISION;
use crate::model::FieldSchema;

/// Bounding box in normalized `[0, 1]` image coordinates, with
/// `x0 <= x1` and `y0 <= y1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedBox {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

impl NormalizedBox {
    /// Map back to pixel corners of an image of the given size.
    pub fn to_pixels(&self, width: u32, height: u32) -> (Point, Point) {
        let (w, h) = (width as f64, height as f64);
        (
            Point::new((self.x0 * w).round() as i32, (self.y0 * h).round() as i32),
            Point::new((self.x1 * w).round() as i32, (self.y1 * h).round() as i32),
        )
    }

    pub fn to_array(self) -> [f64; 4] {
        [self.x0, self.y0, self.x1, self.y1]
    }
}

/// A drag converted to a box: the clamped pixel corners used for drawing,
/// and the normalized box that gets stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragBox {
    pub top_left: Point,
    pub bottom_right: Point,
    pub normalized: NormalizedBox,
}

/// Round a ratio to the stored precision.
pub fn round_ratio(value: f64) -> f64 {
    let factor = 10f64.powi(BBOX_RATIO_PRECISION);
    (value * factor).round() / factor
}

/// Convert a pointer drag into a box on an image of `width` x `height`.
///
/// Corners are reordered if the drag went up or left, then clamped to the
/// image before normalizing, so an out-of-canvas drag never yields negative
/// or greater-than-one ratios.
pub fn normalize_drag(anchor: Point, release: Point, width: u32, height: u32) -> DragBox {
    let (w, h) = (width as i32, height as i32);
    let x0 = anchor.x.min(release.x).clamp(0, w);
    let x1 = anchor.x.max(release.x).clamp(0, w);
    let y0 = anchor.y.min(release.y).clamp(0, h);
    let y1 = anchor.y.max(release.y).clamp(0, h);

    let ratio = |v: i32, total: u32| {
        if total == 0 {
            0.0
        } else {
            round_ratio(v as f64 / total as f64)
        }
    };

    DragBox {
        top_left: Point::new(x0, y0),
        bottom_right: Point::new(x1, y1),
        normalized: NormalizedBox {
            x0: ratio(x0, width),
            y0: ratio(y0, height),
            x1: ratio(x1, width),
            y1: ratio(y1, height),
        },
    }
}

/// Value of one field: an optional box and a (digit) content string.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldEntry {
    #[serde(with = "bbox_format", default)]
    pub bbox: Option<NormalizedBox>,
    #[serde(default)]
    pub content: String,
}

impl FieldEntry {
    /// A field is complete when it has both a box and a content.
    pub fn is_complete(&self) -> bool {
        self.bbox.is_some() && !self.content.is_empty()
    }
}

/// `[]` for no box, `[x0, y0, x1, y1]` otherwise.
mod bbox_format {
    use super::*;

    pub fn serialize<S: Serializer>(
        bbox: &Option<NormalizedBox>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match bbox {
            None => serializer.serialize_seq(Some(0))?.end(),
            Some(b) => {
                let mut seq = serializer.serialize_seq(Some(4))?;
                for v in b.to_array() {
                    seq.serialize_element(&v)?;
                }
                seq.end()
            }
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<NormalizedBox>, D::Error> {
        let values = Vec::<f64>::deserialize(deserializer)?;
        match values.as_slice() {
            [] => Ok(None),
            [x0, y0, x1, y1] => Ok(Some(NormalizedBox {
                x0: *x0,
                y0: *y0,
                x1: *x1,
                y1: *y1,
            })),
            other => Err(de::Error::invalid_length(
                other.len(),
                &"an empty array or four coordinates",
            )),
        }
    }
}

/// Why a record does not fit the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaMismatch {
    /// Schema fields absent from the record
    pub missing: Vec<String>,
    /// Record fields not in the schema
    pub unexpected: Vec<String>,
}

impl fmt::Display for SchemaMismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "missing fields {:?}, unexpected fields {:?}",
            self.missing, self.unexpected
        )
    }
}

/// Field name to value mapping for one image, in field order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AnnotationRecord {
    fields: Vec<(String, FieldEntry)>,
}

impl AnnotationRecord {
    /// An empty record with every schema field.
    pub fn from_schema(schema: &FieldSchema) -> Self {
        Self {
            fields: schema
                .iter()
                .map(|name| (name.to_string(), FieldEntry::default()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&FieldEntry> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, e)| e)
    }

    /// Iterate over `(field name, entry)` in order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldEntry)> {
        self.fields.iter().map(|(n, e)| (n.as_str(), e))
    }

    /// Every field has a box and a content.
    pub fn is_complete(&self) -> bool {
        self.fields.iter().all(|(_, e)| e.is_complete())
    }

    /// Number of leading complete fields.
    pub fn complete_prefix(&self) -> usize {
        self.fields
            .iter()
            .take_while(|(_, e)| e.is_complete())
            .count()
    }

    /// Set a field's box and content. Returns false for an unknown field.
    pub fn commit_field(&mut self, name: &str, bbox: NormalizedBox, content: String) -> bool {
        match self.entry_mut(name) {
            Some(entry) => {
                entry.bbox = Some(bbox);
                entry.content = content;
                true
            }
            None => false,
        }
    }

    /// Reset a field to no box and no content. Returns false for an unknown field.
    pub fn clear_field(&mut self, name: &str) -> bool {
        match self.entry_mut(name) {
            Some(entry) => {
                *entry = FieldEntry::default();
                true
            }
            None => false,
        }
    }

    /// Check that the record has exactly the schema's fields and put them
    /// in schema order.
    pub fn conform_to(mut self, schema: &FieldSchema) -> Result<Self, SchemaMismatch> {
        let missing: Vec<String> = schema
            .iter()
            .filter(|name| self.get(name).is_none())
            .map(str::to_string)
            .collect();
        let unexpected: Vec<String> = self
            .fields
            .iter()
            .filter(|(name, _)| !schema.contains(name))
            .map(|(name, _)| name.clone())
            .collect();
        if !missing.is_empty() || !unexpected.is_empty() {
            return Err(SchemaMismatch {
                missing,
                unexpected,
            });
        }

        let mut ordered = Vec::with_capacity(schema.len());
        for name in schema.iter() {
            if let Some(pos) = self.fields.iter().position(|(n, _)| n == name) {
                ordered.push(self.fields.swap_remove(pos));
            }
        }
        Ok(Self { fields: ordered })
    }

    fn entry_mut(&mut self, name: &str) -> Option<&mut FieldEntry> {
        self.fields
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, e)| e)
    }
}

impl Serialize for AnnotationRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, entry) in &self.fields {
            map.serialize_entry(name, entry)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AnnotationRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct RecordVisitor;

        impl<'de> Visitor<'de> for RecordVisitor {
            type Value = AnnotationRecord;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of fields")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut fields: Vec<(String, FieldEntry)> = Vec::new();
                while let Some((name, entry)) = map.next_entry::<String, FieldEntry>()? {
                    if fields.iter().any(|(n, _)| *n == name) {
                        return Err(de::Error::custom(format!("duplicate field '{}'", name)));
                    }
                    fields.push((name, entry));
                }
                Ok(AnnotationRecord { fields })
            }
        }

        deserializer.deserialize_map(RecordVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> FieldSchema {
        FieldSchema::new(vec!["total".into(), "date".into(), "tax".into()])
    }

    #[test]
    fn test_reversed_drag_matches_forward_drag() {
        let forward = normalize_drag(Point::new(20, 10), Point::new(80, 60), 200, 150);
        let reversed = normalize_drag(Point::new(80, 60), Point::new(20, 10), 200, 150);

        assert_eq!(forward, reversed);
        assert_eq!(forward.normalized.to_array(), [0.1, 0.0667, 0.4, 0.4]);
        assert_eq!(forward.top_left, Point::new(20, 10));
        assert_eq!(forward.bottom_right, Point::new(80, 60));
    }

    #[test]
    fn test_drag_clamped_to_canvas() {
        let drag = normalize_drag(Point::new(-50, 30), Point::new(250, 40), 200, 150);
        assert_eq!(drag.normalized.to_array(), [0.0, 0.2, 1.0, 0.2667]);
        assert_eq!(drag.top_left, Point::new(0, 30));
        assert_eq!(drag.bottom_right, Point::new(200, 40));
    }

    #[test]
    fn test_drag_fully_outside_collapses_to_edge() {
        let drag = normalize_drag(Point::new(300, -10), Point::new(400, -40), 200, 150);
        assert_eq!(drag.normalized.to_array(), [1.0, 0.0, 1.0, 0.0]);
    }

    #[test]
    fn test_round_ratio() {
        assert_eq!(round_ratio(1.0 / 3.0), 0.3333);
        assert_eq!(round_ratio(2.0 / 3.0), 0.6667);
        assert_eq!(round_ratio(0.5), 0.5);
    }

    #[test]
    fn test_field_completion() {
        let mut entry = FieldEntry::default();
        assert!(!entry.is_complete());
        entry.content = "12".into();
        assert!(!entry.is_complete());
        entry.bbox = Some(NormalizedBox {
            x0: 0.1,
            y0: 0.1,
            x1: 0.2,
            y1: 0.2,
        });
        assert!(entry.is_complete());
        entry.content.clear();
        assert!(!entry.is_complete());
    }

    #[test]
    fn test_commit_and_clear() {
        let mut record = AnnotationRecord::from_schema(&schema());
        let bbox = NormalizedBox {
            x0: 0.1,
            y0: 0.2,
            x1: 0.3,
            y1: 0.4,
        };
        assert!(record.commit_field("total", bbox, "42".into()));
        assert!(!record.commit_field("missing", bbox, "1".into()));
        assert_eq!(record.complete_prefix(), 1);
        assert!(!record.is_complete());

        assert!(record.commit_field("date", bbox, "7".into()));
        assert!(record.commit_field("tax", bbox, "3".into()));
        assert!(record.is_complete());
        assert_eq!(record.complete_prefix(), 3);

        assert!(record.clear_field("date"));
        assert_eq!(record.complete_prefix(), 1);
        assert_eq!(record.get("date"), Some(&FieldEntry::default()));
    }

    #[test]
    fn test_json_shape() {
        let mut record = AnnotationRecord::from_schema(&schema());
        record.commit_field(
            "date",
            NormalizedBox {
                x0: 0.1,
                y0: 0.0667,
                x1: 0.4,
                y1: 0.4,
            },
            "2024".into(),
        );
        let json = serde_json::to_string(&record).unwrap();
        assert_eq!(
            json,
            r#"{"total":{"bbox":[],"content":""},"date":{"bbox":[0.1,0.0667,0.4,0.4],"content":"2024"},"tax":{"bbox":[],"content":""}}"#
        );
    }

    #[test]
    fn test_json_round_trip_keeps_order() {
        let schema = FieldSchema::new(vec!["z".into(), "a".into(), "m".into()]);
        let mut record = AnnotationRecord::from_schema(&schema);
        record.commit_field(
            "a",
            NormalizedBox {
                x0: 0.0,
                y0: 0.25,
                x1: 1.0,
                y1: 0.5,
            },
            "0099".into(),
        );
        let json = serde_json::to_string_pretty(&record).unwrap();
        let back: AnnotationRecord = serde_json::from_str(&json).unwrap();

        assert_eq!(back, record);
        let names: Vec<&str> = back.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_bad_bbox_length_rejected() {
        let result: Result<AnnotationRecord, _> =
            serde_json::from_str(r#"{"total": {"bbox": [0.1, 0.2], "content": ""}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_field_rejected() {
        let result: Result<AnnotationRecord, _> = serde_json::from_str(
            r#"{"a": {"bbox": [], "content": ""}, "a": {"bbox": [], "content": ""}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_conform_reorders_to_schema() {
        let record: AnnotationRecord = serde_json::from_str(
            r#"{"tax": {"bbox": [], "content": ""},
                "total": {"bbox": [], "content": ""},
                "date": {"bbox": [], "content": ""}}"#,
        )
        .unwrap();
        let record = record.conform_to(&schema()).unwrap();
        let names: Vec<&str> = record.iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["total", "date", "tax"]);
    }

    #[test]
    fn test_conform_reports_mismatch() {
        let record: AnnotationRecord = serde_json::from_str(
            r#"{"total": {"bbox": [], "content": ""}, "extra": {"bbox": [], "content": ""}}"#,
        )
        .unwrap();
        let err = record.conform_to(&schema()).unwrap_err();
        assert_eq!(err.missing, vec!["date".to_string(), "tax".to_string()]);
        assert_eq!(err.unexpected, vec!["extra".to_string()]);
    }
}
