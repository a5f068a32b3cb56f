//! Per-image annotation files under `<dataset>/annotations`.
//!
//! Every image gets `<stem>.json` on its first visit. Files are written
//! whole, pretty-printed with four-space indentation, fields in schema order.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::constants::{ANNOTATIONS_DIRNAME, ANNOTATION_EXTENSION};
use crate::data::ImageDescriptor;
use crate::format::RecordError;
use crate::model::{AnnotationRecord, FieldSchema};

/// Reads and writes the annotation files of one dataset.
#[derive(Debug, Clone)]
pub struct AnnotationStore {
    dir: PathBuf,
    schema: FieldSchema,
}

impl AnnotationStore {
    /// Open the annotations directory of a dataset, creating it if needed.
    pub fn open(dataset_dir: &Path, schema: FieldSchema) -> std::io::Result<Self> {
        let dir = dataset_dir.join(ANNOTATIONS_DIRNAME);
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir, schema })
    }

    pub fn schema(&self) -> &FieldSchema {
        &self.schema
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Annotation file of an image.
    pub fn path_for(&self, image: &ImageDescriptor) -> PathBuf {
        self.dir
            .join(format!("{}.{}", image.stem, ANNOTATION_EXTENSION))
    }

    /// An empty record with every schema field.
    pub fn default_record(&self) -> AnnotationRecord {
        AnnotationRecord::from_schema(&self.schema)
    }

    /// Read a record and check it against the schema.
    pub fn read(&self, path: &Path) -> Result<AnnotationRecord, RecordError> {
        let json = std::fs::read_to_string(path)?;
        let record: AnnotationRecord = serde_json::from_str(&json)?;
        Ok(record.conform_to(&self.schema)?)
    }

    /// Load an image's record, or create and persist an empty one on the
    /// first visit.
    ///
    /// An unreadable or non-conforming file is logged and replaced by the
    /// template default in memory; the file itself is left alone until the
    /// next save.
    pub fn load_or_create(&self, image: &ImageDescriptor) -> AnnotationRecord {
        let path = self.path_for(image);
        if !path.is_file() {
            let record = self.default_record();
            match self.write(&path, &record) {
                Ok(()) => log::debug!("Created {:?}", path),
                Err(e) => log::error!("Failed to create {:?}: {}", path, e),
            }
            return record;
        }

        match self.read(&path) {
            Ok(record) => record,
            Err(e) => {
                log::warn!("Failed to read {:?}, using template default: {}", path, e);
                self.default_record()
            }
        }
    }

    /// Persist an image's record.
    pub fn save(&self, image: &ImageDescriptor, record: &AnnotationRecord) -> Result<(), RecordError> {
        self.write(&self.path_for(image), record)
    }

    /// All annotation files currently in the directory.
    pub fn record_files(&self) -> std::io::Result<Vec<PathBuf>> {
        let mut files: Vec<PathBuf> = std::fs::read_dir(&self.dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| {
                p.is_file()
                    && p.extension()
                        .is_some_and(|ext| ext.eq_ignore_ascii_case(ANNOTATION_EXTENSION))
            })
            .collect();
        files.sort();
        Ok(files)
    }

    fn write(&self, path: &Path, record: &AnnotationRecord) -> Result<(), RecordError> {
        std::fs::write(path, to_pretty_json(record)?)?;
        Ok(())
    }
}

/// Serialize with four-space indentation.
fn to_pretty_json(record: &AnnotationRecord) -> Result<Vec<u8>, serde_json::Error> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    record.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NormalizedBox;

    fn schema() -> FieldSchema {
        FieldSchema::new(vec!["total".into(), "date".into()])
    }

    fn image(name: &str) -> ImageDescriptor {
        ImageDescriptor::from_path(PathBuf::from(format!("images/{}", name)))
    }

    #[test]
    fn test_first_visit_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = AnnotationStore::open(dir.path(), schema()).unwrap();
        let img = image("r1.jpg");

        let record = store.load_or_create(&img);
        assert_eq!(record, store.default_record());
        assert!(store.path_for(&img).is_file());
        assert!(store.path_for(&img).ends_with("annotations/r1.json"));
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = AnnotationStore::open(dir.path(), schema()).unwrap();
        let img = image("r1.jpg");

        let mut record = store.load_or_create(&img);
        record.commit_field(
            "date",
            NormalizedBox {
                x0: 0.25,
                y0: 0.5,
                x1: 0.75,
                y1: 0.6667,
            },
            "20240101".into(),
        );
        store.save(&img, &record).unwrap();

        assert_eq!(store.load_or_create(&img), record);
    }

    #[test]
    fn test_pretty_printed_with_four_spaces() {
        let dir = tempfile::tempdir().unwrap();
        let store = AnnotationStore::open(dir.path(), schema()).unwrap();
        let img = image("r1.jpg");
        store.save(&img, &store.default_record()).unwrap();

        let text = std::fs::read_to_string(store.path_for(&img)).unwrap();
        assert!(text.starts_with("{\n    \"total\": {\n        \"bbox\": [],"));
    }

    #[test]
    fn test_corrupt_file_falls_back_to_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = AnnotationStore::open(dir.path(), schema()).unwrap();
        let img = image("r1.jpg");
        std::fs::write(store.path_for(&img), "{ not json").unwrap();

        assert_eq!(store.load_or_create(&img), store.default_record());
        // The broken file is not overwritten by loading.
        let text = std::fs::read_to_string(store.path_for(&img)).unwrap();
        assert_eq!(text, "{ not json");
    }

    #[test]
    fn test_schema_mismatch_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = AnnotationStore::open(dir.path(), schema()).unwrap();
        let path = store.dir().join("x.json");
        std::fs::write(&path, r#"{"total": {"bbox": [], "content": ""}}"#).unwrap();

        assert!(matches!(store.read(&path), Err(RecordError::SchemaMismatch(_))));
    }

    #[test]
    fn test_record_files_lists_json_only() {
        let dir = tempfile::tempdir().unwrap();
        let store = AnnotationStore::open(dir.path(), schema()).unwrap();
        std::fs::write(store.dir().join("b.json"), "{}").unwrap();
        std::fs::write(store.dir().join("a.json"), "{}").unwrap();
        std::fs::write(store.dir().join("notes.txt"), "").unwrap();

        let files = store.record_files().unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
    }
}
