//! Running count of fully annotated images.

use crate::format::AnnotationStore;

/// Number of images whose every field has a box and a content.
///
/// Computed once from disk, then adjusted by the session as records
/// become complete or stop being complete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletionTracker {
    count: usize,
}

impl CompletionTracker {
    pub fn new(count: usize) -> Self {
        Self { count }
    }

    /// Count the complete records of a store.
    ///
    /// Files that cannot be read or do not match the schema are skipped.
    pub fn initial_count(store: &AnnotationStore) -> Self {
        let files = match store.record_files() {
            Ok(files) => files,
            Err(e) => {
                log::warn!("Failed to list {:?}: {}", store.dir(), e);
                return Self::default();
            }
        };

        let mut count = 0;
        for path in &files {
            match store.read(path) {
                Ok(record) if record.is_complete() => count += 1,
                Ok(_) => {}
                Err(e) => log::warn!("Skipping {:?}: {}", path, e),
            }
        }
        log::info!("{} of {} annotation files complete", count, files.len());
        Self { count }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn increment(&mut self) {
        self.count += 1;
    }

    pub fn decrement(&mut self) {
        self.count = self.count.saturating_sub(1);
    }

    /// Completion as a percentage of `total` images.
    pub fn percent(&self, total: usize) -> f64 {
        if total == 0 {
            return 0.0;
        }
        self.count as f64 * 100.0 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FieldSchema;

    const COMPLETE: &str = r#"{
        "a": {"bbox": [0.1, 0.1, 0.2, 0.2], "content": "1"},
        "b": {"bbox": [0.3, 0.3, 0.4, 0.4], "content": "22"}
    }"#;

    const PARTIAL: &str = r#"{
        "a": {"bbox": [0.1, 0.1, 0.2, 0.2], "content": "1"},
        "b": {"bbox": [], "content": ""}
    }"#;

    #[test]
    fn test_initial_count_skips_bad_files() {
        let dir = tempfile::tempdir().unwrap();
        let schema = FieldSchema::new(vec!["a".into(), "b".into()]);
        let store = AnnotationStore::open(dir.path(), schema).unwrap();

        std::fs::write(store.dir().join("one.json"), COMPLETE).unwrap();
        std::fs::write(store.dir().join("two.json"), COMPLETE).unwrap();
        std::fs::write(store.dir().join("three.json"), PARTIAL).unwrap();
        std::fs::write(store.dir().join("broken.json"), "{").unwrap();
        // Complete, but with a field the schema does not know.
        std::fs::write(
            store.dir().join("extra.json"),
            r#"{"a": {"bbox": [0,0,1,1], "content": "1"}, "b": {"bbox": [0,0,1,1], "content": "1"}, "c": {"bbox": [0,0,1,1], "content": "1"}}"#,
        )
        .unwrap();

        assert_eq!(CompletionTracker::initial_count(&store).count(), 2);
    }

    #[test]
    fn test_increment_decrement() {
        let mut tracker = CompletionTracker::new(1);
        tracker.increment();
        assert_eq!(tracker.count(), 2);
        tracker.decrement();
        tracker.decrement();
        tracker.decrement();
        assert_eq!(tracker.count(), 0);
    }

    #[test]
    fn test_percent() {
        let tracker = CompletionTracker::new(1);
        assert!((tracker.percent(3) - 33.333).abs() < 0.001);
        assert_eq!(tracker.percent(0), 0.0);
    }
}
