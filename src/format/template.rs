//! Loading the field schema from a dataset's `template.json`.
//!
//! The template has the same shape as an annotation file. Its key order is
//! the order fields are visited in; its values are not used.

use std::path::Path;

use crate::error::SetupError;
use crate::model::{AnnotationRecord, FieldSchema};

/// Read the field names from a template file, in file order.
pub fn load_schema(path: &Path) -> Result<FieldSchema, SetupError> {
    if !path.is_file() {
        return Err(SetupError::TemplateMissing {
            path: path.to_path_buf(),
        });
    }

    let json = std::fs::read_to_string(path)?;
    let template: AnnotationRecord = serde_json::from_str(&json)
        .map_err(|e| SetupError::invalid_template(path, e.to_string()))?;

    let names: Vec<String> = template.iter().map(|(name, _)| name.to_string()).collect();
    log::info!("Loaded template {:?} with {} fields", path, names.len());
    Ok(FieldSchema::new(names))
}
