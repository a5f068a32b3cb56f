//! Position of the field being annotated within the schema.

use crate::model::FieldSchema;

/// Cursor over `0..=len`, where `len` means every field has been done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldCursor {
    index: usize,
    len: usize,
}

impl FieldCursor {
    /// A cursor on the first field of a schema with `len` fields.
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    /// A cursor at `index`, clamped to the schema.
    pub fn at(index: usize, len: usize) -> Self {
        Self {
            index: index.min(len),
            len,
        }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    /// All fields done: the cursor sits past the last field.
    pub fn is_full(&self) -> bool {
        self.index == self.len
    }

    /// Name of the field under the cursor; `None` once full.
    pub fn current_field<'a>(&self, schema: &'a FieldSchema) -> Option<&'a str> {
        if self.is_full() {
            None
        } else {
            schema.get(self.index)
        }
    }

    /// Move to the next field, stopping at the terminal position.
    pub fn advance(&mut self) {
        self.index = (self.index + 1).min(self.len);
    }

    /// Move to the previous field, stopping at the first.
    pub fn retreat(&mut self) {
        self.index = self.index.saturating_sub(1);
    }

    /// Back to the first field.
    pub fn reset(&mut self) {
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let cursor = FieldCursor::new(3);
        assert_eq!(cursor.index(), 0);
        assert!(!cursor.is_full());

        // An empty schema starts out full.
        assert!(FieldCursor::new(0).is_full());
    }

    #[test]
    fn test_advance_saturates_at_len() {
        let mut cursor = FieldCursor::new(2);
        cursor.advance();
        assert!(!cursor.is_full());
        cursor.advance();
        assert!(cursor.is_full());
        cursor.advance();
        assert_eq!(cursor.index(), 2);
        assert!(cursor.is_full());
    }

    #[test]
    fn test_retreat_saturates_at_zero() {
        let mut cursor = FieldCursor::at(2, 2);
        assert!(cursor.is_full());
        cursor.retreat();
        assert_eq!(cursor.index(), 1);
        assert!(!cursor.is_full());
        cursor.retreat();
        cursor.retreat();
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn test_index_always_in_range() {
        let len = 3;
        let mut cursor = FieldCursor::new(len);
        let steps = [true, true, false, true, true, true, true, false, false, false, false];
        for forward in steps {
            if forward {
                cursor.advance();
            } else {
                cursor.retreat();
            }
            assert!(cursor.index() <= len);
            assert_eq!(cursor.is_full(), cursor.index() == len);
        }
    }

    #[test]
    fn test_current_field() {
        let schema = FieldSchema::new(vec!["a".into(), "b".into()]);
        let mut cursor = FieldCursor::new(schema.len());
        assert_eq!(cursor.current_field(&schema), Some("a"));
        cursor.advance();
        assert_eq!(cursor.current_field(&schema), Some("b"));
        cursor.advance();
        assert_eq!(cursor.current_field(&schema), None);
    }

    #[test]
    fn test_at_clamps() {
        assert_eq!(FieldCursor::at(7, 3).index(), 3);
    }
}
