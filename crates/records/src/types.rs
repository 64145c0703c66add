//! The record model and the immutable record store.
//!
//! ```text
//! Record { task, description, actions, objects }
//!
//! RecordSet (Arc<[Record]>)
//! ├── insertion order preserved
//! ├── duplicates allowed
//! └── never mutated; a new sheet builds a new set
//! ```
use std::ops::Index;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// One task row.
///
/// Field names follow the sheet's column headers on the wire
/// (`Task`, `Description`, `Actions`, `Objects`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "Task")]
    pub task: String,
    /// The searchable field.
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Actions", default)]
    pub actions: String,
    #[serde(rename = "Objects", default)]
    pub objects: String,
}

impl Record {
    pub fn new(
        task: impl Into<String>,
        description: impl Into<String>,
        actions: impl Into<String>,
        objects: impl Into<String>,
    ) -> Self {
        Self {
            task: task.into(),
            description: description.into(),
            actions: actions.into(),
            objects: objects.into(),
        }
    }
}

/// Ordered, immutable snapshot of validated records.
///
/// Cloning is cheap (one `Arc` bump), so the set can be shared between the
/// match index and whoever renders results without copying rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordSet {
    records: Arc<[Record]>,
}

impl RecordSet {
    /// Build a store from an already-validated record list.
    ///
    /// The only check performed here is emptiness; rows are kept exactly as
    /// given, in order, duplicates included.
    pub fn new(records: Vec<Record>) -> Result<Self, ValidationError> {
        if records.is_empty() {
            return Err(ValidationError::EmptyRecordSet);
        }
        Ok(Self {
            records: records.into(),
        })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Always `false` for a constructed set; kept for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, position: usize) -> Option<&Record> {
        self.records.get(position)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn as_slice(&self) -> &[Record] {
        &self.records
    }

    /// Searchable field of every record, in order.
    pub fn descriptions(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().map(|r| r.description.as_str())
    }
}

impl TryFrom<Vec<Record>> for RecordSet {
    type Error = ValidationError;

    fn try_from(records: Vec<Record>) -> Result<Self, Self::Error> {
        RecordSet::new(records)
    }
}

impl Index<usize> for RecordSet {
    type Output = Record;

    fn index(&self, position: usize) -> &Record {
        &self.records[position]
    }
}

impl<'a> IntoIterator for &'a RecordSet {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Record> {
        vec![
            Record::new("t1", "Boil water for tea", "boil", "kettle"),
            Record::new("t2", "Wash dishes", "scrub", "sponge"),
            Record::new("t3", "Wash dishes", "rinse", ""),
        ]
    }

    #[test]
    fn empty_set_rejected() {
        assert_eq!(RecordSet::new(Vec::new()), Err(ValidationError::EmptyRecordSet));
    }

    #[test]
    fn order_and_duplicates_preserved() {
        let set = RecordSet::new(sample()).expect("non-empty set");
        assert_eq!(set.len(), 3);
        let descriptions: Vec<&str> = set.descriptions().collect();
        assert_eq!(
            descriptions,
            vec!["Boil water for tea", "Wash dishes", "Wash dishes"]
        );
        assert_eq!(set[2].actions, "rinse");
        assert!(set.get(3).is_none());
    }

    #[test]
    fn clones_share_storage() {
        let set = RecordSet::new(sample()).expect("non-empty set");
        let other = set.clone();
        assert!(std::ptr::eq(set.as_slice(), other.as_slice()));
    }

    #[test]
    fn record_uses_sheet_column_names_in_json() {
        let record = Record::new("Tea", "Boil water", "boil", "kettle");
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["Task"], "Tea");
        assert_eq!(json["Description"], "Boil water");
        assert_eq!(json["Objects"], "kettle");
    }
}
