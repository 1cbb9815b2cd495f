//! Tidy (long-format) records.

use serde::{Deserialize, Serialize};

use crate::region::Region;

/// One observation: a category combination in a single year.
///
/// Field order matches the output header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TidyRecord {
    pub unit: String,
    pub sex: String,
    pub age: String,
    pub region: String,
    pub year: i64,
    pub value: f64,
}

impl TidyRecord {
    /// True if this record belongs to `region`.
    pub fn is_in(&self, region: Region) -> bool {
        self.region == region.as_str()
    }
}

/// Ordered tidy records; a record's position is its zero-based index.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TidyTable {
    records: Vec<TidyRecord>,
}

impl TidyTable {
    /// Create a table from records in output order.
    pub fn new(records: Vec<TidyRecord>) -> Self {
        Self { records }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True if no record survived.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `index`.
    pub fn get(&self, index: usize) -> Option<&TidyRecord> {
        self.records.get(index)
    }

    /// Iterate over records in order.
    pub fn iter(&self) -> std::slice::Iter<'_, TidyRecord> {
        self.records.iter()
    }

    /// Records as a slice.
    pub fn records(&self) -> &[TidyRecord] {
        &self.records
    }
}

impl<'a> IntoIterator for &'a TidyTable {
    type Item = &'a TidyRecord;
    type IntoIter = std::slice::Iter<'a, TidyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

impl FromIterator<TidyRecord> for TidyTable {
    fn from_iter<I: IntoIterator<Item = TidyRecord>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
