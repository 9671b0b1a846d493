//! # Table - Ordered Record Collections
//!
//! A [`Table`] is a sequence of records of one kind in table order (file
//! order for a decoded file, key order for a merged one). It offers the
//! lookups the merger and the `dump` command need, plus [`last_wins`], the
//! duplicate-resolution rule shared by every merge step.

use std::collections::BTreeMap;

use record::{AssistRecord, BustupRecord, FormatError, Record};

/// An ordered collection of records of kind `R`.
#[derive(Debug, Clone)]
pub struct Table<R: Record> {
    records: Vec<R>,
}

impl<R: Record> Default for Table<R> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

impl<R: Record> Table<R> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps `records` without reordering or deduplicating them.
    pub fn from_records(records: Vec<R>) -> Self {
        Self { records }
    }

    /// Decodes a whole parameter file buffer.
    ///
    /// # Errors
    ///
    /// Returns [`FormatError::Malformed`] if the length is not a multiple of
    /// the record size.
    pub fn decode(bytes: &[u8]) -> Result<Self, FormatError> {
        Ok(Self::from_records(record::decode(bytes)?))
    }

    /// Encodes the table in its current order.
    #[must_use]
    pub fn encode(&self) -> Vec<u8> {
        record::encode(&self.records)
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, R> {
        self.records.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the record with `key`, or `None`.
    ///
    /// Keys are unique in a merged table. In a raw file with accidental
    /// duplicates the first occurrence is returned.
    pub fn find(&self, key: R::Key) -> Option<&R> {
        self.records.iter().find(|r| r.key() == key)
    }

    /// Returns every record whose selected field equals `value`, in table order.
    ///
    /// ```ignore
    /// let neutral = table.find_all_by(|r| r.flags, 0);
    /// ```
    pub fn find_all_by<V, F>(&self, field: F, value: V) -> Vec<&R>
    where
        V: PartialEq,
        F: Fn(&R) -> V,
    {
        self.records.iter().filter(|r| field(r) == value).collect()
    }

    /// Returns `true` if the records are in strictly ascending key order,
    /// which also implies the keys are unique.
    #[must_use]
    pub fn is_sorted(&self) -> bool {
        self.records.windows(2).all(|w| w[0].key() < w[1].key())
    }

    /// Returns `true` if no key appears twice.
    #[must_use]
    pub fn has_unique_keys(&self) -> bool {
        last_wins(&self.records).len() == self.records.len()
    }
}

impl Table<BustupRecord> {
    pub fn find_by_major_id(&self, major_id: u16) -> Vec<&BustupRecord> {
        self.find_all_by(|r| r.major_id, major_id)
    }

    pub fn find_by_minor_id(&self, minor_id: u16) -> Vec<&BustupRecord> {
        self.find_all_by(|r| r.minor_id, minor_id)
    }

    pub fn find_by_sub_id(&self, sub_id: u16) -> Vec<&BustupRecord> {
        self.find_all_by(|r| r.sub_id, sub_id)
    }
}

impl Table<AssistRecord> {
    pub fn find_by_major_id(&self, major_id: u16) -> Vec<&AssistRecord> {
        self.find_all_by(|r| r.major_id, major_id)
    }

    pub fn find_by_minor_id(&self, minor_id: u16) -> Vec<&AssistRecord> {
        self.find_all_by(|r| r.minor_id, minor_id)
    }
}

impl<'a, R: Record> IntoIterator for &'a Table<R> {
    type Item = &'a R;
    type IntoIter = std::slice::Iter<'a, R>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

/// Field-for-field comparison used to decide whether an override actually
/// changes a baseline record.
pub fn values_equal<R: Record>(a: &R, b: &R) -> bool {
    a.values_equal(b)
}

/// Collapses `records` into one record per key, keeping the **last**
/// occurrence in slice order.
///
/// The slice is walked front to back and each insert overwrites the previous
/// one, so the result never depends on map iteration order. The map iterates
/// in ascending key order.
pub fn last_wins<R: Record>(records: &[R]) -> BTreeMap<R::Key, R> {
    let mut map = BTreeMap::new();
    for r in records {
        map.insert(r.key(), r.clone());
    }
    map
}
