/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 16/10/26
******************************************************************************/

//! Ordered, tag-indexed field container.
//!
//! [`FieldMap`] stores at most one [`FieldValue`] per tag in insertion order.
//! Overwriting a tag replaces the value in place, so re-encoding keeps the
//! original wire order. A tag may also own an ordered list of repeating group
//! entries, each of which is itself a `FieldMap`; the tag's own value is the
//! NumInGroup count.

use crate::convert::FieldConvert;
use crate::error::FieldError;
use crate::field::{FieldValue, FixField};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Insertion-ordered container of tagged fields and repeating groups.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldMap {
    /// Field values keyed by tag, in insertion order.
    fields: IndexMap<u32, FieldValue>,
    /// Group entries keyed by their NumInGroup tag.
    groups: IndexMap<u32, Vec<FieldMap>>,
}

impl FieldMap {
    /// Creates an empty container.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty container with room for `capacity` fields.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: IndexMap::with_capacity(capacity),
            groups: IndexMap::new(),
        }
    }

    /// Stores a field, overwriting any previous value for its tag in place.
    ///
    /// Group entries owned by the tag are left untouched. Overwriting a
    /// count field with a value other than the number of stored entries
    /// leaves the two out of sync; use [`add_group`](Self::add_group) and
    /// [`remove_group`](Self::remove_group) to change the count.
    pub fn set(&mut self, value: FieldValue) {
        if let Some(entries) = self.groups.get(&value.tag()) {
            if value.as_str().parse::<usize>().ok() != Some(entries.len()) {
                trace!(
                    tag = value.tag(),
                    raw = value.as_str(),
                    entries = entries.len(),
                    "count field overwritten out of sync with group entries"
                );
            }
        }
        self.fields.insert(value.tag(), value);
    }

    /// Stores a raw wire value without conversion.
    ///
    /// # Arguments
    /// * `tag` - The field tag number
    /// * `raw` - A value already in wire form
    pub fn set_raw(&mut self, tag: u32, raw: impl Into<String>) {
        self.set(FieldValue::from_raw(tag, raw));
    }

    /// Renders a typed value and stores it under `tag`.
    pub fn set_as<T: FieldConvert>(&mut self, tag: u32, value: &T) {
        self.set(FieldValue::from_typed(tag, value));
    }

    /// Returns the stored value for `tag`.
    ///
    /// # Errors
    /// Returns `FieldError::NotFound` if the tag is absent.
    pub fn get(&self, tag: u32) -> Result<&FieldValue, FieldError> {
        self.fields.get(&tag).ok_or(FieldError::NotFound { tag })
    }

    /// Returns the raw wire string for `tag`.
    ///
    /// # Errors
    /// Returns `FieldError::NotFound` if the tag is absent.
    pub fn get_raw(&self, tag: u32) -> Result<&str, FieldError> {
        self.get(tag).map(FieldValue::as_str)
    }

    /// Returns the value for `tag` converted to `T`.
    ///
    /// # Errors
    /// Returns `FieldError::NotFound` if the tag is absent, or
    /// `FieldError::Conversion` if the raw string does not parse as `T`.
    pub fn get_as<T: FieldConvert>(&self, tag: u32) -> Result<T, FieldError> {
        self.get(tag)?.to_typed()
    }

    /// Returns true if a value is stored for `tag`.
    #[inline]
    #[must_use]
    pub fn contains(&self, tag: u32) -> bool {
        self.fields.contains_key(&tag)
    }

    /// Removes the value for `tag` and any group entries it owns.
    ///
    /// The relative order of the remaining fields is kept.
    pub fn remove(&mut self, tag: u32) -> Option<FieldValue> {
        self.groups.shift_remove(&tag);
        self.fields.shift_remove(&tag)
    }

    /// Stores a typed field wrapper.
    pub fn set_field<F: FixField>(&mut self, field: F) {
        self.set(field.to_field_value());
    }

    /// Reads a typed field wrapper.
    ///
    /// # Errors
    /// Returns `FieldError::NotFound` if `F::TAG` is absent, or
    /// `FieldError::Conversion` if its value does not parse.
    pub fn get_field<F: FixField>(&self) -> Result<F, FieldError> {
        F::from_field_value(self.get(F::TAG)?)
    }

    /// Fills `field` from the container, leaving it untouched on failure.
    ///
    /// # Errors
    /// Same as [`FieldMap::get_field`].
    pub fn get_field_into<F: FixField>(&self, field: &mut F) -> Result<(), FieldError> {
        *field = self.get_field()?;
        Ok(())
    }

    /// Returns true if `F::TAG` is stored.
    #[inline]
    #[must_use]
    pub fn is_set_field<F: FixField>(&self) -> bool {
        self.contains(F::TAG)
    }

    /// Appends a group entry under `tag` and updates the count field.
    ///
    /// The count field keeps its position if it was already set, otherwise it
    /// is appended.
    ///
    /// # Returns
    /// The number of entries after the append.
    pub fn add_group(&mut self, tag: u32, entry: FieldMap) -> usize {
        let entries = self.groups.entry(tag).or_default();
        entries.push(entry);
        let count = entries.len();
        self.set_count(tag, count);
        count
    }

    /// Returns the group entry at the 1-based `index`.
    ///
    /// # Errors
    /// Returns `FieldError::GroupNotFound` if `index` is 0 or exceeds the count.
    pub fn get_group(&self, tag: u32, index: usize) -> Result<&FieldMap, FieldError> {
        let entries = self.groups(tag);
        index
            .checked_sub(1)
            .and_then(|i| entries.get(i))
            .ok_or_else(|| group_not_found(tag, index, entries.len()))
    }

    /// Returns a mutable reference to the group entry at the 1-based `index`.
    ///
    /// # Errors
    /// Returns `FieldError::GroupNotFound` if `index` is 0 or exceeds the count.
    pub fn get_group_mut(&mut self, tag: u32, index: usize) -> Result<&mut FieldMap, FieldError> {
        let count = self.group_count(tag);
        self.groups
            .get_mut(&tag)
            .and_then(|entries| index.checked_sub(1).and_then(|i| entries.get_mut(i)))
            .ok_or_else(|| group_not_found(tag, index, count))
    }

    /// Replaces the group entry at the 1-based `index`.
    ///
    /// # Errors
    /// Returns `FieldError::GroupNotFound` if `index` is 0 or exceeds the count.
    pub fn replace_group(&mut self, tag: u32, index: usize, entry: FieldMap) -> Result<(), FieldError> {
        *self.get_group_mut(tag, index)? = entry;
        Ok(())
    }

    /// Removes the group entry at the 1-based `index` and updates the count.
    ///
    /// Removing the last entry also removes the count field.
    ///
    /// # Errors
    /// Returns `FieldError::GroupNotFound` if `index` is 0 or exceeds the count.
    pub fn remove_group(&mut self, tag: u32, index: usize) -> Result<FieldMap, FieldError> {
        let count = self.group_count(tag);
        if index == 0 || index > count {
            return Err(group_not_found(tag, index, count));
        }
        let Some(entries) = self.groups.get_mut(&tag) else {
            return Err(group_not_found(tag, index, count));
        };
        let removed = entries.remove(index - 1);
        let remaining = entries.len();
        if remaining == 0 {
            self.remove(tag);
        } else {
            self.set_count(tag, remaining);
        }
        Ok(removed)
    }

    /// Returns the number of group entries under `tag` (0 when none).
    #[inline]
    #[must_use]
    pub fn group_count(&self, tag: u32) -> usize {
        self.groups.get(&tag).map_or(0, Vec::len)
    }

    /// Returns true if at least one group entry is stored under `tag`.
    #[inline]
    #[must_use]
    pub fn has_group(&self, tag: u32) -> bool {
        self.group_count(tag) > 0
    }

    /// Returns the group entries under `tag` in insertion order.
    #[must_use]
    pub fn groups(&self, tag: u32) -> &[FieldMap] {
        self.groups.get(&tag).map_or(&[], Vec::as_slice)
    }

    /// Returns the tags that own group entries.
    pub fn group_tags(&self) -> impl Iterator<Item = u32> + '_ {
        self.groups.keys().copied()
    }

    /// Returns an iterator over the stored fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldValue> {
        self.fields.values()
    }

    /// Visits every field in wire order.
    ///
    /// Each group count field is followed by the fields of its entries,
    /// recursively, so nested groups are visited in place.
    pub fn walk<F: FnMut(&FieldValue)>(&self, visit: &mut F) {
        self.walk_except(&[], visit);
    }

    /// Visits every field whose tag is not in `skip`, in wire order.
    pub(crate) fn walk_except<F: FnMut(&FieldValue)>(&self, skip: &[u32], visit: &mut F) {
        for value in self.fields.values() {
            if !skip.contains(&value.tag()) {
                self.walk_value(value, visit);
            }
        }
    }

    /// Visits the field stored under `tag` and its group entries, if any.
    pub(crate) fn walk_tag<F: FnMut(&FieldValue)>(&self, tag: u32, visit: &mut F) {
        if let Some(value) = self.fields.get(&tag) {
            self.walk_value(value, visit);
        }
    }

    fn walk_value<F: FnMut(&FieldValue)>(&self, value: &FieldValue, visit: &mut F) {
        visit(value);
        if let Some(entries) = self.groups.get(&value.tag()) {
            for entry in entries {
                entry.walk(visit);
            }
        }
    }

    /// Returns the stored tags in insertion order.
    pub fn tags(&self) -> impl Iterator<Item = u32> + '_ {
        self.fields.keys().copied()
    }

    /// Returns the number of stored fields (group entries not included).
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no fields and no groups are stored.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.groups.is_empty()
    }

    /// Removes every field and group.
    pub fn clear(&mut self) {
        self.fields.clear();
        self.groups.clear();
    }

    fn set_count(&mut self, tag: u32, count: usize) {
        self.set_as(tag, &(count as u64));
    }
}

fn group_not_found(tag: u32, index: usize, count: usize) -> FieldError {
    trace!(tag, index, count, "group entry not found");
    FieldError::GroupNotFound { tag, index, count }
}

impl<'a> IntoIterator for &'a FieldMap {
    type Item = &'a FieldValue;
    type IntoIter = indexmap::map::Values<'a, u32, FieldValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.values()
    }
}

impl FromIterator<FieldValue> for FieldMap {
    fn from_iter<I: IntoIterator<Item = FieldValue>>(iter: I) -> Self {
        let mut map = Self::new();
        for value in iter {
            map.set(value);
        }
        map
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn entry(tag: u32, raw: &str) -> FieldMap {
        let mut map = FieldMap::new();
        map.set_raw(tag, raw);
        map
    }

    #[test]
    fn test_set_then_get() {
        let mut map = FieldMap::new();
        map.set_as(38, &100_i64);
        map.set_as(44, &Decimal::from_str("10.25").unwrap());

        assert!(map.contains(38));
        assert_eq!(map.get_as::<i64>(38).unwrap(), 100);
        assert_eq!(map.get_raw(44).unwrap(), "10.25");
        assert_eq!(map.get(44).unwrap().kind(), FieldKind::Decimal);
    }

    #[test]
    fn test_absent_tags() {
        let map = FieldMap::new();
        for tag in [1, 37, 54, 5000, 9999] {
            assert!(!map.contains(tag));
            assert_eq!(map.get(tag).unwrap_err(), FieldError::NotFound { tag });
        }
        assert!(map.is_empty());
    }

    #[test]
    fn test_overwrite_preserves_order() {
        let mut map = FieldMap::new();
        map.set_raw(37, "A");
        map.set_raw(54, "1");
        map.set_raw(37, "B");

        assert_eq!(map.tags().collect::<Vec<_>>(), vec![37, 54]);
        assert_eq!(map.get_raw(37).unwrap(), "B");
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_remove_keeps_remaining_order() {
        let mut map: FieldMap = [
            FieldValue::from_raw(1, "a"),
            FieldValue::from_raw(2, "b"),
            FieldValue::from_raw(3, "c"),
        ]
        .into_iter()
        .collect();

        assert_eq!(map.remove(2).unwrap().as_str(), "b");
        assert!(map.remove(2).is_none());
        assert_eq!(map.tags().collect::<Vec<_>>(), vec![1, 3]);
    }

    #[test]
    fn test_failed_get_does_not_mutate() {
        let mut map = FieldMap::new();
        map.set_raw(38, "abc");
        let before = map.clone();

        assert!(matches!(
            map.get_as::<i64>(38),
            Err(FieldError::Conversion { tag: 38, .. })
        ));
        assert!(map.get(99).is_err());
        assert_eq!(map, before);
    }

    #[test]
    fn test_group_indexing() {
        let mut map = FieldMap::new();
        assert_eq!(map.add_group(33, entry(58, "first")), 1);
        assert_eq!(map.add_group(33, entry(58, "second")), 2);
        assert_eq!(map.add_group(33, entry(58, "third")), 3);

        assert_eq!(map.group_count(33), 3);
        assert_eq!(map.get_as::<u64>(33).unwrap(), 3);
        assert_eq!(map.get_group(33, 1).unwrap().get_raw(58).unwrap(), "first");
        assert_eq!(map.get_group(33, 3).unwrap().get_raw(58).unwrap(), "third");

        let err = map.get_group(33, 4).unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(
            err,
            FieldError::GroupNotFound {
                tag: 33,
                index: 4,
                count: 3
            }
        );
        assert!(map.get_group(33, 0).unwrap_err().is_not_found());
        assert!(map.get_group(99, 1).unwrap_err().is_not_found());
    }

    #[test]
    fn test_group_count_field_keeps_position() {
        let mut map = FieldMap::new();
        map.set_raw(148, "headline");
        map.add_group(33, entry(58, "line"));
        map.set_raw(61, "0");
        map.add_group(33, entry(58, "line 2"));

        assert_eq!(map.tags().collect::<Vec<_>>(), vec![148, 33, 61]);
        assert_eq!(map.get_raw(33).unwrap(), "2");
    }

    #[test]
    fn test_replace_and_remove_group() {
        let mut map = FieldMap::new();
        map.add_group(33, entry(58, "a"));
        map.add_group(33, entry(58, "b"));

        map.replace_group(33, 2, entry(58, "B")).unwrap();
        assert_eq!(map.get_group(33, 2).unwrap().get_raw(58).unwrap(), "B");
        assert!(map.replace_group(33, 3, FieldMap::new()).is_err());

        let removed = map.remove_group(33, 1).unwrap();
        assert_eq!(removed.get_raw(58).unwrap(), "a");
        assert_eq!(map.group_count(33), 1);
        assert_eq!(map.get_raw(33).unwrap(), "1");

        map.remove_group(33, 1).unwrap();
        assert!(!map.has_group(33));
        assert!(!map.contains(33));
        assert!(map.remove_group(33, 1).is_err());
    }

    #[test]
    fn test_nested_groups() {
        let mut inner = FieldMap::new();
        inner.set_raw(448, "PARTY");
        inner.add_group(802, entry(523, "SUB"));

        let mut map = FieldMap::new();
        map.add_group(453, inner);

        let party = map.get_group(453, 1).unwrap();
        assert_eq!(party.get_group(802, 1).unwrap().get_raw(523).unwrap(), "SUB");

        map.get_group_mut(453, 1)
            .unwrap()
            .get_group_mut(802, 1)
            .unwrap()
            .set_raw(523, "CHANGED");
        let sub = map.get_group(453, 1).unwrap().get_group(802, 1).unwrap();
        assert_eq!(sub.get_raw(523).unwrap(), "CHANGED");
    }

    #[test]
    fn test_walk_visits_groups_in_place() {
        let mut map = FieldMap::new();
        map.set_raw(148, "hl");
        map.add_group(33, entry(58, "a"));
        map.add_group(33, entry(58, "b"));
        map.set_raw(61, "0");

        let mut seen = Vec::new();
        map.walk(&mut |v| seen.push(v.to_string()));
        assert_eq!(seen, vec!["148=hl", "33=2", "58=a", "58=b", "61=0"]);
    }

    #[test]
    fn test_overwriting_count_keeps_entries() {
        let mut map = FieldMap::new();
        map.add_group(33, entry(58, "a"));
        map.set_raw(33, "5");

        assert_eq!(map.get_raw(33).unwrap(), "5");
        assert_eq!(map.group_count(33), 1);

        map.add_group(33, entry(58, "b"));
        assert_eq!(map.get_raw(33).unwrap(), "2");
    }

    #[test]
    fn test_remove_drops_owned_groups() {
        let mut map = FieldMap::new();
        map.add_group(33, entry(58, "a"));
        map.remove(33);
        assert_eq!(map.group_count(33), 0);
        assert!(map.is_empty());
    }

    #[test]
    fn test_clear() {
        let mut map = FieldMap::new();
        map.set_raw(1, "x");
        map.add_group(33, entry(58, "a"));
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
    }
}
