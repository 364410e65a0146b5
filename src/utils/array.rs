//! Capacity-bounded arrays with sentinel "empty" entries.
//!
//! Every array that crosses a kernel boundary has a declared maximum length
//! which downstream consumers rely on. [`BoundedVec`] carries that bound
//! alongside its items, refuses appends that would exceed it and enforces it
//! again when deserializing. Whether a stored entry is occupied is a property
//! of the entry itself, expressed through [`Sentinel`].

use core::fmt;

use serde::{Deserialize, Serialize};

use crate::field::FieldElement;

/// Elements that have a distinguished "no entry" value.
pub trait Sentinel {
    /// Returns `true` when the element is the empty sentinel.
    fn is_empty(&self) -> bool;
}

impl Sentinel for FieldElement {
    fn is_empty(&self) -> bool {
        self.is_zero()
    }
}

/// Error raised when an append would exceed a bounded array's capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityError {
    /// Declared maximum length.
    pub capacity: usize,
    /// Length the operation would have produced.
    pub required: usize,
}

impl fmt::Display for CapacityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "bounded array overflow: capacity {}, required {}",
            self.capacity, self.required
        )
    }
}

impl std::error::Error for CapacityError {}

/// Vector whose length never exceeds a fixed capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoundedVec<T>", bound(deserialize = "T: Deserialize<'de>"))]
pub struct BoundedVec<T> {
    items: Vec<T>,
    capacity: usize,
}

#[derive(Deserialize)]
struct RawBoundedVec<T> {
    items: Vec<T>,
    capacity: usize,
}

impl<T> TryFrom<RawBoundedVec<T>> for BoundedVec<T> {
    type Error = CapacityError;

    fn try_from(raw: RawBoundedVec<T>) -> Result<Self, Self::Error> {
        BoundedVec::from_vec(raw.items, raw.capacity)
    }
}

impl<T> BoundedVec<T> {
    /// Creates an empty vector with the given capacity.
    pub fn new(capacity: usize) -> Self {
        Self {
            items: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Wraps existing items, failing if they exceed `capacity`.
    pub fn from_vec(items: Vec<T>, capacity: usize) -> Result<Self, CapacityError> {
        if items.len() > capacity {
            return Err(CapacityError {
                capacity,
                required: items.len(),
            });
        }
        Ok(Self { items, capacity })
    }

    /// Declared maximum length.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of stored entries, sentinels included.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` when no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of entries that can still be appended.
    pub fn remaining(&self) -> usize {
        self.capacity - self.items.len()
    }

    /// Appends a single entry.
    pub fn push(&mut self, item: T) -> Result<(), CapacityError> {
        self.ensure_room(1)?;
        self.items.push(item);
        Ok(())
    }

    /// Appends all entries or none of them.
    pub fn extend_from_slice(&mut self, items: &[T]) -> Result<(), CapacityError>
    where
        T: Clone,
    {
        self.ensure_room(items.len())?;
        self.items.extend_from_slice(items);
        Ok(())
    }

    /// Fails unless `additional` entries fit.
    pub fn ensure_room(&self, additional: usize) -> Result<(), CapacityError> {
        let required = self.items.len() + additional;
        if required > self.capacity {
            return Err(CapacityError {
                capacity: self.capacity,
                required,
            });
        }
        Ok(())
    }

    /// Replaces the declared capacity, provided the stored entries still fit.
    pub fn rebound(&mut self, capacity: usize) -> Result<(), CapacityError> {
        if self.items.len() > capacity {
            return Err(CapacityError {
                capacity,
                required: self.items.len(),
            });
        }
        self.capacity = capacity;
        Ok(())
    }

    /// Removes and returns the last entry.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    /// Returns the entry at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Mutable access to the entry at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.items.get_mut(index)
    }

    /// Returns the stored entries as a slice.
    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// Iterates over all stored entries.
    pub fn iter(&self) -> core::slice::Iter<'_, T> {
        self.items.iter()
    }

    /// Consumes the vector and returns its entries.
    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T: Sentinel> BoundedVec<T> {
    /// Iterates over occupied entries together with their original position.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &T)> + '_ {
        self.items
            .iter()
            .enumerate()
            .filter(|(_, item)| !item.is_empty())
    }

    /// Pops trailing sentinels, then the last occupied entry.
    pub fn pop_occupied(&mut self) -> Option<T> {
        while self.items.last().is_some_and(Sentinel::is_empty) {
            self.items.pop();
        }
        self.items.pop()
    }
}

impl<'a, T> IntoIterator for &'a BoundedVec<T> {
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn felt(value: u64) -> FieldElement {
        FieldElement::from(value)
    }

    #[test]
    fn push_respects_capacity() {
        let mut array = BoundedVec::new(2);
        array.push(felt(1)).unwrap();
        array.push(felt(2)).unwrap();
        let err = array.push(felt(3)).unwrap_err();
        assert_eq!(
            err,
            CapacityError {
                capacity: 2,
                required: 3
            }
        );
        assert_eq!(array.as_slice(), &[felt(1), felt(2)]);
    }

    #[test]
    fn extend_is_all_or_nothing() {
        let mut array = BoundedVec::new(3);
        array.push(felt(1)).unwrap();
        let err = array
            .extend_from_slice(&[felt(2), felt(3), felt(4)])
            .unwrap_err();
        assert_eq!(err.required, 4);
        assert_eq!(array.len(), 1);
        array.extend_from_slice(&[felt(2), felt(3)]).unwrap();
        assert_eq!(array.remaining(), 0);
    }

    #[test]
    fn rebound_requires_entries_to_fit() {
        let mut array = BoundedVec::from_vec(vec![felt(1), felt(2), felt(3)], 10_000).unwrap();
        let err = array.rebound(2).unwrap_err();
        assert_eq!(
            err,
            CapacityError {
                capacity: 2,
                required: 3
            }
        );
        assert_eq!(array.capacity(), 10_000);
        array.rebound(3).unwrap();
        assert_eq!(array.remaining(), 0);
        assert!(array.push(felt(4)).is_err());
    }

    #[test]
    fn occupied_skips_sentinels_and_keeps_positions() {
        let array =
            BoundedVec::from_vec(vec![felt(0), felt(7), felt(0), felt(9)], 4).unwrap();
        let occupied: Vec<(usize, u64)> = array
            .occupied()
            .map(|(index, value)| (index, value.as_u64()))
            .collect();
        assert_eq!(occupied, vec![(1, 7), (3, 9)]);
    }

    #[test]
    fn pop_occupied_drops_trailing_sentinels() {
        let mut array =
            BoundedVec::from_vec(vec![felt(4), felt(5), felt(0), felt(0)], 4).unwrap();
        assert_eq!(array.pop_occupied(), Some(felt(5)));
        assert_eq!(array.as_slice(), &[felt(4)]);

        let mut only_sentinels = BoundedVec::from_vec(vec![felt(0), felt(0)], 2).unwrap();
        assert_eq!(only_sentinels.pop_occupied(), None);
        assert!(only_sentinels.is_empty());
    }

    #[test]
    fn deserialization_enforces_capacity() {
        let ok: BoundedVec<FieldElement> =
            serde_json::from_str(r#"{"items":[1,2],"capacity":2}"#).unwrap();
        assert_eq!(ok.len(), 2);

        let err = serde_json::from_str::<BoundedVec<FieldElement>>(
            r#"{"items":[1,2,3],"capacity":2}"#,
        );
        assert!(err.is_err());
    }
}
