//! Capabilities shared by the stores.
//!
//! Reading and writing are separate traits. [`Evaluator`] is the read-only
//! surface every store offers; [`EvaluatorMut`] adds the mutating operations
//! and is only implemented by stores that can change. Handing an
//! [`crate::ImmutableEvaluators`] to code that wants to push is a compile
//! error rather than a silent no-op.

use std::fmt;
use std::slice;

use crate::error::{EvaluatorError, Result};
use crate::evaluable::Evaluable;
use crate::search::evaluate_of;

/// Read-only access to an evaluator store.
///
/// Only [`Evaluator::as_slice`] has to be provided; lookups run the
/// [`crate::search::ScanOrder`] over that slice.
pub trait Evaluator<T> {
    /// The live items, in insertion order.
    fn as_slice(&self) -> &[T];

    // --- Inspection ---

    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Item at `index`, or an out-of-range error outside `0..len`.
    fn get(&self, index: usize) -> Result<&T> {
        let items = self.as_slice();
        items
            .get(index)
            .ok_or_else(|| EvaluatorError::out_of_range(index, items.len()))
    }

    /// Last item, without removing it.
    fn peek(&self) -> Option<&T> {
        self.as_slice().last()
    }

    // --- Searching ---

    /// Index of the first item, in scan order, that `key` designates.
    fn index_of<K>(&self, key: &K) -> Option<usize>
    where
        T: Evaluable<K>,
        K: ?Sized,
    {
        evaluate_of(self.as_slice(), Some(key))
    }

    /// The item `key` designates.
    fn evaluate<K>(&self, key: &K) -> Option<&T>
    where
        T: Evaluable<K>,
        K: ?Sized,
    {
        let items = self.as_slice();
        evaluate_of(items, Some(key)).map(|index| &items[index])
    }

    fn contains<K>(&self, key: &K) -> bool
    where
        T: Evaluable<K>,
        K: ?Sized,
    {
        self.index_of(key).is_some()
    }

    // --- Snapshots ---

    fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.as_slice().to_vec()
    }

    fn to_boxed_slice(&self) -> Box<[T]>
    where
        T: Clone,
    {
        self.as_slice().into()
    }

    /// Copies the items into `buffer` when it has room for all of them.
    ///
    /// A buffer longer than the store gets `None` written right after the last
    /// copied item; anything beyond that slot is left alone. A buffer that is
    /// too short is dropped and a new one of exactly `len` slots is returned.
    fn to_array_in(&self, mut buffer: Vec<Option<T>>) -> Vec<Option<T>>
    where
        T: Clone,
    {
        let items = self.as_slice();
        if buffer.len() < items.len() {
            return items.iter().cloned().map(Some).collect();
        }
        for (slot, item) in buffer.iter_mut().zip(items) {
            *slot = Some(item.clone());
        }
        if let Some(terminator) = buffer.get_mut(items.len()) {
            *terminator = None;
        }
        buffer
    }
}

/// Mutating access to an evaluator store.
pub trait EvaluatorMut<T>: Evaluator<T> {
    /// Appends `item`.
    fn push(&mut self, item: T) -> Result<()>;

    /// Appends `item` when there is one; `None` leaves the store untouched.
    fn push_opt(&mut self, item: Option<T>) -> Result<()> {
        match item {
            Some(item) => self.push(item),
            None => Ok(()),
        }
    }

    /// Inserts `item` before `index`, shifting the tail one slot right.
    /// `index` may be `len`, which appends.
    fn push_at(&mut self, index: usize, item: T) -> Result<()>;

    /// Appends `item` unless `key` already designates an item. Returns whether
    /// `item` was added.
    fn push_if_absent<K>(&mut self, item: T, key: &K) -> Result<bool>
    where
        T: Evaluable<K>,
        K: ?Sized,
    {
        if self.contains(key) {
            return Ok(false);
        }
        self.push(item)?;
        Ok(true)
    }

    /// Overwrites the slot at `index` and returns what was there. `index ==
    /// len` appends and returns `None`; anything beyond is out of range.
    fn set(&mut self, index: usize, item: T) -> Result<Option<T>>;

    /// Overwrites the item `key` designates and returns it. A key that
    /// designates nothing is an out-of-range error at index `-1`.
    fn set_evaluated<K>(&mut self, key: &K, item: T) -> Result<T>
    where
        T: Evaluable<K>,
        K: ?Sized;

    /// Appends every item of `items`, in order.
    fn push_all<I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>;

    /// Inserts every item of `items` before `index`, keeping their order.
    fn push_all_at<I>(&mut self, index: usize, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>;

    /// Appends a snapshot of another store's items.
    fn push_all_from<E>(&mut self, source: &E) -> Result<()>
    where
        E: Evaluator<T> + ?Sized,
        T: Clone,
    {
        self.push_all(source.to_vec())
    }

    /// Inserts a snapshot of another store's items before `index`.
    fn push_all_from_at<E>(&mut self, index: usize, source: &E) -> Result<()>
    where
        E: Evaluator<T> + ?Sized,
        T: Clone,
    {
        self.push_all_at(index, source.to_vec())
    }

    /// Drops every item. Capacity is kept.
    fn clear(&mut self);

    /// Shrinks the backing block to the live length.
    fn trim(&mut self);

    fn reverse(&mut self);

    /// Drops the last item, if any.
    fn pop(&mut self);

    /// Removes and returns the last item.
    fn acquire(&mut self) -> Option<T>;

    /// Removes and returns the first item, shifting the rest left.
    fn acquire_first(&mut self) -> Option<T>;

    /// Removes the item `key` designates. `Some` means an item was removed.
    fn remove<K>(&mut self, key: &K) -> Option<T>
    where
        T: Evaluable<K>,
        K: ?Sized,
    {
        let index = self.index_of(key)?;
        self.remove_at(index)
    }

    /// Removes the item at `index`. An index outside `0..len` removes nothing
    /// and is not an error.
    fn remove_at(&mut self, index: usize) -> Option<T>;
}

// Shared `Display` body: `[a, b, c]`, `[]` when empty.
pub(crate) fn fmt_items<T: fmt::Display>(items: &[T], f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("[")?;
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        fmt::Display::fmt(item, f)?;
    }
    f.write_str("]")
}
