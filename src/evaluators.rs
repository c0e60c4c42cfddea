//! The growable store.
//!
//! [`Evaluators`] keeps its items in a `Vec` whose block size is decided by a
//! [`CapacityPolicy`] rather than by `Vec`'s own amortization, so growth is
//! predictable: 10 slots on first use, then +50% whenever the block is full.

use std::fmt;
use std::mem;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::capacity::CapacityPolicy;
use crate::error::{EvaluatorError, Result};
use crate::evaluable::Evaluable;
use crate::evaluator::{fmt_items, Evaluator, EvaluatorMut};
use crate::immutable::ImmutableEvaluators;
use crate::search::scan_eq;

/// Resizable array of items searched through their [`Evaluable`] relation.
///
/// Items keep insertion order; there is no ordering invariant and no
/// uniqueness unless the caller uses [`EvaluatorMut::push_if_absent`].
///
/// ```
/// use evaluators::prelude::*;
/// use evaluators::Evaluators;
///
/// #[derive(Debug, Clone, PartialEq)]
/// struct Host { name: &'static str, port: u16 }
///
/// impl Evaluable<str> for Host {
///     fn matches(&self, name: &str) -> bool { self.name == name }
/// }
///
/// let mut hosts = Evaluators::new();
/// hosts.push(Host { name: "alpha", port: 80 }).unwrap();
/// hosts.push(Host { name: "beta", port: 443 }).unwrap();
///
/// assert_eq!(hosts.evaluate("beta").map(|h| h.port), Some(443));
/// assert_eq!(hosts.index_of("gamma"), None);
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Evaluators<T> {
    items: Vec<T>,
    #[serde(skip)]
    policy: CapacityPolicy,
}

impl<T> Evaluators<T> {
    /// Creates an empty store. Nothing is allocated until the first push.
    pub fn new() -> Self {
        Self::with_policy(CapacityPolicy::default())
    }

    pub fn with_policy(policy: CapacityPolicy) -> Self {
        Self {
            items: Vec::new(),
            policy,
        }
    }

    /// Creates an empty store with room for `initial_capacity` items.
    ///
    /// A negative capacity is an [`EvaluatorError::IllegalCapacity`].
    pub fn with_capacity(initial_capacity: isize) -> Result<Self> {
        Self::with_capacity_and_policy(initial_capacity, CapacityPolicy::default())
    }

    pub fn with_capacity_and_policy(initial_capacity: isize, policy: CapacityPolicy) -> Result<Self> {
        let capacity = policy.initial_capacity(initial_capacity)?;
        let mut items = Vec::new();
        items
            .try_reserve_exact(capacity)
            .map_err(|_| EvaluatorError::CapacityOverflow {
                requested: capacity,
                max: policy.max_capacity,
            })?;
        debug!(capacity, "evaluators created with explicit capacity");
        Ok(Self { items, policy })
    }

    /// Copies `items` into a new store sized exactly to them.
    pub fn from_slice(items: &[T]) -> Self
    where
        T: Clone,
    {
        Self::from(items.to_vec())
    }

    /// Copies a snapshot of another store.
    pub fn from_evaluator<E>(source: &E) -> Self
    where
        E: Evaluator<T> + ?Sized,
        T: Clone,
    {
        Self::from_slice(source.as_slice())
    }

    /// Builds a fixed store that can never change.
    pub fn as_immutable<I>(items: I) -> ImmutableEvaluators<T>
    where
        I: IntoIterator<Item = T>,
    {
        ImmutableEvaluators::new(items)
    }

    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    pub fn policy(&self) -> CapacityPolicy {
        self.policy
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }

    // Every write path that adds items goes through here first.
    fn ensure_capacity(&mut self, min: usize) -> Result<()> {
        let old = self.items.capacity();
        if min <= old {
            return Ok(());
        }
        let new = self.policy.next_capacity(old, min)?;
        let len = self.items.len();
        self.items
            .try_reserve_exact(new - len)
            .map_err(|_| EvaluatorError::CapacityOverflow {
                requested: new,
                max: self.policy.max_capacity,
            })?;
        trace!(old, new, len, "evaluators block grown");
        Ok(())
    }

    fn check_insert_index(&self, index: usize) -> Result<()> {
        if index > self.items.len() {
            return Err(EvaluatorError::out_of_range(index, self.items.len()));
        }
        Ok(())
    }
}

impl<T> Evaluator<T> for Evaluators<T> {
    fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> EvaluatorMut<T> for Evaluators<T> {
    fn push(&mut self, item: T) -> Result<()> {
        let min = self.policy.required(self.items.len(), 1)?;
        self.ensure_capacity(min)?;
        self.items.push(item);
        Ok(())
    }

    fn push_at(&mut self, index: usize, item: T) -> Result<()> {
        self.check_insert_index(index)?;
        let min = self.policy.required(self.items.len(), 1)?;
        self.ensure_capacity(min)?;
        self.items.insert(index, item);
        Ok(())
    }

    fn set(&mut self, index: usize, item: T) -> Result<Option<T>> {
        self.check_insert_index(index)?;
        if index == self.items.len() {
            self.push(item)?;
            return Ok(None);
        }
        Ok(Some(mem::replace(&mut self.items[index], item)))
    }

    fn set_evaluated<K>(&mut self, key: &K, item: T) -> Result<T>
    where
        T: Evaluable<K>,
        K: ?Sized,
    {
        let index = self
            .index_of(key)
            .ok_or_else(|| EvaluatorError::not_found(self.items.len()))?;
        Ok(mem::replace(&mut self.items[index], item))
    }

    fn push_all<I>(&mut self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        let incoming: Vec<T> = items.into_iter().collect();
        let min = self.policy.required(self.items.len(), incoming.len())?;
        self.ensure_capacity(min)?;
        self.items.extend(incoming);
        Ok(())
    }

    fn push_all_at<I>(&mut self, index: usize, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        self.check_insert_index(index)?;
        let incoming: Vec<T> = items.into_iter().collect();
        let count = incoming.len();
        let min = self.policy.required(self.items.len(), count)?;
        self.ensure_capacity(min)?;
        self.items.splice(index..index, incoming);
        debug!(index, count, "bulk insert");
        Ok(())
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn trim(&mut self) {
        let capacity = self.items.capacity();
        if self.items.len() < capacity {
            self.items.shrink_to_fit();
            debug!(from = capacity, to = self.items.capacity(), "evaluators block trimmed");
        }
    }

    fn reverse(&mut self) {
        self.items.reverse();
    }

    fn pop(&mut self) {
        self.items.pop();
    }

    fn acquire(&mut self) -> Option<T> {
        self.items.pop()
    }

    fn acquire_first(&mut self) -> Option<T> {
        if self.items.is_empty() {
            return None;
        }
        Some(self.items.remove(0))
    }

    fn remove_at(&mut self, index: usize) -> Option<T> {
        if index >= self.items.len() {
            return None;
        }
        Some(self.items.remove(index))
    }
}

impl<T> Default for Evaluators<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Vec<T>> for Evaluators<T> {
    fn from(mut items: Vec<T>) -> Self {
        items.shrink_to_fit();
        Self {
            items,
            policy: CapacityPolicy::default(),
        }
    }
}

impl<T: Clone> From<&ImmutableEvaluators<T>> for Evaluators<T> {
    fn from(source: &ImmutableEvaluators<T>) -> Self {
        Self::from_evaluator(source)
    }
}

impl<T> FromIterator<T> for Evaluators<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<T>>())
    }
}

impl<T> IntoIterator for Evaluators<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Evaluators<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// Equality looks at items only; two stores with different policies or
// capacities but the same items are equal.
impl<T: PartialEq> PartialEq for Evaluators<T> {
    fn eq(&self, other: &Self) -> bool {
        scan_eq(&self.items, &other.items)
    }
}

impl<T: Eq> Eq for Evaluators<T> {}

impl<T: fmt::Display> fmt::Display for Evaluators<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_items(&self.items, f)
    }
}

impl<T: fmt::Debug> fmt::Debug for Evaluators<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Evaluators")
            .field("items", &self.items)
            .field("capacity", &self.items.capacity())
            .finish()
    }
}
