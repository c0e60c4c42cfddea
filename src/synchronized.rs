//! Thread-safe store: one [`Evaluators`] behind one `Mutex`.
//!
//! Every operation, reads included, takes the lock for its whole duration, so
//! operations are atomic with respect to each other and never interleave.
//! There is no finer-grained locking and no lock-free read path. References
//! cannot outlive the lock, so reads hand out clones; use
//! [`SynchronizedEvaluators::with`] to work with borrowed items.

use std::fmt;
use std::ptr;
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tracing::warn;

use crate::capacity::CapacityPolicy;
use crate::error::Result;
use crate::evaluable::Evaluable;
use crate::evaluator::{Evaluator, EvaluatorMut};
use crate::evaluators::Evaluators;

/// An [`Evaluators`] shared between threads, usually through an `Arc`.
///
/// ```
/// use std::sync::Arc;
/// use std::thread;
/// use evaluators::SynchronizedEvaluators;
///
/// let shared = Arc::new(SynchronizedEvaluators::<u32>::new());
/// let workers: Vec<_> = (0..4)
///     .map(|w| {
///         let shared = Arc::clone(&shared);
///         thread::spawn(move || {
///             for i in 0..100 {
///                 shared.push(w * 100 + i).unwrap();
///             }
///         })
///     })
///     .collect();
/// for worker in workers {
///     worker.join().unwrap();
/// }
/// assert_eq!(shared.len(), 400);
/// ```
pub struct SynchronizedEvaluators<T> {
    inner: Mutex<Evaluators<T>>,
}

impl<T> SynchronizedEvaluators<T> {
    pub fn new() -> Self {
        Self::from(Evaluators::new())
    }

    pub fn with_policy(policy: CapacityPolicy) -> Self {
        Self::from(Evaluators::with_policy(policy))
    }

    pub fn with_capacity(initial_capacity: isize) -> Result<Self> {
        Evaluators::with_capacity(initial_capacity).map(Self::from)
    }

    pub fn from_slice(items: &[T]) -> Self
    where
        T: Clone,
    {
        Self::from(Evaluators::from_slice(items))
    }

    pub fn from_evaluator<E>(source: &E) -> Self
    where
        E: Evaluator<T> + ?Sized,
        T: Clone,
    {
        Self::from(Evaluators::from_evaluator(source))
    }

    // A panic while the guard is held poisons the mutex. The next caller
    // logs it once and clears the flag. Whatever a `with_mut` closure wrote
    // before panicking stays in the store.
    fn lock(&self) -> MutexGuard<'_, Evaluators<T>> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            warn!("evaluators lock was poisoned by a panicking caller; recovering");
            self.inner.clear_poison();
            poisoned.into_inner()
        })
    }

    /// Whether a caller panicked while holding the lock and no operation has
    /// run since.
    pub fn is_poisoned(&self) -> bool {
        self.inner.is_poisoned()
    }

    /// Runs `f` against the store while holding the lock.
    ///
    /// `f` must not call back into this wrapper: the lock is not reentrant
    /// and the nested call deadlocks.
    pub fn with<R>(&self, f: impl FnOnce(&Evaluators<T>) -> R) -> R {
        f(&self.lock())
    }

    /// Runs `f` against the store while holding the lock, for compound
    /// updates that must not interleave with other callers.
    ///
    /// The update is not transactional. If `f` panics, the writes it already
    /// made are kept and later callers see them. As with [`with`](Self::with),
    /// `f` must not call back into this wrapper.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut Evaluators<T>) -> R) -> R {
        f(&mut self.lock())
    }

    pub fn get_mut(&mut self) -> &mut Evaluators<T> {
        self.inner.get_mut().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn into_inner(self) -> Evaluators<T> {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    // --- Writes ---

    pub fn push(&self, item: T) -> Result<()> {
        self.lock().push(item)
    }

    pub fn push_opt(&self, item: Option<T>) -> Result<()> {
        self.lock().push_opt(item)
    }

    pub fn push_at(&self, index: usize, item: T) -> Result<()> {
        self.lock().push_at(index, item)
    }

    pub fn push_if_absent<K>(&self, item: T, key: &K) -> Result<bool>
    where
        T: Evaluable<K>,
        K: ?Sized,
    {
        self.lock().push_if_absent(item, key)
    }

    pub fn set(&self, index: usize, item: T) -> Result<Option<T>> {
        self.lock().set(index, item)
    }

    pub fn set_evaluated<K>(&self, key: &K, item: T) -> Result<T>
    where
        T: Evaluable<K>,
        K: ?Sized,
    {
        self.lock().set_evaluated(key, item)
    }

    // Bulk inputs are drained before the lock is taken.
    pub fn push_all<I>(&self, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        let incoming: Vec<T> = items.into_iter().collect();
        self.lock().push_all(incoming)
    }

    pub fn push_all_at<I>(&self, index: usize, items: I) -> Result<()>
    where
        I: IntoIterator<Item = T>,
    {
        let incoming: Vec<T> = items.into_iter().collect();
        self.lock().push_all_at(index, incoming)
    }

    pub fn push_all_from<E>(&self, source: &E) -> Result<()>
    where
        E: Evaluator<T> + ?Sized,
        T: Clone,
    {
        self.push_all(source.to_vec())
    }

    pub fn push_all_from_at<E>(&self, index: usize, source: &E) -> Result<()>
    where
        E: Evaluator<T> + ?Sized,
        T: Clone,
    {
        self.push_all_at(index, source.to_vec())
    }

    /// Appends a snapshot of another shared store, taken under its lock.
    /// `source` may be `self`.
    pub fn push_all_from_shared(&self, source: &Self) -> Result<()>
    where
        T: Clone,
    {
        self.push_all(source.to_vec())
    }

    pub fn push_all_from_shared_at(&self, index: usize, source: &Self) -> Result<()>
    where
        T: Clone,
    {
        self.push_all_at(index, source.to_vec())
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn trim(&self) {
        self.lock().trim();
    }

    pub fn reverse(&self) {
        self.lock().reverse();
    }

    pub fn pop(&self) {
        self.lock().pop();
    }

    pub fn acquire(&self) -> Option<T> {
        self.lock().acquire()
    }

    pub fn acquire_first(&self) -> Option<T> {
        self.lock().acquire_first()
    }

    pub fn remove<K>(&self, key: &K) -> Option<T>
    where
        T: Evaluable<K>,
        K: ?Sized,
    {
        self.lock().remove(key)
    }

    pub fn remove_at(&self, index: usize) -> Option<T> {
        self.lock().remove_at(index)
    }

    // --- Reads ---

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    pub fn get(&self, index: usize) -> Result<T>
    where
        T: Clone,
    {
        self.lock().get(index).cloned()
    }

    pub fn peek(&self) -> Option<T>
    where
        T: Clone,
    {
        self.lock().peek().cloned()
    }

    pub fn evaluate<K>(&self, key: &K) -> Option<T>
    where
        T: Evaluable<K> + Clone,
        K: ?Sized,
    {
        self.lock().evaluate(key).cloned()
    }

    pub fn index_of<K>(&self, key: &K) -> Option<usize>
    where
        T: Evaluable<K>,
        K: ?Sized,
    {
        self.lock().index_of(key)
    }

    pub fn contains<K>(&self, key: &K) -> bool
    where
        T: Evaluable<K>,
        K: ?Sized,
    {
        self.lock().contains(key)
    }

    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.lock().to_vec()
    }

    pub fn to_boxed_slice(&self) -> Box<[T]>
    where
        T: Clone,
    {
        self.lock().to_boxed_slice()
    }

    pub fn to_array_in(&self, buffer: Vec<Option<T>>) -> Vec<Option<T>>
    where
        T: Clone,
    {
        self.lock().to_array_in(buffer)
    }
}

impl<T> Default for SynchronizedEvaluators<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> From<Evaluators<T>> for SynchronizedEvaluators<T> {
    fn from(store: Evaluators<T>) -> Self {
        Self {
            inner: Mutex::new(store),
        }
    }
}

impl<T> From<Vec<T>> for SynchronizedEvaluators<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from(Evaluators::from(items))
    }
}

// Plain stores take a shared one through a snapshot. For bulk inserts into a
// plain store use `store.push_all(shared.to_vec())`.
impl<T: Clone> From<&SynchronizedEvaluators<T>> for Evaluators<T> {
    fn from(source: &SynchronizedEvaluators<T>) -> Self {
        Self::from(source.to_vec())
    }
}

impl<T> FromIterator<T> for SynchronizedEvaluators<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Evaluators<T>>())
    }
}

impl<T: Clone> Clone for SynchronizedEvaluators<T> {
    fn clone(&self) -> Self {
        Self::from(self.lock().clone())
    }
}

// Both locks are needed; they are always taken in address order so two
// threads comparing `a == b` and `b == a` cannot deadlock.
impl<T: PartialEq> PartialEq for SynchronizedEvaluators<T> {
    fn eq(&self, other: &Self) -> bool {
        if ptr::eq(self, other) {
            return true;
        }
        let (first, second) = if (self as *const Self) < (other as *const Self) {
            (self, other)
        } else {
            (other, self)
        };
        let first = first.lock();
        let second = second.lock();
        *first == *second
    }
}

impl<T: Eq> Eq for SynchronizedEvaluators<T> {}

impl<T: fmt::Display> fmt::Display for SynchronizedEvaluators<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.lock(), f)
    }
}

impl<T: fmt::Debug> fmt::Debug for SynchronizedEvaluators<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SynchronizedEvaluators")
            .field(&*self.lock())
            .finish()
    }
}

impl<T: Serialize> Serialize for SynchronizedEvaluators<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.lock().serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for SynchronizedEvaluators<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        Evaluators::deserialize(deserializer).map(Self::from)
    }
}
