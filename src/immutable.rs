use std::fmt;

use serde::{Deserialize, Serialize};

use crate::evaluator::{fmt_items, Evaluator};
use crate::evaluators::Evaluators;
use crate::search::scan_eq;

/// Fixed store built once and never changed afterwards.
///
/// The items are copied (or moved) into a private boxed slice at
/// construction, so later changes to the caller's data are not seen. Only
/// the read capability [`Evaluator`] is implemented.
///
/// ```
/// use evaluators::prelude::*;
/// use evaluators::immutable;
///
/// struct Code(u16);
/// impl Evaluable<u16> for Code {
///     fn matches(&self, key: &u16) -> bool { self.0 == *key }
/// }
///
/// let codes = immutable![Code(200), Code(404), Code(500)];
/// assert_eq!(codes.index_of(&404u16), Some(1));
/// assert_eq!(codes.len(), 3);
/// ```
#[derive(Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImmutableEvaluators<T> {
    items: Box<[T]>,
}

impl<T> ImmutableEvaluators<T> {
    pub fn new<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        Self {
            items: items.into_iter().collect(),
        }
    }

    pub fn from_slice(items: &[T]) -> Self
    where
        T: Clone,
    {
        Self { items: items.into() }
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items.into_vec()
    }
}

impl<T> Evaluator<T> for ImmutableEvaluators<T> {
    fn as_slice(&self) -> &[T] {
        &self.items
    }
}

impl<T> Default for ImmutableEvaluators<T> {
    fn default() -> Self {
        Self {
            items: Box::default(),
        }
    }
}

impl<T> From<Vec<T>> for ImmutableEvaluators<T> {
    fn from(items: Vec<T>) -> Self {
        Self {
            items: items.into_boxed_slice(),
        }
    }
}

impl<T> From<Evaluators<T>> for ImmutableEvaluators<T> {
    fn from(store: Evaluators<T>) -> Self {
        Self::from(store.into_vec())
    }
}

impl<T> FromIterator<T> for ImmutableEvaluators<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<'a, T> IntoIterator for &'a ImmutableEvaluators<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

impl<T: PartialEq> PartialEq for ImmutableEvaluators<T> {
    fn eq(&self, other: &Self) -> bool {
        scan_eq(&self.items, &other.items)
    }
}

impl<T: Eq> Eq for ImmutableEvaluators<T> {}

impl<T: fmt::Display> fmt::Display for ImmutableEvaluators<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_items(&self.items, f)
    }
}

impl<T: fmt::Debug> fmt::Debug for ImmutableEvaluators<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ImmutableEvaluators").field(&self.items).finish()
    }
}

/// Builds an [`ImmutableEvaluators`] from a fixed list of items.
#[macro_export]
macro_rules! immutable {
    () => {
        $crate::ImmutableEvaluators::default()
    };
    ($($item:expr),+ $(,)?) => {
        $crate::ImmutableEvaluators::from(::std::vec![$($item),+])
    };
}
