//! Predicate search over a slice of [`Evaluable`] items.
//!
//! Lookups do not walk left to right. [`ScanOrder`] converges on the slice from
//! both ends and, once there are at least four items, also fans out from the
//! middle, so keys sitting near either end or near the center are found after
//! a handful of probes. Every index is still visited exactly once, which keeps
//! the worst case linear.
//!
//! Tie-break: the cursors of a pair are probed lower index first (`left`
//! before `right`, `middle_left` before `middle_right`), and the outer pair is
//! probed before the middle pair. With matches at both ends the leftmost one
//! wins for every length.

use std::iter::FusedIterator;

use crate::evaluable::Evaluable;

/// Below this length only the two outer cursors are used.
pub const FOUR_CURSOR_THRESHOLD: usize = 4;

/// Iterator over the indices `0..len` in search order.
///
/// Short slices use two cursors: `left, right` per step. From
/// [`FOUR_CURSOR_THRESHOLD`] items on, each round probes `left`, `right`,
/// `middle_left` and `middle_right`, where the middle pair starts at
/// `(len - 1) / 2` and moves outward. Indices a previous probe already
/// covered are skipped.
///
/// ```
/// use evaluators::search::ScanOrder;
///
/// assert_eq!(ScanOrder::new(3).collect::<Vec<_>>(), [0, 2, 1]);
/// assert_eq!(ScanOrder::new(8).collect::<Vec<_>>(), [0, 7, 3, 1, 6, 2, 4, 5]);
/// ```
#[derive(Debug, Clone)]
pub struct ScanOrder {
    len: usize,
    mid: usize,
    four_cursors: bool,
    round: usize,
    slot: u8,
    remaining: usize,
}

impl ScanOrder {
    pub fn new(len: usize) -> Self {
        Self {
            len,
            mid: len.saturating_sub(1) / 2,
            four_cursors: len >= FOUR_CURSOR_THRESHOLD,
            round: 0,
            slot: 0,
            remaining: len,
        }
    }

    // The round in which `index` is reached first.
    fn first_round(&self, index: usize) -> usize {
        let from_right = self.len - 1 - index;
        if !self.four_cursors {
            index.min(from_right)
        } else if index <= self.mid {
            index.min(self.mid - index)
        } else {
            from_right.min(index - self.mid)
        }
    }

    // Index under the current (round, slot), if that cursor is still inside
    // the slice and the probe is new.
    fn probe(&self) -> Option<usize> {
        let r = self.round;
        let left = r;
        let right = self.len.checked_sub(1 + r);
        let candidate = match self.slot {
            0 => Some(left).filter(|&c| c < self.len),
            1 => right.filter(|&c| c != left),
            2 => self.mid.checked_sub(r).filter(|&c| c != left),
            3 => Some(self.mid + r).filter(|&c| c < self.len && r > 0 && Some(c) != right),
            _ => None,
        };
        candidate.filter(|&c| self.first_round(c) == r)
    }

    fn advance(&mut self) {
        let slots = if self.four_cursors { 4 } else { 2 };
        self.slot += 1;
        if self.slot == slots {
            self.slot = 0;
            self.round += 1;
        }
    }
}

impl Iterator for ScanOrder {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        while self.remaining > 0 {
            let probe = self.probe();
            self.advance();
            if let Some(index) = probe {
                self.remaining -= 1;
                return Some(index);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for ScanOrder {}

impl FusedIterator for ScanOrder {}

/// Index of the first item, in [`ScanOrder`], whose relation holds for `key`.
///
/// An absent key matches nothing and no item is examined.
pub fn evaluate_of<T, K>(items: &[T], key: Option<&K>) -> Option<usize>
where
    T: Evaluable<K>,
    K: ?Sized,
{
    let key = key?;
    ScanOrder::new(items.len()).find(|&index| items[index].matches(key))
}

/// Element-wise equality walked in [`ScanOrder`], so a mismatch near either
/// end or the middle is found as early as a lookup would find it.
pub fn scan_eq<T: PartialEq>(left: &[T], right: &[T]) -> bool {
    left.len() == right.len() && ScanOrder::new(left.len()).all(|index| left[index] == right[index])
}
