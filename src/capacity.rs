//! Growth policy for the backing block of the mutable stores.
//!
//! Every write path that can add items asks the policy for the next block
//! size before touching storage. The policy only ever grows; shrinking
//! happens through an explicit `trim`.

use serde::{Deserialize, Serialize};

use crate::error::{EvaluatorError, Result};

/// Slots allocated by the first growth of an empty block.
pub const DEFAULT_CAPACITY: usize = 10;

/// Largest block the policy will ever hand out, in slots.
pub const MAX_CAPACITY: usize = isize::MAX as usize - 8;

/// Computes backing block sizes: 50% growth, a floor for empty blocks and a
/// hard ceiling.
///
/// The fields are public so a policy can be written inline, but values read
/// from configuration should go through [`crate::config::from_config`], which
/// validates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityPolicy {
    pub default_capacity: usize,
    pub max_capacity: usize,
}

impl Default for CapacityPolicy {
    fn default() -> Self {
        Self {
            default_capacity: DEFAULT_CAPACITY,
            max_capacity: MAX_CAPACITY,
        }
    }
}

impl CapacityPolicy {
    pub const fn new(default_capacity: usize, max_capacity: usize) -> Self {
        Self {
            default_capacity,
            max_capacity,
        }
    }

    /// Returns the block size to use when a block of `old` slots must hold at
    /// least `min` slots. The result is never below `min` and never below
    /// `old`.
    pub fn next_capacity(&self, old: usize, min: usize) -> Result<usize> {
        let min = if old == 0 {
            min.max(self.default_capacity.min(self.max_capacity))
        } else {
            min
        };
        if min <= old {
            return Ok(old);
        }
        let mut new = old.saturating_add(old >> 1);
        if new < min {
            new = min;
        }
        if new > self.max_capacity {
            if min > self.max_capacity {
                return Err(EvaluatorError::CapacityOverflow {
                    requested: min,
                    max: self.max_capacity,
                });
            }
            new = self.max_capacity;
        }
        Ok(new)
    }

    /// Slots needed to hold `len + additional` items.
    pub fn required(&self, len: usize, additional: usize) -> Result<usize> {
        len.checked_add(additional)
            .ok_or(EvaluatorError::CapacityOverflow {
                requested: usize::MAX,
                max: self.max_capacity,
            })
    }

    /// Checks a caller supplied initial capacity.
    pub fn initial_capacity(&self, capacity: isize) -> Result<usize> {
        let capacity =
            usize::try_from(capacity).map_err(|_| EvaluatorError::IllegalCapacity(capacity))?;
        if capacity > self.max_capacity {
            return Err(EvaluatorError::CapacityOverflow {
                requested: capacity,
                max: self.max_capacity,
            });
        }
        Ok(capacity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_block_grows_to_floor() {
        let policy = CapacityPolicy::default();
        assert_eq!(policy.next_capacity(0, 1).unwrap(), DEFAULT_CAPACITY);
        assert_eq!(policy.next_capacity(0, 25).unwrap(), 25);
    }

    #[test]
    fn grows_by_half() {
        let policy = CapacityPolicy::default();
        assert_eq!(policy.next_capacity(10, 11).unwrap(), 15);
        assert_eq!(policy.next_capacity(15, 16).unwrap(), 22);
        // 50% is not enough, the minimum wins
        assert_eq!(policy.next_capacity(10, 40).unwrap(), 40);
    }

    #[test]
    fn never_shrinks() {
        let policy = CapacityPolicy::default();
        assert_eq!(policy.next_capacity(20, 5).unwrap(), 20);
        assert_eq!(policy.next_capacity(20, 20).unwrap(), 20);
    }

    #[test]
    fn clamps_to_maximum() {
        let policy = CapacityPolicy::new(4, 100);
        assert_eq!(policy.next_capacity(80, 81).unwrap(), 100);
        assert_eq!(policy.next_capacity(0, 1).unwrap(), 4);
    }

    #[test]
    fn floor_above_maximum_is_capped() {
        let policy = CapacityPolicy::new(50, 8);
        assert_eq!(policy.next_capacity(0, 1).unwrap(), 8);
    }

    #[test]
    fn minimum_above_maximum_is_exhaustion() {
        let policy = CapacityPolicy::new(4, 100);
        let err = policy.next_capacity(80, 101).unwrap_err();
        assert_eq!(err, EvaluatorError::CapacityOverflow { requested: 101, max: 100 });
        assert!(policy.required(usize::MAX, 1).is_err());
    }

    #[test]
    fn initial_capacity_checks() {
        let policy = CapacityPolicy::new(4, 100);
        assert_eq!(policy.initial_capacity(0).unwrap(), 0);
        assert_eq!(policy.initial_capacity(100).unwrap(), 100);
        assert_eq!(policy.initial_capacity(-1).unwrap_err(), EvaluatorError::IllegalCapacity(-1));
        assert!(matches!(
            policy.initial_capacity(101),
            Err(EvaluatorError::CapacityOverflow { requested: 101, .. })
        ));
    }
}
