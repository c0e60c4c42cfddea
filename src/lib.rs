//! Evaluators – array-backed containers searched by a caller-supplied relation.
//!
//! A store holds items in insertion order and finds them by *evaluation*
//! rather than equality: each item implements [`Evaluable<K>`] and decides
//! whether a query key of type `K` designates it. The key type is independent
//! of the item type, so a list of users can be searched by id, by name, or by
//! any other projection.
//!
//! ## Stores
//! * [`Evaluators`] – the growable, single-threaded engine: positional and
//!   keyed insertion, removal, bulk append, reversal, trimming and snapshots.
//! * [`SynchronizedEvaluators`] – the same engine behind one `Mutex`; every
//!   operation is atomic with respect to every other.
//! * [`ImmutableEvaluators`] – a fixed copy built once and only ever read.
//!
//! ## Capabilities
//! Read access is the [`Evaluator`] trait and write access is
//! [`EvaluatorMut`]. The immutable store only implements the former, so code
//! that holds a read-only store cannot mutate it by accident. Import both
//! through [`prelude`].
//!
//! ## Search order
//! Lookups walk the [`search::ScanOrder`]: two cursors closing in from the
//! ends and, from four items on, two more spreading out from the middle.
//! The lower index of each cursor pair is probed first. Every index is probed
//! at most once.
//!
//! ## Growth
//! Capacity follows a [`CapacityPolicy`]: a floor of 10 slots on first use,
//! +50% afterwards, clamped to a configurable maximum. Policies can be read
//! from a file or the environment through the [`config`](crate::config) module.
//!
//! ## Quick Start
//! ```
//! use evaluators::prelude::*;
//! use evaluators::Evaluators;
//!
//! #[derive(Debug, Clone, PartialEq)]
//! struct Task { id: u32, title: String }
//!
//! impl Evaluable<u32> for Task {
//!     fn matches(&self, id: &u32) -> bool { self.id == *id }
//! }
//!
//! let mut tasks = Evaluators::new();
//! tasks.push(Task { id: 1, title: "write".into() }).unwrap();
//! tasks.push(Task { id: 2, title: "review".into() }).unwrap();
//! tasks.push_at(1, Task { id: 3, title: "test".into() }).unwrap();
//!
//! assert_eq!(tasks.index_of(&3u32), Some(1));
//! assert_eq!(tasks.remove(&2u32).map(|t| t.title), Some("review".to_string()));
//! assert_eq!(tasks.len(), 2);
//! ```

pub mod capacity;
pub mod config;
pub mod error;
pub mod evaluable;
pub mod evaluator;
pub mod evaluators;
pub mod immutable;
pub mod search;
pub mod synchronized;

pub use capacity::CapacityPolicy;
pub use error::{EvaluatorError, Result};
pub use evaluable::Evaluable;
pub use evaluator::{Evaluator, EvaluatorMut};
pub use evaluators::Evaluators;
pub use immutable::ImmutableEvaluators;
pub use synchronized::SynchronizedEvaluators;

/// The traits needed to call store operations.
pub mod prelude {
    pub use crate::evaluable::Evaluable;
    pub use crate::evaluator::{Evaluator, EvaluatorMut};
}
