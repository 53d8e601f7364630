//! An in-memory engine for order statistics over streaming values.
//!
//! The foundation is [`BinaryHeap`], an array-backed binary heap whose
//! ordering is injected as a comparator, so one implementation covers
//! min-first, max-first, and custom orders. Two stream structures build on
//! it: [`BoundedTopKTracker`] keeps the K largest values seen so far in O(K)
//! memory, and [`RunningMedianFinder`] answers running-median queries in O(1)
//! from a pair of balanced heaps. [`PriorityQueue`] and the [`sort`] helpers
//! cover the common scheduling and merging uses of the same heap.
//!
//! Everything is synchronous and exclusively owned; callers needing shared
//! access across threads wrap an instance in their own lock.

pub mod heap;
pub mod median;
pub mod priority_queue;
pub mod sort;
pub mod top_k;

pub use heap::{BinaryHeap, Comparator, EmptyHeapError};
pub use median::{EmptyStateError, RunningMedianFinder};
pub use priority_queue::PriorityQueue;
pub use sort::{heapsort, merge_sorted};
pub use top_k::{BoundedTopKTracker, ConfigurationError};
