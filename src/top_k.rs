use crate::heap::BinaryHeap;
use thiserror::Error;
use tracing::trace;

/// Error returned when a tracker is configured with a capacity of zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("top-k capacity must be at least 1, got {got}")]
pub struct ConfigurationError {
    pub got: usize,
}

/// Tracks the K largest values seen in a stream, in O(K) memory.
///
/// A min-heap of fixed capacity K holds the K largest values observed so far,
/// so its root is the smallest of them: the running Kth largest. Each new
/// value is compared against that root:
/// 1. Under capacity, the value is simply inserted.
/// 2. At capacity, a value larger than the root swaps in via a single
///    sift-down pass; anything else is discarded.
///
/// Complexity:
/// - Observe: O(log K)
/// - Memory: O(K) instead of O(total values)
pub struct BoundedTopKTracker<T: Ord> {
    heap: BinaryHeap<T>,
    capacity: usize,
}

impl<T: Ord + Clone> BoundedTopKTracker<T> {
    /// Creates a tracker that retains the `k` largest values.
    ///
    /// The initial values are heapified in O(n); if more than `k` were
    /// supplied, the smallest are extracted and discarded until `k` remain.
    #[tracing::instrument(skip(initial), fields(initial_len = initial.len()))]
    pub fn new(k: usize, initial: Vec<T>) -> Result<Self, ConfigurationError> {
        if k == 0 {
            return Err(ConfigurationError { got: k });
        }

        let mut heap = BinaryHeap::min_from(initial);
        while heap.len() > k {
            let _ = heap.extract();
        }

        Ok(Self { heap, capacity: k })
    }

    /// Feeds one value from the stream and returns the current root.
    ///
    /// Once `k` values have been observed, the returned value is exactly the
    /// Kth largest of the whole stream to date, duplicates counted by
    /// multiplicity. Before that point the heap is only partially filled and
    /// the return is its minimum, not a true Kth largest; callers that care
    /// can check `len() < capacity()` first.
    pub fn observe(&mut self, value: T) -> T {
        if self.heap.len() < self.capacity {
            self.heap.insert(value);
        } else if let Ok(smallest) = self.heap.peek() {
            if value > *smallest {
                if let Ok(_evicted) = self.heap.replace(value) {
                    trace!(capacity = self.capacity, "evicted previous kth-largest");
                }
            }
        }

        match self.heap.peek() {
            Ok(root) => root.clone(),
            // Capacity is validated positive, so the branch above always
            // leaves at least one element in the heap.
            Err(_) => unreachable!("tracker heap cannot be empty after observe"),
        }
    }

    /// Returns the number of values currently retained (at most `capacity`).
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if no values have been observed yet.
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the configured K.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Consumes the tracker and returns the retained values, largest first.
    pub fn into_sorted_vec(self) -> Vec<T> {
        let mut values = self.heap.into_sorted_vec();
        values.reverse();
        values
    }
}
