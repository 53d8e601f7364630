use std::cmp::Ordering;
use thiserror::Error;

/// Error returned by `peek`, `extract`, and `replace` on a heap with no elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("heap is empty")]
pub struct EmptyHeapError;

/// Total-order comparator deciding which of two elements belongs nearer the root.
///
/// Returning `Ordering::Less` for `(a, b)` means `a` sits above `b`. A min-heap
/// uses the natural order; a max-heap uses the reversed one. Injecting the
/// comparator at construction is what lets one heap type serve both roles.
pub type Comparator<T> = fn(&T, &T) -> Ordering;

fn min_order<T: Ord>(a: &T, b: &T) -> Ordering {
    a.cmp(b)
}

fn max_order<T: Ord>(a: &T, b: &T) -> Ordering {
    b.cmp(a)
}

/// An array-backed binary heap with a configurable ordering.
///
/// The heap is a complete binary tree stored densely in a `Vec<T>`: the
/// children of index `i` live at `2i+1` and `2i+2`, its parent at `(i-1)/2`.
/// The comparator decides which element of a parent/child pair belongs nearer
/// the root, so the same structure covers min-first and max-first use without
/// duplicated implementations or negated values.
///
/// Complexity:
/// - Peek: O(1)
/// - Insert / extract / replace: O(log n)
/// - Bulk build: O(n), cheaper than n sequential inserts
pub struct BinaryHeap<T> {
    items: Vec<T>,
    precedes: Comparator<T>,
}

impl<T: Ord> BinaryHeap<T> {
    /// Creates an empty min-heap: the smallest element surfaces at the root.
    pub fn min() -> Self {
        Self::with_comparator(min_order::<T>)
    }

    /// Creates an empty max-heap: the largest element surfaces at the root.
    pub fn max() -> Self {
        Self::with_comparator(max_order::<T>)
    }

    /// Builds a min-heap from existing values in O(n).
    pub fn min_from(initial: Vec<T>) -> Self {
        Self::build(initial, min_order::<T>)
    }

    /// Builds a max-heap from existing values in O(n).
    pub fn max_from(initial: Vec<T>) -> Self {
        Self::build(initial, max_order::<T>)
    }
}

impl<T> BinaryHeap<T> {
    /// Creates an empty heap ordered by the given comparator.
    pub fn with_comparator(precedes: Comparator<T>) -> Self {
        Self {
            items: Vec::new(),
            precedes,
        }
    }

    /// Builds a heap from existing values in O(n).
    ///
    /// Takes ownership of the values and sifts down every internal node, from
    /// the last (`len/2 - 1`) back to the root. This bottom-up pass is what
    /// makes bulk construction linear instead of the O(n log n) of repeated
    /// inserts.
    #[tracing::instrument(skip_all, fields(len = initial.len()))]
    pub fn build(initial: Vec<T>, precedes: Comparator<T>) -> Self {
        let mut heap = Self {
            items: initial,
            precedes,
        };

        for i in (0..heap.items.len() / 2).rev() {
            heap.sift_down(i);
        }

        heap
    }

    /// Returns the root element without removing it.
    pub fn peek(&self) -> Result<&T, EmptyHeapError> {
        self.items.first().ok_or(EmptyHeapError)
    }

    /// Inserts a value, keeping the heap order intact.
    ///
    /// The value is appended to the last slot and sifted up: while it precedes
    /// its parent, the two are swapped. Stops at the root or as soon as the
    /// order holds.
    pub fn insert(&mut self, value: T) {
        self.items.push(value);
        self.sift_up(self.items.len() - 1);
    }

    /// Removes and returns the root element.
    ///
    /// The last element moves into the freed root slot, then sifts down: at
    /// each level it swaps with whichever child belongs nearer the root, until
    /// it reaches a leaf or the order holds.
    pub fn extract(&mut self) -> Result<T, EmptyHeapError> {
        if self.items.is_empty() {
            return Err(EmptyHeapError);
        }

        let root = self.items.swap_remove(0);
        if !self.items.is_empty() {
            self.sift_down(0);
        }

        Ok(root)
    }

    /// Swaps a new value into the root slot and returns the old root.
    ///
    /// Equivalent to `extract` followed by `insert`, but restores the order
    /// with a single sift-down pass instead of two O(log n) traversals.
    pub fn replace(&mut self, value: T) -> Result<T, EmptyHeapError> {
        if self.items.is_empty() {
            return Err(EmptyHeapError);
        }

        let old_root = std::mem::replace(&mut self.items[0], value);
        self.sift_down(0);

        Ok(old_root)
    }

    /// Returns the number of elements currently stored.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the heap holds no elements.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Consumes the heap and returns its elements in root-first order:
    /// ascending for a min-heap, descending for a max-heap.
    pub fn into_sorted_vec(mut self) -> Vec<T> {
        let mut sorted = Vec::with_capacity(self.items.len());
        while let Ok(value) = self.extract() {
            sorted.push(value);
        }
        sorted
    }

    /// True if the element at `i` belongs nearer the root than the one at `j`.
    fn precedes_at(&self, i: usize, j: usize) -> bool {
        (self.precedes)(&self.items[i], &self.items[j]) == Ordering::Less
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if !self.precedes_at(index, parent) {
                break;
            }
            self.items.swap(index, parent);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.items.len();

        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut nearest = index;

            if left < len && self.precedes_at(left, nearest) {
                nearest = left;
            }
            if right < len && self.precedes_at(right, nearest) {
                nearest = right;
            }

            if nearest == index {
                break;
            }

            self.items.swap(index, nearest);
            index = nearest;
        }
    }
}
