use crate::heap::BinaryHeap;
use std::cmp::Ordering;
use thiserror::Error;
use tracing::trace;

/// Error returned when the median is requested before any value was added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("median requested before any value was added")]
pub struct EmptyStateError;

/// Answers running-median queries over a stream in O(1) per query.
///
/// Two heaps split the stream around the median: `lower` is max-ordered and
/// holds the smaller half, `upper` is min-ordered and holds the larger half.
/// Between calls both invariants hold:
/// 1. When both are non-empty, every value in `lower` is <= every value in
///    `upper` (it suffices that max(lower) <= min(upper)).
/// 2. The sizes differ by at most one.
///
/// The median is therefore always at a heap root: the larger heap's root when
/// sizes differ, the mean of both roots when they match.
///
/// The element type must promote losslessly to `f64` for the even-count
/// average; wider types convert at the call boundary.
pub struct RunningMedianFinder<T: Ord + Copy + Into<f64>> {
    lower: BinaryHeap<T>,
    upper: BinaryHeap<T>,
}

impl<T: Ord + Copy + Into<f64>> RunningMedianFinder<T> {
    /// Creates a finder with no values.
    pub fn new() -> Self {
        Self {
            lower: BinaryHeap::max(),
            upper: BinaryHeap::min(),
        }
    }

    /// Adds one value from the stream, rebalancing in O(log n).
    ///
    /// The value always enters `lower` first. If that breaks the cross-heap
    /// order, `lower`'s root migrates to `upper`; if either heap then leads by
    /// more than one element, one root migrates the other way. At most one
    /// correction fires per source of imbalance, so the skew never exceeds
    /// one.
    pub fn add_num(&mut self, value: T) {
        self.lower.insert(value);

        if let (Ok(&low), Ok(&up)) = (self.lower.peek(), self.upper.peek()) {
            if low > up {
                self.shift_down_to_upper();
            }
        }

        if self.lower.len() > self.upper.len() + 1 {
            trace!("rebalancing lower -> upper");
            self.shift_down_to_upper();
        } else if self.upper.len() > self.lower.len() + 1 {
            trace!("rebalancing upper -> lower");
            self.shift_up_to_lower();
        }
    }

    /// Returns the median of everything added so far.
    ///
    /// Odd counts yield the middle element; even counts yield the mean of the
    /// two middle elements.
    pub fn find_median(&self) -> Result<f64, EmptyStateError> {
        match self.lower.len().cmp(&self.upper.len()) {
            Ordering::Greater => self
                .lower
                .peek()
                .map(|&value| value.into())
                .map_err(|_| EmptyStateError),
            Ordering::Less => self
                .upper
                .peek()
                .map(|&value| value.into())
                .map_err(|_| EmptyStateError),
            Ordering::Equal => match (self.lower.peek(), self.upper.peek()) {
                (Ok(&low), Ok(&up)) => Ok((low.into() + up.into()) / 2.0),
                _ => Err(EmptyStateError),
            },
        }
    }

    /// Returns how many values have been added.
    pub fn len(&self) -> usize {
        self.lower.len() + self.upper.len()
    }

    /// Returns true if no value has been added yet.
    pub fn is_empty(&self) -> bool {
        self.lower.is_empty() && self.upper.is_empty()
    }

    fn shift_down_to_upper(&mut self) {
        if let Ok(moved) = self.lower.extract() {
            self.upper.insert(moved);
        }
    }

    fn shift_up_to_lower(&mut self) {
        if let Ok(moved) = self.upper.extract() {
            self.lower.insert(moved);
        }
    }
}

impl<T: Ord + Copy + Into<f64>> Default for RunningMedianFinder<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    /// Both structural invariants, checked after every single call in the
    /// tests below: skew never exceeds one, and the halves never overlap.
    fn assert_invariants(finder: &RunningMedianFinder<i32>) {
        let skew = finder.lower.len().abs_diff(finder.upper.len());
        assert!(skew <= 1, "size skew {} exceeds 1", skew);

        if let (Ok(&low), Ok(&up)) = (finder.lower.peek(), finder.upper.peek()) {
            assert!(low <= up, "max(lower)={} > min(upper)={}", low, up);
        }
    }

    fn median_by_sorting(values: &[i32]) -> f64 {
        let mut sorted = values.to_vec();
        sorted.sort();

        let mid = sorted.len() / 2;
        if sorted.len() % 2 == 1 {
            sorted[mid] as f64
        } else {
            (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
        }
    }

    #[test]
    fn test_empty_finder_has_no_median() {
        let finder: RunningMedianFinder<i32> = RunningMedianFinder::new();

        assert!(finder.is_empty());
        assert_eq!(finder.find_median(), Err(EmptyStateError));
    }

    #[test]
    fn test_running_median_small_stream() {
        let mut finder = RunningMedianFinder::new();

        finder.add_num(1);
        finder.add_num(2);
        assert_eq!(finder.find_median(), Ok(1.5));

        finder.add_num(3);
        assert_eq!(finder.find_median(), Ok(2.0));
    }

    #[test]
    fn test_single_element() {
        let mut finder = RunningMedianFinder::new();
        finder.add_num(5);

        assert_eq!(finder.len(), 1);
        assert_eq!(finder.find_median(), Ok(5.0));
    }

    #[test]
    fn test_duplicate_elements() {
        let mut finder = RunningMedianFinder::new();

        for _ in 0..5 {
            finder.add_num(42);
            assert_invariants(&finder);
            assert_eq!(finder.find_median(), Ok(42.0));
        }
    }

    #[test]
    fn test_negative_and_positive_values() {
        let mut finder = RunningMedianFinder::new();

        finder.add_num(-5);
        finder.add_num(10);
        assert_eq!(finder.find_median(), Ok(2.5));

        finder.add_num(-20);
        assert_eq!(finder.find_median(), Ok(-5.0));
    }

    #[test]
    fn test_interleaved_extremes() {
        let mut finder = RunningMedianFinder::new();

        for value in [1, 100, 2, 99, 3, 98] {
            finder.add_num(value);
            assert_invariants(&finder);
        }

        // Sorted: [1, 2, 3, 98, 99, 100]
        assert_eq!(finder.find_median(), Ok(50.5));
    }

    #[test]
    fn test_ascending_run() {
        let mut finder = RunningMedianFinder::new();

        for value in 1..=100 {
            finder.add_num(value);
            assert_invariants(&finder);
        }
        assert_eq!(finder.find_median(), Ok(50.5));

        finder.add_num(101);
        assert_eq!(finder.find_median(), Ok(51.0));
    }

    #[test]
    fn test_descending_run() {
        let mut finder = RunningMedianFinder::new();

        for value in (1..=101).rev() {
            finder.add_num(value);
            assert_invariants(&finder);
        }

        assert_eq!(finder.find_median(), Ok(51.0));
    }

    #[test]
    fn test_invariants_hold_after_every_call() {
        let mut rng = StdRng::seed_from_u64(0x3D1A);

        for _ in 0..20 {
            let mut finder = RunningMedianFinder::new();
            let mut stream = Vec::new();

            for _ in 0..rng.gen_range(1..150) {
                let value = rng.gen_range(-1000..1000);
                finder.add_num(value);
                stream.push(value);

                // Invariants and the sort-based baseline must hold after
                // every single call, never just eventually
                assert_invariants(&finder);
                assert_eq!(finder.len(), stream.len());
                assert_eq!(finder.find_median(), Ok(median_by_sorting(&stream)));
            }
        }
    }
}
