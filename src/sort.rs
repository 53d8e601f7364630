use crate::heap::BinaryHeap;
use std::cmp::Ordering;

/// The head of one input sequence during a k-way merge.
struct Cursor<T> {
    value: T,
    list: usize,
}

fn by_value<T: Ord>(a: &Cursor<T>, b: &Cursor<T>) -> Ordering {
    a.value.cmp(&b.value)
}

/// Sorts values ascending via a heap: O(n) bulk build, then n extractions.
///
/// O(n log n) overall, independent of the input order.
pub fn heapsort<T: Ord>(values: Vec<T>) -> Vec<T> {
    BinaryHeap::min_from(values).into_sorted_vec()
}

/// Merges individually ascending sequences into one ascending sequence.
///
/// A heap holds one cursor per non-exhausted sequence, ordered by the cursor's
/// current value, so the overall smallest remaining value is always at the
/// root. Emitting it swaps the same sequence's next value into the root slot
/// in a single sift pass (`replace`); only an exhausted sequence shrinks the
/// heap. O(n log k) for n total values across k sequences.
pub fn merge_sorted<T: Ord>(lists: Vec<Vec<T>>) -> Vec<T> {
    let total: usize = lists.iter().map(Vec::len).sum();
    let mut sources: Vec<std::vec::IntoIter<T>> =
        lists.into_iter().map(Vec::into_iter).collect();

    let mut heap = BinaryHeap::with_comparator(by_value::<T>);
    for (list, source) in sources.iter_mut().enumerate() {
        if let Some(value) = source.next() {
            heap.insert(Cursor { value, list });
        }
    }

    let mut merged = Vec::with_capacity(total);
    while let Ok(front) = heap.peek() {
        let list = front.list;
        let emitted = match sources[list].next() {
            Some(value) => heap.replace(Cursor { value, list }),
            None => heap.extract(),
        };
        if let Ok(cursor) = emitted {
            merged.push(cursor.value);
        }
    }

    merged
}
