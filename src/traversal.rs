//! Traversal taxonomy and sentinel adapter (C1).
//!
//! Every other component depends on this layer for size-known dispatch.
//! Rather than runtime tag types, traversal capability is expressed as a
//! trait hierarchy; a [`TraversalCategory`] value is still exposed for
//! callers that want to branch on it explicitly (`category()`), mirroring
//! how the teacher's `ParallelStrategy::select` branches once on data size
//! and then commits to a `ProcessingMode` for the whole call.

use std::fmt;

/// The four traversal categories from §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraversalCategory {
    Input,
    Forward,
    Bidirectional,
    RandomAccess,
}

impl fmt::Display for TraversalCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            TraversalCategory::Input => "input",
            TraversalCategory::Forward => "forward",
            TraversalCategory::Bidirectional => "bidirectional",
            TraversalCategory::RandomAccess => "random-access",
        };
        f.write_str(s)
    }
}

/// A single-pass cursor: the minimal contract every range supports.
///
/// `CATEGORY` is set by each concrete cursor type to its most specific
/// traversal category; the sub-traits below only add capability, they do
/// not redeclare the constant.
pub trait InputCursor: Sized {
    type Item;

    /// Advance past and return the current item, or `None` at the
    /// sentinel.
    fn advance(&mut self) -> Option<Self::Item>;

    /// `category()` for this concrete cursor type.
    const CATEGORY: TraversalCategory;
}

/// A cursor that can be copied to take a snapshot of a position (required
/// for multi-pass algorithms and for chunk-start caching on non-random
/// ranges).
pub trait ForwardCursor: InputCursor + Clone {}

/// A cursor that can also step backwards.
pub trait BidirectionalCursor: ForwardCursor {
    fn retreat(&mut self) -> Option<Self::Item>;
}

/// A cursor with O(1) distance and arbitrary jumps: the fast path every
/// partitioner prefers.
pub trait RandomAccessCursor: BidirectionalCursor {
    /// Number of elements remaining before the sentinel.
    fn remaining(&self) -> usize;

    /// Jump forward (or backward, for negative `n`) by `n` positions.
    fn advance_by(&mut self, n: isize);
}

/// Advance `cursor` to its sentinel, in constant time when `cursor` is
/// random-access, otherwise linear in the number of remaining elements.
///
/// This is the single walking primitive reused by `distance` and by the
/// sequential fallback accumulate path (see SPEC_FULL §4, [SUPPLEMENT]),
/// so there is exactly one place that knows how to walk a non-random-access
/// cursor to its end.
pub fn advance_to_sentinel<C: InputCursor>(mut cursor: C) -> C {
    while cursor.advance().is_some() {}
    cursor
}

/// `distance(first, last)`: defined in O(1) for random-access cursors,
/// linear otherwise.
pub fn distance<C: RandomAccessCursor>(cursor: &C) -> usize {
    cursor.remaining()
}

/// Linear distance for any input cursor, consuming a clone so the caller's
/// cursor is left untouched. Used only when size-known dispatch has already
/// failed and a façade needs a count for diagnostics.
pub fn distance_linear<C: ForwardCursor>(cursor: &C) -> usize {
    let mut probe = cursor.clone();
    let mut n = 0usize;
    while probe.advance().is_some() {
        n += 1;
    }
    n
}

/// Runtime category query, for callers that received a boxed/dynamic
/// cursor and cannot dispatch on the trait at compile time.
pub fn category<C: InputCursor>() -> TraversalCategory {
    C::CATEGORY
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::range::SliceCursor;

    #[test]
    fn slice_cursor_is_random_access() {
        assert_eq!(
            category::<SliceCursor<'_, i32>>(),
            TraversalCategory::RandomAccess
        );
    }

    #[test]
    fn advance_to_sentinel_consumes_whole_range() {
        let data = [1, 2, 3, 4];
        let cursor = SliceCursor::new(&data);
        let ended = advance_to_sentinel(cursor);
        assert_eq!(ended.remaining(), 0);
    }
}
