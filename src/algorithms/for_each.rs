//! `for_each`: apply a body to every element, order-preserving (§4.4
//! ordering guarantee), with an optional diagnostic annotation
//! ([SUPPLEMENT], `original_source/tests/regressions/
//! for_each_annotated_function.cpp`).

use crate::error::Result;
use crate::partitioner::{deliver, map_chunks, should_run_sequentially, Delivery};
use crate::policy::ExecutionPolicy;
use crate::range::SliceCursor;

/// Wraps a callable with a name surfaced to the executor for tracing; the
/// name never affects the result (SPEC_FULL §4 [SUPPLEMENT]).
pub struct Annotated<F> {
    pub name: &'static str,
    pub body: F,
}

pub fn annotate<F>(name: &'static str, body: F) -> Annotated<F> {
    Annotated { name, body }
}

/// `for_each(policy, first, last, f)` realized over a slice, the call form
/// every façade in this crate reduces to once a size-known random-access
/// range is in hand.
pub fn for_each<T, F>(policy: &ExecutionPolicy, data: &[T], f: F) -> Delivery<()>
where
    T: Sync,
    F: Fn(&T) + Sync,
{
    deliver(policy, move || for_each_blocking(policy, data, f))
}

/// `for_each` over an [`Annotated`] body: behaves exactly like `for_each`,
/// returning the body's name alongside the delivery so callers (and tests)
/// can confirm the annotation survived the call, per the diagnostic-naming
/// property this wrapper exists for.
pub fn for_each_annotated<T, F>(policy: &ExecutionPolicy, data: &[T], annotated: Annotated<F>) -> (&'static str, Delivery<()>)
where
    T: Sync,
    F: Fn(&T) + Sync,
{
    let Annotated { name, body } = annotated;
    (name, for_each(policy, data, body))
}

fn for_each_blocking<T, F>(policy: &ExecutionPolicy, data: &[T], f: F) -> Result<()>
where
    T: Sync,
    F: Fn(&T) + Sync,
{
    if should_run_sequentially(policy, data.len(), true) {
        for item in data {
            f(item);
        }
        return Ok(());
    }
    map_chunks(policy, data, |_idx, chunk| {
        for item in chunk {
            f(item);
        }
    })
    .map(|_| ())
}

/// `for_each` over a cursor/sentinel pair rather than a slice, exercising
/// the traversal layer directly (Testable Property: "sentinel
/// equivalence"). Always sequential: a non-random-access cursor has no
/// size-known chunk boundaries to partition on (§4.8).
pub fn for_each_cursor<'a, T: Clone, F: FnMut(&T)>(mut cursor: SliceCursor<'a, T>, mut f: F) -> SliceCursor<'a, T> {
    while let Some(item) = cursor.advance() {
        f(&item);
    }
    cursor
}
