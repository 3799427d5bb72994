//! Partitioner (C4): range → chunks → tasks → result.
//!
//! Grounded in the teacher's `ParallelStrategy` (`optimization/
//! parallel_strategy.rs`): pick a chunk size once from policy + data size,
//! then drive `rayon::par_chunks`/`par_chunks_mut` over it. This module
//! generalises that single-shot map into the full contract of §4.4: chunk
//! count selection, submission-order fold, and blocking/async result
//! delivery.

use rayon::prelude::*;

use crate::constants::{
    CHUNK_SIZE_L1, CHUNK_SIZE_L2, CHUNK_SIZE_L3, MAX_OVERSUBSCRIPTION, MIN_WORK_PER_THREAD,
    PARALLEL_THRESHOLD_LARGE, PARALLEL_THRESHOLD_MEDIUM, PARALLEL_THRESHOLD_SMALL,
};
use crate::error::Result;
use crate::executor::catch;
use crate::future::AlgoFuture;
use crate::policy::{Chunking, ExecutionPolicy, TaskMode};
use crate::reduction::Reduction;

/// Step 2 of §4.4: pick `K`/chunk size for a range of `len` elements under
/// `policy`'s chunking mode.
pub(crate) fn chunk_size_for(len: usize, policy: &ExecutionPolicy) -> usize {
    let workers = rayon::current_num_threads().max(1);
    match policy.chunking() {
        Chunking::Static(n) if n > 0 => n,
        Chunking::Static(_) => len.max(1),
        Chunking::Dynamic => {
            // The executor owns stealing (§9 open question (c)); a modest
            // chunk size just bounds how much a single steal moves.
            (len / (workers * MAX_OVERSUBSCRIPTION).max(1)).max(MIN_WORK_PER_THREAD.min(len.max(1)))
        }
        Chunking::Auto => {
            let cache_chunk = match len {
                n if n <= PARALLEL_THRESHOLD_SMALL => return n.max(1),
                n if n <= PARALLEL_THRESHOLD_MEDIUM => CHUNK_SIZE_L1,
                n if n <= PARALLEL_THRESHOLD_LARGE => CHUNK_SIZE_L2,
                _ => CHUNK_SIZE_L3,
            };
            let cache_optimal = cache_chunk.min(len);
            let thread_optimal = len.div_ceil(workers * MAX_OVERSUBSCRIPTION);
            MIN_WORK_PER_THREAD.max(cache_optimal.min(thread_optimal).max(1))
        }
    }
}

/// Whether `policy` should go straight to the sequential kernel: either it
/// is `seq`/`unseq` (single-thread), or the range is too small to be worth
/// splitting.
pub fn should_run_sequentially(policy: &ExecutionPolicy, len: usize, size_known: bool) -> bool {
    if !policy.kind().is_parallel() {
        return true;
    }
    if !size_known {
        return true;
    }
    matches!(policy.chunking(), Chunking::Auto) && len < PARALLEL_THRESHOLD_SMALL
}

/// Runs `work` on `policy`'s bound (or default) executor (§4.4 step 4, §6:
/// "any conforming executor is acceptable"). `RayonExecutor::install`
/// installs the calling rayon work onto its own pool, so anything spawned
/// through here — including the `par_chunks`/`par_chunks_mut` calls below —
/// actually runs there instead of silently falling back to the ambient
/// global pool.
pub(crate) fn run_on_executor<R: Send>(policy: &ExecutionPolicy, work: impl FnOnce() -> R + Send) -> R {
    crate::executor::spawn(policy.executor().as_ref(), work)
}

/// Runs `body` once per chunk of `data`, in parallel, collecting partials in
/// **submission (source) order** — the ordering guarantee required for
/// order-preserving folds (§4.4 step 5). The first error in source order is
/// returned, matching the "first in source order is re-raised" rule of §7.
pub fn map_chunks<T, R>(
    policy: &ExecutionPolicy,
    data: &[T],
    body: impl Fn(usize, &[T]) -> R + Sync,
) -> Result<Vec<R>>
where
    T: Sync,
    R: Send,
{
    let chunk_size = chunk_size_for(data.len(), policy);
    let raw: Vec<Result<R>> = run_on_executor(policy, || {
        data.par_chunks(chunk_size)
            .enumerate()
            .map(|(idx, chunk)| catch(idx, || body(idx, chunk)))
            .collect()
    });
    first_error_in_order(raw)
}

/// Same as [`map_chunks`] but over disjoint mutable output chunks zipped
/// with the (read-only) input — the shape every in-place, order-preserving
/// algorithm (`transform`, `for_each` over a mutable range) needs.
pub fn map_chunks_into<T, U>(
    policy: &ExecutionPolicy,
    input: &[T],
    output: &mut [U],
    body: impl Fn(usize, &[T], &mut [U]) + Sync,
) -> Result<()>
where
    T: Sync,
    U: Send,
{
    assert_eq!(input.len(), output.len(), "input/output length mismatch");
    let chunk_size = chunk_size_for(input.len(), policy);
    let raw: Vec<Result<()>> = run_on_executor(policy, || {
        input
            .par_chunks(chunk_size)
            .zip(output.par_chunks_mut(chunk_size))
            .enumerate()
            .map(|(idx, (in_chunk, out_chunk))| catch(idx, || body(idx, in_chunk, out_chunk)))
            .collect()
    });
    first_error_in_order(raw).map(|_| ())
}

fn first_error_in_order<R>(raw: Vec<Result<R>>) -> Result<Vec<R>> {
    for r in &raw {
        if let Err(e) = r {
            return Err(e.clone());
        }
    }
    Ok(raw.into_iter().map(|r| r.unwrap()).collect())
}

/// The full reduce path: partition, map each chunk to a partial `R`, then
/// fold in submission order via `reduction` (§4.5's "live reference plus
/// shadow", realised here as an ordinary return value).
pub fn reduce_chunks<T, R>(
    policy: &ExecutionPolicy,
    data: &[T],
    reduction: &Reduction<R>,
    map: impl Fn(&T) -> R + Sync,
) -> Result<R>
where
    T: Sync,
    R: Copy + Send,
{
    if data.is_empty() {
        return Ok(reduction.identity());
    }
    let partials = map_chunks(policy, data, |_idx, chunk| {
        chunk
            .iter()
            .map(&map)
            .fold(reduction.identity(), |acc, x| reduction.combine(acc, x))
    })?;
    Ok(reduction.fold(partials))
}

/// Policy-aware wrapper: runs `work` (already dispatched to sequential or
/// partitioned as appropriate) and, if the policy's task mode is `async`,
/// returns an immediately-resolved future rather than blocking; §3's
/// `seq+async` invariant (futures resolved on the calling thread) falls out
/// naturally since `work` already ran before this function returns either
/// way — there is no additional suspension point in this crate's executor
/// model (§5: "the returned future is the sole suspension boundary").
pub fn deliver<R: Send + 'static>(policy: &ExecutionPolicy, work: impl FnOnce() -> Result<R>) -> Delivery<R> {
    let result = work();
    match policy.task_mode() {
        TaskMode::Blocking => Delivery::Value(result),
        TaskMode::Async => Delivery::Future(AlgoFuture::ready(result)),
    }
}

/// Either a direct value or a future, depending on the policy's task mode
/// (§6: "Async policies return futures; blocking policies return the
/// algorithm's natural result type").
pub enum Delivery<R> {
    Value(Result<R>),
    Future(AlgoFuture<R>),
}

impl<R> Delivery<R> {
    /// Unwraps a blocking delivery; panics if this was actually async (a
    /// façade bug, not a user error, since the policy is known statically
    /// at the call site).
    pub fn into_value(self) -> Result<R> {
        match self {
            Delivery::Value(v) => v,
            Delivery::Future(_) => panic!("async policy delivered to a blocking call site"),
        }
    }

    pub fn into_future(self) -> AlgoFuture<R> {
        match self {
            Delivery::Future(f) => f,
            Delivery::Value(v) => AlgoFuture::ready(v),
        }
    }
}
