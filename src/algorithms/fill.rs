//! `fill_n` / `uninitialized_fill_n`: write `value` into the first `n`
//! cells of a range (§4.4, scenario 5 of the testable properties: writes
//! exactly the first `k` cells and leaves the rest untouched).

use std::mem::MaybeUninit;

use crate::error::Result;
use crate::executor::catch;
use crate::partitioner::{deliver, map_chunks_into, run_on_executor, should_run_sequentially, Delivery};
use crate::policy::ExecutionPolicy;

/// `fill_n(policy, output, n, value)`: `output[0..n] = value`, in parallel
/// chunks when worthwhile. Only the first `n` cells of `output` are
/// touched; `n` may be smaller than `output.len()`. Honors
/// `policy.task_mode()` like every other façade (§6).
pub fn fill_n<T>(policy: &ExecutionPolicy, output: &mut [T], n: usize, value: T) -> Delivery<()>
where
    T: Copy + Send + Sync + 'static,
{
    deliver(policy, move || fill_n_blocking(policy, output, n, value))
}

fn fill_n_blocking<T>(policy: &ExecutionPolicy, output: &mut [T], n: usize, value: T) -> Result<()>
where
    T: Copy + Send + Sync,
{
    assert!(n <= output.len(), "fill_n count exceeds output length");
    let target = &mut output[..n];
    if should_run_sequentially(policy, n, true) {
        target.fill(value);
        return Ok(());
    }
    let dummy_input = vec![(); n];
    map_chunks_into(policy, &dummy_input, target, |_idx, _in_chunk, out_chunk| {
        out_chunk.fill(value);
    })
}

/// `uninitialized_fill_n(policy, storage, n, value)`: writes `value` into
/// the first `n` cells of possibly-uninitialized storage without requiring
/// `T: Default`, mirroring the standard library's distinction between
/// "assign over an existing value" and "construct a value where none yet
/// exists". Cells at `[n..]` are left untouched and uninitialized; it is
/// the caller's responsibility not to read them. Honors `policy.task_mode()`
/// like every other façade (§6).
pub fn uninitialized_fill_n<T>(
    policy: &ExecutionPolicy,
    storage: &mut [MaybeUninit<T>],
    n: usize,
    value: T,
) -> Delivery<()>
where
    T: Copy + Send + Sync + 'static,
{
    deliver(policy, move || uninitialized_fill_n_blocking(policy, storage, n, value))
}

fn uninitialized_fill_n_blocking<T>(policy: &ExecutionPolicy, storage: &mut [MaybeUninit<T>], n: usize, value: T) -> Result<()>
where
    T: Copy + Send + Sync,
{
    assert!(n <= storage.len(), "uninitialized_fill_n count exceeds storage length");
    if should_run_sequentially(policy, n, true) {
        for slot in &mut storage[..n] {
            slot.write(value);
        }
        return Ok(());
    }
    let chunk_size = crate::partitioner::chunk_size_for(n, policy);
    use rayon::prelude::*;
    let raw: Vec<Result<()>> = run_on_executor(policy, || {
        storage[..n]
            .par_chunks_mut(chunk_size)
            .enumerate()
            .map(|(idx, chunk)| {
                catch(idx, || {
                    for slot in chunk {
                        slot.write(value);
                    }
                })
            })
            .collect()
    });
    for r in &raw {
        if let Err(e) = r {
            return Err(e.clone());
        }
    }
    Ok(())
}
