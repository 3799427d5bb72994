//! `rotate`: left-rotates a range so that `data[mid]` becomes the new first
//! element, preserving the relative order of all elements (§4.4).
//!
//! Realised via a scratch-buffer rebuild rather than the in-place
//! three-reversal trick: the buffer form parallelises cleanly over the two
//! independent halves (§9), at the cost of `O(n)` extra storage already
//! accepted elsewhere in this crate's chunked kernels.

use crate::error::Result;
use crate::partitioner::{deliver, map_chunks_into, should_run_sequentially, Delivery};
use crate::policy::ExecutionPolicy;

/// `rotate(policy, data, mid)`: equivalent to `data.rotate_left(mid)`, but
/// routed through the chunked partitioner above the sequential threshold so
/// large rotations benefit from the same parallel copy machinery as
/// `transform`. Honors `policy.task_mode()` like every other façade (§6).
pub fn rotate<T>(policy: &ExecutionPolicy, data: &mut [T], mid: usize) -> Delivery<()>
where
    T: Copy + Send + Sync + 'static,
{
    deliver(policy, move || rotate_blocking(policy, data, mid))
}

fn rotate_blocking<T>(policy: &ExecutionPolicy, data: &mut [T], mid: usize) -> Result<()>
where
    T: Copy + Send + Sync,
{
    assert!(mid <= data.len(), "rotate midpoint out of range");
    if mid == 0 || mid == data.len() {
        return Ok(());
    }
    if should_run_sequentially(policy, data.len(), true) {
        data.rotate_left(mid);
        return Ok(());
    }

    let mut rotated: Vec<T> = Vec::with_capacity(data.len());
    rotated.extend_from_slice(&data[mid..]);
    rotated.extend_from_slice(&data[..mid]);

    let input = rotated.clone();
    map_chunks_into(policy, &input, data, |_idx, in_chunk, out_chunk| {
        out_chunk.copy_from_slice(in_chunk);
    })
}
