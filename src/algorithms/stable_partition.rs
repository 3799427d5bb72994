//! `stable_partition`: reorders a range so every element satisfying `pred`
//! precedes every element that doesn't, preserving the relative order
//! within each group (§4.4, scenario 6's ordering guarantee).
//!
//! Parallel strategy: evaluate the predicate per chunk (the only part worth
//! parallelising), then perform the stable reshuffle as a single sequential
//! pass using a scratch buffer — classic stable-partition-via-buffer, since
//! an in-place stable partition has no efficient parallel decomposition
//! that preserves order without extra storage (§9).

use crate::error::Result;
use crate::partitioner::{deliver, map_chunks, should_run_sequentially, Delivery};
use crate::policy::ExecutionPolicy;

/// `stable_partition(policy, data, pred)`: rearranges `data` in place and
/// returns the index of the first element for which `pred` is false (the
/// partition point), i.e. `data[..point]` all satisfy `pred` and
/// `data[point..]` all do not, with relative order preserved in each half.
/// Honors `policy.task_mode()` like every other façade (§6).
pub fn stable_partition<T, F>(policy: &ExecutionPolicy, data: &mut [T], pred: F) -> Delivery<usize>
where
    T: Copy + Send + Sync + 'static,
    F: Fn(&T) -> bool + Sync,
{
    deliver(policy, move || stable_partition_blocking(policy, data, pred))
}

fn stable_partition_blocking<T, F>(policy: &ExecutionPolicy, data: &mut [T], pred: F) -> Result<usize>
where
    T: Copy + Send + Sync,
    F: Fn(&T) -> bool + Sync,
{
    if data.is_empty() {
        return Ok(0);
    }
    let flags: Vec<bool> = if should_run_sequentially(policy, data.len(), true) {
        data.iter().map(&pred).collect()
    } else {
        map_chunks(policy, data, |_idx, chunk| chunk.iter().map(&pred).collect::<Vec<bool>>())?
            .into_iter()
            .flatten()
            .collect()
    };

    let mut buffer: Vec<T> = Vec::with_capacity(data.len());
    for (item, &keep) in data.iter().zip(flags.iter()) {
        if keep {
            buffer.push(*item);
        }
    }
    let partition_point = buffer.len();
    for (item, &keep) in data.iter().zip(flags.iter()) {
        if !keep {
            buffer.push(*item);
        }
    }
    data.copy_from_slice(&buffer);
    Ok(partition_point)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::par;

    #[test]
    fn stable_partition_preserves_relative_order_within_groups() {
        let mut data: Vec<i32> = (0..5007).collect();
        let point = stable_partition(&par(), &mut data, |&x| x % 2 == 0).into_value().unwrap();
        let evens: Vec<i32> = (0..5007).filter(|x| x % 2 == 0).collect();
        let odds: Vec<i32> = (0..5007).filter(|x| x % 2 != 0).collect();
        assert_eq!(&data[..point], evens.as_slice());
        assert_eq!(&data[point..], odds.as_slice());
    }

    #[test]
    fn stable_partition_empty_range_is_a_no_op() {
        let mut data: Vec<i32> = Vec::new();
        assert_eq!(stable_partition(&par(), &mut data, |&x| x > 0).into_value().unwrap(), 0);
    }

    #[test]
    fn exception_from_predicate_surfaces_once() {
        let mut data: Vec<i32> = (0..40).collect();
        let policy = par().with_static_chunk_size(4);
        let result = stable_partition(&policy, &mut data, |&x| {
            if x == 13 {
                panic!("boom");
            }
            x % 2 == 0
        })
        .into_value();
        assert!(result.is_err());
    }
}
