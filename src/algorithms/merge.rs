//! `merge`: combine two sorted random-access ranges into one sorted output,
//! preserving stability (an element from `a` compares equal to one from `b`
//! sorts before it), per §4.4's ordering guarantee.
//!
//! Parallel strategy: split the longer input at its midpoint, locate the
//! matching split point in the shorter input via binary search, merge the
//! two halves independently and in parallel, then concatenate — the
//! standard divide-and-conquer parallel merge, requiring random access on
//! both inputs (§4.8).

use crate::error::Result;
use crate::executor::catch;
use crate::partitioner::{deliver, run_on_executor, should_run_sequentially, Delivery};
use crate::policy::ExecutionPolicy;

/// `merge(policy, a, b, output, cmp)`: stable two-way merge, random access
/// required on `a`/`b` (§4.8's ordering guarantee). Honors
/// `policy.task_mode()` like every other façade (§6).
pub fn merge<T, F>(policy: &ExecutionPolicy, a: &[T], b: &[T], output: &mut [T], cmp: F) -> Delivery<()>
where
    T: Copy + Send + Sync + 'static,
    F: Fn(&T, &T) -> std::cmp::Ordering + Sync + Send + Copy,
{
    deliver(policy, move || merge_blocking(policy, a, b, output, cmp))
}

fn merge_blocking<T, F>(policy: &ExecutionPolicy, a: &[T], b: &[T], output: &mut [T], cmp: F) -> Result<()>
where
    T: Copy + Send + Sync,
    F: Fn(&T, &T) -> std::cmp::Ordering + Sync + Send + Copy,
{
    assert_eq!(output.len(), a.len() + b.len(), "merge output must hold a.len() + b.len() elements");
    if should_run_sequentially(policy, a.len() + b.len(), true) {
        merge_sequential(a, b, output, cmp);
        return Ok(());
    }
    // `merge_parallel` recurses via `rayon::join`, which runs on whichever
    // pool is current for the calling thread — installing it on the bound
    // executor here makes every recursive `join` inherit that pool (§4.4
    // step 4, §6).
    run_on_executor(policy, || catch(0, || merge_parallel(a, b, output, cmp, 0)).and_then(|r| r))
}

fn merge_sequential<T: Copy, F: Fn(&T, &T) -> std::cmp::Ordering>(a: &[T], b: &[T], output: &mut [T], cmp: F) {
    let (mut i, mut j, mut k) = (0usize, 0usize, 0usize);
    while i < a.len() && j < b.len() {
        // `<=` keeps `a`'s element first on ties, the stability guarantee.
        if cmp(&a[i], &b[j]) != std::cmp::Ordering::Greater {
            output[k] = a[i];
            i += 1;
        } else {
            output[k] = b[j];
            j += 1;
        }
        k += 1;
    }
    output[k..k + (a.len() - i)].copy_from_slice(&a[i..]);
    k += a.len() - i;
    output[k..k + (b.len() - j)].copy_from_slice(&b[j..]);
}

/// Returns the index in `sorted` of the first element `> key` under `cmp`
/// (i.e. the upper-bound insertion point, keeping earlier equal elements of
/// `sorted` ahead of `key` when `sorted` came from `a`).
fn upper_bound<T, F: Fn(&T, &T) -> std::cmp::Ordering>(sorted: &[T], key: &T, cmp: &F) -> usize {
    let mut lo = 0usize;
    let mut hi = sorted.len();
    while lo < hi {
        let mid = lo + (hi - lo) / 2;
        if cmp(&sorted[mid], key) == std::cmp::Ordering::Greater {
            hi = mid;
        } else {
            lo = mid + 1;
        }
    }
    lo
}

fn merge_parallel<T, F>(a: &[T], b: &[T], output: &mut [T], cmp: F, depth: usize) -> Result<()>
where
    T: Copy + Send + Sync,
    F: Fn(&T, &T) -> std::cmp::Ordering + Sync + Send + Copy,
{
    const SEQUENTIAL_FLOOR: usize = 2_048;
    if a.len() + b.len() <= SEQUENTIAL_FLOOR || a.is_empty() || b.is_empty() {
        merge_sequential(a, b, output, cmp);
        return Ok(());
    }
    // Split the longer range at its midpoint.
    let (a_lo, a_hi, b_lo, b_hi, out_lo, out_hi);
    if a.len() >= b.len() {
        let mid = a.len() / 2;
        let split_b = upper_bound(b, &a[mid], &cmp);
        a_lo = &a[..mid];
        a_hi = &a[mid..];
        b_lo = &b[..split_b];
        b_hi = &b[split_b..];
    } else {
        let mid = b.len() / 2;
        // `b`'s midpoint splits `a` at the first element `> b[mid]`, so
        // equal elements of `a` land in the low half (stability).
        let split_a = upper_bound(a, &b[mid], &cmp);
        a_lo = &a[..split_a];
        a_hi = &a[split_a..];
        b_lo = &b[..mid];
        b_hi = &b[mid..];
    }
    let lo_len = a_lo.len() + b_lo.len();
    out_lo = lo_len;
    out_hi = output.len();
    let (out_first, out_second) = output.split_at_mut(out_lo);
    debug_assert_eq!(out_first.len() + out_second.len(), out_hi);

    // Propagate whichever half failed, left side first (submission order, §7).
    let (left, right) = rayon::join(
        || catch(depth, || merge_parallel(a_lo, b_lo, out_first, cmp, depth + 1)).and_then(|r| r),
        || catch(depth + 1, || merge_parallel(a_hi, b_hi, out_second, cmp, depth + 1)).and_then(|r| r),
    );
    left?;
    right?;
    Ok(())
}
