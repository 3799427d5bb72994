//! Scan kernel (C6): inclusive_scan / exclusive_scan / transform_reduce.
//!
//! Two-pass design, mandatory because the reducer is not assumed
//! commutative (§4.6, §9):
//!
//! 1. Per chunk, in parallel: the local fold `S_k`, writing no output yet.
//! 2. A barrier, then a sequential prefix `P_k` over the chunk sums in
//!    source order.
//! 3. Per chunk, in parallel again: the running scan seeded with `P_k`,
//!    writing outputs.
//!
//! Grounded in the teacher's chunked batch kernels
//! (`models/black_scholes.rs`'s threshold-gated `par_chunks`/`chunks`
//! split), generalised from a single independent map to a two-pass,
//! order-dependent fold.

use rayon::prelude::*;

use crate::constants::PARALLEL_THRESHOLD_SMALL;
use crate::error::Result;
use crate::executor::catch;
use crate::partitioner::{chunk_size_for, run_on_executor, Delivery};
use crate::policy::ExecutionPolicy;

/// `S_k = ⊕ᵢ∈chunk_k a_i` for every chunk, computed independently. Routed
/// through the policy's bound (or default) executor (§4.4 step 4) the same
/// way the partitioner's `map_chunks` is.
fn chunk_sums<T, F>(policy: &ExecutionPolicy, data: &[T], chunk_size: usize, op: &F) -> Result<Vec<T>>
where
    T: Copy + Send + Sync,
    F: Fn(T, T) -> T + Sync,
{
    run_on_executor(policy, || {
        data.par_chunks(chunk_size)
            .enumerate()
            .map(|(idx, chunk)| {
                catch(idx, || {
                    let mut acc = chunk[0];
                    for &x in &chunk[1..] {
                        acc = op(acc, x);
                    }
                    acc
                })
            })
            .collect()
    })
}

/// `P_0 = init`, `P_k = P_{k-1} ⊕ S_{k-1}`, sequential over chunks in
/// source order — cheap relative to the two parallel passes (§9).
fn prefix_sums<T: Copy>(init: T, sums: &[T], op: &impl Fn(T, T) -> T) -> Vec<T> {
    let mut prefixes = Vec::with_capacity(sums.len());
    let mut running = init;
    for &s in sums {
        prefixes.push(running);
        running = op(running, s);
    }
    prefixes
}

/// Inclusive scan: `out[i] = a_0 ⊕ a_1 ⊕ ... ⊕ a_i`. Honors `policy.task_mode()`
/// (§6), delivering either a direct value or a future — the Testable
/// Property "every `(task)`-mode algorithm returns a future" applies to the
/// scan kernel exactly as it does to `for_each`/`transform`/`reduce`.
///
/// Empty ranges write nothing (§9 open question (b)).
pub fn inclusive_scan<T, F>(policy: &ExecutionPolicy, input: &[T], op: F) -> Delivery<Vec<T>>
where
    T: Copy + Send + Sync + 'static,
    F: Fn(T, T) -> T + Sync + Send,
{
    crate::partitioner::deliver(policy, move || inclusive_scan_blocking(policy, input, &op))
}

fn inclusive_scan_blocking<T, F>(policy: &ExecutionPolicy, input: &[T], op: &F) -> Result<Vec<T>>
where
    T: Copy + Send + Sync,
    F: Fn(T, T) -> T + Sync,
{
    if input.is_empty() {
        return Ok(Vec::new());
    }
    if !policy.kind().is_parallel() || input.len() < PARALLEL_THRESHOLD_SMALL {
        let mut out = Vec::with_capacity(input.len());
        let mut acc = input[0];
        out.push(acc);
        for &x in &input[1..] {
            acc = op(acc, x);
            out.push(acc);
        }
        return Ok(out);
    }

    let chunk_size = chunk_size_for(input.len(), policy);
    let sums = chunk_sums(policy, input, chunk_size, op)?;
    // `cumulative[k] = S_0 ⊕ S_1 ⊕ ... ⊕ S_k`: the inclusive scan of the
    // per-chunk sums themselves. The seed for chunk `idx >= 1` is
    // `cumulative[idx - 1]`, the fold of every chunk strictly before it;
    // chunk 0 has no seed and starts from its own first element.
    let mut cumulative = Vec::with_capacity(sums.len());
    let mut running = sums[0];
    cumulative.push(running);
    for &s in &sums[1..] {
        running = op(running, s);
        cumulative.push(running);
    }
    let mut out = vec![input[0]; input.len()];
    let results: Result<Vec<Vec<T>>> = run_on_executor(policy, || {
        input
            .par_chunks(chunk_size)
            .enumerate()
            .map(|(idx, chunk)| {
                catch(idx, || {
                    let mut local = Vec::with_capacity(chunk.len());
                    let mut acc = chunk[0];
                    if idx > 0 {
                        acc = op(cumulative[idx - 1], acc);
                    }
                    local.push(acc);
                    for &x in &chunk[1..] {
                        acc = op(acc, x);
                        local.push(acc);
                    }
                    local
                })
            })
            .collect()
    });
    let mut write_at = 0usize;
    for chunk_result in results? {
        for v in chunk_result {
            out[write_at] = v;
            write_at += 1;
        }
    }
    Ok(out)
}

/// Exclusive scan: `out[0] = init`, `out[i] = init ⊕ a_0 ⊕ ... ⊕ a_{i-1}`.
/// Honors `policy.task_mode()` the same way [`inclusive_scan`] does.
pub fn exclusive_scan<T, F>(policy: &ExecutionPolicy, input: &[T], init: T, op: F) -> Delivery<Vec<T>>
where
    T: Copy + Send + Sync + 'static,
    F: Fn(T, T) -> T + Sync + Send,
{
    crate::partitioner::deliver(policy, move || exclusive_scan_blocking(policy, input, init, &op))
}

fn exclusive_scan_blocking<T, F>(policy: &ExecutionPolicy, input: &[T], init: T, op: &F) -> Result<Vec<T>>
where
    T: Copy + Send + Sync,
    F: Fn(T, T) -> T + Sync,
{
    if input.is_empty() {
        return Ok(Vec::new());
    }
    if !policy.kind().is_parallel() || input.len() < PARALLEL_THRESHOLD_SMALL {
        let mut out = Vec::with_capacity(input.len());
        let mut acc = init;
        for &x in input {
            out.push(acc);
            acc = op(acc, x);
        }
        return Ok(out);
    }

    let chunk_size = chunk_size_for(input.len(), policy);
    let sums = chunk_sums(policy, input, chunk_size, op)?;
    let prefixes = prefix_sums(init, &sums, op);

    let results: Result<Vec<Vec<T>>> = run_on_executor(policy, || {
        input
            .par_chunks(chunk_size)
            .enumerate()
            .map(|(idx, chunk)| {
                catch(idx, || {
                    let mut local = Vec::with_capacity(chunk.len());
                    let mut acc = prefixes[idx];
                    for &x in chunk {
                        local.push(acc);
                        acc = op(acc, x);
                    }
                    local
                })
            })
            .collect()
    });

    let mut out = Vec::with_capacity(input.len());
    for chunk_result in results? {
        out.extend(chunk_result);
    }
    Ok(out)
}

/// `transform_reduce(policy, a, b, init, reduce_op, transform_op)`: folds
/// `reduce_op` over `transform_op(a_i, b_i)` pairwise. Unlike scan, this
/// does not need to preserve per-element order of the *output* (there is
/// none), only that `reduce_op`'s associativity is respected; folding is
/// still done in source order for determinism across runs (§4.4 step 5).
/// Honors `policy.task_mode()` like every other façade (§6).
pub fn transform_reduce<T, U, R, RF, TF>(
    policy: &ExecutionPolicy,
    a: &[T],
    b: &[U],
    init: R,
    reduce_op: RF,
    transform_op: TF,
) -> Delivery<R>
where
    T: Copy + Send + Sync + 'static,
    U: Copy + Send + Sync + 'static,
    R: Copy + Send + Sync + 'static,
    RF: Fn(R, R) -> R + Sync + Send,
    TF: Fn(T, U) -> R + Sync + Send,
{
    crate::partitioner::deliver(policy, move || {
        transform_reduce_blocking(policy, a, b, init, &reduce_op, &transform_op)
    })
}

fn transform_reduce_blocking<T, U, R, RF, TF>(
    policy: &ExecutionPolicy,
    a: &[T],
    b: &[U],
    init: R,
    reduce_op: &RF,
    transform_op: &TF,
) -> Result<R>
where
    T: Copy + Send + Sync,
    U: Copy + Send + Sync,
    R: Copy + Send + Sync,
    RF: Fn(R, R) -> R + Sync,
    TF: Fn(T, U) -> R + Sync,
{
    assert_eq!(a.len(), b.len(), "transform_reduce requires equal-length inputs");
    if a.is_empty() {
        return Ok(init);
    }
    if !policy.kind().is_parallel() || a.len() < PARALLEL_THRESHOLD_SMALL {
        let mut acc = init;
        for (&x, &y) in a.iter().zip(b.iter()) {
            acc = reduce_op(acc, transform_op(x, y));
        }
        return Ok(acc);
    }

    let chunk_size = chunk_size_for(a.len(), policy);
    let partials: Result<Vec<R>> = run_on_executor(policy, || {
        a.par_chunks(chunk_size)
            .zip(b.par_chunks(chunk_size))
            .enumerate()
            .map(|(idx, (ca, cb))| {
                catch(idx, || {
                    let mut acc = init;
                    for (&x, &y) in ca.iter().zip(cb.iter()) {
                        acc = reduce_op(acc, transform_op(x, y));
                    }
                    acc
                })
            })
            .collect()
    });
    Ok(partials?.into_iter().fold(init, reduce_op))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::par;

    fn concat(a: String, b: String) -> String {
        format!("{a}{b}")
    }

    fn alphabet() -> Vec<String> {
        ('a'..='z').map(|c| c.to_string()).collect()
    }

    #[test]
    fn inclusive_scan_non_commutative_last_element() {
        let input = alphabet();
        // chunk_size 0 included deliberately (§8: static_chunk_size(i) for
        // i in [0, N] must be bit-identical to sequential); `chunk_size_for`
        // maps `Static(0)` to "one chunk spanning the range".
        for chunk_size in 0..=26usize {
            let policy = par().with_static_chunk_size(chunk_size);
            let out = inclusive_scan(&policy, &input, concat).into_value().unwrap();
            assert_eq!(out.last().unwrap(), "abcdefghijklmnopqrstuvwxyz");
        }
    }

    #[test]
    fn exclusive_scan_boundary_matches_spec() {
        let input = alphabet();
        for chunk_size in 0..=26usize {
            let policy = par().with_static_chunk_size(chunk_size);
            let out = exclusive_scan(&policy, &input, "0".to_string(), concat).into_value().unwrap();
            assert_eq!(out[0], "0");
            assert_eq!(out.last().unwrap(), "0abcdefghijklmnopqrstuvwxy");
        }
    }

    #[test]
    fn inclusive_scan_matches_sequential_for_all_chunk_sizes() {
        let input: Vec<i64> = (0..2000).collect();
        let seq_out = {
            let mut acc = 0i64;
            input
                .iter()
                .map(|&x| {
                    acc += x;
                    acc
                })
                .collect::<Vec<_>>()
        };
        for chunk_size in [0, 1, 7, 64, 500, 2000] {
            let policy = par().with_static_chunk_size(chunk_size);
            let out = inclusive_scan(&policy, &input, |a, b| a + b).into_value().unwrap();
            assert_eq!(out, seq_out);
        }
    }

    #[test]
    fn empty_range_scan_writes_nothing() {
        let input: Vec<i64> = Vec::new();
        let out = inclusive_scan(&par(), &input, |a, b| a + b).into_value().unwrap();
        assert!(out.is_empty());
        let out = exclusive_scan(&par(), &input, 0i64, |a, b| a + b).into_value().unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn transform_reduce_matches_inner_product() {
        let a: Vec<f64> = (0..1007).map(|i| i as f64).collect();
        let b: Vec<f64> = (0..1007).map(|i| (i * 2) as f64).collect();
        let expected: f64 = a.iter().zip(b.iter()).map(|(&x, &y)| x * y).sum();
        let got = transform_reduce(&par(), &a, &b, 0.0, |x, y| x + y, |x, y| x * y)
            .into_value()
            .unwrap();
        assert!((got - expected).abs() < 1e-6);
    }

    #[test]
    fn async_inclusive_scan_future_resolves_to_blocking_result() {
        let input = alphabet();
        let policy = par().with_future();
        let delivery = inclusive_scan(&policy, &input, concat);
        let out = delivery.into_future().block_on().unwrap();
        assert_eq!(out.last().unwrap(), "abcdefghijklmnopqrstuvwxyz");
    }
}
