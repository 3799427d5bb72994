//! `transform`: order-preserving element-wise map from `input` into
//! `output`, optionally over two inputs (§4.4, the in-place specialisation
//! of `map_chunks_into`).

use crate::error::Result;
use crate::executor::catch;
use crate::partitioner::{deliver, map_chunks_into, run_on_executor, should_run_sequentially, Delivery};
use crate::policy::ExecutionPolicy;
use crate::simd::vectorized_transform;

/// Unary `transform(policy, input, output, f)`: `output[i] = f(input[i])`.
/// Under an unsequenced policy, each chunk's inner loop runs through the
/// vector-pack kernel (C7) in place of a scalar `for` (§4.4 step 4, §1 core
/// item 5); `T` must therefore be `Copy + Default` the way every vectorised
/// element type in this crate is.
pub fn transform<T, F>(policy: &ExecutionPolicy, input: &[T], output: &mut [T], f: F) -> Delivery<()>
where
    T: Copy + Default + Send + Sync + 'static,
    F: Fn(T) -> T + Sync,
{
    assert_eq!(input.len(), output.len(), "transform requires equal-length input/output");
    deliver(policy, move || transform_blocking(policy, input, output, f))
}

fn transform_blocking<T, F>(policy: &ExecutionPolicy, input: &[T], output: &mut [T], f: F) -> Result<()>
where
    T: Copy + Default + Send + Sync,
    F: Fn(T) -> T + Sync,
{
    if should_run_sequentially(policy, input.len(), true) {
        apply_chunk(policy, input, output, &f);
        return Ok(());
    }
    map_chunks_into(policy, input, output, |_idx, in_chunk, out_chunk| {
        apply_chunk(policy, in_chunk, out_chunk, &f);
    })
}

/// The per-chunk inner loop: scalar under `seq`/`par`, vectorised via
/// [`vectorized_transform`] under `unseq`/`par_unseq` (§4.4 step 4).
fn apply_chunk<T, F>(policy: &ExecutionPolicy, input: &[T], output: &mut [T], f: &F)
where
    T: Copy + Default,
    F: Fn(T) -> T,
{
    if policy.kind().is_unsequenced() {
        vectorized_transform(input, output, f);
    } else {
        for (o, &i) in output.iter_mut().zip(input.iter()) {
            *o = f(i);
        }
    }
}

/// Binary `transform(policy, a, b, output, f)`: `output[i] = f(a[i], b[i])`.
/// Honors `policy.task_mode()` and is routed through the bound executor like
/// every other chunked façade (§6).
pub fn transform2<T, U, V, F>(policy: &ExecutionPolicy, a: &[T], b: &[U], output: &mut [V], f: F) -> Delivery<()>
where
    T: Sync,
    U: Sync,
    V: Send,
    F: Fn(&T, &U) -> V + Sync,
{
    assert_eq!(a.len(), b.len(), "transform requires equal-length inputs");
    assert_eq!(a.len(), output.len(), "transform requires equal-length input/output");
    deliver(policy, move || transform2_blocking(policy, a, b, output, f))
}

fn transform2_blocking<T, U, V, F>(policy: &ExecutionPolicy, a: &[T], b: &[U], output: &mut [V], f: F) -> Result<()>
where
    T: Sync,
    U: Sync,
    V: Send,
    F: Fn(&T, &U) -> V + Sync,
{
    if should_run_sequentially(policy, a.len(), true) {
        for ((o, x), y) in output.iter_mut().zip(a.iter()).zip(b.iter()) {
            *o = f(x, y);
        }
        return Ok(());
    }
    let chunk_size = crate::partitioner::chunk_size_for(a.len(), policy);
    use rayon::prelude::*;
    // Collected eagerly into a `Vec`, then scanned linearly for the first
    // error in source order (§7) — not relying on the unspecified order in
    // which a parallel `Result<Vec<_>, _>::collect()` would short-circuit.
    let raw: Vec<Result<()>> = run_on_executor(policy, || {
        a.par_chunks(chunk_size)
            .zip(b.par_chunks(chunk_size))
            .zip(output.par_chunks_mut(chunk_size))
            .enumerate()
            .map(|(idx, ((ca, cb), co))| {
                catch(idx, || {
                    for ((o, x), y) in co.iter_mut().zip(ca.iter()).zip(cb.iter()) {
                        *o = f(x, y);
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{par, seq, unseq};

    #[test]
    fn transform_doubles_every_element() {
        let input: Vec<i32> = (0..6007).collect();
        let mut output = vec![0i32; input.len()];
        transform(&par(), &input, &mut output, |x| x * 2)
            .into_value()
            .unwrap();
        for (i, &v) in output.iter().enumerate() {
            assert_eq!(v, i as i32 * 2);
        }
    }

    #[test]
    fn transform_is_policy_equivalent() {
        let input: Vec<i32> = (0..3000).collect();
        let mut via_seq = vec![0i32; input.len()];
        let mut via_par = vec![0i32; input.len()];
        transform(&seq(), &input, &mut via_seq, |x| x * 3 + 1)
            .into_value()
            .unwrap();
        transform(&par(), &input, &mut via_par, |x| x * 3 + 1)
            .into_value()
            .unwrap();
        assert_eq!(via_seq, via_par);
    }

    #[test]
    fn transform_unseq_matches_scalar_map() {
        let input: Vec<i32> = (0..53).collect();
        let mut via_unseq = vec![0i32; input.len()];
        let mut via_seq = vec![0i32; input.len()];
        transform(&unseq(), &input, &mut via_unseq, |x| x * 5 - 2)
            .into_value()
            .unwrap();
        transform(&seq(), &input, &mut via_seq, |x| x * 5 - 2)
            .into_value()
            .unwrap();
        assert_eq!(via_unseq, via_seq);
    }

    #[test]
    fn transform2_combines_pairwise() {
        let a: Vec<i32> = (0..4001).collect();
        let b: Vec<i32> = (0..4001).rev().collect();
        let mut output = vec![0i32; a.len()];
        transform2(&par(), &a, &b, &mut output, |&x, &y| x + y)
            .into_value()
            .unwrap();
        for (i, &v) in output.iter().enumerate() {
            assert_eq!(v, a[i] + b[i]);
        }
    }
}
