//! `reduce` / `transform_reduce` façades: thin lifts over the reduction
//! protocol (C5) and the partitioner's `reduce_chunks`, plus a re-export of
//! the scan kernel's pairwise `transform_reduce` (C6).

use crate::error::Result;
use crate::partitioner::{deliver, reduce_chunks, Delivery};
use crate::policy::ExecutionPolicy;
use crate::reduction::Reduction;

/// `reduce(policy, data, reduction)`: folds `reduction.combine` over `data`
/// in source order, seeded with `reduction.identity()`.
pub fn reduce<T>(policy: &ExecutionPolicy, data: &[T], reduction: &Reduction<T>) -> Delivery<T>
where
    T: Copy + Send + Sync + 'static,
{
    deliver(policy, move || reduce_chunks(policy, data, reduction, |&x| x))
}

/// `reduce(policy, data, reduction, projection)`: applies `projection`
/// before folding, per §4.5.
pub fn reduce_with<T, U, P>(policy: &ExecutionPolicy, data: &[T], reduction: &Reduction<U>, projection: P) -> Result<U>
where
    T: Sync,
    U: Copy + Send + 'static,
    P: Fn(&T) -> U + Sync,
{
    reduce_chunks(policy, data, reduction, projection)
}

/// Pairwise `transform_reduce(policy, a, b, init, reduce_op, transform_op)`,
/// lifted directly from the scan kernel (C6) — the two-input reduction
/// shares no machinery with the single-input scalar `reduce` above beyond
/// the chunk-size heuristic, so it lives in `scan.rs` and is re-exported
/// here under the façade layer's naming.
pub use crate::scan::transform_reduce;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{par, seq};
    use crate::reduction::{max, plus};

    #[test]
    fn reduce_sums_match_naive() {
        let data: Vec<i64> = (0..10_007).collect();
        let expected: i64 = data.iter().sum();
        let got = reduce(&par(), &data, &plus::<i64>()).into_value().unwrap();
        assert_eq!(got, expected);
    }

    #[test]
    fn reduce_is_policy_equivalent() {
        let data: Vec<i64> = (0..5000).collect();
        let via_seq = reduce(&seq(), &data, &plus::<i64>()).into_value().unwrap();
        let via_par = reduce(&par(), &data, &plus::<i64>()).into_value().unwrap();
        assert_eq!(via_seq, via_par);
    }

    #[test]
    fn reduce_with_projection_applies_before_combine() {
        let data: Vec<i32> = vec![5, 1, 9, -3, 7];
        let got = reduce_with(&par(), &data, &max::<i32>(i32::MIN), |&x| x * x).unwrap();
        assert_eq!(got, 81);
    }

    #[test]
    fn transform_reduce_reexport_matches_inner_product() {
        let a: Vec<f64> = (0..503).map(|i| i as f64).collect();
        let b: Vec<f64> = (0..503).map(|i| (i + 1) as f64).collect();
        let expected: f64 = a.iter().zip(b.iter()).map(|(&x, &y)| x * y).sum();
        let got = transform_reduce(&par(), &a, &b, 0.0, |x, y| x + y, |x, y| x * y)
            .into_value()
            .unwrap();
        assert!((got - expected).abs() < 1e-6);
    }
}
