//! Cross-cutting end-to-end scenarios, one per testable property in
//! SPEC_FULL §8 that isn't already covered by an inline `#[cfg(test)]`
//! module next to the code it exercises.

use std::mem::MaybeUninit;
use std::sync::atomic::{AtomicI64, Ordering};

use parallex::{
    annotate, exclusive_scan, fill_n, for_each, for_each_annotated, inclusive_scan, merge, par, reduce, rotate, seq,
    stable_partition, transform, uninitialized_fill_n, plus,
};

#[test]
fn scenario_annotated_for_each_surfaces_its_name() {
    let data: Vec<i64> = (0..10_000).collect();
    let sum = AtomicI64::new(0);
    let (name, delivery) = for_each_annotated(
        &par(),
        &data,
        annotate("f", |&x| {
            sum.fetch_add(x, Ordering::Relaxed);
        }),
    );
    delivery.into_value().unwrap();
    assert_eq!(name, "f");
    assert_eq!(sum.load(Ordering::Relaxed), data.iter().sum::<i64>());
}

#[test]
fn scenario_uninitialized_fill_n_writes_exactly_k_cells() {
    for k in [1usize, 7, 500, 10_007] {
        let mut storage: Vec<MaybeUninit<i32>> = (0..10_007).map(|_| MaybeUninit::uninit()).collect();
        uninitialized_fill_n(&par(), &mut storage, k, 10).into_value().unwrap();
        for slot in &storage[..k] {
            assert_eq!(unsafe { slot.assume_init() }, 10);
        }
    }
}

#[test]
fn scenario_stable_partition_preserves_order_and_reports_split() {
    let mut data: Vec<i32> = (0..5_007).collect();
    let point = stable_partition(&par(), &mut data, |&x| x % 3 == 0).into_value().unwrap();
    let expected_true: Vec<i32> = (0..5_007).filter(|x| x % 3 == 0).collect();
    let expected_false: Vec<i32> = (0..5_007).filter(|x| x % 3 != 0).collect();
    assert_eq!(&data[..point], expected_true.as_slice());
    assert_eq!(&data[point..], expected_false.as_slice());
}

#[test]
fn scenario_stable_partition_single_exception_surfaces() {
    let mut data: Vec<i32> = (0..80).collect();
    let policy = par().with_static_chunk_size(8);
    let result = stable_partition(&policy, &mut data, |&x| {
        if x == 37 {
            panic!("boom");
        }
        x % 2 == 0
    })
    .into_value();
    assert!(result.is_err());
}

#[test]
fn scenario_inclusive_and_exclusive_scan_agree_at_the_boundary() {
    let input: Vec<i64> = (1..=2_000).collect();
    let inclusive = inclusive_scan(&par(), &input, |a, b| a + b).into_value().unwrap();
    let exclusive = exclusive_scan(&par(), &input, 0i64, |a, b| a + b).into_value().unwrap();
    assert_eq!(exclusive[0], 0);
    for i in 1..input.len() {
        assert_eq!(exclusive[i], inclusive[i - 1]);
    }
}

#[test]
fn scenario_fill_n_and_transform_compose() {
    let mut data = vec![0i32; 4_000];
    fill_n(&par(), &mut data, 4_000, 3).into_value().unwrap();
    let mut doubled = vec![0i32; data.len()];
    transform(&par(), &data, &mut doubled, |x| x * 2)
        .into_value()
        .unwrap();
    assert!(doubled.iter().all(|&x| x == 6));
}

#[test]
fn scenario_merge_then_reduce_matches_naive_sum_of_both_inputs() {
    let a: Vec<i64> = (0..3_000).step_by(2).collect();
    let b: Vec<i64> = (1..3_000).step_by(2).collect();
    let mut merged = vec![0i64; a.len() + b.len()];
    merge(&par(), &a, &b, &mut merged, |x, y| x.cmp(y)).into_value().unwrap();
    let expected: i64 = a.iter().chain(b.iter()).sum();
    let got = reduce(&par(), &merged, &plus::<i64>()).into_value().unwrap();
    assert_eq!(got, expected);
}

#[test]
fn scenario_rotate_is_its_own_inverse_composed_twice() {
    let original: Vec<i32> = (0..2_003).collect();
    let mut data = original.clone();
    rotate(&par(), &mut data, 777).into_value().unwrap();
    rotate(&par(), &mut data, data.len() - 777).into_value().unwrap();
    assert_eq!(data, original);
}

#[test]
fn scenario_seq_and_par_for_each_produce_identical_sums() {
    let data: Vec<i64> = (0..12_345).collect();
    let seq_sum = AtomicI64::new(0);
    for_each(&seq(), &data, |&x| {
        seq_sum.fetch_add(x, Ordering::Relaxed);
    })
    .into_value()
    .unwrap();
    let par_sum = AtomicI64::new(0);
    for_each(&par(), &data, |&x| {
        par_sum.fetch_add(x, Ordering::Relaxed);
    })
    .into_value()
    .unwrap();
    assert_eq!(seq_sum.load(Ordering::Relaxed), par_sum.load(Ordering::Relaxed));
}
