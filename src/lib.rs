//! Parallex - parallel algorithms over iterator ranges with pluggable
//! execution policies.
//!
//! This crate provides a small execution-policy algebra (`seq`/`par`/
//! `unseq`/`par_unseq`, crossed with blocking/async invocation, chunking
//! strategy, and executor binding) plus a handful of chunk-partitioned
//! algorithms (`for_each`, `transform`, `reduce`, `transform_reduce`,
//! `inclusive_scan`/`exclusive_scan`, `merge`, `stable_partition`,
//! `rotate`, `fill_n`) built on top of it.

pub mod algorithms;
pub mod constants;
pub mod error;
pub mod executor;
pub mod future;
pub mod partitioner;
pub mod policy;
pub mod range;
pub mod reduction;
pub mod scan;
pub mod simd;
pub mod traversal;

// Re-export the error taxonomy.
pub use error::{ParallexError, Result};

// Re-export the policy algebra: the four policy constructors, the policy
// value type, and its building blocks.
pub use policy::{par, par_unseq, seq, unseq, Chunking, ExecutionPolicy, PolicyKind, TaskMode};

// Re-export the executor capability.
pub use executor::{Executor, RayonExecutor};

// Re-export the future carrier.
pub use future::{AlgoFuture, AlgoFutureSender};

// Re-export the traversal taxonomy and concrete cursors/ranges.
pub use range::{IterCursor, Range, RangeEnd, SizeHint, SliceCursor};
pub use traversal::{
    advance_to_sentinel, category, distance, distance_linear, BidirectionalCursor, ForwardCursor, InputCursor,
    RandomAccessCursor, TraversalCategory,
};

// Re-export the reduction & projection protocol.
pub use reduction::{bit_and, bit_or, bit_xor, identity_projection, max, min, multiplies, plus, Projection, Reduction};

// Re-export the scan kernel entry points.
pub use scan::{exclusive_scan, inclusive_scan};

// Re-export the algorithm façades and the policy-aware delivery wrapper.
pub use algorithms::{
    annotate, fill_n, for_each, for_each_annotated, merge, reduce, reduce_with, rotate, stable_partition, transform,
    transform2, transform_reduce, uninitialized_fill_n, Annotated,
};
pub use partitioner::Delivery;
