//! Algorithm façades (C8): thin dispatchers over the partitioner, the scan
//! kernel, and the sequential fallback.
//!
//! Each façade validates the traversal category supports the algorithm,
//! selects the sequential kernel when the policy is `seq`/`unseq` or the
//! range is not size-known, otherwise calls the partitioner; projections
//! and reductions are threaded through per §4.5. Individual bodies are
//! deliberately thin lifts of the sequential standard (§1 "deliberately out
//! of scope": the engineering lives in C1–C7, not here).

mod fill;
mod for_each;
mod merge;
mod reduce;
mod rotate;
mod stable_partition;
mod transform;

pub use fill::{fill_n, uninitialized_fill_n};
pub use for_each::{annotate, for_each, for_each_annotated, Annotated};
pub use merge::merge;
pub use reduce::{reduce, reduce_with, transform_reduce};
pub use rotate::rotate;
pub use stable_partition::stable_partition;
pub use transform::{transform, transform2};
