//! Tunable thresholds consulted by `auto` chunking (§4.4).
//!
//! These are starting points, not contracts: any algorithm may be driven
//! through an explicit `static_chunk_size`/`dynamic_chunk_size` combinator
//! to bypass them entirely.

/// Below this element count, `seq` is used even under a `par*` policy.
pub const PARALLEL_THRESHOLD_SMALL: usize = 1_000;

/// Below this, cache-sized chunking (`CHUNK_SIZE_L1`) is preferred over a
/// full worker-count split.
pub const PARALLEL_THRESHOLD_MEDIUM: usize = 10_000;

/// Below this, `CHUNK_SIZE_L2` is preferred; above it, full parallelism
/// (`CHUNK_SIZE_L3`) kicks in.
pub const PARALLEL_THRESHOLD_LARGE: usize = 100_000;

/// Chunk size sized to fit comfortably in L1 cache for 8-byte elements.
pub const CHUNK_SIZE_L1: usize = 4_096;

/// Chunk size sized to fit comfortably in L2 cache for 8-byte elements.
pub const CHUNK_SIZE_L2: usize = 32_768;

/// Chunk size used once a range is large enough that cache residency no
/// longer dominates; bounded by worker count instead.
pub const CHUNK_SIZE_L3: usize = 131_072;

/// Floor on a chunk's element count: below this, splitting further costs
/// more in task overhead than it saves in parallelism.
pub const MIN_WORK_PER_THREAD: usize = 256;

/// Ceiling on the number of chunks `auto` chunking will ever create per
/// worker thread ("oversubscription" in §4.4 step 2).
pub const MAX_OVERSUBSCRIPTION: usize = 4;
