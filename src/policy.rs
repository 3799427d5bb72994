//! Execution-policy algebra (C3).
//!
//! Represented as a tagged record rather than a trait hierarchy, the way
//! the teacher represents `ProcessingMode`/chunk-size as plain data picked
//! once by `ParallelStrategy::select` and then threaded through — dispatch
//! here is by tag, not by late binding (§9).

use std::sync::Arc;

use crate::error::Result;
use crate::executor::{Executor, RayonExecutor};

/// The four execution-policy kinds from §3.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolicyKind {
    Seq,
    Par,
    Unseq,
    ParUnseq,
}

impl PolicyKind {
    /// Combining `unseq` with `par` promotes to `par_unseq` (§4.3).
    pub fn promote_with(self, other: PolicyKind) -> PolicyKind {
        use PolicyKind::*;
        match (self, other) {
            (Seq, Seq) => Seq,
            (a, b) if a == b => a,
            (Unseq, Par) | (Par, Unseq) => ParUnseq,
            (ParUnseq, _) | (_, ParUnseq) => ParUnseq,
            (a, Seq) | (Seq, a) => a,
            (a, _) => a,
        }
    }

    pub fn is_unsequenced(self) -> bool {
        matches!(self, PolicyKind::Unseq | PolicyKind::ParUnseq)
    }

    pub fn is_parallel(self) -> bool {
        matches!(self, PolicyKind::Par | PolicyKind::ParUnseq)
    }
}

/// Blocking vs. future-returning invocation (§3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskMode {
    Blocking,
    Async,
}

/// How the partitioner should size chunks (§4.4).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chunking {
    Auto,
    Static(usize),
    Dynamic,
}

/// An immutable execution policy value. Combinators return new values;
/// policies are never mutated in place (§3 invariant).
#[derive(Clone)]
pub struct ExecutionPolicy {
    kind: PolicyKind,
    task_mode: TaskMode,
    chunking: Chunking,
    executor: Option<Arc<dyn Executor>>,
}

impl ExecutionPolicy {
    fn new(kind: PolicyKind) -> Self {
        ExecutionPolicy {
            kind,
            task_mode: TaskMode::Blocking,
            chunking: Chunking::Auto,
            executor: None,
        }
    }

    pub fn kind(&self) -> PolicyKind {
        self.kind
    }

    pub fn task_mode(&self) -> TaskMode {
        self.task_mode
    }

    pub fn chunking(&self) -> Chunking {
        self.chunking
    }

    pub fn executor(&self) -> Arc<dyn Executor> {
        self.executor
            .clone()
            .unwrap_or_else(|| Arc::new(RayonExecutor::global()))
    }

    /// `P(task)`: the async variant of `P`.
    pub fn with_future(&self) -> Self {
        ExecutionPolicy {
            task_mode: TaskMode::Async,
            ..self.clone()
        }
    }

    /// `P.with(static_chunk_size(n))`.
    pub fn with_static_chunk_size(&self, n: usize) -> Self {
        ExecutionPolicy {
            chunking: Chunking::Static(n),
            ..self.clone()
        }
    }

    /// `P.with(dynamic_chunk_size())`.
    pub fn with_dynamic_chunk_size(&self) -> Self {
        ExecutionPolicy {
            chunking: Chunking::Dynamic,
            ..self.clone()
        }
    }

    /// `P.on(exec)`: binds a specific executor.
    pub fn on(&self, executor: Arc<dyn Executor>) -> Self {
        ExecutionPolicy {
            executor: Some(executor),
            ..self.clone()
        }
    }

    /// Combine this policy's kind with `other`, applying the promotion
    /// rule in §4.3. Task-mode, chunking, and executor binding are
    /// preserved from `self`.
    pub fn combine_kind(&self, other: PolicyKind) -> Self {
        ExecutionPolicy {
            kind: self.kind.promote_with(other),
            ..self.clone()
        }
    }

    /// Validates a combinator isn't being misused, per §7 `PolicyError`.
    /// `static_chunk_size(0)` is deliberately *not* rejected here: §8
    /// requires `static_chunk_size(i)` to be bit-identical to sequential
    /// for every `i` in `[0, N]`, and `chunk_size_for` already maps
    /// `Static(0)` to "one chunk spanning the whole range" to satisfy that.
    /// No other combinator misuse currently exists in this algebra, so this
    /// is a hook for future `PolicyError` checks rather than a live check.
    pub fn validate(&self) -> Result<()> {
        Ok(())
    }
}

/// `seq`: single-threaded cooperative execution.
pub fn seq() -> ExecutionPolicy {
    ExecutionPolicy::new(PolicyKind::Seq)
}

/// `par`: parallel-threaded execution via the bound (or default) executor.
pub fn par() -> ExecutionPolicy {
    ExecutionPolicy::new(PolicyKind::Par)
}

/// `unseq`: single-thread, in-lane SIMD execution.
pub fn unseq() -> ExecutionPolicy {
    ExecutionPolicy::new(PolicyKind::Unseq)
}

/// `par_unseq`: both parallel threads and in-lane SIMD.
pub fn par_unseq() -> ExecutionPolicy {
    ExecutionPolicy::new(PolicyKind::ParUnseq)
}
