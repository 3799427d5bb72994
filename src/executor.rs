//! Executor capability (C2).
//!
//! The core only requires this trait; any conforming implementation is
//! acceptable (§6). [`RayonExecutor`] is the default binding, grounded in
//! the teacher's `ParallelStrategy::process_with_pool_control`, which builds
//! a scoped `rayon::ThreadPool` and installs work onto it.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

use crate::error::{ParallexError, Result};

/// External collaborator every policy may bind to via `.on(executor)`.
///
/// Kept non-generic (`Box<dyn FnOnce() + Send>`/`&dyn Fn(usize)`, not
/// generic-over-`R` methods) so `dyn Executor` itself stays object-safe —
/// the typed, result-returning convenience wrappers ([`spawn`],
/// [`bulk_spawn`]) live as free functions layered on top instead of trait
/// methods.
///
/// Failure semantics (§4.2): if a task panics, other tasks still run to
/// completion; the panic is captured and surfaced as a
/// [`ParallexError::UserCallable`] when the corresponding result is
/// collected, never propagated across the spawn boundary itself.
pub trait Executor: Send + Sync {
    /// Runs `task` to completion, respecting this executor's pool binding.
    /// May run inline on the calling thread.
    fn install<'a>(&self, task: Box<dyn FnOnce() + Send + 'a>);

    /// Runs `task(i)` for every `i` in `0..n` on this executor; ordering
    /// between tasks is not guaranteed, only that all `n` complete before
    /// returning.
    fn bulk_install<'a>(&self, n: usize, task: &(dyn Fn(usize) + Sync + 'a));
}

/// Runs a closure and converts a panic into an `Err`, matching the
/// "exception captured and re-raised" contract of §4.2/§7 without requiring
/// user callables to return `Result` themselves.
pub(crate) fn catch<R>(chunk_index: usize, f: impl FnOnce() -> R) -> Result<R> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(|payload| {
        let message = payload
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| payload.downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "user callable panicked".to_string());
        ParallexError::user_callable(chunk_index, message)
    })
}

/// Generic, typed single-task spawn over any [`Executor`]: runs `task` to
/// completion on `executor` and returns its result. Lives outside the trait
/// (rather than as a generic `spawn<R>` method) so `Executor` stays
/// object-safe; the result is threaded back out through a scratch slot the
/// boxed closure writes into before `install` returns.
pub fn spawn<R: Send>(executor: &dyn Executor, task: impl FnOnce() -> R + Send) -> R {
    let slot: Mutex<Option<R>> = Mutex::new(None);
    executor.install(Box::new(|| {
        *slot.lock().unwrap() = Some(task());
    }));
    slot.into_inner()
        .unwrap()
        .expect("Executor::install must run its task exactly once before returning")
}

/// Generic, typed bulk spawn over any [`Executor`]: runs `task(i)` for
/// every `i` in `0..n`, isolating panics per-index the same way
/// [`catch`] does for chunked work, and collects the typed results (`None`
/// where the task panicked).
pub fn bulk_spawn<R: Send>(executor: &dyn Executor, n: usize, task: impl Fn(usize) -> R + Sync) -> Vec<Option<R>> {
    let slots: Vec<Mutex<Option<R>>> = (0..n).map(|_| Mutex::new(None)).collect();
    executor.bulk_install(n, &|i| {
        if let Ok(value) = catch(i, || task(i)) {
            *slots[i].lock().unwrap() = Some(value);
        }
    });
    slots.into_iter().map(|m| m.into_inner().unwrap()).collect()
}

/// Default executor: a dedicated rayon thread pool (or the global pool, if
/// none is configured), matching the teacher's
/// `ParallelStrategy::process_with_pool_control`.
pub struct RayonExecutor {
    pool: Option<Arc<rayon::ThreadPool>>,
}

impl RayonExecutor {
    /// Use rayon's global pool.
    pub fn global() -> Self {
        RayonExecutor { pool: None }
    }

    /// Build a dedicated pool pinned to `num_threads` workers.
    pub fn with_threads(num_threads: usize) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build()
            .map_err(|e| ParallexError::executor(e.to_string()))?;
        Ok(RayonExecutor {
            pool: Some(Arc::new(pool)),
        })
    }
}

impl Default for RayonExecutor {
    fn default() -> Self {
        Self::global()
    }
}

impl Executor for RayonExecutor {
    fn install<'a>(&self, task: Box<dyn FnOnce() + Send + 'a>) {
        match &self.pool {
            Some(pool) => pool.install(move || task()),
            None => task(),
        }
    }

    fn bulk_install<'a>(&self, n: usize, task: &(dyn Fn(usize) + Sync + 'a)) {
        use rayon::prelude::*;
        let run = || (0..n).into_par_iter().for_each(|i| task(i));
        match &self.pool {
            Some(pool) => pool.install(run),
            None => run(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bulk_spawn_runs_all_tasks() {
        let exec = RayonExecutor::global();
        let results = bulk_spawn(&exec, 8, |i| i * 2);
        assert_eq!(results.len(), 8);
        for (i, r) in results.into_iter().enumerate() {
            assert_eq!(r, Some(i * 2));
        }
    }

    #[test]
    fn bulk_spawn_isolates_panicking_task() {
        let exec = RayonExecutor::global();
        let results = bulk_spawn(&exec, 4, |i| {
            if i == 2 {
                panic!("boom");
            }
            i
        });
        assert_eq!(results[0], Some(0));
        assert_eq!(results[1], Some(1));
        assert_eq!(results[2], None);
        assert_eq!(results[3], Some(3));
    }

    #[test]
    fn spawn_runs_on_a_dedicated_pool() {
        let exec = RayonExecutor::with_threads(2).unwrap();
        let got = spawn(&exec, || 6 * 7);
        assert_eq!(got, 42);
    }
}
