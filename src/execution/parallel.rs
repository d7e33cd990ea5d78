//! Parallel execution for compression planning
//!
//! Column scoring is embarrassingly parallel: every column is an independent
//! unit of work that only reads the shared table. Units run on a bounded
//! Rayon pool of `k` workers (or inline when `k <= 1`), and the caller blocks
//! until all of them are done. Any failed unit fails the whole batch.

use crate::common::constants::MAX_THREADS;
use crate::common::error::{CompressionError, CompressionResult};
use crate::config_err;
use rayon::prelude::*;

/// Parallel execution context
#[derive(Debug, Clone)]
pub struct ParallelContext {
    /// Number of worker threads
    pub num_threads: usize,
    /// Enable parallel execution
    pub parallel_enabled: bool,
}

impl ParallelContext {
    /// Creates a context with `num_threads` workers; zero workers is a configuration error
    pub fn new(num_threads: usize) -> CompressionResult<Self> {
        if num_threads < 1 {
            return Err(config_err!("thread count must be at least 1"));
        }
        let num_threads = num_threads.min(MAX_THREADS);
        Ok(Self {
            num_threads,
            parallel_enabled: num_threads > 1,
        })
    }

    pub fn single_threaded() -> Self {
        Self {
            num_threads: 1,
            parallel_enabled: false,
        }
    }

    pub fn from_system() -> Self {
        let num_threads = num_cpus::get().clamp(1, MAX_THREADS);
        Self {
            num_threads,
            parallel_enabled: num_threads > 1,
        }
    }
}

impl Default for ParallelContext {
    fn default() -> Self {
        Self::from_system()
    }
}

/// Runs `task` for every index in `0..count` and returns the results in index order
pub fn parallel_map<T, F>(
    count: usize,
    parallel_ctx: &ParallelContext,
    task: F,
) -> CompressionResult<Vec<T>>
where
    T: Send,
    F: Fn(usize) -> CompressionResult<T> + Send + Sync,
{
    if !parallel_ctx.parallel_enabled || count <= 1 {
        // Single-threaded fallback
        return (0..count).map(task).collect();
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(parallel_ctx.num_threads)
        .build()
        .map_err(|e| CompressionError::Worker(e.to_string()))?;

    pool.install(|| (0..count).into_par_iter().map(&task).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parallel_context() {
        let ctx = ParallelContext::from_system();
        assert!(ctx.num_threads > 0);
        assert!(ctx.parallel_enabled || ctx.num_threads == 1);

        let ctx = ParallelContext::new(1).unwrap();
        assert!(!ctx.parallel_enabled);

        assert!(ParallelContext::new(0).is_err());
        assert_eq!(ParallelContext::new(1000).unwrap().num_threads, MAX_THREADS);
    }

    #[test]
    fn test_parallel_map_preserves_order() {
        let ctx = ParallelContext::new(4).unwrap();
        let result = parallel_map(100, &ctx, |i| Ok(i * i)).unwrap();
        assert_eq!(result.len(), 100);
        assert!(result.iter().enumerate().all(|(i, v)| *v == i * i));
    }

    #[test]
    fn test_parallel_and_serial_agree() {
        let serial = parallel_map(50, &ParallelContext::single_threaded(), |i| Ok(i + 1)).unwrap();
        let parallel = parallel_map(50, &ParallelContext::new(8).unwrap(), |i| Ok(i + 1)).unwrap();
        assert_eq!(serial, parallel);
    }

    #[test]
    fn test_failure_fails_whole_batch() {
        let ctx = ParallelContext::new(4).unwrap();
        let result: CompressionResult<Vec<usize>> = parallel_map(20, &ctx, |i| {
            if i == 13 {
                Err(CompressionError::Bitmap("column 13".to_string()))
            } else {
                Ok(i)
            }
        });
        assert!(matches!(result, Err(CompressionError::Bitmap(_))));
    }

    #[test]
    fn test_empty_batch() {
        let result: Vec<usize> = parallel_map(0, &ParallelContext::new(4).unwrap(), Ok).unwrap();
        assert!(result.is_empty());
    }
}
