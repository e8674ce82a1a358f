//! Batched search on a fixed-size worker pool.
//!
//! Each round pops up to one box per worker and runs the diagonal binary
//! searches concurrently. Workers only evaluate the oracle; the cuts are
//! applied afterwards on the calling thread, in pop order, so the region
//! lists are never shared between threads.

use std::num::NonZeroUsize;

use log::{debug, info};
use rayon::prelude::*;

use super::binary_search::binary_search;
use super::common::{validate_inputs, SearchState};
use super::config::SearchConfig;
use super::error::SearchError;
use super::SearchAlgorithm;
use crate::geometry::{Point, Rectangle, Segment};
use crate::oracle::{Oracle, OracleError};
use crate::result_set::ResultSet;

/// Fixed set of worker threads that evaluate oracles.
///
/// Dropping the pool (or calling [`shutdown`](WorkerPool::shutdown)) stops
/// the workers once their current jobs finish.
#[derive(Debug)]
pub struct WorkerPool {
    pool: rayon::ThreadPool,
}

impl WorkerPool {
    pub fn new(workers: usize) -> Result<Self, SearchError> {
        if workers == 0 {
            return Err(SearchError::InvalidConfig(
                "worker count must be at least 1".to_string(),
            ));
        }
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("paretobox-worker-{i}"))
            .build()?;
        debug!("worker pool started with {workers} threads");
        Ok(Self { pool })
    }

    /// One worker per available CPU.
    pub fn with_available_parallelism() -> Result<Self, SearchError> {
        let n = std::thread::available_parallelism()
            .map(NonZeroUsize::get)
            .unwrap_or(1);
        Self::new(n)
    }

    pub fn num_workers(&self) -> usize {
        self.pool.current_num_threads()
    }

    pub fn shutdown(self) {
        debug!("shutting down worker pool");
        drop(self.pool);
    }

    /// Binary-searches the diagonal of every box, one oracle clone per box.
    ///
    /// Results come back in the order of `rects`. The first oracle failure
    /// aborts the batch.
    pub(crate) fn search_diagonals<O: Oracle>(
        &self,
        rects: &[Rectangle],
        oracle: &O,
        error: &Point,
    ) -> Result<Vec<Segment>, OracleError> {
        let jobs: Vec<(Segment, O)> = rects
            .iter()
            .map(|rect| (rect.diag(), oracle.clone()))
            .collect();
        self.pool.install(|| {
            jobs.into_par_iter()
                .map(|(diag, mut own)| {
                    binary_search(diag, |p| own.member(p), error).map(|(y, _)| y)
                })
                .collect()
        })
    }
}

/// Search that refines several boxes per round on a [`WorkerPool`].
#[derive(Debug)]
pub struct ParSearch<'p> {
    config: SearchConfig,
    pool: &'p WorkerPool,
}

impl<'p> ParSearch<'p> {
    pub fn new(config: SearchConfig, pool: &'p WorkerPool) -> Self {
        Self { config, pool }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl SearchAlgorithm for ParSearch<'_> {
    fn search<O: Oracle>(&self, xspace: &Rectangle, oracle: &O) -> Result<ResultSet, SearchError> {
        validate_inputs(&self.config, xspace, oracle)?;
        let workers = self.pool.num_workers();
        info!(
            "parallel search over {} on {} workers (opt_level={:?}, epsilon={}, delta={})",
            xspace, workers, self.config.opt_level, self.config.epsilon, self.config.delta
        );

        let mut state = SearchState::new(xspace.clone(), &self.config);
        while !state.is_done(&self.config) {
            let remaining = self.config.max_step - state.step();
            let batch_size = (workers as u64).min(remaining) as usize;
            let batch: Vec<Rectangle> = std::iter::from_fn(|| state.pop())
                .take(batch_size)
                .collect();
            if batch.is_empty() {
                break;
            }

            let cuts = self.pool.search_diagonals(&batch, oracle, state.error())?;
            for (rect, y) in batch.iter().zip(&cuts) {
                state.apply_cut(rect, y);
                state.checkpoint(&self.config)?;
            }
        }
        Ok(state.finish(&self.config))
    }
}
