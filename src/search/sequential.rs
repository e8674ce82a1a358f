use log::info;

use super::binary_search::binary_search;
use super::common::{validate_inputs, SearchState};
use super::config::SearchConfig;
use super::error::SearchError;
use super::SearchAlgorithm;
use crate::geometry::Rectangle;
use crate::oracle::Oracle;
use crate::result_set::ResultSet;

/// Single-threaded search: one box refined per step.
#[derive(Debug, Clone, Default)]
pub struct SeqSearch {
    config: SearchConfig,
}

impl SeqSearch {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }
}

impl SearchAlgorithm for SeqSearch {
    fn search<O: Oracle>(&self, xspace: &Rectangle, oracle: &O) -> Result<ResultSet, SearchError> {
        validate_inputs(&self.config, xspace, oracle)?;
        info!(
            "sequential search over {} (opt_level={:?}, epsilon={}, delta={})",
            xspace, self.config.opt_level, self.config.epsilon, self.config.delta
        );

        let mut oracle = oracle.clone();
        let mut state = SearchState::new(xspace.clone(), &self.config);
        while !state.is_done(&self.config) {
            let Some(rect) = state.pop() else { break };
            let (y, _) = binary_search(rect.diag(), |p| oracle.member(p), state.error())?;
            state.apply_cut(&rect, &y);
            state.checkpoint(&self.config)?;
        }
        Ok(state.finish(&self.config))
    }
}
