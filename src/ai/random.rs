//! 简单 AI：随机策略

use super::{sort_and_truncate, AIStrategy, ScoredMove};
use crate::error::EngineError;
use crate::state::GameState;
use rand::prelude::*;
use std::cell::RefCell;

/// 简单 AI - 在所有空格中均匀随机选择，不做搜索
pub struct EasyAI {
    rng: RefCell<StdRng>,
}

impl EasyAI {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        EasyAI {
            rng: RefCell::new(rng),
        }
    }
}

impl AIStrategy for EasyAI {
    fn select_moves(&self, state: &GameState, n: usize) -> Result<Vec<ScoredMove>, EngineError> {
        let cells = state.board.empty_cells();
        if cells.is_empty() {
            return Err(EngineError::NoEmptyCells);
        }
        let mut rng = self.rng.borrow_mut();

        let mut scored: Vec<ScoredMove> = cells
            .into_iter()
            .map(|cell| ScoredMove::new(cell, rng.gen::<f64>()))
            .collect();

        sort_and_truncate(&mut scored, &state.board, n);
        Ok(scored)
    }

    fn select_best_move(&self, state: &GameState) -> Result<Option<usize>, EngineError> {
        let cells = state.board.empty_cells();
        if cells.is_empty() {
            return Err(EngineError::NoEmptyCells);
        }
        Ok(cells.choose(&mut *self.rng.borrow_mut()).copied())
    }
}
