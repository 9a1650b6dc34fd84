//! AI 策略模块
//!
//! 提供两种 AI 策略：简单（随机）和困难（递归搜索评分）

mod heuristic;
mod opening;
mod random;

pub use heuristic::{
    HardAI, Outcome, OutcomeKind, SquareEvaluation, IMMINENT_WIN_POINTS, MAX_RECORDED_OUTCOMES, SEMI_WIN_WEIGHT,
};
pub use opening::opening_move;
pub use random::EasyAI;

use crate::board::Board;
use crate::error::EngineError;
use crate::notation::parse_board;
use crate::state::GameState;
use crate::types::Difficulty;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// 棋盘边长 -> 搜索深度
///
/// 棋盘越小搜得越深。缺少某个边长的条目属于配置错误，不会回退到默认值。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepthTable {
    depths: BTreeMap<usize, u32>,
}

impl DepthTable {
    pub fn new(entries: impl IntoIterator<Item = (usize, u32)>) -> Self {
        DepthTable {
            depths: entries.into_iter().collect(),
        }
    }

    /// 查询某边长的搜索深度
    pub fn depth_for(&self, grid_size: usize) -> Result<u32, EngineError> {
        self.depths
            .get(&grid_size)
            .copied()
            .ok_or(EngineError::MissingDepth { grid_size })
    }
}

impl Default for DepthTable {
    fn default() -> Self {
        DepthTable::new([(3, 6), (4, 4), (5, 3), (6, 3), (7, 3)])
    }
}

/// AI 配置
#[derive(Debug, Clone, Default)]
pub struct AIConfig {
    /// 各边长的搜索深度
    pub depth_table: DepthTable,
    /// 随机种子（简单难度）
    pub seed: Option<u64>,
}

/// 走法评分
#[derive(Debug, Clone, Serialize)]
pub struct ScoredMove {
    pub cell: usize,
    pub score: f64,
    /// 搜索统计（开局定式和随机策略没有）
    #[serde(skip_serializing_if = "Option::is_none")]
    pub evaluation: Option<SquareEvaluation>,
}

impl ScoredMove {
    pub fn new(cell: usize, score: f64) -> Self {
        ScoredMove {
            cell,
            score,
            evaluation: None,
        }
    }
}

/// AI 策略接口
pub trait AIStrategy {
    /// 选择走法（返回带评分的走法列表）
    fn select_moves(&self, state: &GameState, n: usize) -> Result<Vec<ScoredMove>, EngineError>;

    /// 选择最佳走法
    fn select_best_move(&self, state: &GameState) -> Result<Option<usize>, EngineError> {
        Ok(self.select_moves(state, 1)?.first().map(|sm| sm.cell))
    }
}

/// 排序：分数高者在前；分数完全相同时离中心近者在前，再相同保持原顺序
pub fn rank_moves(scored: &mut [ScoredMove], board: &Board) {
    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                board
                    .distance_to_center(a.cell)
                    .cmp(&board.distance_to_center(b.cell))
            })
    });
}

/// 排序辅助函数
pub(crate) fn sort_and_truncate(scored: &mut Vec<ScoredMove>, board: &Board, n: usize) {
    rank_moves(scored, board);
    scored.truncate(n);
}

/// AI 引擎 - 统一的 AI 接口
pub struct AIEngine {
    strategy: Box<dyn AIStrategy>,
}

impl AIEngine {
    /// 创建简单 AI
    pub fn easy(seed: Option<u64>) -> Self {
        AIEngine {
            strategy: Box::new(EasyAI::new(seed)),
        }
    }

    /// 创建困难 AI
    pub fn hard(config: &AIConfig) -> Self {
        AIEngine {
            strategy: Box::new(HardAI::new(config)),
        }
    }

    /// 按难度创建
    pub fn from_difficulty(difficulty: Difficulty, config: &AIConfig) -> Self {
        match difficulty {
            Difficulty::Easy => Self::easy(config.seed),
            Difficulty::Hard => Self::hard(config),
        }
    }

    /// 返回前 n 个候选走法及评分
    pub fn select_moves(&self, state: &GameState, n: usize) -> Result<Vec<ScoredMove>, EngineError> {
        check_playable(state)?;
        self.strategy.select_moves(state, n)
    }

    /// 为当前玩家选择走法并落在真实棋盘上，返回所选格子
    pub fn choose_move(&self, state: &mut GameState) -> Result<usize, EngineError> {
        check_playable(state)?;
        let cell = self
            .strategy
            .select_best_move(state)?
            .ok_or(EngineError::NoEmptyCells)?;
        state.place(cell)?;
        Ok(cell)
    }

    /// 从记谱选择走法（返回格子下标和评分）
    pub fn select_moves_notation(&self, notation: &str, n: usize) -> Result<Vec<(usize, f64)>, EngineError> {
        let state = parse_board(notation)?;
        Ok(self
            .select_moves(&state, n)?
            .into_iter()
            .map(|sm| (sm.cell, sm.score))
            .collect())
    }

    /// 从记谱选择最佳走法
    pub fn select_best_move_notation(&self, notation: &str) -> Result<Option<usize>, EngineError> {
        let state = parse_board(notation)?;
        check_playable(&state)?;
        self.strategy.select_best_move(&state)
    }
}

/// 终局或满盘时不允许再选走法
fn check_playable(state: &GameState) -> Result<(), EngineError> {
    if state.is_over() {
        return Err(EngineError::GameOver);
    }
    if state.board.is_full() {
        return Err(EngineError::NoEmptyCells);
    }
    Ok(())
}
