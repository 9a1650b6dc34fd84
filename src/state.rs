//! 对局状态
//!
//! `GameState` 是对局的唯一权威状态，由回合控制器和落子写入；
//! 搜索只在它的克隆上模拟。

use crate::board::Board;
use crate::error::EngineError;
use crate::lines::Line;
use crate::types::{AiSeat, Difficulty, Player, Verdict, ALLOWED_GRID_SIZES, ALLOWED_RUN_LENGTHS};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 棋盘配置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub grid_size: usize,
    pub run_length: usize,
}

impl GameConfig {
    /// 校验边长和连子长度
    pub fn new(grid_size: usize, run_length: usize) -> Result<GameConfig, EngineError> {
        if !ALLOWED_GRID_SIZES.contains(&grid_size) {
            return Err(EngineError::UnsupportedGridSize { size: grid_size });
        }
        if !ALLOWED_RUN_LENGTHS.contains(&run_length) {
            return Err(EngineError::UnsupportedRunLength { length: run_length });
        }
        Ok(GameConfig {
            grid_size,
            run_length,
        })
    }

    /// 实际生效的连子长度（不超过边长）
    #[inline]
    pub fn effective_run_length(&self) -> usize {
        self.run_length.min(self.grid_size)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            grid_size: ALLOWED_GRID_SIZES[2],
            run_length: ALLOWED_RUN_LENGTHS[1],
        }
    }
}

/// 对局状态
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub current: Player,
    pub config: GameConfig,
    pub winner: Option<Player>,
    pub draw: bool,
    /// 最近一次威胁检测中形成活棋的一方
    pub semi_winner: Option<Player>,
    pub winning_line: Option<Line>,
    /// 每方的威胁线记录（下标见 `Player::slot`）
    pub threats: [BTreeSet<Line>; 2],
    pub ai: AiSeat,
    pub difficulty: Difficulty,
}

impl GameState {
    /// 新开一局（X 先手）
    pub fn new(config: GameConfig, ai: AiSeat, difficulty: Difficulty) -> Result<GameState, EngineError> {
        let config = GameConfig::new(config.grid_size, config.run_length)?;
        Ok(GameState {
            board: Board::new(config.grid_size)?,
            current: Player::X,
            config,
            winner: None,
            draw: false,
            semi_winner: None,
            winning_line: None,
            threats: [BTreeSet::new(), BTreeSet::new()],
            ai,
            difficulty,
        })
    }

    /// 由已有棋盘构造（用于记谱解析和测试）
    pub fn from_board(board: Board, current: Player, run_length: usize) -> Result<GameState, EngineError> {
        let config = GameConfig::new(board.size(), run_length)?;
        let mut state = GameState::new(config, AiSeat::None, Difficulty::Hard)?;
        state.board = board;
        state.current = current;
        Ok(state)
    }

    /// 重新开局，保留配置、AI 方和难度
    pub fn restart(&self) -> Result<GameState, EngineError> {
        GameState::new(self.config, self.ai, self.difficulty)
    }

    #[inline]
    pub fn grid_size(&self) -> usize {
        self.config.grid_size
    }

    /// 实际生效的连子长度
    #[inline]
    pub fn run_length(&self) -> usize {
        self.config.effective_run_length()
    }

    /// 是否已终局
    #[inline]
    pub fn is_over(&self) -> bool {
        self.winner.is_some() || self.draw
    }

    /// 当前记录的终局结果
    pub fn verdict(&self) -> Verdict {
        match (self.winner, self.draw) {
            (Some(p), _) => Verdict::Win(p),
            (None, true) => Verdict::Draw,
            (None, false) => Verdict::Ongoing,
        }
    }

    /// 当前玩家在指定格落子（不切换回合）
    pub fn place(&mut self, index: usize) -> Result<(), EngineError> {
        if self.is_over() {
            return Err(EngineError::GameOver);
        }
        self.board.place(index, self.current)
    }

    /// 某方的威胁线记录
    pub fn threats_of(&self, player: Player) -> &BTreeSet<Line> {
        &self.threats[player.slot()]
    }

    /// 当前回合是否由 AI 行棋
    #[inline]
    pub fn ai_to_move(&self) -> bool {
        self.ai.controls(self.current)
    }
}
