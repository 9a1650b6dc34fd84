//! N 连棋 AI 引擎
//!
//! 支持 3x3 到 7x7 棋盘、连三或连四的井字棋变体，
//! 提供随机（简单）和递归模拟评分（困难）两种 AI，以及记谱输入输出。

pub mod ai;
pub mod board;
pub mod error;
pub mod game;
pub mod lines;
pub mod movegen;
pub mod notation;
pub mod rules;
pub mod state;
pub mod test_positions;
pub mod types;

pub use ai::{
    opening_move, rank_moves, AIConfig, AIEngine, AIStrategy, DepthTable, EasyAI, HardAI, Outcome, OutcomeKind,
    ScoredMove, SquareEvaluation, IMMINENT_WIN_POINTS, SEMI_WIN_WEIGHT,
};
pub use board::{Board, Cell};
pub use error::EngineError;
pub use game::TurnController;
pub use movegen::candidate_moves;
pub use notation::{parse_board, render, to_notation};
pub use rules::{evaluate_end_condition, evaluate_snapshot};
pub use state::{GameConfig, GameState};
pub use types::{AiSeat, Difficulty, Player, Verdict};
