//! 错误类型

use thiserror::Error;

/// 引擎错误
///
/// 配置错误和不变量破坏都直接返回给调用方，不做默认替代。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineError {
    #[error("unsupported grid size {size} (allowed: 3..=7)")]
    UnsupportedGridSize { size: usize },

    #[error("unsupported run length {length} (allowed: 3 or 4)")]
    UnsupportedRunLength { length: usize },

    #[error("no search depth configured for grid size {grid_size}")]
    MissingDepth { grid_size: usize },

    #[error("invalid move: cell {index} is already occupied")]
    CellOccupied { index: usize },

    #[error("invalid move: cell {index} is outside a board of {cells} cells")]
    CellOutOfRange { index: usize, cells: usize },

    #[error("no empty cells left to choose from")]
    NoEmptyCells,

    #[error("game already over")]
    GameOver,

    #[error("invalid board notation: {0}")]
    InvalidNotation(String),

    #[error("unknown difficulty '{0}' (expected 'easy' or 'hard')")]
    UnknownDifficulty(String),
}
