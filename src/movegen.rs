//! 候选走法生成
//!
//! 3x3 上所有空格都是候选；更大的棋盘只保留与已有棋子相邻
//! （八邻域）的空格，以控制搜索宽度。

use crate::board::Board;

/// 启用相邻剪枝的最小边长
pub const PRUNING_MIN_GRID_SIZE: usize = 4;

/// 候选走法（升序）
pub fn candidate_moves(board: &Board) -> Vec<usize> {
    if board.size() < PRUNING_MIN_GRID_SIZE {
        return board.empty_cells();
    }
    board
        .empty_cells()
        .into_iter()
        .filter(|&i| board.has_occupied_neighbour(i))
        .collect()
}
