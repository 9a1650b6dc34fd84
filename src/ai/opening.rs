//! 开局定式
//!
//! 搜索之前先查的几条固定走法：空盘占中心；大棋盘（边长 > 4）
//! 第一、二手按中心附近的定式走，省去开局时代价最高的搜索。

use crate::state::GameState;

/// 启用第一、二手定式的最小边长
const BOOK_MIN_GRID_SIZE: usize = 5;

/// 定式走法；目标格已被占时返回 None，交给搜索处理
pub fn opening_move(state: &GameState) -> Option<usize> {
    let board = &state.board;
    let n = board.size();
    let center = board.center();

    if board.is_blank() {
        return Some(center);
    }
    if n < BOOK_MIN_GRID_SIZE {
        return None;
    }

    let opponent = Some(state.current.opposite());
    let up_left = center - n - 1;
    let down_right = center + n + 1;

    let target = match board.occupied_count() {
        1 => {
            if board.owner(center).is_some() {
                up_left
            } else {
                center
            }
        }
        2 => {
            if board.owner(center - n) == opponent || board.owner(center - 1) == opponent {
                up_left
            } else if board.owner(center + 1) == opponent || board.owner(center + n) == opponent {
                down_right
            } else {
                return None;
            }
        }
        _ => return None,
    };

    board.owner(target).is_none().then_some(target)
}
