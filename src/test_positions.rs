//! 测试局面库
//!
//! 提供命名的记谱测试局面，方便测试和调试
//!
//! 命名规范:
//! - EMPTY_NxN: 空棋盘
//! - OPEN_n: 开局后若干步
//! - WIN_n: 一步可胜
//! - BLOCK_n: 必须防守
//! - DRAWN_n: 满盘和棋
//! - MID_n: 大棋盘中局（用于基准测试）

// =============================================================================
// 空棋盘 (EMPTY)
// =============================================================================

pub const EMPTY_3X3: &str = ".../.../... x 3";

pub const EMPTY_4X4: &str = "..../..../..../.... x 3";

pub const EMPTY_5X5: &str = "...../...../...../...../..... x 4";

pub const EMPTY_7X7: &str = "......./......./......./......./......./......./....... x 4";

// =============================================================================
// 开局 (OPEN)
// =============================================================================

/// X 占中心后轮到 O
pub const OPEN_3X3: &str = ".../.x./... o 3";

/// 5x5 X 占中心后轮到 O
pub const OPEN_5X5_CENTER: &str = "...../...../..x../...../..... o 4";

/// 5x5 X 第一手不在中心
pub const OPEN_5X5_CORNER: &str = "x..../...../...../...../..... o 4";

/// 5x5 X 中心，O 在中心正上方，轮到 X
pub const OPEN_5X5_ABOVE: &str = "...../..o../..x../...../..... x 4";

/// 5x5 X 中心，O 在中心右侧，轮到 X
pub const OPEN_5X5_RIGHT: &str = "...../...../..xo./...../..... x 4";

/// 5x5 X 中心，O 在角上（不走定式），轮到 X
pub const OPEN_5X5_FAR: &str = "o..../...../..x../...../..... x 4";

// =============================================================================
// 一步可胜 (WIN)
// =============================================================================

/// X 第一行已有两子，第三格空
pub const WIN_ROW_3X3: &str = "xx./oo./... x 3";

/// X 斜线两子，O 两子未成威胁
pub const WIN_DIAGONAL_3X3: &str = "x.o/.x./o.. x 3";

// =============================================================================
// 必须防守 (BLOCK)
// =============================================================================

/// X 在第 3 格同时形成横竖两条威胁，O 必须占 3
pub const BLOCK_FORK_3X3: &str = "x.o/.xx/x.o o 3";

/// X 差 3 即横向连成；O 占 3 后输棋只出现在更深的层，加权后仍最优
pub const BLOCK_DEPTH_3X3: &str = "..o/.xx/x.o o 3";

/// X 中路两子，O 必须占 1
pub const BLOCK_COLUMN_3X3: &str = ".../.x./.xo o 3";

// =============================================================================
// 满盘 (DRAWN)
// =============================================================================

/// 无人连三的满盘
pub const DRAWN_3X3: &str = "xox/xoo/oxx x 3";

// =============================================================================
// 中局 (MID)
// =============================================================================

/// 5x5 连四中局
pub const MID_5X5: &str = "...../.ox../..xo./...x./..... o 4";

/// 7x7 连四中局
pub const MID_7X7: &str = "......./......./..ox.../...xo../....x../......./....... o 4";

/// 所有局面（名称，记谱）
pub const ALL_POSITIONS: &[(&str, &str)] = &[
    ("EMPTY_3X3", EMPTY_3X3),
    ("EMPTY_4X4", EMPTY_4X4),
    ("EMPTY_5X5", EMPTY_5X5),
    ("EMPTY_7X7", EMPTY_7X7),
    ("OPEN_3X3", OPEN_3X3),
    ("OPEN_5X5_CENTER", OPEN_5X5_CENTER),
    ("OPEN_5X5_CORNER", OPEN_5X5_CORNER),
    ("OPEN_5X5_ABOVE", OPEN_5X5_ABOVE),
    ("OPEN_5X5_RIGHT", OPEN_5X5_RIGHT),
    ("OPEN_5X5_FAR", OPEN_5X5_FAR),
    ("WIN_ROW_3X3", WIN_ROW_3X3),
    ("WIN_DIAGONAL_3X3", WIN_DIAGONAL_3X3),
    ("BLOCK_FORK_3X3", BLOCK_FORK_3X3),
    ("BLOCK_DEPTH_3X3", BLOCK_DEPTH_3X3),
    ("BLOCK_COLUMN_3X3", BLOCK_COLUMN_3X3),
    ("DRAWN_3X3", DRAWN_3X3),
    ("MID_5X5", MID_5X5),
    ("MID_7X7", MID_7X7),
];

/// 按名称获取局面
pub fn get_position(name: &str) -> Option<&'static str> {
    ALL_POSITIONS
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, notation)| *notation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::parse_board;
    use crate::rules::evaluate_end_condition;
    use crate::types::Verdict;

    #[test]
    fn test_all_positions_parse() {
        for (name, notation) in ALL_POSITIONS {
            assert!(parse_board(notation).is_ok(), "Failed to parse {}", name);
        }
    }

    #[test]
    fn test_no_position_is_already_won() {
        for (name, notation) in ALL_POSITIONS {
            let mut state = parse_board(notation).unwrap();
            let verdict = evaluate_end_condition(&mut state, false);
            assert!(!matches!(verdict, Verdict::Win(_)), "{} is already won", name);
        }
    }

    #[test]
    fn test_get_position() {
        assert_eq!(get_position("EMPTY_3X3"), Some(EMPTY_3X3));
        assert_eq!(get_position("NOPE"), None);
    }
}
