//! 棋盘记谱解析和生成
//!
//! 格式: `<棋盘> <回合> <连子长度>`
//!
//! 棋盘符号：
//! - 行之间用 `/` 分隔，从最上一行开始
//! - X 方：`x` 或 `X`
//! - O 方：`o` 或 `O`
//! - 空格：`.` 或数字 (1-7)，数字表示连续空格数
//!
//! 例：`x1o/1xx/x1o o 3`

use crate::board::Board;
use crate::error::EngineError;
use crate::state::GameState;
use crate::types::Player;

/// 解析记谱字符串为对局状态
pub fn parse_board(notation: &str) -> Result<GameState, EngineError> {
    let parts: Vec<&str> = notation.split_whitespace().collect();
    if parts.len() != 3 {
        return Err(EngineError::InvalidNotation(format!(
            "expected '<board> <turn> <run-length>', got: {}",
            notation
        )));
    }

    let owners = parse_rows(parts[0])?;
    let size = parts[0].split('/').count();

    let turn = parts[1]
        .chars()
        .next()
        .filter(|_| parts[1].len() == 1)
        .and_then(Player::from_char)
        .ok_or_else(|| EngineError::InvalidNotation(format!("invalid turn: {}", parts[1])))?;

    let run_length: usize = parts[2]
        .parse()
        .map_err(|_| EngineError::InvalidNotation(format!("invalid run length: {}", parts[2])))?;

    let board = Board::from_owners(size, &owners)?;
    GameState::from_board(board, turn, run_length)
}

/// 解析棋盘部分，要求 N 行且每行 N 格
fn parse_rows(board_str: &str) -> Result<Vec<Option<Player>>, EngineError> {
    let rows: Vec<&str> = board_str.split('/').collect();
    let size = rows.len();
    let mut owners = Vec::with_capacity(size * size);

    for (row_idx, row_str) in rows.iter().enumerate() {
        let mut width = 0;
        for ch in row_str.chars() {
            if let Some(player) = Player::from_char(ch) {
                owners.push(Some(player));
                width += 1;
            } else if ch == '.' {
                owners.push(None);
                width += 1;
            } else if let Some(run) = ch.to_digit(10).filter(|d| (1..=7).contains(d)) {
                owners.extend(std::iter::repeat(None).take(run as usize));
                width += run as usize;
            } else {
                return Err(EngineError::InvalidNotation(format!(
                    "invalid cell char '{}' in row {}",
                    ch, row_idx
                )));
            }
        }

        if width != size {
            return Err(EngineError::InvalidNotation(format!(
                "row {} has {} cells, expected {}",
                row_idx, width, size
            )));
        }
    }

    Ok(owners)
}

/// 生成记谱字符串（空格一律写成 `.`）
pub fn to_notation(state: &GameState) -> String {
    let size = state.grid_size();
    let rows: Vec<String> = state
        .board
        .cells()
        .chunks(size)
        .map(|row| {
            row.iter()
                .map(|cell| cell.owner.map_or('.', |p| p.to_char()))
                .collect()
        })
        .collect();

    format!(
        "{} {} {}",
        rows.join("/"),
        state.current.to_char(),
        state.config.run_length
    )
}

/// 多行文本棋盘（供命令行显示）
pub fn render(state: &GameState) -> String {
    let size = state.grid_size();
    state
        .board
        .cells()
        .chunks(size)
        .map(|row| {
            row.iter()
                .map(|cell| match cell.owner {
                    Some(p) if cell.in_winning_line => p.to_char().to_ascii_uppercase().to_string(),
                    Some(p) => p.to_char().to_string(),
                    None => ".".to_string(),
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}
