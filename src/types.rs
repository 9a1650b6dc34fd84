//! 核心类型定义
//!
//! 定义 N 子棋中所有基础数据类型

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 允许的棋盘边长
pub const ALLOWED_GRID_SIZES: [usize; 5] = [3, 4, 5, 6, 7];

/// 允许的连子长度
pub const ALLOWED_RUN_LENGTHS: [usize; 2] = [3, 4];

/// 玩家（X 先手）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// 获取对方
    pub fn opposite(&self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// 从记谱字符解析（大小写均可）
    pub fn from_char(c: char) -> Option<Player> {
        match c.to_ascii_lowercase() {
            'x' => Some(Player::X),
            'o' => Some(Player::O),
            _ => None,
        }
    }

    /// 转换为记谱字符
    pub fn to_char(&self) -> char {
        match self {
            Player::X => 'x',
            Player::O => 'o',
        }
    }

    /// 用作按玩家分组的数组下标
    pub(crate) fn slot(&self) -> usize {
        match self {
            Player::X => 0,
            Player::O => 1,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// AI 难度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 在空格中均匀随机选择
    Easy,
    /// 递归搜索评分
    #[default]
    Hard,
}

impl FromStr for Difficulty {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "hard" => Ok(Difficulty::Hard),
            _ => Err(EngineError::UnknownDifficulty(s.to_string())),
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Difficulty::Easy => write!(f, "easy"),
            Difficulty::Hard => write!(f, "hard"),
        }
    }
}

/// 由 AI 控制的一方
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AiSeat {
    /// 双方都由人操作
    None,
    /// 只控制一方
    Only(Player),
    /// 双方都由 AI 操作（自动对弈）
    Both,
}

impl AiSeat {
    /// 该玩家是否由 AI 控制
    pub fn controls(&self, player: Player) -> bool {
        match self {
            AiSeat::None => false,
            AiSeat::Only(p) => *p == player,
            AiSeat::Both => true,
        }
    }
}

impl Default for AiSeat {
    fn default() -> Self {
        AiSeat::Only(Player::X)
    }
}

impl FromStr for AiSeat {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "none" => Ok(AiSeat::None),
            "x" => Ok(AiSeat::Only(Player::X)),
            "o" => Ok(AiSeat::Only(Player::O)),
            "both" => Ok(AiSeat::Both),
            _ => Err(EngineError::InvalidNotation(format!(
                "Unknown AI seat: {}. Available: none, x, o, both",
                s
            ))),
        }
    }
}

/// 终局判定结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Ongoing,
    Win(Player),
    Draw,
    /// 活棋威胁：下一手必胜，仅供搜索参考，不结束对局
    SemiWin(Player),
}

impl Verdict {
    /// 是否终局（胜或和）
    pub fn is_terminal(&self) -> bool {
        matches!(self, Verdict::Win(_) | Verdict::Draw)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Ongoing => write!(f, "ongoing"),
            Verdict::Win(p) => write!(f, "{} wins", p),
            Verdict::Draw => write!(f, "draw"),
            Verdict::SemiWin(p) => write!(f, "{} threatens", p),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_chars() {
        assert_eq!(Player::from_char('x'), Some(Player::X));
        assert_eq!(Player::from_char('O'), Some(Player::O));
        assert_eq!(Player::from_char('.'), None);
        assert_eq!(Player::X.to_char(), 'x');
        assert_eq!(Player::O.opposite(), Player::X);
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!("easy".parse::<Difficulty>().unwrap(), Difficulty::Easy);
        assert_eq!("HARD".parse::<Difficulty>().unwrap(), Difficulty::Hard);
        assert!("medium".parse::<Difficulty>().is_err());
    }

    #[test]
    fn test_ai_seat_controls() {
        assert!(!AiSeat::None.controls(Player::X));
        assert!(AiSeat::Only(Player::O).controls(Player::O));
        assert!(!AiSeat::Only(Player::O).controls(Player::X));
        assert!(AiSeat::Both.controls(Player::X));
        assert_eq!("both".parse::<AiSeat>().unwrap(), AiSeat::Both);
    }

    #[test]
    fn test_verdict_terminal() {
        assert!(Verdict::Win(Player::X).is_terminal());
        assert!(Verdict::Draw.is_terminal());
        assert!(!Verdict::SemiWin(Player::O).is_terminal());
        assert!(!Verdict::Ongoing.is_terminal());
    }
}
