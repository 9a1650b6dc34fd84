//! 棋盘模型
//!
//! N×N 格子按行优先存储，下标 0..N²-1。棋盘本身只负责存取，
//! 胜负判定见 `rules`，候选走法见 `movegen`。

use crate::error::EngineError;
use crate::types::{Player, ALLOWED_GRID_SIZES};
use serde::{Deserialize, Serialize};

/// 单个格子
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub owner: Option<Player>,
    /// 属于已连成的胜利线（仅用于界面高亮）
    pub in_winning_line: bool,
    /// 属于活棋威胁线（仅用于界面高亮）
    pub in_threat_line: bool,
}

impl Cell {
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.owner.is_none()
    }
}

/// 棋盘
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// 创建空棋盘
    pub fn new(size: usize) -> Result<Board, EngineError> {
        if !ALLOWED_GRID_SIZES.contains(&size) {
            return Err(EngineError::UnsupportedGridSize { size });
        }
        Ok(Board {
            size,
            cells: vec![Cell::default(); size * size],
        })
    }

    /// 由各格归属创建棋盘（长度必须为 N²）
    pub fn from_owners(size: usize, owners: &[Option<Player>]) -> Result<Board, EngineError> {
        let mut board = Board::new(size)?;
        if owners.len() != board.cells.len() {
            return Err(EngineError::InvalidNotation(format!(
                "expected {} cells, got {}",
                board.cells.len(),
                owners.len()
            )));
        }
        for (cell, owner) in board.cells.iter_mut().zip(owners) {
            cell.owner = *owner;
        }
        Ok(board)
    }

    /// 棋盘边长 N
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// 棋盘上没有任何棋子
    #[inline]
    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(Cell::is_empty)
    }

    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub(crate) fn cells_mut(&mut self) -> &mut [Cell] {
        &mut self.cells
    }

    /// 获取某格的归属，越界返回 None
    #[inline]
    pub fn owner(&self, index: usize) -> Option<Player> {
        self.cells.get(index).and_then(|c| c.owner)
    }

    /// 在空格落子
    pub fn place(&mut self, index: usize, player: Player) -> Result<(), EngineError> {
        let cells = self.cells.len();
        let cell = self
            .cells
            .get_mut(index)
            .ok_or(EngineError::CellOutOfRange { index, cells })?;
        if cell.owner.is_some() {
            return Err(EngineError::CellOccupied { index });
        }
        cell.owner = Some(player);
        Ok(())
    }

    /// 所有空格（升序）
    pub fn empty_cells(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_empty())
            .map(|(i, _)| i)
            .collect()
    }

    /// 已占格子数
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| !c.is_empty()).count()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| !c.is_empty())
    }

    /// 下标 -> (行, 列)
    #[inline]
    pub fn row_col(&self, index: usize) -> (usize, usize) {
        (index / self.size, index % self.size)
    }

    /// 中心格：(N+1)·⌊N/2⌋
    #[inline]
    pub fn center(&self) -> usize {
        (self.size + 1) * (self.size / 2)
    }

    /// 到中心格的曼哈顿距离
    pub fn distance_to_center(&self, index: usize) -> usize {
        let (row, col) = self.row_col(index);
        let (mid_row, mid_col) = self.row_col(self.center());
        row.abs_diff(mid_row) + col.abs_diff(mid_col)
    }

    /// 是否与某个已占格相邻（八邻域）
    pub fn has_occupied_neighbour(&self, index: usize) -> bool {
        let (row, col) = self.row_col(index);
        let n = self.size;
        for r in row.saturating_sub(1)..=(row + 1).min(n - 1) {
            for c in col.saturating_sub(1)..=(col + 1).min(n - 1) {
                let i = r * n + c;
                if i != index && !self.cells[i].is_empty() {
                    return true;
                }
            }
        }
        false
    }
}
