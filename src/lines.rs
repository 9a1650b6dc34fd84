//! 连线扫描
//!
//! 为每种支持的棋盘边长预先生成所有极大连线：
//! 行（自上而下）、列（自左而右），然后是两组斜线：按锚点交替排列，
//! 同一锚点先左上-右下、后右上-左下。
//! 判定时在连线上取固定长度的滑动窗口，先找到的窗口即记录的胜利线。

use crate::types::ALLOWED_GRID_SIZES;

/// 一条连线，按走向排列的格子下标
pub type Line = Vec<usize>;

lazy_static::lazy_static! {
    /// 按边长索引的连线表（下标即边长，不支持的边长为空表）
    static ref LINE_TABLES: Vec<Vec<Line>> = {
        let max = ALLOWED_GRID_SIZES.iter().copied().max().unwrap_or(0);
        (0..=max)
            .map(|n| {
                if ALLOWED_GRID_SIZES.contains(&n) {
                    build_lines(n)
                } else {
                    Vec::new()
                }
            })
            .collect()
    };
}

/// 生成 N×N 棋盘的所有极大连线（含长度为 1 的角落斜线）
fn build_lines(n: usize) -> Vec<Line> {
    let mut lines = Vec::with_capacity(6 * n);

    // 行
    for row in 0..n {
        lines.push((0..n).map(|col| row * n + col).collect());
    }

    // 列
    for col in 0..n {
        lines.push((0..n).map(|row| row * n + col).collect());
    }

    // 斜线：按锚点 (row, col) 逐行逐列扫描，每个锚点先取从它出发的左上-右下线，
    // 再取从镜像格 (row, N-1-col) 出发的右上-左下线。只有第一行或第一列的锚点
    // 给出极大斜线，其余锚点的线都是已取斜线的后缀。
    let anchors = (0..n).map(|col| (0, col)).chain((1..n).map(|row| (row, 0)));
    for (row, col) in anchors {
        let nw_len = n - row.max(col);
        lines.push((0..nw_len).map(|k| (row + k) * n + col + k).collect());

        let mirrored = n - 1 - col;
        let ne_len = (mirrored + 1).min(n - row);
        lines.push((0..ne_len).map(|k| (row + k) * n + mirrored - k).collect());
    }

    lines
}

/// 长度不小于 `min_len` 的所有连线（扫描顺序：行、列、两组斜线）
pub fn lines_for(size: usize, min_len: usize) -> impl Iterator<Item = &'static Line> {
    LINE_TABLES
        .get(size)
        .map(|t| t.as_slice())
        .unwrap_or(&[])
        .iter()
        .filter(move |line| line.len() >= min_len)
}

/// 所有长度为 `len` 的窗口
pub fn windows(size: usize, len: usize) -> impl Iterator<Item = &'static [usize]> {
    lines_for(size, len).flat_map(move |line| line.windows(len))
}
