//! 终局判定
//!
//! 只检查刚落子的一方（`state.current`），不切换回合。
//! 第一遍找连子胜利和和棋；需要时第二遍找活棋威胁（semi-win）：
//! 长度 L+1 的窗口，首尾为空、中间全是己方棋子，对方无论堵哪一头
//! 都能在另一头连成。
//!
//! 记谱快照里的回合是“轮到谁走”，刚落子的是对方；
//! 判定外来快照用 `evaluate_snapshot`，双方都检查。

use crate::lines::{windows, Line};
use crate::state::GameState;
use crate::types::{Player, Verdict};
use std::collections::BTreeSet;

/// 判定终局并写入状态和高亮标记
///
/// 已终局的状态直接返回原结果，不重新扫描。
pub fn evaluate_end_condition(state: &mut GameState, check_threats: bool) -> Verdict {
    if state.is_over() {
        return state.verdict();
    }

    let player = state.current;
    let size = state.grid_size();
    let run = state.run_length();

    if let Some(line) = find_win(state, player) {
        mark_win(state, player, line);
        return Verdict::Win(player);
    }

    if state.board.is_full() {
        state.draw = true;
        return Verdict::Draw;
    }

    // 窗口 L+1 放不下时没有威胁可言
    if !check_threats || size <= run {
        return Verdict::Ongoing;
    }

    let found = find_threats(state, player);
    let threatened = !found.is_empty();
    state.threats[player.slot()] = found.into_iter().collect();
    refresh_threat_marks(state);

    if threatened {
        state.semi_winner = Some(player);
        Verdict::SemiWin(player)
    } else {
        if state.semi_winner == Some(player) {
            state.semi_winner = None;
        }
        Verdict::Ongoing
    }
}

/// 判定一个外来快照（`state.current` 为轮到走棋的一方）
///
/// 先按刚落子的对方判定，再按轮到的一方判定，回合不变。
/// 对方已连成时直接返回其胜利；否则返回轮到一方的结果，
/// 若它没有活棋而对方有，则返回对方的活棋。
pub fn evaluate_snapshot(state: &mut GameState, check_threats: bool) -> Verdict {
    if state.is_over() {
        return state.verdict();
    }

    let to_move = state.current;
    state.current = to_move.opposite();
    let last = evaluate_end_condition(state, check_threats);
    state.current = to_move;

    match last {
        Verdict::Win(_) => return last,
        // 满盘时轮到的一方仍可能已连成，清掉和棋标记后重判
        Verdict::Draw => state.draw = false,
        _ => {}
    }

    match evaluate_end_condition(state, check_threats) {
        Verdict::Ongoing => last,
        verdict => verdict,
    }
}

/// 第一个全为 `player` 的长度 L 窗口
fn find_win(state: &GameState, player: Player) -> Option<Line> {
    let board = &state.board;
    windows(state.grid_size(), state.run_length())
        .find(|w| w.iter().all(|&i| board.owner(i) == Some(player)))
        .map(|w| w.to_vec())
}

/// 所有活棋窗口，按扫描顺序，同一组坐标只记一次
fn find_threats(state: &GameState, player: Player) -> Vec<Line> {
    let board = &state.board;
    let span = state.run_length() + 1;
    let mut seen: BTreeSet<&[usize]> = BTreeSet::new();
    let mut found = Vec::new();

    for w in windows(state.grid_size(), span) {
        let (head, tail) = (w[0], w[span - 1]);
        let open_ends = board.owner(head).is_none() && board.owner(tail).is_none();
        if open_ends
            && w[1..span - 1].iter().all(|&i| board.owner(i) == Some(player))
            && seen.insert(w)
        {
            found.push(w.to_vec());
        }
    }
    found
}

fn mark_win(state: &mut GameState, player: Player, line: Line) {
    let cells = state.board.cells_mut();
    for &i in &line {
        cells[i].in_winning_line = true;
    }
    state.winner = Some(player);
    state.winning_line = Some(line);
}

/// 按双方威胁记录重新设置 `in_threat_line`
fn refresh_threat_marks(state: &mut GameState) {
    let marked: BTreeSet<usize> = state
        .threats
        .iter()
        .flat_map(|set| set.iter().flatten().copied())
        .collect();
    for (i, cell) in state.board.cells_mut().iter_mut().enumerate() {
        cell.in_threat_line = marked.contains(&i);
    }
}
