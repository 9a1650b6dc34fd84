//! 困难 AI：递归模拟评分
//!
//! 对每个候选格，在状态克隆上落子，然后双方交替模拟到该边长的深度上限。
//! 每一层都做终局判定（含活棋检测），按 1/depth² 给胜、和、负累计分数，
//! 活棋按一半计分。同一候选格下的所有分支都累计进同一个
//! `SquareEvaluation`，这是单边贪心的聚合，不是极小化极大。

use super::{opening_move, rank_moves, AIConfig, AIStrategy, ScoredMove};
use crate::error::EngineError;
use crate::movegen::candidate_moves;
use crate::rules::evaluate_end_condition;
use crate::state::GameState;
use crate::types::{Player, Verdict};
use serde::Serialize;

/// 活棋相对于真正胜负的权重
pub const SEMI_WIN_WEIGHT: f64 = 0.5;

/// 一步即胜/即负的分数，压过所有普通评分
pub const IMMINENT_WIN_POINTS: f64 = 1000.0;

/// 每个候选格最多保留的结果记录条数
pub const MAX_RECORDED_OUTCOMES: usize = 32;

/// 模拟中遇到的结果类型（以 AI 一方为视角）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeKind {
    Win,
    Loss,
    Draw,
    SemiWin,
    SemiLoss,
}

/// 一条结果记录：类型和出现的深度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub kind: OutcomeKind,
    pub depth: u32,
}

/// 单个候选格的搜索统计
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SquareEvaluation {
    pub wins: u32,
    pub draws: u32,
    pub losses: u32,
    pub semi_wins: u32,
    pub semi_losses: u32,
    pub win_points: f64,
    pub draw_points: f64,
    pub loss_points: f64,
    /// 第一层即胜
    pub imminent_win: bool,
    /// 对手第二层即胜
    pub imminent_loss: bool,
    /// 模拟的节点数
    pub nodes: u64,
    /// 到达的最大深度
    pub max_depth: u32,
    /// 按遇到顺序的前若干条结果，供调试排序
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub outcomes: Vec<Outcome>,
}

impl SquareEvaluation {
    /// 候选格最终分数
    pub fn score(&self) -> f64 {
        if self.imminent_win {
            return IMMINENT_WIN_POINTS;
        }
        if self.imminent_loss {
            return -IMMINENT_WIN_POINTS;
        }
        let total = self.win_points + self.draw_points + self.loss_points;
        if total > 0.0 {
            (self.win_points - self.loss_points) / total
        } else {
            0.0
        }
    }

    fn note(&mut self, kind: OutcomeKind, depth: u32) {
        if self.outcomes.len() < MAX_RECORDED_OUTCOMES {
            self.outcomes.push(Outcome { kind, depth });
        }
    }

    fn record_win(&mut self, depth: u32) {
        self.note(OutcomeKind::Win, depth);
        self.wins += 1;
        self.win_points += outcome_weight(depth);
        if depth == 1 {
            self.imminent_win = true;
        }
    }

    fn record_loss(&mut self, depth: u32) {
        self.note(OutcomeKind::Loss, depth);
        self.losses += 1;
        self.loss_points += outcome_weight(depth);
        if depth == 2 {
            self.imminent_loss = true;
        }
    }

    fn record_draw(&mut self, depth: u32) {
        self.note(OutcomeKind::Draw, depth);
        self.draws += 1;
        self.draw_points += outcome_weight(depth);
    }

    fn record_semi_win(&mut self, depth: u32) {
        self.note(OutcomeKind::SemiWin, depth);
        self.semi_wins += 1;
        self.win_points += outcome_weight(depth) * SEMI_WIN_WEIGHT;
    }

    fn record_semi_loss(&mut self, depth: u32) {
        self.note(OutcomeKind::SemiLoss, depth);
        self.semi_losses += 1;
        self.loss_points += outcome_weight(depth) * SEMI_WIN_WEIGHT;
    }
}

/// 越早出现的结果权重越大
#[inline]
fn outcome_weight(depth: u32) -> f64 {
    1.0 / f64::from(depth * depth)
}

/// 困难 AI
pub struct HardAI {
    config: AIConfig,
}

impl HardAI {
    pub fn new(config: &AIConfig) -> Self {
        HardAI {
            config: config.clone(),
        }
    }

    /// 对单个候选格完整评分
    pub fn evaluate_square(&self, state: &GameState, cell: usize) -> Result<SquareEvaluation, EngineError> {
        let limit = self.config.depth_table.depth_for(state.grid_size())?;
        let mut evaluation = SquareEvaluation::default();
        self.simulate(cell, &mut evaluation, state.clone(), 1, state.current, limit)?;
        Ok(evaluation)
    }

    /// 在 `sim` 上替当前玩家落子并向下模拟
    ///
    /// `sim` 是本分支独占的克隆，子分支各自再克隆一份。
    fn simulate(
        &self,
        cell: usize,
        evaluation: &mut SquareEvaluation,
        mut sim: GameState,
        depth: u32,
        ai: Player,
        limit: u32,
    ) -> Result<(), EngineError> {
        sim.place(cell)?;
        evaluation.nodes += 1;
        evaluation.max_depth = evaluation.max_depth.max(depth);

        match evaluate_end_condition(&mut sim, true) {
            Verdict::Win(p) if p == ai => {
                evaluation.record_win(depth);
                return Ok(());
            }
            Verdict::Win(_) => {
                evaluation.record_loss(depth);
                return Ok(());
            }
            Verdict::Draw => {
                evaluation.record_draw(depth);
                return Ok(());
            }
            Verdict::SemiWin(p) if p == ai => evaluation.record_semi_win(depth),
            Verdict::SemiWin(_) => evaluation.record_semi_loss(depth),
            Verdict::Ongoing => {}
        }

        if depth >= limit {
            return Ok(());
        }

        sim.current = sim.current.opposite();
        for next in candidate_moves(&sim.board) {
            self.simulate(next, evaluation, sim.clone(), depth + 1, ai, limit)?;
        }
        Ok(())
    }
}

impl AIStrategy for HardAI {
    fn select_moves(&self, state: &GameState, n: usize) -> Result<Vec<ScoredMove>, EngineError> {
        let grid_size = state.grid_size();
        let limit = self.config.depth_table.depth_for(grid_size)?;

        if let Some(cell) = opening_move(state) {
            log::info!("opening move for {}: {}", state.current, cell);
            return Ok(vec![ScoredMove::new(cell, 0.0)]);
        }

        let mut candidates = candidate_moves(&state.board);
        if candidates.is_empty() {
            candidates = state.board.empty_cells();
        }
        if candidates.is_empty() {
            return Err(EngineError::NoEmptyCells);
        }

        let ai = state.current;
        let mut scored = Vec::with_capacity(candidates.len());
        for cell in candidates {
            let mut evaluation = SquareEvaluation::default();
            self.simulate(cell, &mut evaluation, state.clone(), 1, ai, limit)?;
            let score = evaluation.score();
            let imminent_win = evaluation.imminent_win;
            log::trace!("cell {} -> {:.4} ({:?})", cell, score, evaluation);
            scored.push(ScoredMove {
                cell,
                score,
                evaluation: Some(evaluation),
            });
            // 一步即胜无需再看其他候选
            if imminent_win {
                break;
            }
        }

        rank_moves(&mut scored, &state.board);
        log::debug!(
            "ranking for {} on {}x{} (depth {}): {:?}",
            ai,
            grid_size,
            grid_size,
            limit,
            scored.iter().map(|sm| (sm.cell, sm.score)).collect::<Vec<_>>()
        );
        scored.truncate(n);
        Ok(scored)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::DepthTable;
    use crate::notation::parse_board;
    use crate::test_positions;

    fn hard() -> HardAI {
        HardAI::new(&AIConfig::default())
    }

    #[test]
    fn test_imminent_win_dominates() {
        let state = parse_board(test_positions::WIN_ROW_3X3).unwrap();
        let moves = hard().select_moves(&state, 9).unwrap();
        assert_eq!(moves[0].cell, 2);
        assert_eq!(moves[0].score, IMMINENT_WIN_POINTS);
        // 即胜之后的候选不再评估
        assert_eq!(moves.len(), 1);
    }

    #[test]
    fn test_diagonal_win_is_taken() {
        let state = parse_board(test_positions::WIN_DIAGONAL_3X3).unwrap();
        assert_eq!(hard().select_best_move(&state).unwrap(), Some(8));
    }

    #[test]
    fn test_fork_block_ranks_other_cells_as_imminent_loss() {
        let state = parse_board(test_positions::BLOCK_FORK_3X3).unwrap();
        let moves = hard().select_moves(&state, 9).unwrap();
        let cells: Vec<usize> = moves.iter().map(|sm| sm.cell).collect();
        assert_eq!(cells[0], 3);
        for sm in &moves[1..] {
            assert_eq!(sm.score, -IMMINENT_WIN_POINTS);
            assert!(sm.evaluation.as_ref().unwrap().imminent_loss);
        }
    }

    #[test]
    fn test_later_losses_weigh_less() {
        let state = parse_board(test_positions::BLOCK_DEPTH_3X3).unwrap();
        let moves = hard().select_moves(&state, 9).unwrap();
        assert_eq!(moves[0].cell, 3);
        assert!((moves[0].score + 1.0 / 3.0).abs() < 1e-9);
        let evaluation = moves[0].evaluation.as_ref().unwrap();
        assert!(!evaluation.imminent_loss);
        assert!(evaluation.losses >= 1);

        let rest: Vec<usize> = moves[1..].iter().map(|sm| sm.cell).collect();
        assert_eq!(rest, vec![1, 7, 0]);
        assert!(moves[1..].iter().all(|sm| sm.score == -IMMINENT_WIN_POINTS));
    }

    #[test]
    fn test_block_column() {
        let state = parse_board(test_positions::BLOCK_COLUMN_3X3).unwrap();
        let moves = hard().select_moves(&state, 9).unwrap();
        assert_eq!(moves[0].cell, 1);
        assert!(moves[0].score > -IMMINENT_WIN_POINTS);
        assert_eq!(moves.len(), 6);
        assert!(moves[1..].iter().all(|sm| sm.score == -IMMINENT_WIN_POINTS));
    }

    #[test]
    fn test_evaluation_counts_outcomes() {
        let state = parse_board(test_positions::BLOCK_FORK_3X3).unwrap();
        let evaluation = hard().evaluate_square(&state, 1).unwrap();
        assert!(evaluation.imminent_loss);
        assert!(evaluation.losses >= 1);
        assert!(evaluation.nodes >= 3);
        assert!(evaluation.max_depth >= 2);
        assert!(evaluation.max_depth <= 6);
    }

    #[test]
    fn test_depth_limit_is_respected() {
        let config = AIConfig {
            depth_table: DepthTable::new([(3, 1)]),
            ..Default::default()
        };
        let state = parse_board(test_positions::OPEN_3X3).unwrap();
        let evaluation = HardAI::new(&config).evaluate_square(&state, 0).unwrap();
        assert_eq!(evaluation.nodes, 1);
        assert_eq!(evaluation.max_depth, 1);
        assert_eq!(evaluation.score(), 0.0);
    }

    #[test]
    fn test_score_formula() {
        let evaluation = SquareEvaluation {
            win_points: 1.0,
            draw_points: 0.5,
            loss_points: 0.5,
            ..Default::default()
        };
        assert!((evaluation.score() - 0.25).abs() < 1e-12);

        let lost = SquareEvaluation {
            win_points: 5.0,
            imminent_loss: true,
            ..Default::default()
        };
        assert_eq!(lost.score(), -IMMINENT_WIN_POINTS);
        assert_eq!(SquareEvaluation::default().score(), 0.0);
    }

    #[test]
    fn test_outcomes_are_recorded_with_depth() {
        let state = parse_board(test_positions::BLOCK_FORK_3X3).unwrap();
        let evaluation = hard().evaluate_square(&state, 1).unwrap();
        assert!(evaluation
            .outcomes
            .contains(&Outcome { kind: OutcomeKind::Loss, depth: 2 }));
        assert!(evaluation.outcomes.len() <= MAX_RECORDED_OUTCOMES);

        let state = parse_board(test_positions::WIN_ROW_3X3).unwrap();
        let evaluation = hard().evaluate_square(&state, 2).unwrap();
        assert_eq!(
            evaluation.outcomes,
            vec![Outcome { kind: OutcomeKind::Win, depth: 1 }]
        );
    }

    #[test]
    fn test_outcome_log_is_capped() {
        // 7x7 深度 3 的模拟远超上限
        let state = parse_board(test_positions::MID_7X7).unwrap();
        let evaluation = hard().evaluate_square(&state, 9).unwrap();
        let recorded = evaluation.wins
            + evaluation.losses
            + evaluation.draws
            + evaluation.semi_wins
            + evaluation.semi_losses;
        assert_eq!(evaluation.outcomes.len(), (recorded as usize).min(MAX_RECORDED_OUTCOMES));
    }

    #[test]
    fn test_outcome_weight() {
        assert_eq!(outcome_weight(1), 1.0);
        assert_eq!(outcome_weight(2), 0.25);
        assert!((outcome_weight(3) - 1.0 / 9.0).abs() < 1e-12);
    }

    #[test]
    fn test_semi_win_scores_for_search() {
        // 5x5 连三：X 落在中心右侧即形成 .xx. 活二
        let state = parse_board("...../...../..x../...../..... x 3").unwrap();
        let evaluation = hard().evaluate_square(&state, 13).unwrap();
        assert!(evaluation.semi_wins >= 1);
        assert!(evaluation.win_points > 0.0);
        assert!(!evaluation.imminent_win);
        assert_eq!(evaluation.max_depth, 3);
    }

    #[test]
    fn test_large_board_search_stays_near_stones() {
        let state = parse_board(test_positions::MID_7X7).unwrap();
        let moves = hard().select_moves(&state, 49).unwrap();
        assert!(!moves.is_empty());
        for sm in &moves {
            assert!(state.board.owner(sm.cell).is_none());
            assert!(state.board.has_occupied_neighbour(sm.cell));
        }
    }
}
