//! 回合控制
//!
//! 每次落子后判定终局；未结束则换手，若轮到 AI 则由对应难度的
//! 策略落子，直到轮到人类或对局结束。双方都是 AI 时会一直自动对弈。

use crate::ai::{AIConfig, AIEngine};
use crate::error::EngineError;
use crate::rules::{evaluate_end_condition, evaluate_snapshot};
use crate::state::GameState;
use crate::types::{Difficulty, Verdict};

/// 回合控制器
pub struct TurnController {
    easy: AIEngine,
    hard: AIEngine,
}

impl TurnController {
    pub fn new(config: &AIConfig) -> Self {
        TurnController {
            easy: AIEngine::from_difficulty(Difficulty::Easy, config),
            hard: AIEngine::from_difficulty(Difficulty::Hard, config),
        }
    }

    fn engine(&self, difficulty: Difficulty) -> &AIEngine {
        match difficulty {
            Difficulty::Easy => &self.easy,
            Difficulty::Hard => &self.hard,
        }
    }

    /// 按状态中的难度为当前玩家选择并落子
    pub fn choose_ai_move(&self, state: &mut GameState) -> Result<usize, EngineError> {
        self.engine(state.difficulty).choose_move(state)
    }

    /// 刚落子后推进对局：判定终局、换手、必要时让 AI 连续行棋
    pub fn advance_turn(&self, state: &mut GameState) -> Result<Verdict, EngineError> {
        loop {
            let verdict = evaluate_end_condition(state, false);
            if verdict.is_terminal() {
                log::info!("game over: {}", verdict);
                return Ok(verdict);
            }

            state.current = state.current.opposite();
            if !state.ai_to_move() {
                return Ok(verdict);
            }

            let cell = self.choose_ai_move(state)?;
            log::debug!("{} ({}) plays {}", state.current, state.difficulty, cell);
        }
    }

    /// 人类为当前玩家落子，然后推进对局
    pub fn play_move(&self, state: &mut GameState, cell: usize) -> Result<Verdict, EngineError> {
        state.place(cell)?;
        self.advance_turn(state)
    }

    /// 从外来快照继续对局
    ///
    /// 快照的回合是轮到走棋的一方。先判定双方是否已连成或满盘，
    /// 已终局则不再落子；否则若轮到 AI 就让它走并推进。
    pub fn resume(&self, state: &mut GameState) -> Result<Verdict, EngineError> {
        let verdict = evaluate_snapshot(state, false);
        if verdict.is_terminal() || !state.ai_to_move() {
            return Ok(verdict);
        }
        self.choose_ai_move(state)?;
        self.advance_turn(state)
    }

    /// 开局时若先手是 AI，先让它走
    pub fn start(&self, state: &mut GameState) -> Result<Verdict, EngineError> {
        if state.is_over() || !state.ai_to_move() || !state.board.is_blank() {
            return Ok(state.verdict());
        }
        self.choose_ai_move(state)?;
        self.advance_turn(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notation::parse_board;
    use crate::state::GameConfig;
    use crate::test_positions;
    use crate::types::{AiSeat, Player};

    fn controller() -> TurnController {
        TurnController::new(&AIConfig {
            seed: Some(7),
            ..Default::default()
        })
    }

    /// 把局面设为“对方刚走完”，调用 advance_turn 后轮到 AI
    fn before_ai_turn(notation: &str, ai: Player) -> GameState {
        let mut state = parse_board(notation).unwrap();
        state.ai = AiSeat::Only(ai);
        state.current = ai.opposite();
        state
    }

    #[test]
    fn test_weighs_outcomes_by_depth() {
        let mut state = before_ai_turn(test_positions::BLOCK_FORK_3X3, Player::O);
        let verdict = controller().advance_turn(&mut state).unwrap();
        assert_eq!(state.board.owner(3), Some(Player::O));
        assert_eq!(verdict, Verdict::Ongoing);
        // AI 落子后回合交还给人类
        assert_eq!(state.current, Player::X);
    }

    #[test]
    fn test_blocks_when_losses_come_later() {
        let mut state = before_ai_turn(test_positions::BLOCK_DEPTH_3X3, Player::O);
        controller().advance_turn(&mut state).unwrap();
        assert_eq!(state.board.owner(3), Some(Player::O));
        assert!(state.winner.is_none());
    }

    #[test]
    fn test_avoids_trivial_loss() {
        let mut state = before_ai_turn(test_positions::BLOCK_COLUMN_3X3, Player::O);
        controller().advance_turn(&mut state).unwrap();
        assert_eq!(state.board.owner(1), Some(Player::O));
    }

    #[test]
    fn test_completes_win() {
        let mut state = before_ai_turn(test_positions::WIN_ROW_3X3, Player::X);
        let verdict = controller().advance_turn(&mut state).unwrap();
        assert_eq!(verdict, Verdict::Win(Player::X));
        assert_eq!(state.winner, Some(Player::X));
        assert_eq!(state.board.owner(2), Some(Player::X));
        assert_eq!(state.winning_line, Some(vec![0, 1, 2]));
        assert!(!state.draw);
    }

    #[test]
    fn test_human_move_then_ai_reply() {
        let config = GameConfig::new(3, 3).unwrap();
        let mut state = GameState::new(config, AiSeat::Only(Player::O), Difficulty::Hard).unwrap();
        let ctl = controller();
        ctl.play_move(&mut state, 0).unwrap();
        assert_eq!(state.board.occupied_count(), 2);
        assert_eq!(state.current, Player::X);
        assert_eq!(state.board.owner(0), Some(Player::X));
    }

    #[test]
    fn test_human_cannot_play_occupied_or_after_end() {
        let ctl = controller();
        let mut state = parse_board(test_positions::OPEN_3X3).unwrap();
        assert_eq!(
            ctl.play_move(&mut state, 4),
            Err(EngineError::CellOccupied { index: 4 })
        );

        let mut state = parse_board("xxx/oo./... x 3").unwrap();
        assert_eq!(ctl.advance_turn(&mut state).unwrap(), Verdict::Win(Player::X));
        assert_eq!(ctl.play_move(&mut state, 8), Err(EngineError::GameOver));
    }

    #[test]
    fn test_no_ai_only_switches_turn() {
        let ctl = controller();
        let mut state = parse_board(test_positions::OPEN_3X3).unwrap();
        let verdict = ctl.play_move(&mut state, 0).unwrap();
        assert_eq!(verdict, Verdict::Ongoing);
        assert_eq!(state.current, Player::X);
        assert_eq!(state.board.occupied_count(), 2);
    }

    #[test]
    fn test_ai_vs_ai_plays_to_the_end() {
        let ctl = controller();
        for difficulty in [Difficulty::Easy, Difficulty::Hard] {
            let config = GameConfig::new(3, 3).unwrap();
            let mut state = GameState::new(config, AiSeat::Both, difficulty).unwrap();
            let verdict = ctl.start(&mut state).unwrap();
            assert!(verdict.is_terminal());
            assert!(state.is_over());
            assert!(state.winner.is_none() || !state.draw);
        }
    }

    #[test]
    fn test_hard_vs_hard_on_3x3_is_a_draw() {
        let config = GameConfig::new(3, 3).unwrap();
        let mut state = GameState::new(config, AiSeat::Both, Difficulty::Hard).unwrap();
        let verdict = controller().start(&mut state).unwrap();
        assert_eq!(verdict, Verdict::Draw);
        assert!(state.board.is_full());
    }

    #[test]
    fn test_easy_ai_vs_human() {
        let config = GameConfig::new(4, 3).unwrap();
        let mut state = GameState::new(config, AiSeat::Only(Player::O), Difficulty::Easy).unwrap();
        controller().play_move(&mut state, 5).unwrap();
        assert_eq!(state.board.occupied_count(), 2);
        assert_eq!(state.current, Player::X);
    }

    #[test]
    fn test_resume_stops_on_finished_snapshot() {
        // 轮到 O，但 X 已经连成
        let mut state = parse_board("xxx/oo./... o 3").unwrap();
        state.ai = AiSeat::Both;
        let verdict = controller().resume(&mut state).unwrap();
        assert_eq!(verdict, Verdict::Win(Player::X));
        assert_eq!(state.board.occupied_count(), 5);
        assert_eq!(state.board.owner(5), None);
        assert_eq!(
            controller().choose_ai_move(&mut state),
            Err(EngineError::GameOver)
        );
    }

    #[test]
    fn test_resume_human_cannot_play_on_finished_snapshot() {
        let mut state = parse_board("oo./xxx/... o 3").unwrap();
        state.ai = AiSeat::Only(Player::X);
        assert_eq!(controller().resume(&mut state).unwrap(), Verdict::Win(Player::X));
        assert_eq!(controller().play_move(&mut state, 2), Err(EngineError::GameOver));
    }

    #[test]
    fn test_resume_plays_ai_to_move() {
        let mut state = parse_board(test_positions::BLOCK_COLUMN_3X3).unwrap();
        state.ai = AiSeat::Only(Player::O);
        assert_eq!(controller().resume(&mut state).unwrap(), Verdict::Ongoing);
        assert_eq!(state.board.owner(1), Some(Player::O));
        assert_eq!(state.current, Player::X);

        let mut state = parse_board(test_positions::EMPTY_3X3).unwrap();
        state.ai = AiSeat::Both;
        assert!(controller().resume(&mut state).unwrap().is_terminal());
    }

    #[test]
    fn test_start_with_ai_first() {
        let config = GameConfig::new(5, 4).unwrap();
        let mut state = GameState::new(config, AiSeat::Only(Player::X), Difficulty::Hard).unwrap();
        assert_eq!(controller().start(&mut state).unwrap(), Verdict::Ongoing);
        assert_eq!(state.board.owner(12), Some(Player::X));
        assert_eq!(state.current, Player::O);
    }
}
