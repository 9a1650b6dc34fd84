//! N 连棋 AI 命令行
//!
//! 命令行界面，用于测试 AI
//!
//! 支持两种模式：
//! 1. 单次命令模式：每次执行一个命令
//! 2. Server 模式：长驻进程，通过 stdin/stdout 逐行收发 JSON

use clap::{Parser, Subcommand};
use nrow_ai::{
    candidate_moves, evaluate_snapshot, parse_board, render, to_notation, AIConfig, AIEngine, AiSeat,
    Difficulty, EngineError, GameConfig, GameState, Player, ScoredMove, SquareEvaluation, TurnController,
    Verdict,
};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::io::{self, BufRead, Write};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "nrow-ai")]
#[command(about = "N-in-a-row AI Engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 列出候选格
    Moves {
        /// 记谱，如 "x1o/1xx/x1o o 3"
        #[arg(long)]
        board: String,
    },

    /// 判定局面（胜负、和棋、活棋）
    Eval {
        /// 记谱
        #[arg(long)]
        board: String,

        /// 同时检测活棋威胁
        #[arg(long)]
        threats: bool,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// 选择最佳走法
    Best {
        /// 记谱
        #[arg(long)]
        board: String,

        /// AI 难度 (easy, hard)
        #[arg(long, default_value = "hard")]
        difficulty: String,

        /// 返回的走法数量
        #[arg(long, default_value = "1")]
        n: usize,

        /// 随机种子（简单 AI）
        #[arg(long)]
        seed: Option<u64>,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// AI 自我对弈到终局
    Play {
        /// 棋盘边长 (3-7)
        #[arg(long, default_value = "5")]
        size: usize,

        /// 连子长度 (3, 4)
        #[arg(long, default_value = "4")]
        run_length: usize,

        /// AI 难度 (easy, hard)
        #[arg(long, default_value = "hard")]
        difficulty: String,

        /// 随机种子（简单 AI）
        #[arg(long)]
        seed: Option<u64>,
    },

    /// 启动 server 模式（stdin/stdout 通信）
    Server,
}

#[derive(Serialize)]
struct MoveResult {
    cell: usize,
    row: usize,
    col: usize,
    score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    evaluation: Option<SquareEvaluation>,
}

#[derive(Serialize)]
struct MovesResponse {
    moves: Vec<MoveResult>,
    total: usize,
}

// Server 模式的请求和响应结构
#[derive(Deserialize)]
struct ServerRequest {
    cmd: String,
    #[serde(default)]
    board: String,
    #[serde(default)]
    difficulty: Option<String>,
    #[serde(default)]
    n: Option<usize>,
    #[serde(default)]
    seed: Option<u64>,
    #[serde(default)]
    threats: Option<bool>,
    /// play 命令：人类落子的格子；缺省时由 AI 自我对弈到终局
    #[serde(default)]
    cell: Option<usize>,
}

#[derive(Serialize, Default)]
struct ServerResponse {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    moves: Option<Vec<MoveResult>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    candidates: Option<Vec<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nodes: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    elapsed_ms: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    // eval / play 命令的字段
    #[serde(skip_serializing_if = "Option::is_none")]
    verdict: Option<Verdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    winning_line: Option<Vec<usize>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    threats: Option<Vec<Vec<usize>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    board: Option<String>,
}

impl ServerResponse {
    fn success_moves(moves: Vec<MoveResult>, nodes: u64, elapsed_ms: f64) -> Self {
        Self {
            ok: true,
            moves: Some(moves),
            nodes: Some(nodes),
            elapsed_ms: Some(elapsed_ms),
            ..Default::default()
        }
    }

    fn success_candidates(candidates: Vec<usize>) -> Self {
        Self {
            ok: true,
            candidates: Some(candidates),
            ..Default::default()
        }
    }

    fn success_state(state: &GameState, verdict: Verdict) -> Self {
        Self {
            ok: true,
            verdict: Some(verdict),
            winning_line: state.winning_line.clone(),
            threats: Some(state.threats.iter().flatten().cloned().collect()),
            board: Some(to_notation(state)),
            ..Default::default()
        }
    }

    fn error(msg: &str) -> Self {
        Self {
            ok: false,
            error: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

fn to_move_results(state: &GameState, moves: Vec<ScoredMove>) -> Vec<MoveResult> {
    moves
        .into_iter()
        .map(|sm| {
            let (row, col) = state.board.row_col(sm.cell);
            MoveResult {
                cell: sm.cell,
                row,
                col,
                score: sm.score,
                evaluation: sm.evaluation,
            }
        })
        .collect()
}

fn total_nodes(moves: &[MoveResult]) -> u64 {
    moves
        .iter()
        .filter_map(|mv| mv.evaluation.as_ref())
        .map(|ev| ev.nodes)
        .sum()
}

/// 候选格；剪枝后为空时退回全部空格，与搜索一致
fn candidates_or_empty(state: &GameState) -> Vec<usize> {
    let candidates = candidate_moves(&state.board);
    if candidates.is_empty() {
        state.board.empty_cells()
    } else {
        candidates
    }
}

fn fail(err: impl Display) -> ! {
    eprintln!("Error: {}", err);
    std::process::exit(1);
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Moves { board } => match parse_board(&board) {
            Ok(state) => {
                let candidates = candidates_or_empty(&state);
                println!("Candidate moves ({}):", candidates.len());
                for cell in &candidates {
                    let (row, col) = state.board.row_col(*cell);
                    println!("  {} (row {}, col {})", cell, row, col);
                }
            }
            Err(e) => fail(e),
        },

        Commands::Eval { board, threats, json } => {
            let mut state = parse_board(&board).unwrap_or_else(|e| fail(e));
            let verdict = evaluate_snapshot(&mut state, threats);

            if json {
                let response = ServerResponse::success_state(&state, verdict);
                match serde_json::to_string_pretty(&response) {
                    Ok(text) => println!("{}", text),
                    Err(e) => fail(e),
                }
            } else {
                println!("{}", render(&state));
                println!("\nVerdict: {}", verdict);
                if let Some(line) = &state.winning_line {
                    println!("Winning line: {:?}", line);
                }
                for player in [Player::X, Player::O] {
                    for line in state.threats_of(player) {
                        println!("Threat line ({}): {:?}", player, line);
                    }
                }
            }
        }

        Commands::Best {
            board,
            difficulty,
            n,
            seed,
            json,
        } => {
            let difficulty: Difficulty = difficulty.parse().unwrap_or_else(|e| fail(e));
            let config = AIConfig {
                seed,
                ..Default::default()
            };
            let ai = AIEngine::from_difficulty(difficulty, &config);
            let mut state = parse_board(&board).unwrap_or_else(|e| fail(e));
            // 已终局的快照不再选走法
            evaluate_snapshot(&mut state, false);

            let start = Instant::now();
            let moves = ai.select_moves(&state, n).unwrap_or_else(|e| fail(e));
            let elapsed = start.elapsed().as_secs_f64();
            let moves = to_move_results(&state, moves);
            let nodes = total_nodes(&moves);

            if json {
                let response = MovesResponse {
                    total: moves.len(),
                    moves,
                };
                match serde_json::to_string_pretty(&response) {
                    Ok(text) => println!("{}", text),
                    Err(e) => fail(e),
                }
                eprintln!("Stats: nodes={}, time={:.3}s", nodes, elapsed);
            } else {
                println!("Best moves (difficulty={}, {} to move):", difficulty, state.current);
                for mv in &moves {
                    println!("  {} [row {}, col {}] (score: {:.4})", mv.cell, mv.row, mv.col, mv.score);
                }
                println!("\nStats: nodes={}, time={:.3}s", nodes, elapsed);
            }
        }

        Commands::Play {
            size,
            run_length,
            difficulty,
            seed,
        } => {
            let difficulty: Difficulty = difficulty.parse().unwrap_or_else(|e| fail(e));
            let outcome = GameConfig::new(size, run_length)
                .and_then(|config| GameState::new(config, AiSeat::Both, difficulty))
                .and_then(|mut state| {
                    let controller = TurnController::new(&AIConfig {
                        seed,
                        ..Default::default()
                    });
                    let verdict = controller.start(&mut state)?;
                    Ok((state, verdict))
                });

            match outcome {
                Ok((state, verdict)) => {
                    println!("{}", render(&state));
                    println!("\nResult: {}", verdict);
                    println!("Board: {}", to_notation(&state));
                }
                Err(e) => fail(e),
            }
        }

        Commands::Server => {
            run_server();
        }
    }
}

/// Server 模式主循环
/// 从 stdin 读取 JSON 请求，返回 JSON 响应到 stdout
fn run_server() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        // 空行跳过
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<ServerRequest>(&line) {
            Ok(request) => match request.cmd.as_str() {
                "best" => handle_best_request(&request),
                "moves" => handle_moves_request(&request),
                "eval" => handle_eval_request(&request),
                "play" => handle_play_request(&request),
                "quit" => break,
                _ => ServerResponse::error(&format!("Unknown command: {}", request.cmd)),
            },
            Err(e) => ServerResponse::error(&format!("Invalid JSON: {}", e)),
        };

        match serde_json::to_string(&response) {
            Ok(text) => println!("{}", text),
            Err(e) => log::error!("failed to encode response: {}", e),
        }
        let _ = stdout.flush();
    }
}

fn request_difficulty(request: &ServerRequest) -> Result<Difficulty, EngineError> {
    request.difficulty.as_deref().map_or(Ok(Difficulty::default()), str::parse)
}

/// 处理 best 命令
fn handle_best_request(request: &ServerRequest) -> ServerResponse {
    let n = request.n.unwrap_or(5);
    let difficulty = match request_difficulty(request) {
        Ok(d) => d,
        Err(e) => return ServerResponse::error(&e.to_string()),
    };
    let mut state = match parse_board(&request.board) {
        Ok(s) => s,
        Err(e) => return ServerResponse::error(&e.to_string()),
    };
    evaluate_snapshot(&mut state, false);

    let config = AIConfig {
        seed: request.seed,
        ..Default::default()
    };
    let ai = AIEngine::from_difficulty(difficulty, &config);
    let start = Instant::now();

    match ai.select_moves(&state, n) {
        Ok(moves) => {
            let elapsed = start.elapsed().as_secs_f64();
            let moves = to_move_results(&state, moves);
            let nodes = total_nodes(&moves);
            ServerResponse::success_moves(moves, nodes, elapsed * 1000.0)
        }
        Err(e) => ServerResponse::error(&format!("AI error: {}", e)),
    }
}

/// 处理 moves 命令
fn handle_moves_request(request: &ServerRequest) -> ServerResponse {
    match parse_board(&request.board) {
        Ok(state) => ServerResponse::success_candidates(candidates_or_empty(&state)),
        Err(e) => ServerResponse::error(&e.to_string()),
    }
}

/// 处理 eval 命令
fn handle_eval_request(request: &ServerRequest) -> ServerResponse {
    match parse_board(&request.board) {
        Ok(mut state) => {
            let verdict = evaluate_snapshot(&mut state, request.threats.unwrap_or(false));
            ServerResponse::success_state(&state, verdict)
        }
        Err(e) => ServerResponse::error(&e.to_string()),
    }
}

/// 处理 play 命令
///
/// 带 `cell` 时当前玩家（人类）在该格落子，AI 执另一方应对；
/// 不带时双方都由 AI 走到终局。
fn handle_play_request(request: &ServerRequest) -> ServerResponse {
    match play(request) {
        Ok((state, verdict)) => ServerResponse::success_state(&state, verdict),
        Err(e) => ServerResponse::error(&e.to_string()),
    }
}

fn play(request: &ServerRequest) -> Result<(GameState, Verdict), EngineError> {
    let mut state = parse_board(&request.board)?;
    state.difficulty = request_difficulty(request)?;
    let controller = TurnController::new(&AIConfig {
        seed: request.seed,
        ..Default::default()
    });

    let verdict = match request.cell {
        Some(cell) => {
            let human: Player = state.current;
            state.ai = AiSeat::Only(human.opposite());
            // 已终局的快照上落子会返回 GameOver
            evaluate_snapshot(&mut state, false);
            controller.play_move(&mut state, cell)?
        }
        None => {
            state.ai = AiSeat::Both;
            controller.resume(&mut state)?
        }
    };
    Ok((state, verdict))
}
