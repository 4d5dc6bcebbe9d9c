//! End-to-end tests for the game layer: full games through `Game::play`, the
//! JSON-lines log, replay reconstruction, config loading and self-play.

use std::path::PathBuf;
use tictactoe_minimax::config::{AppConfig, OpponentKind};
use tictactoe_minimax::core::{Board, Move, Player};
use tictactoe_minimax::game::replay::{recent_entries, ReplayViewer};
use tictactoe_minimax::game::{
    append_entry, read_log, Game, GameEnd, GameResult, LogEntry, MoveRecord,
};
use tictactoe_minimax::logic::{is_game_over, winner};
use tictactoe_minimax::player::ai::SearchStrategy;
use tictactoe_minimax::player::{MinimaxAI, PlayerController};
use tictactoe_minimax::selfplay::{run_selfplay, save_stats, SelfPlayConfig, SelfPlayStats};
use tictactoe_minimax::best_move;

/// Plays the first cell of `prefs` that is still legal.
struct Scripted {
    prefs: Vec<usize>,
    human: bool,
}

impl Scripted {
    fn new(prefs: &[usize]) -> Self {
        Self {
            prefs: prefs.to_vec(),
            human: false,
        }
    }

    fn human(prefs: &[usize]) -> Self {
        Self {
            prefs: prefs.to_vec(),
            human: true,
        }
    }
}

impl PlayerController for Scripted {
    fn choose_move(&self, _board: &Board, legal_moves: &[Move]) -> Option<Move> {
        self.prefs
            .iter()
            .find_map(|&i| legal_moves.iter().copied().find(|m| m.index() == i))
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn is_human(&self) -> bool {
        self.human
    }
}

/// Scratch path unique to this test process.
fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("tictactoe-it-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    let _ = std::fs::remove_file(&path);
    path
}

fn record(player: Player, pos: usize) -> MoveRecord {
    MoveRecord {
        player,
        pos: Move::new(pos).unwrap(),
    }
}

fn positions(game: &Game) -> Vec<usize> {
    game.history.iter().map(|r| r.pos.index()).collect()
}

// ---------------------------------------------------------------------------
// Game loop
// ---------------------------------------------------------------------------

#[test]
fn game_ends_on_row_win() {
    let mut game = Game::new();
    let end = game
        .play(&Scripted::new(&[0, 1, 2]), &Scripted::new(&[3, 4, 5]))
        .unwrap();
    assert_eq!(end, GameEnd::Winner(Player::X));
    assert_eq!(positions(&game), vec![0, 3, 1, 4, 2]);
    assert_eq!(game.history[1].player, Player::O);
}

#[test]
fn game_ends_in_draw_on_full_board() {
    let mut game = Game::new();
    let end = game
        .play(&Scripted::new(&[0, 2, 3, 7, 8]), &Scripted::new(&[1, 4, 5, 6]))
        .unwrap();
    assert_eq!(end, GameEnd::Draw);
    assert_eq!(game.history.len(), 9);
    assert_eq!(game.board.to_string(), "XOX/XOO/OXX");
}

#[test]
fn human_without_move_aborts() {
    let mut game = Game::new();
    let end = game
        .play(&Scripted::human(&[4]), &Scripted::new(&[0]))
        .unwrap();
    assert_eq!(end, GameEnd::Aborted);
    assert_eq!(positions(&game), vec![4, 0]);
    assert_eq!(GameResult::from_end(end, Player::X), GameResult::Aborted);
}

#[test]
fn silent_ai_falls_back_to_preferred_cells() {
    // an empty script never picks anything
    let mut game = Game::new();
    let end = game
        .play(&Scripted::new(&[]), &Scripted::new(&[0, 1, 3]))
        .unwrap();
    assert_eq!(positions(&game), vec![4, 0, 2, 1, 6]);
    assert_eq!(end, GameEnd::Winner(Player::X));
}

#[test]
fn minimax_punishes_blunders() {
    // X ignores the O threat on the middle column
    let human = Scripted::human(&[0, 8, 6, 2, 3, 5]);
    let ai = MinimaxAI::new(Player::O, "AI");
    let mut game = Game::new();
    let end = game.play(&human, &ai).unwrap();
    assert_eq!(end, GameEnd::Winner(Player::O));
    assert_eq!(GameResult::from_end(end, Player::X), GameResult::AiWin);
}

#[test]
fn illegal_controller_move_is_an_error() {
    struct Stubborn;
    impl PlayerController for Stubborn {
        fn choose_move(&self, _board: &Board, _legal_moves: &[Move]) -> Option<Move> {
            Some(Move::CENTER)
        }
        fn name(&self) -> &str {
            "stubborn"
        }
    }

    let mut game = Game::new();
    assert!(game.play(&Stubborn, &Stubborn).is_err());
    assert_eq!(game.history.len(), 1);
}

// ---------------------------------------------------------------------------
// The AI never loses
// ---------------------------------------------------------------------------

/// Walks every game in which the opponent tries all replies and the AI
/// answers with `best_move`. Returns the number of finished games.
fn explore(board: &mut Board, to_move: Player, ai: Player) -> usize {
    if is_game_over(board) {
        assert_ne!(winner(board), Some(ai.opponent()), "AI lost: {}", board);
        return 1;
    }

    if to_move == ai {
        let mv = best_move(board, ai).expect("unfinished board has a move");
        board.apply(mv, ai);
        let n = explore(board, ai.opponent(), ai);
        board.undo(mv);
        n
    } else {
        let mut n = 0;
        for mv in board.available_moves() {
            board.apply(mv, to_move);
            n += explore(board, ai, ai);
            board.undo(mv);
        }
        n
    }
}

#[test]
fn ai_as_o_never_loses() {
    let games = explore(&mut Board::new(), Player::X, Player::O);
    assert!(games > 0);
}

#[test]
fn ai_as_x_never_loses() {
    let games = explore(&mut Board::new(), Player::X, Player::X);
    assert!(games > 0);
}

// ---------------------------------------------------------------------------
// Game log
// ---------------------------------------------------------------------------

#[test]
fn log_lines_have_expected_shape() {
    let path = scratch("shape.jsonl");
    let entry = LogEntry::new(vec![record(Player::X, 4)], GameResult::AiWin);
    append_entry(&path, &entry).unwrap();

    let raw = std::fs::read_to_string(&path).unwrap();
    assert_eq!(raw.lines().count(), 1);
    assert!(raw.contains(r#""moves":[{"player":"X","pos":4}]"#), "{}", raw);
    assert!(raw.contains(r#""result":"ai_win""#), "{}", raw);
    assert!(entry.timestamp.ends_with('Z'));
}

#[test]
fn log_appends_and_reads_back_in_order() {
    let path = scratch("roundtrip.jsonl");
    let first = LogEntry::new(vec![record(Player::X, 0), record(Player::O, 4)], GameResult::Aborted);
    let second = LogEntry::new(vec![], GameResult::Draw);
    append_entry(&path, &first).unwrap();
    append_entry(&path, &second).unwrap();

    assert_eq!(read_log(&path).unwrap(), vec![first, second]);
}

#[test]
fn missing_log_reads_empty() {
    let path = scratch("never-written.jsonl");
    assert!(read_log(&path).unwrap().is_empty());
}

#[test]
fn malformed_log_line_reports_line_number() {
    let path = scratch("malformed.jsonl");
    append_entry(&path, &LogEntry::new(vec![], GameResult::Draw)).unwrap();
    let mut raw = std::fs::read_to_string(&path).unwrap();
    raw.push_str("not json\n");
    std::fs::write(&path, raw).unwrap();

    let err = read_log(&path).unwrap_err();
    assert!(err.to_string().contains(":2:"), "{}", err);
}

#[test]
fn result_labels() {
    let labels: Vec<String> = [
        GameResult::HumanWin,
        GameResult::AiWin,
        GameResult::Draw,
        GameResult::Aborted,
    ]
    .iter()
    .map(|r| serde_json::to_string(r).unwrap())
    .collect();
    assert_eq!(labels, vec!["\"human_win\"", "\"ai_win\"", "\"draw\"", "\"aborted\""]);
    assert_eq!(
        GameResult::from_end(GameEnd::Winner(Player::O), Player::O),
        GameResult::HumanWin
    );
}

// ---------------------------------------------------------------------------
// Replay
// ---------------------------------------------------------------------------

#[test]
fn replay_rebuilds_every_position() {
    let entry = LogEntry::new(
        vec![record(Player::X, 0), record(Player::O, 4), record(Player::X, 8)],
        GameResult::Aborted,
    );
    let mut viewer = ReplayViewer::new(entry).unwrap();
    assert_eq!(viewer.boards().len(), 4);
    assert_eq!(viewer.boards()[3].to_string(), "X../.O./..X");

    viewer.back();
    assert!(viewer.current_board().is_empty());
    for _ in 0..10 {
        viewer.forward();
    }
    assert_eq!(viewer.current_board().move_count(), 3);
}

#[test]
fn replay_rejects_reused_cell() {
    let entry = LogEntry::new(
        vec![record(Player::X, 4), record(Player::O, 4)],
        GameResult::Aborted,
    );
    let err = ReplayViewer::new(entry).err().expect("duplicate cell rejected");
    assert!(err.to_string().contains("#2"), "{}", err);
}

#[test]
fn recent_entries_newest_first() {
    let entries: Vec<LogEntry> = (0..12)
        .map(|i| LogEntry {
            timestamp: format!("t{}", i),
            moves: vec![],
            result: GameResult::Draw,
        })
        .collect();
    let recent = recent_entries(&entries);
    assert_eq!(recent.len(), 9);
    assert_eq!(recent[0].timestamp, "t11");
    assert_eq!(recent[8].timestamp, "t3");
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[test]
fn partial_config_keeps_defaults() {
    let path = scratch("partial_config.json");
    std::fs::write(&path, r#"{"ai": {"strategy": "alpha_beta"}, "selfplay": {"games": 8}}"#).unwrap();

    let config = AppConfig::load_from(&path).unwrap();
    let defaults = AppConfig::default();
    assert_eq!(config.ai.strategy, SearchStrategy::AlphaBeta);
    assert_eq!(config.ai.name, defaults.ai.name);
    assert_eq!(config.ai.think_delay_ms, 600);
    assert_eq!(config.selfplay.games, 8);
    assert_eq!(config.selfplay.opponent, OpponentKind::Random);
    assert_eq!(config.log_file, defaults.log_file);
}

#[test]
fn broken_config_is_an_error() {
    let path = scratch("broken_config.json");
    std::fs::write(&path, "{ ai: ").unwrap();
    assert!(AppConfig::load_from(&path).is_err());
}

// ---------------------------------------------------------------------------
// Self-play
// ---------------------------------------------------------------------------

#[test]
fn selfplay_against_random_never_loses() {
    let config = SelfPlayConfig {
        num_games: 20,
        opponent: OpponentKind::Random,
        strategy: SearchStrategy::AlphaBeta,
    };
    let stats = run_selfplay(&config).unwrap();
    assert_eq!(stats.total_games, 20);
    assert_eq!(stats.opponent_wins, 0);
    assert_eq!(stats.ai_wins + stats.draws, 20);
    assert!(stats.avg_moves >= 5.0);

    let x_games = stats.games.iter().filter(|g| g.ai_mark == Player::X).count();
    assert_eq!(x_games, 10);
}

#[test]
fn selfplay_between_minimax_players_draws() {
    let config = SelfPlayConfig {
        num_games: 4,
        opponent: OpponentKind::Minimax,
        strategy: SearchStrategy::ParallelRoot,
    };
    let stats = run_selfplay(&config).unwrap();
    assert_eq!(stats.draws, 4);
    assert!(stats.games.iter().all(|g| g.moves == 9));
}

#[test]
fn selfplay_stats_saved_as_json() {
    let mut stats = SelfPlayStats::new(OpponentKind::Random, SearchStrategy::Minimax);
    let config = SelfPlayConfig {
        num_games: 2,
        opponent: OpponentKind::Random,
        strategy: SearchStrategy::Minimax,
    };
    for game in run_selfplay(&config).unwrap().games {
        stats.add_result(game);
    }

    let dir = scratch("stats");
    let path = save_stats(&stats, &dir).unwrap();
    let saved: SelfPlayStats = serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap();
    assert_eq!(saved.total_games, 2);
    assert_eq!(saved.games.len(), 2);
}
