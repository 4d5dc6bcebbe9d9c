use crossterm::event::{self, Event, KeyCode};
use crossterm::{execute, terminal};
use std::fs::File;
use std::io;
use std::sync::Mutex;
use std::time::Duration;
use tictactoe_minimax::config::AppConfig;
use tictactoe_minimax::core::Player;
use tictactoe_minimax::display::wait_for_key;
use tictactoe_minimax::game::replay::run_replay_selector;
use tictactoe_minimax::game::{append_entry, Game, GameResult, GameView, LogEntry};
use tictactoe_minimax::player::{MinimaxAI, PlayerController, TuiController};
use tictactoe_minimax::selfplay::{run_selfplay, save_stats, summary_lines, SelfPlayConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEBUG_LOG: &str = "tictactoe_debug.log";

fn main() -> anyhow::Result<()> {
    init_tracing()?;
    let config = AppConfig::load_or_default();

    // ターミナル初期化
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen)?;

    let res = run(&config);

    // ターミナル復帰
    execute!(io::stdout(), terminal::LeaveAlternateScreen)?;
    terminal::disable_raw_mode()?;

    res
}

/// The screen is in raw alternate mode, so diagnostics go to a file.
fn init_tracing() -> anyhow::Result<()> {
    let file = File::create(DEBUG_LOG)?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("tictactoe_minimax=info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

fn clear_screen() -> anyhow::Result<()> {
    execute!(
        io::stdout(),
        terminal::Clear(terminal::ClearType::All),
        crossterm::cursor::MoveTo(0, 0)
    )?;
    Ok(())
}

fn run(config: &AppConfig) -> anyhow::Result<()> {
    loop {
        clear_screen()?;
        print!("=== Tic-Tac-Toe: Human vs Minimax AI ===\r\n");
        print!("Cells are numbered 1 to 9:\r\n");
        print!(" 1 | 2 | 3 \r\n");
        print!("---+---+---\r\n");
        print!(" 4 | 5 | 6 \r\n");
        print!("---+---+---\r\n");
        print!(" 7 | 8 | 9 \r\n");

        print!("\r\nSelect mode:\r\n");
        print!("1. Human (X) vs AI (O)\r\n");
        print!("2. AI (X) vs Human (O)\r\n");
        print!("3. Self-play ({} games)\r\n", config.selfplay.games);
        print!("4. Replay logged game\r\n");
        print!("q. Quit\r\n");

        let mode = loop {
            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    match key.code {
                        KeyCode::Char('1') => break '1',
                        KeyCode::Char('2') => break '2',
                        KeyCode::Char('3') => break '3',
                        KeyCode::Char('4') => break '4',
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        _ => {}
                    }
                }
            }
        };

        match mode {
            '1' => run_local(config, Player::X)?,
            '2' => run_local(config, Player::O)?,
            '3' => run_selfplay_mode(config)?,
            _ => run_replay_selector(&config.log_file)?,
        }
    }
}

fn run_local(config: &AppConfig, human_mark: Player) -> anyhow::Result<()> {
    let human = TuiController::new(human_mark, "You");
    let ai = MinimaxAI::with_strategy(human_mark.opponent(), &config.ai.name, config.ai.strategy);

    let human_ref: &dyn PlayerController = &human;
    let ai_ref: &dyn PlayerController = &ai;
    let (x_player, o_player) = match human_mark {
        Player::X => (human_ref, ai_ref),
        Player::O => (ai_ref, human_ref),
    };

    let mut game = Game::with_view(GameView::Interactive {
        think_delay: config.ai.think_delay(),
    });
    let end = game.play(x_player, o_player)?;
    let result = GameResult::from_end(end, human_mark);

    append_entry(&config.log_file, &LogEntry::new(game.history.clone(), result))?;
    info!(
        result = ?result,
        moves = game.history.len(),
        nodes = ai.nodes_evaluated(),
        "game finished"
    );

    game.render_final(result.message())?;
    wait_for_key()?;
    Ok(())
}

fn run_selfplay_mode(config: &AppConfig) -> anyhow::Result<()> {
    clear_screen()?;
    print!(
        "Running {} self-play games ({:?} vs {:?})...\r\n",
        config.selfplay.games, config.ai.strategy, config.selfplay.opponent
    );

    let sp_config = SelfPlayConfig::from_settings(&config.selfplay, config.ai.strategy);
    let stats = run_selfplay(&sp_config)?;

    clear_screen()?;
    for line in summary_lines(&stats) {
        print!("{}\r\n", line);
    }
    if stats.opponent_wins > 0 {
        print!("WARNING: the AI lost {} game(s)\r\n", stats.opponent_wins);
    }

    if config.selfplay.save_stats {
        let path = save_stats(&stats, &config.selfplay.stats_dir)?;
        print!("\r\nSaved stats to {}\r\n", path.display());
    }

    print!("\r\nPress any key to continue.\r\n");
    wait_for_key()?;
    Ok(())
}
