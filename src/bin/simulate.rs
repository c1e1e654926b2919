use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use env_logger::Env;
use log::{debug, info};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use twenty48::config::AppConfig;
use twenty48::game::{Board, GameOutcome, Rules, Session};

/// Play 2048 headlessly with uniformly random moves.
#[derive(Parser)]
#[command(name = "simulate", about = "Play random 2048 games and report results")]
struct Cli {
    /// Number of games to play
    #[arg(long, default_value_t = 100)]
    games: usize,

    /// Base seed; game i uses seed + i
    #[arg(long)]
    seed: Option<u64>,

    /// Path to TOML configuration file
    #[arg(long, default_value = "2048.toml")]
    config: PathBuf,

    /// Override the win tile (e.g. 2048 to play until stuck)
    #[arg(long)]
    win_tile: Option<u32>,

    /// Print the final board of every game
    #[arg(long)]
    show_boards: bool,
}

struct GameResult {
    score: u64,
    best_tile: u32,
    moves: usize,
    outcome: GameOutcome,
    board: Board,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    if cli.games == 0 {
        bail!("--games must be at least 1");
    }

    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(win_tile) = cli.win_tile {
        app_config.game.win_tile = win_tile;
    }
    app_config.validate().context("validating configuration")?;

    let rules = app_config.game.rules();
    let base_seed = cli.seed.unwrap_or_else(|| rand::rng().random());
    info!(
        "playing {} games on {}x{} (win tile {}, seed {})",
        cli.games, rules.rows, rules.cols, rules.win_tile, base_seed
    );

    let mut results = Vec::with_capacity(cli.games);
    for i in 0..cli.games {
        let seed = base_seed.wrapping_add(i as u64);
        let result = play_game(rules, seed).with_context(|| format!("playing game {i}"))?;
        println!(
            "game {:>4}: score {:>6}  best {:>5}  moves {:>5}  {:?}",
            i, result.score, result.best_tile, result.moves, result.outcome
        );
        if cli.show_boards {
            println!("{}", result.board);
        }
        results.push(result);
    }

    let total_score: u64 = results.iter().map(|r| r.score).sum();
    let best_tile = results.iter().map(|r| r.best_tile).max().unwrap_or(0);
    let wins = results
        .iter()
        .filter(|r| r.outcome == GameOutcome::Won)
        .count();
    let mean_moves = results.iter().map(|r| r.moves).sum::<usize>() as f64 / results.len() as f64;

    println!("-------------------------------------------");
    println!("Games:       {}", results.len());
    println!("Mean score:  {:.1}", total_score as f64 / results.len() as f64);
    println!("Mean moves:  {:.1}", mean_moves);
    println!("Best tile:   {}", best_tile);
    println!(
        "Wins:        {} ({:.1}%)",
        wins,
        wins as f64 * 100.0 / results.len() as f64
    );
    Ok(())
}

/// Play one game to the end with a seeded RNG picking among legal moves.
fn play_game(rules: Rules, seed: u64) -> Result<GameResult> {
    let mut rng = StdRng::seed_from_u64(seed);
    let spawn_rng = StdRng::seed_from_u64(rng.random());
    let mut session = Session::new(rules, 1, spawn_rng).context("creating board")?;

    let mut moves = 0;
    loop {
        let legal = session.state().legal_directions();
        if legal.is_empty() {
            break;
        }
        let direction = legal[rng.random_range(0..legal.len())];
        session
            .apply(direction)
            .map_err(|e| anyhow::anyhow!("applying {}: {e:?}", direction.name()))?;
        moves += 1;
    }

    let state = session.state();
    let outcome = state
        .outcome()
        .context("game loop ended before the game was over")?;
    debug!("seed {seed}: {outcome:?} after {moves} moves");
    Ok(GameResult {
        score: state.score(),
        best_tile: state.board().max_tile().unwrap_or(0),
        moves,
        outcome,
        board: state.board().clone(),
    })
}
