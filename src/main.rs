use std::fs::File;
use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use env_logger::{Env, Target};
use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};

use twenty48::config::AppConfig;
use twenty48::game::Session;
use twenty48::store::SaveStore;
use twenty48::ui::App;

/// Play 2048 in the terminal.
#[derive(Parser)]
#[command(name = "twenty48", about = "Play 2048 in the terminal")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "2048.toml")]
    config: PathBuf,

    /// Override number of board rows
    #[arg(long)]
    rows: Option<usize>,

    /// Override number of board columns
    #[arg(long)]
    cols: Option<usize>,

    /// Override the save file location
    #[arg(long)]
    save: Option<PathBuf>,

    /// Do not load or write a save file
    #[arg(long)]
    no_save: bool,

    /// Delete the existing save file and start a new game
    #[arg(long)]
    fresh: bool,

    /// Seed the tile spawner for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Write log output to this file (the terminal is busy with the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Print the default configuration as TOML and exit
    #[arg(long)]
    print_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.print_config {
        print!("{}", AppConfig::default_toml());
        return Ok(());
    }

    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("creating log file {}", path.display()))?;
        env_logger::Builder::from_env(Env::default().default_filter_or("info"))
            .target(Target::Pipe(Box::new(file)))
            .init();
    }

    // Load configuration
    let mut app_config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;

    // Apply CLI overrides
    if let Some(rows) = cli.rows {
        app_config.game.rows = rows;
    }
    if let Some(cols) = cli.cols {
        app_config.game.cols = cols;
    }
    if let Some(save) = cli.save {
        app_config.store.save_path = save;
    }
    app_config.validate().context("validating configuration")?;

    let store = if cli.no_save {
        None
    } else {
        Some(SaveStore::new(app_config.store.save_path.clone()))
    };

    if cli.fresh {
        if let Some(store) = &store {
            store
                .clear()
                .with_context(|| format!("removing save file {}", store.path().display()))?;
            info!("cleared save file {}", store.path().display());
        }
    }

    let rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let rules = app_config.game.rules();
    let history_limit = app_config.game.history_limit;
    let session = match &store {
        Some(store) => store
            .resume_session(rules, history_limit, rng)
            .context("creating board")?,
        None => Session::new(rules, history_limit, rng).context("creating board")?,
    };

    // With autosave off the save is read at startup but never written
    let store = store.filter(|_| app_config.store.autosave);
    let mut app = App::new(session, store);
    run(&mut app).context("running terminal UI")
}

fn run(app: &mut App) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal — always runs, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
