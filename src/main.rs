use std::io;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use connect_four::app::App;
use connect_four::config::AppConfig;
use connect_four::game::RandomCoin;
use connect_four::players::PlayersDetails;
use connect_four::store::FileStore;
use connect_four::timer::ClockTimer;
use connect_four::ui::TerminalApp;

/// Play Connect Four in the terminal. Progress is saved after every move.
#[derive(Parser)]
#[command(name = "connect-four", about = "Play Connect Four with resumable games")]
struct Cli {
    /// Path to TOML configuration file
    #[arg(long, default_value = "connect_four.toml")]
    config: PathBuf,

    /// Override the directory where games and scores are stored
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Register both players before playing
    #[arg(long, num_args = 4, value_names = ["NAME", "AGE", "NAME", "AGE"])]
    players: Option<Vec<String>>,

    /// Seed for choosing who opens a fresh game
    #[arg(long)]
    seed: Option<u64>,

    /// Append logs to this file (the terminal belongs to the UI)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let mut config = AppConfig::load_or_default(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    if let Some(dir) = &cli.data_dir {
        config.storage.data_dir = dir.clone();
    }

    let store = FileStore::open(&config.storage.data_dir).with_context(|| {
        format!("opening data directory {}", config.storage.data_dir.display())
    })?;
    let mut coin = match cli.seed {
        Some(seed) => RandomCoin::seeded(seed),
        None => RandomCoin::new(),
    };

    let mut app = App::open(config.game, store, ClockTimer::new(), &mut coin);
    if let Some(args) = &cli.players {
        app.register_players(parse_players(args)?);
    }

    run(TerminalApp::new(app, coin))?;
    Ok(())
}

fn init_logging(cli: &Cli) -> Result<()> {
    let log_level = match cli.verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let builder = tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_ansi(false);

    // The UI owns the terminal; without a log file, logs are dropped.
    match &cli.log_file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder.with_writer(std::sync::Mutex::new(file)).init();
        }
        None => builder.with_writer(io::sink).init(),
    }
    Ok(())
}

fn parse_players(args: &[String]) -> Result<PlayersDetails> {
    let [one, one_age, two, two_age] = args else {
        bail!("--players takes NAME AGE NAME AGE");
    };
    let age = |raw: &str| {
        raw.parse::<u32>()
            .with_context(|| format!("invalid player age '{raw}'"))
    };
    Ok(PlayersDetails::new(
        one.as_str(),
        age(one_age.as_str())?,
        two.as_str(),
        age(two_age.as_str())?,
    ))
}

fn run(mut app: TerminalApp<FileStore, ClockTimer, RandomCoin>) -> io::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal, even on error
    let _ = disable_raw_mode();
    let _ = execute!(terminal.backend_mut(), LeaveAlternateScreen);
    let _ = terminal.show_cursor();

    res
}
