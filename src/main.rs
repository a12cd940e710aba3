use anyhow::{Context, Result};
use clap::Parser;
use simplelog::{Config as LogConfig, LevelFilter, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

use snake_tui::game::{Difficulty, GameConfig};
use snake_tui::modes::PlayMode;
use snake_tui::score::JsonScoreStore;

#[derive(Parser)]
#[command(name = "snake_tui")]
#[command(version, about = "Snake on a toroidal grid, played in the terminal")]
struct Cli {
    /// Grid dimension; the board is square
    #[arg(long, default_value = "20")]
    grid_size: usize,

    /// Speed preset
    #[arg(long, value_enum, default_value = "normal")]
    difficulty: Difficulty,

    /// Where the high score is stored
    #[arg(long, default_value = "snake_high_score.json")]
    score_file: PathBuf,

    /// Where diagnostic logging goes
    #[arg(long, default_value = "snake_tui.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Logging goes to a file; the terminal belongs to the game
    WriteLogger::init(
        LevelFilter::Info,
        LogConfig::default(),
        File::create(&cli.log_file)
            .with_context(|| format!("Failed to create log file {:?}", cli.log_file))?,
    )
    .context("Failed to initialize logger")?;

    let config = GameConfig::new(cli.grid_size);
    let store = Box::new(JsonScoreStore::new(cli.score_file));

    let mut play_mode = PlayMode::new(config, cli.difficulty, store);
    play_mode.run().await
}
