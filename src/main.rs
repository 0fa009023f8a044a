use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use term_snake::game::{Difficulty, GameConfig};
use term_snake::modes::{HumanMode, PlayOptions};
use term_snake::score::DEFAULT_SCORE_FILE;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "term_snake")]
#[command(version, about = "Snake in the terminal with a persisted best score")]
struct Cli {
    /// Player name (prompted for when omitted)
    #[arg(long)]
    name: Option<String>,

    /// Speed of the first run (a menu is shown when omitted)
    #[arg(long)]
    difficulty: Option<DifficultyArg>,

    /// File holding the best score
    #[arg(long, default_value = DEFAULT_SCORE_FILE)]
    score_file: PathBuf,

    /// Log file; the terminal itself is taken by the game
    #[arg(long, default_value = "snake.log")]
    log_file: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
enum DifficultyArg {
    /// 240 ms per move
    Easy,
    /// 180 ms per move
    Medium,
    /// 120 ms per move
    Hard,
}

impl From<DifficultyArg> for Difficulty {
    fn from(arg: DifficultyArg) -> Self {
        match arg {
            DifficultyArg::Easy => Difficulty::Easy,
            DifficultyArg::Medium => Difficulty::Medium,
            DifficultyArg::Hard => Difficulty::Hard,
        }
    }
}

/// Send logs to `path`, filtered by `RUST_LOG` (default `info`). Logging is
/// dropped if the file cannot be created.
fn init_logging(path: &Path) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false);

    match File::create(path) {
        Ok(file) => builder.with_writer(Mutex::new(file)).init(),
        Err(_) => builder.with_writer(std::io::sink).init(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_file);

    let options = PlayOptions {
        player: cli.name,
        difficulty: cli.difficulty.map(Difficulty::from),
        score_file: cli.score_file,
        game_config: GameConfig::default(),
    };

    let mut human_mode = HumanMode::new(options);
    human_mode.run().await?;

    Ok(())
}
