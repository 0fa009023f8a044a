//! Best-score persistence
//!
//! The record is a single line, `<player> <score> <timestamp>`, written only
//! when a run beats the stored best. Every failure here is logged and
//! swallowed; callers always get a usable [`BestScore`].

use anyhow::{Context, Result, bail};
use chrono::Local;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Default location of the record, relative to the working directory
pub const DEFAULT_SCORE_FILE: &str = "best_score.txt";

/// Player name used when no record exists
pub const UNKNOWN_PLAYER: &str = "Unknown";

const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M";

/// The best run recorded so far
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BestScore {
    pub player: String,
    pub score: u32,
    /// When the record was set, as written in the file
    pub achieved_at: Option<String>,
}

impl Default for BestScore {
    fn default() -> Self {
        Self {
            player: UNKNOWN_PLAYER.to_string(),
            score: 0,
            achieved_at: None,
        }
    }
}

impl BestScore {
    /// Parse a record line. The first token is the player; a second token
    /// that is not a number counts as a score of 0; the rest is the
    /// timestamp.
    pub fn parse_line(line: &str) -> Result<Self> {
        let mut tokens = line.split_whitespace();
        let Some(player) = tokens.next() else {
            bail!("best score record is empty");
        };
        let score = tokens
            .next()
            .and_then(|token| token.parse::<u32>().ok())
            .unwrap_or(0);
        let rest: Vec<&str> = tokens.collect();
        let achieved_at = (!rest.is_empty()).then(|| rest.join(" "));

        Ok(Self {
            player: player.to_string(),
            score,
            achieved_at,
        })
    }

    /// Render the record line, without the trailing newline
    pub fn to_line(&self) -> String {
        let player = record_name(&self.player);
        match &self.achieved_at {
            Some(at) => format!("{} {} {}", player, self.score, at),
            None => format!("{} {}", player, self.score),
        }
    }
}

/// Names are a single token in the file; inner whitespace becomes `_`.
fn record_name(player: &str) -> String {
    let name = player.split_whitespace().collect::<Vec<_>>().join("_");
    if name.is_empty() {
        UNKNOWN_PLAYER.to_string()
    } else {
        name
    }
}

/// Reads and writes the best-score file
#[derive(Debug, Clone)]
pub struct ScoreStore {
    path: PathBuf,
}

impl Default for ScoreStore {
    fn default() -> Self {
        Self::new(DEFAULT_SCORE_FILE)
    }
}

impl ScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the stored best. A missing or unreadable file yields the default
    /// record.
    pub fn load_best(&self) -> BestScore {
        if !self.path.exists() {
            info!(path = %self.path.display(), "no best score file found, using defaults");
            return BestScore::default();
        }

        match self.try_load() {
            Ok(best) => {
                debug!(player = %best.player, score = best.score, "loaded best score");
                best
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = ?err, "failed to load best score, using defaults");
                BestScore::default()
            }
        }
    }

    fn try_load(&self) -> Result<BestScore> {
        let text = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read {:?}", self.path))?;
        let line = text.lines().next().unwrap_or_default();
        BestScore::parse_line(line).with_context(|| format!("Malformed record in {:?}", self.path))
    }

    /// Overwrite the record. Failures are logged and reported as `false`.
    pub fn save_best(&self, player: &str, score: u32, timestamp: &str) -> bool {
        let record = BestScore {
            player: player.to_string(),
            score,
            achieved_at: Some(timestamp.to_string()),
        };

        match self.try_save(&record) {
            Ok(()) => {
                info!(player = %record.player, score, "saved new best score");
                true
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = ?err, "failed to save best score");
                false
            }
        }
    }

    fn try_save(&self, record: &BestScore) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {:?}", parent))?;
        }

        fs::write(&self.path, format!("{}\n", record.to_line()))
            .with_context(|| format!("Failed to write {:?}", self.path))
    }

    /// Compare a finished run with `current` and persist it if it is higher.
    /// Returns the best score after the run; it is updated in memory even
    /// when writing the file fails.
    pub fn record_run(&self, current: &BestScore, player: &str, score: u32) -> BestScore {
        if score <= current.score {
            return current.clone();
        }

        let timestamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        self.save_best(player, score, &timestamp);

        BestScore {
            player: record_name(player),
            score,
            achieved_at: Some(timestamp),
        }
    }
}
