//! Match statistics tracking and persistence.
//!
//! Tallies outcomes across a run of games and optionally writes them to a
//! JSON file for later inspection.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

use anyhow::{Context, Result};
use engine_core::{winner_of, GameStatus, Player};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Aggregated results of a run of matches.
#[derive(Debug)]
pub struct MatchStats {
    games: u32,
    x_wins: u32,
    o_wins: u32,
    draws: u32,
    total_plies: u64,
    start_time: Instant,
    player_x: String,
    player_o: String,
}

/// Serializable stats for JSON output.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct MatchStatsSnapshot {
    pub player_x: String,
    pub player_o: String,
    pub games: u32,
    pub x_wins: u32,
    pub o_wins: u32,
    pub draws: u32,
    pub avg_game_length: f64,
    pub runtime_seconds: f64,
    pub timestamp: u64,
}

impl MatchStats {
    /// Create a new tracker for the given agent names.
    pub fn new(player_x: &str, player_o: &str) -> Self {
        Self {
            games: 0,
            x_wins: 0,
            o_wins: 0,
            draws: 0,
            total_plies: 0,
            start_time: Instant::now(),
            player_x: player_x.to_string(),
            player_o: player_o.to_string(),
        }
    }

    /// Record a finished game.
    /// Unfinished games are ignored.
    pub fn record(&mut self, status: GameStatus, plies: u32) {
        match winner_of(status) {
            Some(Some(Player::One)) => self.x_wins += 1,
            Some(Some(Player::Two)) => self.o_wins += 1,
            Some(None) => self.draws += 1,
            None => {
                warn!(plies, "Ignoring unfinished game");
                return;
            }
        }

        self.games += 1;
        self.total_plies += plies as u64;
    }

    /// Get a snapshot of current stats.
    pub fn snapshot(&self) -> MatchStatsSnapshot {
        let avg_game_length = if self.games > 0 {
            self.total_plies as f64 / self.games as f64
        } else {
            0.0
        };

        MatchStatsSnapshot {
            player_x: self.player_x.clone(),
            player_o: self.player_o.clone(),
            games: self.games,
            x_wins: self.x_wins,
            o_wins: self.o_wins,
            draws: self.draws,
            avg_game_length,
            runtime_seconds: self.start_time.elapsed().as_secs_f64(),
            timestamp: std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_secs())
                .unwrap_or(0),
        }
    }

    /// Log a one-line summary of the run.
    pub fn log_summary(&self) {
        let snapshot = self.snapshot();
        info!(
            games = snapshot.games,
            x_wins = snapshot.x_wins,
            o_wins = snapshot.o_wins,
            draws = snapshot.draws,
            avg_game_length = snapshot.avg_game_length,
            "Run complete: X ({}) vs O ({})",
            snapshot.player_x,
            snapshot.player_o
        );
    }

    /// Write stats to a JSON file (write-then-rename).
    pub fn write_snapshot(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.snapshot())
            .context("Failed to serialize match stats")?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let temp_path = path.with_extension("json.tmp");
        let mut file = fs::File::create(&temp_path)
            .with_context(|| format!("Failed to create {}", temp_path.display()))?;
        file.write_all(json.as_bytes())
            .with_context(|| format!("Failed to write {}", temp_path.display()))?;

        if let Err(e) = fs::rename(&temp_path, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e)
                .with_context(|| format!("Failed to rename stats file to {}", path.display()));
        }

        debug!("Wrote match stats to {}", path.display());
        Ok(())
    }
}
