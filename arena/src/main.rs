//! Arena - tic-tac-toe matches between human, random and MCTS agents
//!
//! A short-lived process that:
//! 1. Resolves settings from CLI flags, `TTT_*` env vars and config.toml
//! 2. Builds one agent per side
//! 3. Plays the requested number of games on the terminal
//! 4. Logs a summary and optionally writes it as JSON

use anyhow::Result;
use clap::Parser;
use engine_core::Game;
use std::io::Write;
use tracing::{error, info};

mod agent;
mod config;
mod game_loop;
mod stats;

use crate::agent::Agent;
use crate::config::Config;
use crate::game_loop::Match;
use crate::stats::MatchStats;

fn init_tracing(level: &str) -> Result<()> {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Logs go to stderr so they never interleave with the board on stdout
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    Ok(())
}

/// Play `games` games between `agents`, writing boards and results to `out`.
fn run_matches<G: Game>(
    game: &G,
    agents: &mut [Agent; 2],
    games: u32,
    stats: &mut MatchStats,
    out: &mut dyn Write,
) -> Result<()> {
    for number in 1..=games {
        if games > 1 {
            writeln!(out, "=== Game {} of {} ===", number, games)?;
        }

        let record = Match::new(game).play(agents, out)?;
        stats.record(record.status, record.plies());
        info!(game = number, plies = record.plies(), "Game recorded");
    }

    Ok(())
}

fn main() -> Result<()> {
    // Parse configuration
    let config = Config::parse();

    // Validate configuration
    config.validate()?;

    // Initialize tracing
    init_tracing(&config.log_level)?;
    info!(log_level = %config.log_level, "Tracing initialized");

    let search = config.mcts_config();
    info!(
        player_x = %config.player_x,
        player_o = %config.player_o,
        games = config.games,
        iterations = search.num_iterations,
        prune_losing_moves = search.prune_losing_moves,
        "Starting arena"
    );

    let game = games_tictactoe::TicTacToe::new();
    let mut agents = [
        Agent::from_kind(config.player_x_kind()?, &search, config.seed_for(0)),
        Agent::from_kind(config.player_o_kind()?, &search, config.seed_for(1)),
    ];
    let mut stats = MatchStats::new(&config.player_x, &config.player_o);

    let run_result = run_matches(
        &game,
        &mut agents,
        config.games,
        &mut stats,
        &mut std::io::stdout(),
    );

    if config.games > 1 {
        let snapshot = stats.snapshot();
        println!(
            "X ({}) wins: {}, O ({}) wins: {}, draws: {}",
            snapshot.player_x, snapshot.x_wins, snapshot.player_o, snapshot.o_wins, snapshot.draws
        );
    }
    stats.log_summary();

    if let Some(path) = &config.stats_path {
        stats.write_snapshot(path)?;
        info!(path = %path.display(), "Wrote match stats");
    }

    match run_result {
        Ok(()) => {
            info!("Arena completed successfully");
            Ok(())
        }
        Err(e) => {
            error!("Arena failed: {:#}", e);
            Err(e)
        }
    }
}
