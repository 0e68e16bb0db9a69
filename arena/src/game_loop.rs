//! A single game between two agents.

use std::io::Write;

use anyhow::{bail, Context, Result};
use engine_core::{Game, GameStatus, Player};
use tracing::{debug, info};

use crate::agent::Agent;

/// Outcome of a finished match.
#[derive(Debug, Clone)]
pub struct MatchRecord<A> {
    pub status: GameStatus,
    pub moves: Vec<A>,
}

impl<A> MatchRecord<A> {
    pub fn winner(&self) -> Option<Player> {
        self.status.winner()
    }

    pub fn plies(&self) -> u32 {
        self.moves.len() as u32
    }
}

/// Plays one game from the initial position, X (player one) first.
pub struct Match<'a, G: Game> {
    game: &'a G,
    state: G::State,
    moves: Vec<G::Action>,
}

impl<'a, G: Game> Match<'a, G> {
    pub fn new(game: &'a G) -> Self {
        Self {
            game,
            state: game.initial_state(),
            moves: Vec::new(),
        }
    }

    /// Current position.
    pub fn state(&self) -> &G::State {
        &self.state
    }

    /// Alternate turns until the game ends, writing the board and result to `out`.
    ///
    /// `agents` is indexed by [`Player::index`].
    pub fn play(
        mut self,
        agents: &mut [Agent; 2],
        out: &mut dyn Write,
    ) -> Result<MatchRecord<G::Action>> {
        let meta = self.game.metadata();
        info!(
            game = %meta.display_name,
            x = %agents[0].kind(),
            o = %agents[1].kind(),
            "Match started"
        );

        loop {
            write!(out, "{}", self.game.render(&self.state))?;

            let status = self.game.status(&self.state);
            if status.is_terminal() {
                let announcement = match status.winner() {
                    Some(player) => format!("{} wins", meta.player_name(player)),
                    None => "Draw".to_string(),
                };
                writeln!(out, "{}", announcement)?;
                info!(result = %announcement, plies = self.moves.len(), "Match finished");

                return Ok(MatchRecord {
                    status,
                    moves: self.moves,
                });
            }

            let player = self.game.to_move(&self.state);
            writeln!(out, "{}'s turn", meta.player_name(player))?;

            let action = agents[player.index()]
                .decide_move(self.game, &self.state)
                .with_context(|| format!("{} failed to choose a move", meta.player_name(player)))?;
            self.commit(player, action)?;
            writeln!(out, "{} plays {}", meta.player_name(player), action)?;
        }
    }

    /// Apply a decided move after checking it against the rules.
    fn commit(&mut self, player: Player, action: G::Action) -> Result<()> {
        if !self.game.legal_moves(&self.state).contains(&action) {
            bail!("{:?} chose illegal move {}", player, action);
        }

        self.state = self.game.apply_move(&self.state, action);
        self.moves.push(action);
        debug!(player = ?player, action = %action, ply = self.moves.len(), "Move committed");
        Ok(())
    }
}
