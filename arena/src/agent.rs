//! Move-choosing agents for the arena.
//!
//! Every participant in a match is an [`Agent`]. The set of agents is closed,
//! so dispatch is a plain `match` rather than a trait object.

use std::fmt;
use std::io::{BufRead, Write};
use std::str::FromStr;

use anyhow::{anyhow, bail, Context, Result};
use engine_core::Game;
use mcts::{run_mcts, MctsConfig};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use tracing::debug;

/// Which kind of agent plays a side, as named in config and on the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgentKind {
    Human,
    Random,
    Mcts,
}

impl FromStr for AgentKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "human" => Ok(AgentKind::Human),
            "random" => Ok(AgentKind::Random),
            "mcts" | "ai" => Ok(AgentKind::Mcts),
            other => Err(anyhow!(
                "unknown agent kind '{}', expected one of human, random, mcts",
                other
            )),
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AgentKind::Human => "human",
            AgentKind::Random => "random",
            AgentKind::Mcts => "mcts",
        };
        f.write_str(name)
    }
}

/// Build an RNG from a seed; 0 means "seed from entropy".
pub fn make_rng(seed: u64) -> ChaCha20Rng {
    if seed == 0 {
        ChaCha20Rng::from_entropy()
    } else {
        ChaCha20Rng::seed_from_u64(seed)
    }
}

/// A match participant.
pub enum Agent {
    Human(HumanAgent),
    Random(RandomAgent),
    Search(SearchAgent),
}

impl Agent {
    /// Build an agent of the given kind. Human agents talk over stdin/stdout.
    pub fn from_kind(kind: AgentKind, config: &MctsConfig, seed: u64) -> Self {
        match kind {
            AgentKind::Human => Agent::Human(HumanAgent::stdio()),
            AgentKind::Random => Agent::Random(RandomAgent::new(make_rng(seed))),
            AgentKind::Mcts => Agent::Search(SearchAgent::new(config.clone(), make_rng(seed))),
        }
    }

    pub fn kind(&self) -> AgentKind {
        match self {
            Agent::Human(_) => AgentKind::Human,
            Agent::Random(_) => AgentKind::Random,
            Agent::Search(_) => AgentKind::Mcts,
        }
    }

    /// Choose a move for the side to move in `state`.
    pub fn decide_move<G: Game>(&mut self, game: &G, state: &G::State) -> Result<G::Action> {
        match self {
            Agent::Human(agent) => agent.decide_move(game, state),
            Agent::Random(agent) => agent.decide_move(game, state),
            Agent::Search(agent) => agent.decide_move(game, state),
        }
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Agent").field(&self.kind()).finish()
    }
}

/// Reads moves typed by a person, re-prompting until one is legal.
pub struct HumanAgent {
    input: Box<dyn BufRead>,
    output: Box<dyn Write>,
}

impl HumanAgent {
    pub fn new(input: Box<dyn BufRead>, output: Box<dyn Write>) -> Self {
        Self { input, output }
    }

    /// Agent bound to the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(
            Box::new(std::io::BufReader::new(std::io::stdin())),
            Box::new(std::io::stdout()),
        )
    }

    pub fn decide_move<G: Game>(&mut self, game: &G, state: &G::State) -> Result<G::Action> {
        let legal = game.legal_moves(state);
        if legal.is_empty() {
            bail!("no legal moves to choose from");
        }

        let mut line = String::new();
        loop {
            write!(self.output, "Enter your move as 'row col' > ")?;
            self.output.flush()?;

            line.clear();
            let read = self
                .input
                .read_line(&mut line)
                .context("Failed to read move")?;
            if read == 0 {
                bail!("input closed before a move was entered");
            }

            let action = match game.decode_action(&line) {
                Ok(action) => action,
                Err(e) => {
                    writeln!(self.output, "{}. Enter two numbers, e.g. '1 2'.", e)?;
                    continue;
                }
            };

            if !legal.contains(&action) {
                writeln!(self.output, "{} is not a valid move!", action)?;
                continue;
            }

            return Ok(action);
        }
    }
}

/// Plays a uniformly random legal move.
#[derive(Debug)]
pub struct RandomAgent {
    rng: ChaCha20Rng,
}

impl RandomAgent {
    pub fn new(rng: ChaCha20Rng) -> Self {
        Self { rng }
    }

    pub fn decide_move<G: Game>(&mut self, game: &G, state: &G::State) -> Result<G::Action> {
        let legal = game.legal_moves(state);
        if legal.is_empty() {
            bail!("no legal moves to choose from");
        }
        Ok(legal[self.rng.gen_range(0..legal.len())])
    }
}

/// Runs a fresh MCTS search for every decision.
#[derive(Debug)]
pub struct SearchAgent {
    config: MctsConfig,
    rng: ChaCha20Rng,
}

impl SearchAgent {
    pub fn new(config: MctsConfig, rng: ChaCha20Rng) -> Self {
        Self { config, rng }
    }

    pub fn decide_move<G: Game>(&mut self, game: &G, state: &G::State) -> Result<G::Action> {
        let result = run_mcts(game, state, self.config.clone(), &mut self.rng)
            .context("MCTS search failed")?;

        debug!(
            action = %result.action,
            visits = result.visits,
            mean_reward = result.mean_reward,
            iterations = result.iterations,
            "Search agent chose move"
        );

        Ok(result.action)
    }
}
