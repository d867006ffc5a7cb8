//! UCI command handling over a single game.

use std::io::Write;

use anyhow::{Context, Result};
use chess_core::{move_to_uci, set_position_from_uci, Engine, Game};
use classical_engine::{ClassicalEngine, MAX_HASH_MEGABYTES, MAX_SEARCH_DEPTH};
use tracing::{debug, warn};

/// Whether the input loop should keep reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

pub struct Session<W: Write> {
    engine: ClassicalEngine,
    game: Game,
    out: W,
}

impl<W: Write> Session<W> {
    pub fn new(engine: ClassicalEngine, out: W) -> Self {
        Self {
            engine,
            game: Game::startpos(),
            out,
        }
    }

    /// Handles one line of input. Only output failures are errors; malformed
    /// commands are logged and ignored.
    pub fn handle_line(&mut self, line: &str) -> Result<Flow> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = parts.split_first() else {
            return Ok(Flow::Continue);
        };

        match command {
            "uci" => {
                writeln!(self.out, "id name {}", self.engine.name())?;
                writeln!(self.out, "id author {}", self.engine.author())?;
                writeln!(
                    self.out,
                    "option name Depth type spin default {} min 1 max {MAX_SEARCH_DEPTH}",
                    self.engine.config().max_depth
                )?;
                writeln!(
                    self.out,
                    "option name Hash type spin default {} min 0 max {MAX_HASH_MEGABYTES}",
                    self.engine.hash_megabytes()
                )?;
                writeln!(self.out, "uciok")?;
            }
            "isready" => writeln!(self.out, "readyok")?,
            "setoption" => self.set_option(args),
            "ucinewgame" => {
                self.engine.new_game();
                self.game = Game::startpos();
            }
            "position" => {
                if let Err(err) = set_position_from_uci(&mut self.game, args) {
                    warn!(%err, "rejected position command");
                }
            }
            "go" => self.go(args)?,
            "quit" => return Ok(Flow::Quit),
            _ => debug!(command, "ignoring unknown command"),
        }

        self.out.flush().context("flushing output")?;
        Ok(Flow::Continue)
    }

    // setoption name <name words> [value <value words>]
    fn set_option(&mut self, args: &[&str]) {
        let Some(name_at) = args.iter().position(|&arg| arg == "name") else {
            warn!("setoption without name");
            return;
        };
        let value_at = args.iter().position(|&arg| arg == "value");
        let name_end = value_at.unwrap_or(args.len());
        if name_end <= name_at {
            warn!("setoption value before name");
            return;
        }

        let name = args[name_at + 1..name_end].join(" ");
        let value = value_at.map(|idx| args[idx + 1..].join(" ")).unwrap_or_default();
        if !self.engine.set_option(&name, &value) {
            warn!(%name, %value, "unsupported option");
        }
    }

    fn go(&mut self, args: &[&str]) -> Result<()> {
        let depth = args
            .iter()
            .position(|&arg| arg == "depth")
            .and_then(|idx| args.get(idx + 1))
            .and_then(|txt| txt.parse::<u8>().ok());

        let previous = self.engine.config().max_depth;
        if let Some(depth) = depth {
            self.engine.set_option("Depth", &depth.to_string());
        }

        let board = self.game.board().clone();
        let result = self.engine.choose_move(&mut self.game);

        if depth.is_some() {
            self.engine.set_option("Depth", &previous.to_string());
        }

        match result {
            Ok(result) => {
                writeln!(
                    self.out,
                    "info depth {} score cp {} nodes {}",
                    result.depth, result.score, result.nodes
                )?;
                match result.best_move {
                    Some(mv) => writeln!(self.out, "bestmove {}", move_to_uci(&board, mv))?,
                    None => writeln!(self.out, "bestmove 0000")?,
                }
            }
            Err(err) => {
                warn!(%err, "search failed");
                writeln!(self.out, "bestmove 0000")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "session_tests.rs"]
mod session_tests;
