mod session;

use std::io::{self, BufRead};
use std::path::Path;

use anyhow::{Context, Result};
use classical_engine::{ClassicalEngine, EngineConfig};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::session::{Flow, Session};

fn main() -> Result<()> {
    // stdout carries the UCI protocol, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => EngineConfig::load(Path::new(&path))
            .with_context(|| format!("loading engine config from {path}"))?,
        None => EngineConfig::default(),
    };
    info!(?config, "starting engine");

    let mut session = Session::new(ClassicalEngine::with_config(config), io::stdout());
    for line in io::stdin().lock().lines() {
        let line = line.context("reading stdin")?;
        if session.handle_line(&line)? == Flow::Quit {
            break;
        }
    }
    Ok(())
}
