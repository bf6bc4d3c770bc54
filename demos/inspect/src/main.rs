//! Inspect Example
//!
//! Resolves placeholder tokens against a player captured as JSON, on a
//! pretend server of any version. Handy for checking how a token renders
//! on old and new hosts without running either.
//!
//! # Usage
//!
//! ```bash
//! cargo run --package tessera-inspect -- \
//!     --fixture demos/inspect/player.json --host-version 1.8.8 \
//!     ping colored_ping item_in_hand_level_sharpness locale_short
//! ```
//!
//! The fixture holds the subject under `player` and, optionally, other
//! online players under `others` for `ping_<name>` lookups.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use tessera::prelude::*;
use tessera::runtime::config::LogOutput;
use tessera::runtime::logging::{LoggingBuilder, SpanEvents};
use tracing::{Level, debug};

// ============================================================================
// Command Line
// ============================================================================

#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON fixture with the player to resolve against.
    #[arg(short, long)]
    fixture: PathBuf,

    /// Server version string the host reports.
    #[arg(long, default_value = "1.16.5")]
    host_version: String,

    /// Configuration file; defaults to `tessera.toml` in the current directory.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print debug logs and resolve spans to stderr.
    #[arg(short, long)]
    verbose: bool,

    /// Tokens to resolve, without surrounding `%`.
    #[arg(required = true)]
    tokens: Vec<String>,
}

// ============================================================================
// Fixture Host
// ============================================================================

#[derive(Deserialize)]
struct Fixture {
    player: SubjectSnapshot,
    #[serde(default)]
    others: Vec<SubjectSnapshot>,
}

struct FixtureHost {
    version: String,
    players: HashMap<String, Arc<SubjectSnapshot>>,
}

impl Host for FixtureHost {
    fn version_string(&self) -> String {
        self.version.clone()
    }

    fn find_player(&self, name: &str) -> Option<Arc<dyn Subject>> {
        self.players
            .get(name)
            .map(|p| Arc::clone(p) as Arc<dyn Subject>)
    }
}

fn load_fixture(path: &Path) -> Result<Fixture> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading fixture {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("parsing fixture {}", path.display()))
}

// ============================================================================
// Main
// ============================================================================

fn main() -> Result<()> {
    let args = Args::parse();
    if args.verbose {
        LoggingBuilder::new()
            .with_level(Level::DEBUG)
            .output(LogOutput::Stderr)
            .span_events(SpanEvents::LIFECYCLE)
            .init();
    }
    let fixture = load_fixture(&args.fixture)?;

    let player = Arc::new(fixture.player);
    let mut players: HashMap<_, _> = fixture
        .others
        .into_iter()
        .map(|p| (p.name.clone(), Arc::new(p)))
        .collect();
    players.insert(player.name.clone(), Arc::clone(&player));

    let host = FixtureHost {
        version: args.host_version,
        players,
    };

    let mut builder = ExpansionRuntime::builder()
        .host(Arc::new(host))
        .logging(false);
    if let Some(config) = &args.config {
        builder = builder.config_file(config);
    }
    let runtime = builder.build().context("starting the expansion")?;
    debug!(version = %runtime.version(), "Runtime ready");

    for token in &args.tokens {
        match runtime.resolve(token, Some(player.as_ref())) {
            Some(value) => println!("{token} => {value}"),
            None => println!("{token} => <unknown>"),
        }
    }
    Ok(())
}
