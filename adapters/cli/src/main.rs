#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that plays rulegrid levels in the terminal.

mod input;
mod level_pack;
mod render;

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, info};
use rulegrid_core::Event;
use rulegrid_world::{self as world, query, World};

use crate::{input::Input, level_pack::Level, render::Frame};

/// Plays rule-rewriting grid puzzles from a TOML level pack.
#[derive(Debug, Parser)]
#[command(name = "rulegrid", version)]
struct Args {
    /// Level pack to load. Defaults to the pack bundled with the binary.
    #[arg(long)]
    levels: Option<PathBuf>,

    /// Zero-based index of the first level to play.
    #[arg(long, default_value_t = 0)]
    level: usize,

    /// Scripted keys to play instead of reading standard input.
    #[arg(long, conflicts_with = "held")]
    inputs: Option<String>,

    /// Held-key trace, one character per frame with `.` for no key.
    #[arg(long)]
    held: Option<String>,

    /// Print one JSON object per frame instead of text.
    #[arg(long)]
    json: bool,

    /// Raise the default log filter to debug.
    #[arg(long, short = 'v')]
    verbose: bool,
}

/// Entry point for the rulegrid command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    let default_filter = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    let levels = match &args.levels {
        Some(path) => level_pack::from_path(path)?,
        None => level_pack::bundled()?,
    };
    info!("loaded {} levels", levels.len());

    let grids = levels.iter().map(|level| level.grid.clone()).collect();
    let world = World::starting_at(grids, args.level).context("cannot start the level pack")?;
    let mut session = Session {
        world,
        levels,
        json: args.json,
    };

    session.show()?;
    if let Some(script) = &args.inputs {
        session.play(script.chars().filter_map(input::from_char))?;
    } else if let Some(trace) = &args.held {
        session.play(input::debounce_trace(trace))?;
    } else {
        session.interactive()?;
    }
    Ok(())
}

struct Session {
    world: World,
    levels: Vec<Level>,
    json: bool,
}

impl Session {
    fn play(&mut self, inputs: impl IntoIterator<Item = Input>) -> Result<()> {
        for input in inputs {
            self.submit(input)?;
        }
        Ok(())
    }

    fn interactive(&mut self) -> Result<()> {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = line.context("failed to read standard input")?;
            if line.trim() == "q" {
                break;
            }
            self.play(line.chars().filter_map(input::from_char))?;
        }
        Ok(())
    }

    fn submit(&mut self, input: Input) -> Result<()> {
        let mut events = Vec::new();
        world::apply(&mut self.world, input.command(), &mut events);
        for event in &events {
            debug!("{event:?}");
        }
        let ignored = events
            .iter()
            .all(|event| matches!(event, Event::CommandIgnored { .. }));
        if ignored {
            return Ok(());
        }
        self.show()
    }

    fn show(&self) -> Result<()> {
        let name = self
            .levels
            .get(query::level_index(&self.world))
            .map_or("", |level| level.name.as_str());
        let mut stdout = io::stdout().lock();
        if self.json {
            serde_json::to_writer(&mut stdout, &Frame::capture(&self.world, name))
                .context("failed to write frame")?;
            writeln!(stdout).context("failed to write frame")?;
        } else {
            writeln!(stdout, "{}", render::text_frame(&self.world, name))
                .context("failed to write frame")?;
        }
        Ok(())
    }
}
