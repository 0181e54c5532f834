//! Text and JSON frames describing the world after each command.

use std::fmt::Write as _;

use rulegrid_core::{Direction, PlayState, Symbol};
use rulegrid_world::{query, World};
use serde::Serialize;

/// Banner shown under the grid once play stops.
#[must_use]
pub(crate) const fn banner(state: PlayState) -> Option<&'static str> {
    match state {
        PlayState::Playing => None,
        PlayState::Won => Some("YOU WIN"),
        PlayState::Lost => Some("YOU LOSE"),
        PlayState::LevelComplete => Some("THE END"),
    }
}

/// Renders the world as plain text in level notation.
pub(crate) fn text_frame(world: &World, level_name: &str) -> String {
    let mut frame = String::new();
    let _ = writeln!(
        frame,
        "level {}/{} `{}`  moves {}",
        query::level_index(world) + 1,
        query::level_count(world),
        level_name,
        query::history(world).len()
    );
    let rules: Vec<String> = query::active_sentences(world)
        .iter()
        .map(ToString::to_string)
        .collect();
    let _ = writeln!(frame, "rules: {}", rules.join(", "));
    let _ = writeln!(frame, "{}", query::grid(world));
    if let Some(banner) = banner(query::play_state(world)) {
        let _ = writeln!(frame, "{banner}");
    }
    frame
}

/// Machine-readable frame. Written once per command, never read back.
#[derive(Debug, Serialize)]
pub(crate) struct Frame<'a> {
    level: usize,
    name: &'a str,
    state: PlayState,
    moves: usize,
    rules: Vec<String>,
    cells: Vec<Vec<Cell>>,
}

#[derive(Debug, Serialize)]
struct Cell {
    symbol: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    facing: Option<Direction>,
}

impl From<Symbol> for Cell {
    fn from(symbol: Symbol) -> Self {
        let facing = match symbol {
            Symbol::Entity { facing, .. } => Some(facing),
            _ => None,
        };
        Self {
            symbol: symbol.to_string(),
            facing,
        }
    }
}

impl<'a> Frame<'a> {
    /// Captures the current state of `world`.
    pub(crate) fn capture(world: &World, name: &'a str) -> Self {
        Self {
            level: query::level_index(world),
            name,
            state: query::play_state(world),
            moves: query::history(world).len(),
            rules: query::active_sentences(world)
                .iter()
                .map(ToString::to_string)
                .collect(),
            cells: query::grid(world)
                .iter_rows()
                .map(|row| row.iter().copied().map(Cell::from).collect())
                .collect(),
        }
    }
}
