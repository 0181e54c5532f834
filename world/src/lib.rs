#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative game state: the current grid, level sequencing and history.
//!
//! All mutation goes through [`apply`]. Each command runs to completion and
//! reports what happened through [`Event`]s; adapters read the result back
//! through [`query`].

mod history;

use log::{debug, info, warn};
use rulegrid_core::{Command, Direction, Event, Grid, PlayState, WinCause};
use rulegrid_system_conversion::apply_conversions;
use rulegrid_system_movement::{resolve_move, MoveOutcome};
use rulegrid_system_rules::{resolve, scan};
use thiserror::Error;

use crate::history::History;

/// Reasons a world cannot be created.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum WorldError {
    /// The level list was empty.
    #[error("a world needs at least one level")]
    NoLevels,
    /// The requested starting level does not exist.
    #[error("level {index} does not exist; only {count} levels are loaded")]
    LevelOutOfRange {
        /// Requested zero-based level.
        index: usize,
        /// Number of levels available.
        count: usize,
    },
}

/// Represents the authoritative puzzle state.
#[derive(Clone, Debug)]
pub struct World {
    levels: Vec<Grid>,
    level: usize,
    grid: Grid,
    state: PlayState,
    history: History,
}

impl World {
    /// Creates a world positioned on the first level, already settled.
    pub fn new(levels: Vec<Grid>) -> Result<Self, WorldError> {
        Self::starting_at(levels, 0)
    }

    /// Creates a world positioned on the level at `index`, already settled.
    pub fn starting_at(levels: Vec<Grid>, index: usize) -> Result<Self, WorldError> {
        let count = levels.len();
        let grid = match levels.get(index) {
            Some(grid) => grid.clone(),
            None if count == 0 => return Err(WorldError::NoLevels),
            None => return Err(WorldError::LevelOutOfRange { index, count }),
        };

        let mut world = Self {
            levels,
            level: index,
            grid,
            state: PlayState::Playing,
            history: History::default(),
        };
        // Nobody is listening before construction returns.
        world.begin(&mut Vec::new());
        Ok(world)
    }

    fn load(&mut self, index: usize, out_events: &mut Vec<Event>) {
        let Some(layout) = self.levels.get(index) else {
            return;
        };
        self.level = index;
        self.grid = layout.clone();
        self.begin(out_events);
    }

    /// Starts play on the layout already in `grid`.
    fn begin(&mut self, out_events: &mut Vec<Event>) {
        self.state = PlayState::Playing;
        self.history.clear();
        info!(
            "loaded level {} ({}x{})",
            self.level,
            self.grid.rows(),
            self.grid.columns()
        );
        out_events.push(Event::LevelLoaded { level: self.level });
        self.update(None, out_events);
    }

    fn step(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        self.history.record(direction);
        self.update(Some(direction), out_events);
        if self.state == PlayState::Playing {
            self.update(None, out_events);
        }
    }

    fn rewind(&mut self, out_events: &mut Vec<Event>) {
        let _ = self.history.pop();
        let inputs = self.history.as_slice().to_vec();

        let mut replayed = Vec::new();
        self.load(self.level, &mut replayed);
        for direction in inputs {
            if self.state != PlayState::Playing {
                break;
            }
            self.step(direction, &mut replayed);
        }

        let remaining = self.history.len();
        debug!("rewound to {remaining} inputs ({} replay events)", replayed.len());
        out_events.push(Event::HistoryRewound { remaining });
    }

    fn advance(&mut self, out_events: &mut Vec<Event>) {
        let next = self.level + 1;
        if next < self.levels.len() {
            self.load(next, out_events);
            return;
        }
        self.history.clear();
        self.state = PlayState::LevelComplete;
        info!("all {} levels complete", self.levels.len());
        out_events.push(Event::CampaignComplete);
    }

    /// Runs one rule pass and, when a direction is given, one move.
    fn update(&mut self, direction: Option<Direction>, out_events: &mut Vec<Event>) {
        let sentences = scan(&self.grid);
        debug!(
            "rules in effect: [{}]",
            sentences
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ")
        );
        let resolution = resolve(&sentences);

        if let Some(noun) = resolution.you_and_win() {
            self.finish_won(WinCause::YouAreWin { noun }, out_events);
            return;
        }

        let (behaviors, conversions) = resolution.into_parts();
        let report = apply_conversions(&self.grid, &conversions);
        let converted = report.converted();
        self.grid = report.into_grid();
        if converted > 0 {
            debug!("{converted} objects converted");
            out_events.push(Event::ObjectsConverted { count: converted });
        }

        let any_you = self
            .grid
            .entity_kinds()
            .into_iter()
            .any(|kind| behaviors.noun(kind).you);
        if !any_you {
            self.state = PlayState::Lost;
            info!("level {} lost: nothing is you", self.level);
            out_events.push(Event::Lost);
            return;
        }

        let Some(direction) = direction else {
            return;
        };
        match resolve_move(&self.grid, direction, &behaviors) {
            MoveOutcome::Advanced(grid) => {
                self.grid = grid;
                out_events.push(Event::Moved { direction });
            }
            MoveOutcome::Blocked(grid) => {
                debug!("every you object is blocked moving {direction:?}");
                self.grid = grid;
                out_events.push(Event::Blocked { direction });
            }
            MoveOutcome::TriggeredWin { mover, target } => {
                self.finish_won(WinCause::ReachedWin { mover, target }, out_events);
            }
        }
    }

    fn finish_won(&mut self, cause: WinCause, out_events: &mut Vec<Event>) {
        self.state = PlayState::Won;
        info!("level {} won: {cause:?}", self.level);
        out_events.push(Event::Won { cause });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match (command, world.state) {
        (Command::Step { direction }, PlayState::Playing) => world.step(direction, out_events),
        (Command::Settle, PlayState::Playing) => world.update(None, out_events),
        (Command::Undo, PlayState::Playing | PlayState::Won | PlayState::Lost) => {
            world.rewind(out_events);
        }
        (Command::Advance, PlayState::Won) => world.advance(out_events),
        (command, state) => {
            warn!("ignoring {command:?} while {state:?}");
            out_events.push(Event::CommandIgnored { state });
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use rulegrid_core::{Direction, Grid, PlayState, Sentence};
    use rulegrid_system_rules::scan;

    use super::World;

    /// Grid as it currently stands.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Whether the level is being played, won or lost.
    #[must_use]
    pub fn play_state(world: &World) -> PlayState {
        world.state
    }

    /// Zero-based index of the current level.
    #[must_use]
    pub fn level_index(world: &World) -> usize {
        world.level
    }

    /// Number of levels the world was created with.
    #[must_use]
    pub fn level_count(world: &World) -> usize {
        world.levels.len()
    }

    /// Inputs accepted on the current level, oldest first.
    #[must_use]
    pub fn history(world: &World) -> &[Direction] {
        world.history.as_slice()
    }

    /// Sentences currently spelled out on the grid.
    #[must_use]
    pub fn active_sentences(world: &World) -> Vec<Sentence> {
        scan(&world.grid)
    }
}
