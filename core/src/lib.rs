#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the rulegrid engine.
//!
//! This crate defines the vocabulary of the puzzle world and the message
//! surface that connects adapters with the authoritative world. Adapters
//! submit [`Command`] values describing player intent, the world executes
//! them via its `apply` entry point, and then reports [`Event`] values.
//! Systems are pure functions over immutable [`Grid`] snapshots: they never
//! keep state between ticks, so every behavior is derived from the grid that
//! is current when they run.

use std::fmt;

use serde::{Deserialize, Serialize};

mod grid;

pub use grid::{Grid, InvalidGridError, Rotation};

/// Object kinds that can be named by a noun text tile.
///
/// `Empty` is a noun without an object: converting something into `Empty`
/// removes it, and the behavior granted to `Empty` applies to vacant cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Noun {
    /// The default player creature.
    Baba,
    /// The usual goal object.
    Flag,
    /// Solid wall segment.
    Wall,
    /// Loose rock.
    Rock,
    /// Decorative grass.
    Grass,
    /// Skull hazard.
    Skull,
    /// Key.
    Key,
    /// Lava.
    Lava,
    /// Water.
    Water,
    /// The absence of an object.
    Empty,
}

impl Noun {
    /// Number of nouns in the vocabulary.
    pub const COUNT: usize = 10;

    /// Every noun in declaration order.
    pub const ALL: [Noun; Noun::COUNT] = [
        Noun::Baba,
        Noun::Flag,
        Noun::Wall,
        Noun::Rock,
        Noun::Grass,
        Noun::Skull,
        Noun::Key,
        Noun::Lava,
        Noun::Water,
        Noun::Empty,
    ];

    /// Dense index used for table lookups.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase word written on the noun's text tile.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Baba => "baba",
            Self::Flag => "flag",
            Self::Wall => "wall",
            Self::Rock => "rock",
            Self::Grass => "grass",
            Self::Skull => "skull",
            Self::Key => "key",
            Self::Lava => "lava",
            Self::Water => "water",
            Self::Empty => "empty",
        }
    }

    /// Capitalised word used for an object of this kind in level notation.
    #[must_use]
    pub const fn entity_name(self) -> &'static str {
        match self {
            Self::Baba => "Baba",
            Self::Flag => "Flag",
            Self::Wall => "Wall",
            Self::Rock => "Rock",
            Self::Grass => "Grass",
            Self::Skull => "Skull",
            Self::Key => "Key",
            Self::Lava => "Lava",
            Self::Water => "Water",
            Self::Empty => "Empty",
        }
    }

    /// Reports whether objects of this kind can exist on the grid.
    #[must_use]
    pub const fn is_object(self) -> bool {
        !matches!(self, Self::Empty)
    }

    /// Looks up a noun by its lowercase text.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|noun| noun.name() == name)
    }
}

impl fmt::Display for Noun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Capabilities that a sentence can grant to a noun.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Property {
    /// Moves in response to player input.
    You,
    /// Is shoved along by movers.
    Push,
    /// Touching it with a `you` object wins the level.
    Win,
    /// Destroys `melt` objects it meets.
    Hot,
    /// Is destroyed by `hot` objects it meets.
    Melt,
    /// Destroys itself together with whatever it meets.
    Sink,
}

impl Property {
    /// Every property in declaration order.
    pub const ALL: [Property; 6] = [
        Property::You,
        Property::Push,
        Property::Win,
        Property::Hot,
        Property::Melt,
        Property::Sink,
    ];

    /// Lowercase word written on the property's text tile.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::You => "you",
            Self::Push => "push",
            Self::Win => "win",
            Self::Hot => "hot",
            Self::Melt => "melt",
            Self::Sink => "sink",
        }
    }

    /// Looks up a property by its lowercase text.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|property| property.name() == name)
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Word printed on a text tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Token {
    /// Names a kind of object.
    Noun(Noun),
    /// Names a capability.
    Property(Property),
    /// The connector joining a subject to its object.
    Is,
}

impl Token {
    /// Lowercase word written on the tile.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Noun(noun) => noun.name(),
            Self::Property(property) => property.name(),
            Self::Is => "is",
        }
    }

    /// Looks up a token by its lowercase text.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        if name == "is" {
            return Some(Self::Is);
        }
        Noun::from_name(name)
            .map(Self::Noun)
            .or_else(|| Property::from_name(name).map(Self::Property))
    }
}

/// Cardinal directions accepted as player input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Toward decreasing row indices.
    Up,
    /// Toward increasing row indices.
    Down,
    /// Toward decreasing column indices.
    Left,
    /// Toward increasing column indices.
    #[default]
    Right,
}

impl Direction {
    /// Every direction.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Rotation that turns this direction into [`Direction::Up`].
    ///
    /// Applying [`Rotation::inverse`] to the rotated grid restores the
    /// original orientation.
    #[must_use]
    pub const fn rotation(self) -> Rotation {
        match self {
            Self::Up => Rotation::Identity,
            Self::Down => Rotation::Half,
            Self::Left => Rotation::Clockwise,
            Self::Right => Rotation::CounterClockwise,
        }
    }
}

/// Content of a single grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Symbol {
    /// Nothing occupies the cell.
    #[default]
    Empty,
    /// A word tile.
    Text(Token),
    /// An object.
    Entity {
        /// Kind of object.
        kind: Noun,
        /// Direction the object last moved in. Presentation only.
        facing: Direction,
    },
}

impl Symbol {
    /// Creates an object of the provided kind facing the default direction.
    #[must_use]
    pub const fn entity(kind: Noun) -> Self {
        Self::Entity {
            kind,
            facing: Direction::Right,
        }
    }

    /// Creates a noun text tile.
    #[must_use]
    pub const fn noun(noun: Noun) -> Self {
        Self::Text(Token::Noun(noun))
    }

    /// Creates a property text tile.
    #[must_use]
    pub const fn property(property: Property) -> Self {
        Self::Text(Token::Property(property))
    }

    /// Creates the `is` text tile.
    #[must_use]
    pub const fn is() -> Self {
        Self::Text(Token::Is)
    }

    /// Reports whether the cell is vacant.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Kind of the object held by the cell, if any.
    #[must_use]
    pub const fn entity_kind(&self) -> Option<Noun> {
        match self {
            Self::Entity { kind, .. } => Some(*kind),
            _ => None,
        }
    }

    /// Returns the symbol turned toward `direction`; non-objects are unchanged.
    #[must_use]
    pub const fn facing(self, direction: Direction) -> Self {
        match self {
            Self::Entity { kind, .. } => Self::Entity {
                kind,
                facing: direction,
            },
            other => other,
        }
    }

    /// Parses a single cell written in level notation.
    ///
    /// `.` is an empty cell, lowercase words are text tiles and capitalised
    /// words are objects (`baba` versus `Baba`).
    #[must_use]
    pub fn parse(word: &str) -> Option<Self> {
        if word == "." {
            return Some(Self::Empty);
        }
        let mut chars = word.chars();
        let first = chars.next()?;
        if first.is_ascii_uppercase() {
            if !chars.all(|c| c.is_ascii_lowercase()) {
                return None;
            }
            return Noun::from_name(&word.to_ascii_lowercase()).map(Self::entity);
        }
        Token::from_name(word).map(Self::Text)
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => f.write_str("."),
            Self::Text(token) => f.write_str(token.name()),
            Self::Entity { kind, .. } => f.write_str(kind.entity_name()),
        }
    }
}

/// Capability flags of a single noun for the current tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Behavior {
    /// Moves with player input.
    pub you: bool,
    /// Can be pushed.
    pub push: bool,
    /// Wins when touched by or identical to a `you` object.
    pub win: bool,
    /// Destroys `melt` objects.
    pub hot: bool,
    /// Destroyed by `hot` objects.
    pub melt: bool,
    /// Destroys itself together with what it meets.
    pub sink: bool,
}

impl Behavior {
    /// Behavior carried by every text tile.
    pub const TEXT: Behavior = Behavior {
        you: false,
        push: true,
        win: false,
        hot: false,
        melt: false,
        sink: false,
    };

    /// Sets the flag matching `property`.
    pub fn grant(&mut self, property: Property) {
        match property {
            Property::You => self.you = true,
            Property::Push => self.push = true,
            Property::Win => self.win = true,
            Property::Hot => self.hot = true,
            Property::Melt => self.melt = true,
            Property::Sink => self.sink = true,
        }
    }

    /// Reports whether the flag matching `property` is set.
    #[must_use]
    pub const fn has(&self, property: Property) -> bool {
        match property {
            Property::You => self.you,
            Property::Push => self.push,
            Property::Win => self.win,
            Property::Hot => self.hot,
            Property::Melt => self.melt,
            Property::Sink => self.sink,
        }
    }
}

/// Behavior of every noun plus the synthetic text entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BehaviorTable {
    nouns: [Behavior; Noun::COUNT],
    text: Behavior,
}

impl Default for BehaviorTable {
    fn default() -> Self {
        Self {
            nouns: [Behavior::default(); Noun::COUNT],
            text: Behavior::TEXT,
        }
    }
}

impl BehaviorTable {
    /// Grants `property` to `noun`.
    pub fn grant(&mut self, noun: Noun, property: Property) {
        self.nouns[noun.index()].grant(property);
    }

    /// Behavior currently held by `noun`.
    #[must_use]
    pub fn noun(&self, noun: Noun) -> Behavior {
        self.nouns[noun.index()]
    }

    /// Behavior shared by all text tiles.
    #[must_use]
    pub const fn text(&self) -> Behavior {
        self.text
    }

    /// Behavior of whatever occupies a cell.
    ///
    /// Vacant cells answer with the `empty` noun's behavior.
    #[must_use]
    pub fn of(&self, symbol: Symbol) -> Behavior {
        match symbol {
            Symbol::Empty => self.noun(Noun::Empty),
            Symbol::Text(_) => self.text,
            Symbol::Entity { kind, .. } => self.noun(kind),
        }
    }

    /// Reports whether the cell holds an object that is `you`.
    #[must_use]
    pub fn is_you(&self, symbol: Symbol) -> bool {
        symbol
            .entity_kind()
            .is_some_and(|kind| self.noun(kind).you)
    }

    /// Reports whether the cell holds an object that is `win`.
    #[must_use]
    pub fn is_win(&self, symbol: Symbol) -> bool {
        symbol
            .entity_kind()
            .is_some_and(|kind| self.noun(kind).win)
    }

    /// Iterates nouns with their behavior in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Noun, Behavior)> + '_ {
        Noun::ALL.into_iter().map(|noun| (noun, self.noun(noun)))
    }
}

/// Right-hand side of a sentence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Predicate {
    /// `NOUN IS NOUN`: turns the subject into another kind.
    Noun(Noun),
    /// `NOUN IS PROPERTY`: grants a capability.
    Property(Property),
}

impl Predicate {
    /// Word written on the predicate's text tile.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Noun(noun) => noun.name(),
            Self::Property(property) => property.name(),
        }
    }
}

impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Noun(noun) => fmt::Display::fmt(noun, f),
            Self::Property(property) => fmt::Display::fmt(property, f),
        }
    }
}

/// Grammatically valid three-tile run found on the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sentence {
    /// Noun the sentence is about.
    pub subject: Noun,
    /// What the subject is.
    pub object: Predicate,
}

impl Sentence {
    /// Creates a new sentence.
    #[must_use]
    pub const fn new(subject: Noun, object: Predicate) -> Self {
        Self { subject, object }
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is {}", self.subject, self.object)
    }
}

/// Instruction to replace objects of one kind with another.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Conversion {
    /// Kind that is replaced.
    pub source: Noun,
    /// Replacement kind; [`Noun::Empty`] removes the object.
    pub target: Noun,
}

impl Conversion {
    /// Creates a new conversion directive.
    #[must_use]
    pub const fn new(source: Noun, target: Noun) -> Self {
        Self { source, target }
    }

    /// Reports whether the directive would leave objects unchanged.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        self.source == self.target
    }
}

/// Terminal condition of the current level.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlayState {
    /// Input is accepted.
    #[default]
    Playing,
    /// The level was won; waiting for the player to advance.
    Won,
    /// Nothing is `you` any more; only undo helps.
    Lost,
    /// Every level has been completed.
    LevelComplete,
}

/// Reason a level was won.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum WinCause {
    /// A noun is simultaneously `you` and `win`.
    YouAreWin {
        /// Noun carrying both properties.
        noun: Noun,
    },
    /// A `you` object walked into a `win` object.
    ReachedWin {
        /// Kind of the object that moved.
        mover: Noun,
        /// Kind of the `win` object it walked into.
        target: Noun,
    },
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Moves every `you` object one cell, then lets rules settle.
    Step {
        /// Direction of travel.
        direction: Direction,
    },
    /// Re-evaluates rules and conversions without moving anything.
    Settle,
    /// Rewinds the most recent step by replaying the remaining history.
    Undo,
    /// Continues to the next level after a win.
    Advance,
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// A level's original layout became current.
    LevelLoaded {
        /// Zero-based index of the level.
        level: usize,
    },
    /// Objects were replaced by `NOUN IS NOUN` sentences or melted away.
    ObjectsConverted {
        /// Number of cells that changed.
        count: usize,
    },
    /// At least one `you` object moved.
    Moved {
        /// Direction of travel.
        direction: Direction,
    },
    /// Every `you` object was blocked.
    Blocked {
        /// Direction of the attempted move.
        direction: Direction,
    },
    /// The level was won.
    Won {
        /// Why the level was won.
        cause: WinCause,
    },
    /// Nothing on the grid is `you` any more.
    Lost,
    /// The grid was rebuilt from the level's layout and remaining history.
    HistoryRewound {
        /// Number of inputs replayed.
        remaining: usize,
    },
    /// The last level was passed.
    CampaignComplete,
    /// The command is not accepted in the current state.
    CommandIgnored {
        /// State that rejected the command.
        state: PlayState,
    },
}
