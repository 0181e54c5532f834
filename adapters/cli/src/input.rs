//! Keyboard mapping and held-key debouncing.

use rulegrid_core::{Command, Direction};

/// Player intent decoded from a key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Input {
    Move(Direction),
    Undo,
    Confirm,
}

impl Input {
    /// World command expressing this input.
    pub(crate) const fn command(self) -> Command {
        match self {
            Self::Move(direction) => Command::Step { direction },
            Self::Undo => Command::Undo,
            Self::Confirm => Command::Advance,
        }
    }
}

/// Decodes a single key. Unmapped keys yield `None`.
pub(crate) fn from_char(key: char) -> Option<Input> {
    let input = match key.to_ascii_lowercase() {
        '^' | 'w' => Input::Move(Direction::Up),
        'v' | 's' => Input::Move(Direction::Down),
        '<' | 'a' => Input::Move(Direction::Left),
        '>' | 'd' => Input::Move(Direction::Right),
        'u' | 'x' => Input::Undo,
        'n' | ' ' => Input::Confirm,
        _ => return None,
    };
    Some(input)
}

/// Turns a per-frame held input into single presses.
///
/// An input fires on the first frame it is held and stays silent while it
/// remains held. A frame holding something else, or nothing, re-arms it.
#[derive(Clone, Debug, Default)]
pub(crate) struct Debouncer {
    previous: Option<Input>,
}

impl Debouncer {
    pub(crate) fn feed(&mut self, held: Option<Input>) -> Option<Input> {
        let fired = held.filter(|input| self.previous != Some(*input));
        self.previous = held;
        fired
    }
}

/// Decodes a held-key trace where each character is one frame and `.` means
/// no key was held.
pub(crate) fn debounce_trace(trace: &str) -> Vec<Input> {
    let mut debouncer = Debouncer::default();
    trace
        .chars()
        .filter(|key| !key.is_whitespace())
        .filter_map(|key| debouncer.feed(from_char(key)))
        .collect()
}
