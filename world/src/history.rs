//! Record of the inputs accepted on the current level.

use rulegrid_core::Direction;

/// Inputs in the order they were accepted since the level was loaded.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub(crate) struct History {
    inputs: Vec<Direction>,
}

impl History {
    pub(crate) fn record(&mut self, direction: Direction) {
        self.inputs.push(direction);
    }

    pub(crate) fn pop(&mut self) -> Option<Direction> {
        self.inputs.pop()
    }

    pub(crate) fn clear(&mut self) {
        self.inputs.clear();
    }

    pub(crate) fn as_slice(&self) -> &[Direction] {
        &self.inputs
    }

    pub(crate) fn len(&self) -> usize {
        self.inputs.len()
    }
}
