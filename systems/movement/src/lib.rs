#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Deterministic movement system that shifts `you` objects and the piles in
//! front of them.
//!
//! Every move is resolved as if it pointed up: the grid is rotated so the
//! requested direction becomes [`Direction::Up`], scanned in row-major order,
//! and rotated back. A mover looks at the cells already written above it in
//! the output grid, so objects that moved earlier in the scan are pushed
//! along with it and a column of `you` objects travels as a group.

use std::iter;

use rulegrid_core::{BehaviorTable, Direction, Grid, Noun, Symbol};

/// Result of resolving a single directional input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    /// At least one `you` object moved, sank or melted.
    Advanced(Grid),
    /// Every `you` object was blocked. The grid still carries their new facing.
    Blocked(Grid),
    /// A blocked `you` object was standing in front of a `win` object.
    TriggeredWin {
        /// Kind of the blocked mover.
        mover: Noun,
        /// Kind of the `win` object in front of it.
        target: Noun,
    },
}

/// Signals that a pile cannot shift. Never leaves this crate's entry points
/// except through [`resolve_pile`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CannotMove;

/// Moves every `you` object one cell toward `direction`.
#[must_use]
pub fn resolve_move(grid: &Grid, direction: Direction, behaviors: &BehaviorTable) -> MoveOutcome {
    let rotation = direction.rotation();
    let rotated = grid.rotated(rotation);
    let mut output = rotated.cleared();
    let mut advanced = false;

    for (row, column, symbol) in rotated.iter_cells() {
        if symbol.is_empty() {
            continue;
        }
        if !behaviors.is_you(symbol) {
            output.set(row, column, symbol);
            continue;
        }

        let mover = symbol.facing(direction);
        let pile: Vec<Symbol> = iter::once(mover)
            .chain(
                (0..row)
                    .rev()
                    .filter_map(|above| output.get(above, column)),
            )
            .collect();

        match resolve_pile(&pile, behaviors) {
            Ok(resolved) => {
                for (distance, shifted) in resolved.into_iter().enumerate() {
                    output.set(row - distance, column, shifted);
                }
                advanced = true;
            }
            Err(CannotMove) => {
                if let Some(ahead) = pile.get(1).copied() {
                    if behaviors.is_win(ahead) {
                        if let (Some(mover), Some(target)) =
                            (mover.entity_kind(), ahead.entity_kind())
                        {
                            return MoveOutcome::TriggeredWin { mover, target };
                        }
                    }
                }
                output.set(row, column, mover);
            }
        }
    }

    let restored = output.rotated(rotation.inverse());
    if advanced {
        MoveOutcome::Advanced(restored)
    } else {
        MoveOutcome::Blocked(restored)
    }
}

/// Shifts a pile one cell forward, or reports that it cannot move.
///
/// `pile[0]` is the mover and each following element lies one cell further
/// ahead. The returned pile has the same length; index `i` holds what ends
/// up `i` cells ahead of the mover's original position.
///
/// The pair at the front decides the outcome, checked in this order:
/// a `sink` on either side removes both; a `melt` mover running into a `hot`
/// obstacle is destroyed; a `hot` mover destroys a `melt` obstacle and takes
/// its place; a vacant cell is simply entered; a `push` obstacle is shifted
/// first and the mover follows it. Anything else blocks the whole pile.
pub fn resolve_pile(pile: &[Symbol], behaviors: &BehaviorTable) -> Result<Vec<Symbol>, CannotMove> {
    let (mover, ahead_pile) = pile.split_first().ok_or(CannotMove)?;
    if mover.is_empty() {
        return Ok(pile.to_vec());
    }
    let (ahead, beyond) = ahead_pile.split_first().ok_or(CannotMove)?;

    let pushing = behaviors.of(*mover);
    let obstacle = behaviors.of(*ahead);
    let sinks = pushing.sink || obstacle.sink;
    let mover_melts = pushing.melt && obstacle.hot;
    let obstacle_melts = pushing.hot && obstacle.melt;

    if !(ahead.is_empty() || obstacle.push || sinks || mover_melts || obstacle_melts) {
        return Err(CannotMove);
    }

    let front = if sinks {
        [Symbol::Empty, Symbol::Empty]
    } else if mover_melts {
        [Symbol::Empty, *ahead]
    } else if obstacle_melts || ahead.is_empty() {
        [Symbol::Empty, *mover]
    } else {
        let budged = resolve_pile(ahead_pile, behaviors)?;
        let mut resolved = Vec::with_capacity(pile.len());
        resolved.push(budged[0]);
        resolved.push(*mover);
        resolved.extend_from_slice(&budged[1..]);
        return Ok(resolved);
    };

    let mut resolved = Vec::with_capacity(pile.len());
    resolved.extend_from_slice(&front);
    resolved.extend_from_slice(beyond);
    Ok(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rulegrid_core::Property;

    fn table(grants: &[(Noun, Property)]) -> BehaviorTable {
        let mut table = BehaviorTable::default();
        for (noun, property) in grants {
            table.grant(*noun, *property);
        }
        table
    }

    #[test]
    fn empty_pile_cannot_move() {
        assert_eq!(resolve_pile(&[], &table(&[])), Err(CannotMove));
    }

    #[test]
    fn vacant_head_is_returned_unchanged() {
        let pile = [Symbol::Empty, Symbol::entity(Noun::Wall)];
        assert_eq!(resolve_pile(&pile, &table(&[])), Ok(pile.to_vec()));
    }

    #[test]
    fn lone_mover_at_the_edge_cannot_move() {
        let pile = [Symbol::entity(Noun::Baba)];
        assert_eq!(resolve_pile(&pile, &table(&[])), Err(CannotMove));
    }

    #[test]
    fn mover_enters_vacant_cell() {
        let baba = Symbol::entity(Noun::Baba);
        let wall = Symbol::entity(Noun::Wall);
        assert_eq!(
            resolve_pile(&[baba, Symbol::Empty, wall], &table(&[])),
            Ok(vec![Symbol::Empty, baba, wall])
        );
    }

    #[test]
    fn sink_takes_precedence_over_melting() {
        let behaviors = table(&[
            (Noun::Baba, Property::Melt),
            (Noun::Lava, Property::Hot),
            (Noun::Lava, Property::Sink),
        ]);
        let pile = [Symbol::entity(Noun::Baba), Symbol::entity(Noun::Lava)];
        assert_eq!(
            resolve_pile(&pile, &behaviors),
            Ok(vec![Symbol::Empty, Symbol::Empty])
        );
    }

    #[test]
    fn vacant_cells_can_be_made_to_sink() {
        let behaviors = table(&[(Noun::Empty, Property::Sink)]);
        let rock = Symbol::entity(Noun::Rock);
        assert_eq!(
            resolve_pile(&[rock, Symbol::Empty, rock], &behaviors),
            Ok(vec![Symbol::Empty, Symbol::Empty, rock])
        );
    }
}
