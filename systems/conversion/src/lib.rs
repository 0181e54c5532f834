#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure conversion system that rewrites objects named by `NOUN IS NOUN`.

use std::collections::BTreeSet;

use rulegrid_core::{Conversion, Grid, Noun, Symbol};

/// Grid produced by a conversion pass together with its change count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConversionReport {
    grid: Grid,
    converted: usize,
}

impl ConversionReport {
    /// Grid after every applicable conversion.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Number of cells that were rewritten.
    #[must_use]
    pub const fn converted(&self) -> usize {
        self.converted
    }

    /// Consumes the report, yielding the converted grid.
    #[must_use]
    pub fn into_grid(self) -> Grid {
        self.grid
    }
}

/// Applies conversions to every matching object of `snapshot`.
///
/// Directives only read the snapshot and only write a copy of it, so a cell
/// converted by one directive is never converted again by a later one on the
/// same pass. A self-conversion such as `baba is baba` pins its noun: every
/// other directive for that noun, melting included, is dropped. Converted
/// objects keep their facing; conversions to [`rulegrid_core::Noun::Empty`]
/// vacate the cell.
#[must_use]
pub fn apply_conversions(snapshot: &Grid, conversions: &[Conversion]) -> ConversionReport {
    let pinned: BTreeSet<Noun> = conversions
        .iter()
        .filter(|conversion| conversion.is_identity())
        .map(|conversion| conversion.source)
        .collect();
    let mut grid = snapshot.clone();
    let mut claimed = vec![false; snapshot.rows() * snapshot.columns()];
    let mut converted = 0;

    for conversion in conversions
        .iter()
        .filter(|conversion| !pinned.contains(&conversion.source))
    {
        for (row, column, symbol) in snapshot.iter_cells() {
            let Symbol::Entity { kind, facing } = symbol else {
                continue;
            };
            let slot = row * snapshot.columns() + column;
            if kind != conversion.source || claimed[slot] {
                continue;
            }
            claimed[slot] = true;
            converted += 1;
            grid.set(
                row,
                column,
                Symbol::Entity {
                    kind: conversion.target,
                    facing,
                },
            );
        }
    }

    ConversionReport { grid, converted }
}
