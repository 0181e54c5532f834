use std::{collections::BTreeSet, fmt};

use thiserror::Error;

use crate::{Noun, Symbol};

/// Reasons a level layout cannot become a [`Grid`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum InvalidGridError {
    /// The layout has no rows.
    #[error("grid has no rows")]
    NoRows,
    /// The first row has no cells.
    #[error("grid has zero width")]
    ZeroWidth,
    /// A row differs in length from the first row.
    #[error("row {row} has {found} cells, expected {expected}")]
    Ragged {
        /// Zero-based index of the offending row.
        row: usize,
        /// Width of the first row.
        expected: usize,
        /// Width of the offending row.
        found: usize,
    },
    /// A word in the text layout is not part of the vocabulary.
    #[error("'{word}' at row {row}, column {column} is not a valid symbol")]
    UnknownSymbol {
        /// The unrecognised word.
        word: String,
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        column: usize,
    },
    /// An object claims to be of kind `empty`.
    #[error("cell at row {row}, column {column} holds an object of kind `empty`")]
    EmptyEntity {
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        column: usize,
    },
}

/// Quarter-turn rotations applied to a whole grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Rotation {
    /// Leaves the grid untouched.
    Identity,
    /// Quarter turn clockwise; the left column becomes the top row.
    Clockwise,
    /// Quarter turn counter-clockwise; the right column becomes the top row.
    CounterClockwise,
    /// Half turn.
    Half,
}

impl Rotation {
    /// Rotation that undoes this one.
    #[must_use]
    pub const fn inverse(self) -> Self {
        match self {
            Self::Identity => Self::Identity,
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
            Self::Half => Self::Half,
        }
    }
}

/// Rectangular, non-empty, row-major field of symbols.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: usize,
    columns: usize,
    cells: Vec<Symbol>,
}

impl Grid {
    /// Builds a grid from rows of symbols, validating its shape.
    pub fn from_rows(rows: Vec<Vec<Symbol>>) -> Result<Self, InvalidGridError> {
        let expected = rows.first().ok_or(InvalidGridError::NoRows)?.len();
        if expected == 0 {
            return Err(InvalidGridError::ZeroWidth);
        }

        let mut cells = Vec::with_capacity(expected * rows.len());
        for (row, symbols) in rows.iter().enumerate() {
            if symbols.len() != expected {
                return Err(InvalidGridError::Ragged {
                    row,
                    expected,
                    found: symbols.len(),
                });
            }
            for (column, symbol) in symbols.iter().enumerate() {
                if symbol.entity_kind().is_some_and(|kind| !kind.is_object()) {
                    return Err(InvalidGridError::EmptyEntity { row, column });
                }
                cells.push(*symbol);
            }
        }

        Ok(Self {
            rows: rows.len(),
            columns: expected,
            cells,
        })
    }

    /// Parses a grid written in level notation.
    ///
    /// Each non-blank line is a row; cells are separated by whitespace.
    pub fn parse(text: &str) -> Result<Self, InvalidGridError> {
        let mut rows = Vec::new();
        for line in text.lines().filter(|line| !line.trim().is_empty()) {
            let row = rows.len();
            let symbols = line
                .split_whitespace()
                .enumerate()
                .map(|(column, word)| {
                    Symbol::parse(word).ok_or_else(|| InvalidGridError::UnknownSymbol {
                        word: word.to_owned(),
                        row,
                        column,
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(symbols);
        }
        Self::from_rows(rows)
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Symbol at the provided location, if it lies inside the grid.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<Symbol> {
        self.index(row, column).map(|index| self.cells[index])
    }

    /// Overwrites a cell. Locations outside the grid are ignored.
    ///
    /// An object of kind `empty` is stored as a vacant cell.
    pub fn set(&mut self, row: usize, column: usize, symbol: Symbol) {
        let symbol = match symbol.entity_kind() {
            Some(kind) if !kind.is_object() => Symbol::Empty,
            _ => symbol,
        };
        if let Some(index) = self.index(row, column) {
            self.cells[index] = symbol;
        }
    }

    /// Grid of the same shape with every cell vacant.
    #[must_use]
    pub fn cleared(&self) -> Self {
        Self {
            rows: self.rows,
            columns: self.columns,
            cells: vec![Symbol::Empty; self.cells.len()],
        }
    }

    /// Iterates rows from top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = &[Symbol]> {
        self.cells.chunks_exact(self.columns)
    }

    /// Iterates `(row, column, symbol)` in row-major order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (usize, usize, Symbol)> + '_ {
        let columns = self.columns;
        self.cells
            .iter()
            .enumerate()
            .map(move |(index, symbol)| (index / columns, index % columns, *symbol))
    }

    /// Kinds of every object currently on the grid.
    #[must_use]
    pub fn entity_kinds(&self) -> BTreeSet<Noun> {
        self.cells.iter().filter_map(Symbol::entity_kind).collect()
    }

    /// Grid with rows and columns swapped; its rows are this grid's columns.
    #[must_use]
    pub fn transpose(&self) -> Self {
        self.remap(self.columns, self.rows, |row, column| (column, row))
    }

    /// Grid turned by the provided rotation.
    #[must_use]
    pub fn rotated(&self, rotation: Rotation) -> Self {
        let (rows, columns) = (self.rows, self.columns);
        match rotation {
            Rotation::Identity => self.clone(),
            Rotation::Clockwise => self.remap(columns, rows, |row, column| (rows - 1 - column, row)),
            Rotation::CounterClockwise => {
                self.remap(columns, rows, |row, column| (column, columns - 1 - row))
            }
            Rotation::Half => self.remap(rows, columns, |row, column| {
                (rows - 1 - row, columns - 1 - column)
            }),
        }
    }

    /// Builds a `rows × columns` grid whose cell `(row, column)` is read from
    /// `source(row, column)` in this grid.
    fn remap<F>(&self, rows: usize, columns: usize, source: F) -> Self
    where
        F: Fn(usize, usize) -> (usize, usize),
    {
        let mut cells = Vec::with_capacity(self.cells.len());
        for row in 0..rows {
            for column in 0..columns {
                let (from_row, from_column) = source(row, column);
                cells.push(self.cells[from_row * self.columns + from_column]);
            }
        }
        Self {
            rows,
            columns,
            cells,
        }
    }

    fn index(&self, row: usize, column: usize) -> Option<usize> {
        if row < self.rows && column < self.columns {
            Some(row * self.columns + column)
        } else {
            None
        }
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.iter_rows().enumerate() {
            if index > 0 {
                f.write_str("\n")?;
            }
            for (column, symbol) in row.iter().enumerate() {
                if column > 0 {
                    f.write_str(" ")?;
                }
                write!(f, "{symbol}")?;
            }
        }
        Ok(())
    }
}
