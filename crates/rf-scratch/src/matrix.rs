//! Symbol matrix and its generator

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::error::{ScratchError, ScratchResult};
use crate::probability::{Probabilities, weighted_pick};
use crate::rng::RandomSource;

/// A grid coordinate, written `"row:column"` in configuration documents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Position {
    pub row: usize,
    pub column: usize,
}

impl Position {
    pub const fn new(row: usize, column: usize) -> Self {
        Self { row, column }
    }
}

impl std::str::FromStr for Position {
    type Err = ScratchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ScratchError::InvalidCoordinate(s.to_string());
        let (row, column) = s.split_once(':').ok_or_else(invalid)?;
        Ok(Self {
            row: row.trim().parse().map_err(|_| invalid())?,
            column: column.trim().parse().map_err(|_| invalid())?,
        })
    }
}

impl TryFrom<String> for Position {
    type Error = ScratchError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Position> for String {
    fn from(pos: Position) -> Self {
        format!("{}:{}", pos.row, pos.column)
    }
}

/// Rows × columns grid of symbol identifiers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Matrix(Vec<Vec<String>>);

impl Matrix {
    /// Wrap row-major cells
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Self(rows)
    }

    /// Matrix with every cell set to `symbol`
    pub fn filled(rows: usize, columns: usize, symbol: &str) -> Self {
        Self(vec![vec![symbol.to_string(); columns]; rows])
    }

    pub fn rows(&self) -> usize {
        self.0.len()
    }

    pub fn columns(&self) -> usize {
        self.0.first().map_or(0, Vec::len)
    }

    pub fn get(&self, pos: Position) -> Option<&str> {
        self.0
            .get(pos.row)
            .and_then(|row| row.get(pos.column))
            .map(String::as_str)
    }

    pub fn set(&mut self, pos: Position, symbol: impl Into<String>) {
        if let Some(cell) = self.0.get_mut(pos.row).and_then(|row| row.get_mut(pos.column)) {
            *cell = symbol.into();
        }
    }

    /// Occurrences of `symbol` anywhere in the grid
    pub fn count(&self, symbol: &str) -> usize {
        self.cells().filter(|&s| s == symbol).count()
    }

    /// All cells, row-major
    pub fn cells(&self) -> impl Iterator<Item = &str> {
        self.0.iter().flatten().map(String::as_str)
    }

    pub fn as_rows(&self) -> &[Vec<String>] {
        &self.0
    }
}

/// Fills a matrix from per-cell distributions, then overlays bonus symbols
#[derive(Debug, Clone, Copy)]
pub struct MatrixGenerator<'a> {
    rows: usize,
    columns: usize,
    probabilities: &'a Probabilities,
}

impl<'a> MatrixGenerator<'a> {
    pub fn new(rows: usize, columns: usize, probabilities: &'a Probabilities) -> Self {
        Self {
            rows,
            columns,
            probabilities,
        }
    }

    /// Generator over a game's dimensions and distributions
    pub fn from_config(config: &'a GameConfig) -> Self {
        Self::new(config.rows, config.columns, &config.probabilities)
    }

    /// Upper bound (exclusive) of the overlay count
    pub fn overlay_bound(&self) -> usize {
        self.rows * self.columns / 4
    }

    /// Generate one matrix.
    ///
    /// Draw order: one unit per cell (row-major), one index for the overlay
    /// count, then row index, column index and unit per overlay.
    pub fn generate<R: RandomSource + ?Sized>(&self, rng: &mut R) -> ScratchResult<Matrix> {
        let mut cells = Vec::with_capacity(self.rows);
        for row in 0..self.rows {
            let mut line = Vec::with_capacity(self.columns);
            for column in 0..self.columns {
                let distribution = self.probabilities.cell(column, row).ok_or_else(|| {
                    ScratchError::EmptyDistribution("standard_symbols".to_string())
                })?;
                let unit = rng.next_unit();
                let symbol = weighted_pick(&distribution.symbols, unit).ok_or_else(|| {
                    ScratchError::Generation(format!(
                        "no standard symbol selected at {row}:{column}"
                    ))
                })?;
                log::trace!("cell {row}:{column} -> {symbol} (u={unit:.6})");
                line.push(symbol.to_string());
            }
            cells.push(line);
        }
        let mut matrix = Matrix(cells);

        let overlays = rng.next_below(self.overlay_bound());
        log::debug!("placing {overlays} bonus overlay(s)");
        for _ in 0..overlays {
            let pos = Position::new(rng.next_below(self.rows), rng.next_below(self.columns));
            let symbol = weighted_pick(self.probabilities.bonus(), rng.next_unit()).ok_or_else(|| {
                ScratchError::Generation("no bonus symbol selected for overlay".to_string())
            })?;
            log::trace!("overlay {}:{} -> {symbol}", pos.row, pos.column);
            matrix.set(pos, symbol);
        }

        Ok(matrix)
    }
}
