//! Weighted symbol distributions
//!
//! Standard symbols are drawn from per-cell distributions, bonus symbols from
//! one global distribution. Both use the same weighted-cumulative walk
//! ([`weighted_pick`]) over the distribution in document order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Ordered mapping of symbol identifier to integer weight
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WeightTable(IndexMap<String, u32>);

impl WeightTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, keeps insertion order
    pub fn with(mut self, id: impl Into<String>, weight: u32) -> Self {
        self.0.insert(id.into(), weight);
        self
    }

    pub fn insert(&mut self, id: impl Into<String>, weight: u32) {
        self.0.insert(id.into(), weight);
    }

    /// Sum of all weights
    pub fn total(&self) -> u64 {
        self.0.values().map(|&w| u64::from(w)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.0.iter().map(|(id, &w)| (id.as_str(), w))
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(S, u32)> for WeightTable {
    fn from_iter<T: IntoIterator<Item = (S, u32)>>(iter: T) -> Self {
        Self(iter.into_iter().map(|(id, w)| (id.into(), w)).collect())
    }
}

/// Weighted-cumulative selection.
///
/// Scales `unit` (in `[0, 1)`) by the total weight and returns the first
/// entry whose running sum strictly exceeds the scaled value. Returns `None`
/// when the walk exhausts the table (empty table or zero total).
pub fn weighted_pick(table: &WeightTable, unit: f64) -> Option<&str> {
    let target = unit * table.total() as f64;
    let mut cumulative = 0.0;
    for (id, weight) in table.iter() {
        cumulative += f64::from(weight);
        if target < cumulative {
            return Some(id);
        }
    }
    None
}

/// Standard-symbol distribution for one cell
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellProbability {
    pub column: usize,
    pub row: usize,
    pub symbols: WeightTable,
}

impl CellProbability {
    pub fn new(column: usize, row: usize, symbols: WeightTable) -> Self {
        Self {
            column,
            row,
            symbols,
        }
    }
}

/// Global bonus-symbol distribution
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BonusProbability {
    pub symbols: WeightTable,
}

/// All distributions of a game
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Probabilities {
    #[serde(default)]
    pub standard_symbols: Vec<CellProbability>,
    #[serde(default)]
    pub bonus_symbols: BonusProbability,
}

impl Probabilities {
    /// Distribution for the cell at (`column`, `row`).
    ///
    /// Cells without their own entry use the first configured entry.
    pub fn cell(&self, column: usize, row: usize) -> Option<&CellProbability> {
        self.standard_symbols
            .iter()
            .find(|p| p.column == column && p.row == row)
            .or_else(|| self.standard_symbols.first())
    }

    pub fn bonus(&self) -> &WeightTable {
        &self.bonus_symbols.symbols
    }
}
