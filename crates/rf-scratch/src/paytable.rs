//! Win combinations and matching
//!
//! Two independent detectors run over the same catalog:
//! - [`match_linear`] checks fixed coordinate groups (rows, columns, diagonals)
//! - [`match_counts`] checks how often each symbol occurs anywhere on the grid
//!
//! [`evaluate`] merges both into one [`AppliedWins`] map.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ScratchError, ScratchResult};
use crate::matrix::{Matrix, Position};
use crate::symbols::SymbolTable;

/// Linear combinations every catalog must define, in evaluation order
pub const LINEAR_EVALUATION_ORDER: [&str; 4] = [
    "same_symbols_horizontally",
    "same_symbols_vertically",
    "same_symbols_diagonally_left_to_right",
    "same_symbols_diagonally_right_to_left",
];

/// How a combination is satisfied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinCondition {
    /// Symbol occurs at least `count` times anywhere
    SameSymbols,
    /// Every cell of a covered area holds the same symbol
    LinearSymbols,
}

/// Ordered list of coordinates that must all hold the same symbol
pub type CoveredArea = Vec<Position>;

/// A win combination definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinCombination {
    /// Multiplier applied to the symbol reward
    pub reward_multiplier: f64,
    /// Matching strategy
    pub when: WinCondition,
    /// Occurrence threshold (`same_symbols` only)
    #[serde(default)]
    pub count: usize,
    /// Category label
    #[serde(default)]
    pub group: String,
    /// Coordinate groups (`linear_symbols` only)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub covered_areas: Vec<CoveredArea>,
}

impl WinCombination {
    /// Count-threshold combination
    pub fn same_symbols(reward_multiplier: f64, count: usize, group: impl Into<String>) -> Self {
        Self {
            reward_multiplier,
            when: WinCondition::SameSymbols,
            count,
            group: group.into(),
            covered_areas: Vec::new(),
        }
    }

    /// Linear combination over coordinate groups
    pub fn linear(
        reward_multiplier: f64,
        group: impl Into<String>,
        covered_areas: Vec<CoveredArea>,
    ) -> Self {
        Self {
            reward_multiplier,
            when: WinCondition::LinearSymbols,
            count: 0,
            group: group.into(),
            covered_areas,
        }
    }

    pub fn is_linear(&self) -> bool {
        self.when == WinCondition::LinearSymbols
    }
}

/// Complete win-combination catalog, keyed by identifier in document order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Paytable(IndexMap<String, WinCombination>);

impl Paytable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, combination: WinCombination) {
        self.0.insert(name.into(), combination);
    }

    pub fn get(&self, name: &str) -> Option<&WinCombination> {
        self.0.get(name)
    }

    /// Look up a combination, failing if the catalog lacks it
    pub fn require(&self, name: &str) -> ScratchResult<&WinCombination> {
        self.0
            .get(name)
            .ok_or_else(|| ScratchError::MissingCombination(name.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &WinCombination)> {
        self.0.iter().map(|(name, c)| (name.as_str(), c))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Linear combinations: the fixed evaluation order first, then any other
    /// `linear_symbols` entries in catalog order
    pub fn linear_in_order(&self) -> ScratchResult<Vec<(&str, &WinCombination)>> {
        let mut ordered = Vec::with_capacity(LINEAR_EVALUATION_ORDER.len());
        for name in LINEAR_EVALUATION_ORDER {
            ordered.push((name, self.require(name)?));
        }
        ordered.extend(
            self.iter()
                .filter(|(name, c)| c.is_linear() && !LINEAR_EVALUATION_ORDER.contains(name)),
        );
        Ok(ordered)
    }

    /// Count-threshold combinations in catalog order
    pub fn count_combinations(&self) -> impl Iterator<Item = (&str, &WinCombination)> {
        self.iter().filter(|(_, c)| c.when == WinCondition::SameSymbols)
    }
}

/// Satisfied combinations per symbol.
///
/// Insertion-ordered on both levels; a combination is recorded at most once
/// per symbol.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AppliedWins(IndexMap<String, Vec<String>>);

impl AppliedWins {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `symbol` satisfied `combination`
    pub fn record(&mut self, symbol: &str, combination: &str) {
        let combinations = self.0.entry(symbol.to_string()).or_default();
        if !combinations.iter().any(|c| c == combination) {
            combinations.push(combination.to_string());
        }
    }

    /// Fold another result into this one
    pub fn merge(&mut self, other: AppliedWins) {
        for (symbol, combinations) in other.0 {
            for combination in &combinations {
                self.record(&symbol, combination);
            }
        }
    }

    pub fn get(&self, symbol: &str) -> Option<&[String]> {
        self.0.get(symbol).map(Vec::as_slice)
    }

    pub fn contains(&self, symbol: &str, combination: &str) -> bool {
        self.get(symbol)
            .is_some_and(|combinations| combinations.iter().any(|c| c == combination))
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(s, c)| (s.as_str(), c.as_slice()))
    }

    /// Number of symbols with at least one win
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Positional matching over covered areas
pub fn match_linear(matrix: &Matrix, paytable: &Paytable) -> ScratchResult<AppliedWins> {
    let mut wins = AppliedWins::new();

    for (name, combination) in paytable.linear_in_order()? {
        for area in &combination.covered_areas {
            if let Some(symbol) = area_symbol(matrix, name, area)? {
                log::trace!("{symbol} satisfies {name}");
                wins.record(symbol, name);
            }
        }
    }

    Ok(wins)
}

/// The shared symbol of an area, if every cell holds the same non-empty one
fn area_symbol<'m>(
    matrix: &'m Matrix,
    combination: &str,
    area: &[Position],
) -> ScratchResult<Option<&'m str>> {
    let mut first: Option<&str> = None;

    for &pos in area {
        let symbol = matrix.get(pos).ok_or_else(|| ScratchError::OutOfBounds {
            combination: combination.to_string(),
            row: pos.row,
            column: pos.column,
        })?;
        match first {
            None => first = Some(symbol),
            Some(f) if f != symbol => return Ok(None),
            Some(_) => {}
        }
    }

    Ok(first.filter(|s| !s.is_empty()))
}

/// Occurrence-threshold matching.
///
/// Thresholds are inclusive lower bounds, so one symbol can satisfy several
/// count combinations at once.
pub fn match_counts(matrix: &Matrix, symbols: &SymbolTable, paytable: &Paytable) -> AppliedWins {
    let mut wins = AppliedWins::new();

    for symbol in symbols.ids() {
        let occurrences = matrix.count(symbol);
        if occurrences == 0 {
            continue;
        }
        for (name, combination) in paytable.count_combinations() {
            if occurrences >= combination.count {
                wins.record(symbol, name);
            }
        }
    }

    wins
}

/// Run both detectors and merge: linear matches first, then count matches
pub fn evaluate(
    matrix: &Matrix,
    symbols: &SymbolTable,
    paytable: &Paytable,
) -> ScratchResult<AppliedWins> {
    let mut wins = match_linear(matrix, paytable)?;
    wins.merge(match_counts(matrix, symbols, paytable));
    log::debug!("{} symbol(s) with winning combinations", wins.len());
    Ok(wins)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbols::SymbolDef;

    fn p(row: usize, column: usize) -> Position {
        Position::new(row, column)
    }

    fn catalog() -> Paytable {
        let mut paytable = Paytable::new();
        paytable.insert("same_symbol_3_times", WinCombination::same_symbols(1.0, 3, "same_symbols"));
        paytable.insert("same_symbol_5_times", WinCombination::same_symbols(2.0, 5, "same_symbols"));
        paytable.insert(
            "same_symbols_horizontally",
            WinCombination::linear(
                2.0,
                "horizontally_linear_symbols",
                (0..3).map(|r| (0..3).map(|c| p(r, c)).collect()).collect(),
            ),
        );
        paytable.insert(
            "same_symbols_vertically",
            WinCombination::linear(
                2.0,
                "vertically_linear_symbols",
                (0..3).map(|c| (0..3).map(|r| p(r, c)).collect()).collect(),
            ),
        );
        paytable.insert(
            "same_symbols_diagonally_left_to_right",
            WinCombination::linear(5.0, "ltr_diagonally_linear_symbols", vec![vec![p(0, 0), p(1, 1), p(2, 2)]]),
        );
        paytable.insert(
            "same_symbols_diagonally_right_to_left",
            WinCombination::linear(5.0, "rtl_diagonally_linear_symbols", vec![vec![p(0, 2), p(1, 1), p(2, 0)]]),
        );
        paytable
    }

    fn table() -> SymbolTable {
        ["A", "B", "C", "D", "E", "F", "G", "H", "I"]
            .into_iter()
            .map(|id| (id.to_string(), SymbolDef::standard(1.0)))
            .collect()
    }

    fn grid(rows: &[[&str; 3]]) -> Matrix {
        Matrix::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|s| s.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_horizontal_row() {
        let matrix = grid(&[["A", "A", "A"], ["B", "C", "D"], ["E", "F", "G"]]);
        let wins = match_linear(&matrix, &catalog()).unwrap();
        assert_eq!(wins.get("A"), Some(&["same_symbols_horizontally".to_string()][..]));
        assert_eq!(wins.len(), 1);
    }

    #[test]
    fn test_repeated_area_recorded_once() {
        let matrix = grid(&[["A", "A", "A"], ["A", "A", "A"], ["B", "C", "D"]]);
        let wins = match_linear(&matrix, &catalog()).unwrap();
        assert_eq!(wins.get("A").unwrap().len(), 1);
    }

    #[test]
    fn test_diagonals_and_columns() {
        let matrix = grid(&[["A", "B", "C"], ["D", "C", "B"], ["C", "B", "A"]]);
        let wins = match_linear(&matrix, &catalog()).unwrap();
        assert!(wins.contains("C", "same_symbols_diagonally_right_to_left"));
        assert!(!wins.contains("A", "same_symbols_diagonally_left_to_right"));
        assert!(wins.get("B").is_none());

        let matrix = grid(&[["A", "B", "C"], ["A", "D", "E"], ["A", "F", "G"]]);
        let wins = match_linear(&matrix, &catalog()).unwrap();
        assert!(wins.contains("A", "same_symbols_vertically"));
    }

    #[test]
    fn test_empty_symbol_never_matches() {
        let matrix = grid(&[["", "", ""], ["B", "C", "D"], ["E", "F", "G"]]);
        let wins = match_linear(&matrix, &catalog()).unwrap();
        assert!(wins.is_empty());
    }

    #[test]
    fn test_missing_fixed_combination_fails() {
        let mut paytable = Paytable::new();
        paytable.insert("same_symbol_3_times", WinCombination::same_symbols(1.0, 3, "same_symbols"));
        let matrix = Matrix::filled(3, 3, "A");

        let err = match_linear(&matrix, &paytable).unwrap_err();
        assert!(matches!(err, ScratchError::MissingCombination(name) if name == "same_symbols_horizontally"));
    }

    #[test]
    fn test_out_of_bounds_area_fails() {
        let matrix = Matrix::filled(2, 2, "A");
        let err = match_linear(&matrix, &catalog()).unwrap_err();
        assert!(matches!(err, ScratchError::OutOfBounds { .. }));
    }

    #[test]
    fn test_extra_linear_combination_is_checked() {
        let mut paytable = catalog();
        paytable.insert(
            "corners",
            WinCombination::linear(3.0, "corners", vec![vec![p(0, 0), p(0, 2), p(2, 0), p(2, 2)]]),
        );
        let matrix = grid(&[["A", "B", "A"], ["C", "D", "E"], ["A", "F", "A"]]);
        let wins = match_linear(&matrix, &paytable).unwrap();
        assert_eq!(wins.get("A"), Some(&["corners".to_string()][..]));
    }

    #[test]
    fn test_count_thresholds_are_inclusive_and_cumulative() {
        let matrix = grid(&[["A", "A", "A"], ["A", "A", "B"], ["C", "D", "E"]]);
        let wins = match_counts(&matrix, &table(), &catalog());
        assert_eq!(
            wins.get("A"),
            Some(&["same_symbol_3_times".to_string(), "same_symbol_5_times".to_string()][..])
        );
        assert!(wins.get("B").is_none());
    }

    #[test]
    fn test_count_monotonic() {
        let paytable = catalog();
        let symbols = table();
        let mut matrix = grid(&[["A", "B", "C"], ["D", "E", "F"], ["G", "H", "I"]]);
        let mut previous = Vec::new();

        for (i, pos) in [p(0, 1), p(0, 2), p(1, 0), p(1, 1), p(1, 2), p(2, 0)].into_iter().enumerate() {
            matrix.set(pos, "A");
            let wins = match_counts(&matrix, &symbols, &paytable);
            let current: Vec<String> = wins.get("A").map(<[String]>::to_vec).unwrap_or_default();
            assert!(previous.iter().all(|c| current.contains(c)), "step {i} lost a threshold");
            previous = current;
        }
        assert_eq!(previous.len(), 2);
    }

    #[test]
    fn test_evaluate_merges_in_order() {
        let matrix = Matrix::filled(3, 3, "A");
        let wins = evaluate(&matrix, &table(), &catalog()).unwrap();
        assert_eq!(
            wins.get("A").unwrap(),
            &[
                "same_symbols_horizontally".to_string(),
                "same_symbols_vertically".to_string(),
                "same_symbols_diagonally_left_to_right".to_string(),
                "same_symbols_diagonally_right_to_left".to_string(),
                "same_symbol_3_times".to_string(),
                "same_symbol_5_times".to_string(),
            ][..]
        );
    }

    #[test]
    fn test_no_win() {
        let matrix = grid(&[["A", "B", "C"], ["D", "E", "F"], ["G", "H", "I"]]);
        assert!(evaluate(&matrix, &table(), &catalog()).unwrap().is_empty());
    }

    #[test]
    fn test_deserialize_combination() {
        let json = r#"{
            "reward_multiplier": 5,
            "when": "linear_symbols",
            "group": "ltr_diagonally_linear_symbols",
            "covered_areas": [["0:0", "1:1", "2:2"]]
        }"#;
        let combination: WinCombination = serde_json::from_str(json).unwrap();
        assert!(combination.is_linear());
        assert_eq!(combination.covered_areas, vec![vec![p(0, 0), p(1, 1), p(2, 2)]]);

        let bad = r#"{ "reward_multiplier": 5, "when": "linear_symbols", "covered_areas": [["0-0"]] }"#;
        assert!(serde_json::from_str::<WinCombination>(bad).is_err());
    }
}
