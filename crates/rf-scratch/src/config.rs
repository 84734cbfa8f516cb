//! Game configuration
//!
//! Documents follow the scratch game schema:
//!
//! ```json
//! {
//!   "columns": 3,
//!   "rows": 3,
//!   "symbols": { "A": { "reward_multiplier": 5, "type": "standard" }, ... },
//!   "probabilities": {
//!     "standard_symbols": [ { "column": 0, "row": 0, "symbols": { "A": 1, ... } }, ... ],
//!     "bonus_symbols": { "symbols": { "10x": 1, ... } }
//!   },
//!   "win_combinations": { "same_symbol_3_times": { ... }, ... }
//! }
//! ```
//!
//! JSON and YAML are both accepted. Every loader validates before returning.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ScratchError, ScratchResult};
use crate::paytable::{LINEAR_EVALUATION_ORDER, Paytable, WinCondition};
use crate::probability::{Probabilities, WeightTable};
use crate::symbols::SymbolTable;

fn default_dimension() -> usize {
    3
}

/// Fully resolved game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of columns
    #[serde(default = "default_dimension")]
    pub columns: usize,
    /// Number of rows
    #[serde(default = "default_dimension")]
    pub rows: usize,
    /// Symbol definitions
    pub symbols: SymbolTable,
    /// Standard and bonus distributions
    pub probabilities: Probabilities,
    /// Win combination catalog
    pub win_combinations: Paytable,
}

impl GameConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> ScratchResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ScratchError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a YAML document
    pub fn from_yaml_str(yaml: &str) -> ScratchResult<Self> {
        let config: Self =
            serde_yml::from_str(yaml).map_err(|e| ScratchError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a file; `.yaml` / `.yml` are read as YAML, anything else as JSON
    pub fn load(path: impl AsRef<Path>) -> ScratchResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"));

        let config = if is_yaml {
            Self::from_yaml_str(&text)?
        } else {
            Self::from_json_str(&text)?
        };
        log::info!(
            "loaded {}x{} game from {} ({} symbols, {} combinations)",
            config.rows,
            config.columns,
            path.display(),
            config.symbols.len(),
            config.win_combinations.len()
        );
        Ok(config)
    }

    /// Export as pretty JSON
    pub fn to_json(&self) -> ScratchResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| ScratchError::Parse(e.to_string()))
    }

    /// Total grid positions
    pub fn total_positions(&self) -> usize {
        self.rows * self.columns
    }

    /// Check every structural invariant an evaluation relies on
    pub fn validate(&self) -> ScratchResult<()> {
        if self.rows == 0 || self.columns == 0 {
            return Err(ScratchError::InvalidConfig(format!(
                "grid must be at least 1x1, got {}x{}",
                self.rows, self.columns
            )));
        }

        self.validate_symbols()?;
        self.validate_probabilities()?;
        self.validate_combinations()
    }

    fn validate_symbols(&self) -> ScratchResult<()> {
        for (id, def) in self.symbols.iter() {
            if !def.reward_multiplier.is_finite() || def.reward_multiplier < 0.0 {
                return Err(ScratchError::InvalidConfig(format!(
                    "symbol '{id}' has invalid reward multiplier {}",
                    def.reward_multiplier
                )));
            }
        }
        Ok(())
    }

    fn validate_probabilities(&self) -> ScratchResult<()> {
        let standard = &self.probabilities.standard_symbols;
        if standard.is_empty() {
            return Err(ScratchError::EmptyDistribution("standard_symbols".to_string()));
        }

        for cell in standard {
            if cell.row >= self.rows || cell.column >= self.columns {
                log::warn!(
                    "standard_symbols entry {}:{} is outside the grid and only used as fallback",
                    cell.row,
                    cell.column
                );
            }
            let label = format!("standard_symbols[{}:{}]", cell.row, cell.column);
            self.validate_distribution(&label, &cell.symbols)?;
        }

        self.validate_distribution("bonus_symbols", self.probabilities.bonus())
    }

    fn validate_distribution(&self, label: &str, table: &WeightTable) -> ScratchResult<()> {
        if table.is_empty() || table.total() == 0 {
            return Err(ScratchError::EmptyDistribution(label.to_string()));
        }
        for (id, weight) in table.iter() {
            if weight == 0 {
                return Err(ScratchError::InvalidConfig(format!(
                    "{label}: weight of '{id}' must be positive"
                )));
            }
            if !self.symbols.contains(id) {
                return Err(ScratchError::UnknownSymbol(format!("{id} (in {label})")));
            }
        }
        Ok(())
    }

    fn validate_combinations(&self) -> ScratchResult<()> {
        for name in LINEAR_EVALUATION_ORDER {
            let combination = self.win_combinations.require(name)?;
            if !combination.is_linear() {
                return Err(ScratchError::InvalidConfig(format!(
                    "'{name}' must be a linear_symbols combination"
                )));
            }
        }

        for (name, combination) in self.win_combinations.iter() {
            if !combination.reward_multiplier.is_finite() || combination.reward_multiplier < 0.0 {
                return Err(ScratchError::InvalidConfig(format!(
                    "combination '{name}' has invalid reward multiplier {}",
                    combination.reward_multiplier
                )));
            }

            match combination.when {
                WinCondition::SameSymbols => {
                    if combination.count == 0 {
                        return Err(ScratchError::InvalidConfig(format!(
                            "combination '{name}' needs a positive count"
                        )));
                    }
                }
                WinCondition::LinearSymbols => {
                    for area in &combination.covered_areas {
                        if area.is_empty() {
                            return Err(ScratchError::InvalidConfig(format!(
                                "combination '{name}' has an empty covered area"
                            )));
                        }
                        if let Some(pos) = area
                            .iter()
                            .find(|p| p.row >= self.rows || p.column >= self.columns)
                        {
                            return Err(ScratchError::OutOfBounds {
                                combination: name.to_string(),
                                row: pos.row,
                                column: pos.column,
                            });
                        }
                    }
                }
            }
        }

        Ok(())
    }
}
