//! Symbol definitions

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{ScratchError, ScratchResult};

/// Symbol type classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SymbolKind {
    /// Regular paying symbol
    Standard,
    /// Bonus symbol - modifies the final reward, never pays on its own
    Bonus,
}

/// What a bonus symbol does to the reward
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BonusImpact {
    /// Multiplies the reward (10x, 5x)
    MultiplyReward,
    /// Adds a flat amount (+1000, +500)
    ExtraBonus,
    /// No effect
    Miss,
}

/// A symbol definition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolDef {
    /// Base multiplier applied to the bet
    #[serde(default)]
    pub reward_multiplier: f64,
    /// Symbol type
    #[serde(rename = "type")]
    pub kind: SymbolKind,
    /// Flat amount for additive bonuses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra: Option<f64>,
    /// Bonus impact (bonus symbols only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub impact: Option<BonusImpact>,
}

impl SymbolDef {
    /// Create a standard symbol
    pub fn standard(reward_multiplier: f64) -> Self {
        Self {
            reward_multiplier,
            kind: SymbolKind::Standard,
            extra: None,
            impact: None,
        }
    }

    /// Create a bonus symbol
    pub fn bonus(reward_multiplier: f64, extra: Option<f64>, impact: BonusImpact) -> Self {
        Self {
            reward_multiplier,
            kind: SymbolKind::Bonus,
            extra,
            impact: Some(impact),
        }
    }

    pub fn is_standard(&self) -> bool {
        self.kind == SymbolKind::Standard
    }
}

/// Symbol table keyed by identifier, in document order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SymbolTable(IndexMap<String, SymbolDef>);

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a definition
    pub fn insert(&mut self, id: impl Into<String>, def: SymbolDef) {
        self.0.insert(id.into(), def);
    }

    pub fn get(&self, id: &str) -> Option<&SymbolDef> {
        self.0.get(id)
    }

    /// Look up a symbol, failing if it is not defined
    pub fn require(&self, id: &str) -> ScratchResult<&SymbolDef> {
        self.0
            .get(id)
            .ok_or_else(|| ScratchError::UnknownSymbol(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    /// Symbol identifiers in table order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SymbolDef)> {
        self.0.iter().map(|(id, def)| (id.as_str(), def))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(String, SymbolDef)> for SymbolTable {
    fn from_iter<T: IntoIterator<Item = (String, SymbolDef)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}
