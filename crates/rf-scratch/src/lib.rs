//! # rf-scratch — Scratch Card Round Engine
//!
//! Evaluates a single round of a grid-based scratch game: weighted symbol
//! generation, pattern and count matching, multiplicative reward aggregation
//! and one optional bonus modifier.
//!
//! ## Features
//!
//! - **Weighted Generation**: Per-cell standard distributions plus random bonus overlays
//! - **Combination Matching**: Linear covered areas and occurrence thresholds
//! - **Reward Aggregation**: Multiplicative per symbol, additive across symbols
//! - **Bonus Stage**: Multiply / add / miss, applied only on a win
//! - **Reproducible Rounds**: Every draw goes through an injectable [`RandomSource`]
//!
//! ## Architecture
//!
//! ```text
//! GameConfig (JSON / YAML)
//!     │
//!     ├── Probabilities ──> MatrixGenerator ──> Matrix
//!     │                                           │
//!     ├── Paytable ──────> match_linear + match_counts ──> AppliedWins
//!     │                                                       │
//!     ├── SymbolTable ───> calculate_reward ──────────────> reward
//!     │                                                       │
//!     └── bonus_symbols ─> apply_bonus ───────────────────> EvaluationResult
//! ```

pub mod bonus;
pub mod config;
pub mod engine;
pub mod error;
pub mod matrix;
pub mod paytable;
pub mod probability;
pub mod reward;
pub mod rng;
pub mod symbols;

pub use bonus::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use matrix::*;
pub use paytable::*;
pub use probability::*;
pub use reward::*;
pub use rng::*;
pub use symbols::*;
