//! Scratch Engine — round evaluation
//!
//! One round: generate matrix → match combinations → reward → bonus.

use serde::{Deserialize, Serialize};

use crate::bonus::apply_bonus;
use crate::config::GameConfig;
use crate::error::{ScratchError, ScratchResult};
use crate::matrix::{Matrix, MatrixGenerator};
use crate::paytable::{AppliedWins, evaluate};
use crate::reward::calculate_reward;
use crate::rng::{RandomSource, SeededSource};

/// Outcome of one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Generated matrix (rows × columns)
    pub matrix: Matrix,
    /// Final reward after bonus
    pub reward: f64,
    /// Satisfied combinations per symbol
    pub applied_winning_combinations: AppliedWins,
    /// Drawn bonus symbol (absent when there was no win)
    pub applied_bonus_symbol: Option<String>,
}

impl EvaluationResult {
    /// Any combination satisfied
    pub fn is_win(&self) -> bool {
        !self.applied_winning_combinations.is_empty()
    }
}

/// Evaluate one round against a validated config
pub fn evaluate_round<R: RandomSource + ?Sized>(
    config: &GameConfig,
    bet: f64,
    rng: &mut R,
) -> ScratchResult<EvaluationResult> {
    if !bet.is_finite() || bet <= 0.0 {
        return Err(ScratchError::InvalidBet(bet));
    }

    let matrix = MatrixGenerator::from_config(config).generate(rng)?;
    let wins = evaluate(&matrix, &config.symbols, &config.win_combinations)?;
    let reward = calculate_reward(&wins, bet, &config.symbols, &config.win_combinations)?;
    let outcome = apply_bonus(reward, &wins, config.probabilities.bonus(), rng);

    log::debug!(
        "round: bet {bet}, base reward {reward}, final {} (bonus {:?})",
        outcome.reward,
        outcome.bonus_symbol
    );

    Ok(EvaluationResult {
        matrix,
        reward: outcome.reward,
        applied_winning_combinations: wins,
        applied_bonus_symbol: outcome.bonus_symbol,
    })
}

/// Session statistics
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionStats {
    pub total_rounds: u64,
    pub total_bet: f64,
    pub total_win: f64,
    pub wins: u64,
    pub losses: u64,
    pub bonuses_applied: u64,
    pub max_win_ratio: f64,
}

impl SessionStats {
    /// Calculate RTP
    pub fn rtp(&self) -> f64 {
        if self.total_bet > 0.0 {
            (self.total_win / self.total_bet) * 100.0
        } else {
            0.0
        }
    }

    /// Calculate hit rate
    pub fn hit_rate(&self) -> f64 {
        if self.total_rounds > 0 {
            (self.wins as f64 / self.total_rounds as f64) * 100.0
        } else {
            0.0
        }
    }

    fn record(&mut self, bet: f64, result: &EvaluationResult) {
        self.total_rounds += 1;
        self.total_bet += bet;
        self.total_win += result.reward;

        if result.is_win() {
            self.wins += 1;
        } else {
            self.losses += 1;
        }

        if result.applied_bonus_symbol.is_some() {
            self.bonuses_applied += 1;
        }

        let ratio = result.reward / bet;
        if ratio > self.max_win_ratio {
            self.max_win_ratio = ratio;
        }
    }
}

/// Scratch Engine
///
/// Owns a validated configuration and its own random source. Engines are
/// independent; run one per player or per worker.
pub struct ScratchEngine {
    /// Configuration
    config: GameConfig,
    /// Random number generator
    rng: SeededSource,
    /// Current session stats
    stats: SessionStats,
}

impl ScratchEngine {
    /// Create an engine seeded from the OS
    pub fn new(config: GameConfig) -> ScratchResult<Self> {
        Self::with_rng(config, SeededSource::from_entropy())
    }

    /// Create a reproducible engine
    pub fn with_seed(config: GameConfig, seed: u64) -> ScratchResult<Self> {
        Self::with_rng(config, SeededSource::from_seed_u64(seed))
    }

    fn with_rng(config: GameConfig, rng: SeededSource) -> ScratchResult<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng,
            stats: SessionStats::default(),
        })
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // CONFIGURATION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Seed RNG for reproducible results
    pub fn seed(&mut self, seed: u64) {
        self.rng = SeededSource::from_seed_u64(seed);
    }

    /// Get current config
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Get session stats
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// Reset session stats
    pub fn reset_stats(&mut self) {
        self.stats = SessionStats::default();
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ROUND EXECUTION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Play one round with the engine's own source
    pub fn play(&mut self, bet: f64) -> ScratchResult<EvaluationResult> {
        let result = evaluate_round(&self.config, bet, &mut self.rng)?;
        self.stats.record(bet, &result);
        Ok(result)
    }

    /// Play one round with an injected source
    pub fn play_with<R: RandomSource + ?Sized>(
        &mut self,
        bet: f64,
        rng: &mut R,
    ) -> ScratchResult<EvaluationResult> {
        let result = evaluate_round(&self.config, bet, rng)?;
        self.stats.record(bet, &result);
        Ok(result)
    }

    /// Play `rounds` rounds and return the accumulated stats
    pub fn simulate(&mut self, bet: f64, rounds: u64) -> ScratchResult<&SessionStats> {
        for _ in 0..rounds {
            self.play(bet)?;
        }
        log::info!(
            "simulated {rounds} round(s): RTP {:.2}%, hit rate {:.2}%",
            self.stats.rtp(),
            self.stats.hit_rate()
        );
        Ok(&self.stats)
    }
}
