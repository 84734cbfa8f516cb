//! Bonus symbol draw and application

use crate::paytable::AppliedWins;
use crate::probability::{WeightTable, weighted_pick};
use crate::rng::RandomSource;

/// Effect of a bonus symbol on the reward
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BonusEffect {
    Multiply(f64),
    Add(f64),
    None,
}

impl BonusEffect {
    /// Effect keyed by the bonus symbol's identifier
    pub fn for_symbol(id: &str) -> Self {
        match id {
            "10x" => BonusEffect::Multiply(10.0),
            "5x" => BonusEffect::Multiply(5.0),
            "+1000" => BonusEffect::Add(1000.0),
            "+500" => BonusEffect::Add(500.0),
            _ => BonusEffect::None,
        }
    }

    pub fn apply(self, reward: f64) -> f64 {
        match self {
            BonusEffect::Multiply(factor) => reward * factor,
            BonusEffect::Add(amount) => reward + amount,
            BonusEffect::None => reward,
        }
    }
}

/// Final reward and the bonus symbol drawn for it
#[derive(Debug, Clone, PartialEq)]
pub struct BonusOutcome {
    pub reward: f64,
    pub bonus_symbol: Option<String>,
}

/// Draw one bonus symbol (one unit draw)
pub fn draw_bonus<R: RandomSource + ?Sized>(bonus: &WeightTable, rng: &mut R) -> Option<String> {
    weighted_pick(bonus, rng.next_unit()).map(str::to_string)
}

/// Apply the bonus stage to a pre-bonus reward.
///
/// - No wins: reward is forced to zero and nothing is drawn.
/// - Otherwise one bonus symbol is drawn. A zero reward stays zero, but the
///   drawn symbol is still reported.
/// - An exhausted draw leaves the reward unchanged with no bonus.
pub fn apply_bonus<R: RandomSource + ?Sized>(
    reward: f64,
    wins: &AppliedWins,
    bonus: &WeightTable,
    rng: &mut R,
) -> BonusOutcome {
    if wins.is_empty() {
        return BonusOutcome {
            reward: 0.0,
            bonus_symbol: None,
        };
    }

    let Some(symbol) = draw_bonus(bonus, rng) else {
        log::warn!("bonus draw exhausted the distribution; no bonus applied");
        return BonusOutcome {
            reward,
            bonus_symbol: None,
        };
    };

    let reward = if reward == 0.0 {
        reward
    } else {
        BonusEffect::for_symbol(&symbol).apply(reward)
    };
    log::debug!("bonus {symbol} -> reward {reward}");

    BonusOutcome {
        reward,
        bonus_symbol: Some(symbol),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::ScriptedSource;

    fn bonus_table() -> WeightTable {
        WeightTable::new()
            .with("10x", 1)
            .with("5x", 2)
            .with("+1000", 3)
            .with("+500", 4)
            .with("MISS", 5)
    }

    fn some_win() -> AppliedWins {
        let mut wins = AppliedWins::new();
        wins.record("A", "same_symbol_3_times");
        wins
    }

    #[test]
    fn test_effects() {
        assert_eq!(BonusEffect::for_symbol("10x").apply(250.0), 2500.0);
        assert_eq!(BonusEffect::for_symbol("5x").apply(250.0), 1250.0);
        assert_eq!(BonusEffect::for_symbol("+1000").apply(250.0), 1250.0);
        assert_eq!(BonusEffect::for_symbol("+500").apply(250.0), 750.0);
        assert_eq!(BonusEffect::for_symbol("MISS").apply(250.0), 250.0);
        assert_eq!(BonusEffect::for_symbol("20x").apply(250.0), 250.0);
    }

    #[test]
    fn test_no_wins_forces_zero_without_draw() {
        let mut rng = ScriptedSource::from_units([0.0]);
        let outcome = apply_bonus(1234.0, &AppliedWins::new(), &bonus_table(), &mut rng);
        assert_eq!(outcome.reward, 0.0);
        assert_eq!(outcome.bonus_symbol, None);
        assert_eq!(rng.units_left(), 1);
    }

    #[test]
    fn test_applies_drawn_bonus() {
        // total weight 15: u=0.0 -> "10x", u=0.3 -> 4.5 -> "+1000"
        let mut rng = ScriptedSource::from_units([0.0, 0.3]);
        let first = apply_bonus(100.0, &some_win(), &bonus_table(), &mut rng);
        assert_eq!(first, BonusOutcome { reward: 1000.0, bonus_symbol: Some("10x".into()) });
        let second = apply_bonus(100.0, &some_win(), &bonus_table(), &mut rng);
        assert_eq!(second, BonusOutcome { reward: 1100.0, bonus_symbol: Some("+1000".into()) });
    }

    #[test]
    fn test_zero_reward_draws_but_does_not_apply() {
        let mut rng = ScriptedSource::from_units([0.3]);
        let outcome = apply_bonus(0.0, &some_win(), &bonus_table(), &mut rng);
        assert_eq!(outcome.reward, 0.0);
        assert_eq!(outcome.bonus_symbol.as_deref(), Some("+1000"));
        assert_eq!(rng.units_left(), 0);
    }

    #[test]
    fn test_exhausted_draw_is_not_an_error() {
        let mut rng = ScriptedSource::from_units([0.3]);
        let outcome = apply_bonus(80.0, &some_win(), &WeightTable::new(), &mut rng);
        assert_eq!(outcome, BonusOutcome { reward: 80.0, bonus_symbol: None });
    }
}
