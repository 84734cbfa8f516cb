//! Reward calculation

use crate::error::ScratchResult;
use crate::paytable::{AppliedWins, Paytable};
use crate::symbols::SymbolTable;

/// Reward for one symbol: `bet * symbol multiplier * Π combination multipliers`
pub fn symbol_reward(bet: f64, symbol_multiplier: f64, combination_multipliers: &[f64]) -> f64 {
    combination_multipliers
        .iter()
        .fold(bet * symbol_multiplier, |amount, m| amount * m)
}

/// Sum of per-symbol rewards over all applied wins.
///
/// Bonus symbols never pay directly, even when they satisfy a combination.
pub fn calculate_reward(
    wins: &AppliedWins,
    bet: f64,
    symbols: &SymbolTable,
    paytable: &Paytable,
) -> ScratchResult<f64> {
    let mut total = 0.0;

    for (id, combinations) in wins.iter() {
        let symbol = symbols.require(id)?;
        if !symbol.is_standard() {
            continue;
        }

        let multipliers = combinations
            .iter()
            .map(|name| paytable.require(name).map(|c| c.reward_multiplier))
            .collect::<ScratchResult<Vec<_>>>()?;

        let amount = symbol_reward(bet, symbol.reward_multiplier, &multipliers);
        log::trace!("{id}: {amount} from {} combination(s)", multipliers.len());
        total += amount;
    }

    Ok(total)
}
