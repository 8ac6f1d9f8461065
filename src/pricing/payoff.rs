//! European payoffs and the discounted Monte Carlo estimator.

use crate::types::error::{PricingError, PricingResult};

/// European option side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    Call,
    Put,
}

impl OptionType {
    /// Settlement value at maturity, floored at zero.
    #[inline]
    pub fn payoff(self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }
}

/// exp(-rT) * mean(payoff(S_T)) over the given terminal prices.
///
/// `discount` is applied once, after averaging. The sum runs sequentially so a
/// seeded price is bit-for-bit reproducible.
pub fn discounted_mean_payoff(
    terminal: &[f64],
    strike: f64,
    option_type: OptionType,
    discount: f64,
) -> PricingResult<f64> {
    if terminal.is_empty() {
        return Err(PricingError::invalid("n_simulations", 0.0, "must be at least 1"));
    }

    let total: f64 = terminal.iter().map(|&s| option_type.payoff(s, strike)).sum();
    let price = discount * total / terminal.len() as f64;

    if !price.is_finite() {
        return Err(PricingError::overflow(format!("{:?} price is {}", option_type, price)));
    }
    Ok(price)
}
