//! Black-Scholes Monte Carlo pricer.
//!
//! Call and put each draw their own terminal sample; no randomness is shared
//! between the two prices.

use tracing::debug;

use crate::pricing::payoff::{discounted_mean_payoff, OptionType};
use crate::process::gbm::simulate_terminal_prices;
use crate::process::streams::Stream;
use crate::types::config::BlackScholesParams;
use crate::types::error::PricingResult;
use crate::types::result::OptionPrices;

/// Monte Carlo price of a European call under GBM.
pub fn price_black_scholes_call(params: &BlackScholesParams) -> PricingResult<f64> {
    price_european(params, OptionType::Call, Stream::BlackScholesCall)
}

/// Monte Carlo price of a European put under GBM.
pub fn price_black_scholes_put(params: &BlackScholesParams) -> PricingResult<f64> {
    price_european(params, OptionType::Put, Stream::BlackScholesPut)
}

/// Both prices, each from an independent sample.
pub fn price_black_scholes(params: &BlackScholesParams) -> PricingResult<OptionPrices> {
    Ok(OptionPrices {
        call: price_black_scholes_call(params)?,
        put: price_black_scholes_put(params)?,
    })
}

fn price_european(
    params: &BlackScholesParams,
    option_type: OptionType,
    stream: Stream,
) -> PricingResult<f64> {
    debug!(
        ?option_type,
        s0 = params.s0,
        k = params.k,
        sigma = params.sigma,
        t = params.t,
        n_simulations = params.n_simulations,
        "pricing Black-Scholes option"
    );

    let terminal = simulate_terminal_prices(params, stream)?;
    discounted_mean_payoff(&terminal, params.k, option_type, params.discount_factor())
}
