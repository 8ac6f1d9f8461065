//! Merton jump-diffusion Monte Carlo pricer.
//!
//! Prices come from the terminal prices of simulated trajectories; only the last
//! step of each path is kept. `price_merton_call` and `price_merton_put` each run
//! their own simulation; `price_merton` simulates once and derives both prices
//! from the same paths.

use tracing::debug;

use crate::pricing::payoff::{discounted_mean_payoff, OptionType};
use crate::process::jump_diffusion::simulate_terminal_prices;
use crate::process::streams::Stream;
use crate::types::config::MertonParams;
use crate::types::error::PricingResult;
use crate::types::result::OptionPrices;

/// Monte Carlo price of a European call under jump-diffusion.
pub fn price_merton_call(params: &MertonParams) -> PricingResult<f64> {
    price_european(params, OptionType::Call, Stream::MertonCall)
}

/// Monte Carlo price of a European put under jump-diffusion.
pub fn price_merton_put(params: &MertonParams) -> PricingResult<f64> {
    price_european(params, OptionType::Put, Stream::MertonPut)
}

/// Call and put from a single shared simulation.
///
/// With a seed, the paths are the ones `simulate_jump_diffusion_paths` returns.
pub fn price_merton(params: &MertonParams) -> PricingResult<OptionPrices> {
    debug!(
        s0 = params.s0,
        k = params.k,
        lambda_jump = params.lambda_jump,
        n_simulations = params.n_simulations,
        n_steps = params.n_steps,
        "pricing Merton call and put from shared paths"
    );

    let terminal = simulate_terminal_prices(params, Stream::Paths)?;
    let discount = params.discount_factor();

    Ok(OptionPrices {
        call: discounted_mean_payoff(&terminal, params.k, OptionType::Call, discount)?,
        put: discounted_mean_payoff(&terminal, params.k, OptionType::Put, discount)?,
    })
}

fn price_european(
    params: &MertonParams,
    option_type: OptionType,
    stream: Stream,
) -> PricingResult<f64> {
    debug!(
        ?option_type,
        s0 = params.s0,
        k = params.k,
        lambda_jump = params.lambda_jump,
        n_simulations = params.n_simulations,
        n_steps = params.n_steps,
        "pricing Merton option"
    );

    let terminal = simulate_terminal_prices(params, stream)?;
    discounted_mean_payoff(
        &terminal,
        params.k,
        option_type,
        params.discount_factor(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::black_scholes::price_black_scholes_call;
    use crate::process::jump_diffusion::simulate_jump_diffusion_paths;
    use crate::types::error::PricingError;
    use approx::assert_abs_diff_eq;

    fn params() -> MertonParams {
        MertonParams::new(100.0, 0.05, 0.2, 1.0, 100.0, 20_000, 0.2, -0.15, 0.1, 50, Some(42))
    }

    #[test]
    fn test_no_jumps_matches_black_scholes() {
        let mut p = params();
        p.lambda_jump = 0.0;
        p.n_simulations = 100_000;
        p.n_steps = 20;
        let merton = price_merton_call(&p).unwrap();
        let bs = price_black_scholes_call(&p.diffusion()).unwrap();
        assert_abs_diff_eq!(merton, bs, epsilon = 0.3);
        assert_abs_diff_eq!(merton, 10.45, epsilon = 0.3);
    }

    #[test]
    fn test_prices_non_negative() {
        let call = price_merton_call(&params()).unwrap();
        let put = price_merton_put(&params()).unwrap();
        assert!(call >= 0.0);
        assert!(put >= 0.0);
    }

    #[test]
    fn test_shared_paths_parity_is_exact() {
        let p = params();
        let prices = price_merton(&p).unwrap();
        let paths = simulate_jump_diffusion_paths(&p).unwrap();
        let terminal = paths.terminal_prices();
        let mean = terminal.iter().sum::<f64>() / terminal.len() as f64;
        let expected = p.discount_factor() * (mean - p.k);
        assert_abs_diff_eq!(prices.parity_gap(), expected, epsilon = 1e-8);
    }

    #[test]
    fn test_separate_queries_use_separate_paths() {
        let p = params();
        let shared = price_merton(&p).unwrap();
        let call = price_merton_call(&p).unwrap();
        assert_ne!(shared.call, call);
        // Same model, so the estimates still agree statistically
        assert_abs_diff_eq!(shared.call, call, epsilon = 0.6);
    }

    #[test]
    fn test_negative_jumps_raise_put_value() {
        let mut calm = params();
        calm.lambda_jump = 0.0;
        let mut jumpy = params();
        jumpy.lambda_jump = 1.0;
        jumpy.mu_jump = -0.3;
        jumpy.sigma_jump = 0.05;
        let calm_put = price_merton_put(&calm).unwrap();
        let jumpy_put = price_merton_put(&jumpy).unwrap();
        assert!(jumpy_put > calm_put + 5.0, "{} vs {}", jumpy_put, calm_put);
    }

    #[test]
    fn test_unallocatable_path_count_is_an_error() {
        let mut p = params();
        p.n_simulations = 1usize << 60;
        assert!(matches!(
            price_merton_put(&p).unwrap_err(),
            PricingError::InvalidParameter { name: "n_simulations", .. }
        ));
    }

    #[test]
    fn test_zero_steps_rejected() {
        let mut p = params();
        p.n_steps = 0;
        assert!(matches!(
            price_merton_call(&p).unwrap_err(),
            PricingError::InvalidParameter { name: "n_steps", .. }
        ));
        assert!(matches!(
            price_merton(&p).unwrap_err(),
            PricingError::InvalidParameter { name: "n_steps", .. }
        ));
    }
}
