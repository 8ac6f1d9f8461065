//! Terminal sampling for geometric Brownian motion.

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use rayon::prelude::*;
use tracing::warn;

use crate::process::streams::{Stream, StreamSeeds};
use crate::process::try_alloc_prices;
use crate::types::config::BlackScholesParams;
use crate::types::error::{PricingError, PricingResult};

/// Draws per generator. Each chunk is one parallel work unit.
pub const CHUNK_SIZE: usize = 4096;

/// Samples terminal prices of GBM with the exact solution.
///
/// S_T = S0 * exp((r - 0.5 * sigma^2) * T + sigma * W_T), W_T ~ N(0, T)
///
/// One draw per path, so there is no discretisation error.
pub struct GbmTerminalSampler {
    /// Initial price
    s0: f64,
    /// Pre-computed drift term: (r - 0.5 * sigma^2) * T
    drift_term: f64,
    /// Volatility
    sigma: f64,
    /// Standard deviation of W_T
    sqrt_t: f64,
}

impl GbmTerminalSampler {
    /// Create a sampler. Parameters are assumed validated.
    pub fn new(params: &BlackScholesParams) -> Self {
        Self {
            s0: params.s0,
            drift_term: (params.r - 0.5 * params.sigma * params.sigma) * params.t,
            sigma: params.sigma,
            sqrt_t: params.t.sqrt(),
        }
    }

    /// Terminal price for a Brownian value `w`.
    #[inline]
    pub fn terminal(&self, w: f64) -> f64 {
        self.s0 * (self.drift_term + self.sigma * w).exp()
    }

    /// Fill `out` with independent terminal prices.
    #[inline]
    pub fn sample_into<R: Rng + ?Sized>(&self, rng: &mut R, out: &mut [f64]) {
        for s in out.iter_mut() {
            let z: f64 = StandardNormal.sample(rng);
            *s = self.terminal(self.sqrt_t * z);
        }
    }
}

/// Draw `n_simulations` terminal prices on the given stream.
///
/// Chunks are sampled in parallel; every value is checked to be finite and positive.
pub fn simulate_terminal_prices(
    params: &BlackScholesParams,
    stream: Stream,
) -> PricingResult<Vec<f64>> {
    params.validate()?;

    let sampler = GbmTerminalSampler::new(params);
    let seeds = StreamSeeds::new(params.seed, stream);

    let mut terminal =
        try_alloc_prices(params.n_simulations, params.n_simulations, "too many paths")?;
    terminal
        .par_chunks_mut(CHUNK_SIZE)
        .enumerate()
        .for_each(|(chunk, out)| {
            let mut rng = seeds.rng(chunk as u64);
            sampler.sample_into(&mut rng, out);
        });

    if let Some(path) = terminal.iter().position(|s| !(s.is_finite() && *s > 0.0)) {
        let value = terminal[path];
        warn!(path, value, sigma = params.sigma, t = params.t, "GBM terminal price out of range");
        return Err(PricingError::overflow(format!(
            "terminal price {} on path {}",
            value, path
        )));
    }

    Ok(terminal)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    fn params(n: usize) -> BlackScholesParams {
        BlackScholesParams::new(100.0, 0.05, 0.2, 1.0, 100.0, n, Some(42))
    }

    #[test]
    fn test_zero_volatility_is_deterministic() {
        let mut p = params(10);
        p.sigma = 0.0;
        let sampler = GbmTerminalSampler::new(&p);
        let mut out = [0.0; 10];
        sampler.sample_into(&mut Pcg64::seed_from_u64(1), &mut out);
        let expected = 100.0 * 0.05f64.exp();
        for s in out {
            assert!((s - expected).abs() < 1e-9);
        }
    }

    #[test]
    fn test_terminal_prices_positive_and_sized() {
        let terminal = simulate_terminal_prices(&params(10_000), Stream::BlackScholesCall).unwrap();
        assert_eq!(terminal.len(), 10_000);
        assert!(terminal.iter().all(|&s| s > 0.0));
    }

    #[test]
    fn test_seeded_terminal_prices_reproducible() {
        let a = simulate_terminal_prices(&params(9_000), Stream::BlackScholesCall).unwrap();
        let b = simulate_terminal_prices(&params(9_000), Stream::BlackScholesCall).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_terminal_mean_is_forward() {
        // E[S_T] = S0 * exp(rT)
        let terminal = simulate_terminal_prices(&params(200_000), Stream::BlackScholesCall).unwrap();
        let mean = terminal.iter().sum::<f64>() / terminal.len() as f64;
        let forward = 100.0 * 0.05f64.exp();
        assert!((mean - forward).abs() < 0.3, "mean {} vs forward {}", mean, forward);
    }

    #[test]
    fn test_unallocatable_path_count_is_an_error() {
        let err = simulate_terminal_prices(&params(1usize << 60), Stream::BlackScholesPut).unwrap_err();
        assert!(matches!(err, PricingError::InvalidParameter { name: "n_simulations", .. }));
    }

    #[test]
    fn test_extreme_volatility_overflows() {
        let mut p = params(1_000);
        p.sigma = 1e6;
        let err = simulate_terminal_prices(&p, Stream::BlackScholesCall).unwrap_err();
        assert!(matches!(err, PricingError::NumericOverflow { .. }));
    }
}
