//! Merton jump-diffusion path simulation.

use rand::Rng;
use rand_distr::{Distribution, Normal, Poisson, StandardNormal};
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::process::streams::{Stream, StreamSeeds};
use crate::process::try_alloc_prices;
use crate::types::config::MertonParams;
use crate::types::error::{PricingError, PricingResult};
use crate::types::result::PriceTrajectoryMatrix;

/// Per-path draws, reused across the paths handled by one rayon task.
pub struct PathDraws {
    /// Brownian increments, N(0, dt)
    brownian: Vec<f64>,
    /// Jump counts per step
    jump_counts: Vec<f64>,
    /// Jump magnitudes per step
    jump_sizes: Vec<f64>,
}

impl PathDraws {
    pub fn new(n_steps: usize) -> Self {
        Self {
            brownian: vec![0.0; n_steps],
            jump_counts: vec![0.0; n_steps],
            jump_sizes: vec![0.0; n_steps],
        }
    }
}

/// Step-by-step log-Euler scheme for GBM with Poisson jumps.
///
/// Each step applies
/// S[t] = S[t-1] * exp((r - 0.5 * sigma^2) * dt + sigma * W + J * N)
/// where W ~ N(0, dt), N ~ Poisson(lambda * dt) and J ~ N(mu_jump, sigma_jump).
///
/// A step carries one jump magnitude scaled by the jump count, not a sum of
/// N independent magnitudes.
pub struct JumpDiffusionProcess {
    /// Initial price
    s0: f64,
    /// Number of steps per path
    n_steps: usize,
    /// Pre-computed drift term: (r - 0.5 * sigma^2) * dt
    drift_term: f64,
    /// Diffusion volatility
    sigma: f64,
    /// Standard deviation of one Brownian increment
    sqrt_dt: f64,
    /// Jump arrivals per step; None when the intensity is zero
    jump_counts: Option<Poisson<f64>>,
    /// Jump magnitudes
    jump_sizes: Normal<f64>,
}

impl JumpDiffusionProcess {
    /// Build the process from validated parameters.
    pub fn new(params: &MertonParams) -> PricingResult<Self> {
        let dt = params.dt();
        let rate = params.lambda_jump * dt;

        let jump_counts = if rate > 0.0 {
            let poisson = Poisson::new(rate).map_err(|_| {
                PricingError::invalid("lambda_jump", params.lambda_jump, "invalid Poisson rate")
            })?;
            Some(poisson)
        } else {
            None
        };

        let jump_sizes = Normal::new(params.mu_jump, params.sigma_jump).map_err(|_| {
            PricingError::invalid("sigma_jump", params.sigma_jump, "invalid jump distribution")
        })?;

        Ok(Self {
            s0: params.s0,
            n_steps: params.n_steps,
            drift_term: (params.r - 0.5 * params.sigma * params.sigma) * dt,
            sigma: params.sigma,
            sqrt_dt: dt.sqrt(),
            jump_counts,
            jump_sizes,
        })
    }

    /// Simulate one path into `row` (length n_steps + 1).
    ///
    /// All increments of the path are drawn first, then the recurrence runs.
    pub fn fill_path<R: Rng + ?Sized>(&self, rng: &mut R, draws: &mut PathDraws, row: &mut [f64]) {
        debug_assert_eq!(row.len(), self.n_steps + 1);

        for w in draws.brownian.iter_mut() {
            let z: f64 = StandardNormal.sample(rng);
            *w = self.sqrt_dt * z;
        }
        match &self.jump_counts {
            Some(poisson) => {
                for n in draws.jump_counts.iter_mut() {
                    *n = poisson.sample(rng);
                }
            }
            None => draws.jump_counts.fill(0.0),
        }
        for j in draws.jump_sizes.iter_mut() {
            *j = self.jump_sizes.sample(rng);
        }

        row[0] = self.s0;
        for t in 1..=self.n_steps {
            let exponent = self.drift_term
                + self.sigma * draws.brownian[t - 1]
                + draws.jump_sizes[t - 1] * draws.jump_counts[t - 1];
            row[t] = row[t - 1] * exponent.exp();
        }
    }
}

/// Simulate the full trajectory matrix for visualisation or pricing.
pub fn simulate_jump_diffusion_paths(params: &MertonParams) -> PricingResult<PriceTrajectoryMatrix> {
    simulate_paths(params, Stream::Paths)
}

/// Simulate all paths on the given stream. Paths run in parallel.
pub(crate) fn simulate_paths(
    params: &MertonParams,
    stream: Stream,
) -> PricingResult<PriceTrajectoryMatrix> {
    params.validate()?;

    let n_columns = params.n_steps + 1;
    let len = params
        .n_simulations
        .checked_mul(n_columns)
        .ok_or_else(|| {
            PricingError::invalid(
                "n_simulations",
                params.n_simulations as f64,
                "path matrix too large",
            )
        })?;

    let process = JumpDiffusionProcess::new(params)?;
    let seeds = StreamSeeds::new(params.seed, stream);

    debug!(
        n_simulations = params.n_simulations,
        n_steps = params.n_steps,
        lambda_jump = params.lambda_jump,
        ?stream,
        "simulating jump-diffusion paths"
    );

    let mut data = try_alloc_prices(len, params.n_simulations, "path matrix too large")?;
    data.par_chunks_mut(n_columns)
        .enumerate()
        .for_each_init(
            || PathDraws::new(params.n_steps),
            |draws, (path, row)| {
                let mut rng = seeds.rng(path as u64);
                process.fill_path(&mut rng, draws, row);
            },
        );

    if let Some(idx) = data.iter().position(|s| !(s.is_finite() && *s > 0.0)) {
        let (path, step) = (idx / n_columns, idx % n_columns);
        warn!(path, step, value = data[idx], "trajectory value out of range");
        return Err(PricingError::overflow(format!(
            "price {} at step {} of path {}",
            data[idx], step, path
        )));
    }

    Ok(PriceTrajectoryMatrix::from_raw(
        data,
        params.n_simulations,
        n_columns,
        params.t,
    ))
}

/// Simulate all paths on the given stream, keeping only the price at maturity.
///
/// Each path is generated exactly as in `simulate_paths` on the same stream, so
/// the result equals that matrix's terminal column. Only one scratch row per
/// rayon task is held in memory.
pub(crate) fn simulate_terminal_prices(
    params: &MertonParams,
    stream: Stream,
) -> PricingResult<Vec<f64>> {
    params.validate()?;

    let process = JumpDiffusionProcess::new(params)?;
    let seeds = StreamSeeds::new(params.seed, stream);

    debug!(
        n_simulations = params.n_simulations,
        n_steps = params.n_steps,
        lambda_jump = params.lambda_jump,
        ?stream,
        "simulating jump-diffusion terminal prices"
    );

    let mut terminal = try_alloc_prices(
        params.n_simulations,
        params.n_simulations,
        "too many paths",
    )?;
    terminal.par_iter_mut().enumerate().for_each_init(
        || (PathDraws::new(params.n_steps), vec![0.0; params.n_steps + 1]),
        |(draws, row), (path, out)| {
            let mut rng = seeds.rng(path as u64);
            process.fill_path(&mut rng, draws, row);
            *out = row[params.n_steps];
        },
    );

    // Infinity and zero are absorbing under the recurrence, so the last step
    // shows any earlier blow-up.
    if let Some(path) = terminal.iter().position(|s| !(s.is_finite() && *s > 0.0)) {
        let value = terminal[path];
        warn!(path, value, "terminal price out of range");
        return Err(PricingError::overflow(format!(
            "terminal price {} on path {}",
            value, path
        )));
    }

    Ok(terminal)
}
