//! Pricing parameters.
//!
//! Both structs are plain immutable configurations handed to the pricers on every
//! call. There are no global defaults: callers must fill in every field.

use crate::types::error::{PricingError, PricingResult};

/// Parameters for Black-Scholes (geometric Brownian motion) pricing.
#[cfg_attr(feature = "python", pyo3::pyclass(get_all, set_all))]
#[derive(Debug, Clone, PartialEq)]
pub struct BlackScholesParams {
    /// Initial asset price
    pub s0: f64,

    /// Risk-free rate (annualized, continuously compounded)
    pub r: f64,

    /// Volatility (annualized)
    pub sigma: f64,

    /// Time to maturity in years
    pub t: f64,

    /// Strike price
    pub k: f64,

    /// Number of simulated paths
    pub n_simulations: usize,

    /// Random seed for reproducibility (None = fresh entropy)
    pub seed: Option<u64>,
}

impl BlackScholesParams {
    /// Create a new parameter set.
    pub fn new(
        s0: f64,
        r: f64,
        sigma: f64,
        t: f64,
        k: f64,
        n_simulations: usize,
        seed: Option<u64>,
    ) -> Self {
        Self {
            s0,
            r,
            sigma,
            t,
            k,
            n_simulations,
            seed,
        }
    }

    /// Check every field against its valid range.
    ///
    /// Comparisons are written so that NaN fails them.
    pub fn validate(&self) -> PricingResult<()> {
        if !(self.s0 > 0.0) || !self.s0.is_finite() {
            return Err(PricingError::invalid("s0", self.s0, "must be positive and finite"));
        }
        if !self.r.is_finite() {
            return Err(PricingError::invalid("r", self.r, "must be finite"));
        }
        if !(self.sigma >= 0.0) || !self.sigma.is_finite() {
            return Err(PricingError::invalid("sigma", self.sigma, "must be non-negative and finite"));
        }
        if !(self.t > 0.0) || !self.t.is_finite() {
            return Err(PricingError::invalid("t", self.t, "must be positive and finite"));
        }
        if !(self.k > 0.0) || !self.k.is_finite() {
            return Err(PricingError::invalid("k", self.k, "must be positive and finite"));
        }
        if self.n_simulations == 0 {
            return Err(PricingError::invalid("n_simulations", 0.0, "must be at least 1"));
        }
        Ok(())
    }

    /// Discount factor exp(-r * T).
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.r * self.t).exp()
    }
}

/// Parameters for Merton jump-diffusion pricing and path simulation.
#[cfg_attr(feature = "python", pyo3::pyclass(get_all, set_all))]
#[derive(Debug, Clone, PartialEq)]
pub struct MertonParams {
    /// Initial asset price
    pub s0: f64,

    /// Risk-free rate (annualized, continuously compounded)
    pub r: f64,

    /// Diffusion volatility (annualized)
    pub sigma: f64,

    /// Time to maturity in years
    pub t: f64,

    /// Strike price
    pub k: f64,

    /// Number of simulated paths
    pub n_simulations: usize,

    /// Poisson jump intensity per unit time
    pub lambda_jump: f64,

    /// Mean of the jump magnitude
    pub mu_jump: f64,

    /// Standard deviation of the jump magnitude
    pub sigma_jump: f64,

    /// Number of time steps per path
    pub n_steps: usize,

    /// Random seed for reproducibility (None = fresh entropy)
    pub seed: Option<u64>,
}

impl MertonParams {
    /// Create a new parameter set.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        s0: f64,
        r: f64,
        sigma: f64,
        t: f64,
        k: f64,
        n_simulations: usize,
        lambda_jump: f64,
        mu_jump: f64,
        sigma_jump: f64,
        n_steps: usize,
        seed: Option<u64>,
    ) -> Self {
        Self {
            s0,
            r,
            sigma,
            t,
            k,
            n_simulations,
            lambda_jump,
            mu_jump,
            sigma_jump,
            n_steps,
            seed,
        }
    }

    /// The diffusion part of these parameters, without the jump fields.
    pub fn diffusion(&self) -> BlackScholesParams {
        BlackScholesParams {
            s0: self.s0,
            r: self.r,
            sigma: self.sigma,
            t: self.t,
            k: self.k,
            n_simulations: self.n_simulations,
            seed: self.seed,
        }
    }

    /// Check every field against its valid range.
    pub fn validate(&self) -> PricingResult<()> {
        self.diffusion().validate()?;

        if self.n_steps == 0 {
            return Err(PricingError::invalid("n_steps", 0.0, "must be at least 1"));
        }
        if !(self.lambda_jump >= 0.0) || !self.lambda_jump.is_finite() {
            return Err(PricingError::invalid(
                "lambda_jump",
                self.lambda_jump,
                "must be non-negative and finite",
            ));
        }
        if !self.mu_jump.is_finite() {
            return Err(PricingError::invalid("mu_jump", self.mu_jump, "must be finite"));
        }
        if !(self.sigma_jump >= 0.0) || !self.sigma_jump.is_finite() {
            return Err(PricingError::invalid(
                "sigma_jump",
                self.sigma_jump,
                "must be non-negative and finite",
            ));
        }
        Ok(())
    }

    /// Length of one time step.
    #[inline]
    pub fn dt(&self) -> f64 {
        self.t / self.n_steps as f64
    }

    /// Discount factor exp(-r * T).
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.r * self.t).exp()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bs() -> BlackScholesParams {
        BlackScholesParams::new(100.0, 0.05, 0.2, 1.0, 100.0, 1000, Some(7))
    }

    fn merton() -> MertonParams {
        MertonParams::new(100.0, 0.05, 0.2, 1.0, 100.0, 1000, 0.2, -0.15, 0.1, 100, Some(7))
    }

    fn invalid_name(result: PricingResult<()>) -> &'static str {
        match result {
            Err(PricingError::InvalidParameter { name, .. }) => name,
            other => panic!("expected InvalidParameter, got {:?}", other),
        }
    }

    #[test]
    fn test_valid_params_pass() {
        assert!(bs().validate().is_ok());
        assert!(merton().validate().is_ok());
    }

    #[test]
    fn test_zero_sigma_is_valid() {
        let mut p = bs();
        p.sigma = 0.0;
        assert!(p.validate().is_ok());
    }

    #[test]
    fn test_black_scholes_rejections() {
        let mut p = bs();
        p.s0 = 0.0;
        assert_eq!(invalid_name(p.validate()), "s0");

        let mut p = bs();
        p.sigma = -0.1;
        assert_eq!(invalid_name(p.validate()), "sigma");

        let mut p = bs();
        p.t = 0.0;
        assert_eq!(invalid_name(p.validate()), "t");

        let mut p = bs();
        p.k = -5.0;
        assert_eq!(invalid_name(p.validate()), "k");

        let mut p = bs();
        p.n_simulations = 0;
        assert_eq!(invalid_name(p.validate()), "n_simulations");

        let mut p = bs();
        p.r = f64::NAN;
        assert_eq!(invalid_name(p.validate()), "r");
    }

    #[test]
    fn test_nan_is_rejected() {
        let mut p = bs();
        p.s0 = f64::NAN;
        assert_eq!(invalid_name(p.validate()), "s0");
    }

    #[test]
    fn test_merton_rejections() {
        let mut p = merton();
        p.n_steps = 0;
        assert_eq!(invalid_name(p.validate()), "n_steps");

        let mut p = merton();
        p.sigma_jump = -0.01;
        assert_eq!(invalid_name(p.validate()), "sigma_jump");

        let mut p = merton();
        p.lambda_jump = -1.0;
        assert_eq!(invalid_name(p.validate()), "lambda_jump");

        let mut p = merton();
        p.mu_jump = f64::INFINITY;
        assert_eq!(invalid_name(p.validate()), "mu_jump");

        // Diffusion fields are checked too
        let mut p = merton();
        p.n_simulations = 0;
        assert_eq!(invalid_name(p.validate()), "n_simulations");
    }

    #[test]
    fn test_dt_and_discount() {
        let p = merton();
        assert!((p.dt() - 0.01).abs() < 1e-15);
        assert!((p.discount_factor() - (-0.05f64).exp()).abs() < 1e-15);
        assert_eq!(p.diffusion().discount_factor(), p.discount_factor());
    }
}
