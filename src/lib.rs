//! Monte Carlo option pricing engine.
//!
//! Prices European calls and puts under two models:
//! - Black-Scholes: exact terminal sampling of geometric Brownian motion
//! - Merton jump-diffusion: step-by-step paths with Poisson jumps
//!
//! Every call is stateless and takes a fully specified parameter struct. Paths are
//! simulated in parallel with rayon; a fixed seed makes results reproducible
//! independently of the thread count.
//!
//! ```
//! use mc_option_pricer::{price_black_scholes_call, BlackScholesParams};
//!
//! let params = BlackScholesParams::new(100.0, 0.05, 0.2, 1.0, 100.0, 50_000, Some(42));
//! let call = price_black_scholes_call(&params).unwrap();
//! assert!((call - 10.45).abs() < 0.5);
//! ```

pub mod types;
pub mod process;
pub mod pricing;
pub mod simulation;

#[cfg(feature = "python")]
mod python;

pub use pricing::{
    price_black_scholes, price_black_scholes_call, price_black_scholes_put, price_merton,
    price_merton_call, price_merton_put, OptionType,
};
pub use process::simulate_jump_diffusion_paths;
pub use simulation::{run_pricing_batch, PricingBatchConfig, PricingRequest};
pub use types::{
    BatchPricingResult, BlackScholesParams, MertonParams, OptionPrices, PriceTrajectoryMatrix,
    PricingError, PricingResult,
};
