//! Core types for the pricing engine.

pub mod config;
pub mod error;
pub mod result;

pub use config::{BlackScholesParams, MertonParams};
pub use error::{PricingError, PricingResult};
pub use result::{BatchPricingResult, OptionPrices, PriceTrajectoryMatrix};
