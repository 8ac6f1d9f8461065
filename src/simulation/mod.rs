//! Batch pricing runner.

pub mod runner;

pub use runner::{run_pricing_batch, PricingBatchConfig, PricingRequest};
