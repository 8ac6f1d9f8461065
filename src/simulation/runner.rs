//! Parallel batch pricing using rayon.

use rayon::prelude::*;
use tracing::info;

use crate::pricing::{price_black_scholes, price_merton};
use crate::types::config::{BlackScholesParams, MertonParams};
use crate::types::error::{PricingError, PricingResult};
use crate::types::result::{BatchPricingResult, OptionPrices};

/// One independent parameter set to price.
#[derive(Debug, Clone)]
pub enum PricingRequest {
    BlackScholes(BlackScholesParams),
    Merton(MertonParams),
}

impl PricingRequest {
    /// Price call and put for this request.
    ///
    /// Merton requests share one simulation between call and put.
    pub fn price(&self) -> PricingResult<OptionPrices> {
        match self {
            PricingRequest::BlackScholes(params) => price_black_scholes(params),
            PricingRequest::Merton(params) => price_merton(params),
        }
    }
}

/// Configuration for a batch of pricing requests.
pub struct PricingBatchConfig {
    /// Requests, priced independently
    pub requests: Vec<PricingRequest>,
    /// Number of parallel workers (None = auto-detect)
    pub n_workers: Option<usize>,
}

/// Price every request of the batch on a dedicated thread pool.
///
/// Results keep request order. The first failing request aborts the batch.
pub fn run_pricing_batch(batch_config: PricingBatchConfig) -> PricingResult<BatchPricingResult> {
    let n_workers = batch_config
        .n_workers
        .unwrap_or_else(|| rayon::current_num_threads().min(8));

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(n_workers)
        .build()
        .map_err(|e| PricingError::ThreadPool(format!("Failed to create thread pool: {}", e)))?;

    info!(
        n_requests = batch_config.requests.len(),
        n_workers, "running pricing batch"
    );

    // Path-level parallelism inside each request also runs on this pool
    let results: PricingResult<Vec<OptionPrices>> = pool.install(|| {
        batch_config
            .requests
            .par_iter()
            .map(PricingRequest::price)
            .collect()
    });

    Ok(BatchPricingResult { results: results? })
}
