//! Price processes and their random streams.

pub mod gbm;
pub mod jump_diffusion;
pub mod streams;

pub use gbm::{simulate_terminal_prices, GbmTerminalSampler};
pub use jump_diffusion::{simulate_jump_diffusion_paths, JumpDiffusionProcess, PathDraws};
pub use streams::{Stream, StreamSeeds};

use crate::types::error::{PricingError, PricingResult};

/// Zeroed price buffer of `len` entries.
///
/// A size the allocator cannot provide is reported against `n_simulations`
/// instead of aborting.
pub(crate) fn try_alloc_prices(
    len: usize,
    n_simulations: usize,
    constraint: &'static str,
) -> PricingResult<Vec<f64>> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| PricingError::invalid("n_simulations", n_simulations as f64, constraint))?;
    buffer.resize(len, 0.0);
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_prices_zeroed() {
        let buffer = try_alloc_prices(16, 16, "too many paths").unwrap();
        assert_eq!(buffer, vec![0.0; 16]);
    }

    #[test]
    fn test_alloc_prices_capacity_overflow() {
        let err = try_alloc_prices(usize::MAX / 4, 1, "too many paths").unwrap_err();
        assert!(matches!(
            err,
            PricingError::InvalidParameter { name: "n_simulations", constraint: "too many paths", .. }
        ));
    }
}
