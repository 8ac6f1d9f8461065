//! Error type for pricing and simulation.

use thiserror::Error;

/// Errors surfaced by the pricing engine.
///
/// Every failure is reported synchronously to the caller; nothing is retried.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum PricingError {
    /// A parameter is outside its valid range. Raised before any sampling.
    #[error("Invalid parameter: {name} = {value} ({constraint})")]
    InvalidParameter {
        /// Parameter name as it appears in the params struct
        name: &'static str,
        /// The offending value
        value: f64,
        /// The constraint it violates
        constraint: &'static str,
    },

    /// Simulation produced a non-finite or collapsed value.
    #[error("Numeric overflow: {context}")]
    NumericOverflow {
        /// Where the bad value appeared
        context: String,
    },

    /// The batch runner could not build its worker pool.
    #[error("Thread pool error: {0}")]
    ThreadPool(String),
}

impl PricingError {
    pub(crate) fn invalid(name: &'static str, value: f64, constraint: &'static str) -> Self {
        PricingError::InvalidParameter {
            name,
            value,
            constraint,
        }
    }

    pub(crate) fn overflow(context: impl Into<String>) -> Self {
        PricingError::NumericOverflow {
            context: context.into(),
        }
    }
}

/// Result alias used across the crate.
pub type PricingResult<T> = Result<T, PricingError>;
