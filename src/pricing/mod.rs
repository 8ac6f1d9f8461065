//! Option pricers built on the price processes.

pub mod black_scholes;
pub mod merton;
pub mod payoff;

pub use black_scholes::{price_black_scholes, price_black_scholes_call, price_black_scholes_put};
pub use merton::{price_merton, price_merton_call, price_merton_put};
pub use payoff::{discounted_mean_payoff, OptionType};
