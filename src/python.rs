//! Python bindings.
//!
//! The pricing UI lives on the Python side; it builds parameter objects, calls the
//! pricers below, and plots the trajectories it gets back.

use pyo3::exceptions::{PyArithmeticError, PyRuntimeError, PyValueError};
use pyo3::prelude::*;
use tracing_subscriber::EnvFilter;

use crate::pricing;
use crate::process;
use crate::simulation::runner::{run_pricing_batch, PricingBatchConfig, PricingRequest};
use crate::types::config::{BlackScholesParams, MertonParams};
use crate::types::error::PricingError;
use crate::types::result::{BatchPricingResult, OptionPrices, PriceTrajectoryMatrix};

impl From<PricingError> for PyErr {
    fn from(err: PricingError) -> Self {
        match err {
            PricingError::InvalidParameter { .. } => PyValueError::new_err(err.to_string()),
            PricingError::NumericOverflow { .. } => PyArithmeticError::new_err(err.to_string()),
            PricingError::ThreadPool(_) => PyRuntimeError::new_err(err.to_string()),
        }
    }
}

#[pymethods]
impl BlackScholesParams {
    #[new]
    #[pyo3(signature = (s0, r, sigma, t, k, n_simulations, seed = None))]
    fn py_new(
        s0: f64,
        r: f64,
        sigma: f64,
        t: f64,
        k: f64,
        n_simulations: usize,
        seed: Option<u64>,
    ) -> Self {
        Self::new(s0, r, sigma, t, k, n_simulations, seed)
    }

    fn __repr__(&self) -> String {
        format!(
            "BlackScholesParams(s0={}, k={}, sigma={}, t={}, n_simulations={}, seed={:?})",
            self.s0, self.k, self.sigma, self.t, self.n_simulations, self.seed
        )
    }
}

#[pymethods]
impl MertonParams {
    #[new]
    #[pyo3(signature = (
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
        seed = None
    ))]
    #[allow(clippy::too_many_arguments)]
    fn py_new(
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
        Self::new(
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
        )
    }

    fn __repr__(&self) -> String {
        format!(
            "MertonParams(s0={}, k={}, lambda_jump={}, n_steps={}, n_simulations={}, seed={:?})",
            self.s0, self.k, self.lambda_jump, self.n_steps, self.n_simulations, self.seed
        )
    }
}

#[pymethods]
impl PriceTrajectoryMatrix {
    /// (paths, time points)
    #[getter(shape)]
    fn py_shape(&self) -> (usize, usize) {
        self.shape()
    }

    /// Observation times, for the x axis of a plot.
    #[pyo3(name = "times")]
    fn py_times(&self) -> Vec<f64> {
        self.times()
    }

    #[pyo3(name = "terminal_prices")]
    fn py_terminal_prices(&self) -> Vec<f64> {
        self.terminal_prices()
    }

    /// The first `n` paths.
    #[pyo3(name = "head", signature = (n = 10))]
    fn py_head(&self, n: usize) -> Vec<Vec<f64>> {
        self.head(n)
    }

    /// All paths as a list of lists.
    fn to_rows(&self) -> Vec<Vec<f64>> {
        self.head(self.n_paths())
    }

    fn __len__(&self) -> usize {
        self.n_paths()
    }

    fn __repr__(&self) -> String {
        let (paths, points) = self.shape();
        format!("PriceTrajectoryMatrix(paths={}, points={})", paths, points)
    }
}

#[pymethods]
impl OptionPrices {
    fn __repr__(&self) -> String {
        format!("OptionPrices(call={:.4}, put={:.4})", self.call, self.put)
    }
}

#[pymethods]
impl BatchPricingResult {
    fn __len__(&self) -> usize {
        self.len()
    }

    fn __repr__(&self) -> String {
        format!("BatchPricingResult(n={})", self.len())
    }
}

/// Black-Scholes call price.
#[pyfunction]
fn price_black_scholes_call(py: Python<'_>, params: BlackScholesParams) -> PyResult<f64> {
    Ok(py.allow_threads(|| pricing::price_black_scholes_call(&params))?)
}

/// Black-Scholes put price.
#[pyfunction]
fn price_black_scholes_put(py: Python<'_>, params: BlackScholesParams) -> PyResult<f64> {
    Ok(py.allow_threads(|| pricing::price_black_scholes_put(&params))?)
}

/// Black-Scholes call and put, independently sampled.
#[pyfunction]
fn price_black_scholes(py: Python<'_>, params: BlackScholesParams) -> PyResult<OptionPrices> {
    Ok(py.allow_threads(|| pricing::price_black_scholes(&params))?)
}

/// Merton jump-diffusion call price.
#[pyfunction]
fn price_merton_call(py: Python<'_>, params: MertonParams) -> PyResult<f64> {
    Ok(py.allow_threads(|| pricing::price_merton_call(&params))?)
}

/// Merton jump-diffusion put price.
#[pyfunction]
fn price_merton_put(py: Python<'_>, params: MertonParams) -> PyResult<f64> {
    Ok(py.allow_threads(|| pricing::price_merton_put(&params))?)
}

/// Merton call and put from one shared simulation.
#[pyfunction]
fn price_merton(py: Python<'_>, params: MertonParams) -> PyResult<OptionPrices> {
    Ok(py.allow_threads(|| pricing::price_merton(&params))?)
}

/// Simulated jump-diffusion trajectories.
#[pyfunction]
fn simulate_jump_diffusion_paths(
    py: Python<'_>,
    params: MertonParams,
) -> PyResult<PriceTrajectoryMatrix> {
    Ok(py.allow_threads(|| process::simulate_jump_diffusion_paths(&params))?)
}

/// Either parameter class, as accepted by `run_batch`.
#[derive(FromPyObject)]
enum PyPricingRequest {
    BlackScholes(BlackScholesParams),
    Merton(MertonParams),
}

impl From<PyPricingRequest> for PricingRequest {
    fn from(request: PyPricingRequest) -> Self {
        match request {
            PyPricingRequest::BlackScholes(p) => PricingRequest::BlackScholes(p),
            PyPricingRequest::Merton(p) => PricingRequest::Merton(p),
        }
    }
}

/// Price many parameter sets in parallel.
///
/// # Arguments
/// * `requests` - BlackScholesParams and/or MertonParams objects
/// * `n_workers` - Number of parallel workers (0 = auto-detect)
#[pyfunction]
#[pyo3(signature = (requests, n_workers = 0))]
fn run_batch(
    py: Python<'_>,
    requests: Vec<PyPricingRequest>,
    n_workers: usize,
) -> PyResult<BatchPricingResult> {
    let batch_config = PricingBatchConfig {
        requests: requests.into_iter().map(PricingRequest::from).collect(),
        n_workers: if n_workers == 0 { None } else { Some(n_workers) },
    };
    Ok(py.allow_threads(|| run_pricing_batch(batch_config))?)
}

/// Install a stderr log subscriber.
///
/// `filter` uses `RUST_LOG` syntax; without it, `RUST_LOG` is read and `info`
/// is the fallback. Returns False if a subscriber was already installed.
#[pyfunction]
#[pyo3(signature = (filter = None))]
fn init_logging(filter: Option<String>) -> PyResult<bool> {
    let env_filter = match filter {
        Some(f) => EnvFilter::try_new(f).map_err(|e| PyValueError::new_err(e.to_string()))?,
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };

    Ok(tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init()
        .is_ok())
}

/// Python module definition
#[pymodule]
fn mc_option_pricer(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(price_black_scholes_call, m)?)?;
    m.add_function(wrap_pyfunction!(price_black_scholes_put, m)?)?;
    m.add_function(wrap_pyfunction!(price_black_scholes, m)?)?;
    m.add_function(wrap_pyfunction!(price_merton_call, m)?)?;
    m.add_function(wrap_pyfunction!(price_merton_put, m)?)?;
    m.add_function(wrap_pyfunction!(price_merton, m)?)?;
    m.add_function(wrap_pyfunction!(simulate_jump_diffusion_paths, m)?)?;
    m.add_function(wrap_pyfunction!(run_batch, m)?)?;
    m.add_function(wrap_pyfunction!(init_logging, m)?)?;
    m.add_class::<BlackScholesParams>()?;
    m.add_class::<MertonParams>()?;
    m.add_class::<PriceTrajectoryMatrix>()?;
    m.add_class::<OptionPrices>()?;
    m.add_class::<BatchPricingResult>()?;
    Ok(())
}
