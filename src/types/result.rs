//! Pricing and simulation result types.

/// Simulated price paths, stored row-major.
///
/// Row `i` is one path; column `j` is the price after `j` time steps. Column 0
/// holds the initial price on every row.
#[cfg_attr(feature = "python", pyo3::pyclass)]
#[derive(Debug, Clone, PartialEq)]
pub struct PriceTrajectoryMatrix {
    /// Row-major prices, `n_paths * n_columns` entries
    data: Vec<f64>,
    /// Number of simulated paths
    n_paths: usize,
    /// Number of time points per path (steps + 1)
    n_columns: usize,
    /// Maturity covered by the paths
    maturity: f64,
}

impl PriceTrajectoryMatrix {
    /// Wrap a row-major buffer.
    ///
    /// Panics if the buffer length does not match the shape.
    pub(crate) fn from_raw(data: Vec<f64>, n_paths: usize, n_columns: usize, maturity: f64) -> Self {
        assert_eq!(data.len(), n_paths * n_columns, "buffer does not match shape");
        Self {
            data,
            n_paths,
            n_columns,
            maturity,
        }
    }

    /// (paths, time points)
    #[inline]
    pub fn shape(&self) -> (usize, usize) {
        (self.n_paths, self.n_columns)
    }

    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_columns - 1
    }

    #[inline]
    pub fn maturity(&self) -> f64 {
        self.maturity
    }

    /// Price on path `path` after `step` steps.
    #[inline]
    pub fn get(&self, path: usize, step: usize) -> Option<f64> {
        if path < self.n_paths && step < self.n_columns {
            Some(self.data[path * self.n_columns + step])
        } else {
            None
        }
    }

    /// One full path.
    #[inline]
    pub fn row(&self, path: usize) -> Option<&[f64]> {
        if path < self.n_paths {
            let start = path * self.n_columns;
            Some(&self.data[start..start + self.n_columns])
        } else {
            None
        }
    }

    /// Iterate over all paths.
    pub fn rows(&self) -> impl Iterator<Item = &[f64]> + '_ {
        self.data.chunks_exact(self.n_columns)
    }

    /// Last column: the price of every path at maturity.
    pub fn terminal_prices(&self) -> Vec<f64> {
        self.rows().map(|row| row[self.n_columns - 1]).collect()
    }

    /// Evenly spaced observation times from 0 to maturity.
    pub fn times(&self) -> Vec<f64> {
        let steps = self.n_steps();
        if steps == 0 {
            return vec![0.0];
        }
        let dt = self.maturity / steps as f64;
        (0..self.n_columns).map(|j| j as f64 * dt).collect()
    }

    /// The first `n` paths as owned rows, for plotting.
    pub fn head(&self, n: usize) -> Vec<Vec<f64>> {
        self.rows().take(n).map(|row| row.to_vec()).collect()
    }

    /// Flat row-major view of all prices.
    #[inline]
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }
}

/// Call and put prices for one parameter set.
#[cfg_attr(feature = "python", pyo3::pyclass(get_all))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionPrices {
    /// Discounted expected call payoff
    pub call: f64,
    /// Discounted expected put payoff
    pub put: f64,
}

impl OptionPrices {
    /// Call minus put, comparable to s0 - k * exp(-rT) under put-call parity.
    #[inline]
    pub fn parity_gap(&self) -> f64 {
        self.call - self.put
    }
}

/// Prices for every request of a batch, in request order.
#[cfg_attr(feature = "python", pyo3::pyclass(get_all))]
#[derive(Debug, Clone)]
pub struct BatchPricingResult {
    /// One entry per request
    pub results: Vec<OptionPrices>,
}

impl BatchPricingResult {
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix() -> PriceTrajectoryMatrix {
        // 2 paths, 3 time points
        PriceTrajectoryMatrix::from_raw(vec![100.0, 101.0, 102.0, 100.0, 99.0, 98.0], 2, 3, 1.0)
    }

    #[test]
    fn test_shape_and_access() {
        let m = matrix();
        assert_eq!(m.shape(), (2, 3));
        assert_eq!(m.n_steps(), 2);
        assert_eq!(m.get(1, 2), Some(98.0));
        assert_eq!(m.get(2, 0), None);
        assert_eq!(m.get(0, 3), None);
        assert_eq!(m.row(0), Some(&[100.0, 101.0, 102.0][..]));
        assert!(m.row(2).is_none());
    }

    #[test]
    fn test_terminal_prices() {
        assert_eq!(matrix().terminal_prices(), vec![102.0, 98.0]);
    }

    #[test]
    fn test_times() {
        assert_eq!(matrix().times(), vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_head_truncates() {
        let m = matrix();
        assert_eq!(m.head(1), vec![vec![100.0, 101.0, 102.0]]);
        assert_eq!(m.head(10).len(), 2);
    }

    #[test]
    #[should_panic]
    fn test_from_raw_rejects_bad_shape() {
        PriceTrajectoryMatrix::from_raw(vec![1.0, 2.0, 3.0], 2, 2, 1.0);
    }
}
