use num_complex::Complex64;
use rand::{rngs::StdRng, Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::scattering::ScatteringMatrix;

#[derive(thiserror::Error, Debug, PartialEq)]
pub enum NoiseError {
    #[error("noise level must be finite and non-negative, got {0}")]
    InvalidSigma(f64),
}

/// Standard deviation of the complex Gaussian perturbation, applied to the
/// real and imaginary parts independently.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseSpec {
    sigma: f64,
}

impl NoiseSpec {
    pub fn new(sigma: f64) -> Result<Self, NoiseError> {
        if sigma.is_finite() && sigma >= 0.0 {
            Ok(Self { sigma })
        } else {
            Err(NoiseError::InvalidSigma(sigma))
        }
    }

    pub fn clean() -> Self {
        Self { sigma: 0.0 }
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn is_clean(&self) -> bool {
        self.sigma == 0.0
    }
}

/// Add `sigma * (n_re + i n_im)` to every entry. A clean `NoiseSpec` draws nothing.
pub fn inject<R: Rng + ?Sized>(matrix: &mut ScatteringMatrix, spec: &NoiseSpec, rng: &mut R) {
    if spec.is_clean() {
        return;
    }
    let sigma = spec.sigma();
    matrix.data.mapv_inplace(|value| {
        let re: f64 = rng.sample(StandardNormal);
        let im: f64 = rng.sample(StandardNormal);
        value + Complex64::new(re, im) * sigma
    });
}

/// Same as [`inject`] with a generator freshly seeded from the OS.
pub fn inject_fresh(matrix: &mut ScatteringMatrix, spec: &NoiseSpec) {
    let mut rng = StdRng::from_entropy();
    inject(matrix, spec, &mut rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::StatsHelper;

    fn zero_matrix(rows: usize, cols: usize) -> ScatteringMatrix {
        ScatteringMatrix::zeros(
            (0..rows).map(|i| 1.0e9 + i as f64 * 1.0e7).collect(),
            (0..cols).map(|i| i as f64 * 0.1).collect(),
        )
    }

    #[test]
    fn clean_spec_leaves_matrix_untouched() {
        let mut matrix = zero_matrix(8, 8);
        matrix.data[(3, 4)] = Complex64::new(2.0, -1.0);
        let before = matrix.clone();

        inject_fresh(&mut matrix, &NoiseSpec::clean());
        assert_eq!(matrix, before);
    }

    #[test]
    fn noise_has_zero_mean_and_two_sigma_squared_variance() {
        let sigma = 0.3;
        let mut matrix = zero_matrix(200, 200);
        let mut rng = StdRng::seed_from_u64(7);
        inject(&mut matrix, &NoiseSpec::new(sigma).unwrap(), &mut rng);

        let re: Vec<f64> = matrix.data.iter().map(|value| value.re).collect();
        let im: Vec<f64> = matrix.data.iter().map(|value| value.im).collect();
        assert!(StatsHelper::mean(&re).abs() < 0.01);
        assert!(StatsHelper::mean(&im).abs() < 0.01);

        let combined = StatsHelper::variance(&re) + StatsHelper::variance(&im);
        let expected = 2.0 * sigma * sigma;
        assert!((combined - expected).abs() / expected < 0.05);
    }

    #[test]
    fn independent_draws_differ() {
        let spec = NoiseSpec::new(0.1).unwrap();
        let mut first = zero_matrix(4, 4);
        let mut second = zero_matrix(4, 4);
        inject_fresh(&mut first, &spec);
        inject_fresh(&mut second, &spec);
        assert_ne!(first, second);
    }

    #[test]
    fn negative_or_nan_sigma_is_rejected() {
        assert_eq!(NoiseSpec::new(-0.1), Err(NoiseError::InvalidSigma(-0.1)));
        assert!(NoiseSpec::new(f64::NAN).is_err());
        assert!(NoiseSpec::new(0.0).unwrap().is_clean());
    }
}
