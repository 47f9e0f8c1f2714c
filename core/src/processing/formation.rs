use log::warn;

use crate::math::{FftHelper, MatrixHelper, StatsHelper};
use crate::prelude::SPEED_OF_LIGHT;
use crate::scattering::{IsarImage, ScatteringMatrix};

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum FormationError {
    #[error("transform size must be non-zero")]
    EmptyTransform,
    #[error("need at least two frequency and two angle samples, got {frequencies} x {angles}")]
    InsufficientSamples { frequencies: usize, angles: usize },
}

pub type FormationResult<T> = Result<T, FormationError>;

/// Forms calibrated ISAR images on an `size × size` grid.
///
/// The centre frequency is the mean of the first and last frequency and both
/// steps are taken from the first two samples, so sampling is assumed to be
/// uniform and monotonic. Zero or non-finite steps only produce a warning and
/// non-finite axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageFormer {
    size: usize,
}

impl ImageFormer {
    pub const DEFAULT_SIZE: usize = 256;

    pub fn new(size: usize) -> Self {
        Self { size }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn form(&self, matrix: &ScatteringMatrix) -> FormationResult<IsarImage> {
        let n = self.size;
        if n == 0 {
            return Err(FormationError::EmptyTransform);
        }

        let frequencies = &matrix.frequencies_hz;
        let angles_rad: Vec<f64> = matrix.angles_deg.iter().map(|deg| deg.to_radians()).collect();
        if frequencies.len() < 2 || angles_rad.len() < 2 {
            return Err(FormationError::InsufficientSamples {
                frequencies: frequencies.len(),
                angles: angles_rad.len(),
            });
        }

        let center_frequency = (frequencies[0] + frequencies[frequencies.len() - 1]) / 2.0;
        let frequency_step = frequencies[1] - frequencies[0];
        let angle_step = angles_rad[1] - angles_rad[0];
        if frequency_step == 0.0 || angle_step == 0.0 || !(frequency_step * angle_step).is_finite() {
            warn!(
                "degenerate sampling (df = {} Hz, dtheta = {} rad); image axes will not be finite",
                frequency_step, angle_step
            );
        }

        let mut grid = MatrixHelper::zero_padded(matrix.data.view(), n, n);
        FftHelper::new(n).forward_2d(&mut grid);
        let data = MatrixHelper::fftshift(grid.view());

        let range_extent = SPEED_OF_LIGHT / (4.0 * frequency_step);
        let cross_range_extent = SPEED_OF_LIGHT / (4.0 * center_frequency * angle_step);

        Ok(IsarImage::new(
            data,
            StatsHelper::linspace(-range_extent, range_extent, n),
            StatsHelper::linspace(-cross_range_extent, cross_range_extent, n),
        ))
    }
}

impl Default for ImageFormer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SIZE)
    }
}
