use ndarray::Array2;
use num_complex::Complex64;

/// Calibrated complex ISAR image.
///
/// Rows follow the range axis (transform over frequency) and columns the
/// cross-range axis (transform over angle). Both axes are in metres.
#[derive(Debug, Clone, PartialEq)]
pub struct IsarImage {
    data: Array2<Complex64>,
    range_axis: Vec<f64>,
    cross_range_axis: Vec<f64>,
}

impl IsarImage {
    pub(crate) fn new(
        data: Array2<Complex64>,
        range_axis: Vec<f64>,
        cross_range_axis: Vec<f64>,
    ) -> Self {
        Self {
            data,
            range_axis,
            cross_range_axis,
        }
    }

    pub fn data(&self) -> &Array2<Complex64> {
        &self.data
    }

    pub fn range_axis(&self) -> &[f64] {
        &self.range_axis
    }

    pub fn cross_range_axis(&self) -> &[f64] {
        &self.cross_range_axis
    }

    pub fn size(&self) -> usize {
        self.range_axis.len()
    }

    /// Magnitude of every pixel, same layout as [`IsarImage::data`].
    pub fn magnitude(&self) -> Array2<f64> {
        self.data.mapv(|value| value.norm())
    }

    pub fn peak_magnitude(&self) -> f64 {
        self.data
            .iter()
            .map(|value| value.norm())
            .fold(0.0, f64::max)
    }
}
