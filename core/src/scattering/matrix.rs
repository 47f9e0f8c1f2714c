use ndarray::Array2;
use num_complex::Complex64;

/// Complex scattering amplitudes indexed by (frequency, angle).
#[derive(Debug, Clone, PartialEq)]
pub struct ScatteringMatrix {
    pub data: Array2<Complex64>,
    pub frequencies_hz: Vec<f64>,
    pub angles_deg: Vec<f64>,
}

impl ScatteringMatrix {
    pub fn new(data: Array2<Complex64>, frequencies_hz: Vec<f64>, angles_deg: Vec<f64>) -> Self {
        Self {
            data,
            frequencies_hz,
            angles_deg,
        }
    }

    /// All-zero matrix over the given sampling grid.
    pub fn zeros(frequencies_hz: Vec<f64>, angles_deg: Vec<f64>) -> Self {
        let data = Array2::zeros((frequencies_hz.len(), angles_deg.len()));
        Self::new(data, frequencies_hz, angles_deg)
    }

    /// `(frequency count, angle count)`.
    pub fn shape(&self) -> (usize, usize) {
        self.data.dim()
    }
}
