use ndarray::{aview1, Array2, Axis};
use num_complex::Complex64;
use rustfft::{num_traits::Zero, Fft, FftPlanner};

/// Helper that wraps a `rustfft` plan for square 2-D transforms.
pub struct FftHelper {
    fft: std::sync::Arc<dyn Fft<f64>>,
    scratch: Vec<Complex64>,
}

impl FftHelper {
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let scratch = vec![Complex64::zero(); size];
        Self { fft, scratch }
    }

    pub fn size(&self) -> usize {
        self.scratch.len()
    }

    /// Unnormalised forward transform along both axes of a `size × size` grid.
    pub fn forward_2d(&mut self, grid: &mut Array2<Complex64>) {
        debug_assert_eq!(grid.dim(), (self.size(), self.size()));

        for axis in [Axis(1), Axis(0)] {
            for mut lane in grid.lanes_mut(axis) {
                for (slot, value) in self.scratch.iter_mut().zip(lane.iter()) {
                    *slot = *value;
                }
                self.fft.process(&mut self.scratch);
                lane.assign(&aview1(&self.scratch));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impulse_transforms_to_flat_spectrum() {
        let mut helper = FftHelper::new(4);
        let mut grid = Array2::zeros((4, 4));
        grid[(0, 0)] = Complex64::new(1.0, 0.0);

        helper.forward_2d(&mut grid);
        assert!(grid
            .iter()
            .all(|value| (value - Complex64::new(1.0, 0.0)).norm() < 1e-12));
    }

    #[test]
    fn constant_grid_concentrates_in_dc_bin() {
        let mut helper = FftHelper::new(4);
        let mut grid = Array2::from_elem((4, 4), Complex64::new(1.0, 0.0));

        helper.forward_2d(&mut grid);
        assert!((grid[(0, 0)].re - 16.0).abs() < 1e-12);
        let off_peak: f64 = grid.iter().skip(1).map(|value| value.norm()).sum();
        assert!(off_peak < 1e-9);
    }
}
