use num_complex::Complex64;

/// Samples recorded under a single `#FREQUENCY` header.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyBlock {
    pub frequency_hz: f64,
    pub angles_deg: Vec<f64>,
    pub real: Vec<f64>,
    pub imag: Vec<f64>,
}

impl FrequencyBlock {
    pub fn new(frequency_hz: f64) -> Self {
        Self {
            frequency_hz,
            angles_deg: Vec::new(),
            real: Vec::new(),
            imag: Vec::new(),
        }
    }

    pub fn push(&mut self, angle_deg: f64, real: f64, imag: f64) {
        self.angles_deg.push(angle_deg);
        self.real.push(real);
        self.imag.push(imag);
    }

    pub fn len(&self) -> usize {
        self.angles_deg.len()
    }

    pub fn is_empty(&self) -> bool {
        self.angles_deg.is_empty()
    }

    /// Complex amplitudes in angle order.
    pub fn amplitudes(&self) -> impl Iterator<Item = Complex64> + '_ {
        self.real
            .iter()
            .zip(&self.imag)
            .map(|(&re, &im)| Complex64::new(re, im))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_keeps_samples_in_push_order() {
        let mut block = FrequencyBlock::new(1.0e9);
        block.push(0.0, 1.0, -1.0);
        block.push(10.0, 2.0, 0.5);

        assert_eq!(block.len(), 2);
        assert_eq!(block.angles_deg, vec![0.0, 10.0]);
        let amplitudes: Vec<_> = block.amplitudes().collect();
        assert_eq!(
            amplitudes,
            vec![Complex64::new(1.0, -1.0), Complex64::new(2.0, 0.5)]
        );
    }
}
