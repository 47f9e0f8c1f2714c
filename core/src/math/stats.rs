pub struct StatsHelper;

impl StatsHelper {
    pub fn mean(samples: &[f64]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        samples.iter().sum::<f64>() / samples.len() as f64
    }

    /// Population variance.
    pub fn variance(samples: &[f64]) -> f64 {
        if samples.is_empty() {
            return 0.0;
        }
        let mean = Self::mean(samples);
        samples.iter().map(|&v| (v - mean).powi(2)).sum::<f64>() / samples.len() as f64
    }

    /// `count` evenly spaced samples over `[start, stop]`, both ends included.
    pub fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
        match count {
            0 => Vec::new(),
            1 => vec![start],
            _ => {
                let step = (stop - start) / (count - 1) as f64;
                (0..count)
                    .map(|i| {
                        if i == count - 1 {
                            stop
                        } else {
                            start + i as f64 * step
                        }
                    })
                    .collect()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_samples_have_zero_moments() {
        assert_eq!(StatsHelper::mean(&[]), 0.0);
        assert_eq!(StatsHelper::variance(&[]), 0.0);
    }

    #[test]
    fn variance_of_two_point_set() {
        assert_eq!(StatsHelper::mean(&[1.0, 3.0]), 2.0);
        assert_eq!(StatsHelper::variance(&[1.0, 3.0]), 1.0);
    }

    #[test]
    fn linspace_includes_both_endpoints() {
        let axis = StatsHelper::linspace(-1.0, 1.0, 5);
        assert_eq!(axis, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert_eq!(StatsHelper::linspace(2.0, 3.0, 1), vec![2.0]);
        assert!(StatsHelper::linspace(2.0, 3.0, 0).is_empty());
    }
}
