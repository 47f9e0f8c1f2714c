use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::parser::ExpectedLayout;
use crate::processing::ImageFormer;

pub const DEFAULT_NOISE_LEVELS: [f64; 6] = [0.0, 0.1, 0.2, 0.3, 0.4, 0.5];

/// Everything a batch run needs; supplied by the caller, never read from
/// the process environment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchConfig {
    pub root: PathBuf,
    pub num_steps: usize,
    pub noise_levels: Vec<f64>,
    pub fft_size: usize,
    pub layout: ExpectedLayout,
    /// Parent for the per-sample image directories. Defaults to the sample
    /// directory itself, next to `result/`.
    pub output_root: Option<PathBuf>,
    /// Only files with this extension are taken as step sources.
    pub source_extension: Option<String>,
    /// Base seed for reproducible noise; each task derives its own stream.
    pub noise_seed: Option<u64>,
}

impl BatchConfig {
    pub fn new(root: impl Into<PathBuf>, num_steps: usize) -> Self {
        Self {
            root: root.into(),
            num_steps,
            noise_levels: DEFAULT_NOISE_LEVELS.to_vec(),
            fft_size: ImageFormer::DEFAULT_SIZE,
            layout: ExpectedLayout::default(),
            output_root: None,
            source_extension: None,
            noise_seed: None,
        }
    }
}
