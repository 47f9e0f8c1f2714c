use anyhow::{bail, Context};
use isarcore::pipeline::{BatchConfig, DEFAULT_NOISE_LEVELS};
use isarcore::{ExpectedLayout, ImageFormer};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowConfig {
    pub root: Option<PathBuf>,
    pub num_steps: usize,
    pub noise_levels: Vec<f64>,
    pub fft_size: usize,
    pub frequencies: Option<usize>,
    pub angles: Option<usize>,
    pub output_root: Option<PathBuf>,
    pub source_extension: Option<String>,
    pub noise_seed: Option<u64>,
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            root: None,
            num_steps: 10,
            noise_levels: DEFAULT_NOISE_LEVELS.to_vec(),
            fft_size: ImageFormer::DEFAULT_SIZE,
            frequencies: None,
            angles: None,
            output_root: None,
            source_extension: None,
            noise_seed: None,
        }
    }
}

impl WorkflowConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading workflow config {}", path_ref.display()))?;
        let config: WorkflowConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing workflow config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn to_batch_config(&self) -> anyhow::Result<BatchConfig> {
        let Some(root) = self.root.clone() else {
            bail!("no dataset root configured (use --root, ISAR_DATA_DIR or `root:` in the workflow file)");
        };
        if self.noise_levels.iter().any(|level| !(level.is_finite() && *level >= 0.0)) {
            bail!("noise levels must be finite and non-negative: {:?}", self.noise_levels);
        }

        let mut config = BatchConfig::new(root, self.num_steps);
        config.noise_levels = self.noise_levels.clone();
        config.fft_size = self.fft_size;
        config.layout = ExpectedLayout {
            frequencies: self.frequencies,
            angles: self.angles,
        };
        config.output_root = self.output_root.clone();
        config.source_extension = self.source_extension.clone();
        config.noise_seed = self.noise_seed;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_produce_batch_config() {
        let cfg = WorkflowConfig {
            root: Some(PathBuf::from("/data/isar")),
            ..Default::default()
        };
        let batch = cfg.to_batch_config().unwrap();
        assert_eq!(batch.root, PathBuf::from("/data/isar"));
        assert_eq!(batch.noise_levels, DEFAULT_NOISE_LEVELS.to_vec());
        assert_eq!(batch.fft_size, 256);
        assert_eq!(batch.layout, ExpectedLayout::default());
    }

    #[test]
    fn missing_root_is_rejected() {
        assert!(WorkflowConfig::default().to_batch_config().is_err());
    }

    #[test]
    fn negative_noise_level_is_rejected() {
        let cfg = WorkflowConfig {
            root: Some(PathBuf::from("data")),
            noise_levels: vec![0.0, -0.1],
            ..Default::default()
        };
        assert!(cfg.to_batch_config().is_err());
    }

    #[test]
    fn config_load_reads_yaml() {
        let mut temp = NamedTempFile::new().unwrap();
        temp.write_all(b"root: /data/isar\nnum_steps: 3\nfrequencies: 201\nangles: 181\nnoise_seed: 5\n")
            .unwrap();
        let path = temp.into_temp_path();
        let cfg = WorkflowConfig::load(&path).unwrap();
        assert_eq!(cfg.num_steps, 3);
        assert_eq!(cfg.fft_size, 256);

        let batch = cfg.to_batch_config().unwrap();
        assert_eq!(batch.layout, ExpectedLayout::new(201, 181));
        assert_eq!(batch.noise_seed, Some(5));
    }
}
