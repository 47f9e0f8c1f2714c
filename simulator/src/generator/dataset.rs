use anyhow::Context;
use log::debug;
use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::generator::profile::{build_response, draw_scatterers, GeneratorConfig};
use crate::generator::template::write_response;

/// Shape of a synthetic `class/sample/result/step<k>` tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    pub classes: Vec<String>,
    pub samples_per_class: usize,
    pub steps: usize,
    pub target: GeneratorConfig,
}

/// Writes one response file per (class, sample, step) and returns the count.
/// Every sample gets its own scatterer layout; each step continues the
/// aspect sweep where the previous one ended.
pub fn build_dataset(root: &Path, config: &DatasetConfig) -> anyhow::Result<usize> {
    let sweep_deg = config.target.angle_step_deg * config.target.angle_count as f64;
    let mut written = 0;

    for (class_index, class) in config.classes.iter().enumerate() {
        for sample_index in 0..config.samples_per_class {
            let sample = format!("{class}{}", sample_label(sample_index));
            let seed = config
                .target
                .seed
                .wrapping_add((class_index as u64) << 32)
                .wrapping_add(sample_index as u64);
            let scatterers = draw_scatterers(&config.target, seed);
            let mut noise_seeds = StdRng::seed_from_u64(!seed);

            for step in 0..config.steps {
                let step_dir = root
                    .join(class)
                    .join(&sample)
                    .join("result")
                    .join(format!("step{step}"));
                fs::create_dir_all(&step_dir)
                    .with_context(|| format!("creating {}", step_dir.display()))?;

                let matrix = build_response(
                    &config.target,
                    &scatterers,
                    step as f64 * sweep_deg,
                    noise_seeds.gen(),
                )
                .with_context(|| format!("generating {class}/{sample} step {step}"))?;
                let path = step_dir.join("farfield.ffe");
                write_response(&path, &matrix)?;
                debug!("wrote {}", path.display());
                written += 1;
            }
        }
    }

    Ok(written)
}

/// Spreadsheet-style suffix: `A`..`Z`, then `AA`, `AB`, ...
pub fn sample_label(mut index: usize) -> String {
    let mut letters = Vec::new();
    loop {
        letters.push(char::from(b'A' + (index % 26) as u8));
        if index < 26 {
            break;
        }
        index = index / 26 - 1;
    }
    letters.iter().rev().collect()
}
