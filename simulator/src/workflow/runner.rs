use crate::workflow::config::WorkflowConfig;
use anyhow::{ensure, Context};
use isarcore::pipeline::BatchOrchestrator;
use isarcore::RunSummary;
use log::info;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Summary written next to a batch run for later triage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub root: PathBuf,
    pub num_steps: usize,
    pub noise_levels: Vec<f64>,
    pub fft_size: usize,
    pub summary: RunSummary,
}

#[derive(Clone)]
pub struct Runner {
    config: WorkflowConfig,
}

impl Runner {
    pub fn new(config: WorkflowConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> anyhow::Result<RunReport> {
        let batch = self
            .config
            .to_batch_config()
            .context("building batch configuration")?;
        ensure!(
            batch.root.is_dir(),
            "dataset root {} is not a directory",
            batch.root.display()
        );

        info!(
            "starting batch over {} ({} steps, {} noise levels, {}-point transform)",
            batch.root.display(),
            batch.num_steps,
            batch.noise_levels.len(),
            batch.fft_size
        );
        let orchestrator = BatchOrchestrator::new(batch);
        let summary = orchestrator.run();
        let batch = orchestrator.config();

        Ok(RunReport {
            root: batch.root.clone(),
            num_steps: batch.num_steps,
            noise_levels: batch.noise_levels.clone(),
            fft_size: batch.fft_size,
            summary,
        })
    }
}

pub fn write_report(report: &RunReport, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating report directory {}", parent.display()))?;
    }
    let json = serde_json::to_string_pretty(report).context("serializing run report")?;
    fs::write(path, json).with_context(|| format!("writing run report {}", path.display()))?;
    Ok(())
}
