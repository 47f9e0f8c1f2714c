use rand::{rngs::StdRng, Rng, SeedableRng};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::config::BatchConfig;
use super::task::{
    image_file_name, output_dir_name, step_dir_name, BatchTask, PlannedStep, SamplePlan,
    TaskOutcome, RESULT_DIR,
};
use crate::parser::{ExpectedLayout, ScatteringParser};
use crate::prelude::IsarResult;
use crate::processing::{noise, ImageFormer, NoiseSpec};
use crate::render;
use crate::scattering::IsarImage;
use crate::telemetry::{LogManager, MetricsRecorder, RunSummary};

/// Parse one file, perturb it and form its image.
pub fn form_from_file<R: Rng + ?Sized>(
    path: &Path,
    layout: ExpectedLayout,
    former: &ImageFormer,
    spec: &NoiseSpec,
    rng: &mut R,
) -> IsarResult<IsarImage> {
    let mut matrix = ScatteringParser::new(layout)?.parse_file(path)?;
    noise::inject(&mut matrix, spec, rng);
    Ok(former.form(&matrix)?)
}

/// Walks the dataset tree and writes one image per (sample, step, noise
/// level). Individual failures are logged and counted, never propagated.
pub struct BatchOrchestrator {
    config: BatchConfig,
    former: ImageFormer,
    metrics: MetricsRecorder,
    logger: LogManager,
}

impl BatchOrchestrator {
    pub fn new(config: BatchConfig) -> Self {
        let former = ImageFormer::new(config.fft_size);
        Self {
            config,
            former,
            metrics: MetricsRecorder::new(),
            logger: LogManager::new("isarcore::batch"),
        }
    }

    pub fn config(&self) -> &BatchConfig {
        &self.config
    }

    pub fn run(&self) -> RunSummary {
        let classes = match self.sorted_subdirs(&self.config.root) {
            Ok(classes) => classes,
            Err(err) => {
                self.logger.failure(&format!(
                    "cannot list dataset root {}: {}",
                    self.config.root.display(),
                    err
                ));
                self.metrics.record_error();
                return self.finish();
            }
        };

        for class_dir in classes {
            if self.is_output_root(&class_dir) {
                self.logger
                    .detail(&format!("not walking output root {}", class_dir.display()));
                continue;
            }
            let class = dir_name(&class_dir);
            let samples = match self.sorted_subdirs(&class_dir) {
                Ok(samples) => samples,
                Err(err) => {
                    self.logger
                        .failure(&format!("cannot list class {}: {}", class, err));
                    self.metrics.record_error();
                    continue;
                }
            };
            for sample_dir in samples {
                self.run_sample(&class, &sample_dir);
            }
        }

        self.finish()
    }

    /// Tasks for one sample, or `None` when it has no `result/` directory.
    pub fn plan_sample(&self, class: &str, sample_dir: &Path) -> Option<SamplePlan> {
        let result_dir = sample_dir.join(RESULT_DIR);
        if !result_dir.is_dir() {
            return None;
        }

        let sample = dir_name(sample_dir);
        let output_dir = self
            .config
            .output_root
            .as_deref()
            .unwrap_or(sample_dir)
            .join(output_dir_name(&sample));

        let steps = (0..self.config.num_steps)
            .map(|step| {
                let step_dir = result_dir.join(step_dir_name(step));
                match self.find_source(&step_dir, self.config.source_extension.as_deref()) {
                    None => PlannedStep::Missing { step, step_dir },
                    Some(source) => PlannedStep::Ready(
                        self.config
                            .noise_levels
                            .iter()
                            .map(|&noise_level| BatchTask {
                                class: class.to_string(),
                                sample: sample.clone(),
                                step,
                                noise_level,
                                source: source.clone(),
                                destination: output_dir
                                    .join(image_file_name(class, step, noise_level)),
                            })
                            .collect(),
                    ),
                }
            })
            .collect();

        Some(SamplePlan {
            class: class.to_string(),
            sample,
            output_dir,
            steps,
        })
    }

    pub fn execute(&self, task: &BatchTask) -> TaskOutcome {
        match self.produce(task) {
            Ok(()) => TaskOutcome::Produced(task.destination.clone()),
            Err(error) => TaskOutcome::Failed {
                task: task.clone(),
                error,
            },
        }
    }

    fn produce(&self, task: &BatchTask) -> IsarResult<()> {
        let spec = NoiseSpec::new(task.noise_level)?;
        let mut rng = match self.config.noise_seed {
            Some(base) => StdRng::seed_from_u64(task.seed(base)),
            None => StdRng::from_entropy(),
        };
        let image = form_from_file(
            &task.source,
            self.config.layout,
            &self.former,
            &spec,
            &mut rng,
        )?;
        render::save_png(&image, &task.destination)?;
        Ok(())
    }

    fn run_sample(&self, class: &str, sample_dir: &Path) {
        let Some(plan) = self.plan_sample(class, sample_dir) else {
            self.logger.warning(&format!(
                "skipping {}: no {}/ directory",
                sample_dir.display(),
                RESULT_DIR
            ));
            self.metrics.record_skipped_sample();
            return;
        };

        self.logger.record(&format!(
            "processing class {} sample {} -> {}",
            plan.class,
            plan.sample,
            plan.output_dir.display()
        ));
        if let Err(err) = fs::create_dir_all(&plan.output_dir) {
            self.logger.failure(&format!(
                "cannot create {}: {}",
                plan.output_dir.display(),
                err
            ));
            self.metrics.record_error();
            return;
        }

        for step in plan.steps {
            match step {
                PlannedStep::Missing { step, step_dir } => {
                    self.fold(TaskOutcome::MissingSource { step, step_dir });
                }
                PlannedStep::Ready(tasks) => {
                    for task in &tasks {
                        self.fold(self.execute(task));
                    }
                }
            }
        }
    }

    fn fold(&self, outcome: TaskOutcome) {
        match outcome {
            TaskOutcome::Produced(path) => {
                self.logger.detail(&format!("wrote {}", path.display()));
                self.metrics.record_image();
            }
            TaskOutcome::MissingSource { step, step_dir } => {
                self.logger.warning(&format!(
                    "step {} has no source file in {}",
                    step,
                    step_dir.display()
                ));
                self.metrics.record_error();
            }
            TaskOutcome::Failed { task, error } => {
                self.logger
                    .failure(&format!("{} failed: {}", task.describe(), error));
                self.metrics.record_error();
            }
        }
    }

    fn is_output_root(&self, dir: &Path) -> bool {
        let Some(output_root) = self.config.output_root.as_deref() else {
            return false;
        };
        match (fs::canonicalize(dir), fs::canonicalize(output_root)) {
            (Ok(dir), Ok(output_root)) => dir == output_root,
            _ => dir == output_root,
        }
    }

    /// Readable entries of `path`; unreadable entries are logged and dropped.
    fn entries(&self, path: &Path) -> io::Result<Vec<fs::DirEntry>> {
        let mut entries = Vec::new();
        for entry in fs::read_dir(path)? {
            match entry {
                Ok(entry) => entries.push(entry),
                Err(err) => self.logger.warning(&format!(
                    "unreadable entry in {}: {}",
                    path.display(),
                    err
                )),
            }
        }
        Ok(entries)
    }

    fn sorted_subdirs(&self, path: &Path) -> io::Result<Vec<PathBuf>> {
        let mut dirs: Vec<PathBuf> = self
            .entries(path)?
            .into_iter()
            .filter(|entry| entry.file_type().map(|ft| ft.is_dir()).unwrap_or(false))
            .map(|entry| entry.path())
            .collect();
        dirs.sort();
        Ok(dirs)
    }

    fn find_source(&self, step_dir: &Path, extension: Option<&str>) -> Option<PathBuf> {
        let wanted = extension.map(|ext| ext.trim_start_matches('.'));
        let mut files: Vec<PathBuf> = self
            .entries(step_dir)
            .ok()?
            .into_iter()
            .filter(|entry| entry.file_type().map(|ft| ft.is_file()).unwrap_or(false))
            .map(|entry| entry.path())
            .filter(|path| match wanted {
                None => true,
                Some(ext) => path
                    .extension()
                    .and_then(|found| found.to_str())
                    .map_or(false, |found| found.eq_ignore_ascii_case(ext)),
            })
            .collect();
        files.sort();
        files.into_iter().next()
    }

    fn finish(&self) -> RunSummary {
        let summary = self.metrics.snapshot();
        self.logger.record(&format!("batch finished: {}", summary));
        summary
    }
}

fn dir_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
