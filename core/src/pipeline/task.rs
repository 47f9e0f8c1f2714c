use siphasher::sip::SipHasher13;
use std::hash::Hasher;
use std::path::PathBuf;

use crate::prelude::IsarError;

pub const RESULT_DIR: &str = "result";

pub fn step_dir_name(step: usize) -> String {
    format!("step{step}")
}

pub fn output_dir_name(sample: &str) -> String {
    format!("isar_images_{}_electro", sample.to_lowercase())
}

/// `<class><step>.png` when clean, `<class><step>_gauss_<sigma>.png` otherwise.
pub fn image_file_name(class: &str, step: usize, noise_level: f64) -> String {
    if noise_level == 0.0 {
        format!("{class}{step}.png")
    } else {
        format!("{class}{step}_gauss_{noise_level:.2}.png")
    }
}

/// One (class, sample, step, noise level) unit of work.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchTask {
    pub class: String,
    pub sample: String,
    pub step: usize,
    pub noise_level: f64,
    pub source: PathBuf,
    pub destination: PathBuf,
}

impl BatchTask {
    pub fn describe(&self) -> String {
        format!(
            "class {} sample {} step {} sigma {:.2}",
            self.class, self.sample, self.step, self.noise_level
        )
    }

    /// Seed for this task's noise stream, independent of processing order.
    pub fn seed(&self, base: u64) -> u64 {
        let mut hasher = SipHasher13::new_with_keys(0, 0);
        hasher.write_u64(base);
        hasher.write(self.class.as_bytes());
        hasher.write_u8(0xff);
        hasher.write(self.sample.as_bytes());
        hasher.write_u8(0xff);
        hasher.write_u64(self.step as u64);
        hasher.write_u64(self.noise_level.to_bits());
        hasher.finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlannedStep {
    /// No source file in the step directory.
    Missing { step: usize, step_dir: PathBuf },
    /// One task per configured noise level, in configured order.
    Ready(Vec<BatchTask>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SamplePlan {
    pub class: String,
    pub sample: String,
    pub output_dir: PathBuf,
    pub steps: Vec<PlannedStep>,
}

/// Tagged result of one unit of work, folded into the run summary.
#[derive(Debug)]
pub enum TaskOutcome {
    Produced(PathBuf),
    MissingSource { step: usize, step_dir: PathBuf },
    Failed { task: BatchTask, error: IsarError },
}
