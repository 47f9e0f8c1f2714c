//! Batch imaging over a `root/<class>/<sample>/result/step<k>/` tree.

pub mod config;
pub mod orchestrator;
pub mod task;

pub use config::{BatchConfig, DEFAULT_NOISE_LEVELS};
pub use orchestrator::{form_from_file, BatchOrchestrator};
pub use task::{BatchTask, PlannedStep, SamplePlan, TaskOutcome};
