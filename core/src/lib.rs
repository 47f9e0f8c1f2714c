//! Scattering-response parsing and ISAR image formation.
//!
//! Frequency/angle samples are read from simulation output files, optionally
//! perturbed with complex Gaussian noise, transformed into calibrated 2-D
//! images and written as grayscale PNGs by the batch pipeline.

pub mod math;
pub mod parser;
pub mod pipeline;
pub mod prelude;
pub mod processing;
pub mod render;
pub mod scattering;
pub mod telemetry;

pub use parser::{parse_file, ExpectedLayout, ParseError, ScatteringParser};
pub use pipeline::{BatchConfig, BatchOrchestrator};
pub use prelude::{IsarError, IsarResult, SPEED_OF_LIGHT};
pub use processing::{ImageFormer, NoiseSpec};
pub use scattering::{IsarImage, ScatteringMatrix};
pub use telemetry::RunSummary;
