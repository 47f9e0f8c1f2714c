use crate::parser::ParseError;
use crate::processing::formation::FormationError;
use crate::processing::noise::NoiseError;
use crate::render::RenderError;

/// Speed of light used for every axis calibration (m/s).
pub const SPEED_OF_LIGHT: f64 = 3.0e8;

/// Common error type for the imaging core.
#[derive(thiserror::Error, Debug)]
pub enum IsarError {
    #[error("parse failure: {0}")]
    Parse(#[from] ParseError),
    #[error("image formation failure: {0}")]
    Formation(#[from] FormationError),
    #[error("noise injection failure: {0}")]
    Noise(#[from] NoiseError),
    #[error("render failure: {0}")]
    Render(#[from] RenderError),
}

pub type IsarResult<T> = Result<T, IsarError>;
