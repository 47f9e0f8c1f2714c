pub mod formation;
pub mod noise;

pub use formation::{FormationError, ImageFormer};
pub use noise::{NoiseError, NoiseSpec};
