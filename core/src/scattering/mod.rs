pub mod block;
pub mod image;
pub mod matrix;

pub use block::FrequencyBlock;
pub use image::IsarImage;
pub use matrix::ScatteringMatrix;
