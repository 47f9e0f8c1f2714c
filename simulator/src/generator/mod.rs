pub mod dataset;
pub mod profile;
pub mod template;
