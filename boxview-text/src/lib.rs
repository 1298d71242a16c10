pub mod error;
pub mod faces;
pub mod measurement;
pub mod rasterization;
pub mod types;
