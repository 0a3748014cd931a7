//! Pipeline conversions module
//!
//! Orchestrates decode, normalize and export of captured thermal frames.

mod thermal_to_tiff;
mod timing;


pub use thermal_to_tiff::ThermalToTiffPipeline;
pub use timing::{PipelineTimings, StepTiming};
