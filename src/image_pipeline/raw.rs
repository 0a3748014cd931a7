//! Raw thermal frame module
//!
//! Holds the sensor-side frame type and the readers that turn vendor byte
//! buffers into it.

mod reader;
mod linear_flux_reader;
pub mod types;

pub use reader::RawFrameReader;
pub use linear_flux_reader::LinearFluxReader;
pub use types::RawThermalFrame;
