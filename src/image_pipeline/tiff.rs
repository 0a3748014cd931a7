//! TIFF writing module
//!
//! Snapshot export of normalized or raw thermal frames, with the usual
//! TIFF compression options.

mod writer;
mod standard_tiff_writer;
pub mod types;

pub use writer::TiffWriter;
pub use standard_tiff_writer::StandardTiffWriter;
pub use types::{TiffCompression, OutputFormat, ExportConfig, ExportConfigBuilder};
