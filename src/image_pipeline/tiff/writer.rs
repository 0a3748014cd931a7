use std::io::Write;
use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::normalize::GrayscalePixelBuffer;
use crate::image_pipeline::raw::RawThermalFrame;
use crate::image_pipeline::tiff::types::ExportConfig;

pub trait TiffWriter {
    fn write_grayscale(&self, image: &GrayscalePixelBuffer, output: &mut dyn Write, config: &ExportConfig) -> Result<()>;
    fn write_linear_flux(&self, frame: &RawThermalFrame, output: &mut dyn Write, config: &ExportConfig) -> Result<()>;
}
