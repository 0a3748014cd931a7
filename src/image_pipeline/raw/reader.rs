use crate::image_pipeline::common::error::Result;
use crate::image_pipeline::raw::types::RawThermalFrame;

pub trait RawFrameReader {
    fn read_frame(&self, data: &[u8], width: u32, height: u32) -> Result<RawThermalFrame>;
}
