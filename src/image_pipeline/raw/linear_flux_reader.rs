//! Reader for the vendor's "linear flux 14-bit" buffer layout.
//!
//! The thermal SDK hands frames over as a flat byte array of little-endian
//! `u16` values, one per pixel, each holding a 14-bit sensor reading in its
//! low bits.

use tracing::debug;
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::raw::reader::RawFrameReader;
use crate::image_pipeline::raw::types::RawThermalFrame;

/// Bytes occupied by one padded sample.
const BYTES_PER_SAMPLE: usize = 2;

/// Decodes little-endian 16-bit linear flux buffers.
pub struct LinearFluxReader;

impl RawFrameReader for LinearFluxReader {
    /// Decodes `data` into a frame of the given dimensions.
    ///
    /// Every complete sample in the buffer is kept. The sample count is not
    /// reconciled with `width * height` here; callers validate the frame (or
    /// let the normalizer do it) so a mismatch is reported as
    /// [`ConversionError::InvalidFrame`].
    ///
    /// # Errors
    ///
    /// Returns [`ConversionError::DecodeError`] when the buffer length is not
    /// a whole number of samples.
    fn read_frame(&self, data: &[u8], width: u32, height: u32) -> Result<RawThermalFrame> {
        debug!("Decoding linear flux buffer, {} bytes for {}x{}", data.len(), width, height);

        if data.len() % BYTES_PER_SAMPLE != 0 {
            return Err(ConversionError::DecodeError(format!(
                "buffer length {} is not a multiple of {}",
                data.len(),
                BYTES_PER_SAMPLE
            )));
        }

        let samples: Vec<u16> = data
            .chunks_exact(BYTES_PER_SAMPLE)
            .map(|pair| u16::from_le_bytes([pair[0], pair[1]]))
            .collect();

        debug!("Decoded {} samples", samples.len());

        Ok(RawThermalFrame::new(width, height, samples))
    }
}
