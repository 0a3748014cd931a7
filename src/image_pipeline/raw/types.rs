//! Raw thermal frame types

use crate::image_pipeline::common::error::{ConversionError, Result};

/// One frame of linear flux samples as delivered by the sensor.
///
/// Each sample is a 14-bit reading padded to 16 bits. The full `u16` range
/// is accepted; nothing here assumes the top two bits are clear.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawThermalFrame {
    /// Width of the frame in pixels
    pub width: u32,
    /// Height of the frame in pixels
    pub height: u32,
    /// Row-major samples, `width * height` of them when well formed
    pub samples: Vec<u16>,
}

impl RawThermalFrame {
    pub fn new(width: u32, height: u32, samples: Vec<u16>) -> Self {
        Self { width, height, samples }
    }

    /// Number of pixels the dimensions claim, independent of `samples`.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Checks that the frame is non-empty and its sample count matches its
    /// dimensions.
    pub fn validate(&self) -> Result<()> {
        if self.samples.is_empty() || self.samples.len() != self.pixel_count() {
            return Err(ConversionError::InvalidFrame {
                width: self.width,
                height: self.height,
                samples: self.samples.len(),
            });
        }
        Ok(())
    }
}
