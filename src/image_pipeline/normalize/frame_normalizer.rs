//! Min/max contrast stretch from 16-bit linear flux to 8-bit gray.
//!
//! The coldest sample of a frame maps to 0 and the hottest to 255, with a
//! linear, truncating integer rescale in between. Nothing about absolute
//! temperature survives. A flat frame has its span clamped to 1 and so
//! renders black.

use tracing::trace;
use crate::image_pipeline::common::error::{ConversionError, Result};
use crate::image_pipeline::normalize::types::{GrayscalePixelBuffer, SampleRange, BYTES_PER_PIXEL};
use crate::image_pipeline::raw::RawThermalFrame;

const OPAQUE: u8 = 0xFF;
const MAX_LEVEL: u32 = 255;

/// Stateless grayscale normalizer.
///
/// Holds no per-frame state; output buffer reuse is left to the caller via
/// [`FrameNormalizer::normalize_into`].
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameNormalizer;

impl FrameNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Normalizes `frame` into a freshly allocated buffer.
    ///
    /// # Errors
    ///
    /// [`ConversionError::InvalidFrame`] when the frame is empty or its sample count does not match its
    /// dimensions.
    pub fn normalize(&self, frame: &RawThermalFrame) -> Result<GrayscalePixelBuffer> {
        let mut output = GrayscalePixelBuffer::default();
        self.normalize_into(frame, &mut output)?;
        Ok(output)
    }

    /// Normalizes `frame` into `output`, reusing its allocation.
    ///
    /// The frame is validated before `output` is touched, so on error the
    /// buffer still holds whatever it held before.
    pub fn normalize_into(
        &self,
        frame: &RawThermalFrame,
        output: &mut GrayscalePixelBuffer,
    ) -> Result<()> {
        frame.validate()?;
        let range = SampleRange::of(&frame.samples).ok_or(ConversionError::InvalidFrame {
            width: frame.width,
            height: frame.height,
            samples: 0,
        })?;
        let span = range.span();
        let min = u32::from(range.min);

        trace!(
            width = frame.width,
            height = frame.height,
            min = range.min,
            max = range.max,
            "Normalizing frame"
        );

        output.width = frame.width;
        output.height = frame.height;
        output.pixels.resize(frame.samples.len() * BYTES_PER_PIXEL, 0);

        for (quad, &sample) in output
            .pixels
            .chunks_exact_mut(BYTES_PER_PIXEL)
            .zip(frame.samples.iter())
        {
            let level = ((u32::from(sample) - min) * MAX_LEVEL / span).min(MAX_LEVEL) as u8;
            quad.copy_from_slice(&[level, level, level, OPAQUE]);
        }

        Ok(())
    }
}

/// Shorthand for [`FrameNormalizer::normalize`].
pub fn normalize(frame: &RawThermalFrame) -> Result<GrayscalePixelBuffer> {
    FrameNormalizer.normalize(frame)
}
