//! Autoscaling of linear flux frames to displayable grayscale

mod frame_normalizer;
pub mod types;


pub use frame_normalizer::{FrameNormalizer, normalize};
pub use types::{GrayscalePixelBuffer, SampleRange, BYTES_PER_PIXEL};
