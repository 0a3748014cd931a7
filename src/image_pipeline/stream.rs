//! Event-driven frame processing
//!
//! The acquisition side pushes [`AcquisitionEvent`]s into a channel; a
//! worker thread normalizes frames and publishes each finished buffer into
//! a [`FrameSlot`] that the presentation side polls.

mod events;
mod frame_slot;
mod processor;

pub use events::{AcquisitionEvent, AcquisitionState, DeviceInfo, TuningState};
pub use frame_slot::FrameSlot;
pub use processor::{FrameProcessor, ProcessorConfig, ProcessorStats};
