//! Thermal image pipeline module
//!
//! Turns raw linear flux frames from a thermal sensor into displayable
//! grayscale buffers, either one at a time, through a background processor
//! fed by acquisition events, or as TIFF snapshots.

pub mod raw;
pub mod normalize;
pub mod tiff;
pub mod conversions;
pub mod stream;
pub mod common;

pub use common::{
    ConversionError,
    Result,
};

pub use raw::{
    RawThermalFrame,
    RawFrameReader,
    LinearFluxReader,
};

pub use normalize::{
    FrameNormalizer,
    GrayscalePixelBuffer,
    SampleRange,
    normalize,
};

pub use self::tiff::{
    TiffCompression,
    OutputFormat,
    ExportConfig,
    ExportConfigBuilder,
    TiffWriter,
    StandardTiffWriter,
};

pub use conversions::{
    ThermalToTiffPipeline,
    PipelineTimings,
};

pub use stream::{
    AcquisitionEvent,
    DeviceInfo,
    FrameProcessor,
    FrameSlot,
    ProcessorConfig,
    ProcessorStats,
    TuningState,
};
